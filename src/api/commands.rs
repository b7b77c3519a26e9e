use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::ParticipantId;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`RaffleOperation`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Работа со списком участников.
    Roster(RosterCommand),

    /// Розыгрыш призов.
    Draw(DrawCommand),

    /// Распределение по командам.
    Grouping(GroupingCommand),
}

/// Команды над списком участников.
///
/// Любое изменение списка сбрасывает историю розыгрыша и текущее разбиение.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RosterCommand {
    /// Добавить имена из текста (одно имя на строку).
    AddNames { text: String },

    /// Добавить демонстрационный список.
    LoadSample,

    /// Убрать участника.
    Remove { participant_id: ParticipantId },

    /// Убрать дубли по имени (остаётся первое вхождение).
    RemoveDuplicates,

    /// Очистить список.
    Clear,
}

/// Команды розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Запустить барабан.
    Start,

    /// Один тик барабана.
    ///
    /// На этой поверхности таймера нет: тики дёргает клиент по расписанию.
    Tick,

    /// Остановить барабан и зафиксировать победителя.
    Stop,

    /// Разрешить / запретить повторные победы.
    SetAllowRepeats { allow: bool },

    /// Полный сброс сессии.
    ResetSession,

    /// Очистить историю (нужно `confirmed = true`).
    ClearHistory { confirmed: bool },
}

/// Команды распределения по командам.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GroupingCommand {
    /// Сгенерировать новое разбиение (старое выбрасывается целиком).
    Generate { group_size: usize },

    /// Применить имена групп, полученные от внешнего сервиса: `group_id -> name`.
    ApplyNames { names: HashMap<String, String> },
}
