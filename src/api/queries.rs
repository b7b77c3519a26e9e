use serde::{Deserialize, Serialize};

use super::dto::{DrawViewDto, GroupsViewDto, RosterViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Список участников (с пометкой дублей).
    GetRoster,

    /// Состояние розыгрыша и история.
    GetDraw,

    /// Текущее разбиение.
    GetGroups,

    /// Разбиение в виде CSV (`Group Name,Member Name`).
    ExportGroupsCsv,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Roster(RosterViewDto),
    Draw(DrawViewDto),
    Groups(GroupsViewDto),
    Csv(String),
}
