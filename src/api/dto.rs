use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ParticipantId;
use crate::engine::DrawState;

/// DTO участника в списке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantDto {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Имя встречается в списке больше одного раза.
    pub is_duplicate: bool,
}

/// DTO списка участников.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterViewDto {
    pub participants: Vec<ParticipantDto>,
    pub total: u32,
    pub has_duplicates: bool,
}

/// DTO одного победителя в истории.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerDto {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub timestamp: DateTime<Utc>,
    /// Порядковый номер розыгрыша с 1 (у самого свежего — наибольший).
    pub draw_number: u32,
}

/// DTO сессии розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawViewDto {
    pub state: DrawState,
    pub display: String,
    pub allow_repeats: bool,
    pub pool_size: u32,
    /// От новых к старым.
    pub winners: Vec<WinnerDto>,
    pub error: Option<String>,
    /// Барабан стоит и на дисплее последний победитель.
    pub showing_winner: bool,
}

/// DTO участника внутри группы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMemberDto {
    pub participant_id: ParticipantId,
    pub name: String,
}

/// DTO одной группы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupDto {
    pub group_id: String,
    pub name: String,
    pub members: Vec<GroupMemberDto>,
}

/// DTO текущего разбиения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupsViewDto {
    pub groups: Vec<GroupDto>,
    /// Размер группы, с которым делали разбиение (None — разбиения ещё не было).
    pub group_size: Option<u32>,
    pub total_participants: u32,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Обновлённый список участников.
    Roster(RosterViewDto),

    /// Состояние розыгрыша после команды.
    Draw(DrawViewDto),

    /// Зафиксирован победитель.
    WinnerDrawn {
        winner: WinnerDto,
        draw: DrawViewDto,
    },

    /// Новое разбиение / переименование групп.
    Groups(GroupsViewDto),
}
