use serde::{Deserialize, Serialize};

use crate::domain::ParticipantId;

/// Участник розыгрыша / распределения по командам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Participant {
    pub id: ParticipantId,
    /// Отображаемое имя (уже обрезано от пробелов на этапе импорта).
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Текущий список участников сессии.
///
/// Движки получают из него только срез `&[Participant]` на время одной операции.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_participants(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Добавить участников в конец списка (порядок сохраняется).
    pub fn extend<I>(&mut self, participants: I)
    where
        I: IntoIterator<Item = Participant>,
    {
        self.participants.extend(participants);
    }

    /// Удалить участника по id. Возвращает удалённого, если он был.
    pub fn remove(&mut self, id: &str) -> Option<Participant> {
        let idx = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(idx))
    }

    /// Полностью заменить список.
    pub fn replace(&mut self, participants: Vec<Participant>) {
        self.participants = participants;
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }

    pub fn into_inner(self) -> Vec<Participant> {
        self.participants
    }
}
