use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::participant::Participant;

/// Зафиксированный победитель одного розыгрыша.
///
/// Создаётся в момент остановки барабана и дальше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerRecord {
    pub participant: Participant,
    pub timestamp: DateTime<Utc>,
}

impl WinnerRecord {
    pub fn new(participant: Participant, timestamp: DateTime<Utc>) -> Self {
        Self {
            participant,
            timestamp,
        }
    }
}

/// История победителей сессии. Самая свежая запись — первая.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerHistory {
    records: VecDeque<WinnerRecord>,
}

impl WinnerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить победителя в начало истории.
    pub fn record(&mut self, record: WinnerRecord) {
        self.records.push_front(record);
    }

    pub fn latest(&self) -> Option<&WinnerRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Итератор от новых к старым.
    pub fn iter(&self) -> impl Iterator<Item = &WinnerRecord> {
        self.records.iter()
    }

    pub fn contains(&self, participant_id: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.participant.id == participant_id)
    }

    /// Множество id всех, кто уже выигрывал.
    pub fn winner_ids(&self) -> HashSet<&str> {
        self.records
            .iter()
            .map(|r| r.participant.id.as_str())
            .collect()
    }

    pub fn to_vec(&self) -> Vec<WinnerRecord> {
        self.records.iter().cloned().collect()
    }
}
