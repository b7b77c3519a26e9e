use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ParticipantId;

/// Генерация id участников на основе монотонного счётчика.
///
/// Id непрозрачный (`p-<n>`), уникален в пределах генератора
/// и никогда не переиспользуется, даже после удаления участника.
#[derive(Debug)]
pub struct IdGenerator {
    participant_counter: AtomicU64,
}

impl IdGenerator {
    /// Генератор, начинающий с 1.
    pub fn new() -> Self {
        Self {
            participant_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_participant_id(&self) -> ParticipantId {
        let n = self.participant_counter.fetch_add(1, Ordering::Relaxed);
        format!("p-{}", n)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
