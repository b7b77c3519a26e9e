use crate::domain::participant::Participant;
use crate::infra::ids::IdGenerator;

/// Демонстрационный список для быстрого старта.
pub const SAMPLE_NAMES: [&str; 24] = [
    "Emma Thompson", "Liam Wilson", "Olivia Davis", "Noah Martinez",
    "Ava Taylor", "William Anderson", "Sophia Thomas", "James Jackson",
    "Isabella White", "Oliver Harris", "Mia Martin", "Benjamin Thompson",
    "Charlotte Garcia", "Elijah Martinez", "Amelia Robinson", "Lucas Clark",
    "Harper Rodriguez", "Mason Lewis", "Evelyn Lee", "Logan Walker",
    "Alexander Hall", "Abigail Allen", "Henry Young", "Emily King",
];

pub fn sample_roster(ids: &IdGenerator) -> Vec<Participant> {
    SAMPLE_NAMES
        .iter()
        .map(|name| Participant::new(ids.next_participant_id(), *name))
        .collect()
}
