use std::collections::{HashMap, HashSet};

use crate::domain::participant::Participant;
use crate::domain::ParticipantId;

/// Ключ сравнения имён: без пробелов по краям, без учёта регистра.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Id всех участников, чьё имя встречается больше одного раза
/// (помечаются все вхождения, включая первое).
pub fn find_duplicates(roster: &[Participant]) -> HashSet<ParticipantId> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for p in roster {
        *counts.entry(normalize_name(&p.name)).or_insert(0) += 1;
    }

    roster
        .iter()
        .filter(|p| counts.get(&normalize_name(&p.name)).copied().unwrap_or(0) > 1)
        .map(|p| p.id.clone())
        .collect()
}

pub fn has_duplicates(roster: &[Participant]) -> bool {
    let mut seen = HashSet::new();
    roster.iter().any(|p| !seen.insert(normalize_name(&p.name)))
}

/// Убрать дубли по имени, оставив первое вхождение. Порядок сохраняется.
pub fn remove_duplicates(roster: Vec<Participant>) -> Vec<Participant> {
    let mut seen = HashSet::new();
    roster
        .into_iter()
        .filter(|p| seen.insert(normalize_name(&p.name)))
        .collect()
}
