use serde::{Deserialize, Serialize};

use crate::domain::participant::Participant;

/// Одна команда в разбиении.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Стабильный id вида `group-<index>` (индекс с нуля).
    pub id: String,
    /// Отображаемое имя, по умолчанию `Group <index + 1>`.
    pub name: String,
    /// Порядок — тот, что дал алгоритм разбиения, а не порядок списка.
    pub members: Vec<Participant>,
}

impl Group {
    /// Группа с id и именем по умолчанию для позиции `index`.
    pub fn at_index(index: usize, members: Vec<Participant>) -> Self {
        Self {
            id: format!("group-{}", index),
            name: format!("Group {}", index + 1),
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Строка табличного экспорта: (имя группы, имя участника).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRow {
    pub group_name: String,
    pub member_name: String,
}

/// Развернуть разбиение в строки экспорта.
///
/// Одна строка на участника, строки одной группы идут подряд,
/// в порядке групп, внутри группы — в порядке участников.
pub fn export_rows(groups: &[Group]) -> Vec<ExportRow> {
    groups
        .iter()
        .flat_map(|g| {
            g.members.iter().map(move |m| ExportRow {
                group_name: g.name.clone(),
                member_name: m.name.clone(),
            })
        })
        .collect()
}
