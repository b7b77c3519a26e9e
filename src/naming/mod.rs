//! Необязательные "красивые" имена команд.
//!
//! Ядро ничего не знает о конкретном провайдере: всё идёт через
//! `NameEnricher` (группы -> `group_id -> имя`). Ошибка обогащения не
//! фатальна и никогда не меняет состав групп.

pub mod enricher;
pub mod errors;
pub mod prompt;

pub use enricher::{apply_names, enrich_groups, GenerativeNameEnricher, NameEnricher, StaticNameEnricher, TextGenerator};
pub use errors::EnrichmentError;
pub use prompt::{build_naming_prompt, parse_team_names, GroupPromptEntry};
