//! Импорт списка участников: текст, CSV, файлы, поиск дублей.
//!
//! К алгоритмам движка отношения не имеет — движки получают готовый
//! `Vec<Participant>`.

pub mod duplicates;
pub mod parse;
pub mod sample;

pub use duplicates::{find_duplicates, has_duplicates, normalize_name, remove_duplicates};
pub use parse::{load_roster_file, parse_roster, parse_roster_csv, IngestError};
pub use sample::{sample_roster, SAMPLE_NAMES};
