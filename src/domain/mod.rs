//! Доменная модель розыгрыша: участники, победители, группы.

pub mod group;
pub mod participant;
pub mod winner;

/// Идентификатор участника.
///
/// Выдаётся один раз при импорте списка и дальше не меняется.
/// Выбор и исключения всегда идут по id, не по имени (имена могут совпадать).
pub type ParticipantId = String;

pub use group::*;
pub use participant::*;
pub use winner::*;
