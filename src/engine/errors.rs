use thiserror::Error;

/// Ошибки сессии розыгрыша.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("Нет участников, которые ещё могут выиграть")]
    EmptyPool,

    #[error("Очистка истории требует явного подтверждения")]
    ConfirmationRequired,
}

/// Ошибки разбиения на команды.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Размер группы должен быть не меньше 1, получено {0}")]
    InvalidGroupSize(usize),
}
