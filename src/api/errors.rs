use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ParticipantId;
use crate::engine::{DrawError, PartitionError};
use crate::infra::export::ExportError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные.
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Участник не найден в списке.
    #[error("Участник {0} не найден")]
    ParticipantNotFound(ParticipantId),

    /// Ошибка розыгрыша (пустой пул, нет подтверждения).
    #[error("Ошибка розыгрыша: {0}")]
    Draw(String),

    /// Ошибка разбиения (неверный размер группы).
    #[error("Ошибка разбиения: {0}")]
    Partition(String),

    /// Внутренняя ошибка.
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<DrawError> for ApiError {
    fn from(err: DrawError) -> Self {
        ApiError::Draw(err.to_string())
    }
}

impl From<PartitionError> for ApiError {
    fn from(err: PartitionError) -> Self {
        ApiError::Partition(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
