use thiserror::Error;

/// Ошибки внешнего сервиса имён. Для сессии это только предупреждение.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("Сервис имён недоступен: {0}")]
    Unavailable(String),

    #[error("Ошибка обращения к сервису имён: {0}")]
    Transport(String),

    #[error("Некорректный ответ сервиса имён: {0}")]
    MalformedResponse(String),

    #[error("Сервис имён не вернул ни одного имени")]
    Empty,
}
