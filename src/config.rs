//! Конфигурация сессии розыгрыша/распределения.
//!
//! Только "правила", без состояния.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный JSON конфига: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Некорректное значение {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Правила одной сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RaffleConfig {
    /// Период тика барабана, мс.
    pub tick_interval_ms: u64,
    /// Размер команды по умолчанию.
    pub default_group_size: usize,
    /// Текст на дисплее до первого розыгрыша и после сброса.
    pub placeholder: String,
    /// Разрешены ли повторные победы на старте сессии.
    pub allow_repeats: bool,
    /// Seed для воспроизводимой сессии (None — системный RNG).
    pub seed: Option<u64>,
}

impl RaffleConfig {
    /// Стандартный профиль: тик 50 мс, команды по 5, повторы запрещены.
    pub fn standard() -> Self {
        Self {
            tick_interval_ms: 50,
            default_group_size: 5,
            placeholder: "Ready?".to_string(),
            allow_repeats: false,
            seed: None,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "должен быть больше 0".to_string(),
            });
        }
        if self.default_group_size == 0 {
            return Err(ConfigError::Invalid {
                field: "default_group_size",
                reason: "должен быть больше 0".to_string(),
            });
        }
        Ok(())
    }

    /// Разобрать JSON. Отсутствующие поля берутся из `standard()`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self::standard()
    }
}
