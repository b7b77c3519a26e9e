//! Движок розыгрыша призов и распределения участников по командам.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! подключаем модули. Хранилища между сессиями нет: всё состояние живёт
//! в `api::RaffleService` / `engine::DrawController` на время сессии.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod ingest;
pub mod naming;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, CommandResponse, Query, QueryResponse};

/// Операции (внешние команды), которые модуль принимает.
///
/// Для простоты: одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RaffleOperation {
    Command(Command),
}

/// Сообщения между приложениями. Пока не нужны.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RaffleMessage {}

/// Запросы к сервису (read-only).
pub type RaffleQuery = Query;

/// Ответы на запросы.
pub type RaffleResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct RaffleAbi;

impl ContractAbi for RaffleAbi {
    type Operation = RaffleOperation;
    type Response = CommandResponse;
}

impl ServiceAbi for RaffleAbi {
    type Query = RaffleQuery;
    type QueryResponse = RaffleResponse;
}
