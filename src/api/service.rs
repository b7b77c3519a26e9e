// src/api/service.rs

use chrono::Utc;
use tracing::debug;

use crate::api::commands::{Command, DrawCommand, GroupingCommand, RosterCommand};
use crate::api::dto::CommandResponse;
use crate::api::errors::ApiError;
use crate::api::queries::{Query, QueryResponse};
use crate::config::RaffleConfig;
use crate::domain::group::Group;
use crate::domain::participant::Roster;
use crate::engine::{generate_groups, DrawEngine, RandomSource};
use crate::infra::export::groups_to_csv_string;
use crate::infra::ids::IdGenerator;
use crate::infra::mapping::{map_draw_to_dto, map_groups_to_dto, map_history_to_dto, map_roster_to_dto};
use crate::infra::rng::SessionRng;
use crate::infra::rng_seed::RngStream;
use crate::ingest::{parse_roster, remove_duplicates, sample_roster};
use crate::naming::apply_names;

/// Сессия поверх команд/запросов API.
///
/// Синхронная: таймера здесь нет, тики барабана приходят командой
/// `DrawCommand::Tick`. Для живого барабана есть `engine::DrawController`.
pub struct RaffleService<R> {
    config: RaffleConfig,
    ids: IdGenerator,
    roster: Roster,
    draw: DrawEngine,
    groups: Vec<Group>,
    group_size: Option<usize>,
    draw_rng: R,
    partition_rng: R,
}

impl RaffleService<SessionRng> {
    /// Сервис по конфигу: с seed — воспроизводимые потоки для розыгрыша
    /// и для разбиения, без seed — системный RNG.
    pub fn from_config(config: RaffleConfig) -> Self {
        let draw_rng = SessionRng::for_stream(config.seed, RngStream::Draw);
        let partition_rng = SessionRng::for_stream(config.seed, RngStream::Partition);
        Self::new(config, draw_rng, partition_rng)
    }
}

impl<R: RandomSource> RaffleService<R> {
    pub fn new(config: RaffleConfig, draw_rng: R, partition_rng: R) -> Self {
        let draw = DrawEngine::new(config.placeholder.clone(), config.allow_repeats);
        Self {
            config,
            ids: IdGenerator::new(),
            roster: Roster::new(),
            draw,
            groups: Vec::new(),
            group_size: None,
            draw_rng,
            partition_rng,
        }
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn draw_engine(&self) -> &DrawEngine {
        &self.draw
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Применить команду.
    pub fn execute(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        match command {
            Command::Roster(cmd) => self.execute_roster(cmd),
            Command::Draw(cmd) => self.execute_draw(cmd),
            Command::Grouping(cmd) => self.execute_grouping(cmd),
        }
    }

    /// Выполнить запрос "только чтение".
    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        let res = match query {
            Query::GetRoster => QueryResponse::Roster(map_roster_to_dto(self.roster.participants())),
            Query::GetDraw => QueryResponse::Draw(map_draw_to_dto(&self.draw, self.roster.participants())),
            Query::GetGroups => QueryResponse::Groups(map_groups_to_dto(&self.groups, self.group_size)),
            Query::ExportGroupsCsv => QueryResponse::Csv(groups_to_csv_string(&self.groups)?),
        };
        Ok(res)
    }

    /// Список поменялся: старые победители и команды к нему не относятся.
    fn on_roster_changed(&mut self) {
        self.draw.reset_session();
        self.groups.clear();
        self.group_size = None;
        debug!(participants = self.roster.len(), "roster changed, session reset");
    }

    fn execute_roster(&mut self, cmd: RosterCommand) -> Result<CommandResponse, ApiError> {
        match cmd {
            RosterCommand::AddNames { text } => {
                let added = parse_roster(&text, &self.ids);
                if added.is_empty() {
                    return Err(ApiError::BadRequest("в тексте нет ни одного имени".to_string()));
                }
                self.roster.extend(added);
            }
            RosterCommand::LoadSample => {
                self.roster.extend(sample_roster(&self.ids));
            }
            RosterCommand::Remove { participant_id } => {
                if self.roster.remove(&participant_id).is_none() {
                    return Err(ApiError::ParticipantNotFound(participant_id));
                }
            }
            RosterCommand::RemoveDuplicates => {
                let current = std::mem::take(&mut self.roster).into_inner();
                self.roster.replace(remove_duplicates(current));
            }
            RosterCommand::Clear => {
                self.roster.clear();
            }
        }

        self.on_roster_changed();
        Ok(CommandResponse::Roster(map_roster_to_dto(self.roster.participants())))
    }

    fn execute_draw(&mut self, cmd: DrawCommand) -> Result<CommandResponse, ApiError> {
        match cmd {
            DrawCommand::Start => {
                self.draw.start_draw(self.roster.participants())?;
            }
            DrawCommand::Tick => {
                let epoch = self.draw.epoch();
                self.draw
                    .tick(epoch, self.roster.participants(), &mut self.draw_rng);
            }
            DrawCommand::Stop => {
                let committed = self.draw.stop_draw(
                    self.roster.participants(),
                    &mut self.draw_rng,
                    Utc::now(),
                )?;
                if committed.is_some() {
                    let winner = map_history_to_dto(self.draw.history())
                        .into_iter()
                        .next()
                        .ok_or_else(|| ApiError::Internal("история пуста после розыгрыша".to_string()))?;
                    return Ok(CommandResponse::WinnerDrawn {
                        winner,
                        draw: map_draw_to_dto(&self.draw, self.roster.participants()),
                    });
                }
            }
            DrawCommand::SetAllowRepeats { allow } => {
                self.draw.set_allow_repeats(allow);
            }
            DrawCommand::ResetSession => {
                self.draw.reset_session();
            }
            DrawCommand::ClearHistory { confirmed } => {
                self.draw.clear_history(confirmed)?;
            }
        }

        Ok(CommandResponse::Draw(map_draw_to_dto(&self.draw, self.roster.participants())))
    }

    fn execute_grouping(&mut self, cmd: GroupingCommand) -> Result<CommandResponse, ApiError> {
        match cmd {
            GroupingCommand::Generate { group_size } => {
                // Старое разбиение выбрасываем только при успехе.
                let groups = generate_groups(self.roster.participants(), group_size, &mut self.partition_rng)?;
                self.groups = groups;
                self.group_size = Some(group_size);
            }
            GroupingCommand::ApplyNames { names } => {
                if self.groups.is_empty() {
                    return Err(ApiError::BadRequest("разбиения ещё нет".to_string()));
                }
                apply_names(&mut self.groups, &names);
            }
        }

        Ok(CommandResponse::Groups(map_groups_to_dto(&self.groups, self.group_size)))
    }
}
