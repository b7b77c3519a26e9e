use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::participant::Participant;
use crate::domain::winner::{WinnerHistory, WinnerRecord};
use crate::engine::errors::DrawError;
use crate::engine::RandomSource;

/// Номер "прокрутки" барабана.
///
/// Каждый старт, стоп и сброс увеличивает его. Тик с устаревшим номером
/// игнорируется, поэтому запоздавший таймер не может перезаписать дисплей.
pub type SpinEpoch = u64;

/// Состояние сессии розыгрыша.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawState {
    /// Барабан стоит. Если история не пуста, на дисплее последний победитель.
    Idle,
    /// Барабан крутится, дисплей показывает случайные имена.
    Spinning,
}

/// Результат одного тика барабана.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// На дисплей выведено имя.
    Published(String),
    /// Пул сейчас пуст (например, список поменяли на лету), тик пропущен.
    Skipped,
    /// Тик от старой прокрутки или барабан уже остановлен — таймер надо гасить.
    Stale,
}

/// Пул участников, которые ещё могут выиграть.
///
/// - `allow_repeats = true` — весь список как есть;
/// - иначе — список без тех, чей id уже есть в истории (порядок сохраняется).
///
/// Пустой пул — это `DrawError::EmptyPool`, розыгрыш начинать нельзя.
pub fn compute_eligible_pool<'a>(
    roster: &'a [Participant],
    history: &WinnerHistory,
    allow_repeats: bool,
) -> Result<Vec<&'a Participant>, DrawError> {
    let pool: Vec<&Participant> = if allow_repeats {
        roster.iter().collect()
    } else {
        let won = history.winner_ids();
        roster
            .iter()
            .filter(|p| !won.contains(p.id.as_str()))
            .collect()
    };

    if pool.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    Ok(pool)
}

/// Сессия розыгрыша призов.
///
/// Список участников сюда не кладём: каждая операция получает актуальный
/// срез, и пул пересчитывается заново (в том числе на каждом тике).
#[derive(Clone, Debug)]
pub struct DrawEngine {
    history: WinnerHistory,
    allow_repeats: bool,
    state: DrawState,
    display: String,
    placeholder: String,
    error: Option<DrawError>,
    epoch: SpinEpoch,
}

impl DrawEngine {
    pub fn new(placeholder: impl Into<String>, allow_repeats: bool) -> Self {
        let placeholder = placeholder.into();
        Self {
            history: WinnerHistory::new(),
            allow_repeats,
            state: DrawState::Idle,
            display: placeholder.clone(),
            placeholder,
            error: None,
            epoch: 0,
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == DrawState::Spinning
    }

    /// То, что сейчас "на экране": заглушка, мелькающее имя или победитель.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn history(&self) -> &WinnerHistory {
        &self.history
    }

    pub fn allow_repeats(&self) -> bool {
        self.allow_repeats
    }

    pub fn error(&self) -> Option<&DrawError> {
        self.error.as_ref()
    }

    pub fn epoch(&self) -> SpinEpoch {
        self.epoch
    }

    /// Переключатель повторных побед. Действует на следующий расчёт пула,
    /// а так как тики пересчитывают пул, во время прокрутки — сразу.
    pub fn set_allow_repeats(&mut self, allow: bool) {
        self.allow_repeats = allow;
    }

    pub fn eligible_pool<'a>(
        &self,
        roster: &'a [Participant],
    ) -> Result<Vec<&'a Participant>, DrawError> {
        compute_eligible_pool(roster, &self.history, self.allow_repeats)
    }

    /// Размер пула (0, если никто не может выиграть).
    pub fn pool_size(&self, roster: &[Participant]) -> usize {
        self.eligible_pool(roster).map(|p| p.len()).unwrap_or(0)
    }

    /// Запустить барабан.
    ///
    /// Если барабан уже крутится, старая прокрутка отменяется (новый epoch),
    /// так что живым остаётся только один тикер.
    pub fn start_draw(&mut self, roster: &[Participant]) -> Result<SpinEpoch, DrawError> {
        if let Err(err) = self.eligible_pool(roster) {
            self.error = Some(err.clone());
            return Err(err);
        }

        self.error = None;
        self.epoch += 1;
        self.state = DrawState::Spinning;

        debug!(epoch = self.epoch, "draw started");
        Ok(self.epoch)
    }

    /// Один тик барабана: случайное имя из живого пула на дисплей.
    pub fn tick<R: RandomSource>(
        &mut self,
        epoch: SpinEpoch,
        roster: &[Participant],
        rng: &mut R,
    ) -> TickOutcome {
        if self.state != DrawState::Spinning || epoch != self.epoch {
            return TickOutcome::Stale;
        }

        let pool = match self.eligible_pool(roster) {
            Ok(pool) => pool,
            Err(_) => return TickOutcome::Skipped,
        };

        match rng.choose(&pool) {
            Some(p) => {
                self.display = p.name.clone();
                TickOutcome::Published(p.name.clone())
            }
            None => TickOutcome::Skipped,
        }
    }

    /// Остановить барабан и зафиксировать победителя.
    ///
    /// Победитель — независимая равномерная выборка из пула, а не последнее
    /// показанное на тике имя. Если барабан не крутится, ничего не меняется
    /// и возвращается `Ok(None)`.
    pub fn stop_draw<R: RandomSource>(
        &mut self,
        roster: &[Participant],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Option<WinnerRecord>, DrawError> {
        if self.state != DrawState::Spinning {
            return Ok(None);
        }

        // Сначала гасим текущую прокрутку, потом всё остальное.
        self.epoch += 1;
        self.state = DrawState::Idle;

        let winner = {
            let pool = match self.eligible_pool(roster) {
                Ok(pool) => pool,
                Err(err) => {
                    self.error = Some(err.clone());
                    return Err(err);
                }
            };
            match rng.choose(&pool) {
                Some(p) => (*p).clone(),
                None => {
                    self.error = Some(DrawError::EmptyPool);
                    return Err(DrawError::EmptyPool);
                }
            }
        };

        self.display = winner.name.clone();
        let record = WinnerRecord::new(winner, now);
        self.history.record(record.clone());

        info!(
            participant_id = %record.participant.id,
            participant = %record.participant.name,
            draws = self.history.len(),
            "winner committed"
        );
        Ok(Some(record))
    }

    /// Полный сброс сессии: история, дисплей, ошибка, состояние.
    /// Текущая прокрутка отменяется первой. `allow_repeats` не трогаем.
    pub fn reset_session(&mut self) {
        self.epoch += 1;
        self.state = DrawState::Idle;
        self.history.clear();
        self.display = self.placeholder.clone();
        self.error = None;
        debug!("draw session reset");
    }

    /// Очистить историю победителей. Деструктивно, поэтому нужно `confirmed = true`.
    ///
    /// Прокрутку не останавливает. Заглушка возвращается на дисплей только
    /// в `Idle`: во время прокрутки дисплеем владеет тикер.
    pub fn clear_history(&mut self, confirmed: bool) -> Result<(), DrawError> {
        if !confirmed {
            return Err(DrawError::ConfirmationRequired);
        }
        self.history.clear();
        if self.state == DrawState::Idle {
            self.display = self.placeholder.clone();
        }
        debug!(spinning = self.is_spinning(), "winner history cleared");
        Ok(())
    }
}
