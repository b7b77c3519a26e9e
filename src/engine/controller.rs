// src/engine/controller.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::participant::Participant;
use crate::domain::winner::WinnerRecord;
use crate::engine::draw::{DrawEngine, DrawState};
use crate::engine::errors::DrawError;
use crate::engine::ticker::SpinTicker;
use crate::engine::RandomSource;

/// Снимок сессии розыгрыша для отображения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawSnapshot {
    pub state: DrawState,
    pub display: String,
    pub allow_repeats: bool,
    pub pool_size: usize,
    /// От новых к старым.
    pub history: Vec<WinnerRecord>,
    pub error: Option<String>,
}

/// Всё, что трогает тикер: под одним мьютексом.
struct SharedSession<R> {
    engine: DrawEngine,
    roster: Vec<Participant>,
    rng: R,
}

impl<R> SharedSession<R> {
    fn snapshot(&self) -> DrawSnapshot {
        DrawSnapshot {
            state: self.engine.state(),
            display: self.engine.display().to_string(),
            allow_repeats: self.engine.allow_repeats(),
            pool_size: self.engine.pool_size(&self.roster),
            history: self.engine.history().to_vec(),
            error: self.engine.error().map(|e| e.to_string()),
        }
    }
}

/// Контроллер сессии розыгрыша:
/// - единственный владелец `DrawEngine`, списка и RNG;
/// - держит не больше одного `SpinTicker`;
/// - перед любой мутацией после старта сначала гасит тикер.
///
/// Работает внутри tokio-рантайма (тикер — это tokio-задача).
pub struct DrawController<R> {
    shared: Arc<Mutex<SharedSession<R>>>,
    ticker: Option<SpinTicker>,
    tick_interval: Duration,
}

impl<R> DrawController<R>
where
    R: RandomSource + Send + 'static,
{
    pub fn new(engine: DrawEngine, roster: Vec<Participant>, rng: R, tick_interval: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(SharedSession {
                engine,
                roster,
                rng,
            })),
            ticker: None,
            tick_interval,
        }
    }

    /// Погасить текущий тикер (если есть).
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!(epoch = ticker.epoch(), "cancelling spin ticker");
            ticker.cancel();
        }
    }

    /// Запустить барабан.
    ///
    /// Пул проверяется до того, как трогаем старый тикер: при `EmptyPool`
    /// текущая прокрутка (если есть) продолжается как была.
    pub fn start_draw(&mut self) -> Result<(), DrawError> {
        let epoch = {
            let mut guard = self.shared.lock();
            let SharedSession { engine, roster, .. } = &mut *guard;
            engine.start_draw(roster)?
        };

        // Новый epoch уже сделал тики старого тикера устаревшими.
        self.cancel_ticker();

        let shared = Arc::clone(&self.shared);
        let ticker = SpinTicker::spawn(self.tick_interval, epoch, move |epoch| {
            let mut guard = shared.lock();
            let SharedSession { engine, roster, rng } = &mut *guard;
            engine.tick(epoch, roster, rng)
        });
        self.ticker = Some(ticker);
        Ok(())
    }

    /// Остановить барабан и зафиксировать победителя.
    /// Если барабан стоит — `Ok(None)`, состояние не меняется.
    pub fn stop_draw(&mut self) -> Result<Option<WinnerRecord>, DrawError> {
        self.cancel_ticker();

        let mut guard = self.shared.lock();
        let SharedSession { engine, roster, rng } = &mut *guard;
        engine.stop_draw(roster, rng, Utc::now())
    }

    /// Start, если стоит; Stop, если крутится.
    pub fn toggle(&mut self) -> Result<Option<WinnerRecord>, DrawError> {
        if self.is_spinning() {
            self.stop_draw()
        } else {
            self.start_draw().map(|_| None)
        }
    }

    pub fn reset_session(&mut self) {
        self.cancel_ticker();
        self.shared.lock().engine.reset_session();
    }

    /// Очистить историю. Живой тикер не гасится: прокрутка продолжается.
    pub fn clear_history(&mut self, confirmed: bool) -> Result<(), DrawError> {
        self.shared.lock().engine.clear_history(confirmed)
    }

    pub fn set_allow_repeats(&mut self, allow: bool) {
        self.shared.lock().engine.set_allow_repeats(allow);
    }

    /// Подменить список участников. История и дисплей сбрасываются:
    /// старые победители к новому списку не относятся.
    pub fn replace_roster(&mut self, roster: Vec<Participant>) {
        self.cancel_ticker();
        let mut guard = self.shared.lock();
        guard.roster = roster;
        guard.engine.reset_session();
    }

    pub fn is_spinning(&self) -> bool {
        self.shared.lock().engine.is_spinning()
    }

    pub fn display(&self) -> String {
        self.shared.lock().engine.display().to_string()
    }

    pub fn snapshot(&self) -> DrawSnapshot {
        self.shared.lock().snapshot()
    }
}
