//! Тикер барабана: повторяющаяся отменяемая задача на tokio.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

use crate::engine::draw::{SpinEpoch, TickOutcome};

/// Запущенный тикер одной прокрутки.
///
/// Задача крутится, пока колбэк не вернёт `TickOutcome::Stale`,
/// или пока тикер не отменят / не уронят (Drop тоже делает abort).
#[derive(Debug)]
pub struct SpinTicker {
    epoch: SpinEpoch,
    handle: JoinHandle<()>,
}

impl SpinTicker {
    /// Запустить тикер с периодом `period`. Первый тик — сразу.
    ///
    /// Вызывать нужно внутри tokio-рантайма.
    pub fn spawn<F>(period: Duration, epoch: SpinEpoch, mut on_tick: F) -> Self
    where
        F: FnMut(SpinEpoch) -> TickOutcome + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                match on_tick(epoch) {
                    TickOutcome::Stale => break,
                    outcome => trace!(epoch, ?outcome, "spin tick"),
                }
            }
        });

        Self { epoch, handle }
    }

    pub fn epoch(&self) -> SpinEpoch {
        self.epoch
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Отменить задачу.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for SpinTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
