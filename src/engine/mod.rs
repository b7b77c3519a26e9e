//! Движок розыгрыша и распределения по командам.
//!
//! Высокоуровневые объекты:
//!   - `DrawEngine` – сессия розыгрыша призов (пул, история, барабан);
//!   - `generate_groups` – разбиение списка на команды;
//!   - `DrawController` – владелец сессии + асинхронный тикер барабана.

pub mod controller;
pub mod draw;
pub mod errors;
pub mod partition;
pub mod ticker;

pub use controller::{DrawController, DrawSnapshot};
pub use draw::{compute_eligible_pool, DrawEngine, DrawState, SpinEpoch, TickOutcome};
pub use errors::{DrawError, PartitionError};
pub use partition::{approx_group_count, chunk_members, generate_groups, merge_small_remainder};
pub use ticker::SpinTicker;

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
///
/// Реализация обязана отдавать равномерное значение из `[0, upper)`
/// без смещения по модулю.
pub trait RandomSource {
    /// Равномерный индекс из `[0, upper)`. `upper` должен быть > 0.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Перемешивание Фишера–Йетса: с конца к началу, обмен с равномерным индексом из `[0, i]`.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Равномерно выбрать один элемент (None для пустого среза).
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_index(items.len());
        items.get(idx)
    }
}
