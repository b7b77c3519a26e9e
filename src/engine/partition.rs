use tracing::info;

use crate::domain::group::Group;
use crate::domain::participant::Participant;
use crate::engine::errors::PartitionError;
use crate::engine::RandomSource;

/// Разбить список участников на команды размера `group_size`.
///
/// Алгоритм:
///   1. Проверяем `group_size >= 1`; пустой список -> пустое разбиение.
///   2. Перемешиваем копию списка (Фишер–Йетс через `RandomSource::shuffle`).
///   3. Режем подряд на куски по `group_size` (последний может быть короче).
///   4. Если кусков больше одного и последний не больше половины `group_size`,
///      раскидываем его участников по остальным кускам по кругу.
///   5. Выдаём id `group-<i>` и имя `Group <i+1>`.
pub fn generate_groups<R: RandomSource>(
    roster: &[Participant],
    group_size: usize,
    rng: &mut R,
) -> Result<Vec<Group>, PartitionError> {
    if group_size < 1 {
        return Err(PartitionError::InvalidGroupSize(group_size));
    }
    if roster.is_empty() {
        return Ok(Vec::new());
    }

    let mut shuffled = roster.to_vec();
    rng.shuffle(&mut shuffled);

    let mut chunks = chunk_members(shuffled, group_size);
    let merged = merge_small_remainder(&mut chunks, group_size);

    let groups: Vec<Group> = chunks
        .into_iter()
        .enumerate()
        .map(|(idx, members)| Group::at_index(idx, members))
        .collect();

    info!(
        participants = roster.len(),
        group_size,
        groups = groups.len(),
        merged_remainder = merged,
        "groups generated"
    );
    Ok(groups)
}

/// Нарезать последовательность на куски по `size` (последний может быть короче).
pub fn chunk_members<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks: Vec<Vec<T>> = Vec::with_capacity(items.len().div_ceil(size));
    let mut current: Vec<T> = Vec::with_capacity(size);

    for item in items {
        current.push(item);
        if current.len() == size {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Слить маленький хвост в остальные куски.
///
/// Срабатывает, только если кусков больше одного и
/// `len(last) <= group_size / 2` (вещественное деление: для 5 сливаются
/// хвосты 1 и 2, но не 3). Сравнение `2 * len <= group_size` ему эквивалентно.
/// Участники хвоста раздаются по кругу: 0-й в кусок 0, 1-й в кусок 1 и т.д.
///
/// Возвращает `true`, если слияние произошло.
pub fn merge_small_remainder<T>(chunks: &mut Vec<Vec<T>>, group_size: usize) -> bool {
    if chunks.len() < 2 {
        return false;
    }

    let last_len = chunks.last().map(|c| c.len()).unwrap_or(0);
    if last_len * 2 > group_size {
        return false;
    }

    let Some(tail) = chunks.pop() else {
        return false;
    };

    let targets = chunks.len();
    for (k, member) in tail.into_iter().enumerate() {
        chunks[k % targets].push(member);
    }
    true
}

/// Примерное число групп до слияния хвоста: `ceil(n / group_size)`.
pub fn approx_group_count(participants: usize, group_size: usize) -> usize {
    if group_size == 0 {
        return 0;
    }
    participants.div_ceil(group_size)
}
