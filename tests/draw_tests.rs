// tests/draw_tests.rs
//
// Сессия розыгрыша (DrawEngine), без таймеров.
//
// Проверяем:
//  1) Пул без повторов: 3 → 2 → 1, четвёртый старт → EmptyPool.
//  2) Пул с повторами постоянен, победители могут повторяться.
//  3) Пустой список → EmptyPool, состояние не меняется.
//  4) stop в Idle — no-op.
//  5) Тик со старым epoch игнорируется; после stop тики не пишут в дисплей.
//  6) Победитель — из пула, а не обязательно последний показанный тик.
//  7) reset_session: пустая история, пул = весь список, allow_repeats сохраняется.
//  8) clear_history требует подтверждения.
//  9) Порядок истории — от новых к старым.
// 10) Переключение allow_repeats во время прокрутки действует сразу.

use chrono::{Duration, TimeZone, Utc};

use raffle_engine::domain::participant::Participant;
use raffle_engine::domain::winner::WinnerHistory;
use raffle_engine::engine::{compute_eligible_pool, DrawEngine, DrawError, DrawState, TickOutcome};
use raffle_engine::infra::DeterministicRng;

const PLACEHOLDER: &str = "Ready?";

fn roster3() -> Vec<Participant> {
    vec![
        Participant::new("p-1", "Alice"),
        Participant::new("p-2", "Bob"),
        Participant::new("p-3", "Carol"),
    ]
}

fn t(sec: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::seconds(sec)
}

/// Полный цикл: старт, пара тиков, стоп.
fn draw_once(
    engine: &mut DrawEngine,
    roster: &[Participant],
    rng: &mut DeterministicRng,
    at: i64,
) -> Result<Participant, DrawError> {
    let epoch = engine.start_draw(roster)?;
    engine.tick(epoch, roster, rng);
    engine.tick(epoch, roster, rng);
    let record = engine
        .stop_draw(roster, rng, t(at))?
        .expect("engine was spinning");
    Ok(record.participant)
}

// -----------------------------------------------------------------------------
// 1) Без повторов
// -----------------------------------------------------------------------------

#[test]
fn pool_shrinks_without_repeats_until_empty() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(1);

    let mut pool_sizes = Vec::new();
    let mut winners = Vec::new();
    for i in 0..3 {
        pool_sizes.push(engine.pool_size(&roster));
        winners.push(draw_once(&mut engine, &roster, &mut rng, i).expect("pool not empty").id);
    }

    assert_eq!(pool_sizes, vec![3, 2, 1]);

    winners.sort();
    assert_eq!(winners, vec!["p-1", "p-2", "p-3"], "every participant wins exactly once");

    assert_eq!(engine.pool_size(&roster), 0);
    assert_eq!(engine.start_draw(&roster), Err(DrawError::EmptyPool));
    assert_eq!(engine.state(), DrawState::Idle);
    assert_eq!(engine.error(), Some(&DrawError::EmptyPool));
    assert_eq!(engine.history().len(), 3);
}

#[test]
fn eligible_pool_preserves_roster_order() {
    let roster = roster3();
    let mut history = WinnerHistory::new();
    history.record(raffle_engine::domain::winner::WinnerRecord::new(roster[1].clone(), t(0)));

    let pool = compute_eligible_pool(&roster, &history, false).expect("non-empty");
    let ids: Vec<&str> = pool.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-1", "p-3"]);

    let full = compute_eligible_pool(&roster, &history, true).expect("non-empty");
    let ids: Vec<&str> = full.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-1", "p-2", "p-3"]);
}

#[test]
fn exclusion_is_by_id_not_by_name() {
    let roster = vec![Participant::new("a", "Sam"), Participant::new("b", "Sam")];
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(5);

    let first = draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");
    assert_eq!(engine.pool_size(&roster), 1, "namesake must stay eligible");

    let second = draw_once(&mut engine, &roster, &mut rng, 1).expect("pool not empty");
    assert_ne!(first.id, second.id);
}

// -----------------------------------------------------------------------------
// 2) С повторами
// -----------------------------------------------------------------------------

#[test]
fn pool_is_constant_with_repeats() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, true);
    let mut rng = DeterministicRng::from_seed(2);

    for i in 0..30 {
        assert_eq!(engine.pool_size(&roster), 3);
        draw_once(&mut engine, &roster, &mut rng, i).expect("pool never empties");
    }

    assert_eq!(engine.history().len(), 30);
    // 30 розыгрышей из 3 — повторы неизбежны.
    assert!(engine.history().winner_ids().len() < 30);
}

// -----------------------------------------------------------------------------
// 3–4) Пустой список, stop в Idle
// -----------------------------------------------------------------------------

#[test]
fn empty_roster_cannot_start() {
    let mut engine = DrawEngine::new(PLACEHOLDER, true);
    assert_eq!(engine.start_draw(&[]), Err(DrawError::EmptyPool));
    assert_eq!(engine.state(), DrawState::Idle);
    assert_eq!(engine.display(), PLACEHOLDER);
    assert!(engine.history().is_empty());
}

#[test]
fn stop_while_idle_is_noop() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(3);

    let before_epoch = engine.epoch();
    assert_eq!(engine.stop_draw(&roster, &mut rng, t(0)), Ok(None));
    assert_eq!(engine.state(), DrawState::Idle);
    assert_eq!(engine.display(), PLACEHOLDER);
    assert_eq!(engine.epoch(), before_epoch);
    assert!(engine.history().is_empty());
}

// -----------------------------------------------------------------------------
// 5) Устаревшие тики
// -----------------------------------------------------------------------------

#[test]
fn stale_ticks_are_ignored() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(4);

    let first = engine.start_draw(&roster).expect("pool not empty");
    // Повторный старт отменяет первую прокрутку.
    let second = engine.start_draw(&roster).expect("pool not empty");
    assert_ne!(first, second);
    assert_eq!(engine.tick(first, &roster, &mut rng), TickOutcome::Stale);
    assert!(matches!(engine.tick(second, &roster, &mut rng), TickOutcome::Published(_)));

    let winner = engine
        .stop_draw(&roster, &mut rng, t(0))
        .expect("pool not empty")
        .expect("was spinning");

    // Запоздавший тик не перезаписывает победителя.
    assert_eq!(engine.tick(second, &roster, &mut rng), TickOutcome::Stale);
    assert_eq!(engine.display(), winner.participant.name);
}

#[test]
fn tick_publishes_only_eligible_names() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(6);

    let won = draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");

    let epoch = engine.start_draw(&roster).expect("pool not empty");
    for _ in 0..200 {
        match engine.tick(epoch, &roster, &mut rng) {
            TickOutcome::Published(name) => assert_ne!(name, won.name),
            other => panic!("unexpected tick outcome {other:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// 6) Победитель — независимая выборка
// -----------------------------------------------------------------------------

#[test]
fn winner_is_independent_of_last_tick() {
    let roster: Vec<Participant> = (0..10)
        .map(|i| Participant::new(format!("p-{i}"), format!("Name {i}")))
        .collect();
    let mut engine = DrawEngine::new(PLACEHOLDER, true);
    let mut rng = DeterministicRng::from_seed(8);

    let mut differs = 0;
    for i in 0..100 {
        let epoch = engine.start_draw(&roster).expect("pool not empty");
        let shown = match engine.tick(epoch, &roster, &mut rng) {
            TickOutcome::Published(name) => name,
            other => panic!("unexpected tick outcome {other:?}"),
        };
        let winner = engine
            .stop_draw(&roster, &mut rng, t(i))
            .expect("pool not empty")
            .expect("was spinning");
        if winner.participant.name != shown {
            differs += 1;
        }
    }

    // При 10 участниках совпадение ~10% — "заморозки" последнего тика нет.
    assert!(differs > 50, "winner must be a fresh sample, differs={differs}");
}

// -----------------------------------------------------------------------------
// 7) Сброс
// -----------------------------------------------------------------------------

#[test]
fn reset_session_is_idempotent_and_keeps_repeat_flag() {
    let roster = roster3();

    for allow in [false, true] {
        let mut engine = DrawEngine::new(PLACEHOLDER, allow);
        let mut rng = DeterministicRng::from_seed(9);

        draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");
        draw_once(&mut engine, &roster, &mut rng, 1).expect("pool not empty");
        engine.start_draw(&roster).expect("pool not empty");

        engine.reset_session();
        engine.reset_session();

        assert!(engine.history().is_empty());
        assert_eq!(engine.state(), DrawState::Idle);
        assert_eq!(engine.display(), PLACEHOLDER);
        assert_eq!(engine.error(), None);
        assert_eq!(engine.pool_size(&roster), roster.len());
        assert_eq!(engine.allow_repeats(), allow);
    }
}

#[test]
fn reset_cancels_spin() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(10);

    let epoch = engine.start_draw(&roster).expect("pool not empty");
    engine.reset_session();

    assert_eq!(engine.tick(epoch, &roster, &mut rng), TickOutcome::Stale);
    assert_eq!(engine.display(), PLACEHOLDER);
}

#[test]
fn reset_clears_empty_pool_error() {
    let roster = vec![Participant::new("p-1", "Solo")];
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(11);

    draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");
    assert!(engine.start_draw(&roster).is_err());
    assert!(engine.error().is_some());

    engine.reset_session();
    assert!(engine.error().is_none());
    assert!(engine.start_draw(&roster).is_ok());
}

// -----------------------------------------------------------------------------
// 8) Очистка истории
// -----------------------------------------------------------------------------

#[test]
fn clear_history_requires_confirmation() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(12);

    draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");

    assert_eq!(engine.clear_history(false), Err(DrawError::ConfirmationRequired));
    assert_eq!(engine.history().len(), 1);

    engine.set_allow_repeats(true);
    assert_eq!(engine.clear_history(true), Ok(()));
    assert!(engine.history().is_empty());
    assert_eq!(engine.display(), PLACEHOLDER);
    assert!(engine.allow_repeats(), "clear_history must keep allow_repeats");
}

// -----------------------------------------------------------------------------
// 9) Порядок истории
// -----------------------------------------------------------------------------

#[test]
fn history_is_newest_first() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(13);

    let w1 = draw_once(&mut engine, &roster, &mut rng, 10).expect("pool not empty");
    let w2 = draw_once(&mut engine, &roster, &mut rng, 20).expect("pool not empty");

    let ids: Vec<&str> = engine.history().iter().map(|r| r.participant.id.as_str()).collect();
    assert_eq!(ids, vec![w2.id.as_str(), w1.id.as_str()]);

    let latest = engine.history().latest().expect("two records");
    assert_eq!(latest.timestamp, t(20));
    assert_eq!(engine.display(), w2.name);
}

// -----------------------------------------------------------------------------
// 10) allow_repeats во время прокрутки
// -----------------------------------------------------------------------------

#[test]
fn toggling_repeats_mid_spin_changes_live_pool() {
    let roster = vec![Participant::new("p-1", "Solo"), Participant::new("p-2", "Duo")];
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(14);

    let first = draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");
    let epoch = engine.start_draw(&roster).expect("one left");

    engine.set_allow_repeats(true);
    assert_eq!(engine.pool_size(&roster), 2);

    let mut seen_first = false;
    for _ in 0..100 {
        if engine.tick(epoch, &roster, &mut rng) == TickOutcome::Published(first.name.clone()) {
            seen_first = true;
        }
    }
    assert!(seen_first, "previous winner must reappear once repeats are allowed");
}

#[test]
fn tick_skips_when_pool_disappears_mid_spin() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(15);

    let epoch = engine.start_draw(&roster).expect("pool not empty");
    assert_eq!(engine.tick(epoch, &[], &mut rng), TickOutcome::Skipped);
    assert_eq!(engine.stop_draw(&[], &mut rng, t(0)), Err(DrawError::EmptyPool));
    assert_eq!(engine.state(), DrawState::Idle);
    assert!(engine.history().is_empty());
}

#[test]
fn clear_history_while_spinning_leaves_display_to_ticks() {
    let roster = roster3();
    let mut engine = DrawEngine::new(PLACEHOLDER, false);
    let mut rng = DeterministicRng::from_seed(16);

    draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");
    let epoch = engine.start_draw(&roster).expect("pool not empty");
    let shown = match engine.tick(epoch, &roster, &mut rng) {
        TickOutcome::Published(name) => name,
        other => panic!("unexpected tick outcome {other:?}"),
    };

    assert_eq!(engine.clear_history(true), Ok(()));
    assert!(engine.is_spinning());
    assert!(engine.history().is_empty());
    assert_eq!(engine.display(), shown);
    assert_eq!(engine.pool_size(&roster), 3);
    assert!(matches!(engine.tick(epoch, &roster, &mut rng), TickOutcome::Published(_)));
}

#[test]
fn failed_restart_does_not_touch_running_spin() {
    let roster = vec![Participant::new("p-1", "Solo")];
    let mut engine = DrawEngine::new(PLACEHOLDER, true);
    let mut rng = DeterministicRng::from_seed(17);

    draw_once(&mut engine, &roster, &mut rng, 0).expect("pool not empty");
    let epoch = engine.start_draw(&roster).expect("repeats allowed");

    engine.set_allow_repeats(false);
    assert_eq!(engine.start_draw(&roster), Err(DrawError::EmptyPool));
    assert_eq!(engine.state(), DrawState::Spinning);
    assert_eq!(engine.epoch(), epoch, "old ticks must stay valid");

    engine.set_allow_repeats(true);
    assert_eq!(engine.tick(epoch, &roster, &mut rng), TickOutcome::Published("Solo".to_string()));
}
