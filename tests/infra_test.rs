// tests/infra_test.rs
//
// Инфраструктура: id, маппинг в DTO, CSV-экспорт, конфиг.

use chrono::{TimeZone, Utc};

use raffle_engine::config::{ConfigError, RaffleConfig};
use raffle_engine::domain::group::{export_rows, Group};
use raffle_engine::domain::participant::Participant;
use raffle_engine::domain::winner::{WinnerHistory, WinnerRecord};
use raffle_engine::engine::{DrawEngine, DrawState};
use raffle_engine::infra::{
    export_groups_to_file, groups_to_csv_string, map_draw_to_dto, map_groups_to_dto,
    map_history_to_dto, map_roster_to_dto, DeterministicRng, IdGenerator, CSV_HEADER,
};

fn two_groups() -> Vec<Group> {
    let mut first = Group::at_index(
        0,
        vec![Participant::new("p-1", "Alice"), Participant::new("p-2", "Bob \"B\"")],
    );
    first.name = "Red, Team".to_string();
    let second = Group::at_index(1, vec![Participant::new("p-3", "Carol")]);
    vec![first, second]
}

// -----------------------------------------------------------------------------
// IdGenerator
// -----------------------------------------------------------------------------

#[test]
fn ids_are_sequential_and_unique() {
    let ids = IdGenerator::new();
    let got: Vec<String> = (0..5).map(|_| ids.next_participant_id()).collect();
    assert_eq!(got, vec!["p-1", "p-2", "p-3", "p-4", "p-5"]);

    let other = IdGenerator::default();
    assert_eq!(other.next_participant_id(), "p-1");
}

// -----------------------------------------------------------------------------
// Экспорт
// -----------------------------------------------------------------------------

#[test]
fn export_rows_follow_group_then_member_order() {
    let rows = export_rows(&two_groups());
    let pairs: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.group_name.as_str(), r.member_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Red, Team", "Alice"),
            ("Red, Team", "Bob \"B\""),
            ("Group 2", "Carol"),
        ]
    );
}

#[test]
fn csv_quotes_every_field() {
    let csv = groups_to_csv_string(&two_groups()).expect("in-memory csv");
    let expected = "\"Group Name\",\"Member Name\"\n\
                    \"Red, Team\",\"Alice\"\n\
                    \"Red, Team\",\"Bob \"\"B\"\"\"\n\
                    \"Group 2\",\"Carol\"\n";
    assert_eq!(csv, expected);
    assert_eq!(CSV_HEADER, ["Group Name", "Member Name"]);
}

#[test]
fn csv_of_no_groups_is_header_only() {
    let csv = groups_to_csv_string(&[]).expect("in-memory csv");
    assert_eq!(csv, "\"Group Name\",\"Member Name\"\n");
}

#[test]
fn csv_file_matches_string_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("teams.csv");

    export_groups_to_file(&two_groups(), &path).expect("writable");
    let on_disk = std::fs::read_to_string(&path).expect("readable");
    assert_eq!(on_disk, groups_to_csv_string(&two_groups()).expect("in-memory csv"));
}

// -----------------------------------------------------------------------------
// Маппинг
// -----------------------------------------------------------------------------

#[test]
fn history_dto_numbers_draws_newest_first() {
    let mut history = WinnerHistory::new();
    for (i, name) in ["A", "B", "C"].iter().enumerate() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, i as u32).unwrap();
        history.record(WinnerRecord::new(Participant::new(format!("p-{i}"), *name), ts));
    }

    let dto = map_history_to_dto(&history);
    let got: Vec<(u32, &str)> = dto
        .iter()
        .map(|w| (w.draw_number, w.participant_name.as_str()))
        .collect();
    assert_eq!(got, vec![(3, "C"), (2, "B"), (1, "A")]);
}

#[test]
fn draw_dto_reflects_engine_state() {
    let roster = vec![Participant::new("p-1", "Alice"), Participant::new("p-2", "Bob")];
    let mut engine = DrawEngine::new("Ready?", false);
    let mut rng = DeterministicRng::from_seed(3);

    let dto = map_draw_to_dto(&engine, &roster);
    assert_eq!(dto.state, DrawState::Idle);
    assert_eq!(dto.display, "Ready?");
    assert_eq!(dto.pool_size, 2);
    assert!(!dto.showing_winner);

    engine.start_draw(&roster).expect("pool not empty");
    let dto = map_draw_to_dto(&engine, &roster);
    assert_eq!(dto.state, DrawState::Spinning);
    assert!(!dto.showing_winner);

    engine
        .stop_draw(&roster, &mut rng, Utc::now())
        .expect("pool not empty");
    let dto = map_draw_to_dto(&engine, &roster);
    assert!(dto.showing_winner);
    assert_eq!(dto.pool_size, 1);
    assert_eq!(dto.winners.len(), 1);
    assert_eq!(dto.winners[0].participant_name, dto.display);
}

#[test]
fn roster_and_groups_dto() {
    let roster = vec![
        Participant::new("p-1", "Sam"),
        Participant::new("p-2", "sam"),
        Participant::new("p-3", "Kim"),
    ];
    let view = map_roster_to_dto(&roster);
    assert_eq!(view.total, 3);
    assert!(view.has_duplicates);
    assert!(!view.participants[2].is_duplicate);

    let groups = map_groups_to_dto(&two_groups(), Some(2));
    assert_eq!(groups.group_size, Some(2));
    assert_eq!(groups.total_participants, 3);
    assert_eq!(groups.groups[1].group_id, "group-1");
    assert_eq!(groups.groups[0].members[1].participant_id, "p-2");
}

// -----------------------------------------------------------------------------
// Конфиг
// -----------------------------------------------------------------------------

#[test]
fn standard_config_values() {
    let cfg = RaffleConfig::standard();
    assert_eq!(cfg.tick_interval_ms, 50);
    assert_eq!(cfg.tick_interval(), std::time::Duration::from_millis(50));
    assert_eq!(cfg.default_group_size, 5);
    assert_eq!(cfg.placeholder, "Ready?");
    assert!(!cfg.allow_repeats);
    assert_eq!(cfg.seed, None);
    assert_eq!(RaffleConfig::default(), cfg);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = RaffleConfig::from_json_str(r#"{"default_group_size": 3, "seed": 9}"#)
        .expect("valid config");
    assert_eq!(cfg.default_group_size, 3);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.tick_interval_ms, 50);
    assert_eq!(cfg.placeholder, "Ready?");
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        RaffleConfig::from_json_str(r#"{"default_group_size": 0}"#),
        Err(ConfigError::Invalid { field: "default_group_size", .. })
    ));
    assert!(matches!(
        RaffleConfig::from_json_str(r#"{"tick_interval_ms": 0}"#),
        Err(ConfigError::Invalid { field: "tick_interval_ms", .. })
    ));
    assert!(matches!(
        RaffleConfig::from_json_str("{not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_config_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raffle.json");
    std::fs::write(&path, r#"{"placeholder": "Go!", "allow_repeats": true}"#).expect("write");

    let cfg = RaffleConfig::load(&path).expect("valid config");
    assert_eq!(cfg.placeholder, "Go!");
    assert!(cfg.allow_repeats);

    assert!(matches!(
        RaffleConfig::load(&dir.path().join("missing.json")),
        Err(ConfigError::Io(_))
    ));
}
