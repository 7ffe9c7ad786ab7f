//! Integration tests over the bundled sample snapshot
//!
//! Eight teams in two regions. Round 1 is final (Hawks, Owls, Wolves and
//! Otters won); rounds 2 and 3 have not been played. The pool pays 10, 20
//! and 40 points per round.

use std::path::PathBuf;

use bracket_core::{BracketId, GameId, GameNumber, Outcome, PoolId, TeamId, TournamentId};
use chrono::{TimeZone, Utc};
use pool::{DataStore, MemoryStore, PoolConfig, PoolError, PoolService};

const OWLS: TeamId = TeamId(3);

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn sample_store() -> MemoryStore {
    MemoryStore::load(&data_path("sample_pool.json")).unwrap()
}

fn rows(service: &PoolService<MemoryStore>) -> Vec<(String, u32, u32, u32)> {
    service
        .pool_standings(PoolId(1))
        .unwrap()
        .rows
        .into_iter()
        .map(|r| (r.username, r.current_total, r.max_possible_total, r.rank))
        .collect()
}

#[test]
fn test_sample_config_loads() {
    let config = PoolConfig::load(&data_path("pool.toml")).unwrap();
    assert_eq!(config.log_level, "info");
    assert_eq!(config.points_by_round, Some(vec![1, 2, 4, 8, 16, 32]));
}

#[test]
fn test_sample_standings_after_round_one() {
    let service = PoolService::new(sample_store(), PoolConfig::default());
    assert_eq!(
        rows(&service),
        vec![
            ("riley".to_string(), 40, 120, 1),
            ("jordan".to_string(), 30, 90, 2),
            ("sam".to_string(), 10, 10, 3),
        ]
    );
}

#[test]
fn test_sample_score_with_configured_points() {
    let config = PoolConfig::load(&data_path("pool.toml")).unwrap();
    let service = PoolService::new(sample_store(), config);
    let score = service.score_bracket(TournamentId(1), BracketId(1)).unwrap();

    assert_eq!(score.current_total, 3);
    assert_eq!(score.correct_picks, 3);
    // Hawks v Bears can no longer happen; the other two are open
    assert_eq!(score.games[4].outcome, Outcome::Eliminated);
    assert_eq!(score.games[5].outcome, Outcome::Pending);
    assert_eq!(score.games[6].outcome, Outcome::Pending);
    assert_eq!(score.max_possible_remaining, 6);
}

#[test]
fn test_recording_a_result_updates_standings() {
    let mut store = sample_store();
    store.record_result(GameId(105), Some(OWLS)).unwrap();

    let path = std::env::temp_dir().join(format!("sample-pool-{}.json", std::process::id()));
    store.save(&path).unwrap();
    let reloaded = MemoryStore::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let games = reloaded.list_games(TournamentId(1)).unwrap();
    assert_eq!(games[4].number, GameNumber(5));
    assert_eq!(games[4].winner, Some(OWLS));

    let service = PoolService::new(reloaded, PoolConfig::default());
    assert_eq!(
        rows(&service),
        vec![
            ("riley".to_string(), 60, 120, 1),
            ("jordan".to_string(), 30, 50, 2),
            ("sam".to_string(), 10, 10, 3),
        ]
    );
}

#[test]
fn test_sample_picks_are_locked() {
    let mut store = sample_store();
    let after_lock = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
    let before_lock = Utc.with_ymd_and_hms(2025, 3, 20, 14, 59, 0).unwrap();
    let pick = bracket_core::Pick {
        game_id: GameId(107),
        winner: OWLS,
    };

    assert!(matches!(
        store.set_pick(BracketId(1), pick, after_lock),
        Err(PoolError::Locked { .. })
    ));
    store.set_pick(BracketId(1), pick, before_lock).unwrap();
    assert!(store.list_picks(BracketId(1)).unwrap().contains(&pick));
}

#[test]
fn test_sample_bracket_projects_region_champions() {
    let service = PoolService::new(sample_store(), PoolConfig::default());
    let picks = service.store().list_picks(BracketId(3)).unwrap();
    let resolution = service.resolve_bracket(TournamentId(1), &picks).unwrap();

    // Owls out of the East, Otters out of the West
    assert_eq!(resolution.matchup(GameNumber(7)).unwrap().teams(), Some((OWLS, TeamId(6))));
    assert_eq!(resolution.champion(), Some(OWLS));
    assert!(resolution.inconsistencies().is_empty());
}
