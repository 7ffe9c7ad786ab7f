use super::*;
use crate::fixtures::{self, game_id, A, B, C, POOL, TOURNAMENT};
use crate::store::{MemoryStore, TeamRow};
use bracket_core::{BracketError, BracketId, GameId, GameNumber, MatchupStatus, TeamId};

fn service(results: [Option<TeamId>; 3]) -> PoolService<MemoryStore> {
    PoolService::new(fixtures::store(results), PoolConfig::default())
}

fn summary(table: &PoolStandings) -> Vec<(&str, u32, u32)> {
    table
        .rows
        .iter()
        .map(|r| (r.username.as_str(), r.current_total, r.rank))
        .collect()
}

#[test]
fn test_topology_is_shared_per_shape() {
    let service = service([None, None, None]);
    let first = service.topology(64, 4).unwrap();
    let second = service.topology(64, 4).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &service.topology(64, 1).unwrap()));
    assert!(matches!(
        service.topology(48, 4),
        Err(PoolError::Bracket(BracketError::InvalidFieldSize(48)))
    ));
}

#[test]
fn test_resolve_bracket_projects_picks() {
    let service = service([None, None, None]);
    let picks = service.store().list_picks(BracketId(3)).unwrap();
    let resolution = service.resolve_bracket(TOURNAMENT, &picks).unwrap();

    let last = resolution.matchup(GameNumber(3)).unwrap();
    assert_eq!(last.teams(), Some((A, C)));
    assert_eq!(last.status, MatchupStatus::Determined);
    assert_eq!(resolution.champion(), Some(A));
}

#[test]
fn test_resolve_bracket_reports_bad_pick_rows() {
    let service = service([None, None, None]);
    let picks = [Pick {
        game_id: GameId(404),
        winner: A,
    }];
    assert!(matches!(
        service.resolve_bracket(TOURNAMENT, &picks),
        Err(PoolError::Bracket(BracketError::MissingReference(_)))
    ));
}

#[test]
fn test_score_bracket_uses_configured_points() {
    let mut service = service([Some(A), Some(B), Some(A)]);
    // Doubling without a configured table
    let scored = service.score_bracket(TOURNAMENT, BracketId(1)).unwrap();
    assert_eq!(scored.current_total, 4);

    service.config = PoolConfig {
        points_by_round: Some(vec![10, 20]),
        ..Default::default()
    };
    let scored = service.score_bracket(TOURNAMENT, BracketId(3)).unwrap();
    assert_eq!(scored.current_total, 10);
}

#[test]
fn test_score_pool_bracket_matches_standings() {
    let service = service([Some(A), Some(B), Some(A)]);
    let in_pool = service.score_pool_bracket(POOL, BracketId(4)).unwrap();
    assert_eq!(in_pool.current_total, 20);
    // Without the pool, default doubling points apply
    assert_eq!(service.score_bracket(TOURNAMENT, BracketId(4)).unwrap().current_total, 2);

    let table = service.pool_standings(POOL).unwrap();
    let dave = table.rows.iter().find(|r| r.username == "dave").unwrap();
    assert_eq!(dave.current_total, in_pool.current_total);

    assert!(matches!(
        service.score_pool_bracket(PoolId(9), BracketId(4)),
        Err(PoolError::UnknownPool(_))
    ));
}

#[test]
fn test_score_bracket_rejects_foreign_bracket() {
    let service = service([None, None, None]);
    assert!(matches!(
        service.score_bracket(TournamentId(2), BracketId(1)),
        Err(PoolError::UnknownTournament(_))
    ));

    let mut store = fixtures::store([None, None, None]);
    let mut other = store.tournaments[0].clone();
    other.id = TournamentId(2);
    store.tournaments.push(other);
    for row in store.teams.clone() {
        store.teams.push(TeamRow {
            tournament_id: TournamentId(2),
            team: row.team,
        });
    }
    let service = PoolService::new(store, PoolConfig::default());
    assert!(matches!(
        service.score_bracket(TournamentId(2), BracketId(1)),
        Err(PoolError::BracketMismatch { .. })
    ));
}

#[test]
fn test_pool_standings_after_final() {
    let service = service([Some(A), Some(B), Some(A)]);
    let table = service.pool_standings(POOL).unwrap();

    assert_eq!(table.pool_name, "Office Pool");
    assert_eq!(table.tournament_name, "Spring Invitational");
    assert_eq!(
        summary(&table),
        vec![("alice", 40, 1), ("dave", 20, 2), ("carol", 10, 3), ("bob", 0, 4)]
    );
    assert!(table.rows.iter().all(|r| r.max_possible_total == r.current_total));
    assert_eq!(table.rows[0].bracket_name, "alice's bracket");
}

#[test]
fn test_pool_standings_mid_tournament() {
    let service = service([Some(A), None, None]);
    let table = service.pool_standings(POOL).unwrap();

    // Everyone but bob took A in game 1
    assert_eq!(
        summary(&table),
        vec![("alice", 10, 1), ("carol", 10, 1), ("dave", 10, 1), ("bob", 0, 4)]
    );
    let bob = table.rows.iter().find(|r| r.username == "bob").unwrap();
    // B v C is still open, D is out
    assert_eq!(bob.max_possible_total, 10);
}

#[test]
fn test_pool_standings_recomputed_after_results_change() {
    let mut store = fixtures::store([Some(A), Some(B), Some(A)]);
    let before = PoolService::new(store.clone(), PoolConfig::default())
        .pool_standings(POOL)
        .unwrap();
    assert_eq!(before.rows[0].username, "alice");

    store.record_result(game_id(3), Some(B)).unwrap();
    let after = PoolService::new(store, PoolConfig::default())
        .pool_standings(POOL)
        .unwrap();
    assert_eq!(summary(&after)[0], ("dave", 40, 1));
}

#[test]
fn test_inconsistent_results_block_standings() {
    // C did not play in game 1
    let service = service([Some(C), Some(B), None]);
    let err = service.pool_standings(POOL).unwrap_err();
    assert!(matches!(
        err,
        PoolError::Bracket(BracketError::ScoringBlocked { ref games }) if games == &vec![GameNumber(1)]
    ));
}

#[test]
fn test_points_for_prefers_pool_table() {
    let service = service([None, None, None]);
    assert_eq!(service.points_for(Some(POOL), 2).unwrap().as_slice(), &[10, 20]);
    assert_eq!(service.points_for(None, 2).unwrap().as_slice(), &[1, 2]);
    assert!(matches!(
        service.points_for(Some(PoolId(7)), 2),
        Err(PoolError::UnknownPool(_))
    ));
}

#[test]
fn test_empty_pool_has_no_rows() {
    let mut store = fixtures::store([None, None, None]);
    store.participants.clear();
    let table = PoolService::new(store, PoolConfig::default())
        .pool_standings(POOL)
        .unwrap();
    assert!(table.rows.is_empty());
}
