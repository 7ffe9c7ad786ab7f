//! Small four team store shared by the unit tests

use bracket_core::{
    Bracket, BracketId, Game, GameId, GameNumber, ParticipantId, Pick, PoolId, Team, TeamId,
    TournamentId, UserId,
};
use chrono::{DateTime, TimeZone, Utc};

use crate::store::{MemoryStore, Pool, PoolParticipant, TeamRow, TournamentRecord, User};

pub const A: TeamId = TeamId(1);
pub const B: TeamId = TeamId(2);
pub const C: TeamId = TeamId(3);
pub const D: TeamId = TeamId(4);

pub const TOURNAMENT: TournamentId = TournamentId(1);
pub const POOL: PoolId = PoolId(1);

pub fn starts_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap()
}

pub fn before_lock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 19, 9, 0, 0).unwrap()
}

/// Game row id for game number `n`
pub fn game_id(n: u32) -> GameId {
    GameId(10 + n as u64)
}

fn picks(chosen: [TeamId; 3]) -> Vec<Pick> {
    (1..=3)
        .zip(chosen)
        .map(|(n, winner)| Pick {
            game_id: game_id(n),
            winner,
        })
        .collect()
}

/// Four users with one bracket each, all in one pool scoring 10 then 20.
///
/// Brackets pick A,B,A / D,C,D / A,C,A / A,B,B for games 1 to 3.
pub fn store(results: [Option<TeamId>; 3]) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.tournaments.push(TournamentRecord {
        id: TOURNAMENT,
        name: "Spring Invitational".to_string(),
        regions: vec!["Main".to_string()],
        starts_at: starts_at(),
        locks_at: None,
    });

    for (i, name) in ["A", "B", "C", "D"].into_iter().enumerate() {
        store.teams.push(TeamRow {
            tournament_id: TOURNAMENT,
            team: Team {
                id: TeamId(i as u64 + 1),
                name: name.to_string(),
                seed: i as u32 + 1,
                region: "Main".to_string(),
            },
        });
    }
    for (n, winner) in (1..=3).zip(results) {
        store.games.push(Game {
            id: game_id(n),
            tournament_id: TOURNAMENT,
            number: GameNumber(n),
            winner,
        });
    }

    let chosen = [[A, B, A], [D, C, D], [A, C, A], [A, B, B]];
    for (i, (username, picked)) in ["alice", "bob", "carol", "dave"]
        .into_iter()
        .zip(chosen)
        .enumerate()
    {
        let id = i as u64 + 1;
        store.users.push(User {
            id: UserId(id),
            username: username.to_string(),
        });
        store.brackets.push(Bracket {
            id: BracketId(id),
            user_id: UserId(id),
            tournament_id: TOURNAMENT,
            name: format!("{username}'s bracket"),
            submitted_at: before_lock(),
            picks: picks(picked),
        });
        store.participants.push(PoolParticipant {
            id: ParticipantId(id),
            pool_id: POOL,
            user_id: UserId(id),
            bracket_id: BracketId(id),
        });
    }

    store.pools.push(Pool {
        id: POOL,
        admin_id: UserId(1),
        tournament_id: TOURNAMENT,
        name: "Office Pool".to_string(),
        description: None,
        private: false,
        entry_fee_cents: 500,
        points_by_round: Some(vec![10, 20]),
    });
    store
}
