//! Small tournaments shared by the unit tests.

use std::sync::Arc;

use crate::{Game, GameId, GameNumber, Team, TeamId, Topology, Tournament, TournamentId};

pub const A: TeamId = TeamId(1);
pub const B: TeamId = TeamId(2);
pub const C: TeamId = TeamId(3);
pub const D: TeamId = TeamId(4);

/// Single-region field where team id equals seed and game id is `100 + number`
pub fn field(size: usize) -> Tournament {
    let topology = Arc::new(Topology::new(size).unwrap());
    let teams = (1..=size as u64)
        .map(|seed| Team {
            id: TeamId(seed),
            name: format!("Team {seed}"),
            seed: seed as u32,
            region: "Main".to_string(),
        })
        .collect();
    let games: Vec<Game> = (1..size as u32)
        .map(|number| Game {
            id: game_id(number),
            tournament_id: TournamentId(1),
            number: GameNumber(number),
            winner: None,
        })
        .collect();
    Tournament::new(topology, &["Main".to_string()], teams, &games).unwrap()
}

pub fn game_id(number: u32) -> GameId {
    GameId(100 + number as u64)
}

/// Winner source from `(game number, team)` pairs
pub fn winners(entries: &[(u32, TeamId)]) -> crate::Winners {
    entries
        .iter()
        .map(|&(number, team)| (GameNumber(number), team))
        .collect()
}
