//! Plain records shared by every stage of the engine.
//!
//! Identities are opaque integers handed out by whatever store holds the raw
//! rows. Positions inside the bracket (`GameNumber`, `Round`, `SeedSlot`) are
//! owned by the topology and never taken from the store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Store identity of a team
    TeamId
);
id_type!(
    /// Store identity of a game row (not its bracket position)
    GameId
);
id_type!(BracketId);
id_type!(UserId);
id_type!(PoolId);
id_type!(TournamentId);
id_type!(ParticipantId);

/// 1-based position of a game in the topology. Round 1 comes first, the final last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameNumber(pub u32);

impl GameNumber {
    /// Zero-based index into per-game tables
    pub fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for GameNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 1-based round number
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round(pub u32);

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {}", self.0)
    }
}

/// A seed position that is not yet bound to a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeedSlot {
    /// Index into the tournament's region order
    pub region: usize,
    /// 1 is the strongest seed in the region
    pub seed: u32,
}

impl fmt::Display for SeedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region {} seed {}", self.region, self.seed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub seed: u32,
    pub region: String,
}

/// A game row as the store keeps it. Round and sources are derived from `number`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub tournament_id: TournamentId,
    pub number: GameNumber,
    /// Recorded actual winner, if the game has been played
    #[serde(default)]
    pub winner: Option<TeamId>,
}

/// A participant's predicted winner for one game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub game_id: GameId,
    pub winner: TeamId,
}

/// One participant's bracket for one tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub user_id: UserId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub picks: Vec<Pick>,
}
