//! Error kinds raised by the engine.
//!
//! All of them are deterministic functions of bad input. Nothing here is
//! transient, so callers fix the data and simply recompute.

use std::fmt;

use thiserror::Error;

use crate::types::{GameId, GameNumber, Round, SeedSlot, TeamId};

/// Something a record pointed at that the tournament does not know about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    Game(GameId),
    GameNumber(GameNumber),
    Team(TeamId),
    Region(String),
    SeedSlot(SeedSlot),
    Round(Round),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Game(id) => write!(f, "game id {id}"),
            Reference::GameNumber(number) => write!(f, "game {number}"),
            Reference::Team(id) => write!(f, "team id {id}"),
            Reference::Region(name) => write!(f, "region {name:?}"),
            Reference::SeedSlot(slot) => write!(f, "{slot}"),
            Reference::Round(round) => write!(f, "{round}"),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BracketError {
    #[error("invalid field size {0}: team count must be a power of two of at least 2")]
    InvalidFieldSize(usize),

    #[error("invalid region count {regions} for a field of {field_size} teams")]
    InvalidRegionCount { field_size: usize, regions: usize },

    #[error("game {game}: recorded winner {claimed} did not reach this game")]
    InconsistentResult { game: GameNumber, claimed: TeamId },

    #[error("scores unavailable pending result correction of {}", format_games(.games))]
    ScoringBlocked { games: Vec<GameNumber> },

    #[error("missing reference: {0}")]
    MissingReference(Reference),

    #[error("teams {first} and {second} both claim {slot}")]
    DuplicateSeed {
        slot: SeedSlot,
        first: TeamId,
        second: TeamId,
    },
}

fn format_games(games: &[GameNumber]) -> String {
    games
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
