//! Errors surfaced by the store and the service layer

use std::path::PathBuf;

use bracket_core::{BracketError, BracketId, GameId, PoolId, TournamentId, UserId};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error("unknown tournament {0}")]
    UnknownTournament(TournamentId),

    #[error("unknown bracket {0}")]
    UnknownBracket(BracketId),

    #[error("unknown pool {0}")]
    UnknownPool(PoolId),

    #[error("unknown user {0}")]
    UnknownUser(UserId),

    #[error("unknown game {0}")]
    UnknownGame(GameId),

    #[error("picks for bracket {bracket} locked at {locked_at}")]
    Locked {
        bracket: BracketId,
        locked_at: DateTime<Utc>,
    },

    #[error("user {user} already has a bracket in pool {pool}")]
    AlreadyJoined { pool: PoolId, user: UserId },

    #[error("bracket {bracket} does not belong to this user and tournament {tournament}")]
    BracketMismatch {
        bracket: BracketId,
        tournament: TournamentId,
    },

    #[error("invalid pool: {0}")]
    InvalidPool(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}
