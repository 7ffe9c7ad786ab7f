//! Record storage the service reads from.
//!
//! `DataStore` is the boundary to whatever database holds the raw rows.
//! `MemoryStore` is a complete in-memory implementation that can be saved to
//! and loaded from a JSON snapshot.

use std::path::Path;

use bracket_core::{
    Bracket, BracketError, BracketId, Game, GameId, ParticipantId, Pick, PoolId, Reference, Team,
    TeamId, TournamentId, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PoolError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub id: TournamentId,
    pub name: String,
    /// Region order; region `k` fills seed slots of region index `k`
    pub regions: Vec<String>,
    pub starts_at: DateTime<Utc>,
    /// When picks freeze; defaults to the start of play
    #[serde(default)]
    pub locks_at: Option<DateTime<Utc>>,
}

impl TournamentRecord {
    pub fn lock_time(&self) -> DateTime<Utc> {
        self.locks_at.unwrap_or(self.starts_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub admin_id: UserId,
    pub tournament_id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub entry_fee_cents: u32,
    /// Overrides the configured points per round
    #[serde(default)]
    pub points_by_round: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParticipant {
    pub id: ParticipantId,
    pub pool_id: PoolId,
    pub user_id: UserId,
    pub bracket_id: BracketId,
}

/// A team row together with the tournament it plays in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRow {
    pub tournament_id: TournamentId,
    #[serde(flatten)]
    pub team: Team,
}

/// Read side of the record store
pub trait DataStore {
    fn tournament(&self, id: TournamentId) -> Result<TournamentRecord, PoolError>;

    /// Teams ordered by region, then seed
    fn list_teams(&self, tournament: TournamentId) -> Result<Vec<Team>, PoolError>;

    /// Games ordered by game number, with recorded winners
    fn list_games(&self, tournament: TournamentId) -> Result<Vec<Game>, PoolError>;

    fn bracket(&self, id: BracketId) -> Result<Bracket, PoolError>;

    fn list_picks(&self, bracket: BracketId) -> Result<Vec<Pick>, PoolError> {
        Ok(self.bracket(bracket)?.picks)
    }

    fn pool(&self, id: PoolId) -> Result<Pool, PoolError>;

    fn list_participants(&self, pool: PoolId) -> Result<Vec<PoolParticipant>, PoolError>;

    fn user(&self, id: UserId) -> Result<User, PoolError>;

    /// Every bracket a user has submitted, across tournaments
    fn list_user_brackets(&self, user: UserId) -> Result<Vec<Bracket>, PoolError>;

    /// Every pool a user has joined
    fn list_user_pools(&self, user: UserId) -> Result<Vec<Pool>, PoolError>;

    /// Pool-specific points per round, if the pool sets any
    fn points_by_round(&self, pool: PoolId) -> Result<Option<Vec<u32>>, PoolError> {
        Ok(self.pool(pool)?.points_by_round)
    }
}

/// Every record held in plain vectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    pub tournaments: Vec<TournamentRecord>,
    pub users: Vec<User>,
    pub teams: Vec<TeamRow>,
    pub games: Vec<Game>,
    pub brackets: Vec<Bracket>,
    pub pools: Vec<Pool>,
    pub participants: Vec<PoolParticipant>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot
    pub fn load(path: &Path) -> Result<Self, PoolError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save the store to a JSON snapshot
    pub fn save(&self, path: &Path) -> Result<(), PoolError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| PoolError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Add or replace a bracket, unless its tournament has already locked.
    ///
    /// A bracket id already in the store can only be replaced by its owner,
    /// for the same tournament. Every pick must name a game and a team of
    /// that tournament.
    pub fn submit_bracket(&mut self, bracket: Bracket, now: DateTime<Utc>) -> Result<(), PoolError> {
        self.user(bracket.user_id)?;
        let tournament = self.tournament(bracket.tournament_id)?;
        if now >= tournament.lock_time() {
            return Err(PoolError::Locked {
                bracket: bracket.id,
                locked_at: tournament.lock_time(),
            });
        }
        if let Some(existing) = self.brackets.iter().find(|b| b.id == bracket.id) {
            if existing.user_id != bracket.user_id || existing.tournament_id != bracket.tournament_id {
                return Err(PoolError::BracketMismatch {
                    bracket: bracket.id,
                    tournament: existing.tournament_id,
                });
            }
        }
        for pick in &bracket.picks {
            self.check_pick(bracket.tournament_id, pick)?;
        }
        self.brackets.retain(|b| b.id != bracket.id);
        self.brackets.push(bracket);
        Ok(())
    }

    /// Set or replace the pick for one game
    pub fn set_pick(&mut self, bracket: BracketId, pick: Pick, now: DateTime<Utc>) -> Result<(), PoolError> {
        let tournament = self.unlocked_tournament(bracket, now)?;
        self.check_pick(tournament, &pick)?;
        let entry = self.bracket_mut(bracket)?;
        match entry.picks.iter_mut().find(|p| p.game_id == pick.game_id) {
            Some(existing) => existing.winner = pick.winner,
            None => entry.picks.push(pick),
        }
        Ok(())
    }

    /// Remove the pick for one game, returning whether there was one
    pub fn clear_pick(&mut self, bracket: BracketId, game: GameId, now: DateTime<Utc>) -> Result<bool, PoolError> {
        self.unlocked_tournament(bracket, now)?;
        let entry = self.bracket_mut(bracket)?;
        let before = entry.picks.len();
        entry.picks.retain(|p| p.game_id != game);
        Ok(entry.picks.len() != before)
    }

    /// Record (or clear, with `None`) the actual winner of a game
    pub fn record_result(&mut self, game: GameId, winner: Option<TeamId>) -> Result<(), PoolError> {
        let row = self
            .games
            .iter_mut()
            .find(|g| g.id == game)
            .ok_or(PoolError::UnknownGame(game))?;
        row.winner = winner;
        Ok(())
    }

    /// Enter `bracket` into `pool` for `user`. A user enters a pool at most once.
    pub fn join_pool(&mut self, pool: PoolId, user: UserId, bracket: BracketId) -> Result<ParticipantId, PoolError> {
        let pool_row = self.pool(pool)?;
        self.user(user)?;
        let entry = self.bracket(bracket)?;
        if entry.user_id != user || entry.tournament_id != pool_row.tournament_id {
            return Err(PoolError::BracketMismatch {
                bracket,
                tournament: pool_row.tournament_id,
            });
        }
        if self
            .participants
            .iter()
            .any(|p| p.pool_id == pool && p.user_id == user)
        {
            return Err(PoolError::AlreadyJoined { pool, user });
        }

        let id = ParticipantId(self.participants.iter().map(|p| p.id.0).max().unwrap_or(0) + 1);
        self.participants.push(PoolParticipant {
            id,
            pool_id: pool,
            user_id: user,
            bracket_id: bracket,
        });
        Ok(id)
    }

    /// Create a pool and return its id
    pub fn create_pool(&mut self, mut pool: Pool) -> Result<PoolId, PoolError> {
        if pool.name.trim().is_empty() {
            return Err(PoolError::InvalidPool("pool name is empty".to_string()));
        }
        self.user(pool.admin_id)?;
        self.tournament(pool.tournament_id)?;

        pool.id = PoolId(self.pools.iter().map(|p| p.id.0).max().unwrap_or(0) + 1);
        let id = pool.id;
        self.pools.push(pool);
        Ok(id)
    }

    /// Tournament of `bracket`, failing once that tournament has locked
    fn unlocked_tournament(&self, bracket: BracketId, now: DateTime<Utc>) -> Result<TournamentId, PoolError> {
        let tournament_id = self.bracket(bracket)?.tournament_id;
        let locked_at = self.tournament(tournament_id)?.lock_time();
        if now >= locked_at {
            return Err(PoolError::Locked { bracket, locked_at });
        }
        Ok(tournament_id)
    }

    fn bracket_mut(&mut self, bracket: BracketId) -> Result<&mut Bracket, PoolError> {
        self.brackets
            .iter_mut()
            .find(|b| b.id == bracket)
            .ok_or(PoolError::UnknownBracket(bracket))
    }

    fn check_pick(&self, tournament: TournamentId, pick: &Pick) -> Result<(), PoolError> {
        if !self
            .games
            .iter()
            .any(|g| g.id == pick.game_id && g.tournament_id == tournament)
        {
            return Err(PoolError::UnknownGame(pick.game_id));
        }
        if !self
            .teams
            .iter()
            .any(|row| row.team.id == pick.winner && row.tournament_id == tournament)
        {
            return Err(BracketError::MissingReference(Reference::Team(pick.winner)).into());
        }
        Ok(())
    }
}

impl DataStore for MemoryStore {
    fn tournament(&self, id: TournamentId) -> Result<TournamentRecord, PoolError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(PoolError::UnknownTournament(id))
    }

    fn list_teams(&self, tournament: TournamentId) -> Result<Vec<Team>, PoolError> {
        let record = self.tournament(tournament)?;
        let mut teams: Vec<Team> = self
            .teams
            .iter()
            .filter(|row| row.tournament_id == tournament)
            .map(|row| row.team.clone())
            .collect();
        let region_index = |name: &str| record.regions.iter().position(|r| r == name);
        teams.sort_by_key(|t| (region_index(t.region.as_str()), t.seed));
        Ok(teams)
    }

    fn list_games(&self, tournament: TournamentId) -> Result<Vec<Game>, PoolError> {
        self.tournament(tournament)?;
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|g| g.tournament_id == tournament)
            .cloned()
            .collect();
        games.sort_by_key(|g| g.number);
        Ok(games)
    }

    fn bracket(&self, id: BracketId) -> Result<Bracket, PoolError> {
        self.brackets
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(PoolError::UnknownBracket(id))
    }

    fn pool(&self, id: PoolId) -> Result<Pool, PoolError> {
        self.pools
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(PoolError::UnknownPool(id))
    }

    fn list_participants(&self, pool: PoolId) -> Result<Vec<PoolParticipant>, PoolError> {
        self.pool(pool)?;
        Ok(self
            .participants
            .iter()
            .filter(|p| p.pool_id == pool)
            .copied()
            .collect())
    }

    fn user(&self, id: UserId) -> Result<User, PoolError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(PoolError::UnknownUser(id))
    }

    fn list_user_brackets(&self, user: UserId) -> Result<Vec<Bracket>, PoolError> {
        self.user(user)?;
        Ok(self
            .brackets
            .iter()
            .filter(|b| b.user_id == user)
            .cloned()
            .collect())
    }

    fn list_user_pools(&self, user: UserId) -> Result<Vec<Pool>, PoolError> {
        self.user(user)?;
        Ok(self
            .pools
            .iter()
            .filter(|pool| {
                self.participants
                    .iter()
                    .any(|p| p.pool_id == pool.id && p.user_id == user)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
