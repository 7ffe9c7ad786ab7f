//! Caller-facing operations over a `DataStore`.
//!
//! Nothing derived is ever stored: every score and standings table is
//! recomputed from the raw picks and results on each call.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use bracket_core::{
    resolve, resolve_results, score, standings, Bracket, BracketId, BracketScore, Entry,
    ParticipantId, Pick, PointsTable, PoolId, Resolution, Topology, Tournament, TournamentId,
};
use serde::{Deserialize, Serialize};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::store::DataStore;

/// One row of a pool's standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rank: u32,
    pub participant: ParticipantId,
    pub username: String,
    pub bracket_name: String,
    pub current_total: u32,
    pub max_possible_total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStandings {
    pub pool_id: PoolId,
    pub pool_name: String,
    pub tournament_name: String,
    pub rows: Vec<StandingRow>,
}

/// Bracket pool operations backed by a record store.
///
/// Topologies depend only on field size and region count, so one is built
/// per shape and shared by every tournament with that shape.
pub struct PoolService<S> {
    store: S,
    config: PoolConfig,
    topologies: RwLock<HashMap<(usize, usize), Arc<Topology>>>,
}

impl<S: DataStore> PoolService<S> {
    pub fn new(store: S, config: PoolConfig) -> Self {
        Self {
            store,
            config,
            topologies: RwLock::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shared topology for a field shape, built on first use
    pub fn topology(&self, field_size: usize, regions: usize) -> Result<Arc<Topology>, PoolError> {
        let key = (field_size, regions);
        if let Some(cached) = self
            .topologies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::debug!(field_size, regions, "topology cache hit");
            return Ok(Arc::clone(cached));
        }

        let built = Arc::new(Topology::with_regions(field_size, regions)?);
        let mut cache = self
            .topologies
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(key).or_insert(built)))
    }

    /// Load a tournament's teams and game rows onto its topology
    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, PoolError> {
        let record = self.store.tournament(id)?;
        let teams = self.store.list_teams(id)?;
        let games = self.store.list_games(id)?;
        let topology = self.topology(teams.len(), record.regions.len())?;
        Ok(Tournament::new(topology, &record.regions, teams, &games)?)
    }

    /// Resolve a set of picks against a tournament's bracket.
    ///
    /// Picks that contradict earlier picks are reported on the returned
    /// matchups, not as an error.
    pub fn resolve_bracket(&self, tournament: TournamentId, picks: &[Pick]) -> Result<Resolution, PoolError> {
        tracing::info!(%tournament, picks = picks.len(), "resolving bracket");
        let loaded = self.tournament(tournament)?;
        self.resolve_picks(&loaded, picks)
    }

    /// Resolve picks against an already loaded tournament
    pub fn resolve_picks(&self, tournament: &Tournament, picks: &[Pick]) -> Result<Resolution, PoolError> {
        let resolution = resolve(tournament, &tournament.picks(picks)?);
        let inconsistent = resolution.inconsistencies();
        if !inconsistent.is_empty() {
            tracing::warn!(games = ?inconsistent, "picks do not follow from earlier picks");
        }
        Ok(resolution)
    }

    /// Resolve the recorded results of a tournament
    pub fn results(&self, tournament: &Tournament) -> Resolution {
        let resolution = resolve_results(tournament);
        let inconsistent = resolution.inconsistencies();
        if !inconsistent.is_empty() {
            tracing::warn!(games = ?inconsistent, "recorded results are inconsistent");
        }
        resolution
    }

    /// Points per round for a pool: the pool's own table, then the
    /// configured default, then doubling.
    pub fn points_for(&self, pool: Option<PoolId>, rounds: u32) -> Result<PointsTable, PoolError> {
        let pool_points = match pool {
            Some(id) => self.store.points_by_round(id)?,
            None => None,
        };
        Ok(self.config.points_table(pool_points.as_deref(), rounds))
    }

    /// Score one bracket with the configured points
    pub fn score_bracket(&self, tournament: TournamentId, bracket: BracketId) -> Result<BracketScore, PoolError> {
        tracing::info!(%tournament, %bracket, "scoring bracket");
        self.score_with_points(tournament, bracket, None)
    }

    /// Score one bracket with a pool's points, as `pool_standings` would
    pub fn score_pool_bracket(&self, pool: PoolId, bracket: BracketId) -> Result<BracketScore, PoolError> {
        tracing::info!(%pool, %bracket, "scoring bracket for pool");
        let tournament = self.store.pool(pool)?.tournament_id;
        self.score_with_points(tournament, bracket, Some(pool))
    }

    fn score_with_points(
        &self,
        tournament: TournamentId,
        bracket: BracketId,
        pool: Option<PoolId>,
    ) -> Result<BracketScore, PoolError> {
        let loaded = self.tournament(tournament)?;
        let bracket = self.store.bracket(bracket)?;
        if bracket.tournament_id != tournament {
            return Err(PoolError::BracketMismatch {
                bracket: bracket.id,
                tournament,
            });
        }
        let points = self.points_for(pool, loaded.topology().num_rounds())?;
        let results = self.results(&loaded);
        self.score_loaded(&loaded, &results, &bracket, &points)
    }

    fn score_loaded(
        &self,
        tournament: &Tournament,
        results: &Resolution,
        bracket: &Bracket,
        points: &PointsTable,
    ) -> Result<BracketScore, PoolError> {
        let picks = self.resolve_picks(tournament, &bracket.picks)?;
        let scored = score(tournament.topology(), &picks, results, points)?;
        tracing::debug!(
            bracket = %bracket.id,
            current = scored.current_total,
            remaining = scored.max_possible_remaining,
            "bracket scored"
        );
        Ok(scored)
    }

    /// Ranked standings of every participant in a pool
    pub fn pool_standings(&self, pool: PoolId) -> Result<PoolStandings, PoolError> {
        tracing::info!(%pool, "computing pool standings");
        let pool_row = self.store.pool(pool)?;
        let record = self.store.tournament(pool_row.tournament_id)?;
        let tournament = self.tournament(pool_row.tournament_id)?;
        let points = self.points_for(Some(pool), tournament.topology().num_rounds())?;
        let results = self.results(&tournament);

        let mut details: HashMap<ParticipantId, (String, String)> = HashMap::new();
        let mut entries = Vec::new();
        for participant in self.store.list_participants(pool)? {
            let bracket = self.store.bracket(participant.bracket_id)?;
            if bracket.tournament_id != pool_row.tournament_id {
                return Err(PoolError::BracketMismatch {
                    bracket: bracket.id,
                    tournament: pool_row.tournament_id,
                });
            }
            let user = self.store.user(participant.user_id)?;
            let scored = self.score_loaded(&tournament, &results, &bracket, &points)?;
            entries.push(Entry::from_score(participant.id, bracket.submitted_at, &scored));
            details.insert(participant.id, (user.username, bracket.name));
        }

        let rows = standings(entries)
            .into_iter()
            .map(|standing| {
                let (username, bracket_name) = details
                    .remove(&standing.entry.participant)
                    .unwrap_or_default();
                StandingRow {
                    rank: standing.rank,
                    participant: standing.entry.participant,
                    username,
                    bracket_name,
                    current_total: standing.entry.current_total,
                    max_possible_total: standing.entry.max_possible_total,
                }
            })
            .collect();

        Ok(PoolStandings {
            pool_id: pool,
            pool_name: pool_row.name,
            tournament_name: record.name,
            rows,
        })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
