//! Forward walk over the topology that turns chosen winners into matchups.
//!
//! The same walk serves a participant's picks (their projected bracket) and
//! the recorded results (the real bracket). The only input that differs is
//! where "the winner of game N" comes from.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::BracketError;
use crate::topology::Source;
use crate::tournament::Tournament;
use crate::types::{GameNumber, Round, TeamId};

/// Chosen winner per game: a participant's picks or the recorded results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winners(BTreeMap<GameNumber, TeamId>);

impl Winners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, game: GameNumber) -> Option<TeamId> {
        self.0.get(&game).copied()
    }

    /// Set the winner for `game`, returning the previous one
    pub fn insert(&mut self, game: GameNumber, team: TeamId) -> Option<TeamId> {
        self.0.insert(game, team)
    }

    pub fn remove(&mut self, game: GameNumber) -> Option<TeamId> {
        self.0.remove(&game)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameNumber, TeamId)> + '_ {
        self.0.iter().map(|(&game, &team)| (game, team))
    }
}

impl FromIterator<(GameNumber, TeamId)> for Winners {
    fn from_iter<I: IntoIterator<Item = (GameNumber, TeamId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How much of a game's matchup is known
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchupStatus {
    Determined,
    PartiallyDetermined,
    Undetermined,
}

/// Why a game's chosen winner could not be used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fault {
    /// The chosen winner is not one of the two teams that reached the game
    Inconsistent { claimed: TeamId },
    /// An upstream game is inconsistent, so this game cannot be trusted either
    Blocked { by: GameNumber },
}

/// One game after resolution
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub game: GameNumber,
    pub round: Round,
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    pub status: MatchupStatus,
    /// Winner named by the input, accepted or not
    pub selected: Option<TeamId>,
    /// Winner accepted by the walk and propagated downstream
    pub winner: Option<TeamId>,
    pub fault: Option<Fault>,
}

impl Matchup {
    /// Both teams, when the matchup is determined
    pub fn teams(&self) -> Option<(TeamId, TeamId)> {
        Some((self.team_a?, self.team_b?))
    }

    pub fn loser(&self) -> Option<TeamId> {
        let (a, b) = self.teams()?;
        match self.winner? {
            w if w == a => Some(b),
            w if w == b => Some(a),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }
}

/// Per-game matchups for a whole bracket, indexed by game number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    matchups: Vec<Matchup>,
}

impl Resolution {
    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    pub fn matchup(&self, game: GameNumber) -> Option<&Matchup> {
        if game.0 == 0 {
            return None;
        }
        self.matchups.get(game.index())
    }

    /// Accepted winner of `game`
    pub fn winner(&self, game: GameNumber) -> Option<TeamId> {
        self.matchup(game).and_then(|m| m.winner)
    }

    /// Games whose chosen winner did not reach them, in game order
    pub fn inconsistencies(&self) -> Vec<GameNumber> {
        self.matchups
            .iter()
            .filter(|m| matches!(m.fault, Some(Fault::Inconsistent { .. })))
            .map(|m| m.game)
            .collect()
    }

    /// Games that cannot be trusted because an upstream game is inconsistent
    pub fn blocked(&self) -> Vec<GameNumber> {
        self.matchups
            .iter()
            .filter(|m| matches!(m.fault, Some(Fault::Blocked { .. })))
            .map(|m| m.game)
            .collect()
    }

    /// Fail with the first inconsistent game, if any
    pub fn check(&self) -> Result<(), BracketError> {
        for matchup in &self.matchups {
            if let Some(Fault::Inconsistent { claimed }) = matchup.fault {
                return Err(BracketError::InconsistentResult {
                    game: matchup.game,
                    claimed,
                });
            }
        }
        Ok(())
    }

    /// Accepted winner of the final
    pub fn champion(&self) -> Option<TeamId> {
        self.matchups.last().and_then(|m| m.winner)
    }

    /// Every team that has lost an accepted game
    pub fn eliminated(&self) -> HashSet<TeamId> {
        self.matchups.iter().filter_map(Matchup::loser).collect()
    }

    /// True once every game has an accepted winner
    pub fn is_complete(&self) -> bool {
        self.matchups.iter().all(Matchup::is_decided)
    }
}

/// Walk the bracket forward using `winners` as the source of each game's winner.
///
/// A chosen winner is accepted only when both teams of the game are known and
/// it is one of them; anything else marks the game inconsistent and its winner
/// is treated as unknown for later rounds.
pub fn resolve(tournament: &Tournament, winners: &Winners) -> Resolution {
    let topology = tournament.topology();
    let mut matchups: Vec<Matchup> = Vec::with_capacity(topology.num_games());

    for node in topology.games() {
        let mut blocked_by = None;
        let mut side = |source: Source| match source {
            Source::Seed(slot) => tournament.team_at(slot),
            Source::Game(upstream) => {
                let up = &matchups[upstream.index()];
                match up.fault {
                    Some(Fault::Inconsistent { .. }) => {
                        blocked_by.get_or_insert(upstream);
                    }
                    Some(Fault::Blocked { by }) => {
                        blocked_by.get_or_insert(by);
                    }
                    None => {}
                }
                up.winner
            }
        };
        let team_a = side(node.sources[0]);
        let team_b = side(node.sources[1]);

        let status = match (team_a, team_b) {
            (Some(_), Some(_)) => MatchupStatus::Determined,
            (None, None) => MatchupStatus::Undetermined,
            _ => MatchupStatus::PartiallyDetermined,
        };

        let selected = winners.get(node.number);
        let winner = selected.filter(|&team| {
            status == MatchupStatus::Determined && (team_a == Some(team) || team_b == Some(team))
        });
        let fault = match (selected, winner) {
            (Some(claimed), None) => Some(Fault::Inconsistent { claimed }),
            _ => blocked_by.map(|by| Fault::Blocked { by }),
        };

        matchups.push(Matchup {
            game: node.number,
            round: node.round,
            team_a,
            team_b,
            status,
            selected,
            winner,
            fault,
        });
    }

    Resolution { matchups }
}

/// Resolve the tournament's recorded results
pub fn resolve_results(tournament: &Tournament) -> Resolution {
    resolve(tournament, tournament.results())
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod resolve_tests;
