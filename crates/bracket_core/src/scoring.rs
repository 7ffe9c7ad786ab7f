//! Scoring a participant's resolved picks against the resolved results.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BracketError, Reference};
use crate::resolve::{Matchup, Resolution};
use crate::topology::{Source, Topology};
use crate::types::{GameNumber, Round, TeamId};

/// Points awarded for a correct pick, per round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable(Vec<u32>);

impl PointsTable {
    /// `points[0]` is round 1, `points[1]` round 2, and so on
    pub fn new(points: Vec<u32>) -> Self {
        Self(points)
    }

    /// 1 point in round 1, doubling every round after
    pub fn doubling(rounds: u32) -> Self {
        Self((0..rounds).map(|r| 1u32 << r).collect())
    }

    pub fn points(&self, round: Round) -> Result<u32, BracketError> {
        if round.0 == 0 {
            return Err(BracketError::MissingReference(Reference::Round(round)));
        }
        self.0
            .get(round.0 as usize - 1)
            .copied()
            .ok_or(BracketError::MissingReference(Reference::Round(round)))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// What a single pick amounted to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Right matchup, right winner
    Correct,
    /// Game decided and the pick does not count
    Wrong,
    /// No pick was made for this game
    Unpicked,
    /// Game not decided and the pick can still come true
    Pending,
    /// Game not decided but the pick can no longer come true
    Eliminated,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub game: GameNumber,
    pub round: Round,
    pub pick: Option<TeamId>,
    pub actual: Option<TeamId>,
    pub outcome: Outcome,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketScore {
    pub games: Vec<GameScore>,
    pub current_total: u32,
    /// Points still available from undecided games
    pub max_possible_remaining: u32,
    pub correct_picks: u32,
}

impl BracketScore {
    /// Best final total this bracket can still reach
    pub fn max_possible_total(&self) -> u32 {
        self.current_total + self.max_possible_remaining
    }
}

/// Score `picks` against `results`.
///
/// A decided game pays its round's points only when the participant's own
/// bracket produced the same matchup that was actually played and picked
/// its winner. An undecided game counts towards `max_possible_remaining`
/// while both teams of the participant's matchup can still get there.
///
/// Fails with `ScoringBlocked` if any recorded result is inconsistent.
pub fn score(
    topology: &Topology,
    picks: &Resolution,
    results: &Resolution,
    points: &PointsTable,
) -> Result<BracketScore, BracketError> {
    let inconsistent = results.inconsistencies();
    if !inconsistent.is_empty() {
        return Err(BracketError::ScoringBlocked {
            games: inconsistent,
        });
    }

    let eliminated = results.eliminated();
    let mut games = Vec::with_capacity(topology.num_games());
    let mut current_total = 0;
    let mut max_possible_remaining = 0;
    let mut correct_picks = 0;

    for node in topology.games() {
        let value = points.points(node.round)?;
        let predicted = picks
            .matchup(node.number)
            .ok_or(BracketError::MissingReference(Reference::GameNumber(node.number)))?;
        let actual = results
            .matchup(node.number)
            .ok_or(BracketError::MissingReference(Reference::GameNumber(node.number)))?;

        let (outcome, awarded) = match (predicted.selected, actual.winner) {
            (None, _) => (Outcome::Unpicked, 0),
            (Some(_), Some(winner)) => {
                if predicted.winner == Some(winner) && predicted.teams() == actual.teams() {
                    (Outcome::Correct, value)
                } else {
                    (Outcome::Wrong, 0)
                }
            }
            (Some(_), None) => {
                if still_possible(node.sources, predicted, results, &eliminated) {
                    max_possible_remaining += value;
                    (Outcome::Pending, 0)
                } else {
                    (Outcome::Eliminated, 0)
                }
            }
        };

        if outcome == Outcome::Correct {
            correct_picks += 1;
        }
        current_total += awarded;
        games.push(GameScore {
            game: node.number,
            round: node.round,
            pick: predicted.selected,
            actual: actual.winner,
            outcome,
            points: awarded,
        });
    }

    Ok(BracketScore {
        games,
        current_total,
        max_possible_remaining,
        correct_picks,
    })
}

/// Whether the participant's matchup for an undecided game can still be the real one
fn still_possible(
    sources: [Source; 2],
    predicted: &Matchup,
    results: &Resolution,
    eliminated: &HashSet<TeamId>,
) -> bool {
    // An accepted pick implies both sides are known
    if predicted.winner.is_none() {
        return false;
    }
    let sides = [predicted.team_a, predicted.team_b];
    sources.iter().zip(sides).all(|(source, side)| {
        let Some(team) = side else {
            return false;
        };
        match source {
            Source::Seed(_) => true,
            Source::Game(upstream) => match results.winner(*upstream) {
                Some(actual) => actual == team,
                None => !eliminated.contains(&team),
            },
        }
    })
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod scoring_tests;
