//! Static dependency graph of a single-elimination bracket.
//!
//! The graph is generated from the field size: round 1 games pair seeds in
//! standard bracket order inside each region, and every later game is fed by
//! two adjacent games of the round before it. Games are numbered round by
//! round, so increasing game number is always a valid topological order.

use serde::{Deserialize, Serialize};

use crate::error::BracketError;
use crate::types::{GameNumber, Round, SeedSlot};

/// Where one side of a game comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// Round 1: a seeded team
    Seed(SeedSlot),
    /// Later rounds: the winner of an earlier game
    Game(GameNumber),
}

/// One game in the bracket graph
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameNode {
    pub number: GameNumber,
    pub round: Round,
    /// Side A and side B, in that order
    pub sources: [Source; 2],
    /// The game this one's winner advances to (`None` for the final)
    pub feeds: Option<GameNumber>,
    /// Region index while both sides still come from a single region
    pub region: Option<usize>,
}

/// The full bracket graph for one field size and region count.
///
/// Two topologies built from the same inputs compare equal, so a caller can
/// build one per tournament shape and share it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    field_size: usize,
    regions: usize,
    rounds: u32,
    games: Vec<GameNode>,
}

impl Topology {
    /// Build a single-region bracket for `field_size` teams.
    pub fn new(field_size: usize) -> Result<Self, BracketError> {
        Self::with_regions(field_size, 1)
    }

    /// Build a bracket whose field is split into `regions` equal regions.
    ///
    /// Region winners meet in adjacent pairs (region 0 plays region 1, region 2
    /// plays region 3, ...) once the regional rounds are over.
    pub fn with_regions(field_size: usize, regions: usize) -> Result<Self, BracketError> {
        if field_size < 2 || !field_size.is_power_of_two() {
            return Err(BracketError::InvalidFieldSize(field_size));
        }
        if regions == 0 || !regions.is_power_of_two() || regions > field_size / 2 {
            return Err(BracketError::InvalidRegionCount {
                field_size,
                regions,
            });
        }

        let rounds = field_size.trailing_zeros();
        let order = seeding_order((field_size / regions) as u32);
        let mut games: Vec<GameNode> = Vec::with_capacity(field_size - 1);

        for region in 0..regions {
            for pair in order.chunks_exact(2) {
                games.push(GameNode {
                    number: GameNumber(games.len() as u32 + 1),
                    round: Round(1),
                    sources: [
                        Source::Seed(SeedSlot {
                            region,
                            seed: pair[0],
                        }),
                        Source::Seed(SeedSlot {
                            region,
                            seed: pair[1],
                        }),
                    ],
                    feeds: None,
                    region: Some(region),
                });
            }
        }

        let mut previous_start = 0;
        let mut previous_len = field_size / 2;
        for round in 2..=rounds {
            let start = games.len();
            for i in 0..previous_len / 2 {
                let left = previous_start + 2 * i;
                let right = left + 1;
                let number = GameNumber(games.len() as u32 + 1);
                let region = match (games[left].region, games[right].region) {
                    (Some(a), Some(b)) if a == b => Some(a),
                    _ => None,
                };
                let sources = [
                    Source::Game(games[left].number),
                    Source::Game(games[right].number),
                ];
                games[left].feeds = Some(number);
                games[right].feeds = Some(number);
                games.push(GameNode {
                    number,
                    round: Round(round),
                    sources,
                    feeds: None,
                    region,
                });
            }
            previous_start = start;
            previous_len /= 2;
        }

        Ok(Self {
            field_size,
            regions,
            rounds,
            games,
        })
    }

    pub fn field_size(&self) -> usize {
        self.field_size
    }

    pub fn regions(&self) -> usize {
        self.regions
    }

    /// Teams per region
    pub fn region_size(&self) -> usize {
        self.field_size / self.regions
    }

    pub fn num_rounds(&self) -> u32 {
        self.rounds
    }

    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    /// All games in increasing game number
    pub fn games(&self) -> &[GameNode] {
        &self.games
    }

    pub fn game(&self, number: GameNumber) -> Option<&GameNode> {
        if number.0 == 0 {
            return None;
        }
        self.games.get(number.index())
    }

    pub fn contains(&self, number: GameNumber) -> bool {
        self.game(number).is_some()
    }

    /// The games played in `round`, in bracket order
    pub fn games_in_round(&self, round: Round) -> &[GameNode] {
        if round.0 == 0 || round.0 > self.rounds {
            return &[];
        }
        let start = self.field_size - (self.field_size >> (round.0 - 1));
        let len = self.field_size >> round.0;
        &self.games[start..start + len]
    }

    /// The championship game
    pub fn final_game(&self) -> GameNumber {
        GameNumber(self.games.len() as u32)
    }

    /// Every game the winner of `number` could still go on to play, nearest first
    pub fn descendants(&self, number: GameNumber) -> Vec<GameNumber> {
        let mut out = Vec::new();
        let mut next = self.game(number).and_then(|node| node.feeds);
        while let Some(game) = next {
            out.push(game);
            next = self.game(game).and_then(|node| node.feeds);
        }
        out
    }
}

/// Standard bracket order for one region: the top seed meets the bottom seed,
/// and the two best seeds can only meet in the region's last game.
///
/// For 4 teams this is `[1, 4, 2, 3]`, for 8 it is `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn seeding_order(size: u32) -> Vec<u32> {
    let mut order = vec![1];
    while (order.len() as u32) < size {
        let mirror = order.len() as u32 * 2 + 1;
        order = order.iter().flat_map(|&seed| [seed, mirror - seed]).collect();
    }
    order
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod topology_tests;
