//! Binds a topology to one tournament's actual teams and game rows.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{BracketError, Reference};
use crate::resolve::Winners;
use crate::topology::Topology;
use crate::types::{Game, GameId, GameNumber, Pick, SeedSlot, Team, TeamId};

/// A topology with every seed slot filled and every game row located.
///
/// Building one validates the raw records once; after that, resolution and
/// scoring can trust every identity they see.
#[derive(Clone, Debug)]
pub struct Tournament {
    topology: Arc<Topology>,
    region_names: Vec<String>,
    /// Indexed by `region * region_size + seed - 1`
    slots: Vec<TeamId>,
    teams: HashMap<TeamId, Team>,
    game_numbers: HashMap<GameId, GameNumber>,
    /// Indexed by game number
    game_ids: Vec<Option<GameId>>,
    results: Winners,
}

impl Tournament {
    /// Bind `teams` and `games` onto `topology`.
    ///
    /// `region_names` gives the region order: the team whose region is
    /// `region_names[k]` fills a seed slot of region `k`.
    pub fn new(
        topology: Arc<Topology>,
        region_names: &[String],
        teams: Vec<Team>,
        games: &[Game],
    ) -> Result<Self, BracketError> {
        if region_names.len() != topology.regions() {
            return Err(BracketError::InvalidRegionCount {
                field_size: topology.field_size(),
                regions: region_names.len(),
            });
        }
        if teams.len() != topology.field_size() {
            return Err(BracketError::InvalidFieldSize(teams.len()));
        }

        let region_size = topology.region_size();
        let mut slots: Vec<Option<TeamId>> = vec![None; topology.field_size()];
        for team in &teams {
            let region = region_names
                .iter()
                .position(|name| *name == team.region)
                .ok_or_else(|| BracketError::MissingReference(Reference::Region(team.region.clone())))?;
            let slot = SeedSlot {
                region,
                seed: team.seed,
            };
            if team.seed == 0 || team.seed as usize > region_size {
                return Err(BracketError::MissingReference(Reference::SeedSlot(slot)));
            }
            let index = region * region_size + team.seed as usize - 1;
            if let Some(first) = slots[index] {
                return Err(BracketError::DuplicateSeed {
                    slot,
                    first,
                    second: team.id,
                });
            }
            slots[index] = Some(team.id);
        }
        // Equal counts and no duplicates means every slot is filled
        let slots: Vec<TeamId> = slots.into_iter().flatten().collect();

        let teams: HashMap<TeamId, Team> = teams.into_iter().map(|t| (t.id, t)).collect();

        let mut game_numbers = HashMap::with_capacity(games.len());
        let mut game_ids = vec![None; topology.num_games()];
        let mut results = Winners::default();
        for game in games {
            if !topology.contains(game.number) {
                return Err(BracketError::MissingReference(Reference::GameNumber(
                    game.number,
                )));
            }
            game_numbers.insert(game.id, game.number);
            game_ids[game.number.index()] = Some(game.id);
            if let Some(winner) = game.winner {
                if !teams.contains_key(&winner) {
                    return Err(BracketError::MissingReference(Reference::Team(winner)));
                }
                results.insert(game.number, winner);
            }
        }

        Ok(Self {
            topology,
            region_names: region_names.to_vec(),
            slots,
            teams,
            game_numbers,
            game_ids,
            results,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn region_names(&self) -> &[String] {
        &self.region_names
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    /// Team name for display, falling back to the raw id
    pub fn team_name(&self, id: TeamId) -> String {
        self.team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("team {id}"))
    }

    /// The team seeded into `slot`
    pub fn team_at(&self, slot: SeedSlot) -> Option<TeamId> {
        if slot.seed == 0 || slot.region >= self.topology.regions() {
            return None;
        }
        let index = slot.region * self.topology.region_size() + slot.seed as usize - 1;
        self.slots.get(index).copied()
    }

    pub fn game_number(&self, id: GameId) -> Option<GameNumber> {
        self.game_numbers.get(&id).copied()
    }

    pub fn game_id(&self, number: GameNumber) -> Option<GameId> {
        if number.0 == 0 {
            return None;
        }
        self.game_ids.get(number.index()).copied().flatten()
    }

    /// Recorded actual winners taken from the game rows
    pub fn results(&self) -> &Winners {
        &self.results
    }

    /// Convert a participant's pick rows into a winner source.
    ///
    /// Picks naming a game row or team this tournament does not have are
    /// rejected rather than skipped.
    pub fn picks(&self, picks: &[Pick]) -> Result<Winners, BracketError> {
        let mut winners = Winners::default();
        for pick in picks {
            let number = self
                .game_number(pick.game_id)
                .ok_or(BracketError::MissingReference(Reference::Game(pick.game_id)))?;
            if !self.teams.contains_key(&pick.winner) {
                return Err(BracketError::MissingReference(Reference::Team(pick.winner)));
            }
            winners.insert(number, pick.winner);
        }
        Ok(winners)
    }

    /// Build a winner source directly from game numbers, with the same checks as [`Tournament::picks`].
    pub fn winners<I>(&self, entries: I) -> Result<Winners, BracketError>
    where
        I: IntoIterator<Item = (GameNumber, TeamId)>,
    {
        let mut winners = Winners::default();
        for (number, team) in entries {
            if !self.topology.contains(number) {
                return Err(BracketError::MissingReference(Reference::GameNumber(number)));
            }
            if !self.teams.contains_key(&team) {
                return Err(BracketError::MissingReference(Reference::Team(team)));
            }
            winners.insert(number, team);
        }
        Ok(winners)
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
