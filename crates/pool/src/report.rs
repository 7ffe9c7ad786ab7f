//! Plain text reports for the command line

use bracket_core::{
    BracketScore, Fault, Outcome, Resolution, Round, Source, TeamId, Topology, Tournament,
};

use crate::service::PoolStandings;

fn source_label(source: Source) -> String {
    match source {
        Source::Seed(slot) => format!("region {} seed {}", slot.region, slot.seed),
        Source::Game(game) => format!("winner of {game}"),
    }
}

fn team_label(tournament: &Tournament, team: Option<TeamId>) -> String {
    team.map(|id| tournament.team_name(id))
        .unwrap_or_else(|| "TBD".to_string())
}

/// Every game of a topology with the two games or seeds feeding it
pub fn topology_report(topology: &Topology) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== Bracket: {} teams, {} regions, {} rounds, {} games ===\n",
        topology.field_size(),
        topology.regions(),
        topology.num_rounds(),
        topology.num_games()
    ));

    for round in 1..=topology.num_rounds() {
        report.push_str(&format!("\nRound {round}:\n"));
        for node in topology.games_in_round(Round(round)) {
            let feeds = node
                .feeds
                .map(|next| format!("-> {next}"))
                .unwrap_or_else(|| "final".to_string());
            report.push_str(&format!(
                "{:>5}  {:<22} v {:<22} {}\n",
                node.number.to_string(),
                source_label(node.sources[0]),
                source_label(node.sources[1]),
                feeds
            ));
        }
    }
    report
}

/// Projected bracket: each game's matchup and chosen winner, round by round
pub fn bracket_report(tournament: &Tournament, resolution: &Resolution) -> String {
    let mut report = String::new();
    let mut round = Round(0);
    for matchup in resolution.matchups() {
        if matchup.round != round {
            round = matchup.round;
            report.push_str(&format!("\nRound {}:\n", round.0));
        }
        let note = match matchup.fault {
            Some(Fault::Inconsistent { claimed }) => {
                format!("  [{} did not reach this game]", tournament.team_name(claimed))
            }
            Some(Fault::Blocked { by }) => format!("  [depends on {by}]"),
            None => String::new(),
        };
        report.push_str(&format!(
            "{:>5}  {:<20} v {:<20} => {}{}\n",
            matchup.game.to_string(),
            team_label(tournament, matchup.team_a),
            team_label(tournament, matchup.team_b),
            team_label(tournament, matchup.selected),
            note
        ));
    }

    match resolution.champion() {
        Some(champion) => report.push_str(&format!("\nChampion: {}\n", tournament.team_name(champion))),
        None => report.push_str("\nChampion: undecided\n"),
    }
    report
}

/// Per-game breakdown of a bracket's score
pub fn score_report(tournament: &Tournament, score: &BracketScore) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{:>5}  {:<6} {:<20} {:<20} {:<10} {:>6}\n",
        "Game", "Round", "Pick", "Actual", "Outcome", "Points"
    ));
    report.push_str(&"-".repeat(74));
    report.push('\n');

    for game in &score.games {
        let outcome = match game.outcome {
            Outcome::Correct => "correct",
            Outcome::Wrong => "wrong",
            Outcome::Unpicked => "no pick",
            Outcome::Pending => "pending",
            Outcome::Eliminated => "busted",
        };
        report.push_str(&format!(
            "{:>5}  {:<6} {:<20} {:<20} {:<10} {:>6}\n",
            game.game.to_string(),
            game.round.0,
            team_label(tournament, game.pick),
            game.actual
                .map(|id| tournament.team_name(id))
                .unwrap_or_else(|| "-".to_string()),
            outcome,
            game.points
        ));
    }

    report.push_str(&format!(
        "\nCorrect picks: {}\nCurrent total: {}\nStill possible: {}\nBest possible: {}\n",
        score.correct_picks,
        score.current_total,
        score.max_possible_remaining,
        score.max_possible_total()
    ));
    report
}

/// Ranked standings table for a pool
pub fn standings_report(standings: &PoolStandings) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== {} ({}) ===\n\n",
        standings.pool_name, standings.tournament_name
    ));
    report.push_str(&format!(
        "{:<5} {:<16} {:<24} {:>7} {:>7}\n",
        "Rank", "Player", "Bracket", "Points", "Max"
    ));
    report.push_str(&"-".repeat(63));
    report.push('\n');

    for row in &standings.rows {
        report.push_str(&format!(
            "{:<5} {:<16} {:<24} {:>7} {:>7}\n",
            row.rank, row.username, row.bracket_name, row.current_total, row.max_possible_total
        ));
    }
    report
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
