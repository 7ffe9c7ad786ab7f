//! Bracket pool CLI
//!
//! Inspect bracket graphs, score brackets and rank pools from a JSON snapshot.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bracket_core::{BracketId, GameId, PoolId, TeamId, Topology};
use clap::{Parser, Subcommand};
use pool::{
    bracket_report, score_report, standings_report, topology_report, DataStore, MemoryStore,
    PoolConfig, PoolService,
};
use tracing_subscriber::EnvFilter;

/// Bracket pool scoring and standings
#[derive(Parser, Debug)]
#[command(version, about = "Bracket pool scoring and standings")]
struct Cli {
    /// TOML config file; defaults apply when it does not exist
    #[arg(long, default_value = "pool.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the game graph for a field size
    Topology {
        #[arg(long, default_value_t = 64)]
        teams: usize,
        #[arg(long, default_value_t = 4)]
        regions: usize,
    },
    /// Show a bracket's projected matchups
    Bracket {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        bracket: u64,
    },
    /// Score a bracket against the recorded results
    ///
    /// Uses the configured points per round unless `--pool` names a pool,
    /// in which case that pool's table applies, as in `standings`.
    Score {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        bracket: u64,
        #[arg(long)]
        pool: Option<u64>,
    },
    /// Rank every participant of a pool
    Standings {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        pool: u64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Record the winner of a game and save the snapshot
    Record {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        game: u64,
        /// Team id of the winner; omit to clear the result
        #[arg(long)]
        winner: Option<u64>,
    },
}

fn init_tracing(config: &PoolConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_service(snapshot: &Path, config: PoolConfig) -> Result<PoolService<MemoryStore>> {
    let store = MemoryStore::load(snapshot)
        .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
    Ok(PoolService::new(store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PoolConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    init_tracing(&config);

    match cli.command {
        Command::Topology { teams, regions } => {
            let topology = Topology::with_regions(teams, regions)?;
            print!("{}", topology_report(&topology));
        }
        Command::Bracket { snapshot, bracket } => {
            let service = load_service(&snapshot, config)?;
            let bracket = service.store().bracket(BracketId(bracket))?;
            let tournament = service.tournament(bracket.tournament_id)?;
            let resolution = service.resolve_picks(&tournament, &bracket.picks)?;
            println!("=== {} ===", bracket.name);
            print!("{}", bracket_report(&tournament, &resolution));
        }
        Command::Score {
            snapshot,
            bracket,
            pool,
        } => {
            let service = load_service(&snapshot, config)?;
            let bracket = service.store().bracket(BracketId(bracket))?;
            let tournament = service.tournament(bracket.tournament_id)?;
            let score = match pool {
                Some(pool) => service.score_pool_bracket(PoolId(pool), bracket.id)?,
                None => service.score_bracket(bracket.tournament_id, bracket.id)?,
            };
            println!("=== {} ===\n", bracket.name);
            print!("{}", score_report(&tournament, &score));
        }
        Command::Standings {
            snapshot,
            pool,
            json,
        } => {
            let service = load_service(&snapshot, config)?;
            let standings = service.pool_standings(PoolId(pool))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print!("{}", standings_report(&standings));
            }
        }
        Command::Record {
            snapshot,
            game,
            winner,
        } => {
            let mut store = MemoryStore::load(&snapshot)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            store.record_result(GameId(game), winner.map(TeamId))?;
            store
                .save(&snapshot)
                .with_context(|| format!("saving snapshot {}", snapshot.display()))?;
            tracing::info!(game, ?winner, "result recorded");
        }
    }
    Ok(())
}
