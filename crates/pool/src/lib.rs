//! Bracket pool service
//!
//! This crate wraps the `bracket_core` engine with:
//! - A record store trait and an in-memory store with JSON snapshots
//! - Scores and standings computed on read, never stored
//! - TOML configuration for the default points per round
//! - Text reports for the `pool` command line tool
//!
//! # Usage
//!
//! ```bash
//! # Print the bracket graph for a 64 team field in four regions
//! cargo run -p pool -- topology --teams 64 --regions 4
//!
//! # Standings for pool 1 of a snapshot
//! cargo run -p pool -- standings --snapshot crates/pool/data/sample_pool.json --pool 1
//! ```

mod config;
mod error;
mod report;
mod service;
mod store;

#[cfg(test)]
mod fixtures;

pub use config::*;
pub use error::*;
pub use report::*;
pub use service::*;
pub use store::*;
