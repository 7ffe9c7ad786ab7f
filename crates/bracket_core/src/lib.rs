//! Single-elimination bracket engine
//!
//! This crate provides the pure core of a bracket pool:
//! - Generating the bracket graph for any power-of-two field
//! - Resolving picks and recorded results into per-game matchups
//! - Scoring a participant's bracket against the results
//! - Ranking the participants of a pool
//!
//! Everything here is a synchronous function of its inputs. Loading records,
//! caching and presentation live in the `pool` crate.

mod error;
mod resolve;
mod scoring;
mod standings;
mod topology;
mod tournament;
mod types;

pub use error::*;
pub use resolve::*;
pub use scoring::*;
pub use standings::*;
pub use topology::*;
pub use tournament::*;
pub use types::*;

#[cfg(test)]
mod fixtures;
