//! Pool standings with standard competition ranking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::BracketScore;
use crate::types::ParticipantId;

/// One participant's score as the aggregator sees it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub participant: ParticipantId,
    /// When the participant's bracket was submitted; breaks display ties
    pub submitted_at: DateTime<Utc>,
    pub current_total: u32,
    pub max_possible_total: u32,
}

impl Entry {
    pub fn from_score(
        participant: ParticipantId,
        submitted_at: DateTime<Utc>,
        score: &BracketScore,
    ) -> Self {
        Self {
            participant,
            submitted_at,
            current_total: score.current_total,
            max_possible_total: score.max_possible_total(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based; equal totals share a rank (1, 1, 3, ...)
    pub rank: u32,
    pub entry: Entry,
}

/// Rank `entries` by current total.
///
/// Equal totals share a rank. Among them, earlier submissions are listed
/// first, then lower participant ids, so the order is reproducible.
pub fn standings(mut entries: Vec<Entry>) -> Vec<Standing> {
    entries.sort_by(|a, b| {
        b.current_total
            .cmp(&a.current_total)
            .then(a.submitted_at.cmp(&b.submitted_at))
            .then(a.participant.cmp(&b.participant))
    });

    let mut out: Vec<Standing> = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let rank = match out.last() {
            Some(prev) if prev.entry.current_total == entry.current_total => prev.rank,
            _ => position as u32 + 1,
        };
        out.push(Standing { rank, entry });
    }
    out
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;
