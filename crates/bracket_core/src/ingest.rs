//! Result ingestion: turns raw timing-export rows into uniform result records.
//!
//! Reading the vendor file is the caller's job; this module only needs the
//! four columns every export carries (surname, first name, elapsed time and,
//! for heat rounds, the heat number).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::competitor::Competitor;
use crate::error::BracketError;
use crate::heat::Heat;
use crate::time::ElapsedTime;

/// One row of a timing export before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    /// Source line, used in error messages.
    pub line: usize,
    pub surname: String,
    pub first_name: String,
    pub time: String,
    pub heat: Option<String>,
}

impl RawResult {
    fn is_blank(&self) -> bool {
        self.surname.trim().is_empty()
            && self.first_name.trim().is_empty()
            && self.time.trim().is_empty()
    }
}

/// A competitor's time in one heat (or in the time trial, where `heat` is
/// `None`). Consumed by a single processing pass and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatResult {
    pub competitor: Competitor,
    pub time: ElapsedTime,
    pub heat: Option<Heat>,
}

/// Normalize a heat round export. Every row must name its heat.
pub fn normalize_heat_results(raw: &[RawResult]) -> Result<Vec<HeatResult>, BracketError> {
    normalize(raw, true)
}

/// Normalize a time-trial export. Any heat column is ignored.
pub fn normalize_time_trial(raw: &[RawResult]) -> Result<Vec<HeatResult>, BracketError> {
    normalize(raw, false)
}

fn normalize(raw: &[RawResult], with_heat: bool) -> Result<Vec<HeatResult>, BracketError> {
    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(raw.len());

    for row in raw.iter().filter(|r| !r.is_blank()) {
        let invalid = |reason: String| BracketError::InvalidResult {
            line: row.line,
            reason,
        };

        if row.surname.trim().is_empty() && row.first_name.trim().is_empty() {
            return Err(invalid("missing competitor name".to_string()));
        }
        let competitor = Competitor::new(&row.first_name, &row.surname);

        let time: ElapsedTime = row
            .time
            .parse()
            .map_err(|e| invalid(format!("{} for {}", e, competitor)))?;

        let heat = if with_heat {
            let text = row
                .heat
                .as_deref()
                .filter(|h| !h.trim().is_empty())
                .ok_or_else(|| invalid(format!("missing heat for {}", competitor)))?;
            Some(text.parse::<Heat>().map_err(|e| invalid(e.to_string()))?)
        } else {
            None
        };

        if !seen.insert(competitor.clone()) {
            return Err(BracketError::DuplicateCompetitor(competitor.to_string()));
        }

        results.push(HeatResult {
            competitor,
            time,
            heat,
        });
    }

    results.sort_by_key(|r| r.time);
    tracing::debug!(rows = results.len(), "normalized results");
    Ok(results)
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod ingest_tests;
