//! Tie guard.
//!
//! Placement is decided purely by elapsed time, so two equal times inside one
//! comparison scope make the ordering undefined. Ties are never broken here:
//! the operator corrects the source data and re-runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::BracketError;
use crate::heat::Heat;
use crate::time::ElapsedTime;

/// Outcome of checking one set of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieCheck {
    Clear,
    /// Number of times beyond the first occurrence of each value.
    TiesFound(usize),
}

/// Check a multiset of times for repeated values.
pub fn check_ties<I>(times: I) -> TieCheck
where
    I: IntoIterator<Item = ElapsedTime>,
{
    let mut distinct = HashSet::new();
    let mut total = 0;
    for time in times {
        distinct.insert(time);
        total += 1;
    }
    match total - distinct.len() {
        0 => TieCheck::Clear,
        n => TieCheck::TiesFound(n),
    }
}

/// Where a set of compared times came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieScope {
    TimeTrial,
    Heat(Heat),
    HeatPair(Heat, Heat),
}

impl fmt::Display for TieScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieScope::TimeTrial => write!(f, "time trial"),
            TieScope::Heat(heat) => write!(f, "heat {}", heat),
            TieScope::HeatPair(a, b) => write!(f, "heat pair {}/{}", a, b),
        }
    }
}

/// A scope that failed the tie check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieReport {
    pub scope: TieScope,
    pub duplicates: usize,
}

impl fmt::Display for TieReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.duplicates == 1 { "time" } else { "times" };
        write!(f, "{} has {} duplicate {}", self.scope, self.duplicates, noun)
    }
}

/// Check one scope, returning a report when it has ties.
pub fn tie_report<I>(scope: TieScope, times: I) -> Option<TieReport>
where
    I: IntoIterator<Item = ElapsedTime>,
{
    match check_ties(times) {
        TieCheck::Clear => None,
        TieCheck::TiesFound(duplicates) => {
            tracing::warn!(%scope, duplicates, "tie detected");
            Some(TieReport { scope, duplicates })
        }
    }
}

/// Turn collected reports into an error if there are any.
pub fn ensure_no_ties(reports: Vec<TieReport>) -> Result<(), BracketError> {
    if reports.is_empty() {
        Ok(())
    } else {
        Err(BracketError::TieDetected { reports })
    }
}

#[cfg(test)]
#[path = "ties_tests.rs"]
mod ties_tests;
