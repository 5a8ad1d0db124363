//! Error types for bracket construction and round processing.

use std::fmt;

use thiserror::Error;

use crate::heat::Heat;
use crate::slot::SlotLabel;
use crate::ties::TieReport;

/// Malformed or inconsistent topology. Always fatal at bracket construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Heat numbers are `round * 100 + ordinal` with ordinal in 1..=99.
    #[error("invalid heat number {0}")]
    InvalidHeat(u32),

    #[error("`{0}` is not a heat identifier")]
    UnparsableHeat(String),

    #[error("invalid slot label `{0}`")]
    InvalidSlotLabel(String),

    /// The same slot label was generated for two heats.
    #[error("slot {slot} is assigned to both heat {first} and heat {second}")]
    SlotCollision {
        slot: SlotLabel,
        first: Heat,
        second: Heat,
    },

    #[error("heat {0} feeds more than one topology entry")]
    DuplicateSource(Heat),

    #[error("heat {0} is fed by more than one topology entry")]
    DuplicateDestination(Heat),

    #[error("heat {0} feeds a topology entry but never races")]
    SourceNeverRaces(Heat),

    /// A heat before the final round whose field would go nowhere.
    #[error("heat {0} races before the final round but feeds no topology entry")]
    UnconsumedHeat(Heat),

    #[error("heats {0} and {1} are paired but race in different rounds")]
    SplitPair(Heat, Heat),

    #[error("heat {from} cannot feed heat {to}: destination must be in the next round")]
    RoundMismatch { from: Heat, to: Heat },

    #[error("round-0 seeds can only be grouped into round 1 heats, got heat {0}")]
    SeedHeatNotFirstRound(Heat),

    #[error("round-0 seed {0} appears more than once")]
    DuplicateSeed(u32),

    #[error("trimmed slot {0} is not generated by the topology")]
    UnknownTrim(SlotLabel),

    #[error("pair {0}/{1} sends competitors down but names no remainder heat")]
    MissingRemainderHeat(Heat, Heat),

    #[error("invalid advancement policy for {entry}: {reason}")]
    InvalidPolicy { entry: String, reason: String },
}

/// What a failed bracket lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Slot(SlotLabel),
    Competitor { name: String, round: u8 },
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Slot(slot) => write!(f, "slot {}", slot),
            LookupKey::Competitor { name, round } => {
                write!(f, "competitor {} in round {}", name, round)
            }
        }
    }
}

/// Errors raised by the bracket engine.
///
/// Every variant is terminal to the operation that raised it, never to the
/// bracket: the table keeps its last good state and can still be queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Equal elapsed times inside one comparison scope. Needs an operator fix.
    #[error("ties found, fix before proceeding: {}", join_reports(.reports))]
    TieDetected { reports: Vec<TieReport> },

    #[error("no bracket row for {0}")]
    RowNotFound(LookupKey),

    #[error(
        "roster has {roster} competitors but the bracket has {bracket} populated rows for round {round}"
    )]
    RosterMismatch {
        round: u8,
        roster: usize,
        bracket: usize,
    },

    #[error("invalid result on line {line}: {reason}")]
    InvalidResult { line: usize, reason: String },

    #[error("no results for heat {0}")]
    MissingResults(Heat),

    /// A final-round result that does not say which heat it was raced in.
    #[error("final result for {0} has no heat")]
    UnplacedResult(String),

    #[error("competitor {0} appears more than once in the same result set")]
    DuplicateCompetitor(String),
}

fn join_reports(reports: &[TieReport]) -> String {
    reports
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
