//! Heat-based bracket progression.
//!
//! An event starts with a time trial that seeds every competitor, then runs
//! rounds of heats. After each round the field is re-ranked purely on
//! elapsed time and moved into the next round's heats according to a fixed
//! topology. The last round may combine two legs into one official time.
//!
//! The flow for one event:
//!
//! 1. [`SeedKeys::build`] derives every slot label from a [`Topology`].
//! 2. [`BracketTable::scaffold`] creates one row per slot.
//! 3. [`BracketTable::seed_round0`] places the time-trial field.
//! 4. [`advance_round`] moves each round's results into the next round.
//! 5. [`score_finals`] ranks the final round.
//!
//! Nothing here reads or writes files.

pub mod advance;
pub mod competitor;
pub mod error;
pub mod finals;
pub mod heat;
pub mod ingest;
pub mod roster;
pub mod seed_keys;
pub mod slot;
pub mod table;
pub mod ties;
pub mod time;
pub mod topology;

pub use advance::{advance_round, RoundSummary};
pub use competitor::Competitor;
pub use error::{BracketError, ConfigError, LookupKey};
pub use finals::{score_finals, FinalStanding};
pub use heat::Heat;
pub use ingest::{normalize_heat_results, normalize_time_trial, HeatResult, RawResult};
pub use roster::{roster_assignments, RosterAssignment};
pub use seed_keys::SeedKeys;
pub use slot::SlotLabel;
pub use table::{BracketRow, BracketTable, Schedule};
pub use ties::{check_ties, TieCheck, TieReport, TieScope};
pub use time::{ElapsedTime, ParseTimeError};
pub use topology::{Feed, Injection, Policy, Topology, TopologyEntry};
