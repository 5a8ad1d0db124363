//! Event runner for heat-based brackets
//!
//! This crate provides the file-facing side of an event:
//! - Loading the event definition (TOML)
//! - Importing timing system exports and scheduling rosters (CSV)
//! - Replaying the bracket from the results raced so far
//! - Heat sheets, final standings and roster export
//!
//! # Usage
//!
//! ```bash
//! # Heat sheet for round 2 after round 1 has been raced
//! cargo run -p tournament -- heats --config events/sart-2017-80.toml \
//!     --time-trial tt.csv --results r1.csv --round 2
//!
//! # Final standings once every round is in
//! cargo run -p tournament -- standings --config events/sart-2017-80.toml \
//!     --time-trial tt.csv --results r1.csv --results r2.csv \
//!     --results r3.csv --results r4.csv --results r5.csv
//! ```

mod config;
mod error;
mod event;
mod import;
mod report;
mod roster;

pub use config::*;
pub use error::*;
pub use event::*;
pub use import::*;
pub use report::*;
pub use roster::*;
