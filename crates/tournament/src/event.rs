//! Event replay
//!
//! There is no saved state between runs. Every command rebuilds the bracket
//! from the event definition, the time trial and the results of each round
//! raced so far. Advancement is idempotent, so replaying the same files
//! always gives the same table.

use std::path::Path;

use bracket_core::{
    advance_round, score_finals, BracketTable, FinalStanding, HeatResult, RoundSummary, Schedule,
    SeedKeys, Topology,
};

use crate::config::EventConfig;
use crate::error::EventError;
use crate::import::{load_heat_results, load_time_trial};

/// Results of one event run, in race order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceResults {
    pub time_trial: Vec<HeatResult>,
    /// `rounds[0]` holds round 1 results
    pub rounds: Vec<Vec<HeatResult>>,
}

impl RaceResults {
    pub fn load(
        config: &EventConfig,
        time_trial: &Path,
        rounds: &[impl AsRef<Path>],
    ) -> Result<Self, EventError> {
        let time_trial = load_time_trial(time_trial, &config.columns)?;
        let rounds = rounds
            .iter()
            .map(|path| load_heat_results(path.as_ref(), &config.columns))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { time_trial, rounds })
    }

    pub fn round(&self, round: u8) -> Option<&[HeatResult]> {
        let index = usize::from(round).checked_sub(1)?;
        self.rounds.get(index).map(Vec::as_slice)
    }
}

/// A configured event, ready to replay.
#[derive(Debug, Clone)]
pub struct Event {
    pub config: EventConfig,
    pub topology: Topology,
    pub keys: SeedKeys,
    pub schedule: Schedule,
}

impl Event {
    pub fn new(config: EventConfig) -> Result<Self, EventError> {
        let topology = config.topology()?;
        let keys = SeedKeys::build(&topology)?;
        let schedule = config.schedule()?;
        tracing::info!(
            event = %config.name,
            slots = keys.len(),
            final_round = topology.final_round(),
            "event configured"
        );
        Ok(Self {
            config,
            topology,
            keys,
            schedule,
        })
    }

    pub fn load(path: &Path) -> Result<Self, EventError> {
        Self::new(EventConfig::load(path)?)
    }

    pub fn final_round(&self) -> u8 {
        self.topology.final_round()
    }

    /// A fresh table with injected identities in place.
    pub fn scaffold(&self) -> Result<BracketTable, EventError> {
        let mut table = BracketTable::scaffold(&self.keys, &self.schedule);
        table.apply_injections(&self.topology.injections)?;
        Ok(table)
    }

    /// Seed the table and advance every round that has results.
    ///
    /// Final-round results are left for [`Event::standings`].
    pub fn replay(
        &self,
        results: &RaceResults,
    ) -> Result<(BracketTable, Vec<RoundSummary>), EventError> {
        let mut table = self.scaffold()?;
        table.seed_round0(&results.time_trial)?;

        let mut summaries = Vec::new();
        for (index, round_results) in results.rounds.iter().enumerate() {
            let round = u8::try_from(index + 1).unwrap_or(u8::MAX);
            if round >= self.final_round() {
                break;
            }
            summaries.push(advance_round(
                &mut table,
                &self.topology,
                round,
                round_results,
            )?);
        }
        Ok((table, summaries))
    }

    /// Score the final round against the round before it.
    pub fn standings(&self, results: &RaceResults) -> Result<Vec<FinalStanding>, EventError> {
        let last = self.final_round();
        let current = results.round(last).ok_or(EventError::MissingRound(last))?;
        let prior: &[HeatResult] = if self.topology.combined_finals.is_empty() {
            &[]
        } else {
            let previous = last.saturating_sub(1);
            results
                .round(previous)
                .ok_or(EventError::MissingRound(previous))?
        };
        Ok(score_finals(
            current,
            prior,
            &self.topology.combined_finals,
        )?)
    }
}
