//! The bracket table: one row per slot label, the single mutable ledger of an
//! event run.
//!
//! Rows are created once by [`BracketTable::scaffold`] and afterwards only
//! have their competitor and time filled in. Nothing ever deletes or relabels
//! a row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::competitor::Competitor;
use crate::error::{BracketError, LookupKey};
use crate::heat::Heat;
use crate::ingest::HeatResult;
use crate::seed_keys::SeedKeys;
use crate::slot::SlotLabel;
use crate::ties::{ensure_no_ties, tie_report, TieScope};
use crate::time::ElapsedTime;
use crate::topology::Injection;

/// Scheduled start times by heat. Opaque strings, passed through to reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    starts: BTreeMap<Heat, String>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, heat: Heat, start: impl Into<String>) {
        self.starts.insert(heat, start.into());
    }

    pub fn get(&self, heat: Heat) -> Option<&str> {
        self.starts.get(&heat).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

impl FromIterator<(Heat, String)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (Heat, String)>>(iter: I) -> Self {
        Self {
            starts: iter.into_iter().collect(),
        }
    }
}

/// One slot of the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRow {
    pub slot: SlotLabel,
    /// Round the holder of this slot races in next (always `next_heat`'s round).
    pub round: u8,
    pub next_heat: Heat,
    pub next_heat_time: Option<String>,
    pub competitor: Option<Competitor>,
    /// Time that earned the slot, from the round that populated it.
    pub time: Option<ElapsedTime>,
}

impl BracketRow {
    pub fn is_populated(&self) -> bool {
        self.competitor.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    rows: BTreeMap<SlotLabel, BracketRow>,
}

impl BracketTable {
    /// Create one empty row per slot label.
    ///
    /// Heats missing from the schedule simply have no start time.
    pub fn scaffold(keys: &SeedKeys, schedule: &Schedule) -> Self {
        let rows: BTreeMap<SlotLabel, BracketRow> = keys
            .slots()
            .map(|(slot, heat)| {
                let row = BracketRow {
                    slot: *slot,
                    round: heat.round(),
                    next_heat: heat,
                    next_heat_time: schedule.get(heat).map(str::to_string),
                    competitor: None,
                    time: None,
                };
                (*slot, row)
            })
            .collect();

        let unscheduled = rows
            .values()
            .filter(|r| r.next_heat_time.is_none())
            .count();
        tracing::info!(rows = rows.len(), unscheduled, "scaffolded bracket table");

        Self { rows }
    }

    /// Write the identities that injections carry with them.
    pub fn apply_injections(&mut self, injections: &[Injection]) -> Result<(), BracketError> {
        for injection in injections {
            if let Some(competitor) = &injection.competitor {
                let row = self.row_mut(&injection.slot)?;
                row.competitor = Some(competitor.clone());
                tracing::info!(slot = %injection.slot, %competitor, "injected competitor");
            }
        }
        Ok(())
    }

    /// Seed the bracket from time-trial results.
    ///
    /// The fastest time gets seed 1 and so on without gaps. Rows are
    /// addressed directly by seed number; nothing is written if the field
    /// has ties or more finishers than the bracket has seeds.
    pub fn seed_round0(&mut self, time_trial: &[HeatResult]) -> Result<usize, BracketError> {
        let report = tie_report(TieScope::TimeTrial, time_trial.iter().map(|r| r.time));
        ensure_no_ties(report.into_iter().collect())?;

        let mut ordered: Vec<&HeatResult> = time_trial.iter().collect();
        ordered.sort_by_key(|r| r.time);

        let seeded: Vec<(SlotLabel, &HeatResult)> = ordered
            .into_iter()
            .enumerate()
            .map(|(i, result)| (SlotLabel::Seed(i as u32 + 1), result))
            .collect();

        for (slot, _) in &seeded {
            self.row(slot)?;
        }
        for (slot, result) in &seeded {
            self.fill(slot, &result.competitor, result.time)?;
        }

        tracing::info!(seeded = seeded.len(), "seeded round 0 from time trial");
        Ok(seeded.len())
    }

    /// Row for an exact slot label.
    pub fn row(&self, slot: &SlotLabel) -> Result<&BracketRow, BracketError> {
        self.rows
            .get(slot)
            .ok_or(BracketError::RowNotFound(LookupKey::Slot(*slot)))
    }

    fn row_mut(&mut self, slot: &SlotLabel) -> Result<&mut BracketRow, BracketError> {
        self.rows
            .get_mut(slot)
            .ok_or(BracketError::RowNotFound(LookupKey::Slot(*slot)))
    }

    pub(crate) fn fill(
        &mut self,
        slot: &SlotLabel,
        competitor: &Competitor,
        time: ElapsedTime,
    ) -> Result<(), BracketError> {
        let row = self.row_mut(slot)?;
        row.competitor = Some(competitor.clone());
        row.time = Some(time);
        Ok(())
    }

    pub(crate) fn clear(&mut self, slot: &SlotLabel) -> Result<(), BracketError> {
        let row = self.row_mut(slot)?;
        row.competitor = None;
        row.time = None;
        Ok(())
    }

    /// All rows racing in `heat`, in slot label order.
    pub fn rows_for_heat(&self, heat: Heat) -> Vec<&BracketRow> {
        self.rows.values().filter(|r| r.next_heat == heat).collect()
    }

    /// Rows racing in `round` that have a competitor assigned.
    pub fn populated_rows(&self, round: u8) -> Vec<&BracketRow> {
        self.rows
            .values()
            .filter(|r| r.round == round && r.is_populated())
            .collect()
    }

    /// Row held by `competitor` among those racing in `round`.
    pub fn find_competitor(&self, round: u8, competitor: &Competitor) -> Option<&BracketRow> {
        self.rows
            .values()
            .find(|r| r.round == round && r.competitor.as_ref() == Some(competitor))
    }

    pub fn rows(&self) -> impl Iterator<Item = &BracketRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod table_tests;
