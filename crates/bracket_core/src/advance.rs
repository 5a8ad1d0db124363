//! Round advancement.
//!
//! For every topology entry fed by the round, results are ranked purely by
//! elapsed time and written into the next round's slots:
//!
//! - paired heats: each heat's fastest takes `W<heat>`, the rest are pooled,
//!   re-sorted and assigned `<A>/<B>-Q1..` in order;
//! - single-heat feeds: the heat's field is assigned `<heat>-Q1..` directly.
//!
//! The whole round is planned before anything is written. If any scope has
//! tied times or a planned slot is missing, the round halts and the table is
//! left exactly as it was.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::BracketError;
use crate::heat::Heat;
use crate::ingest::HeatResult;
use crate::slot::SlotLabel;
use crate::table::BracketTable;
use crate::ties::{ensure_no_ties, tie_report, TieReport, TieScope};
use crate::topology::{Feed, Policy, Topology, TopologyEntry};

/// What one call to [`advance_round`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u8,
    /// Topology entries processed.
    pub entries: usize,
    /// Slots now holding a competitor.
    pub filled: usize,
    /// Slots emptied because this input no longer fills them.
    pub cleared: usize,
    /// Results from heats no entry of this round consumes.
    pub ignored: usize,
}

/// A planned write: a result for the slot, or `None` to leave it empty.
struct Placement<'a> {
    slot: SlotLabel,
    result: Option<&'a HeatResult>,
}

enum Plan<'a> {
    Ready(Vec<Placement<'a>>),
    Tied(TieReport),
}

/// Advance every heat of `round` into the next round's slots.
///
/// Re-running with the same results produces the same table.
pub fn advance_round(
    table: &mut BracketTable,
    topology: &Topology,
    round: u8,
    results: &[HeatResult],
) -> Result<RoundSummary, BracketError> {
    let entries: Vec<&TopologyEntry> = topology.entries_for_round(round).collect();
    if entries.is_empty() {
        tracing::warn!(round, "no topology entries consume this round");
    }

    let by_heat = group_by_heat(results);
    let consumed: HashSet<Heat> = entries.iter().flat_map(|e| e.source_heats()).collect();
    let ignored: usize = by_heat
        .iter()
        .filter(|(heat, _)| !consumed.contains(*heat))
        .map(|(heat, rows)| {
            tracing::warn!(%heat, rows = rows.len(), round, "ignoring results for unmatched heat");
            rows.len()
        })
        .sum();
    let ignored = ignored + results.iter().filter(|r| r.heat.is_none()).count();

    let mut placements = Vec::new();
    let mut ties = Vec::new();
    for entry in &entries {
        match plan_entry(entry, &by_heat)? {
            Plan::Ready(planned) => placements.extend(planned),
            Plan::Tied(report) => ties.push(report),
        }
    }
    ensure_no_ties(ties)?;

    // Empty trailing ranks only matter where the slot exists; trimmed ones
    // are skipped. A result aimed at a missing slot is an input mismatch.
    placements.retain(|p| p.result.is_some() || table.row(&p.slot).is_ok());
    for placement in &placements {
        table.row(&placement.slot)?;
    }

    let mut summary = RoundSummary {
        round,
        entries: entries.len(),
        filled: 0,
        cleared: 0,
        ignored,
    };
    for placement in &placements {
        match placement.result {
            Some(result) => {
                tracing::debug!(
                    slot = %placement.slot,
                    competitor = %result.competitor,
                    time = %result.time,
                    "placed"
                );
                table.fill(&placement.slot, &result.competitor, result.time)?;
                summary.filled += 1;
            }
            None => {
                table.clear(&placement.slot)?;
                summary.cleared += 1;
            }
        }
    }

    tracing::info!(
        round,
        entries = summary.entries,
        filled = summary.filled,
        ignored = summary.ignored,
        "advanced round"
    );
    Ok(summary)
}

/// Results per heat, each list sorted ascending by time.
fn group_by_heat(results: &[HeatResult]) -> BTreeMap<Heat, Vec<&HeatResult>> {
    let mut by_heat: BTreeMap<Heat, Vec<&HeatResult>> = BTreeMap::new();
    for result in results {
        if let Some(heat) = result.heat {
            by_heat.entry(heat).or_default().push(result);
        }
    }
    for rows in by_heat.values_mut() {
        rows.sort_by_key(|r| r.time);
    }
    by_heat
}

fn heat_results<'a, 'b>(
    by_heat: &'b BTreeMap<Heat, Vec<&'a HeatResult>>,
    heat: Heat,
) -> Result<&'b [&'a HeatResult], BracketError> {
    by_heat
        .get(&heat)
        .map(Vec::as_slice)
        .filter(|rows| !rows.is_empty())
        .ok_or(BracketError::MissingResults(heat))
}

fn plan_entry<'a>(
    entry: &TopologyEntry,
    by_heat: &BTreeMap<Heat, Vec<&'a HeatResult>>,
) -> Result<Plan<'a>, BracketError> {
    match entry.feed {
        Feed::Pair { first, second, .. } => {
            let first_rows = heat_results(by_heat, first)?;
            let second_rows = heat_results(by_heat, second)?;

            let scope = TieScope::HeatPair(first, second);
            let times = first_rows.iter().chain(second_rows).map(|r| r.time);
            if let Some(report) = tie_report(scope, times) {
                return Ok(Plan::Tied(report));
            }

            let mut planned = vec![
                Placement {
                    slot: SlotLabel::Winner(first),
                    result: Some(first_rows[0]),
                },
                Placement {
                    slot: SlotLabel::Winner(second),
                    result: Some(second_rows[0]),
                },
            ];

            let mut pool: Vec<&HeatResult> = first_rows[1..]
                .iter()
                .chain(&second_rows[1..])
                .copied()
                .collect();
            pool.sort_by_key(|r| r.time);

            planned.extend(ranked(&pool, entry.policy, |rank| SlotLabel::Pooled {
                first,
                second,
                rank,
            }));
            Ok(Plan::Ready(planned))
        }
        Feed::Single { from, .. } => {
            let rows = heat_results(by_heat, from)?;
            if let Some(report) = tie_report(TieScope::Heat(from), rows.iter().map(|r| r.time)) {
                return Ok(Plan::Tied(report));
            }
            Ok(Plan::Ready(ranked(rows, entry.policy, |rank| {
                SlotLabel::Single { heat: from, rank }
            })))
        }
    }
}

/// Assign rank 1.. positionally, covering every rank the policy generates so
/// that ranks this input leaves empty are cleared.
fn ranked<'a, F>(sorted: &[&'a HeatResult], policy: Policy, label: F) -> Vec<Placement<'a>>
where
    F: Fn(u8) -> SlotLabel,
{
    let ranks = sorted.len().max(policy.pool_size as usize);
    (0..ranks)
        .map(|i| Placement {
            slot: label(u8::try_from(i + 1).unwrap_or(u8::MAX)),
            result: sorted.get(i).copied(),
        })
        .collect()
}

#[cfg(test)]
#[path = "advance_tests.rs"]
mod advance_tests;
