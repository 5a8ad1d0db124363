//! Finals scoring.
//!
//! In two-leg (combined) final heats a competitor's official time is the sum
//! of their final-round time and their previous-round time. The previous
//! round is matched by name, since the slot labels do not carry identity
//! across the last round boundary. Every other final heat uses the
//! final-round time as is.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::competitor::Competitor;
use crate::error::{BracketError, LookupKey};
use crate::heat::Heat;
use crate::ingest::HeatResult;
use crate::ties::{ensure_no_ties, tie_report, TieScope};
use crate::time::ElapsedTime;

/// One line of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStanding {
    /// Overall position, counting from the highest-numbered heat down.
    pub position: usize,
    /// Position within the heat.
    pub heat_position: usize,
    pub heat: Heat,
    pub competitor: Competitor,
    /// Final-round time.
    pub leg_time: ElapsedTime,
    /// Previous-round time, for combined heats only.
    pub prior_time: Option<ElapsedTime>,
    pub official_time: ElapsedTime,
}

impl FinalStanding {
    pub fn is_combined(&self) -> bool {
        self.prior_time.is_some()
    }
}

/// Score and rank the final round.
///
/// Standings are ordered by heat descending, then official time ascending.
/// Any tie on official time inside a heat rejects the whole scoring.
pub fn score_finals(
    current: &[HeatResult],
    prior: &[HeatResult],
    combined: &[Heat],
) -> Result<Vec<FinalStanding>, BracketError> {
    let mut prior_by_name: HashMap<&Competitor, Vec<&HeatResult>> = HashMap::new();
    for result in prior {
        prior_by_name.entry(&result.competitor).or_default().push(result);
    }

    let mut by_heat: BTreeMap<Heat, Vec<FinalStanding>> = BTreeMap::new();
    for result in current {
        let heat = result
            .heat
            .ok_or_else(|| BracketError::UnplacedResult(result.competitor.to_string()))?;

        let prior_time = if combined.contains(&heat) {
            Some(prior_leg(&prior_by_name, &result.competitor, heat)?)
        } else {
            None
        };
        let official_time = prior_time.map_or(result.time, |p| p + result.time);

        by_heat.entry(heat).or_default().push(FinalStanding {
            position: 0,
            heat_position: 0,
            heat,
            competitor: result.competitor.clone(),
            leg_time: result.time,
            prior_time,
            official_time,
        });
    }

    let reports = by_heat
        .iter()
        .filter_map(|(heat, rows)| {
            tie_report(TieScope::Heat(*heat), rows.iter().map(|r| r.official_time))
        })
        .collect();
    ensure_no_ties(reports)?;

    let mut standings = Vec::with_capacity(current.len());
    for (_, mut rows) in by_heat.into_iter().rev() {
        rows.sort_by_key(|r| r.official_time);
        for (i, mut row) in rows.into_iter().enumerate() {
            row.heat_position = i + 1;
            row.position = standings.len() + 1;
            standings.push(row);
        }
    }

    tracing::info!(
        competitors = standings.len(),
        combined_heats = combined.len(),
        "scored finals"
    );
    Ok(standings)
}

fn prior_leg(
    prior_by_name: &HashMap<&Competitor, Vec<&HeatResult>>,
    competitor: &Competitor,
    heat: Heat,
) -> Result<ElapsedTime, BracketError> {
    match prior_by_name.get(competitor).map(Vec::as_slice) {
        Some([only]) => Ok(only.time),
        Some([]) | None => Err(BracketError::RowNotFound(LookupKey::Competitor {
            name: competitor.to_string(),
            round: heat.round().saturating_sub(1),
        })),
        Some(_) => Err(BracketError::DuplicateCompetitor(competitor.to_string())),
    }
}

#[cfg(test)]
#[path = "finals_tests.rs"]
mod finals_tests;
