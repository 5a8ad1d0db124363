//! Cross-reference of an external roster against the bracket.
//!
//! The scheduling tool keeps its own list of competitors. Before the next
//! round is published, each listed competitor is looked up in the bracket to
//! find the heat they race in.

use serde::{Deserialize, Serialize};

use crate::competitor::Competitor;
use crate::error::{BracketError, LookupKey};
use crate::heat::Heat;
use crate::table::BracketTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAssignment {
    pub competitor: Competitor,
    pub heat: Heat,
}

/// Next heat for every roster entry racing in `round`.
///
/// The roster must list exactly as many competitors as the bracket has
/// populated rows for the round. Counts are compared before any lookup so
/// that a short or padded roster is reported as such.
pub fn roster_assignments(
    table: &BracketTable,
    round: u8,
    roster: &[Competitor],
) -> Result<Vec<RosterAssignment>, BracketError> {
    let populated = table.populated_rows(round).len();
    if populated != roster.len() {
        return Err(BracketError::RosterMismatch {
            round,
            roster: roster.len(),
            bracket: populated,
        });
    }

    let assignments = roster
        .iter()
        .map(|competitor| {
            table
                .find_competitor(round, competitor)
                .map(|row| RosterAssignment {
                    competitor: competitor.clone(),
                    heat: row.next_heat,
                })
                .ok_or_else(|| {
                    BracketError::RowNotFound(LookupKey::Competitor {
                        name: competitor.to_string(),
                        round,
                    })
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(round, assigned = assignments.len(), "cross-referenced roster");
    Ok(assignments)
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod roster_tests;
