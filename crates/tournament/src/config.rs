//! Event configuration
//!
//! One TOML file describes an event: the CSV column names of the timing
//! system, the default advancement policy, the seed groups, every
//! transition between rounds, odd-field exceptions, the start schedule and
//! which final heats are two-leg.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use bracket_core::{
    Competitor, Feed, Heat, Injection, Policy, Schedule, SlotLabel, Topology, TopologyEntry,
};

use crate::error::EventError;

/// Column headers of the timing system export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub surname: String,
    pub first_name: String,
    pub time: String,
    pub heat: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            surname: "Surname".to_string(),
            first_name: "First name".to_string(),
            time: "Time".to_string(),
            heat: "Entry cl. No".to_string(),
        }
    }
}

/// Column headers of the scheduling tool's roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterColumns {
    pub surname: String,
    pub first_name: String,
    /// Filled with the long heat identifier, e.g. `Heat 204`
    pub long: String,
    /// Filled with the short heat identifier, e.g. `H204`
    pub short: String,
    /// Filled with the bare heat number
    pub class_no: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            surname: "Surname".to_string(),
            first_name: "First name".to_string(),
            long: "Long".to_string(),
            short: "Short".to_string(),
            class_no: "Cl. no.".to_string(),
        }
    }
}

/// Heat size and promotion count for paired transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub heat_size: u8,
    pub promoted: u8,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            heat_size: 5,
            promoted: 3,
        }
    }
}

impl PolicyConfig {
    pub fn policy(&self) -> Policy {
        Policy::paired(self.heat_size, self.promoted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedGroup {
    pub heat: Heat,
    pub seeds: Vec<u32>,
}

/// A transition between rounds.
///
/// Two `from` heats with `up` (and usually `down`) is a paired transition.
/// One `from` heat with `into` moves the whole heat forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    pub from: Vec<Heat>,
    pub up: Option<Heat>,
    pub down: Option<Heat>,
    pub into: Option<Heat>,
    /// Overrides the event's default policy for this transition
    pub policy: Option<PolicyConfig>,
    /// Field size of a single-heat transition
    pub size: Option<u8>,
}

impl TransitionConfig {
    fn entry(&self, index: usize, default: PolicyConfig) -> Result<TopologyEntry, EventError> {
        let invalid = |reason: &str| EventError::InvalidTransition {
            index,
            reason: reason.to_string(),
        };
        let policy = self.policy.unwrap_or(default);

        match (self.from.as_slice(), self.into) {
            ([first, second], None) => {
                let up = self.up.ok_or_else(|| invalid("paired transition needs `up`"))?;
                Ok(TopologyEntry {
                    feed: Feed::Pair {
                        first: *first,
                        second: *second,
                        up,
                        down: self.down,
                    },
                    policy: policy.policy(),
                })
            }
            ([from], Some(into)) => {
                if self.up.is_some() || self.down.is_some() {
                    return Err(invalid("single-heat transition takes `into`, not `up`/`down`"));
                }
                let size = self.size.unwrap_or(policy.heat_size);
                Ok(TopologyEntry::single(*from, into, size))
            }
            ([_, _], Some(_)) => Err(invalid("paired transition takes `up`/`down`, not `into`")),
            ([_], None) => Err(invalid("single-heat transition needs `into`")),
            _ => Err(invalid("`from` must name one or two heats")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionConfig {
    pub heat: Heat,
    pub slot: SlotLabel,
    pub first_name: Option<String>,
    pub surname: Option<String>,
}

impl InjectionConfig {
    fn injection(&self) -> Injection {
        let competitor = match (&self.first_name, &self.surname) {
            (None, None) => None,
            (first, surname) => Some(Competitor::new(
                first.as_deref().unwrap_or_default(),
                surname.as_deref().unwrap_or_default(),
            )),
        };
        Injection {
            heat: self.heat,
            slot: self.slot,
            competitor,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalsConfig {
    /// Final heats scored on the sum of the last two rounds
    #[serde(default)]
    pub combined: Vec<Heat>,
}

/// Complete event definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub name: String,
    #[serde(default)]
    pub columns: Columns,
    #[serde(default)]
    pub roster: RosterColumns,
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Generated slots removed for a short field
    #[serde(default)]
    pub trims: Vec<SlotLabel>,
    #[serde(default)]
    pub round0: Vec<SeedGroup>,
    #[serde(default, rename = "transition")]
    pub transitions: Vec<TransitionConfig>,
    #[serde(default, rename = "injection")]
    pub injections: Vec<InjectionConfig>,
    /// Heat -> start time, keyed by heat number
    #[serde(default)]
    pub schedule: BTreeMap<String, String>,
    #[serde(default)]
    pub finals: FinalsConfig,
}

impl EventConfig {
    /// Load an event definition from a TOML file
    pub fn load(path: &Path) -> Result<Self, EventError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| EventError::io(path, e))?;
        toml::from_str(&contents).map_err(|source| EventError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build and validate the bracket topology.
    pub fn topology(&self) -> Result<Topology, EventError> {
        let mut topology = Topology::default();
        for group in &self.round0 {
            topology
                .round0
                .entry(group.heat)
                .or_default()
                .extend(&group.seeds);
        }
        for (index, transition) in self.transitions.iter().enumerate() {
            topology
                .entries
                .push(transition.entry(index + 1, self.policy)?);
        }
        topology.trims = self.trims.clone();
        topology.injections = self.injections.iter().map(InjectionConfig::injection).collect();
        topology.combined_finals = self.finals.combined.clone();

        topology.validate()?;
        Ok(topology)
    }

    pub fn schedule(&self) -> Result<Schedule, EventError> {
        self.schedule
            .iter()
            .map(|(heat, start)| {
                heat.parse::<Heat>()
                    .map(|h| (h, start.clone()))
                    .map_err(|_| EventError::InvalidSchedule(heat.clone()))
            })
            .collect()
    }
}
