//! Static description of a bracket.
//!
//! A topology lists the round-0 seed groups, one entry per source heat pair
//! (or single source heat) saying where its ranked field goes next, and the
//! explicit exceptions an odd-sized field needs: generated slots to trim and
//! extra slots to inject. It is immutable configuration for an event run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::competitor::Competitor;
use crate::error::ConfigError;
use crate::heat::Heat;
use crate::slot::SlotLabel;

/// How many ranked positions a transition produces and how many move up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Ranked positions that join the winners' heat.
    pub promoted: u8,
    /// Ranked positions generated in total: the non-winners of a pair, or
    /// the whole field of a single-heat feed.
    pub pool_size: u8,
}

impl Policy {
    /// Policy for a heat pair where each heat has `heat_size` racers.
    ///
    /// 5-per-heat promote 3 is the 80 bracket, 4-per-heat promote 2 the 64
    /// bracket, 6-per-heat promote 4 the merged six-person heats.
    pub fn paired(heat_size: u8, promoted: u8) -> Self {
        Self {
            promoted,
            pool_size: heat_size.saturating_mul(2).saturating_sub(2),
        }
    }

    /// Policy for a heat that moves forward as one cohort.
    pub fn cohort(size: u8) -> Self {
        Self {
            promoted: size,
            pool_size: size,
        }
    }

    /// Ranked positions that go to the remainder heat.
    pub fn demoted(&self) -> u8 {
        self.pool_size.saturating_sub(self.promoted)
    }
}

/// Where a source heat's results go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feed {
    /// Two heats ranked together: both winners plus the fastest
    /// `promoted` non-winners go `up`, everyone else goes `down`.
    Pair {
        first: Heat,
        second: Heat,
        up: Heat,
        down: Option<Heat>,
    },
    /// One heat ranked on its own, all places into one heat.
    Single { from: Heat, into: Heat },
}

/// One transition of the bracket with its advancement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEntry {
    pub feed: Feed,
    pub policy: Policy,
}

impl TopologyEntry {
    pub fn pair(first: Heat, second: Heat, up: Heat, down: Heat, policy: Policy) -> Self {
        Self {
            feed: Feed::Pair {
                first,
                second,
                up,
                down: Some(down),
            },
            policy,
        }
    }

    pub fn single(from: Heat, into: Heat, size: u8) -> Self {
        Self {
            feed: Feed::Single { from, into },
            policy: Policy::cohort(size),
        }
    }

    /// Round whose results this entry consumes.
    pub fn source_round(&self) -> u8 {
        match self.feed {
            Feed::Pair { first, .. } => first.round(),
            Feed::Single { from, .. } => from.round(),
        }
    }

    pub fn source_heats(&self) -> Vec<Heat> {
        match self.feed {
            Feed::Pair { first, second, .. } => vec![first, second],
            Feed::Single { from, .. } => vec![from],
        }
    }

    pub fn destination_heats(&self) -> Vec<Heat> {
        match self.feed {
            Feed::Pair { up, down, .. } => std::iter::once(up).chain(down).collect(),
            Feed::Single { into, .. } => vec![into],
        }
    }

    fn describe(&self) -> String {
        match self.feed {
            Feed::Pair { first, second, .. } => format!("pair {}/{}", first, second),
            Feed::Single { from, .. } => format!("heat {}", from),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let Policy {
            promoted,
            pool_size,
        } = self.policy;
        let invalid = |reason: &str| ConfigError::InvalidPolicy {
            entry: self.describe(),
            reason: reason.to_string(),
        };

        if pool_size == 0 {
            return Err(invalid("pool size must be at least 1"));
        }
        if promoted > pool_size {
            return Err(invalid("cannot promote more than the pool holds"));
        }

        match self.feed {
            Feed::Pair {
                first,
                second,
                up,
                down,
            } => {
                if first == second {
                    return Err(ConfigError::DuplicateSource(first));
                }
                if first.round() != second.round() {
                    return Err(ConfigError::SplitPair(first, second));
                }
                if down.is_none() && self.policy.demoted() > 0 {
                    return Err(ConfigError::MissingRemainderHeat(first, second));
                }
                if down == Some(up) {
                    return Err(ConfigError::DuplicateDestination(up));
                }
            }
            Feed::Single { .. } => {
                if promoted != pool_size {
                    return Err(invalid("a single-heat feed moves its whole field"));
                }
            }
        }

        let from = self.source_heats()[0];
        for to in self.destination_heats() {
            if from.round().checked_add(1) != Some(to.round()) {
                return Err(ConfigError::RoundMismatch { from, to });
            }
        }
        Ok(())
    }
}

/// An extra slot placed into a heat after normal generation, for brackets
/// with an odd number of competitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injection {
    pub heat: Heat,
    pub slot: SlotLabel,
    /// Identity written into the row when the bracket is scaffolded.
    pub competitor: Option<Competitor>,
}

/// Complete bracket configuration for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Round-0 seeds grouped by their round 1 heat, in heat-sheet order.
    pub round0: IndexMap<Heat, Vec<u32>>,
    pub entries: Vec<TopologyEntry>,
    /// Generated slots removed again because the field is short.
    pub trims: Vec<SlotLabel>,
    pub injections: Vec<Injection>,
    /// Final-round heats whose official time adds the previous round's time.
    pub combined_finals: Vec<Heat>,
}

impl Topology {
    /// Check the structural invariants: every source heat feeds exactly one
    /// entry, every destination heat is fed by exactly one entry, every
    /// source heat races and every heat short of the final round feeds on.
    ///
    /// Heats race when they hold seeds, receive a feed or take an injection.
    /// A topology without seed groups starts from results alone, so its
    /// lowest source round counts as raced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seeds = HashSet::new();
        for (heat, group) in &self.round0 {
            if heat.round() != 1 {
                return Err(ConfigError::SeedHeatNotFirstRound(*heat));
            }
            for &seed in group {
                if seed == 0 {
                    return Err(ConfigError::InvalidSlotLabel(seed.to_string()));
                }
                if !seeds.insert(seed) {
                    return Err(ConfigError::DuplicateSeed(seed));
                }
            }
        }

        let mut sources = BTreeSet::new();
        let mut destinations = BTreeSet::new();
        for entry in &self.entries {
            entry.validate()?;
            for heat in entry.source_heats() {
                if !sources.insert(heat) {
                    return Err(ConfigError::DuplicateSource(heat));
                }
            }
            for heat in entry.destination_heats() {
                if !destinations.insert(heat) {
                    return Err(ConfigError::DuplicateDestination(heat));
                }
            }
        }

        let mut racing: BTreeSet<Heat> = self
            .round0
            .keys()
            .copied()
            .chain(destinations.iter().copied())
            .chain(self.injections.iter().map(|i| i.heat))
            .collect();
        if self.round0.is_empty() {
            let opening = self.entries.iter().map(TopologyEntry::source_round).min();
            racing.extend(sources.iter().filter(|h| Some(h.round()) == opening));
        }
        if let Some(&heat) = sources.iter().find(|h| !racing.contains(*h)) {
            return Err(ConfigError::SourceNeverRaces(heat));
        }

        let final_round = self.final_round();
        if let Some(&heat) = racing
            .iter()
            .find(|h| h.round() < final_round && !sources.contains(*h))
        {
            return Err(ConfigError::UnconsumedHeat(heat));
        }
        Ok(())
    }

    /// Entries consuming the results of `round`, in configuration order.
    pub fn entries_for_round(&self, round: u8) -> impl Iterator<Item = &TopologyEntry> {
        self.entries
            .iter()
            .filter(move |e| e.source_round() == round)
    }

    /// Last round that has heats.
    pub fn final_round(&self) -> u8 {
        self.entries
            .iter()
            .flat_map(|e| e.destination_heats())
            .chain(self.round0.keys().copied())
            .chain(self.injections.iter().map(|i| i.heat))
            .map(Heat::round)
            .max()
            .unwrap_or(0)
    }

    /// Every heat that races in `round`.
    pub fn heats_in_round(&self, round: u8) -> BTreeSet<Heat> {
        self.round0
            .keys()
            .copied()
            .chain(self.entries.iter().flat_map(|e| e.destination_heats()))
            .chain(self.injections.iter().map(|i| i.heat))
            .filter(|h| h.round() == round)
            .collect()
    }

    pub fn is_combined_final(&self, heat: Heat) -> bool {
        self.combined_finals.contains(&heat)
    }
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod topology_tests;
