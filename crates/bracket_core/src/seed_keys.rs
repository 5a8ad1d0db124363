//! Seed key builder.
//!
//! Derives, from a topology alone, the ordered list of slot labels racing in
//! each heat and the inverse map from slot label to heat. Promotion ranks are
//! read positionally from these lists, so generation order is kept explicitly
//! in ordered maps rather than left to container iteration order.

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::heat::Heat;
use crate::slot::SlotLabel;
use crate::topology::{Feed, Topology, TopologyEntry};

/// Heat ↔ slot label mappings for one bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedKeys {
    heat_to_slots: IndexMap<Heat, Vec<SlotLabel>>,
    slot_to_heat: IndexMap<SlotLabel, Heat>,
}

impl SeedKeys {
    /// Build both mappings from scratch.
    ///
    /// Runs, in order: round-0 seed groups, topology entries, trims,
    /// injections. Any slot label landing in two places aborts the build.
    pub fn build(topology: &Topology) -> Result<Self, ConfigError> {
        topology.validate()?;

        let mut heat_to_slots: IndexMap<Heat, Vec<SlotLabel>> = IndexMap::new();

        for (heat, seeds) in &topology.round0 {
            heat_to_slots
                .entry(*heat)
                .or_default()
                .extend(seeds.iter().map(|&seed| SlotLabel::Seed(seed)));
        }

        for entry in &topology.entries {
            for (heat, slot) in entry_slots(entry) {
                heat_to_slots.entry(heat).or_default().push(slot);
            }
        }

        for trim in &topology.trims {
            let removed = heat_to_slots.values_mut().any(|slots| {
                match slots.iter().position(|s| s == trim) {
                    Some(index) => {
                        slots.remove(index);
                        true
                    }
                    None => false,
                }
            });
            if !removed {
                return Err(ConfigError::UnknownTrim(*trim));
            }
        }

        for injection in &topology.injections {
            heat_to_slots
                .entry(injection.heat)
                .or_default()
                .push(injection.slot);
        }

        let mut slot_to_heat = IndexMap::new();
        for (heat, slots) in &heat_to_slots {
            for slot in slots {
                if let Some(first) = slot_to_heat.insert(*slot, *heat) {
                    return Err(ConfigError::SlotCollision {
                        slot: *slot,
                        first,
                        second: *heat,
                    });
                }
            }
        }

        tracing::info!(
            heats = heat_to_slots.len(),
            slots = slot_to_heat.len(),
            "built seed keys"
        );

        Ok(Self {
            heat_to_slots,
            slot_to_heat,
        })
    }

    /// Slot labels racing in `heat`, in generation order.
    pub fn slots_for(&self, heat: Heat) -> &[SlotLabel] {
        self.heat_to_slots
            .get(&heat)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Heat the holder of `slot` races in next.
    pub fn heat_of(&self, slot: &SlotLabel) -> Option<Heat> {
        self.slot_to_heat.get(slot).copied()
    }

    pub fn heats(&self) -> impl Iterator<Item = (Heat, &[SlotLabel])> {
        self.heat_to_slots
            .iter()
            .map(|(heat, slots)| (*heat, slots.as_slice()))
    }

    pub fn slots(&self) -> impl Iterator<Item = (&SlotLabel, Heat)> {
        self.slot_to_heat.iter().map(|(slot, heat)| (slot, *heat))
    }

    pub fn len(&self) -> usize {
        self.slot_to_heat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slot_to_heat.is_empty()
    }
}

/// Slots one topology entry generates, each with the heat it feeds.
pub fn entry_slots(entry: &TopologyEntry) -> Vec<(Heat, SlotLabel)> {
    let policy = entry.policy;
    match entry.feed {
        Feed::Pair {
            first,
            second,
            up,
            down,
        } => {
            let pooled = |rank| SlotLabel::Pooled {
                first,
                second,
                rank,
            };
            let mut slots = vec![
                (up, SlotLabel::Winner(first)),
                (up, SlotLabel::Winner(second)),
            ];
            slots.extend((1..=policy.promoted).map(|rank| (up, pooled(rank))));
            if let Some(down) = down {
                slots.extend(
                    (1..=policy.pool_size)
                        .skip(policy.promoted as usize)
                        .map(|rank| (down, pooled(rank))),
                );
            }
            slots
        }
        Feed::Single { from, into } => (1..=policy.pool_size)
            .map(|rank| (into, SlotLabel::Single { heat: from, rank }))
            .collect(),
    }
}

#[cfg(test)]
#[path = "seed_keys_tests.rs"]
mod seed_keys_tests;
