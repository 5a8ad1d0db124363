//! Slot labels: the atomic seed identities of a bracket.
//!
//! Round-0 seeds are plain integers. Every later seed names the place it was
//! earned: `W101` is the winner of heat 101, `101/102-Q3` the third fastest
//! non-winner pooled across heats 101 and 102, and `402-Q5` the fifth place
//! of heat 402 when that heat feeds the next round on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::heat::Heat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotLabel {
    /// Round-0 seed from the time trial (1 = fastest).
    Seed(u32),
    /// Winner of a heat.
    Winner(Heat),
    /// k-th fastest non-winner of a heat pair, winners removed.
    Pooled { first: Heat, second: Heat, rank: u8 },
    /// k-th place of a single heat feeding forward as one cohort.
    Single { heat: Heat, rank: u8 },
}

impl SlotLabel {
    /// Promotion rank for `-Q<k>` labels.
    pub fn rank(&self) -> Option<u8> {
        match self {
            SlotLabel::Pooled { rank, .. } | SlotLabel::Single { rank, .. } => Some(*rank),
            SlotLabel::Seed(_) | SlotLabel::Winner(_) => None,
        }
    }

    /// Round whose results fill this slot (0 for time-trial seeds).
    pub fn earned_in_round(&self) -> u8 {
        match self {
            SlotLabel::Seed(_) => 0,
            SlotLabel::Winner(heat) | SlotLabel::Single { heat, .. } => heat.round(),
            SlotLabel::Pooled { first, .. } => first.round(),
        }
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotLabel::Seed(seed) => write!(f, "{}", seed),
            SlotLabel::Winner(heat) => write!(f, "W{}", heat),
            SlotLabel::Pooled {
                first,
                second,
                rank,
            } => write!(f, "{}/{}-Q{}", first, second, rank),
            SlotLabel::Single { heat, rank } => write!(f, "{}-Q{}", heat, rank),
        }
    }
}

impl FromStr for SlotLabel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let invalid = || ConfigError::InvalidSlotLabel(s.to_string());

        if let Some(heat) = label.strip_prefix('W') {
            let number: u32 = heat.parse().map_err(|_| invalid())?;
            return Ok(SlotLabel::Winner(Heat::from_number(number)?));
        }

        if let Some((heats, rank)) = label.split_once("-Q") {
            let rank: u8 = rank.parse().map_err(|_| invalid())?;
            if rank == 0 {
                return Err(invalid());
            }
            return match heats.split_once('/') {
                Some((first, second)) => Ok(SlotLabel::Pooled {
                    first: parse_heat_number(first).ok_or_else(invalid)??,
                    second: parse_heat_number(second).ok_or_else(invalid)??,
                    rank,
                }),
                None => Ok(SlotLabel::Single {
                    heat: parse_heat_number(heats).ok_or_else(invalid)??,
                    rank,
                }),
            };
        }

        let seed: u32 = label.parse().map_err(|_| invalid())?;
        if seed == 0 {
            return Err(invalid());
        }
        Ok(SlotLabel::Seed(seed))
    }
}

fn parse_heat_number(s: &str) -> Option<Result<Heat, ConfigError>> {
    s.parse::<u32>().ok().map(Heat::from_number)
}

impl TryFrom<String> for SlotLabel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotLabel> for String {
    fn from(slot: SlotLabel) -> String {
        slot.to_string()
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod slot_tests;
