//! Heat identifiers.
//!
//! A heat is numbered `round * 100 + ordinal` (heat 204 is the fourth heat of
//! round 2), so the round can always be recovered from the identifier alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// One timed race grouping within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Heat {
    round: u8,
    ordinal: u8,
}

impl Heat {
    /// Largest ordinal that still fits the `round * 100 + ordinal` encoding.
    pub const MAX_ORDINAL: u8 = 99;

    pub fn new(round: u8, ordinal: u8) -> Result<Self, ConfigError> {
        if round == 0 || ordinal == 0 || ordinal > Self::MAX_ORDINAL {
            return Err(ConfigError::InvalidHeat(
                round as u32 * 100 + ordinal as u32,
            ));
        }
        Ok(Self { round, ordinal })
    }

    /// Decode a heat number such as `204`.
    pub fn from_number(number: u32) -> Result<Self, ConfigError> {
        let round = number / 100;
        let ordinal = number % 100;
        if round == 0 || round > u8::MAX as u32 || ordinal == 0 {
            return Err(ConfigError::InvalidHeat(number));
        }
        Ok(Self {
            round: round as u8,
            ordinal: ordinal as u8,
        })
    }

    pub fn number(self) -> u32 {
        self.round as u32 * 100 + self.ordinal as u32
    }

    pub fn round(self) -> u8 {
        self.round
    }

    pub fn ordinal(self) -> u8 {
        self.ordinal
    }

    /// Identifier used on heat sheets and in scheduling imports, e.g. `Heat 204`.
    pub fn long_id(self) -> String {
        format!("Heat {}", self.number())
    }

    /// Compact identifier used by the scheduling tool, e.g. `H204`.
    pub fn short_id(self) -> String {
        format!("H{}", self.number())
    }
}

impl TryFrom<u32> for Heat {
    type Error = ConfigError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Heat::from_number(number)
    }
}

impl From<Heat> for u32 {
    fn from(heat: Heat) -> u32 {
        heat.number()
    }
}

impl fmt::Display for Heat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Accepts `204`, `H204` and `Heat 204`.
impl FromStr for Heat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("Heat")
            .or_else(|| trimmed.strip_prefix('H'))
            .unwrap_or(trimmed)
            .trim();
        let number: u32 = digits
            .parse()
            .map_err(|_| ConfigError::UnparsableHeat(s.to_string()))?;
        Heat::from_number(number)
    }
}

#[cfg(test)]
#[path = "heat_tests.rs"]
mod heat_tests;
