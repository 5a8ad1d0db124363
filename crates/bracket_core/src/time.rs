//! Elapsed race times.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Elapsed time as recorded by the timing system, kept in whole milliseconds
/// so that tie detection is exact equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElapsedTime {
    millis: u64,
}

impl ElapsedTime {
    pub const ZERO: ElapsedTime = ElapsedTime { millis: 0 };

    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs * 1000,
        }
    }

    pub fn as_millis(self) -> u64 {
        self.millis
    }
}

impl Add for ElapsedTime {
    type Output = ElapsedTime;

    fn add(self, rhs: ElapsedTime) -> ElapsedTime {
        ElapsedTime {
            millis: self.millis + rhs.millis,
        }
    }
}

/// Error for clock strings that are not `HH:MM:SS[.fff]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not an HH:MM:SS time")]
pub struct ParseTimeError(pub String);

impl FromStr for ElapsedTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clock = NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f")
            .map_err(|_| ParseTimeError(s.to_string()))?;
        // chrono reads `:60` as a leap second, which would equal the next minute.
        if clock.nanosecond() >= 1_000_000_000 {
            return Err(ParseTimeError(s.to_string()));
        }
        let millis = clock.num_seconds_from_midnight() as u64 * 1000
            + (clock.nanosecond() / 1_000_000) as u64;
        Ok(Self { millis })
    }
}

/// Hours are not wrapped at 24, so summed two-leg times always print in full.
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.millis / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60
        )?;
        let fraction = self.millis % 1000;
        if fraction != 0 {
            let digits = format!("{:03}", fraction);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ElapsedTime {
    type Error = ParseTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElapsedTime> for String {
    fn from(time: ElapsedTime) -> String {
        time.to_string()
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
