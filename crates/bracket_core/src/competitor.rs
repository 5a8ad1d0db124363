use serde::{Deserialize, Serialize};
use std::fmt;

/// A racer's identity as it appears in timing exports.
///
/// Names are the only identity that survives across rounds, so equality is
/// exact on both fields after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Competitor {
    pub first_name: String,
    pub surname: String,
}

impl Competitor {
    pub fn new(first_name: &str, surname: &str) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            surname: surname.trim().to_string(),
        }
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.surname)
    }
}
