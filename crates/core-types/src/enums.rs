use serde::{Deserialize, Serialize};
use std::fmt;

/// The settlement state of a single bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Hit,
    Miss,
    Void,
    Pending,
}

impl Outcome {
    /// A bet is settled once its result is known. Only `Pending` is not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    /// Scoring bets are the ones that enter profit and yield aggregation.
    /// A voided bet is settled but never scoring.
    pub fn is_scoring(&self) -> bool {
        matches!(self, Outcome::Hit | Outcome::Miss)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Hit => "Hit",
            Outcome::Miss => "Miss",
            Outcome::Void => "Void",
            Outcome::Pending => "Pending",
        };
        write!(f, "{label}")
    }
}

/// The calendar window used to group records for trend reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketGranularity {
    Week,
    Month,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_unsettled_outcome() {
        assert!(Outcome::Hit.is_settled());
        assert!(Outcome::Miss.is_settled());
        assert!(Outcome::Void.is_settled());
        assert!(!Outcome::Pending.is_settled());
    }

    #[test]
    fn void_is_settled_but_not_scoring() {
        assert!(!Outcome::Void.is_scoring());
        assert!(!Outcome::Pending.is_scoring());
        assert!(Outcome::Hit.is_scoring());
        assert!(Outcome::Miss.is_scoring());
    }
}
