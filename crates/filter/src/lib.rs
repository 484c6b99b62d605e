//! # Topspin Filter
//!
//! Pure date-range and player predicates over the loaded ledger.
//!
//! Filtering is deterministic, order-preserving, and idempotent: it is safe
//! to re-run on every view change without caching anything beyond the loaded
//! ledger itself. An empty result is a valid result, never an error.

use chrono::NaiveDate;
use core_types::BetRecord;
use serde::{Deserialize, Serialize};

/// The active view filter: an inclusive date range and an optional player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower date bound; `None` leaves the range open below.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound; `None` leaves the range open above.
    pub date_to: Option<NaiveDate>,
    /// Keeps only matches this player took part in, on either side of the
    /// net. Exact identifier match, case included.
    pub player: Option<String>,
}

impl FilterCriteria {
    pub fn matches(&self, record: &BetRecord) -> bool {
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        if let Some(player) = &self.player {
            if !record.involves(player) {
                return false;
            }
        }
        true
    }
}

/// Applies the criteria to the ledger, preserving the original order.
pub fn apply_filter(records: &[BetRecord], criteria: &FilterCriteria) -> Vec<BetRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
