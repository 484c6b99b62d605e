use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Performance rollup for one calendar bucket (week or month).
///
/// Only scoring bets (settled, non-void) are counted; a bucket that would
/// have zero of them is never emitted at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Monday of the week, or first of the month.
    pub bucket_start: NaiveDate,
    pub bet_count: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    /// Sum of realized profit over the bucket, in staked units.
    pub units_profit: Decimal,
    /// `units_profit / bet_count`. `None` instead of a silent division by
    /// zero when there is nothing to divide by; emitted buckets always carry
    /// `Some`, but the type keeps the consumer honest.
    pub yield_per_bet: Option<Decimal>,
}

/// Whole-period headline metrics over the filtered, settled, non-void set.
///
/// This struct is the final output of the KPI calculation and serves as the
/// data transfer object for headline display throughout the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_bets: usize,
    pub total_hits: usize,
    pub total_profit: Decimal,
    /// Headline yield. By convention this one is zero for an empty period,
    /// unlike the per-bucket yield which is `None`.
    pub yield_per_bet: Decimal,
    /// Sum of strictly positive profits.
    pub gross_win: Decimal,
    /// Sum of absolute values of strictly negative profits.
    pub gross_loss: Decimal,
    pub profit_factor: ProfitFactor,
}

impl KpiSummary {
    /// The all-zero summary of an empty period.
    pub fn empty() -> Self {
        Self {
            total_bets: 0,
            total_hits: 0,
            total_profit: Decimal::ZERO,
            yield_per_bet: Decimal::ZERO,
            gross_win: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: ProfitFactor::Undefined,
        }
    }
}

impl Default for KpiSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Ratio of gross winnings to gross losses.
///
/// The two degenerate cases stay distinct: a loss-free winning period is
/// `Infinite`, a period with no scoring bets at all is `Undefined`. Consumers
/// must branch on the variant; neither case may collapse into the other or
/// into a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProfitFactor {
    Ratio(Decimal),
    Infinite,
    Undefined,
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Ratio(value) => write!(f, "{}", value.round_dp(2)),
            ProfitFactor::Infinite => write!(f, "inf"),
            ProfitFactor::Undefined => write!(f, "n/a"),
        }
    }
}

/// One point of the cumulative trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub bucket_start: NaiveDate,
    /// Running total of units won or lost up to and including this bucket.
    pub running_profit: Decimal,
    /// Running sum of per-bucket yields, as a percentage. Additive by the
    /// dashboard's long-standing convention.
    pub running_yield_pct: Decimal,
}
