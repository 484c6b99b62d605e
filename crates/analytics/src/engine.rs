use crate::report::{BucketSummary, CumulativePoint, KpiSummary, ProfitFactor};
use chrono::NaiveDate;
use core_types::{BetRecord, BucketGranularity, Outcome};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A stateless calculator turning filtered bet records into performance
/// summaries.
///
/// Both entry points expect the caller to have applied any date/player
/// filtering already; they skip voided and pending rows themselves, so those
/// can never leak into a metric regardless of what is passed in.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolls the scoring records up into ascending calendar buckets.
    ///
    /// Buckets without any scoring bet are omitted, not emitted as zero
    /// rows; sparse weeks simply disappear from the series. Zero-filling a
    /// continuous time axis is a charting concern, not an aggregation one.
    pub fn aggregate_by_bucket(
        &self,
        records: &[BetRecord],
        granularity: BucketGranularity,
    ) -> Vec<BucketSummary> {
        let mut buckets: BTreeMap<NaiveDate, BucketSummary> = BTreeMap::new();

        for (record, profit) in scoring(records) {
            let bucket_start = record.bucket_start(granularity);
            let summary = buckets
                .entry(bucket_start)
                .or_insert_with(|| BucketSummary {
                    bucket_start,
                    bet_count: 0,
                    hit_count: 0,
                    miss_count: 0,
                    units_profit: Decimal::ZERO,
                    yield_per_bet: None,
                });

            summary.bet_count += 1;
            if record.outcome == Outcome::Hit {
                summary.hit_count += 1;
            } else {
                summary.miss_count += 1;
            }
            summary.units_profit += profit;
        }

        // Every bucket that exists holds at least one scoring bet, so the
        // yield denominator is never zero here.
        buckets
            .into_values()
            .map(|mut summary| {
                summary.yield_per_bet =
                    Some(summary.units_profit / Decimal::from(summary.bet_count));
                summary
            })
            .collect()
    }

    /// Running profit and running yield over an ascending bucket sequence.
    ///
    /// The yield column is the plain sum of per-bucket yields times 100, the
    /// convention the dashboard has always charted, rather than a
    /// profit-weighted cumulative yield.
    pub fn cumulative_series(&self, summaries: &[BucketSummary]) -> Vec<CumulativePoint> {
        let mut running_profit = Decimal::ZERO;
        let mut running_yield = Decimal::ZERO;

        summaries
            .iter()
            .map(|summary| {
                running_profit += summary.units_profit;
                running_yield += summary.yield_per_bet.unwrap_or(Decimal::ZERO);
                CumulativePoint {
                    bucket_start: summary.bucket_start,
                    running_profit,
                    running_yield_pct: running_yield * Decimal::from(100),
                }
            })
            .collect()
    }

    /// Whole-period headline metrics over the filtered set.
    ///
    /// Commutative and associative per record, so the result is independent
    /// of record order. Always returns a well-formed summary; degenerate
    /// inputs resolve to the documented sentinels instead of erroring.
    pub fn compute_kpis(&self, records: &[BetRecord]) -> KpiSummary {
        let mut kpis = KpiSummary::empty();

        for (record, profit) in scoring(records) {
            kpis.total_bets += 1;
            if record.outcome == Outcome::Hit {
                kpis.total_hits += 1;
            }
            kpis.total_profit += profit;

            if profit > Decimal::ZERO {
                kpis.gross_win += profit;
            } else if profit < Decimal::ZERO {
                kpis.gross_loss += profit.abs();
            }
        }

        if kpis.total_bets > 0 {
            kpis.yield_per_bet = kpis.total_profit / Decimal::from(kpis.total_bets);
        }

        kpis.profit_factor = if kpis.gross_loss > Decimal::ZERO {
            ProfitFactor::Ratio(kpis.gross_win / kpis.gross_loss)
        } else if kpis.gross_win > Decimal::ZERO {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Undefined
        };

        kpis
    }
}

/// Settled, non-void records paired with their realized profit.
///
/// Pending rows have no profit to aggregate and voided rows are excluded
/// from all performance math, so neither gets past this point.
fn scoring(records: &[BetRecord]) -> impl Iterator<Item = (&BetRecord, Decimal)> {
    records
        .iter()
        .filter(|record| record.outcome.is_scoring())
        .filter_map(|record| record.profit.map(|profit| (record, profit)))
}
