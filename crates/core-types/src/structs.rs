use crate::enums::{BucketGranularity, Outcome};
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One wagered pick from the betting ledger.
///
/// The profit field follows the settlement state: it is `None` exactly while
/// the bet is `Pending`. A voided bet carries a profit of zero so it can be
/// shown in raw listings without ever entering performance math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    /// Calendar date of the match.
    pub date: NaiveDate,
    /// The two participants of the match the bet was placed on.
    pub player_a: String,
    pub player_b: String,
    /// The wagered selection, free text as entered in the sheet.
    pub pick: String,
    /// Decimal odds. Required and positive once the bet is settled; a
    /// pending row may leave them blank.
    pub odds: Option<Decimal>,
    pub outcome: Outcome,
    /// Signed units won or lost. `None` iff the bet is still pending.
    pub profit: Option<Decimal>,
    /// Opaque identifier carried over from the source sheet, display only.
    pub event_id: Option<String>,
}

impl BetRecord {
    /// Monday of the calendar week containing the event date.
    ///
    /// Bucket keys are always derived from `date` on demand so they can
    /// never drift from it.
    pub fn week_bucket(&self) -> NaiveDate {
        self.date.week(Weekday::Mon).first_day()
    }

    /// First day of the calendar month containing the event date.
    pub fn month_bucket(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.date.year(), self.date.month(), 1).unwrap_or(self.date)
    }

    pub fn bucket_start(&self, granularity: BucketGranularity) -> NaiveDate {
        match granularity {
            BucketGranularity::Week => self.week_bucket(),
            BucketGranularity::Month => self.month_bucket(),
        }
    }

    /// Whether the given player took part in this match. Identifiers are
    /// compared exactly, case included.
    pub fn involves(&self, player: &str) -> bool {
        self.player_a == player || self.player_b == player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(date: NaiveDate) -> BetRecord {
        BetRecord {
            date,
            player_a: "Alcaraz C.".to_string(),
            player_b: "Sinner J.".to_string(),
            pick: "Alcaraz ML".to_string(),
            odds: Some(dec!(1.85)),
            outcome: Outcome::Hit,
            profit: Some(dec!(0.85)),
            event_id: None,
        }
    }

    #[test]
    fn week_bucket_starts_on_monday() {
        // 2024-01-10 is a Wednesday; its week starts on Monday the 8th.
        let wednesday = record(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(
            wednesday.week_bucket(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );

        // A Monday is its own week start.
        let monday = record(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(monday.week_bucket(), monday.date);

        // A Sunday belongs to the week of the preceding Monday.
        let sunday = record(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(
            sunday.week_bucket(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn month_bucket_is_first_of_month() {
        let leap_day = record(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(
            leap_day.month_bucket(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn bucket_start_dispatches_on_granularity() {
        let bet = record(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(bet.bucket_start(BucketGranularity::Week), bet.week_bucket());
        assert_eq!(
            bet.bucket_start(BucketGranularity::Month),
            bet.month_bucket()
        );
    }

    #[test]
    fn involves_matches_either_participant_exactly() {
        let bet = record(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(bet.involves("Alcaraz C."));
        assert!(bet.involves("Sinner J."));
        assert!(!bet.involves("alcaraz c."));
        assert!(!bet.involves("Djokovic N."));
    }
}
