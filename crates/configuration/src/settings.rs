use core_types::{BucketGranularity, Outcome};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the ledger export lives and how to read it.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path to the CSV export of the tracking spreadsheet.
    pub path: PathBuf,
    #[serde(default)]
    pub schema: LedgerSchema,
}

/// Maps the spreadsheet layout onto the typed record fields.
///
/// The sheet has gone through several naming generations (English and Spanish
/// headers, one combined "Partido" column vs. two player columns), so neither
/// the column names nor the outcome spellings are hardcoded anywhere else.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerSchema {
    /// strftime format used to parse the date column.
    pub date_format: String,
    pub columns: ColumnMap,
    pub outcome_labels: OutcomeLabels,
}

impl Default for LedgerSchema {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            columns: ColumnMap::default(),
            outcome_labels: OutcomeLabels::default(),
        }
    }
}

/// Column names as they appear in the sheet's header row.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub date: String,
    pub pick: String,
    pub odds: String,
    pub outcome: String,
    pub profit: String,
    /// Optional opaque identifier column, carried through for display only.
    pub event_id: Option<String>,
    pub players: PlayerColumns,
}

impl Default for ColumnMap {
    fn default() -> Self {
        // The current generation of the sheet uses Spanish headers with two
        // explicit player columns.
        Self {
            date: "fecha".to_string(),
            pick: "pick".to_string(),
            odds: "cuota".to_string(),
            outcome: "resultado".to_string(),
            profit: "profit".to_string(),
            event_id: Some("event_id".to_string()),
            players: PlayerColumns::default(),
        }
    }
}

/// How the two match participants are encoded in the sheet.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum PlayerColumns {
    /// One column per participant.
    Split { player_a: String, player_b: String },
    /// A single "A vs B" style column, split on a separator.
    Combined { column: String, separator: String },
}

impl Default for PlayerColumns {
    fn default() -> Self {
        Self::Split {
            player_a: "jugador_A".to_string(),
            player_b: "jugador_B".to_string(),
        }
    }
}

/// Label table normalizing locale-specific outcome spellings to the typed
/// enumeration. Every consumer goes through `resolve`; no string comparison
/// against outcome labels happens outside this table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutcomeLabels {
    pub hit: Vec<String>,
    pub miss: Vec<String>,
    pub void: Vec<String>,
    pub pending: Vec<String>,
}

impl Default for OutcomeLabels {
    fn default() -> Self {
        // Covers both the Spanish spellings of the original sheet and their
        // English counterparts. An empty result cell means the bet is still open.
        Self {
            hit: vec!["Acierto".to_string(), "Hit".to_string()],
            miss: vec!["Fallo".to_string(), "Miss".to_string()],
            void: vec!["Anulado".to_string(), "Void".to_string()],
            pending: vec![
                "Pendiente".to_string(),
                "Pending".to_string(),
                String::new(),
            ],
        }
    }
}

impl OutcomeLabels {
    /// Resolves a raw cell value to the typed outcome, if the label is known.
    pub fn resolve(&self, label: &str) -> Option<Outcome> {
        let label = label.trim();
        let matches = |candidates: &[String]| candidates.iter().any(|c| c == label);

        if matches(&self.hit) {
            Some(Outcome::Hit)
        } else if matches(&self.miss) {
            Some(Outcome::Miss)
        } else if matches(&self.void) {
            Some(Outcome::Void)
        } else if matches(&self.pending) {
            Some(Outcome::Pending)
        } else {
            None
        }
    }
}

/// Defaults for report generation, overridable from the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub granularity: BucketGranularity,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            granularity: BucketGranularity::Week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn resolves_spanish_and_english_labels() {
        let labels = OutcomeLabels::default();
        assert_eq!(labels.resolve("Acierto"), Some(Outcome::Hit));
        assert_eq!(labels.resolve("Hit"), Some(Outcome::Hit));
        assert_eq!(labels.resolve("Fallo"), Some(Outcome::Miss));
        assert_eq!(labels.resolve("Anulado"), Some(Outcome::Void));
        assert_eq!(labels.resolve("  Pendiente "), Some(Outcome::Pending));
        assert_eq!(labels.resolve(""), Some(Outcome::Pending));
        assert_eq!(labels.resolve("acierto"), None);
        assert_eq!(labels.resolve("Won"), None);
    }

    #[test]
    fn minimal_file_falls_back_to_sheet_defaults() {
        let raw = r#"
            [ledger]
            path = "tracker_resultados.csv"
        "#;
        let config = config::Config::builder()
            .add_source(config::File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<Config>()
            .unwrap();

        assert_eq!(config.ledger.schema.date_format, "%Y-%m-%d");
        assert_eq!(config.ledger.schema.columns.date, "fecha");
        assert_eq!(config.ledger.schema.columns.players, PlayerColumns::default());
        assert_eq!(config.report.granularity, BucketGranularity::Week);
    }

    #[test]
    fn combined_player_column_deserializes() {
        let raw = r#"
            [ledger]
            path = "tracker.csv"

            [ledger.schema.columns.players]
            encoding = "combined"
            column = "Partido"
            separator = " vs "

            [report]
            granularity = "month"
        "#;
        let config = config::Config::builder()
            .add_source(config::File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<Config>()
            .unwrap();

        assert_eq!(
            config.ledger.schema.columns.players,
            PlayerColumns::Combined {
                column: "Partido".to_string(),
                separator: " vs ".to_string(),
            }
        );
        assert_eq!(config.report.granularity, BucketGranularity::Month);
    }
}
