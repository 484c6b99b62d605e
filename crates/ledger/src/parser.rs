use crate::error::LedgerError;
use chrono::NaiveDate;
use configuration::{LedgerSchema, PlayerColumns};
use core_types::{BetRecord, Outcome};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;

/// Header positions resolved once per parse run.
struct ColumnIndex {
    date: usize,
    pick: usize,
    odds: usize,
    outcome: usize,
    profit: usize,
    event_id: Option<usize>,
    players: PlayerIndex,
}

enum PlayerIndex {
    Split { player_a: usize, player_b: usize },
    Combined { column: usize, separator: String },
}

/// Opens the ledger file and parses it under the given schema.
pub fn load_ledger(path: &Path, schema: &LedgerSchema) -> Result<Vec<BetRecord>, LedgerError> {
    let file = std::fs::File::open(path).map_err(|source| LedgerError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let records = parse_ledger(file, schema)?;
    tracing::info!(rows = records.len(), path = %path.display(), "Ledger loaded.");
    Ok(records)
}

/// Parses CSV data into bet records, preserving row order.
///
/// The first unparseable row aborts the run with an error identifying it;
/// a ledger is ingested whole or not at all.
pub fn parse_ledger<R: Read>(
    reader: R,
    schema: &LedgerSchema,
) -> Result<Vec<BetRecord>, LedgerError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let index = resolve_columns(&headers, schema)?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        // 1-based row numbers counted from the top of the file, header included,
        // so the number matches what the user sees in their spreadsheet.
        let row_number = i + 2;
        let row = row?;
        records.push(parse_row(&row, row_number, schema, &index)?);
    }

    Ok(records)
}

fn resolve_columns(
    headers: &StringRecord,
    schema: &LedgerSchema,
) -> Result<ColumnIndex, LedgerError> {
    let position = |name: &str| -> Result<usize, LedgerError> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| LedgerError::MissingColumn(name.to_string()))
    };

    let columns = &schema.columns;

    let players = match &columns.players {
        PlayerColumns::Split { player_a, player_b } => PlayerIndex::Split {
            player_a: position(player_a)?,
            player_b: position(player_b)?,
        },
        PlayerColumns::Combined { column, separator } => PlayerIndex::Combined {
            column: position(column)?,
            separator: separator.clone(),
        },
    };

    Ok(ColumnIndex {
        date: position(&columns.date)?,
        pick: position(&columns.pick)?,
        odds: position(&columns.odds)?,
        outcome: position(&columns.outcome)?,
        profit: position(&columns.profit)?,
        // A configured event-id column must exist; an unconfigured one is skipped.
        event_id: columns.event_id.as_deref().map(position).transpose()?,
        players,
    })
}

fn parse_row(
    row: &StringRecord,
    row_number: usize,
    schema: &LedgerSchema,
    index: &ColumnIndex,
) -> Result<BetRecord, LedgerError> {
    let field = |position: usize| row.get(position).unwrap_or("").trim();

    let raw_date = field(index.date);
    if raw_date.is_empty() {
        return Err(LedgerError::MissingValue {
            row: row_number,
            column: schema.columns.date.clone(),
        });
    }
    let date = NaiveDate::parse_from_str(raw_date, &schema.date_format).map_err(|_| {
        LedgerError::InvalidDate {
            row: row_number,
            value: raw_date.to_string(),
            format: schema.date_format.clone(),
        }
    })?;

    let (player_a, player_b) = match &index.players {
        PlayerIndex::Split { player_a, player_b } => {
            (field(*player_a).to_string(), field(*player_b).to_string())
        }
        PlayerIndex::Combined { column, separator } => {
            let combined = field(*column);
            let Some((a, b)) = combined.split_once(separator.as_str()) else {
                return Err(LedgerError::InvalidRecord {
                    row: row_number,
                    reason: format!(
                        "match value '{combined}' does not contain separator '{separator}'"
                    ),
                });
            };
            (a.trim().to_string(), b.trim().to_string())
        }
    };

    let raw_outcome = field(index.outcome);
    let outcome = schema.outcome_labels.resolve(raw_outcome).ok_or_else(|| {
        LedgerError::UnknownOutcome {
            row: row_number,
            value: raw_outcome.to_string(),
        }
    })?;

    let odds = parse_decimal(field(index.odds), row_number, &schema.columns.odds)?;
    let profit = parse_decimal(field(index.profit), row_number, &schema.columns.profit)?;

    // A settled bet was placed at real odds; only a pending row may leave them blank.
    if outcome.is_settled() {
        match odds {
            Some(value) if value > Decimal::ZERO => {}
            Some(value) => {
                return Err(LedgerError::InvalidRecord {
                    row: row_number,
                    reason: format!("odds must be positive, got {value}"),
                });
            }
            None => {
                return Err(LedgerError::MissingValue {
                    row: row_number,
                    column: schema.columns.odds.clone(),
                });
            }
        }
    }

    let profit = match outcome {
        Outcome::Pending => {
            if profit.is_some() {
                return Err(LedgerError::InvalidRecord {
                    row: row_number,
                    reason: "pending bet must not carry a profit value".to_string(),
                });
            }
            None
        }
        // A voided stake returns zero units; sheets usually leave the cell blank.
        Outcome::Void => Some(profit.unwrap_or(Decimal::ZERO)),
        Outcome::Hit | Outcome::Miss => Some(profit.ok_or_else(|| LedgerError::MissingValue {
            row: row_number,
            column: schema.columns.profit.clone(),
        })?),
    };

    Ok(BetRecord {
        date,
        player_a,
        player_b,
        pick: field(index.pick).to_string(),
        odds,
        outcome,
        profit,
        event_id: index
            .event_id
            .map(|position| field(position).to_string())
            .filter(|value| !value.is_empty()),
    })
}

fn parse_decimal(
    value: &str,
    row: usize,
    column: &str,
) -> Result<Option<Decimal>, LedgerError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| LedgerError::InvalidNumber {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{ColumnMap, OutcomeLabels};
    use rust_decimal_macros::dec;

    fn spanish_schema() -> LedgerSchema {
        // The crate-wide defaults mirror the current sheet generation.
        LedgerSchema::default()
    }

    const SPANISH_CSV: &str = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,1.85,Acierto,0.85
a2,2024-01-03,Nadal R.,Zverev A.,Nadal +1.5,1.60,Fallo,-1
a3,2024-01-10,Rune H.,Ruud C.,Rune ML,2.10,Anulado,
a4,2024-01-12,Alcaraz C.,Djokovic N.,Over 22.5,1.90,Pendiente,
";

    #[test]
    fn parses_the_spanish_sheet_layout() {
        let records = parse_ledger(SPANISH_CSV.as_bytes(), &spanish_schema()).unwrap();
        assert_eq!(records.len(), 4);

        let hit = &records[0];
        assert_eq!(hit.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(hit.player_a, "Alcaraz C.");
        assert_eq!(hit.player_b, "Sinner J.");
        assert_eq!(hit.pick, "Alcaraz ML");
        assert_eq!(hit.odds, Some(dec!(1.85)));
        assert_eq!(hit.outcome, Outcome::Hit);
        assert_eq!(hit.profit, Some(dec!(0.85)));
        assert_eq!(hit.event_id.as_deref(), Some("a1"));

        // The voided row keeps a zero profit so the Pending-iff-None invariant holds.
        let voided = &records[2];
        assert_eq!(voided.outcome, Outcome::Void);
        assert_eq!(voided.profit, Some(Decimal::ZERO));

        let pending = &records[3];
        assert_eq!(pending.outcome, Outcome::Pending);
        assert_eq!(pending.profit, None);
    }

    #[test]
    fn parses_the_combined_match_column_layout() {
        let schema = LedgerSchema {
            columns: ColumnMap {
                date: "fecha".to_string(),
                pick: "pick".to_string(),
                odds: "cuota".to_string(),
                outcome: "resultado".to_string(),
                profit: "profit".to_string(),
                event_id: None,
                players: PlayerColumns::Combined {
                    column: "Partido".to_string(),
                    separator: " vs ".to_string(),
                },
            },
            ..LedgerSchema::default()
        };

        let csv = "\
fecha,Partido,pick,cuota,resultado,profit
2024-02-05,Alcaraz C. vs Sinner J.,Sinner ML,2.40,Fallo,-1
";
        let records = parse_ledger(csv.as_bytes(), &schema).unwrap();
        assert_eq!(records[0].player_a, "Alcaraz C.");
        assert_eq!(records[0].player_b, "Sinner J.");
        assert_eq!(records[0].event_id, None);
    }

    #[test]
    fn combined_column_without_separator_is_rejected() {
        let schema = LedgerSchema {
            columns: ColumnMap {
                players: PlayerColumns::Combined {
                    column: "Partido".to_string(),
                    separator: " vs ".to_string(),
                },
                ..ColumnMap::default()
            },
            ..LedgerSchema::default()
        };

        let csv = "\
event_id,fecha,Partido,pick,cuota,resultado,profit
a1,2024-02-05,Alcaraz C. - Sinner J.,Sinner ML,2.40,Fallo,-1
";
        let err = parse_ledger(csv.as_bytes(), &schema).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn unparseable_date_fails_fast_with_the_row_number() {
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,1.85,Acierto,0.85
a2,01/02/2024,Nadal R.,Zverev A.,Nadal ML,1.60,Fallo,-1
";
        let err = parse_ledger(csv.as_bytes(), &spanish_schema()).unwrap_err();
        match err {
            LedgerError::InvalidDate { row, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(value, "01/02/2024");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn unknown_outcome_label_is_rejected() {
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,1.85,Ganada,0.85
";
        let err = parse_ledger(csv.as_bytes(), &spanish_schema()).unwrap_err();
        assert!(
            matches!(err, LedgerError::UnknownOutcome { row: 2, ref value } if value == "Ganada")
        );
    }

    #[test]
    fn missing_configured_column_is_reported_by_name() {
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,Acierto,0.85
";
        let err = parse_ledger(csv.as_bytes(), &spanish_schema()).unwrap_err();
        assert!(matches!(err, LedgerError::MissingColumn(ref name) if name == "cuota"));
    }

    #[test]
    fn settled_bet_without_profit_is_rejected() {
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,1.85,Acierto,
";
        let err = parse_ledger(csv.as_bytes(), &spanish_schema()).unwrap_err();
        assert!(matches!(err, LedgerError::MissingValue { row: 2, ref column } if column == "profit"));
    }

    #[test]
    fn pending_bet_with_profit_is_rejected() {
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,1.85,Pendiente,0.85
";
        let err = parse_ledger(csv.as_bytes(), &spanish_schema()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn non_positive_odds_on_a_settled_bet_are_rejected() {
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,0,Acierto,0.85
";
        let err = parse_ledger(csv.as_bytes(), &spanish_schema()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn custom_outcome_labels_are_honored() {
        let schema = LedgerSchema {
            outcome_labels: OutcomeLabels {
                hit: vec!["W".to_string()],
                miss: vec!["L".to_string()],
                void: vec!["V".to_string()],
                pending: vec!["-".to_string()],
            },
            ..LedgerSchema::default()
        };
        let csv = "\
event_id,fecha,jugador_A,jugador_B,pick,cuota,resultado,profit
a1,2024-01-01,Alcaraz C.,Sinner J.,Alcaraz ML,1.85,W,0.85
";
        let records = parse_ledger(csv.as_bytes(), &schema).unwrap();
        assert_eq!(records[0].outcome, Outcome::Hit);
    }
}
