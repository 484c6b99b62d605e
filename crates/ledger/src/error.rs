use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read ledger file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: could not parse date '{value}' with format '{format}'")]
    InvalidDate {
        row: usize,
        value: String,
        format: String,
    },

    #[error("Row {row}: could not parse {column} value '{value}' as a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: unknown outcome label '{value}'")]
    UnknownOutcome { row: usize, value: String },

    #[error("Row {row}: missing required value in column '{column}'")]
    MissingValue { row: usize, column: String },

    #[error("Row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}
