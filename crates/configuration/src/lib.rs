use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    ColumnMap, Config, LedgerConfig, LedgerSchema, OutcomeLabels, PlayerColumns, ReportConfig,
};

/// Loads the application configuration from the given TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    validate(&config)?;

    Ok(config)
}

/// Rejects configurations that would only fail later, deep inside a parse run.
fn validate(config: &Config) -> Result<(), ConfigError> {
    let schema = &config.ledger.schema;

    if schema.date_format.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "ledger.schema.date_format must not be empty".to_string(),
        ));
    }

    if let PlayerColumns::Combined { separator, .. } = &schema.columns.players {
        if separator.is_empty() {
            return Err(ConfigError::ValidationError(
                "ledger.schema.columns.players.separator must not be empty".to_string(),
            ));
        }
    }

    Ok(())
}
