use crate::error::LedgerError;
use crate::parser::load_ledger;
use configuration::LedgerConfig;
use core_types::BetRecord;

/// Owning handle over the loaded ledger for one dashboard session.
///
/// Replaces the earlier "load once, clear on button press" global cache: the
/// session owns the current snapshot, `reload` replaces it atomically, and
/// every downstream computation borrows it as an explicit argument.
#[derive(Debug)]
pub struct LedgerSession {
    config: LedgerConfig,
    records: Vec<BetRecord>,
}

impl LedgerSession {
    /// Loads the ledger from the configured path and takes ownership of it.
    pub fn load(config: LedgerConfig) -> Result<Self, LedgerError> {
        let records = load_ledger(&config.path, &config.schema)?;
        Ok(Self { config, records })
    }

    /// Re-reads the ledger file on user request.
    ///
    /// The new data fully parses before it replaces the held snapshot; a
    /// failed reload leaves the previous records intact.
    pub fn reload(&mut self) -> Result<(), LedgerError> {
        let records = load_ledger(&self.config.path, &self.config.schema)?;
        tracing::info!(rows = records.len(), "Ledger reloaded, snapshot replaced.");
        self.records = records;
        Ok(())
    }

    /// The current immutable snapshot, in original sheet order.
    pub fn records(&self) -> &[BetRecord] {
        &self.records
    }
}
