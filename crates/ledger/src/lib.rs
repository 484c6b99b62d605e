//! # Topspin Ledger
//!
//! This crate turns the raw spreadsheet export into typed `BetRecord`s.
//!
//! ## Architectural Principles
//!
//! - **Configurable schema:** column names, the participant encoding, and the
//!   outcome label table all come from `configuration`; nothing about the
//!   sheet's layout or locale is hardcoded here.
//! - **Fail fast:** a row that cannot be parsed aborts the whole load with an
//!   error naming the row. The engine never partially ingests a ledger, and a
//!   load failure is never reported as an empty success.
//! - **Session-scoped state:** `LedgerSession` owns the loaded records for
//!   one session and replaces them atomically on `reload`. Downstream
//!   computations borrow the snapshot explicitly; there is no ambient cache.
//!
//! ## Public API
//!
//! - `parse_ledger` / `load_ledger`: schema-driven CSV parsing.
//! - `LedgerSession`: the owning handle with explicit reload.
//! - `LedgerError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod parser;
pub mod session;

// Re-export the key components to create a clean, public-facing API.
pub use error::LedgerError;
pub use parser::{load_ledger, parse_ledger};
pub use session::LedgerSession;
