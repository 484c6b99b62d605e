pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{BucketGranularity, Outcome};
pub use structs::BetRecord;
