//! # Topspin Analytics Engine
//!
//! This crate turns a filtered ledger of bet records into performance
//! summaries. It is the only part of the system with non-trivial semantics;
//! every rule about what counts, what divides, and what a degenerate input
//! produces lives here.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files, configuration, or rendering. It depends only on `core-types`
//!   (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` holds no state. It
//!   takes a record slice as input and produces summaries as output, which
//!   makes it trivially re-invokable on every view change and easy to test.
//! - **Explicit Sentinels:** degenerate arithmetic (no bets, no losses)
//!   resolves to typed sentinels the consumer must branch on. Nothing here
//!   ever produces a NaN or divides by zero.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the bucket rollup, cumulative series, and KPI
//!   calculations.
//! - `BucketSummary`, `KpiSummary`, `CumulativePoint`, `ProfitFactor`: the
//!   data transfer objects a presentation layer consumes.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use report::{BucketSummary, CumulativePoint, KpiSummary, ProfitFactor};
