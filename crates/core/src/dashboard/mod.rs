//! Dashboard aggregation.
//!
//! Pure, single-pass summaries over transactions already fetched from the
//! store:
//! - Income/expense totals
//! - Per-category breakdown
//! - Monthly cash-flow series
//! - Most recent transactions
//!
//! None of these fail; missing fields count as zero or absent. Sums saturate
//! at `Decimal::MAX` instead of overflowing.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{DEFAULT_RECENT_LIMIT, DashboardService};
pub use types::*;
