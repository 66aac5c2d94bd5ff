//! Derived metrics over normalized records
//!
//! Pure transformations from record slices to the numbers the dashboard
//! shows. Nothing here fetches or mutates; every function takes the records
//! of one snapshot and returns owned results.
//!
//! - [`billing`] - Fixed-tariff amounts and display formatting
//! - [`trend`] - Month-over-month movement descriptors
//! - [`aggregate`] - Grouping, ordering, and latest-record selection

pub mod aggregate;
pub mod billing;
pub mod trend;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregate::{ElectricityPoint, MonthlyUsage, UserTotal};
