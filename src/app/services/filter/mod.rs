//! Record filtering and filter option lists
//!
//! - [`predicate`] - Name, month, and free-text criteria over records
//! - [`options`] - Selectable values derived from the loaded snapshot

pub mod options;
pub mod predicate;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use predicate::{ElectricityFilter, WaterFilter};
