//! Immutable dataset snapshot

use serde::Serialize;

use crate::app::models::{ElectricityRecord, Record, WaterRecord};
use crate::app::services::feed_parser::RowDiagnostic;

/// How one feed fared during a load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FeedStatus {
    /// Fetched and parsed; `rows` records joined the snapshot
    Loaded { rows: usize },

    /// Transport failed; the feed contributed nothing this load
    Failed { reason: String },
}

impl FeedStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedStatus::Loaded { .. })
    }
}

/// The full normalized dataset from one load
///
/// Water records come first, then electricity, each in source order. A
/// snapshot is never mutated after assembly; reloads build a new one and
/// swap it in wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Normalized records from both feeds
    pub records: Vec<Record>,

    /// Skip diagnostics from both feeds
    pub diagnostics: Vec<RowDiagnostic>,

    /// Water feed outcome
    pub water_status: FeedStatus,

    /// Electricity feed outcome
    pub electricity_status: FeedStatus,
}

impl Snapshot {
    /// Water records in source order
    pub fn water(&self) -> impl Iterator<Item = &WaterRecord> {
        self.records.iter().filter_map(Record::as_water)
    }

    /// Electricity records in source order
    pub fn electricity(&self) -> impl Iterator<Item = &ElectricityRecord> {
        self.records.iter().filter_map(Record::as_electricity)
    }

    /// Whether the load produced no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether both feeds failed transport
    pub fn both_feeds_failed(&self) -> bool {
        !self.water_status.is_loaded() && !self.electricity_status.is_loaded()
    }
}
