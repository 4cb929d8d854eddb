//! Status aggregation
//!
//! Merges ledger records with pipeline-execution summaries into externally
//! reportable status views.

pub mod aggregator;

pub use aggregator::{
    CombinedStatus, ComponentHealth, HealthReport, PipelineReport, PipelineStatus,
    StatusAggregator, SystemSummary,
};
