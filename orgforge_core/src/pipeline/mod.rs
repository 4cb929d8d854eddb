//! Pipeline-service integration
//!
//! Read-only visibility into the external provisioning pipeline. The pipeline
//! backend is advisory: it is observed and reported, never driven.

pub mod service;
pub mod types;

pub use service::PipelineService;
pub use types::{ExecutionStatus, ExecutionSummary, PipelineSummary};
