//! Pipeline-service client trait

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::error::pipeline::{PipelineError, PipelineResult};
use crate::pipeline::types::{ExecutionSummary, PipelineSummary};

/// Service name used in backend error messages
pub(crate) const SERVICE_NAME: &str = "pipeline service";

/// Trait for provisioning-pipeline backends; read-only
#[async_trait]
pub trait PipelineService: Send + Sync {
    /// List all pipelines visible to the caller
    async fn list_pipelines(&self) -> PipelineResult<Vec<PipelineSummary>>;

    /// List the most recent executions of a pipeline, newest first
    async fn list_pipeline_executions(
        &self,
        pipeline_name: &str,
        max_results: usize,
    ) -> PipelineResult<Vec<ExecutionSummary>>;
}

/// Apply the per-call timeout budget to a single pipeline call
pub(crate) async fn timed<T, F>(budget: Duration, call: F) -> PipelineResult<T>
where
    F: Future<Output = PipelineResult<T>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => Err(PipelineError::Backend(BackendError::timeout(
            SERVICE_NAME,
            budget,
        ))),
    }
}
