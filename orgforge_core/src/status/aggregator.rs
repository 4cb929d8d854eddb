//! Status aggregator
//!
//! The ledger's `status` field is the authoritative lifecycle state; the
//! pipeline view merged into a report is advisory, best-effort, and read-only.
//! When no pipeline is visible the report degrades to a ledger-derived
//! advisory status rather than failing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::CoreConfig;
use crate::error::pipeline::PipelineResult;
use crate::error::{Error, Result};
use crate::ledger::store::RequestStore;
use crate::ledger::types::{AccountRequest, RequestFilter, RequestStatus};
use crate::pipeline::service::{PipelineService, timed};
use crate::pipeline::types::{ExecutionStatus, ExecutionSummary};

/// Advisory pipeline view attached to a combined report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStatus {
    /// Name of the observed pipeline; `None` in degraded mode
    pub pipeline_name: Option<String>,
    /// Identifier of the freshest execution; `None` in degraded mode
    pub execution_id: Option<String>,
    pub status: ExecutionStatus,
    pub last_updated: Option<DateTime<Utc>>,
    /// True when no pipeline was visible and the status was derived from the
    /// ledger record instead of a genuine backend observation
    pub degraded: bool,
}

/// Combined report for a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedStatus {
    pub request: AccountRequest,
    pub pipeline: PipelineStatus,
}

/// One convention-matching pipeline with its recent executions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub name: String,
    pub executions: Vec<ExecutionSummary>,
}

/// Counts of requests by status across the most recent ledger entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SystemSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Health of a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentHealth {
    pub healthy: bool,
    pub detail: String,
}

/// Component reachability view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub ledger: ComponentHealth,
    pub pipelines: ComponentHealth,
}

/// Merges ledger state with pipeline-service observations
pub struct StatusAggregator {
    ledger: Arc<dyn RequestStore>,
    pipelines: Arc<dyn PipelineService>,
    name_filter: String,
    executions_per_pipeline: usize,
    call_timeout: Duration,
}

impl StatusAggregator {
    pub fn new(
        ledger: Arc<dyn RequestStore>,
        pipelines: Arc<dyn PipelineService>,
        config: &CoreConfig,
    ) -> Self {
        Self {
            ledger,
            pipelines,
            name_filter: config.pipeline_name_filter.to_lowercase(),
            executions_per_pipeline: config.executions_per_pipeline,
            call_timeout: config.call_timeout(),
        }
    }

    /// Report the combined status of one request
    ///
    /// Fails with `NotFound` when the ledger has no such record; pipeline
    /// visibility problems never fail the report. The ledger record is not
    /// altered.
    pub async fn report(&self, request_id: &str) -> Result<CombinedStatus> {
        let request = self.ledger.get(request_id).await.map_err(Error::Ledger)?;

        let pipeline = match self.freshest_execution().await {
            Ok(Some((name, execution))) => PipelineStatus {
                pipeline_name: Some(name),
                execution_id: Some(execution.execution_id.clone()),
                status: execution.status,
                last_updated: execution.freshness(),
                degraded: false,
            },
            Ok(None) => {
                warn!(
                    "no pipeline matching '{}' visible, deriving advisory status from ledger",
                    self.name_filter
                );
                Self::degraded(&request)
            }
            Err(err) => {
                warn!("pipeline service unavailable ({err}), deriving advisory status from ledger");
                Self::degraded(&request)
            }
        };

        Ok(CombinedStatus { request, pipeline })
    }

    /// Aggregate counts by status over the most recent `limit` ledger entries
    ///
    /// Pure aggregation, no side effects; an empty ledger yields all-zero
    /// counts.
    pub async fn summarize(&self, limit: usize) -> Result<SystemSummary> {
        let recent = self
            .ledger
            .list(&RequestFilter::new(), limit)
            .await
            .map_err(Error::Ledger)?;

        let mut summary = SystemSummary {
            total: recent.len(),
            ..SystemSummary::default()
        };
        for request in &recent {
            match request.status {
                RequestStatus::Pending => summary.pending += 1,
                RequestStatus::InProgress => summary.in_progress += 1,
                RequestStatus::Completed => summary.completed += 1,
                RequestStatus::Failed => summary.failed += 1,
            }
        }
        Ok(summary)
    }

    /// List every convention-matching pipeline with its recent executions
    pub async fn pipeline_overview(&self) -> Result<Vec<PipelineReport>> {
        let matching = self.matching_pipelines().await.map_err(Error::Pipeline)?;

        let mut reports = Vec::with_capacity(matching.len());
        for name in matching {
            let executions = timed(
                self.call_timeout,
                self.pipelines
                    .list_pipeline_executions(&name, self.executions_per_pipeline),
            )
            .await
            .map_err(Error::Pipeline)?;
            reports.push(PipelineReport { name, executions });
        }
        Ok(reports)
    }

    /// Check component reachability: the ledger and the pipeline backend
    pub async fn health(&self) -> Result<HealthReport> {
        let ledger = match self.ledger.list(&RequestFilter::new(), 1).await {
            Ok(_) => ComponentHealth {
                healthy: true,
                detail: "ledger reachable".to_string(),
            },
            Err(err) => ComponentHealth {
                healthy: false,
                detail: err.to_string(),
            },
        };

        let pipelines = match self.matching_pipelines().await {
            Ok(names) if !names.is_empty() => ComponentHealth {
                healthy: true,
                detail: format!("{} pipeline(s) matched '{}'", names.len(), self.name_filter),
            },
            Ok(_) => ComponentHealth {
                healthy: false,
                detail: format!("no pipelines matched '{}'", self.name_filter),
            },
            Err(err) => ComponentHealth {
                healthy: false,
                detail: err.to_string(),
            },
        };

        Ok(HealthReport { ledger, pipelines })
    }

    /// Ledger-derived advisory status used when the pipeline is not visible
    fn degraded(request: &AccountRequest) -> PipelineStatus {
        let status = match request.status {
            RequestStatus::Pending | RequestStatus::InProgress => ExecutionStatus::InProgress,
            RequestStatus::Completed => ExecutionStatus::Succeeded,
            RequestStatus::Failed => ExecutionStatus::Failed,
        };
        PipelineStatus {
            pipeline_name: None,
            execution_id: None,
            status,
            last_updated: Some(request.updated_at),
            degraded: true,
        }
    }

    /// Names of pipelines matching the configured naming convention
    async fn matching_pipelines(&self) -> PipelineResult<Vec<String>> {
        let pipelines = timed(self.call_timeout, self.pipelines.list_pipelines()).await?;
        Ok(pipelines
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&self.name_filter))
            .map(|p| p.name)
            .collect())
    }

    /// The freshest execution across all convention-matching pipelines
    async fn freshest_execution(&self) -> PipelineResult<Option<(String, ExecutionSummary)>> {
        let matching = self.matching_pipelines().await?;

        let mut freshest: Option<(String, ExecutionSummary)> = None;
        for name in matching {
            let executions = timed(
                self.call_timeout,
                self.pipelines
                    .list_pipeline_executions(&name, self.executions_per_pipeline),
            )
            .await?;

            for execution in executions {
                let newer = match &freshest {
                    Some((_, held)) => execution.freshness() > held.freshness(),
                    None => true,
                };
                if newer {
                    freshest = Some((name.clone(), execution));
                }
            }
        }

        if let Some((name, execution)) = &freshest {
            debug!(
                "freshest pipeline execution: {} on {} ({})",
                execution.execution_id, name, execution.status
            );
        }
        Ok(freshest)
    }
}
