//! Mock implementation of the pipeline service for testing

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use orgforge_core::error::{BackendError, PipelineError, PipelineResult};
use orgforge_core::{ExecutionStatus, ExecutionSummary, PipelineService, PipelineSummary};

#[derive(Default)]
struct State {
    pipelines: Vec<(PipelineSummary, Vec<ExecutionSummary>)>,
    outage: Option<String>,
}

/// Mock pipeline service with canned pipelines and executions
#[derive(Default)]
pub struct MockPipelineService {
    state: Mutex<State>,
}

impl MockPipelineService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pipeline(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .pipelines
            .push((PipelineSummary::new(name), Vec::new()));
    }

    /// Add an execution to a pipeline; executions are reported newest first
    /// in insertion order, matching the backend contract
    pub fn add_execution(
        &self,
        pipeline_name: &str,
        execution_id: &str,
        status: ExecutionStatus,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) {
        let mut state = self.state.lock().unwrap();
        let Some((_, executions)) = state
            .pipelines
            .iter_mut()
            .find(|(pipeline, _)| pipeline.name == pipeline_name)
        else {
            panic!("unknown mock pipeline: {pipeline_name}");
        };

        let mut execution = ExecutionSummary::new(execution_id, status);
        execution.start_time = start_time;
        execution.end_time = end_time;
        executions.insert(0, execution);
    }

    /// Fail every call with a transient unavailability error
    pub fn inject_outage(&self, message: &str) {
        self.state.lock().unwrap().outage = Some(message.to_string());
    }

    fn check_outage(state: &State) -> PipelineResult<()> {
        match &state.outage {
            Some(message) => Err(PipelineError::Backend(BackendError::unavailable(
                "pipeline service",
                message.clone(),
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PipelineService for MockPipelineService {
    async fn list_pipelines(&self) -> PipelineResult<Vec<PipelineSummary>> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;
        Ok(state
            .pipelines
            .iter()
            .map(|(pipeline, _)| pipeline.clone())
            .collect())
    }

    async fn list_pipeline_executions(
        &self,
        pipeline_name: &str,
        max_results: usize,
    ) -> PipelineResult<Vec<ExecutionSummary>> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;

        let executions = state
            .pipelines
            .iter()
            .find(|(pipeline, _)| pipeline.name == pipeline_name)
            .map(|(_, executions)| executions.clone())
            .unwrap_or_default();

        Ok(executions.into_iter().take(max_results).collect())
    }
}
