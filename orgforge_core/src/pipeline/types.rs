//! Data types for the pipeline-service view

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A provisioning pipeline as reported by the pipeline backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub name: String,
}

impl PipelineSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Status of a single pipeline execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    InProgress,
    Succeeded,
    Failed,
    Stopped,
    Superseded,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InProgress => "InProgress",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Stopped => "Stopped",
            Self::Superseded => "Superseded",
        };
        f.write_str(label)
    }
}

/// Summary of one pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub execution_id: String,
    pub status: ExecutionStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ExecutionSummary {
    pub fn new(execution_id: impl Into<String>, status: ExecutionStatus) -> Self {
        Self {
            execution_id: execution_id.into(),
            status,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_end_time(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    /// Elapsed wall-clock time of the execution, when both ends are reported
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (end - start).to_std().ok(),
            _ => None,
        }
    }

    /// Freshness key for picking the most recent execution
    pub(crate) fn freshness(&self) -> Option<DateTime<Utc>> {
        self.end_time.or(self.start_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_execution_duration() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 10, 9, 25, 30).unwrap();

        let execution = ExecutionSummary::new("exec-1", ExecutionStatus::Succeeded)
            .with_start_time(start)
            .with_end_time(end);

        assert_eq!(execution.duration(), Some(Duration::from_secs(25 * 60 + 30)));
    }

    #[test]
    fn test_duration_requires_both_ends() {
        let running = ExecutionSummary::new("exec-2", ExecutionStatus::InProgress)
            .with_start_time(Utc::now());
        assert!(running.duration().is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExecutionStatus::InProgress.to_string(), "InProgress");
        assert_eq!(ExecutionStatus::Succeeded.to_string(), "Succeeded");
    }
}
