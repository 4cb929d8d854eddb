//! Pipeline-service error types

use thiserror::Error;

use super::backend::BackendError;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Errors raised while reading provisioning-pipeline state
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Underlying backend call failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}
