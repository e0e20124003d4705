//! Framework-wide error types
//!
//! Every fallible operation of the client contract, the narrowing adapter and
//! the in-process runner returns [`FrameworkError`]. Generated launchers
//! return it unchanged so callers handle a single error type.

use thiserror::Error;

/// Unified error type for workflow clients and runs
#[derive(Debug, Error)]
pub enum FrameworkError {
    /// The client has no workflow function registered under this identifier
    #[error("Workflow '{0}' is not registered")]
    WorkflowNotRegistered(String),

    /// The workflow function returned an error
    #[error("Workflow '{workflow_id}' failed: {message}")]
    WorkflowFailed {
        workflow_id: String,
        message: String,
    },

    /// The run did not finish within its execution timeout
    #[error("Workflow '{workflow_id}' timed out after {after:?}")]
    Timeout {
        workflow_id: String,
        after: std::time::Duration,
    },

    /// An input or output payload could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A run produced a value that does not match the expected result type
    #[error("Workflow '{workflow_id}' returned an unexpected result for {expected}: {message}")]
    ResultType {
        workflow_id: String,
        expected: &'static str,
        message: String,
    },

    /// Anything else, usually raised by a custom client implementation
    #[error("{0}")]
    Internal(String),
}

impl FrameworkError {
    /// Create an internal error from a message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check whether the error came from the workflow function itself
    pub fn is_workflow_failure(&self) -> bool {
        matches!(self, Self::WorkflowFailed { .. } | Self::Timeout { .. })
    }
}
