//! Workflow configuration

use crate::config::env;
use std::time::Duration;

/// Workflow configuration
///
/// # Environment Variables
///
/// - `TYPEDFLOW_TASK_QUEUE` - Task queue used when options name none (default: "default")
/// - `TYPEDFLOW_EXECUTION_TIMEOUT_SECS` - Run timeout in seconds, 0 disables it (default: 0)
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Default task queue for started workflows
    pub task_queue: String,
    /// Default execution timeout in seconds, 0 for none
    pub execution_timeout_secs: u64,
}

impl WorkflowConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            task_queue: env("TYPEDFLOW_TASK_QUEUE", "default".to_string()),
            execution_timeout_secs: env("TYPEDFLOW_EXECUTION_TIMEOUT_SECS", 0u64),
        }
    }

    /// The execution timeout as a duration, if one is configured
    pub fn execution_timeout(&self) -> Option<Duration> {
        match self.execution_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
