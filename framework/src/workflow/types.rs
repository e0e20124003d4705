//! Workflow public types

use crate::workflow::WorkflowConfig;
use std::time::Duration;

/// Options for starting a workflow run
///
/// `Default` reads [`WorkflowConfig`] from the environment.
#[derive(Debug, Clone)]
pub struct StartWorkflowOptions {
    /// Business identifier of the workflow; clients generate one when absent
    pub id: Option<String>,
    /// Queue the run is dispatched on
    pub task_queue: String,
    /// Upper bound on the run's duration
    pub execution_timeout: Option<Duration>,
}

impl StartWorkflowOptions {
    /// Build options from an explicit config
    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self {
            id: None,
            task_queue: config.task_queue.clone(),
            execution_timeout: config.execution_timeout(),
        }
    }

    /// Set the workflow id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the task queue
    pub fn with_task_queue(mut self, task_queue: impl Into<String>) -> Self {
        self.task_queue = task_queue.into();
        self
    }

    /// Set the execution timeout
    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = Some(timeout);
        self
    }
}

impl Default for StartWorkflowOptions {
    fn default() -> Self {
        Self::from_config(&WorkflowConfig::from_env())
    }
}

/// Execution status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Running,
    Succeeded,
    Failed,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Whether the run has finished, successfully or not
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
