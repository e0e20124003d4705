//! Client contract
//!
//! Generated launchers talk to a workflow service only through these two
//! traits. Workflow functions are addressed by their string identifier and
//! payloads travel as untyped JSON; typing is restored by
//! [`TypedRun`](crate::workflow::TypedRun).

use crate::error::FrameworkError;
use crate::workflow::{StartWorkflowOptions, WorkflowStatus};
use async_trait::async_trait;
use serde_json::Value;

/// A service able to start workflow runs
#[async_trait]
pub trait Client: Send + Sync {
    /// Start the workflow function registered as `workflow` with `input`
    async fn execute_workflow(
        &self,
        options: StartWorkflowOptions,
        workflow: &str,
        input: Value,
    ) -> Result<Box<dyn WorkflowRun>, FrameworkError>;
}

/// Handle to an in-flight or finished run
///
/// The result accessor is untyped. Wrap the handle in a
/// [`TypedRun`](crate::workflow::TypedRun) to read a concrete type.
#[async_trait]
pub trait WorkflowRun: Send + Sync {
    fn workflow_id(&self) -> &str;

    fn run_id(&self) -> &str;

    /// Current status without waiting
    fn status(&self) -> WorkflowStatus;

    /// Wait for the run to finish and return its raw result
    async fn get(&self) -> Result<Value, FrameworkError>;
}
