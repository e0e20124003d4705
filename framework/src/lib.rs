//! typedflow runtime
//!
//! The contract generated workflow launchers are written against: the
//! registration record, the untyped [`Client`]/[`WorkflowRun`] pair, and the
//! [`TypedRun`] adapter that narrows untyped results. An in-process
//! [`InMemoryClient`] is included for tests and local runs.

pub mod config;
pub mod error;
pub mod workflow;

pub use error::FrameworkError;
pub use workflow::{
    to_payload, Client, InMemoryClient, StartWorkflowOptions, TypedRun, Workflow,
    WorkflowConfig, WorkflowContext, WorkflowFn, WorkflowRun, WorkflowStatus,
};

pub use typedflow_macros::{workflow, workflow_registry};

// Re-exports used by generated code
pub use async_trait::async_trait;
pub use serde_json;
