//! Registered workflows
//!
//! `workflow_results_gen.rs` is generated from this file; rerun
//! `typedflow generate --file app/src/workflows.rs` after editing the registry.

use serde::{Deserialize, Serialize};
use typedflow::{workflow, workflow_registry, FrameworkError, Workflow, WorkflowContext};

#[workflow_registry]
pub static WORKFLOWS: &[Workflow] = &[
    Workflow {
        name: "sayHello",
        description: "This is the sayHello workflow",
        func: &hello_workflow,
    },
    Workflow {
        name: "sayHello2",
        description: "This is the sayHello workflow again, under a second name",
        func: &hello_workflow,
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub res: String,
}

#[workflow]
pub async fn hello_workflow(ctx: WorkflowContext, params: String) -> Result<Response, FrameworkError> {
    Ok(Response {
        res: format!("hello: {} (run {})", params, ctx.run_id()),
    })
}

include!("workflow_results_gen.rs");
