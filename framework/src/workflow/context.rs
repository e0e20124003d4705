//! Workflow execution context
//!
//! The first parameter of every workflow function. It identifies the run the
//! function is executing for.

use std::future::Future;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WorkflowContext {
    inner: Arc<WorkflowContextInner>,
}

#[derive(Debug)]
struct WorkflowContextInner {
    workflow_id: String,
    run_id: String,
    workflow_type: String,
    task_queue: String,
}

tokio::task_local! {
    static CONTEXT: WorkflowContext;
}

impl WorkflowContext {
    pub fn new(
        workflow_id: impl Into<String>,
        run_id: impl Into<String>,
        workflow_type: impl Into<String>,
        task_queue: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(WorkflowContextInner {
                workflow_id: workflow_id.into(),
                run_id: run_id.into(),
                workflow_type: workflow_type.into(),
                task_queue: task_queue.into(),
            }),
        }
    }

    /// Business identifier of the workflow
    pub fn workflow_id(&self) -> &str {
        &self.inner.workflow_id
    }

    /// Identifier of this particular run
    pub fn run_id(&self) -> &str {
        &self.inner.run_id
    }

    /// Identifier the workflow function was started under
    pub fn workflow_type(&self) -> &str {
        &self.inner.workflow_type
    }

    pub fn task_queue(&self) -> &str {
        &self.inner.task_queue
    }

    /// Run a future within this workflow context
    pub async fn enter<T, Fut>(self, fut: Fut) -> T
    where
        Fut: Future<Output = T>,
    {
        CONTEXT.scope(self, fut).await
    }

    /// Get the current workflow context if set
    pub fn current() -> Option<Self> {
        CONTEXT.try_with(|ctx| ctx.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_current_is_scoped_to_enter() {
        assert!(WorkflowContext::current().is_none());

        let ctx = WorkflowContext::new("order-7", "run-1", "ship_order", "default");
        let seen = ctx
            .enter(async { WorkflowContext::current().map(|c| c.workflow_id().to_string()) })
            .await;

        assert_eq!(seen.as_deref(), Some("order-7"));
        assert!(WorkflowContext::current().is_none());
    }
}
