//! In-process client
//!
//! [`InMemoryClient`] runs registered workflow functions on tokio tasks in
//! the current process. It implements the same [`Client`] contract as a
//! remote service, which makes it suitable for tests, demos and local
//! development of generated launchers.

use crate::error::FrameworkError;
use crate::workflow::registry::RunnerRegistry;
use crate::workflow::{Client, StartWorkflowOptions, WorkflowContext, WorkflowRun, WorkflowStatus};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Client that executes workflows inside the current process
#[derive(Clone, Default)]
pub struct InMemoryClient {
    registry: RunnerRegistry,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workflow function under the identifier launchers use
    ///
    /// ```rust,ignore
    /// let client = InMemoryClient::new().register("hello_workflow", hello_workflow);
    /// ```
    pub fn register<F, Fut, I, O, E>(mut self, identifier: impl Into<String>, func: F) -> Self
    where
        F: Fn(WorkflowContext, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize + 'static,
        E: Display + 'static,
    {
        self.registry.insert(identifier, func);
        self
    }

    pub fn registry(&self) -> &RunnerRegistry {
        &self.registry
    }
}

#[async_trait]
impl Client for InMemoryClient {
    async fn execute_workflow(
        &self,
        options: StartWorkflowOptions,
        workflow: &str,
        input: Value,
    ) -> Result<Box<dyn WorkflowRun>, FrameworkError> {
        let runner = self
            .registry
            .find(workflow)
            .ok_or_else(|| FrameworkError::WorkflowNotRegistered(workflow.to_string()))?;

        let run_id = format!("{:016x}", rand::random::<u64>());
        let workflow_id = options
            .id
            .clone()
            .unwrap_or_else(|| format!("{}-{}", workflow, run_id));
        let ctx = WorkflowContext::new(
            workflow_id.clone(),
            run_id.clone(),
            workflow,
            options.task_queue.clone(),
        );

        tracing::debug!(workflow, %workflow_id, %run_id, "starting in-process run");

        let (tx, rx) = watch::channel(RunState::Running);
        let timeout = options.execution_timeout;
        tokio::spawn(async move {
            let fut = ctx.clone().enter(runner(ctx, input));
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, fut)
                    .await
                    .unwrap_or_else(|_| {
                        Err(FrameworkError::Timeout {
                            workflow_id: String::new(),
                            after: limit,
                        })
                    }),
                None => fut.await,
            };
            let _ = tx.send(RunState::from(outcome));
        });

        Ok(Box::new(MemoryRun {
            workflow_id,
            run_id,
            state: rx,
        }))
    }
}

#[derive(Debug, Clone)]
enum RunState {
    Running,
    Succeeded(Value),
    Failed(String),
    TimedOut(Duration),
}

impl From<Result<Value, FrameworkError>> for RunState {
    fn from(outcome: Result<Value, FrameworkError>) -> Self {
        match outcome {
            Ok(value) => Self::Succeeded(value),
            Err(FrameworkError::WorkflowFailed { message, .. }) => Self::Failed(message),
            Err(FrameworkError::Timeout { after, .. }) => Self::TimedOut(after),
            Err(other) => Self::Failed(other.to_string()),
        }
    }
}

struct MemoryRun {
    workflow_id: String,
    run_id: String,
    state: watch::Receiver<RunState>,
}

impl MemoryRun {
    async fn finished_state(&self) -> RunState {
        let mut rx = self.state.clone();
        loop {
            let current = rx.borrow_and_update().clone();
            if !matches!(current, RunState::Running) {
                return current;
            }
            if rx.changed().await.is_err() {
                // Sender gone; the last value is final.
                let last = rx.borrow().clone();
                return match last {
                    RunState::Running => {
                        RunState::Failed("run task ended without a result".to_string())
                    }
                    done => done,
                };
            }
        }
    }
}

#[async_trait]
impl WorkflowRun for MemoryRun {
    fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    fn run_id(&self) -> &str {
        &self.run_id
    }

    fn status(&self) -> WorkflowStatus {
        match *self.state.borrow() {
            RunState::Running => WorkflowStatus::Running,
            RunState::Succeeded(_) => WorkflowStatus::Succeeded,
            RunState::Failed(_) | RunState::TimedOut(_) => WorkflowStatus::Failed,
        }
    }

    async fn get(&self) -> Result<Value, FrameworkError> {
        match self.finished_state().await {
            RunState::Succeeded(value) => Ok(value),
            RunState::TimedOut(after) => Err(FrameworkError::Timeout {
                workflow_id: self.workflow_id.clone(),
                after,
            }),
            RunState::Failed(message) => Err(FrameworkError::WorkflowFailed {
                workflow_id: self.workflow_id.clone(),
                message,
            }),
            RunState::Running => Err(FrameworkError::internal("run finished without a result")),
        }
    }
}
