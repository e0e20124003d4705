//! Workflow registrations and type-erased runners

use crate::error::FrameworkError;
use crate::workflow::WorkflowContext;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Reference to a workflow function inside a registry literal
///
/// Write `func: &my_workflow`. The value only has to type-check; generators
/// read the function's signature from source.
pub type WorkflowFn = &'static (dyn Any + Send + Sync);

/// One registration record of a workflow registry
///
/// ```rust,ignore
/// #[workflow_registry]
/// pub static WORKFLOWS: &[Workflow] = &[
///     Workflow { name: "sayHello", description: "Greets someone", func: &hello_workflow },
/// ];
/// ```
#[derive(Clone, Copy)]
pub struct Workflow {
    /// Name used to derive the generated identifiers
    pub name: &'static str,
    /// Free text, not used by code generation
    pub description: &'static str,
    /// The workflow function
    pub func: WorkflowFn,
}

impl std::fmt::Debug for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Future returned by a [`WorkflowRunner`]
pub type RunFuture = Pin<Box<dyn Future<Output = Result<Value, FrameworkError>> + Send>>;

/// Boxed workflow runner taking and returning JSON
pub type WorkflowRunner = Arc<dyn Fn(WorkflowContext, Value) -> RunFuture + Send + Sync>;

/// Erase a typed workflow function into a [`WorkflowRunner`]
///
/// The input is deserialized before the call and the output serialized
/// after it. Errors returned by the function are reported as
/// [`FrameworkError::WorkflowFailed`].
pub fn runner<F, Fut, I, O, E>(func: F) -> WorkflowRunner
where
    F: Fn(WorkflowContext, I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
    I: DeserializeOwned + Send + 'static,
    O: Serialize + 'static,
    E: Display + 'static,
{
    let func = Arc::new(func);
    Arc::new(move |ctx: WorkflowContext, input: Value| -> RunFuture {
        let func = func.clone();
        Box::pin(async move {
            let workflow_id = ctx.workflow_id().to_string();
            let input: I = serde_json::from_value(input)?;
            let output = func(ctx, input)
                .await
                .map_err(|e| FrameworkError::WorkflowFailed {
                    workflow_id,
                    message: e.to_string(),
                })?;
            Ok(serde_json::to_value(output)?)
        })
    })
}

/// Runners keyed by workflow function identifier
#[derive(Clone, Default)]
pub struct RunnerRegistry {
    runners: HashMap<String, WorkflowRunner>,
}

impl RunnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func` under `identifier`, replacing any previous entry
    pub fn insert<F, Fut, I, O, E>(&mut self, identifier: impl Into<String>, func: F)
    where
        F: Fn(WorkflowContext, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize + 'static,
        E: Display + 'static,
    {
        self.runners.insert(identifier.into(), runner(func));
    }

    /// Find a runner by identifier
    pub fn find(&self, identifier: &str) -> Option<WorkflowRunner> {
        self.runners.get(identifier).cloned()
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}
