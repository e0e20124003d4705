//! Workflow client contract
//!
//! A workflow function takes a [`WorkflowContext`] and one input value and
//! returns `Result<Output, Error>`. Functions are listed in a registry of
//! [`Workflow`] records; `typedflow generate` reads that registry and emits a
//! typed launcher for each entry on top of the [`Client`] contract below.
//!
//! # Example
//!
//! ```rust,ignore
//! use typedflow::{workflow, workflow_registry, FrameworkError, Workflow, WorkflowContext};
//!
//! #[workflow_registry]
//! pub static WORKFLOWS: &[Workflow] = &[
//!     Workflow { name: "sayHello", description: "Greets someone", func: &hello_workflow },
//! ];
//!
//! #[workflow]
//! pub async fn hello_workflow(_ctx: WorkflowContext, name: String) -> Result<Response, FrameworkError> {
//!     Ok(Response { res: format!("hello: {}", name) })
//! }
//!
//! include!("workflow_results_gen.rs");
//!
//! // let run = execute_say_hello_workflow(&client, StartWorkflowOptions::default(), &name).await?;
//! // let response: Response = run.get().await?;
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod memory;
pub mod registry;
pub mod typed;
pub mod types;

pub use client::{Client, WorkflowRun};
pub use config::WorkflowConfig;
pub use context::WorkflowContext;
pub use memory::InMemoryClient;
pub use registry::{Workflow, WorkflowFn};
pub use typed::{to_payload, TypedRun};
pub use types::{StartWorkflowOptions, WorkflowStatus};
