//! Procedural macros for typedflow
//!
//! Both attributes check shape at compile time and hand the item back
//! unchanged. `typedflow generate` relies on the same rules when it reads
//! the source file, so a registry that compiles also generates.

use proc_macro::TokenStream;

mod registry;
mod workflow;

/// Mark the static or const that lists a crate's workflows
///
/// # Example
///
/// ```rust,ignore
/// #[workflow_registry]
/// pub static WORKFLOWS: &[Workflow] = &[
///     Workflow { name: "sayHello", description: "Greets someone", func: &hello_workflow },
/// ];
/// ```
///
/// The item must be a `static` or `const` of type `&[T]` or `[T; N]`
/// initialized with an array literal.
#[proc_macro_attribute]
pub fn workflow_registry(attr: TokenStream, input: TokenStream) -> TokenStream {
    registry::workflow_registry_impl(attr.into(), input.into()).into()
}

/// Check that a function has the workflow shape
///
/// A workflow function is `async`, takes exactly two parameters (the
/// `WorkflowContext` and one input) and returns `Result<T, E>`.
///
/// ```rust,ignore
/// #[workflow]
/// pub async fn hello_workflow(ctx: WorkflowContext, name: String) -> Result<Response, FrameworkError> {
///     Ok(Response { res: format!("hello: {}", name) })
/// }
/// ```
#[proc_macro_attribute]
pub fn workflow(attr: TokenStream, input: TokenStream) -> TokenStream {
    workflow::workflow_impl(attr.into(), input.into()).into()
}
