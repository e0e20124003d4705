//! typedflow code generator
//!
//! Reads a Rust file declaring a registry of workflows, resolves the
//! signature of every registered workflow function and renders typed
//! launchers for them:
//!
//! ```text
//! parse_source -> locate_registry -> extract_records -> resolve_records -> render
//! ```
//!
//! [`generate_file`] runs the pipeline for one input and writes the result
//! atomically; the `typedflow` binary is a thin wrapper around it.

pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod naming;
pub mod records;
pub mod registry;
pub mod signature;
pub mod source;
mod templates;

pub use config::GeneratorConfig;
pub use error::{GenerateError, Result};
pub use generate::{
    check_file, generate_directory, generate_file, generate_source, generate_text, CheckOutcome,
    Generated,
};
pub use signature::{FuncReference, WorkflowRecord};
