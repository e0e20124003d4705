//! Generator error types
//!
//! Every failure is fatal for the run. The binary prints the message and
//! exits non-zero; nothing is written to the output path.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// No input file was given on the command line or in the environment
    #[error("No input file given (use --file or set {env})")]
    MissingInput { env: &'static str },

    #[error("Failed to read {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid Rust
    #[error("{}:{line}:{column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("No workflow registry found in {}: {reason}", .path.display())]
    RegistryNotFound { path: PathBuf, reason: String },

    /// More than one item qualifies as the registry
    #[error(
        "Ambiguous workflow registry in {}: {} (mark exactly one with #[workflow_registry])",
        .path.display(),
        .candidates.join(", ")
    )]
    AmbiguousRegistry {
        path: PathBuf,
        candidates: Vec<String>,
    },

    /// A registry element that names a function is otherwise unusable
    #[error("Invalid workflow record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// `func` names a function that is not declared at the top level of the file
    #[error("Workflow {workflow} at line {line} refers to `{function}`, which is not a function declared in this file")]
    UnresolvedFunction {
        workflow: String,
        function: String,
        line: usize,
    },

    /// The workflow function does not have the (context, input) -> Result<T, E> shape
    #[error("Workflow function `{function}` (line {line}) has an unsupported signature: {reason}")]
    SignatureShape {
        function: String,
        line: usize,
        reason: String,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The rendered output failed to parse; this is a generator bug
    #[error("Generated code is not valid Rust ({line}:{column}): {message}")]
    InvalidOutput {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two registries would write to the same generated file
    #[error("{} and {} would both generate {}", .first.display(), .second.display(), .output.display())]
    OutputConflict {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },
}

/// Shorthand for results in this crate
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
