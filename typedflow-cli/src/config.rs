//! Generator configuration
//!
//! Command-line flags win over environment variables, which may come from a
//! `.env` file in the working directory.

use crate::error::{GenerateError, Result};
use std::path::{Path, PathBuf};

/// Input file when `--file` is not given
pub const FILE_ENV: &str = "TYPEDFLOW_FILE";
/// Output file when `--output` is not given
pub const OUTPUT_ENV: &str = "TYPEDFLOW_OUTPUT";
/// Enables debug logging when set to a truthy value
pub const DEBUG_ENV: &str = "TYPEDFLOW_DEBUG";

/// File name of the generated code, placed next to the input
pub const DEFAULT_OUTPUT_NAME: &str = "workflow_results_gen.rs";

/// Resolved paths and flags for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub debug: bool,
}

impl GeneratorConfig {
    /// Resolve against the process environment
    pub fn resolve(file: Option<PathBuf>, output: Option<PathBuf>, debug: bool) -> Result<Self> {
        Self::resolve_with(file, output, debug, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit variable lookup
    pub fn resolve_with<F>(
        file: Option<PathBuf>,
        output: Option<PathBuf>,
        debug: bool,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let input = file
            .or_else(|| var(FILE_ENV).map(PathBuf::from))
            .ok_or(GenerateError::MissingInput { env: FILE_ENV })?;

        let output = output
            .or_else(|| var(OUTPUT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| default_output(&input));

        let debug = debug || var(DEBUG_ENV).map(|v| is_truthy(&v)).unwrap_or(false);

        Ok(Self {
            input,
            output,
            debug,
        })
    }

    /// Config for a file found by a directory scan; only the default output applies
    pub fn for_input(input: PathBuf, debug: bool) -> Self {
        let output = default_output(&input);
        Self {
            input,
            output,
            debug,
        }
    }
}

/// `workflow_results_gen.rs` in the input's directory
pub fn default_output(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(DEFAULT_OUTPUT_NAME),
        None => PathBuf::from(DEFAULT_OUTPUT_NAME),
    }
}

/// Whether debug logging is requested through the environment
pub fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|v| is_truthy(v.trim()))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_flags_win_over_environment() {
        let config = GeneratorConfig::resolve_with(
            Some(PathBuf::from("src/workflows.rs")),
            Some(PathBuf::from("out/gen.rs")),
            false,
            lookup(&[(FILE_ENV, "other.rs"), (OUTPUT_ENV, "other_gen.rs")]),
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("src/workflows.rs"));
        assert_eq!(config.output, PathBuf::from("out/gen.rs"));
        assert!(!config.debug);
    }

    #[test]
    fn test_environment_supplies_input_and_debug() {
        let config = GeneratorConfig::resolve_with(
            None,
            None,
            false,
            lookup(&[(FILE_ENV, "src/workflows.rs"), (DEBUG_ENV, "true")]),
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("src/workflows.rs"));
        assert_eq!(config.output, PathBuf::from("src/workflow_results_gen.rs"));
        assert!(config.debug);
    }

    #[test]
    fn test_missing_input() {
        let err = GeneratorConfig::resolve_with(None, None, false, lookup(&[(FILE_ENV, "  ")]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingInput { env: FILE_ENV }));
    }

    #[test]
    fn test_default_output_for_bare_file_name() {
        assert_eq!(
            default_output(Path::new("workflows.rs")),
            PathBuf::from("workflow_results_gen.rs")
        );
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
