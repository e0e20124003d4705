//! Generator driver
//!
//! Runs the pipeline for one file or a directory of files and writes the
//! results. Output is written to a temporary file in the target directory
//! and renamed over the target only once everything succeeded.

use crate::config::GeneratorConfig;
use crate::emit::{render, TemplateContext};
use crate::error::{GenerateError, Result};
use crate::records::extract_records;
use crate::registry::{has_marked_registry, locate_registry};
use crate::signature::{resolve_records, WorkflowRecord};
use crate::source::{parse_source, read_source, SourceFile};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Rendered output of one input file
#[derive(Debug)]
pub struct Generated {
    pub code: String,
    pub records: Vec<WorkflowRecord>,
}

/// Whether a `--check` run found the output current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Stale,
    Missing,
}

/// Resolve the records of a parsed file without rendering
pub fn resolve(source: &SourceFile) -> Result<Vec<WorkflowRecord>> {
    let registry = locate_registry(source)?;
    let raw = extract_records(&registry)?;
    let records = resolve_records(source, &raw)?;

    if records.is_empty() {
        tracing::warn!(
            registry = %registry.ident,
            path = %source.path.display(),
            "registry has no resolvable workflows, generating an empty file"
        );
    }
    Ok(records)
}

/// Run the whole pipeline on a parsed file
pub fn generate_source(source: &SourceFile) -> Result<Generated> {
    let records = resolve(source)?;
    let code = render(&TemplateContext::new(source, &records))?;
    Ok(Generated { code, records })
}

/// Run the pipeline on in-memory text; `path` names the file in the output
pub fn generate_text(path: &Path, text: &str) -> Result<Generated> {
    generate_source(&parse_source(path, text)?)
}

/// Generate for one input and write the output
pub fn generate_file(config: &GeneratorConfig) -> Result<Generated> {
    tracing::debug!(input = %config.input.display(), output = %config.output.display(), "generating");
    let generated = generate_source(&read_source(&config.input)?)?;
    write_atomic(&config.output, &generated.code)?;
    Ok(generated)
}

/// Render for one input and compare with what is on disk
pub fn check_file(config: &GeneratorConfig) -> Result<CheckOutcome> {
    let generated = generate_source(&read_source(&config.input)?)?;

    let outcome = match fs::read_to_string(&config.output) {
        Ok(existing) if existing == generated.code => CheckOutcome::UpToDate,
        Ok(_) => CheckOutcome::Stale,
        Err(err) if err.kind() == io::ErrorKind::NotFound => CheckOutcome::Missing,
        Err(source) => {
            return Err(GenerateError::InputRead {
                path: config.output.clone(),
                source,
            })
        }
    };
    tracing::debug!(output = %config.output.display(), ?outcome, "checked");
    Ok(outcome)
}

/// Files under `dir` declaring a `#[workflow_registry]`, each with its default output
///
/// Fails with `OutputConflict` when two inputs would share an output.
pub fn plan_directory(dir: &Path, debug: bool) -> Result<Vec<GeneratorConfig>> {
    let mut configs = Vec::new();
    let mut outputs: HashMap<PathBuf, PathBuf> = HashMap::new();

    let mut entries: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|ext| ext == "rs").unwrap_or(false))
        .collect();
    entries.sort();

    for path in entries {
        let text = fs::read_to_string(&path).map_err(|source| GenerateError::InputRead {
            path: path.clone(),
            source,
        })?;
        if !text.contains("workflow_registry") {
            continue;
        }
        if !has_marked_registry(&parse_source(&path, &text)?) {
            continue;
        }

        let config = GeneratorConfig::for_input(path, debug);
        if let Some(first) = outputs.get(&config.output) {
            return Err(GenerateError::OutputConflict {
                first: first.clone(),
                second: config.input,
                output: config.output,
            });
        }
        outputs.insert(config.output.clone(), config.input.clone());
        configs.push(config);
    }

    tracing::debug!(dir = %dir.display(), inputs = configs.len(), "planned directory");
    Ok(configs)
}

/// Build output and hidden directories never hold registries
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "target" || name.starts_with('.')
}

/// Generate every registry under `dir`
///
/// Everything is rendered before the first file is written, so a failing
/// input leaves all outputs untouched.
pub fn generate_directory(dir: &Path, debug: bool) -> Result<Vec<(GeneratorConfig, Generated)>> {
    let mut results = Vec::new();
    for config in plan_directory(dir, debug)? {
        let generated = generate_source(&read_source(&config.input)?)?;
        results.push((config, generated));
    }

    for (config, generated) in &results {
        write_atomic(&config.output, &generated.code)?;
    }
    Ok(results)
}

/// Write `contents` to `path` through a temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let write_error = |source: std::io::Error| GenerateError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tempfile::Builder::new()
        .prefix(".typedflow-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote generated file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WORKFLOWS: &str = r#"
use typedflow::{FrameworkError, Workflow, WorkflowContext};

#[typedflow::workflow_registry]
pub static WORKFLOWS: &[Workflow] = &[
    Workflow { name: "sayHello", description: "greets", func: &hello_workflow },
];

pub async fn hello_workflow(_ctx: WorkflowContext, name: String) -> Result<Response, FrameworkError> {
    Ok(Response { res: name })
}
"#;

    fn no_temp_files(dir: &Path) -> bool {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .all(|e| !e.file_name().to_string_lossy().ends_with(".tmp"))
    }

    #[test]
    fn test_generate_file_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("workflows.rs");
        fs::write(&input, WORKFLOWS).unwrap();

        let config = GeneratorConfig::for_input(input, false);
        let generated = generate_file(&config).unwrap();

        let written = fs::read_to_string(dir.path().join("workflow_results_gen.rs")).unwrap();
        assert_eq!(written, generated.code);
        assert_eq!(generated.records.len(), 1);
        assert!(no_temp_files(dir.path()));
    }

    #[test]
    fn test_failure_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("workflows.rs");
        let output = dir.path().join("workflow_results_gen.rs");
        fs::write(&input, WORKFLOWS.replace("&hello_workflow", "&missing")).unwrap();
        fs::write(&output, "// previous\n").unwrap();

        let config = GeneratorConfig::for_input(input, false);
        let err = generate_file(&config).unwrap_err();

        assert!(matches!(err, GenerateError::UnresolvedFunction { .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "// previous\n");
        assert!(no_temp_files(dir.path()));
    }

    #[test]
    fn test_check_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("workflows.rs");
        fs::write(&input, WORKFLOWS).unwrap();
        let config = GeneratorConfig::for_input(input, false);

        assert_eq!(check_file(&config).unwrap(), CheckOutcome::Missing);
        generate_file(&config).unwrap();
        assert_eq!(check_file(&config).unwrap(), CheckOutcome::UpToDate);
        fs::write(&config.output, "// edited\n").unwrap();
        assert_eq!(check_file(&config).unwrap(), CheckOutcome::Stale);
    }

    #[test]
    fn test_check_file_reports_unreadable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("workflows.rs");
        fs::write(&input, WORKFLOWS).unwrap();
        let config = GeneratorConfig::for_input(input, false);
        fs::create_dir(&config.output).unwrap();

        match check_file(&config) {
            Err(GenerateError::InputRead { path, .. }) => assert_eq!(path, config.output),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_registry_generates_header_only() {
        let generated = generate_text(
            Path::new("workflows.rs"),
            "#[workflow_registry]\nstatic WORKFLOWS: &[Workflow] = &[];",
        )
        .unwrap();
        assert!(generated.records.is_empty());
        assert!(generated.code.starts_with("// Code generated by typedflow from workflows.rs."));
        assert!(!generated.code.contains("pub async fn"));
    }

    #[test]
    fn test_directory_mode() {
        let dir = tempfile::tempdir().unwrap();
        let billing = dir.path().join("billing");
        fs::create_dir(&billing).unwrap();
        fs::write(dir.path().join("workflows.rs"), WORKFLOWS).unwrap();
        fs::write(billing.join("mod.rs"), WORKFLOWS).unwrap();
        fs::write(dir.path().join("lib.rs"), "pub mod billing;\npub mod workflows;\n").unwrap();

        let results = generate_directory(dir.path(), false).unwrap();
        assert_eq!(results.len(), 2);
        assert!(billing.join("workflow_results_gen.rs").exists());
        assert!(dir.path().join("workflow_results_gen.rs").exists());

        let billing_code = fs::read_to_string(billing.join("workflow_results_gen.rs")).unwrap();
        assert!(billing_code.contains("registered in `billing`"));
    }

    #[test]
    fn test_directory_mode_skips_target_and_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target").join("debug");
        let hidden = dir.path().join(".cache");
        fs::create_dir_all(&target).unwrap();
        fs::create_dir_all(&hidden).unwrap();
        fs::write(dir.path().join("workflows.rs"), WORKFLOWS).unwrap();
        fs::write(target.join("workflows.rs"), WORKFLOWS).unwrap();
        fs::write(hidden.join("workflows.rs"), WORKFLOWS).unwrap();

        let configs = plan_directory(dir.path(), false).unwrap();
        let inputs: Vec<PathBuf> = configs.into_iter().map(|c| c.input).collect();
        assert_eq!(inputs, vec![dir.path().join("workflows.rs")]);
    }

    #[test]
    fn test_directory_output_conflict() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), WORKFLOWS).unwrap();
        fs::write(dir.path().join("b.rs"), WORKFLOWS).unwrap();

        match generate_directory(dir.path(), false) {
            Err(GenerateError::OutputConflict { first, second, output }) => {
                assert_eq!(first, dir.path().join("a.rs"));
                assert_eq!(second, dir.path().join("b.rs"));
                assert_eq!(output, dir.path().join("workflow_results_gen.rs"));
            }
            other => panic!("expected conflict, got {:?}", other.map(|r| r.len())),
        }
        assert!(!dir.path().join("workflow_results_gen.rs").exists());
    }
}
