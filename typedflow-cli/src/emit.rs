//! Code emission
//!
//! Renders resolved records through the minijinja template and checks that
//! the result is a valid Rust file before handing it back.

use crate::error::{GenerateError, Result};
use crate::naming::{format_string, lowercase_first, to_pascal_case, to_snake_case, uppercase_first};
use crate::signature::WorkflowRecord;
use crate::source::SourceFile;
use crate::templates;
use minijinja::Environment;
use serde::Serialize;

/// Everything the template sees
#[derive(Debug, Serialize)]
pub struct TemplateContext {
    pub module_name: String,
    pub source_file: String,
    pub records: Vec<TemplateRecord>,
}

#[derive(Debug, Serialize)]
pub struct TemplateRecord {
    /// Raw name literal, quotes included; the template's filters strip them
    pub name: String,
    pub workflow_func: String,
    pub input_type: String,
    pub result_type: String,
    pub lifted_fn: Option<String>,
}

impl TemplateContext {
    pub fn new(source: &SourceFile, records: &[WorkflowRecord]) -> Self {
        Self {
            module_name: source.module_name(),
            source_file: source.file_name(),
            records: records.iter().map(TemplateRecord::from).collect(),
        }
    }
}

impl From<&WorkflowRecord> for TemplateRecord {
    fn from(record: &WorkflowRecord) -> Self {
        Self {
            name: record.name.clone(),
            workflow_func: record.func.ident().to_string(),
            input_type: record.input_type.clone(),
            result_type: record.result_type.clone(),
            lifted_fn: record.func.lifted_fn(),
        }
    }
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    env.add_filter("format_string", |s: String| format_string(&s));
    env.add_filter("uppercase_first", |s: String| uppercase_first(&s));
    env.add_filter("lowercase_first", |s: String| lowercase_first(&s));
    env.add_filter("pascal_case", |s: String| to_pascal_case(&s));
    env.add_filter("snake_case", |s: String| to_snake_case(&s));

    env.add_template(templates::WORKFLOW_RESULTS, templates::workflow_results())?;
    Ok(env)
}

/// Render the generated file and make sure it parses
pub fn render(context: &TemplateContext) -> Result<String> {
    let env = environment()?;
    let code = env.get_template(templates::WORKFLOW_RESULTS)?.render(context)?;

    syn::parse_file(&code).map_err(|err| {
        let start = err.span().start();
        GenerateError::InvalidOutput {
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    })?;

    tracing::debug!(records = context.records.len(), bytes = code.len(), "rendered generated file");
    Ok(code)
}
