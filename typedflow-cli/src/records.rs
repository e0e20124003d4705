//! Record extraction
//!
//! Walks the registry's array literal in source order and pulls `name`,
//! `description` and `func` out of every struct-literal element.

use crate::error::{GenerateError, Result};
use crate::naming::{format_string, is_valid_identifier, to_pascal_case, to_snake_case};
use crate::registry::Registry;
use std::collections::HashMap;
use syn::{Expr, ExprLit, ExprStruct, Lit, Member};

/// One registry element that carries a `func` field
#[derive(Debug)]
pub struct RawRecord<'ast> {
    /// Name literal as written, quotes included
    pub name: String,
    pub line: usize,
    pub func: &'ast Expr,
}

impl RawRecord<'_> {
    /// Name without the surrounding quotes
    pub fn display_name(&self) -> String {
        format_string(&self.name)
    }
}

/// Extract the records of a located registry
pub fn extract_records<'ast>(registry: &Registry<'ast>) -> Result<Vec<RawRecord<'ast>>> {
    let mut records = Vec::new();

    for elem in &registry.array.elems {
        let Expr::Struct(literal) = elem else {
            tracing::debug!(registry = %registry.ident, "skipping non-struct registry element");
            continue;
        };

        if let Some(record) = extract_record(literal)? {
            records.push(record);
        }
    }

    check_unique(&records)?;

    tracing::debug!(registry = %registry.ident, count = records.len(), "extracted records");
    Ok(records)
}

fn extract_record(literal: &ExprStruct) -> Result<Option<RawRecord<'_>>> {
    let line = literal.brace_token.span.open().start().line;
    let mut name = None;
    let mut func = None;

    for field in &literal.fields {
        let Member::Named(key) = &field.member else {
            continue;
        };

        if key == "name" {
            name = string_literal(&field.expr);
        } else if key == "description" {
            if let Some(description) = string_literal(&field.expr) {
                tracing::debug!(line, description = %format_string(&description), "workflow description");
            }
        } else if key == "func" {
            func = Some(&field.expr);
        }
    }

    let Some(func) = func else {
        tracing::warn!(line, "registry element has no `func` field, skipping");
        return Ok(None);
    };

    let name = name.ok_or_else(|| GenerateError::InvalidRecord {
        line,
        reason: "`name` must be a string literal".to_string(),
    })?;

    let stripped = format_string(&name);
    if !is_valid_identifier(&stripped) {
        return Err(GenerateError::InvalidRecord {
            line,
            reason: format!(
                "name {} cannot be used in an identifier (letters, digits, `_` and `-` only, not starting with a digit)",
                name
            ),
        });
    }

    // `_1` passes the check above but loses its prefix once converted
    let pascal = to_pascal_case(&name);
    let starts_with_letter = pascal
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false);
    if to_snake_case(&name).is_empty() || !starts_with_letter {
        return Err(GenerateError::InvalidRecord {
            line,
            reason: format!(
                "name {} does not produce usable identifiers (`{}Run`), it needs a letter before any digit",
                name, pascal
            ),
        });
    }

    Ok(Some(RawRecord { name, line, func }))
}

/// Names that collapse to the same identifiers would emit duplicate items
fn check_unique(records: &[RawRecord<'_>]) -> Result<()> {
    let mut seen_snake: HashMap<String, &RawRecord<'_>> = HashMap::new();
    let mut seen_pascal: HashMap<String, &RawRecord<'_>> = HashMap::new();

    for record in records {
        let snake = to_snake_case(&record.name);
        let pascal = to_pascal_case(&record.name);
        let previous = seen_snake
            .get(&snake)
            .or_else(|| seen_pascal.get(&pascal))
            .copied();

        if let Some(previous) = previous {
            return Err(GenerateError::InvalidRecord {
                line: record.line,
                reason: format!(
                    "name {} clashes with {} (line {}) once converted to `{}`/`{}`",
                    record.name, previous.name, previous.line, snake, pascal
                ),
            });
        }

        seen_snake.insert(snake, record);
        seen_pascal.insert(pascal, record);
    }

    Ok(())
}

/// String literal value, re-quoted so it reads like the source
fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Some(format!("\"{}\"", lit.value())),
        Expr::Paren(paren) => string_literal(&paren.expr),
        Expr::Group(group) => string_literal(&group.expr),
        _ => None,
    }
}
