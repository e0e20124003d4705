//! Source parsing

use crate::error::{GenerateError, Result};
use proc_macro2::{LineColumn, TokenTree};
use quote::ToTokens;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed input file
pub struct SourceFile {
    pub path: PathBuf,
    pub syntax: syn::File,
    pub text: String,
}

impl SourceFile {
    /// Module the file defines, used in the generated header
    ///
    /// `src/workflows.rs` is `workflows`; `src/workflows/mod.rs` is also
    /// `workflows`. Crate roots fall back to `crate`.
    pub fn module_name(&self) -> String {
        module_name(&self.path)
    }

    /// File name as written in the generated header
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Source text of `node`, from the start of its first token to the end
    /// of its last one
    pub fn snippet<T: ToTokens>(&self, node: &T) -> Option<&str> {
        let tokens: Vec<TokenTree> = node.to_token_stream().into_iter().collect();
        let start = self.offset(tokens.first()?.span().start())?;
        let end = self.offset(tokens.last()?.span().end())?;
        self.text.get(start..end)
    }

    /// Byte offset of a span position; lines are 1-based, columns count chars
    fn offset(&self, at: LineColumn) -> Option<usize> {
        let mut offset = 0;
        for (index, line) in self.text.split_inclusive('\n').enumerate() {
            if index + 1 == at.line {
                let column = line
                    .char_indices()
                    .nth(at.column)
                    .map(|(byte, _)| byte)
                    .unwrap_or(line.len());
                return Some(offset + column);
            }
            offset += line.len();
        }
        None
    }
}

/// Parse `text` as a Rust file; `path` is only used for diagnostics
pub fn parse_source(path: &Path, text: &str) -> Result<SourceFile> {
    let syntax = syn::parse_file(text).map_err(|err| {
        let start = err.span().start();
        GenerateError::Parse {
            path: path.to_path_buf(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    })?;

    Ok(SourceFile {
        path: path.to_path_buf(),
        syntax,
        // `syn::parse_file` skips a byte-order mark; spans start after it
        text: text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
    })
}

/// Read and parse a file from disk
pub fn read_source(path: &Path) -> Result<SourceFile> {
    let text = fs::read_to_string(path).map_err(|source| GenerateError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, &text)
}

fn module_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.as_str() {
        "mod" => path
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "crate".to_string()),
        "lib" | "main" | "" => "crate".to_string(),
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name() {
        assert_eq!(module_name(Path::new("src/workflows.rs")), "workflows");
        assert_eq!(module_name(Path::new("src/billing/mod.rs")), "billing");
        assert_eq!(module_name(Path::new("src/lib.rs")), "crate");
        assert_eq!(module_name(Path::new("main.rs")), "crate");
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = parse_source(Path::new("broken.rs"), "fn ok() {}\nstatic X: = ;\n")
            .err()
            .expect("parse must fail");

        match err {
            GenerateError::Parse { path, line, .. } => {
                assert_eq!(path, Path::new("broken.rs"));
                assert_eq!(line, 2);
            }
            other => panic!("expected parse error, got {}", other),
        }
    }

    #[test]
    fn test_snippet_spans_lines() {
        let text = "fn a() {}\nstatic X: Option<u32> = Some(\n    1,\n);\n";
        let source = parse_source(Path::new("x.rs"), text).unwrap();
        let syn::Item::Static(item) = &source.syntax.items[1] else {
            panic!("expected static");
        };
        assert_eq!(source.snippet(&item.ty), Some("Option<u32>"));
        assert_eq!(source.snippet(&item.expr), Some("Some(\n    1,\n)"));
    }

    #[test]
    fn test_parses_valid_file() {
        let source = parse_source(Path::new("src/workflows.rs"), "pub fn a() {}").unwrap();
        assert_eq!(source.syntax.items.len(), 1);
        assert_eq!(source.module_name(), "workflows");
        assert_eq!(source.file_name(), "workflows.rs");
    }
}
