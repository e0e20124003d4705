//! Signature resolution
//!
//! Turns each record's `func` expression into the function the generated
//! code starts, plus the input and result type names read off its signature.

use crate::error::{GenerateError, Result};
use crate::naming::to_snake_case;
use crate::records::RawRecord;
use crate::source::SourceFile;
use quote::{format_ident, quote};
use syn::{
    Expr, ExprClosure, FnArg, GenericArgument, Item, ItemFn, Pat, PathArguments, ReturnType,
    Signature, Type,
};

/// How a record refers to its workflow function
#[derive(Debug, Clone)]
pub enum FuncReference {
    /// A top-level `fn` of the same file
    Named(String),
    /// A closure, lifted into the generated file under `ident`
    Inline { ident: String, lifted: String },
}

impl FuncReference {
    /// Identifier the client registers and starts the workflow under
    pub fn ident(&self) -> &str {
        match self {
            FuncReference::Named(ident) => ident,
            FuncReference::Inline { ident, .. } => ident,
        }
    }

    /// Source of the lifted `pub async fn` for inline closures
    pub fn lifted_fn(&self) -> Option<String> {
        match self {
            FuncReference::Named(_) => None,
            FuncReference::Inline { lifted, .. } => Some(lifted.clone()),
        }
    }
}

/// A fully resolved registry record
#[derive(Debug, Clone)]
pub struct WorkflowRecord {
    /// Name literal as written, quotes included
    pub name: String,
    pub func: FuncReference,
    pub input_type: String,
    pub result_type: String,
    pub line: usize,
}

/// Resolve every extracted record against the file's top-level functions
///
/// Records whose `func` is neither a path nor a closure are dropped.
pub fn resolve_records(source: &SourceFile, records: &[RawRecord<'_>]) -> Result<Vec<WorkflowRecord>> {
    let functions: Vec<&ItemFn> = source
        .syntax
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Fn(item_fn) => Some(item_fn),
            _ => None,
        })
        .collect();

    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        match resolve_record(source, &functions, record)? {
            Some(workflow) => {
                tracing::debug!(
                    name = %record.display_name(),
                    function = workflow.func.ident(),
                    input = %workflow.input_type,
                    result = %workflow.result_type,
                    "resolved workflow"
                );
                resolved.push(workflow);
            }
            None => tracing::warn!(
                name = %record.display_name(),
                line = record.line,
                "`func` is neither a function name nor a closure, skipping"
            ),
        }
    }

    Ok(resolved)
}

fn resolve_record(
    source: &SourceFile,
    functions: &[&ItemFn],
    record: &RawRecord<'_>,
) -> Result<Option<WorkflowRecord>> {
    match peel(record.func) {
        Expr::Path(path) => {
            let function = path_to_string(&path.path);
            let is_plain = path.qself.is_none()
                && path.path.leading_colon.is_none()
                && path.path.segments.len() == 1
                && matches!(path.path.segments[0].arguments, PathArguments::None);

            let item_fn = functions
                .iter()
                .find(|f| is_plain && f.sig.ident == function)
                .ok_or_else(|| GenerateError::UnresolvedFunction {
                    workflow: record.name.clone(),
                    function: function.clone(),
                    line: record.line,
                })?;

            let line = item_fn.sig.ident.span().start().line;
            let (input_type, result_type) = read_signature(&item_fn.sig)
                .map_err(|reason| shape_error(&function, line, reason))?;

            Ok(Some(WorkflowRecord {
                name: record.name.clone(),
                func: FuncReference::Named(function),
                input_type,
                result_type,
                line: record.line,
            }))
        }
        Expr::Closure(closure) => {
            let ident = format!("{}_inline_workflow", to_snake_case(&record.name));
            if functions.iter().any(|f| f.sig.ident == ident) {
                return Err(GenerateError::InvalidRecord {
                    line: record.line,
                    reason: format!(
                        "the closure of {} is lifted as `{}`, which is already declared in this file",
                        record.name, ident
                    ),
                });
            }

            let (input_type, result_type) = read_closure(closure)
                .map_err(|reason| shape_error(&ident, record.line, reason))?;

            let lifted = lift_closure(source, &ident, closure);
            Ok(Some(WorkflowRecord {
                name: record.name.clone(),
                func: FuncReference::Inline { ident, lifted },
                input_type,
                result_type,
                line: record.line,
            }))
        }
        _ => Ok(None),
    }
}

fn shape_error(function: &str, line: usize, reason: String) -> GenerateError {
    GenerateError::SignatureShape {
        function: function.to_string(),
        line,
        reason,
    }
}

/// Strip `&`, `&mut`, parentheses and invisible groups
fn peel(expr: &Expr) -> &Expr {
    match expr {
        Expr::Reference(reference) => peel(&reference.expr),
        Expr::Paren(paren) => peel(&paren.expr),
        Expr::Group(group) => peel(&group.expr),
        other => other,
    }
}

fn read_signature(sig: &Signature) -> std::result::Result<(String, String), String> {
    if !sig.generics.params.is_empty() {
        return Err("generic workflow functions are not supported".to_string());
    }

    if sig.inputs.iter().any(|arg| matches!(arg, FnArg::Receiver(_))) {
        return Err("methods cannot be workflow functions".to_string());
    }

    if sig.inputs.len() != 2 {
        return Err(format!(
            "expected 2 parameters (context, input), found {}",
            sig.inputs.len()
        ));
    }

    let input = match &sig.inputs[1] {
        FnArg::Typed(pat_type) => &*pat_type.ty,
        FnArg::Receiver(_) => return Err("methods cannot be workflow functions".to_string()),
    };

    let input_type = simple_type_name(input).map_err(|shape| format!("input parameter is a {}", shape))?;
    let result_type = result_ok_type(&sig.output)?;
    Ok((input_type, result_type))
}

fn read_closure(closure: &ExprClosure) -> std::result::Result<(String, String), String> {
    if closure.inputs.len() != 2 {
        return Err(format!(
            "expected 2 parameters (context, input), found {}",
            closure.inputs.len()
        ));
    }

    let mut types = Vec::with_capacity(2);
    for input in &closure.inputs {
        match input {
            Pat::Type(pat_type) => types.push(&*pat_type.ty),
            _ => return Err("closure parameters must have type annotations".to_string()),
        }
    }

    if matches!(closure.output, ReturnType::Default) {
        return Err("closure must declare its `Result<T, E>` return type".to_string());
    }

    let input_type = simple_type_name(types[1]).map_err(|shape| format!("input parameter is a {}", shape))?;
    let result_type = result_ok_type(&closure.output)?;
    Ok((input_type, result_type))
}

/// `T` of a `Result<T, E>` return type
fn result_ok_type(output: &ReturnType) -> std::result::Result<String, String> {
    let ty = match output {
        ReturnType::Default => return Err("missing return type, expected `Result<T, E>`".to_string()),
        ReturnType::Type(_, ty) => &**ty,
    };

    let segment = match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
    .filter(|segment| segment.ident == "Result")
    .ok_or_else(|| format!("return type `{}` is not `Result<T, E>`", type_to_string(ty)))?;

    let args: Vec<&Type> = match &segment.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    if args.len() != 2 {
        return Err(format!(
            "return type `{}` must spell out both `Result` arguments, found {}",
            type_to_string(ty),
            args.len()
        ));
    }

    simple_type_name(args[0]).map_err(|shape| format!("result type is a {}", shape))
}

/// Name of a simple named type, or a description of why it is not one
fn simple_type_name(ty: &Type) -> std::result::Result<String, String> {
    let rendered = type_to_string(ty);
    match ty {
        Type::Paren(paren) => simple_type_name(&paren.elem),
        Type::Group(group) => simple_type_name(&group.elem),
        Type::Path(path) if path.qself.is_some() => Err(format!("qualified path `{}`", rendered)),
        Type::Path(path) => {
            if path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
                return Err(format!("qualified path `{}`", rendered));
            }
            let segment = &path.path.segments[0];
            if !matches!(segment.arguments, PathArguments::None) {
                return Err(format!("generic type `{}`", rendered));
            }
            Ok(segment.ident.to_string())
        }
        Type::Reference(_) => Err(format!("reference `{}`", rendered)),
        Type::Tuple(_) => Err(format!("tuple `{}`", rendered)),
        Type::Slice(_) | Type::Array(_) => Err(format!("slice or array `{}`", rendered)),
        _ => Err(format!("unsupported type `{}`", rendered)),
    }
}

/// Rebuild a closure as `pub async fn`, keeping its source formatting
///
/// Falls back to token text when a piece cannot be located in the source.
fn lift_closure(source: &SourceFile, ident: &str, closure: &ExprClosure) -> String {
    let params = source.snippet(&closure.inputs).map(|text| {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end_matches(',')
            .to_string()
    });
    let output = source
        .snippet(&closure.output)
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "));
    let body = match &*closure.body {
        Expr::Block(block) => source.snippet(block).map(dedent),
        _ => None,
    };

    match (params, output, body) {
        (Some(params), Some(output), Some(body)) => {
            format!("pub async fn {}({}) {} {}", ident, params, output, body)
        }
        _ => lift_closure_tokens(ident, closure),
    }
}

fn lift_closure_tokens(ident: &str, closure: &ExprClosure) -> String {
    let ident = format_ident!("{}", ident);
    let params = closure.inputs.iter();
    let output = &closure.output;
    let body = match &*closure.body {
        Expr::Block(block) => quote!(#block),
        other => quote!({ #other }),
    };

    quote! {
        pub async fn #ident(#(#params),*) #output #body
    }
    .to_string()
}

/// Shift a block left so its closing brace lands in column 0
fn dedent(block: &str) -> String {
    let indent = block
        .lines()
        .last()
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .unwrap_or(0);

    block
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                return line;
            }
            let leading = line.len() - line.trim_start_matches([' ', '\t']).len();
            &line[leading.min(indent)..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn path_to_string(path: &syn::Path) -> String {
    let joined = path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{}", joined)
    } else {
        joined
    }
}

/// Render a type the way it is usually written
fn type_to_string(ty: &Type) -> String {
    quote!(#ty)
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}
