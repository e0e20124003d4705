//! Registry location
//!
//! Finds the single top-level `static`/`const` that lists the workflows.
//! Items marked `#[workflow_registry]` win; without a marker the registry is
//! inferred from its shape, and more than one match is an error rather than
//! a guess.

use crate::error::{GenerateError, Result};
use crate::source::SourceFile;
use syn::visit::Visit;
use syn::{
    Attribute, Expr, ExprArray, Ident, Item, ItemConst, ItemFn, ItemImpl, ItemMod, ItemStatic,
    ItemTrait, PathArguments, Type,
};

/// The located registry item
#[derive(Debug)]
pub struct Registry<'ast> {
    pub ident: String,
    /// Element type as written, e.g. `Workflow` or `typedflow::Workflow`
    pub element_type: String,
    pub marked: bool,
    pub line: usize,
    pub array: &'ast ExprArray,
}

/// Visitor over top-level items collecting registry candidates
#[derive(Default)]
struct RegistryVisitor<'ast> {
    candidates: Vec<Registry<'ast>>,
    malformed: Vec<String>,
}

impl<'ast> RegistryVisitor<'ast> {
    fn has_registry_attr(attrs: &[Attribute]) -> bool {
        attrs.iter().any(|attr| {
            attr.path()
                .segments
                .last()
                .map(|segment| segment.ident == "workflow_registry")
                .unwrap_or(false)
        })
    }

    fn consider(&mut self, attrs: &[Attribute], ident: &Ident, ty: &Type, expr: &'ast Expr) {
        let marked = Self::has_registry_attr(attrs);
        let line = ident.span().start().line;

        let element_type = match element_type(ty) {
            Some(element_type) => element_type,
            None => {
                if marked {
                    self.malformed.push(format!(
                        "`{}` (line {}) is marked #[workflow_registry] but its type `{}` is not `&[T]` or `[T; N]` of a named type",
                        ident,
                        line,
                        type_to_string(ty)
                    ));
                }
                return;
            }
        };

        let array = match array_literal(expr) {
            Some(array) => array,
            None => {
                if marked {
                    self.malformed.push(format!(
                        "`{}` (line {}) is marked #[workflow_registry] but is not initialized with an array literal",
                        ident, line
                    ));
                }
                return;
            }
        };

        tracing::debug!(ident = %ident, line, marked, element_type = %element_type, "registry candidate");

        self.candidates.push(Registry {
            ident: ident.to_string(),
            element_type,
            marked,
            line,
            array,
        });
    }
}

impl<'ast> Visit<'ast> for RegistryVisitor<'ast> {
    fn visit_item_static(&mut self, node: &'ast ItemStatic) {
        self.consider(&node.attrs, &node.ident, &node.ty, &node.expr);
    }

    fn visit_item_const(&mut self, node: &'ast ItemConst) {
        self.consider(&node.attrs, &node.ident, &node.ty, &node.expr);
    }

    // Only top-level items are candidates.
    fn visit_item_fn(&mut self, _node: &'ast ItemFn) {}

    fn visit_item_impl(&mut self, _node: &'ast ItemImpl) {}

    fn visit_item_mod(&mut self, _node: &'ast ItemMod) {}

    fn visit_item_trait(&mut self, _node: &'ast ItemTrait) {}
}

/// Locate the workflow registry of a parsed file
pub fn locate_registry(source: &SourceFile) -> Result<Registry<'_>> {
    let mut visitor = RegistryVisitor::default();
    visitor.visit_file(&source.syntax);

    if let Some(reason) = visitor.malformed.into_iter().next() {
        return Err(GenerateError::RegistryNotFound {
            path: source.path.clone(),
            reason,
        });
    }

    let any_marked = visitor.candidates.iter().any(|c| c.marked);
    let mut pool: Vec<Registry<'_>> = visitor
        .candidates
        .into_iter()
        .filter(|c| if any_marked { c.marked } else { looks_like_records(c) })
        .collect();

    match pool.len() {
        0 => Err(GenerateError::RegistryNotFound {
            path: source.path.clone(),
            reason: "no top-level static or const is initialized with an array of records"
                .to_string(),
        }),
        1 => {
            let registry = pool.remove(0);
            tracing::debug!(ident = %registry.ident, line = registry.line, "using registry");
            Ok(registry)
        }
        _ => Err(GenerateError::AmbiguousRegistry {
            path: source.path.clone(),
            candidates: pool
                .iter()
                .map(|c| format!("`{}` (line {})", c.ident, c.line))
                .collect(),
        }),
    }
}

/// Whether any top-level `static`/`const` carries the registry marker
pub fn has_marked_registry(source: &SourceFile) -> bool {
    source.syntax.items.iter().any(|item| match item {
        Item::Static(item) => RegistryVisitor::has_registry_attr(&item.attrs),
        Item::Const(item) => RegistryVisitor::has_registry_attr(&item.attrs),
        _ => false,
    })
}

/// Element type of `&[T]`, `&'a [T]`, `&[T; N]` or `[T; N]` when `T` is a named type
fn element_type(ty: &Type) -> Option<String> {
    let elem = match ty {
        Type::Reference(reference) => match &*reference.elem {
            Type::Slice(slice) => &*slice.elem,
            Type::Array(array) => &*array.elem,
            _ => return None,
        },
        Type::Array(array) => &*array.elem,
        _ => return None,
    };

    match elem {
        Type::Path(path)
            if path.qself.is_none()
                && path
                    .path
                    .segments
                    .iter()
                    .all(|s| matches!(s.arguments, PathArguments::None)) =>
        {
            Some(
                path.path
                    .segments
                    .iter()
                    .map(|s| s.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::"),
            )
        }
        _ => None,
    }
}

fn array_literal(expr: &Expr) -> Option<&ExprArray> {
    match expr {
        Expr::Array(array) => Some(array),
        Expr::Reference(reference) => match &*reference.expr {
            Expr::Array(array) => Some(array),
            _ => None,
        },
        _ => None,
    }
}

/// Unmarked candidates must hold at least one struct literal, so lookup
/// tables such as `[u32; 3]` are not mistaken for registries. An empty
/// array only qualifies when its element type is `Workflow`.
fn looks_like_records(candidate: &Registry<'_>) -> bool {
    if candidate.array.elems.is_empty() {
        return candidate
            .element_type
            .rsplit("::")
            .next()
            .map(|last| last == "Workflow")
            .unwrap_or(false);
    }
    candidate
        .array
        .elems
        .iter()
        .any(|e| matches!(e, Expr::Struct(_)))
}

fn type_to_string(ty: &Type) -> String {
    quote::quote!(#ty).to_string()
}
