//! Workflow registry attribute macro

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, Item, Type};

pub fn workflow_registry_impl(attr: TokenStream, input: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new_spanned(attr, "#[workflow_registry] takes no arguments")
            .to_compile_error();
    }

    let item = match syn::parse2::<Item>(input) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error(),
    };

    match check_registry(&item) {
        Ok(()) => quote! { #item },
        Err(err) => {
            let err = err.to_compile_error();
            quote! { #item #err }
        }
    }
}

fn check_registry(item: &Item) -> syn::Result<()> {
    let (ty, expr) = match item {
        Item::Static(item) => (&*item.ty, &*item.expr),
        Item::Const(item) => (&*item.ty, &*item.expr),
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "#[workflow_registry] must be placed on a static or const",
            ))
        }
    };

    if !is_array_type(ty) {
        return Err(syn::Error::new_spanned(
            ty,
            "#[workflow_registry] expects a `&[T]` or `[T; N]` type",
        ));
    }

    if !is_array_literal(expr) {
        return Err(syn::Error::new_spanned(
            expr,
            "#[workflow_registry] must be initialized with an array literal",
        ));
    }

    Ok(())
}

fn is_array_type(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => matches!(&*reference.elem, Type::Slice(_) | Type::Array(_)),
        Type::Array(_) => true,
        _ => false,
    }
}

fn is_array_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Array(_) => true,
        Expr::Reference(reference) => matches!(&*reference.expr, Expr::Array(_)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(source: &str) -> syn::Result<()> {
        check_registry(&syn::parse_str::<Item>(source).unwrap())
    }

    #[test]
    fn test_accepts_static_slice() {
        assert!(check("static WORKFLOWS: &[Workflow] = &[Workflow { name: \"a\" }];").is_ok());
        assert!(check("pub const WORKFLOWS: [Workflow; 0] = [];").is_ok());
    }

    #[test]
    fn test_rejects_non_array_items() {
        let err = check("fn workflows() {}").unwrap_err();
        assert!(err.to_string().contains("static or const"));

        let err = check("static WORKFLOWS: Vec<Workflow> = Vec::new();").unwrap_err();
        assert!(err.to_string().contains("`&[T]` or `[T; N]`"));

        let err = check("static WORKFLOWS: &[Workflow] = make_workflows();").unwrap_err();
        assert!(err.to_string().contains("array literal"));
    }

    #[test]
    fn test_rejects_arguments() {
        let output = workflow_registry_impl(quote! { strict }, quote! { static A: [u8; 0] = []; });
        assert!(output.to_string().contains("takes no arguments"));
    }
}
