//! Workflow attribute macro

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{FnArg, GenericArgument, ItemFn, Pat, PathArguments, ReturnType, Signature, Type};

pub fn workflow_impl(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let input_fn = match syn::parse2::<ItemFn>(input) {
        Ok(input_fn) => input_fn,
        Err(err) => return err.to_compile_error(),
    };

    match check_signature(&input_fn.sig) {
        Ok(()) => quote! { #input_fn },
        Err(err) => {
            let err = err.to_compile_error();
            quote! { #input_fn #err }
        }
    }
}

fn check_signature(sig: &Signature) -> syn::Result<()> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            sig.fn_token,
            "#[workflow] requires an async function",
        ));
    }

    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[workflow] functions cannot be generic",
        ));
    }

    for arg in sig.inputs.iter() {
        match arg {
            FnArg::Typed(pat_type) => {
                if !matches!(&*pat_type.pat, Pat::Ident(_) | Pat::Wild(_)) {
                    return Err(syn::Error::new_spanned(
                        &pat_type.pat,
                        "#[workflow] parameters must be simple identifiers",
                    ));
                }
            }
            FnArg::Receiver(_) => {
                return Err(syn::Error::new_spanned(
                    arg,
                    "#[workflow] does not support methods with self",
                ));
            }
        }
    }

    if sig.inputs.len() != 2 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            format!(
                "#[workflow] functions take exactly two parameters (context, input), found {}",
                sig.inputs.len()
            ),
        ));
    }

    result_types(&sig.output).map(|_| ())
}

/// Ok and error types of a `Result<T, E>` return type
fn result_types(output: &ReturnType) -> syn::Result<(&Type, &Type)> {
    let ty = match output {
        ReturnType::Type(_, ty) => &**ty,
        ReturnType::Default => {
            return Err(syn::Error::new(
                Span::call_site(),
                "#[workflow] must return Result<T, E>",
            ))
        }
    };

    let last = match ty {
        Type::Path(path) => path.path.segments.last().ok_or_else(|| {
            syn::Error::new_spanned(ty, "Invalid return type for #[workflow]")
        })?,
        _ => return Err(syn::Error::new_spanned(ty, "#[workflow] must return Result<T, E>")),
    };

    if last.ident != "Result" {
        return Err(syn::Error::new_spanned(ty, "#[workflow] must return Result<T, E>"));
    }

    let args = match &last.arguments {
        PathArguments::AngleBracketed(args) => args,
        _ => return Err(syn::Error::new_spanned(ty, "#[workflow] must return Result<T, E>")),
    };

    let types: Vec<&Type> = args
        .args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(t) => Some(t),
            _ => None,
        })
        .collect();

    match types.as_slice() {
        [ok, err] if args.args.len() == 2 => Ok((*ok, *err)),
        _ => Err(syn::Error::new_spanned(
            ty,
            "#[workflow] must return Result<T, E> with both type arguments spelled out",
        )),
    }
}
