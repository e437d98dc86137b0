// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `#[logged_test]`: wraps a test in a [`jfs_test_utils::TestLoggerGuard`] and
//! exposes a `logger` binding to the test body.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn, ReturnType, Type};

/// ```rust,ignore
/// use jfs_test_utils::logged_test;
///
/// #[logged_test]
/// fn my_test() {
///     logger.log("running").unwrap();
/// }
/// ```
#[proc_macro_attribute]
pub fn logged_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(Span::call_site(), "#[logged_test] does not accept arguments")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as ItemFn);

    if let Some(async_token) = &input.sig.asyncness {
        return syn::Error::new(
            async_token.span(),
            "#[logged_test] cannot be applied to async functions",
        )
        .to_compile_error()
        .into();
    }

    generate_logged_test(input)
}

fn generate_logged_test(mut input: ItemFn) -> TokenStream {
    input.attrs.retain(|attr| !is_logged_attr(attr));

    let fn_ident = &input.sig.ident;
    let fn_name = fn_ident.to_string();

    if !input.sig.inputs.is_empty() {
        return syn::Error::new(
            fn_ident.span(),
            "#[logged_test] can only be applied to functions without parameters",
        )
        .to_compile_error()
        .into();
    }

    let visibility = &input.vis;
    let generics = &input.sig.generics;
    let output = &input.sig.output;
    let block = &input.block;
    let other_attrs = &input.attrs;
    let finish = finish_body(output);

    let expanded = quote! {
        #[::core::prelude::v1::test]
        #(#other_attrs)*
        #visibility fn #fn_ident #generics () #output {
            let mut __guard = ::jfs_test_utils::TestLoggerGuard::new(#fn_name)
                .expect("failed to create TestLogger");
            let mut logger = __guard.logger();
            let _ = &mut logger;

            let inner_result = { #block };
            #finish
        }
    };

    expanded.into()
}

fn finish_body(output: &ReturnType) -> proc_macro2::TokenStream {
    match output {
        ReturnType::Type(_, ty) if is_result_type(ty) => quote! {
            match inner_result {
                ::std::result::Result::Ok(value) => {
                    if let Err(e) = __guard.finish_success() {
                        panic!("failed to finalize TestLogger: {}", e);
                    }
                    ::std::result::Result::Ok(value)
                }
                ::std::result::Result::Err(err) => {
                    if let Err(e) = __guard.finish_failure(format!("{:?}", err)) {
                        eprintln!("failed to finalize TestLogger after error: {}", e);
                    }
                    ::std::result::Result::Err(err)
                }
            }
        },
        _ => quote! {
            if let Err(e) = __guard.finish_success() {
                panic!("failed to finalize TestLogger: {}", e);
            }
            inner_result
        },
    }
}

fn is_result_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result"),
        _ => false,
    }
}

fn is_logged_attr(attr: &syn::Attribute) -> bool {
    attr.path().segments.last().is_some_and(|segment| segment.ident == "logged_test")
}
