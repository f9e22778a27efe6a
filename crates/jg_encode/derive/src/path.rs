//! Paths of runtime items, see also [`jg_codegen::path`].

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) use jg_codegen::path::*;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `jg_encode` crate.
///
/// 1. For crates that depend on `jg_encode`, `::jg_encode` is returned.
/// 2. For crates that depend on `jsongen`, `::jsongen::encode` is returned.
/// 3. For other situations, `::jg_encode` is returned, but this may be incorrect.
///
/// Reading the caller's manifest is not cheap, so the path is resolved once
/// per derive and passed around.
pub(crate) fn jg_encode() -> syn::Path {
    jg_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("jg_encode"))
}

#[inline(always)]
pub(crate) fn auto_register_(jg_encode_path: &syn::Path) -> TokenStream {
    quote! {
        #jg_encode_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn phantom_data_() -> TokenStream {
    quote! {
        ::core::marker::PhantomData
    }
}
