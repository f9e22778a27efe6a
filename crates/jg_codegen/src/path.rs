//! Paths of runtime items referenced by generated code.
//!
//! Every helper takes the path of the runtime crate as seen from the crate
//! being expanded (`::jg_encode` or `::jsongen::encode`), so that moving an
//! item in the runtime only needs a change here.

use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub fn generator_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::Generator
    }
}

#[inline]
pub fn encoder_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::Encoder
    }
}

#[inline]
pub fn encode_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::Encode
    }
}

#[inline]
pub fn encode_context_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::EncodeContext
    }
}

#[inline]
pub fn encode_error_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::EncodeError
    }
}

#[inline]
pub fn binding_error_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::BindingError
    }
}

#[inline]
pub fn delegate_slot_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::DelegateSlot
    }
}

#[inline]
pub fn number_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::Number
    }
}

#[inline]
pub fn numeric_(encode_path: &syn::Path) -> TokenStream {
    quote! {
        #encode_path::Numeric
    }
}

#[inline]
pub fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}

#[inline]
pub fn result_() -> TokenStream {
    quote! {
        ::core::result::Result
    }
}
