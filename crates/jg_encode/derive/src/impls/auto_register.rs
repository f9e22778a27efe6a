use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::EncodeMeta;

/// `inventory` submission of the type for `#[encode(auto_register)]`.
///
/// Empty without the attribute, without the `auto_register` feature, and
/// for generic types, which have no single `TypeId` to register.
pub(crate) fn get_auto_register_impl(meta: &EncodeMeta) -> TokenStream {
    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    if !cfg!(feature = "auto_register") || meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let auto_register_ = crate::path::auto_register_(meta.jg_encode_path());
    let target = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#target as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::get_auto_register_impl;
    use crate::derive_data::EncodeDerive;

    fn submission(input: DeriveInput) -> String {
        let derive = EncodeDerive::from_input(&input).unwrap();
        get_auto_register_impl(derive.meta()).to_string()
    }

    #[test]
    fn only_marked_concrete_types_are_submitted() {
        let plain = submission(parse_quote! {
            struct Plain { id: u32 }
        });
        assert!(plain.is_empty());

        let generic = submission(parse_quote! {
            #[encode(auto_register)]
            struct Generic<T> { inner: T }
        });
        assert!(generic.is_empty());

        let marked = submission(parse_quote! {
            #[encode(auto_register)]
            struct Marked { id: u32 }
        });
        assert_eq!(marked.contains("inventory :: submit"), cfg!(feature = "auto_register"));
        if cfg!(feature = "auto_register") {
            assert!(marked.contains("< Marked as"));
        }
    }
}
