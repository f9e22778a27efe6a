use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::EncodeDerive;

/// Provided for `#[derive(Encode)]`.
pub(crate) fn match_encode_impls(ast: DeriveInput) -> TokenStream {
    // Validate the type and collect its properties.
    let encode_derive = match EncodeDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let (encoder_struct, encoder_impls) = crate::impls::impl_encoder(&encode_derive);
    let auto_register = crate::impls::get_auto_register_impl(encode_derive.meta());

    TokenStream::from(quote! {
        #encoder_struct

        const _: () = {
            #encoder_impls

            #auto_register
        };
    })
}
