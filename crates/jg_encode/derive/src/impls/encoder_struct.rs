use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::EncodeDerive;

/// Generate the encoder struct and its impls.
///
/// The struct is returned separately so that it can be emitted next to the
/// deriving type, where users can name it. The impls go into an anonymous
/// const block.
///
/// ```ignore
/// pub struct Foo_GeneratedSerializer {
///     serializer2: DelegateSlot<Vec<Bar>>,
///     _marker: PhantomData<fn() -> Foo>,
/// }
///
/// impl Foo_GeneratedSerializer {
///     pub const fn new() -> Self { ... }
///     fn serialize_field1(...) -> Result<(), EncodeError> { ... }
/// }
///
/// impl Encoder<Foo> for Foo_GeneratedSerializer {
///     fn encode(&self, value: &Foo, generator: &mut dyn Generator, context: &EncodeContext<'_>) -> ... { ... }
///     fn resolve(&self, context: &EncodeContext<'_>) -> ... { ... }
///     fn requires_resolution(&self) -> bool { true }
/// }
///
/// impl Encode for Foo {
///     type Encoder = Foo_GeneratedSerializer;
/// }
/// ```
pub(crate) fn impl_encoder(info: &EncodeDerive) -> (TokenStream, TokenStream) {
    let meta = info.meta();
    let jg_encode_path = meta.jg_encode_path();

    let plan = jg_codegen::assemble(meta.ident(), info.properties(), jg_encode_path);

    let generator_ = crate::path::generator_(jg_encode_path);
    let encoder_ = crate::path::encoder_(jg_encode_path);
    let encode_ = crate::path::encode_(jg_encode_path);
    let encode_context_ = crate::path::encode_context_(jg_encode_path);
    let encode_error_ = crate::path::encode_error_(jg_encode_path);
    let binding_error_ = crate::path::binding_error_(jg_encode_path);
    let delegate_slot_ = crate::path::delegate_slot_(jg_encode_path);
    let phantom_data_ = crate::path::phantom_data_();
    let result_ = crate::path::result_();

    let target = plan.target();
    let encoder = plan.encoder_ident();
    let vis = meta.vis();
    let allow_deprecated = meta.allow_deprecated();

    let generics = meta.bounded_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let slot_fields = plan.slots().map(|slot| {
        let ident = slot.ident();
        let ty = slot.ty();
        quote! { #ident: #delegate_slot_<#ty>, }
    });
    let slot_inits = plan.slots().map(|slot| {
        let ident = slot.ident();
        quote! { #ident: #delegate_slot_::new(), }
    });
    let helpers = plan.helpers();
    let encode_body = plan.encode_body();

    let resolve = plan.resolve_body().map(|resolve_body| {
        quote! {
            fn resolve(&self, context: &#encode_context_<'_>) -> #result_<(), #binding_error_> {
                #resolve_body
            }

            #[inline]
            fn requires_resolution(&self) -> bool {
                true
            }
        }
    });

    let doc = format!(
        "Encoder of [`{target}`], generated by `#[derive(Encode)]`.\n\n\
         Write-only; build it with `new` and register it in an `EncoderRegistry`."
    );

    let encoder_struct = quote! {
        #[doc = #doc]
        #[allow(non_camel_case_types)]
        #allow_deprecated
        #vis struct #encoder #impl_generics #where_clause {
            #(#slot_fields)*
            _marker: #phantom_data_<fn() -> #target #ty_generics>,
        }
    };

    let encoder_impls = quote! {
        #allow_deprecated
        impl #impl_generics #encoder #ty_generics #where_clause {
            /// Create the encoder with every delegate slot unbound.
            #[inline]
            pub const fn new() -> Self {
                Self {
                    #(#slot_inits)*
                    _marker: #phantom_data_,
                }
            }

            #(#helpers)*
        }

        #allow_deprecated
        impl #impl_generics ::core::default::Default for #encoder #ty_generics #where_clause {
            #[inline]
            fn default() -> Self {
                Self::new()
            }
        }

        #[automatically_derived]
        #allow_deprecated
        impl #impl_generics #encoder_<#target #ty_generics> for #encoder #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn encode(
                &self,
                value: &#target #ty_generics,
                generator: &mut dyn #generator_,
                context: &#encode_context_<'_>,
            ) -> #result_<(), #encode_error_> {
                #encode_body
            }

            #resolve
        }

        #[automatically_derived]
        #allow_deprecated
        impl #impl_generics #encode_ for #target #ty_generics #where_clause {
            type Encoder = #encoder #ty_generics;
        }
    };

    (encoder_struct, encoder_impls)
}
