use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::Type;

use crate::path;
use crate::property::BoundProperty;
use crate::strategy::{EncodingStrategy, OptionalKind};

// -----------------------------------------------------------------------------
// PropertyPlan

/// A `DelegateSlot<T>` field of the generated encoder.
#[derive(Debug, Clone)]
pub struct DelegateSlotDecl {
    ident: Ident,
    ty: Type,
}

impl DelegateSlotDecl {
    /// Field name, `serializer{index}`.
    #[inline]
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Type of the member the slot encodes.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// Generated fragments for one member.
///
/// Fragments refer to three bindings of the generated `encode` method:
/// `value: &Target`, `generator: &mut dyn Generator` and
/// `context: &EncodeContext`. Helpers are associated functions of the
/// encoder and slots are fields of it, so they are reached through `Self`
/// and `self`.
#[derive(Debug, Clone)]
pub struct PropertyPlan {
    strategy: EncodingStrategy,
    inline: TokenStream,
    helper: Option<TokenStream>,
    slot: Option<DelegateSlotDecl>,
    lookup: Option<TokenStream>,
    bind: Option<TokenStream>,
}

impl PropertyPlan {
    #[inline]
    pub fn strategy(&self) -> EncodingStrategy {
        self.strategy
    }

    /// Statements placed in the encode body.
    #[inline]
    pub fn inline(&self) -> &TokenStream {
        &self.inline
    }

    /// A `serialize_field{index}` routine, for the nullable and optional
    /// numeric strategies.
    #[inline]
    pub fn helper(&self) -> Option<&TokenStream> {
        self.helper.as_ref()
    }

    #[inline]
    pub fn slot(&self) -> Option<&DelegateSlotDecl> {
        self.slot.as_ref()
    }

    /// Registry lookup of a delegated member, bound to a local named
    /// after the slot. Fails without touching the encoder.
    #[inline]
    pub fn lookup(&self) -> Option<&TokenStream> {
        self.lookup.as_ref()
    }

    /// Stores the looked up encoder in the slot.
    #[inline]
    pub fn bind(&self) -> Option<&TokenStream> {
        self.bind.as_ref()
    }
}

// -----------------------------------------------------------------------------
// synthesize

/// Produce the fragments writing `property` with `strategy`.
///
/// `index` is the position of the property in its type and is the only
/// source of generated identifiers, so two properties of one type never
/// share a helper or a slot.
pub fn synthesize(
    property: &BoundProperty,
    strategy: EncodingStrategy,
    index: usize,
    encode_path: &syn::Path,
) -> PropertyPlan {
    let generator_ = path::generator_(encode_path);
    let numeric_ = path::numeric_(encode_path);
    let option_ = path::option_();

    let name = property.name();
    let accessor = property.accessor();
    let descriptor = property.descriptor();
    let nullable = descriptor.kind().is_nullable();

    let mut plan = PropertyPlan {
        strategy,
        inline: TokenStream::new(),
        helper: None,
        slot: None,
        lookup: None,
        bind: None,
    };

    match strategy {
        EncodingStrategy::DirectString => {
            let text = if nullable {
                quote! { #option_::as_deref(&#accessor) }
            } else {
                quote! { #option_::Some(::core::convert::AsRef::<str>::as_ref(&#accessor)) }
            };
            plan.inline = quote! {
                #generator_::write_string_field(generator, #name, #text)?;
            };
        }
        EncodingStrategy::DirectNumber => {
            plan.inline = quote! {
                #generator_::write_number_field(generator, #name, #numeric_::to_number(&#accessor))?;
            };
        }
        EncodingStrategy::NullableNumber => {
            let helper = helper_ident(index);
            let payload = descriptor.payload();
            let signature = helper_signature(&helper, quote!(#option_<&#payload>), encode_path);
            plan.helper = Some(quote! {
                #signature {
                    match value {
                        #option_::None => #generator_::write_null_field(generator, #name),
                        #option_::Some(value) => {
                            #generator_::write_number_field(generator, #name, #numeric_::to_number(value))
                        }
                    }
                }
            });
            let argument = if nullable {
                quote! { #option_::as_ref(&#accessor) }
            } else {
                quote! { #option_::Some(&#accessor) }
            };
            plan.inline = quote! {
                Self::#helper(#argument, generator)?;
            };
        }
        EncodingStrategy::OptionalNumber(kind) => {
            let helper = helper_ident(index);
            let ty = descriptor.ty();
            let signature = helper_signature(&helper, quote!(&#ty), encode_path);
            let number = unwrap_number(kind, encode_path);
            plan.helper = Some(quote! {
                #signature {
                    if let #option_::Some(value) = value {
                        #generator_::write_number_field(generator, #name, #number)
                    } else {
                        #generator_::write_null_field(generator, #name)
                    }
                }
            });
            plan.inline = quote! {
                Self::#helper(&#accessor, generator)?;
            };
        }
        EncodingStrategy::GenericObjectPassthrough => {
            plan.inline = quote! {
                #generator_::write_object_field(generator, #name, &#accessor)?;
            };
        }
        EncodingStrategy::Delegated => {
            let encoder_ = path::encoder_(encode_path);
            let delegate_slot_ = path::delegate_slot_(encode_path);
            let encode_context_ = path::encode_context_(encode_path);

            let slot = slot_ident(index);
            let ty = descriptor.ty();
            plan.inline = quote! {
                #generator_::write_field_name(generator, #name)?;
                #encoder_::encode(#delegate_slot_::get(&self.#slot)?, &#accessor, generator, context)?;
            };
            plan.lookup = Some(quote! {
                let #slot = #encode_context_::find::<#ty>(context)?;
            });
            plan.bind = Some(quote! {
                #delegate_slot_::bind(&self.#slot, #slot)?;
            });
            plan.slot = Some(DelegateSlotDecl {
                ident: slot,
                ty: ty.clone(),
            });
        }
    }

    plan
}

#[inline]
fn helper_ident(index: usize) -> Ident {
    format_ident!("serialize_field{}", index)
}

#[inline]
fn slot_ident(index: usize) -> Ident {
    format_ident!("serializer{}", index)
}

fn helper_signature(helper: &Ident, value_ty: TokenStream, encode_path: &syn::Path) -> TokenStream {
    let generator_ = path::generator_(encode_path);
    let encode_error_ = path::encode_error_(encode_path);
    let result_ = path::result_();
    quote! {
        fn #helper(value: #value_ty, generator: &mut dyn #generator_) -> #result_<(), #encode_error_>
    }
}

// `value` is the `&P` bound by the presence test.
fn unwrap_number(kind: OptionalKind, encode_path: &syn::Path) -> TokenStream {
    let number_ = path::number_(encode_path);
    match kind {
        OptionalKind::Int => quote! { #number_::from_i32(*value) },
        OptionalKind::Long => quote! { #number_::from_i64(*value) },
        OptionalKind::Double => quote! { #number_::from_f64(*value) },
        OptionalKind::Generic => {
            let numeric_ = path::numeric_(encode_path);
            quote! { #numeric_::to_number(value) }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
