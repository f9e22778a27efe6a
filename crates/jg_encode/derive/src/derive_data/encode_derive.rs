use std::collections::HashSet;

use jg_codegen::BoundProperty;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::visit_mut::VisitMut;
use syn::{Data, DeriveInput, Fields, LitStr, Type, parse_quote};

use super::{EncodeMeta, FieldAttributes, TypeAttributes};
use crate::utils::ReplaceSelf;

/// A struct accepted by `#[derive(Encode)]`, with its properties in output
/// order.
pub(crate) struct EncodeDerive<'a> {
    meta: EncodeMeta<'a>,
    properties: Vec<BoundProperty>,
}

impl<'a> EncodeDerive<'a> {
    /// Validate the input and collect its properties.
    ///
    /// Getters declared on the type come first, in declaration order,
    /// followed by the fields that are not skipped. `Self` in member types
    /// is replaced by the type itself.
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new(
                        fields.span(),
                        "`Encode` needs named fields, tuple structs are not supported",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Encode` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Encode` cannot be derived for unions",
                ));
            }
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Encode` cannot be derived for types with lifetime parameters",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let ident = &input.ident;
        let (_, ty_generics, _) = input.generics.split_for_impl();
        let mut collector = PropertyCollector::new(parse_quote!(#ident #ty_generics));

        for getter in &attrs.getters {
            let method = &getter.method;
            let name = match &getter.name {
                Some(name) => name.clone(),
                None => LitStr::new(&method.unraw().to_string(), method.span()),
            };
            collector.push(&name, getter.ty.clone(), quote!(value.#method()))?;
        }

        for field in fields.into_iter().flatten() {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip.is_some() {
                continue;
            }
            let Some(ident) = &field.ident else {
                continue;
            };
            let name = match field_attrs.rename {
                Some(name) => name,
                None => LitStr::new(&ident.unraw().to_string(), ident.span()),
            };
            collector.push(&name, field.ty.clone(), quote!(value.#ident))?;
        }

        Ok(Self {
            meta: EncodeMeta::new(attrs, &input.ident, &input.vis, &input.generics),
            properties: collector.properties,
        })
    }

    #[inline]
    pub fn meta(&self) -> &EncodeMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn properties(&self) -> &[BoundProperty] {
        &self.properties
    }
}

struct PropertyCollector {
    target: Type,
    names: HashSet<String>,
    properties: Vec<BoundProperty>,
}

impl PropertyCollector {
    fn new(target: Type) -> Self {
        Self {
            target,
            names: HashSet::new(),
            properties: Vec::new(),
        }
    }

    fn push(
        &mut self,
        name: &LitStr,
        mut ty: Type,
        accessor: proc_macro2::TokenStream,
    ) -> syn::Result<()> {
        let value = name.value();
        if value.is_empty() {
            return Err(syn::Error::new(name.span(), "property name must not be empty"));
        }
        if !self.names.insert(value.clone()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate property name `{value}`"),
            ));
        }
        ReplaceSelf::new(&self.target).visit_type_mut(&mut ty);
        self.properties.push(BoundProperty::new(value, ty, accessor));
        Ok(())
    }
}
