//! Parsing of `#[encode(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, LitStr, Type};

use crate::ENCODE_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Getter

/// `getter(name = "wire", method = ident, ty = Type)`
#[derive(Debug)]
pub(crate) struct GetterAttribute {
    pub name: Option<LitStr>,
    pub method: Ident,
    pub ty: Type,
}

impl GetterAttribute {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name = None;
        let mut method = None;
        let mut ty = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse::<LitStr>()?);
            } else if inner.path.is_ident("method") {
                method = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("ty") {
                ty = Some(inner.value()?.parse::<Type>()?);
            } else {
                return Err(inner.error("expected `name`, `method` or `ty`"));
            }
            Ok(())
        })?;

        let Some(method) = method else {
            return Err(meta.error("getter requires `method = ...`"));
        };
        let Some(ty) = ty else {
            return Err(meta.error("getter requires `ty = ...`"));
        };
        Ok(Self { name, method, ty })
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the deriving type.
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    pub auto_register: Option<Span>,
    pub getters: Vec<GetterAttribute>,
    /// The type carries `#[deprecated]`.
    pub deprecated: bool,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident("deprecated") {
                this.deprecated = true;
                continue;
            }
            if !attr.path().is_ident(ENCODE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("auto_register") {
                    if this.auto_register.is_some() {
                        return Err(meta.error("duplicate `auto_register`"));
                    }
                    this.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("getter") {
                    this.getters.push(GetterAttribute::parse(&meta)?);
                } else {
                    return Err(meta.error("expected `auto_register` or `getter(...)`"));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes on a field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(ENCODE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    this.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                } else {
                    return Err(meta.error("expected `rename = \"...\"` or `skip`"));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}
