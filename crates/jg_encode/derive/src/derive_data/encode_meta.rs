use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, Path, Visibility, parse_quote};

use super::TypeAttributes;

/// Information about the deriving type shared by every generated item.
pub(crate) struct EncodeMeta<'a> {
    jg_encode_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    vis: &'a Visibility,
    generics: &'a Generics,
}

impl core::fmt::Debug for EncodeMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EncodeMeta")
            .field("jg_encode_path", &self.jg_encode_path.to_token_stream())
            .field("ident", self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> EncodeMeta<'a> {
    #[inline]
    pub fn new(
        attrs: TypeAttributes,
        ident: &'a Ident,
        vis: &'a Visibility,
        generics: &'a Generics,
    ) -> Self {
        Self {
            jg_encode_path: crate::path::jg_encode(),
            attrs,
            ident,
            vis,
            generics,
        }
    }

    #[inline]
    pub fn jg_encode_path(&self) -> &Path {
        &self.jg_encode_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn vis(&self) -> &'a Visibility {
        self.vis
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Generics of the generated items: the type's own generics with a
    /// `'static` bound on every type parameter, as registry lookups are
    /// keyed by `TypeId`.
    pub fn bounded_generics(&self) -> Generics {
        let mut generics = self.generics.clone();
        for param in &mut generics.params {
            if let GenericParam::Type(param) = param {
                param.bounds.push(parse_quote!('static));
                // Defaults are not allowed on impls.
                param.eq_token = None;
                param.default = None;
            }
        }
        generics
    }

    /// `#[allow(deprecated)]` if the type is deprecated, so that the
    /// generated items do not warn for mentioning it.
    pub fn allow_deprecated(&self) -> TokenStream {
        if self.attrs.deprecated {
            quote!(#[allow(deprecated)])
        } else {
            crate::utils::empty()
        }
    }
}
