use proc_macro2::TokenStream;
use syn::visit_mut::{self, VisitMut};
use syn::{Type, parse_quote};

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Rewrites `Self` in a member type to the deriving type.
///
/// Member types are copied into the generated encoder, where `Self` names
/// the encoder instead.
pub(crate) struct ReplaceSelf<'a> {
    target: &'a Type,
}

impl<'a> ReplaceSelf<'a> {
    #[inline]
    pub fn new(target: &'a Type) -> Self {
        Self { target }
    }
}

impl VisitMut for ReplaceSelf<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(path) = ty
            && path.qself.is_none()
            && path.path.leading_colon.is_none()
            && path.path.segments.first().is_some_and(|segment| segment.ident == "Self")
        {
            let target = self.target;
            if path.path.segments.len() == 1 {
                *ty = target.clone();
                return;
            }
            // `Self::Assoc` becomes `<Target>::Assoc`.
            let rest = path.path.segments.iter().skip(1);
            *ty = parse_quote!(<#target>::#(#rest)::*);
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use syn::visit_mut::VisitMut;
    use syn::{Type, parse_quote};

    use super::ReplaceSelf;

    fn replace(mut ty: Type) -> String {
        let target: Type = parse_quote!(Node<T>);
        ReplaceSelf::new(&target).visit_type_mut(&mut ty);
        ty.to_token_stream().to_string()
    }

    #[test]
    fn self_is_the_deriving_type() {
        assert_eq!(replace(parse_quote!(Self)), "Node < T >");
        assert_eq!(replace(parse_quote!(Vec<Self>)), "Vec < Node < T > >");
        assert_eq!(
            replace(parse_quote!(Option<Box<(Self, i32)>>)),
            "Option < Box < (Node < T > , i32) > >"
        );
        assert_eq!(replace(parse_quote!(Self::Item)), "< Node < T > > :: Item");
    }

    #[test]
    fn other_types_are_untouched() {
        assert_eq!(replace(parse_quote!(Vec<String>)), "Vec < String >");
        assert_eq!(replace(parse_quote!(my::Self_)), "my :: Self_");
    }
}
