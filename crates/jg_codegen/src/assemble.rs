use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::path;
use crate::property::BoundProperty;
use crate::strategy::classify;
use crate::synthesize::{DelegateSlotDecl, PropertyPlan, synthesize};

// -----------------------------------------------------------------------------
// SerializationPlan

/// Everything needed to emit the encoder of one type.
///
/// Built in a single pass over the properties and never modified
/// afterwards.
#[derive(Debug, Clone)]
pub struct SerializationPlan {
    target: Ident,
    encoder: Ident,
    properties: Vec<PropertyPlan>,
    encode_body: TokenStream,
    resolve_body: Option<TokenStream>,
}

impl SerializationPlan {
    #[inline]
    pub fn target(&self) -> &Ident {
        &self.target
    }

    /// Name of the generated encoder, `<Target>_GeneratedSerializer`.
    #[inline]
    pub fn encoder_ident(&self) -> &Ident {
        &self.encoder
    }

    /// Per-property plans, in property order.
    #[inline]
    pub fn properties(&self) -> &[PropertyPlan] {
        &self.properties
    }

    /// Body of `encode`: start object, every inline fragment, end object.
    #[inline]
    pub fn encode_body(&self) -> &TokenStream {
        &self.encode_body
    }

    /// Body of `resolve`, present iff a property is delegated.
    #[inline]
    pub fn resolve_body(&self) -> Option<&TokenStream> {
        self.resolve_body.as_ref()
    }

    #[inline]
    pub fn requires_resolution(&self) -> bool {
        self.resolve_body.is_some()
    }

    pub fn helpers(&self) -> impl Iterator<Item = &TokenStream> {
        self.properties.iter().filter_map(PropertyPlan::helper)
    }

    pub fn slots(&self) -> impl Iterator<Item = &DelegateSlotDecl> {
        self.properties.iter().filter_map(PropertyPlan::slot)
    }
}

// -----------------------------------------------------------------------------
// assemble

/// Build the [`SerializationPlan`] of `target` from its ordered properties.
///
/// The index of a property is its position in `properties`. Output order
/// equals input order and the result depends on nothing else, so the same
/// input always yields the same tokens.
///
/// ```
/// use jg_codegen::{BoundProperty, assemble};
/// use quote::quote;
///
/// let target = syn::parse_quote!(Simple);
/// let ty: syn::Type = syn::parse_quote!(String);
/// let properties = [BoundProperty::new("foo", ty, quote!(value.foo))];
/// let plan = assemble(&target, &properties, &syn::parse_quote!(::jg_encode));
///
/// assert_eq!(plan.encoder_ident(), "Simple_GeneratedSerializer");
/// assert!(!plan.requires_resolution());
/// ```
pub fn assemble(
    target: &Ident,
    properties: &[BoundProperty],
    encode_path: &syn::Path,
) -> SerializationPlan {
    let generator_ = path::generator_(encode_path);
    let result_ = path::result_();

    let properties: Vec<PropertyPlan> = properties
        .iter()
        .enumerate()
        .map(|(index, property)| {
            synthesize(property, classify(property.descriptor()), index, encode_path)
        })
        .collect();

    let inline = properties.iter().map(PropertyPlan::inline);
    let encode_body = quote! {
        #generator_::write_start_object(generator)?;
        #(#inline)*
        #generator_::write_end_object(generator)?;
        #result_::Ok(())
    };

    // Every lookup runs before the first bind, so a failed resolve leaves
    // all slots empty and can be retried.
    let lookups: Vec<&TokenStream> = properties.iter().filter_map(PropertyPlan::lookup).collect();
    let binds = properties.iter().filter_map(PropertyPlan::bind);
    let resolve_body = (!lookups.is_empty()).then(|| {
        quote! {
            #(#lookups)*
            #(#binds)*
            #result_::Ok(())
        }
    });

    SerializationPlan {
        target: target.clone(),
        encoder: format_ident!("{}_GeneratedSerializer", target),
        properties,
        encode_body,
        resolve_body,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::parse_quote;

    use super::assemble;
    use crate::BoundProperty;

    fn property(name: &str, ty: syn::Type) -> BoundProperty {
        let field = syn::Ident::new(name, proc_macro2::Span::call_site());
        BoundProperty::new(name, ty, quote!(value.#field))
    }

    fn mixed() -> Vec<BoundProperty> {
        vec![
            property("foo", parse_quote!(String)),
            property("int", parse_quote!(i32)),
            property("boxedInt", parse_quote!(Option<Box<i32>>)),
            property("optionalInt", parse_quote!(Option<i32>)),
            property("list", parse_quote!(Vec<Simple>)),
        ]
    }

    #[test]
    fn empty_type_writes_bare_object() {
        let plan = assemble(&parse_quote!(Empty), &[], &parse_quote!(::jg_encode));
        let body = plan.encode_body().to_string();
        assert!(body.starts_with(":: jg_encode :: Generator :: write_start_object (generator) ?"));
        assert!(body.contains("write_end_object"));
        assert!(!body.contains("write_field_name"));
        assert!(!plan.requires_resolution());
        assert_eq!(plan.helpers().count(), 0);
        assert_eq!(plan.slots().count(), 0);
    }

    #[test]
    fn indices_follow_property_order() {
        let plan = assemble(&parse_quote!(Mixed), &mixed(), &parse_quote!(::jg_encode));
        let helpers: Vec<String> = plan.helpers().map(ToString::to_string).collect();
        assert_eq!(helpers.len(), 2);
        assert!(helpers[0].starts_with("fn serialize_field2"));
        assert!(helpers[1].starts_with("fn serialize_field3"));

        let slots: Vec<String> = plan.slots().map(|slot| slot.ident().to_string()).collect();
        assert_eq!(slots, ["serializer4"]);

        let body = plan.encode_body().to_string();
        let positions: Vec<usize> = ["\"foo\"", "\"int\"", "serialize_field2", "serialize_field3", "\"list\""]
            .iter()
            .map(|needle| body.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(body.find("write_end_object").unwrap() > positions[4]);
    }

    #[test]
    fn resolution_only_with_delegates() {
        let plan = assemble(&parse_quote!(Mixed), &mixed(), &parse_quote!(::jg_encode));
        assert!(plan.requires_resolution());
        assert!(plan.resolve_body().unwrap().to_string().contains("serializer4"));

        let direct = mixed().into_iter().take(4).collect::<Vec<_>>();
        let plan = assemble(&parse_quote!(Direct), &direct, &parse_quote!(::jg_encode));
        assert!(!plan.requires_resolution());
        assert!(plan.resolve_body().is_none());
    }

    #[test]
    fn lookups_precede_binds() {
        let mut properties = mixed();
        properties.push(property("tags", parse_quote!(Vec<String>)));
        let plan = assemble(&parse_quote!(Mixed), &properties, &parse_quote!(::jg_encode));

        let body = plan.resolve_body().unwrap().to_string();
        let last_lookup = body.rfind("find ::").unwrap();
        let first_bind = body.find("DelegateSlot :: bind").unwrap();
        assert!(last_lookup < first_bind);
        assert_eq!(body.matches("DelegateSlot :: bind").count(), 2);
    }

    #[test]
    fn deterministic() {
        let first = assemble(&parse_quote!(Mixed), &mixed(), &parse_quote!(::jg_encode));
        let second = assemble(&parse_quote!(Mixed), &mixed(), &parse_quote!(::jg_encode));
        assert_eq!(first.encode_body().to_string(), second.encode_body().to_string());
        assert_eq!(
            first.resolve_body().map(ToString::to_string),
            second.resolve_body().map(ToString::to_string)
        );
        assert_eq!(first.encoder_ident(), "Mixed_GeneratedSerializer");
    }
}
