use crate::descriptor::{NumericKind, TypeDescriptor, TypeKind};

// -----------------------------------------------------------------------------
// EncodingStrategy

/// Which of the `Option<primitive>` shapes a member has.
///
/// `i32`, `i64` and `f64` have dedicated conversions, every other primitive
/// goes through the generic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalKind {
    Int,
    Long,
    Double,
    Generic,
}

impl From<NumericKind> for OptionalKind {
    fn from(kind: NumericKind) -> Self {
        match kind {
            NumericKind::I32 => Self::Int,
            NumericKind::I64 => Self::Long,
            NumericKind::F64 => Self::Double,
            _ => Self::Generic,
        }
    }
}

/// How a single member is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingStrategy {
    /// One string field call, `null` when absent.
    DirectString,
    /// One number field call.
    DirectNumber,
    /// A helper routine writing `null` or the number.
    NullableNumber,
    /// A helper routine testing presence, then unwrapping.
    OptionalNumber(OptionalKind),
    /// The value is handed to the sink's generic object writer.
    GenericObjectPassthrough,
    /// The value is written by an encoder bound during resolution.
    Delegated,
}

impl EncodingStrategy {
    /// Whether the member needs a registry lookup before encoding.
    #[inline]
    pub const fn requires_resolution(self) -> bool {
        matches!(self, Self::Delegated)
    }
}

// -----------------------------------------------------------------------------
// classify

/// Choose the [`EncodingStrategy`] of a member type.
///
/// Total and pure. Rules are tried in order, earlier wins:
///
/// 1. string, present or optional: [`EncodingStrategy::DirectString`];
/// 2. boxed or arbitrary-precision numeric, present or optional:
///    [`EncodingStrategy::NullableNumber`];
/// 3. `Option` of a primitive numeric: [`EncodingStrategy::OptionalNumber`];
/// 4. primitive numeric: [`EncodingStrategy::DirectNumber`];
/// 5. the generic object sentinel: [`EncodingStrategy::GenericObjectPassthrough`];
/// 6. anything else: [`EncodingStrategy::Delegated`].
///
/// A nullable boxed number is spelled `Option<Box<i32>>` or
/// `Option<BigDecimal>`, which is also how an optional of a boxed number is
/// spelled. Rule 2 comes first, so these members take the nullable helper.
/// It writes the same output as the generic optional unwrap would, and
/// [`OptionalKind::Generic`] is left to optional primitives other than
/// `i32`, `i64` and `f64`.
///
/// ```
/// use jg_codegen::{EncodingStrategy, OptionalKind, TypeDescriptor, classify};
///
/// let ty = TypeDescriptor::new(syn::parse_quote!(Option<i64>));
/// assert_eq!(classify(&ty), EncodingStrategy::OptionalNumber(OptionalKind::Long));
/// ```
pub fn classify(descriptor: &TypeDescriptor) -> EncodingStrategy {
    match descriptor.kind() {
        TypeKind::Str | TypeKind::OptionalStr => EncodingStrategy::DirectString,
        TypeKind::Boxed(_) | TypeKind::NullableBoxed(_) => EncodingStrategy::NullableNumber,
        TypeKind::OptionalPrimitive(kind) => EncodingStrategy::OptionalNumber(kind.into()),
        TypeKind::Primitive(_) => EncodingStrategy::DirectNumber,
        TypeKind::Object => EncodingStrategy::GenericObjectPassthrough,
        TypeKind::Other => EncodingStrategy::Delegated,
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{EncodingStrategy, OptionalKind, classify};
    use crate::TypeDescriptor;

    fn strategy(ty: syn::Type) -> EncodingStrategy {
        classify(&TypeDescriptor::new(ty))
    }

    #[test]
    fn rule_order() {
        assert_eq!(strategy(parse_quote!(String)), EncodingStrategy::DirectString);
        assert_eq!(strategy(parse_quote!(Option<&'static str>)), EncodingStrategy::DirectString);
        assert_eq!(strategy(parse_quote!(Box<i32>)), EncodingStrategy::NullableNumber);
        assert_eq!(strategy(parse_quote!(BigUint)), EncodingStrategy::NullableNumber);
        // An optional high-precision decimal is still a nullable number.
        assert_eq!(strategy(parse_quote!(Option<BigDecimal>)), EncodingStrategy::NullableNumber);
        assert_eq!(strategy(parse_quote!(Option<Box<i32>>)), EncodingStrategy::NullableNumber);
        assert_eq!(strategy(parse_quote!(Option<Arc<f64>>)), EncodingStrategy::NullableNumber);
        assert_eq!(strategy(parse_quote!(i32)), EncodingStrategy::DirectNumber);
        assert_eq!(strategy(parse_quote!(f32)), EncodingStrategy::DirectNumber);
        assert_eq!(strategy(parse_quote!(Object)), EncodingStrategy::GenericObjectPassthrough);
        assert_eq!(strategy(parse_quote!(Vec<Simple>)), EncodingStrategy::Delegated);
        assert_eq!(strategy(parse_quote!(bool)), EncodingStrategy::Delegated);
        assert_eq!(strategy(parse_quote!(T)), EncodingStrategy::Delegated);
    }

    #[test]
    fn optional_kinds() {
        let cases: [(syn::Type, OptionalKind); 5] = [
            (parse_quote!(Option<i32>), OptionalKind::Int),
            (parse_quote!(Option<i64>), OptionalKind::Long),
            (parse_quote!(Option<f64>), OptionalKind::Double),
            (parse_quote!(Option<u8>), OptionalKind::Generic),
            (parse_quote!(Option<f32>), OptionalKind::Generic),
        ];
        for (ty, kind) in cases {
            assert_eq!(strategy(ty), EncodingStrategy::OptionalNumber(kind));
        }
    }

    #[test]
    fn only_delegated_requires_resolution() {
        assert!(EncodingStrategy::Delegated.requires_resolution());
        assert!(!EncodingStrategy::NullableNumber.requires_resolution());
        assert!(!EncodingStrategy::GenericObjectPassthrough.requires_resolution());
    }
}
