use syn::{GenericArgument, PathArguments, Type, TypePath};

// -----------------------------------------------------------------------------
// NumericKind

/// A primitive numeric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl NumericKind {
    /// Recognize a primitive numeric by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            _ => return None,
        })
    }
}

// -----------------------------------------------------------------------------
// BoxedNumeric

/// A numeric that is not a primitive: a smart pointer around a primitive,
/// or one of the arbitrary-precision kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxedNumeric {
    /// `Box<N>`, `Rc<N>` or `Arc<N>` with `N` primitive.
    Pointer(NumericKind),
    /// Arbitrary-precision integer, `BigInt` or `BigUint`.
    BigInteger,
    /// Arbitrary-precision decimal, `BigDecimal`.
    BigDecimal,
}

// -----------------------------------------------------------------------------
// TypeKind

/// Shape of a member type as far as encoding is concerned.
///
/// Computed once from the syntax of the type. Recognition goes by the last
/// path segment, so `std::sync::Arc<str>` and `Arc<str>` are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `String`, `str`, `&str`, `Box<str>`, `Rc<str>`, `Arc<str>`, `Cow<str>`.
    Str,
    /// `Option<S>` with `S` any of the [`TypeKind::Str`] types.
    OptionalStr,
    Primitive(NumericKind),
    /// `Option<N>` with `N` primitive.
    OptionalPrimitive(NumericKind),
    Boxed(BoxedNumeric),
    /// `Option<B>` with `B` a [`BoxedNumeric`].
    NullableBoxed(BoxedNumeric),
    /// The generic object sentinel, `jg_encode::Object`.
    Object,
    Other,
}

impl TypeKind {
    /// Compute the kind of a type from its syntax.
    pub fn of(ty: &Type) -> Self {
        match strip(ty) {
            Type::Reference(reference) => match strip(&reference.elem) {
                Type::Path(path) if is_bare(path, "str") => Self::Str,
                _ => Self::Other,
            },
            Type::Path(path) => Self::of_path(path),
            _ => Self::Other,
        }
    }

    fn of_path(path: &TypePath) -> Self {
        if path.qself.is_some() {
            return Self::Other;
        }
        let Some(last) = path.path.segments.last() else {
            return Self::Other;
        };
        let name = last.ident.to_string();

        match (name.as_str(), type_args(&last.arguments).as_slice()) {
            ("String", []) | ("str", []) => Self::Str,
            ("Cow", [inner]) if is_str(inner) => Self::Str,
            ("Box" | "Rc" | "Arc", [inner]) => {
                if is_str(inner) {
                    Self::Str
                } else if let Self::Primitive(kind) = Self::of(inner) {
                    Self::Boxed(BoxedNumeric::Pointer(kind))
                } else {
                    Self::Other
                }
            }
            ("BigInt" | "BigUint", []) => Self::Boxed(BoxedNumeric::BigInteger),
            ("BigDecimal", []) => Self::Boxed(BoxedNumeric::BigDecimal),
            ("Option", [inner]) => match Self::of(inner) {
                Self::Str => Self::OptionalStr,
                Self::Primitive(kind) => Self::OptionalPrimitive(kind),
                Self::Boxed(boxed) => Self::NullableBoxed(boxed),
                _ => Self::Other,
            },
            ("Object", []) if is_object_path(path) => Self::Object,
            (_, []) if is_primitive_path(path) => match NumericKind::from_name(&name) {
                Some(kind) => Self::Primitive(kind),
                None => Self::Other,
            },
            _ => Self::Other,
        }
    }

    /// Whether a value of this kind may be absent.
    #[inline]
    pub const fn is_nullable(self) -> bool {
        matches!(
            self,
            Self::OptionalStr | Self::OptionalPrimitive(_) | Self::NullableBoxed(_)
        )
    }
}

fn strip(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => strip(&group.elem),
        Type::Paren(paren) => strip(&paren.elem),
        _ => ty,
    }
}

fn type_args(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn is_bare(path: &TypePath, name: &str) -> bool {
    path.qself.is_none() && path.path.is_ident(name)
}

fn is_str(ty: &Type) -> bool {
    matches!(strip(ty), Type::Path(path) if is_bare(path, "str"))
}

// `i32`, `core::primitive::i32`, `std::primitive::i32`.
fn is_primitive_path(path: &TypePath) -> bool {
    let segments = &path.path.segments;
    segments.len() == 1
        || segments
            .iter()
            .rev()
            .nth(1)
            .is_some_and(|segment| segment.ident == "primitive")
}

// `Object`, `jg_encode::Object`, `jsongen::encode::Object`.
fn is_object_path(path: &TypePath) -> bool {
    let segments = &path.path.segments;
    segments.len() == 1
        || segments
            .iter()
            .rev()
            .nth(1)
            .is_some_and(|segment| segment.ident == "jg_encode" || segment.ident == "encode")
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The resolved static type of a member together with its [`TypeKind`].
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    ty: Type,
    kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(ty: Type) -> Self {
        let kind = TypeKind::of(&ty);
        Self { ty, kind }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The type inside `Option<..>` for nullable kinds, otherwise the type
    /// itself.
    pub fn payload(&self) -> &Type {
        if self.kind.is_nullable()
            && let Type::Path(path) = strip(&self.ty)
            && let Some(last) = path.path.segments.last()
            && let [inner] = type_args(&last.arguments).as_slice()
        {
            return *inner;
        }
        &self.ty
    }
}

impl From<Type> for TypeDescriptor {
    #[inline]
    fn from(ty: Type) -> Self {
        Self::new(ty)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use syn::parse_quote;

    use super::{BoxedNumeric, NumericKind, TypeDescriptor, TypeKind};

    fn kind(ty: syn::Type) -> TypeKind {
        TypeKind::of(&ty)
    }

    #[test]
    fn strings() {
        assert_eq!(kind(parse_quote!(String)), TypeKind::Str);
        assert_eq!(kind(parse_quote!(&'static str)), TypeKind::Str);
        assert_eq!(kind(parse_quote!(Box<str>)), TypeKind::Str);
        assert_eq!(kind(parse_quote!(std::sync::Arc<str>)), TypeKind::Str);
        assert_eq!(kind(parse_quote!(Cow<'static, str>)), TypeKind::Str);
        assert_eq!(kind(parse_quote!(Option<String>)), TypeKind::OptionalStr);
        assert_eq!(kind(parse_quote!(alloc::string::String)), TypeKind::Str);
    }

    #[test]
    fn numerics() {
        assert_eq!(kind(parse_quote!(i32)), TypeKind::Primitive(NumericKind::I32));
        assert_eq!(
            kind(parse_quote!(core::primitive::u8)),
            TypeKind::Primitive(NumericKind::U8)
        );
        assert_eq!(
            kind(parse_quote!(Option<f64>)),
            TypeKind::OptionalPrimitive(NumericKind::F64)
        );
        assert_eq!(
            kind(parse_quote!(Box<i32>)),
            TypeKind::Boxed(BoxedNumeric::Pointer(NumericKind::I32))
        );
        assert_eq!(
            kind(parse_quote!(Option<Box<i32>>)),
            TypeKind::NullableBoxed(BoxedNumeric::Pointer(NumericKind::I32))
        );
        assert_eq!(
            kind(parse_quote!(num_bigint::BigInt)),
            TypeKind::Boxed(BoxedNumeric::BigInteger)
        );
        assert_eq!(
            kind(parse_quote!(Option<BigDecimal>)),
            TypeKind::NullableBoxed(BoxedNumeric::BigDecimal)
        );
    }

    #[test]
    fn everything_else() {
        assert_eq!(kind(parse_quote!(Object)), TypeKind::Object);
        assert_eq!(kind(parse_quote!(jg_encode::Object)), TypeKind::Object);
        assert_eq!(kind(parse_quote!(other::Object)), TypeKind::Other);
        assert_eq!(kind(parse_quote!(Vec<i32>)), TypeKind::Other);
        assert_eq!(kind(parse_quote!(Option<Option<i32>>)), TypeKind::Other);
        assert_eq!(kind(parse_quote!(Box<Vec<u8>>)), TypeKind::Other);
        assert_eq!(kind(parse_quote!(my::i32)), TypeKind::Other);
        assert_eq!(kind(parse_quote!(T)), TypeKind::Other);
        assert_eq!(kind(parse_quote!([u8; 4])), TypeKind::Other);
        assert_eq!(kind(parse_quote!(&'static i32)), TypeKind::Other);
        assert_eq!(kind(parse_quote!(bool)), TypeKind::Other);
    }

    #[test]
    fn payload() {
        let nullable = TypeDescriptor::new(parse_quote!(Option<Box<i64>>));
        assert_eq!(nullable.payload().to_token_stream().to_string(), "Box < i64 >");

        let bare = TypeDescriptor::new(parse_quote!(BigInt));
        assert_eq!(bare.payload().to_token_stream().to_string(), "BigInt");

        let other = TypeDescriptor::new(parse_quote!(Option<Vec<i32>>));
        assert_eq!(
            other.payload().to_token_stream().to_string(),
            "Option < Vec < i32 > >"
        );
    }
}
