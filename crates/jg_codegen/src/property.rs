use proc_macro2::TokenStream;

use crate::descriptor::TypeDescriptor;

/// A data member of the target type, as produced by discovery.
///
/// The accessor is an expression that reads the member, written against a
/// binding named `value` of type `&Target`: `value.field` for a field,
/// `value.method()` for a getter. Generated code always borrows it.
#[derive(Debug, Clone)]
pub struct BoundProperty {
    name: String,
    ty: TypeDescriptor,
    accessor: TokenStream,
}

impl BoundProperty {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeDescriptor>, accessor: TokenStream) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            accessor,
        }
    }

    /// Field name written to the output document.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    #[inline]
    pub fn accessor(&self) -> &TokenStream {
        &self.accessor
    }
}
