//! See following macros:
//!
//! - [`Encode`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static ENCODE_ATTRIBUTE_NAME: &str = "encode";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Encoder Derivation
///
/// `#[derive(Encode)]` generates, next to the type, an encoder struct named
/// `<Type>_GeneratedSerializer`, and implements:
///
/// - `Encoder<Type>` for the generated struct;
/// - `Encode` for the type, pointing at the generated struct.
///
/// Only structs with named fields (or unit structs) are supported. Types
/// with lifetime parameters are rejected, and every type parameter gets a
/// `'static` bound.
///
/// ## Properties
///
/// Every field is a property, written under its own name, in declaration
/// order. How a property is written depends on its type:
///
/// | type                                          | written as                       |
/// |-----------------------------------------------|----------------------------------|
/// | `String`, `&str`, `Box<str>`, `Cow<str>`, ... | string, `null` if `None`         |
/// | `i8` ... `u128`, `f32`, `f64`                 | number                           |
/// | `Box<i32>`, `BigInt`, `BigDecimal`, ...       | number, `null` if `None`         |
/// | `Option<i32>` and other optional primitives   | number, `null` if `None`         |
/// | `Object`                                      | through `serde`, `null` if null  |
/// | anything else                                 | the registered encoder of the type |
///
/// Members of the last kind are bound when the registry is resolved.
///
/// ```rust, ignore
/// #[derive(Encode)]
/// struct Parameterized {
///     foo: String,
///     list: Vec<Simple>,
/// }
/// ```
///
/// ## Field attributes
///
/// ### rename
///
/// Write the field under another name.
///
/// ```rust, ignore
/// #[derive(Encode)]
/// struct Foo {
///     #[encode(rename = "boxedInt")]
///     boxed_int: Option<Box<i32>>,
/// }
/// ```
///
/// ### skip
///
/// Do not write the field at all.
///
/// ```rust, ignore
/// #[derive(Encode)]
/// struct Foo {
///     #[encode(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// Empty and duplicate property names are compile errors.
///
/// ## Type attributes
///
/// ### getter
///
/// Add a property read through a method taking `&self`. Getter properties
/// are written before the fields, in the order they are declared. `name`
/// defaults to the method name.
///
/// ```rust, ignore
/// #[derive(Encode)]
/// #[encode(getter(name = "area", method = area, ty = f64))]
/// struct Rect {
///     w: f64,
///     h: f64,
/// }
///
/// impl Rect {
///     fn area(&self) -> f64 { self.w * self.h }
/// }
/// ```
///
/// ### auto_register
///
/// Submit the type for `EncoderRegistry::auto_register`. Requires the
/// `auto_register` feature and has no effect on generic types.
///
/// ```rust, ignore
/// #[derive(Encode)]
/// #[encode(auto_register)]
/// struct Foo {
///     name: String,
/// }
/// ```
///
/// ## Deprecation
///
/// If the type is `#[deprecated]`, the generated items allow it, so
/// deriving does not add warnings of its own.
#[proc_macro_derive(Encode, attributes(encode))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_encode_impls(ast)
}
