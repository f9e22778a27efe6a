//! Type to encoder mappings, and the lookups that bind delegate slots.
//!
//! ## Menu
//!
//! - [`EncoderRegistry`]: stores one encoder per type, resolves them.
//! - [`EncodeContext`]: read access to a registry, handed to encoders.
//! - [`ErasedEncoder`]: an encoder with its type erased, for unchecked insertion.
//! - Encoders: [`SerdeEncoder`], [`SeqEncoder`], [`OptionEncoder`].
//!
//! ## auto_register
//!
//! See [`EncoderRegistry::auto_register`] .
//!
//! We use [`inventory`](https://docs.rs/inventory) to collect the types
//! marked `#[encode(auto_register)]`. Not every platform supports it, in
//! which case the method returns `false` and registers nothing.

// -----------------------------------------------------------------------------
// Modules

mod builtin;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{OptionEncoder, SeqEncoder, SerdeEncoder};

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use std::io;

use foldhash::fast::FixedState;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde_core::Serialize;

use crate::{BindingError, Encode, EncodeError, Encoder, Generator, JsonGenerator};

// -----------------------------------------------------------------------------
// EncodeContext

/// Read access to the registry during resolution and encoding.
#[derive(Clone, Copy)]
pub struct EncodeContext<'a> {
    registry: &'a EncoderRegistry,
}

impl<'a> EncodeContext<'a> {
    #[inline]
    pub const fn new(registry: &'a EncoderRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a EncoderRegistry {
        self.registry
    }

    /// See [`EncoderRegistry::find`].
    #[inline]
    pub fn find<T: ?Sized + 'static>(&self) -> Result<Arc<dyn Encoder<T>>, BindingError> {
        self.registry.find::<T>()
    }
}

impl fmt::Debug for EncodeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeContext")
            .field("registered", &self.registry.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ErasedEncoder

type Resolver = Box<dyn Fn(&EncodeContext<'_>) -> Result<(), BindingError> + Send + Sync>;

/// An encoder whose value type is only known at runtime.
///
/// Holds an `Arc<dyn Encoder<T>>` for some `T`. Inserting it under the
/// [`TypeId`] of another type is allowed, the mismatch is reported by
/// [`EncoderRegistry::find`].
pub struct ErasedEncoder {
    type_name: &'static str,
    encoder: Box<dyn Any + Send + Sync>,
    resolver: Option<Resolver>,
}

impl ErasedEncoder {
    pub fn new<T: ?Sized + 'static>(encoder: Arc<dyn Encoder<T>>) -> Self {
        let resolver: Option<Resolver> = if encoder.requires_resolution() {
            let encoder = encoder.clone();
            Some(Box::new(move |context: &EncodeContext<'_>| encoder.resolve(context)))
        } else {
            None
        };
        Self {
            type_name: type_name::<T>(),
            encoder: Box::new(encoder),
            resolver,
        }
    }

    /// Name of the type the encoder writes.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ErasedEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedEncoder")
            .field("type_name", &self.type_name)
            .field("requires_resolution", &self.resolver.is_some())
            .finish()
    }
}

struct Registration {
    erased: ErasedEncoder,
    resolved: bool,
}

// -----------------------------------------------------------------------------
// EncoderRegistry

/// A registry of encoders keyed by the type they write.
///
/// Encoders are registered, then [`resolve`](EncoderRegistry::resolve)
/// binds every delegate slot, after which the registry can encode values.
///
/// # Example
///
/// ```
/// use jg_encode::{Encode, EncoderRegistry};
///
/// #[derive(Encode)]
/// struct Point {
///     x: i32,
///     label: Option<String>,
///     tags: Vec<String>,
/// }
///
/// let mut registry = EncoderRegistry::new();
/// registry.register::<Point>();
/// registry.register_seq::<String>();
/// registry.resolve().unwrap();
///
/// let point = Point { x: 3, label: None, tags: vec!["a".into()] };
/// let json = registry.encode_to_string(&point).unwrap();
/// assert_eq!(json, r#"{"x":3,"label":null,"tags":["a"]}"#);
/// ```
pub struct EncoderRegistry {
    encoders: HashMap<TypeId, Registration, FixedState>,
}

impl Default for EncoderRegistry {
    /// See [`EncoderRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EncoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.encoders.values().map(|entry| entry.erased.type_name))
            .finish()
    }
}

impl EncoderRegistry {
    /// Create an empty [`EncoderRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            encoders: HashMap::with_hasher(FixedState::with_seed(0)),
        }
    }

    /// Create a registry with `serde` backed encoders for:
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_serialize::<()>();
        registry.register_serialize::<bool>();
        registry.register_serialize::<char>();
        registry.register_serialize::<u8>();
        registry.register_serialize::<u16>();
        registry.register_serialize::<u32>();
        registry.register_serialize::<u64>();
        registry.register_serialize::<u128>();
        registry.register_serialize::<usize>();
        registry.register_serialize::<i8>();
        registry.register_serialize::<i16>();
        registry.register_serialize::<i32>();
        registry.register_serialize::<i64>();
        registry.register_serialize::<i128>();
        registry.register_serialize::<isize>();
        registry.register_serialize::<f32>();
        registry.register_serialize::<f64>();
        registry.register_serialize::<String>();
        registry
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    #[inline]
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.encoders.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn contains_type_id(&self, type_id: TypeId) -> bool {
        self.encoders.contains_key(&type_id)
    }

    // - If `type_id` is already registered, nothing happens and `false` is returned.
    // - Otherwise the encoder built by `f` is inserted and `true` is returned.
    fn register_internal(&mut self, type_id: TypeId, f: impl FnOnce() -> ErasedEncoder) -> bool {
        match self.encoders.entry(type_id) {
            Entry::Vacant(entry) => {
                let erased = f();
                log::debug!("registered encoder for `{}`", erased.type_name);
                entry.insert(Registration {
                    erased,
                    resolved: false,
                });
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Register the generated encoder of `T` if `T` has no encoder yet.
    ///
    /// Returns whether the encoder was inserted.
    #[inline]
    pub fn register<T: Encode>(&mut self) -> bool {
        self.register_internal(TypeId::of::<T>(), || {
            ErasedEncoder::new::<T>(Arc::new(T::Encoder::default()))
        })
    }

    /// Register `encoder` for `T` if `T` has no encoder yet.
    pub fn register_encoder<T: ?Sized + 'static>(
        &mut self,
        encoder: impl Encoder<T> + 'static,
    ) -> bool {
        self.register_internal(TypeId::of::<T>(), || {
            ErasedEncoder::new::<T>(Arc::new(encoder))
        })
    }

    /// Register a [`SerdeEncoder`] for `T` if `T` has no encoder yet.
    #[inline]
    pub fn register_serialize<T: Serialize + 'static>(&mut self) -> bool {
        self.register_encoder::<T>(SerdeEncoder::<T>::new())
    }

    /// Register a [`SeqEncoder`] for `Vec<T>` if it has no encoder yet.
    #[inline]
    pub fn register_seq<T: 'static>(&mut self) -> bool {
        self.register_encoder::<Vec<T>>(SeqEncoder::<T>::new())
    }

    /// Register an [`OptionEncoder`] for `Option<T>` if it has no encoder yet.
    #[inline]
    pub fn register_option<T: 'static>(&mut self) -> bool {
        self.register_encoder::<Option<T>>(OptionEncoder::<T>::new())
    }

    /// Insert or **overwrite** the encoder stored under `type_id`.
    ///
    /// Nothing checks that `encoder` writes the type of `type_id`;
    /// [`find`](Self::find) reports a mismatch later. An overwritten entry
    /// has to be resolved again.
    pub fn insert_with_type_id(&mut self, type_id: TypeId, encoder: ErasedEncoder) {
        self.encoders.insert(
            type_id,
            Registration {
                erased: encoder,
                resolved: false,
            },
        );
    }

    /// Look up the encoder of `T`.
    ///
    /// The stored encoder is narrowed to `dyn Encoder<T>`; if the entry
    /// holds an encoder of another type the lookup fails with
    /// [`BindingError::Mismatch`] instead of returning it.
    pub fn find<T: ?Sized + 'static>(&self) -> Result<Arc<dyn Encoder<T>>, BindingError> {
        let Some(entry) = self.encoders.get(&TypeId::of::<T>()) else {
            return Err(BindingError::NotFound {
                type_name: type_name::<T>(),
            });
        };
        match entry.erased.encoder.downcast_ref::<Arc<dyn Encoder<T>>>() {
            Some(encoder) => Ok(encoder.clone()),
            None => {
                log::warn!(
                    "encoder registered for `{}` writes `{}`",
                    type_name::<T>(),
                    entry.erased.type_name,
                );
                Err(BindingError::Mismatch {
                    expected: type_name::<T>(),
                    found: entry.erased.type_name,
                })
            }
        }
    }

    /// Resolve every registered encoder that has not been resolved yet.
    ///
    /// Each encoder is resolved exactly once, so calling this again after
    /// registering more types only resolves the new ones. Stops at the
    /// first failure; encoders resolved before it stay resolved, and the
    /// failed one is tried again by the next call. Generated encoders look
    /// up every delegate before binding any, so a failed lookup leaves them
    /// unbound.
    pub fn resolve(&mut self) -> Result<(), BindingError> {
        let pending: Vec<TypeId> = self
            .encoders
            .iter()
            .filter(|(_, entry)| !entry.resolved)
            .map(|(type_id, _)| *type_id)
            .collect();

        for type_id in pending {
            let context = EncodeContext::new(self);
            if let Some(entry) = self.encoders.get(&type_id)
                && let Some(resolver) = &entry.erased.resolver
            {
                log::debug!("resolving encoder for `{}`", entry.erased.type_name);
                resolver(&context)?;
            }
            if let Some(entry) = self.encoders.get_mut(&type_id) {
                entry.resolved = true;
            }
        }
        Ok(())
    }

    /// Automatically registers all non-generic types annotated with
    /// `#[encode(auto_register)]`.
    ///
    /// This is equivalent to calling [`register`](Self::register) for each
    /// of them. Repeated calls are cheap and insert nothing twice.
    ///
    /// Returns `true` if automatic registration works on this platform.
    /// Without the `auto_register` feature it does nothing and returns
    /// `false`.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            if self.contains::<auto_register::__AvailFlag>() {
                return true;
            }
            auto_register::__register_types(self);
            self.contains::<auto_register::__AvailFlag>()
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Encoding

    /// Write `value` to `generator` with the registered encoder of `T`.
    pub fn encode<T: ?Sized + 'static>(
        &self,
        value: &T,
        generator: &mut dyn Generator,
    ) -> Result<(), EncodeError> {
        let encoder = self.find::<T>().map_err(|err| match err {
            BindingError::NotFound { type_name } => EncodeError::NotRegistered { type_name },
            err => EncodeError::Binding(err),
        })?;
        encoder.encode(value, generator, &EncodeContext::new(self))
    }

    /// Write `value` as compact JSON to `writer`.
    pub fn encode_to_writer<T: ?Sized + 'static, W: io::Write>(
        &self,
        value: &T,
        writer: W,
    ) -> Result<(), EncodeError> {
        let mut generator = JsonGenerator::new(writer);
        self.encode(value, &mut generator)
    }

    /// Encode `value` as compact JSON bytes.
    pub fn encode_to_vec<T: ?Sized + 'static>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let mut generator = JsonGenerator::new(Vec::new());
        self.encode(value, &mut generator)?;
        Ok(generator.into_inner())
    }

    /// Encode `value` as a compact JSON string.
    pub fn encode_to_string<T: ?Sized + 'static>(&self, value: &T) -> Result<String, EncodeError> {
        Ok(String::from_utf8(self.encode_to_vec(value)?)?)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use core::any::TypeId;

    use super::{EncoderRegistry, ErasedEncoder};
    use crate::{BindingError, EncodeError, Encoder, SerdeEncoder};

    #[test]
    fn primitives_are_preregistered() {
        let registry = EncoderRegistry::new();
        assert!(registry.contains::<i32>());
        assert!(registry.contains::<String>());
        assert!(!registry.contains::<Vec<i32>>());
        assert_eq!(registry.encode_to_string(&-5_i64).unwrap(), "-5");
        assert_eq!(registry.encode_to_string(&String::from("hi")).unwrap(), r#""hi""#);
    }

    #[test]
    fn not_found_and_not_registered() {
        let registry = EncoderRegistry::empty();
        assert!(matches!(registry.find::<u8>(), Err(BindingError::NotFound { .. })));
        assert!(matches!(
            registry.encode_to_string(&1_u8),
            Err(EncodeError::NotRegistered { .. })
        ));
    }

    #[test]
    fn mismatched_entry_is_rejected() {
        let mut registry = EncoderRegistry::empty();
        let wrong: Arc<dyn Encoder<i32>> = Arc::new(SerdeEncoder::<i32>::new());
        registry.insert_with_type_id(TypeId::of::<String>(), ErasedEncoder::new(wrong));

        let err = registry.find::<String>().err().unwrap();
        assert_eq!(
            err,
            BindingError::Mismatch {
                expected: "alloc::string::String",
                found: "i32"
            }
        );
    }

    #[test]
    fn seq_requires_resolution() {
        let mut registry = EncoderRegistry::new();
        assert!(registry.register_seq::<i32>());
        assert!(!registry.register_seq::<i32>());

        let values = vec![1, 2, 3];
        assert!(matches!(
            registry.encode_to_string(&values),
            Err(EncodeError::Unresolved { .. })
        ));

        registry.resolve().unwrap();
        assert_eq!(registry.encode_to_string(&values).unwrap(), "[1,2,3]");

        // Already resolved entries are left alone.
        registry.resolve().unwrap();
    }

    #[test]
    fn missing_element_encoder() {
        let mut registry = EncoderRegistry::empty();
        registry.register_option::<u8>();
        assert_eq!(
            registry.resolve(),
            Err(BindingError::NotFound { type_name: "u8" })
        );

        registry.register_serialize::<u8>();
        registry.resolve().unwrap();
        assert_eq!(registry.encode_to_string(&Some(3_u8)).unwrap(), "3");
    }

    #[test]
    fn option_encoder() {
        let mut registry = EncoderRegistry::new();
        registry.register_option::<bool>();
        registry.resolve().unwrap();
        assert_eq!(registry.encode_to_string(&Some(true)).unwrap(), "true");
        assert_eq!(registry.encode_to_string(&None::<bool>).unwrap(), "null");
    }
}
