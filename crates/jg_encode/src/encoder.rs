use alloc::sync::Arc;
use core::any::type_name;
use core::fmt;
use std::sync::OnceLock;

use crate::{BindingError, EncodeContext, EncodeError, Generator};

// -----------------------------------------------------------------------------
// Encoder

/// Writes values of `T` to a [`Generator`].
///
/// An encoder goes through two phases. It is constructed with every
/// delegate slot empty, then [`resolve`](Encoder::resolve) binds those slots
/// from the registry, after which it is ready and may be shared between
/// threads. Encoders without delegates are ready right away.
pub trait Encoder<T: ?Sized + 'static>: Send + Sync {
    /// Write `value` as one complete document value.
    fn encode(
        &self,
        value: &T,
        generator: &mut dyn Generator,
        context: &EncodeContext<'_>,
    ) -> Result<(), EncodeError>;

    /// Bind every delegate slot from `context`.
    ///
    /// Called once per encoder instance. A second call fails with
    /// [`BindingError::AlreadyBound`] for the first slot it meets.
    fn resolve(&self, context: &EncodeContext<'_>) -> Result<(), BindingError> {
        let _ = context;
        Ok(())
    }

    /// Whether [`resolve`](Encoder::resolve) must run before
    /// [`encode`](Encoder::encode).
    fn requires_resolution(&self) -> bool {
        false
    }
}

/// A type with an encoder generated by `#[derive(Encode)]`.
pub trait Encode: 'static {
    type Encoder: Encoder<Self> + Default;
}

// -----------------------------------------------------------------------------
// DelegateSlot

/// A write-once reference to the encoder of a member type.
///
/// ```
/// use jg_encode::{DelegateSlot, EncoderRegistry, EncodeError};
///
/// let registry = EncoderRegistry::new();
/// let slot = DelegateSlot::<i32>::new();
/// assert!(matches!(slot.get(), Err(EncodeError::Unresolved { .. })));
///
/// slot.bind(registry.find::<i32>().unwrap()).unwrap();
/// assert!(slot.is_bound());
/// assert!(slot.bind(registry.find::<i32>().unwrap()).is_err());
/// ```
pub struct DelegateSlot<T: ?Sized + 'static>(OnceLock<Arc<dyn Encoder<T>>>);

impl<T: ?Sized + 'static> DelegateSlot<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Bind the slot, fails if it was bound already.
    pub fn bind(&self, encoder: Arc<dyn Encoder<T>>) -> Result<(), BindingError> {
        self.0.set(encoder).map_err(|_| BindingError::AlreadyBound {
            type_name: type_name::<T>(),
        })?;
        log::trace!("bound delegate slot for `{}`", type_name::<T>());
        Ok(())
    }

    /// The bound encoder, [`EncodeError::Unresolved`] before binding.
    #[inline]
    pub fn get(&self) -> Result<&dyn Encoder<T>, EncodeError> {
        match self.0.get() {
            Some(encoder) => Ok(&**encoder),
            None => Err(EncodeError::Unresolved {
                type_name: type_name::<T>(),
            }),
        }
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T: ?Sized + 'static> Default for DelegateSlot<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for DelegateSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateSlot")
            .field("type", &type_name::<T>())
            .field("bound", &self.is_bound())
            .finish()
    }
}
