use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use serde_core::Serialize;

use crate::{BindingError, DelegateSlot, EncodeContext, EncodeError, Encoder, Generator};

// -----------------------------------------------------------------------------
// SerdeEncoder

/// Writes a value through its `serde` implementation.
///
/// Registered by [`EncoderRegistry::new`](crate::EncoderRegistry::new) for
/// the primitive types and `String`.
pub struct SerdeEncoder<T>(PhantomData<fn(&T)>);

impl<T> SerdeEncoder<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SerdeEncoder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SerdeEncoder")
    }
}

impl<T: Serialize + 'static> Encoder<T> for SerdeEncoder<T> {
    fn encode(
        &self,
        value: &T,
        generator: &mut dyn Generator,
        _context: &EncodeContext<'_>,
    ) -> Result<(), EncodeError> {
        generator.write_serialize(value)
    }
}

// -----------------------------------------------------------------------------
// SeqEncoder

/// Writes a `Vec<T>` as an array, each element with the registered encoder
/// of `T`.
pub struct SeqEncoder<T: 'static> {
    element: DelegateSlot<T>,
}

impl<T: 'static> SeqEncoder<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            element: DelegateSlot::new(),
        }
    }
}

impl<T: 'static> Default for SeqEncoder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for SeqEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqEncoder").field("element", &self.element).finish()
    }
}

impl<T: 'static> Encoder<Vec<T>> for SeqEncoder<T> {
    fn encode(
        &self,
        value: &Vec<T>,
        generator: &mut dyn Generator,
        context: &EncodeContext<'_>,
    ) -> Result<(), EncodeError> {
        let element = self.element.get()?;
        generator.write_start_array()?;
        for item in value {
            element.encode(item, generator, context)?;
        }
        generator.write_end_array()
    }

    fn resolve(&self, context: &EncodeContext<'_>) -> Result<(), BindingError> {
        self.element.bind(context.find::<T>()?)
    }

    fn requires_resolution(&self) -> bool {
        true
    }
}

// -----------------------------------------------------------------------------
// OptionEncoder

/// Writes `None` as `null` and `Some` with the registered encoder of `T`.
pub struct OptionEncoder<T: 'static> {
    inner: DelegateSlot<T>,
}

impl<T: 'static> OptionEncoder<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            inner: DelegateSlot::new(),
        }
    }
}

impl<T: 'static> Default for OptionEncoder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for OptionEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionEncoder").field("inner", &self.inner).finish()
    }
}

impl<T: 'static> Encoder<Option<T>> for OptionEncoder<T> {
    fn encode(
        &self,
        value: &Option<T>,
        generator: &mut dyn Generator,
        context: &EncodeContext<'_>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.inner.get()?.encode(value, generator, context),
            None => generator.write_null(),
        }
    }

    fn resolve(&self, context: &EncodeContext<'_>) -> Result<(), BindingError> {
        self.inner.bind(context.find::<T>()?)
    }

    fn requires_resolution(&self) -> bool {
        true
    }
}
