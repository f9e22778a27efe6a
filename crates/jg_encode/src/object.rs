use alloc::boxed::Box;
use core::fmt;

use serde_core::{Serialize, Serializer};

/// A member whose static type says nothing about its shape.
///
/// Generated encoders hand an `Object` to the generator unchanged, and the
/// generator writes it through `serde`. A null `Object` is written as
/// `null`.
///
/// ```
/// use jg_encode::Object;
///
/// let object = Object::new(vec![1, 2, 3]);
/// assert!(!object.is_null());
/// assert_eq!(serde_json::to_string(&object).unwrap(), "[1,2,3]");
/// assert_eq!(serde_json::to_string(&Object::null()).unwrap(), "null");
/// ```
#[derive(Default)]
pub struct Object(Option<Box<dyn erased_serde::Serialize + Send + Sync>>);

impl Object {
    #[inline]
    pub const fn null() -> Self {
        Self(None)
    }

    pub fn new<T: Serialize + Send + Sync + 'static>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The wrapped value, `None` for a null object.
    #[inline]
    pub fn as_serialize(&self) -> Option<&(dyn erased_serde::Serialize + Send + Sync)> {
        self.0.as_deref()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("Object(null)")
        } else {
            f.write_str("Object(..)")
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => erased_serde::serialize(&**value, serializer),
            None => serializer.serialize_none(),
        }
    }
}
