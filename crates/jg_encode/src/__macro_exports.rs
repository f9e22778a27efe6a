//! Items used by the code `#[derive(Encode)]` generates. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use serde_core::{Serialize, Serializer};

    use crate::{Encode, EncoderRegistry};

    pub use inventory;

    /// A registration function submitted by `#[encode(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn(&mut EncoderRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut EncoderRegistry);
    }

    impl<T: Encode> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut EncoderRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered by every successful [`__register_types`] run, so its
    /// presence tells that `inventory` works on this platform.
    pub struct __AvailFlag;

    impl Serialize for __AvailFlag {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_unit()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(|registry| {
            registry.register_serialize::<__AvailFlag>();
        })
    }

    pub fn __register_types(registry: &mut EncoderRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
