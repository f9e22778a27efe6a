#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `jg_encode`, also when the derive is used
// inside the crate itself.
extern crate self as jg_encode;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod encoder;
mod error;
mod number;
mod object;

pub mod generator;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use encoder::{DelegateSlot, Encode, Encoder};
pub use error::{BindingError, EncodeError};
pub use generator::{Generator, JsonGenerator, Token, TokenBuffer};
pub use number::{Number, Numeric};
pub use object::Object;
pub use registry::{
    EncodeContext, EncoderRegistry, ErasedEncoder, OptionEncoder, SeqEncoder, SerdeEncoder,
};

pub use jg_encode_derive as derive;
pub use jg_encode_derive::Encode;
