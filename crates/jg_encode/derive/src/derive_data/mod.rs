//! Parsing of the deriving type into properties.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod encode_derive;
mod encode_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use encode_derive::EncodeDerive;
pub(crate) use encode_meta::EncodeMeta;
