#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Modules

mod assemble;
mod descriptor;
mod property;
mod strategy;
mod synthesize;

pub mod path;

// -----------------------------------------------------------------------------
// Exports

pub use assemble::{SerializationPlan, assemble};
pub use descriptor::{BoxedNumeric, NumericKind, TypeDescriptor, TypeKind};
pub use property::BoundProperty;
pub use strategy::{EncodingStrategy, OptionalKind, classify};
pub use synthesize::{DelegateSlotDecl, PropertyPlan, synthesize};
