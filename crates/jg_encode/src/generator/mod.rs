//! Output sinks for encoders.
//!
//! - [`Generator`]: the object-safe sink every encoder writes to.
//! - [`JsonGenerator`]: writes compact JSON text to an [`io::Write`](std::io::Write).
//! - [`TokenBuffer`]: records the calls as [`Token`]s.

// -----------------------------------------------------------------------------
// Modules

mod buffer;
mod json;

// -----------------------------------------------------------------------------
// Exports

pub use buffer::{Token, TokenBuffer};
pub use json::JsonGenerator;

use crate::{EncodeError, Number, Object};

// -----------------------------------------------------------------------------
// Generator

/// A streaming writer of a structured document.
///
/// Required methods write one event each. The provided `*_field` methods
/// write a field name followed by its value and are what generated
/// encoders call.
pub trait Generator {
    fn write_start_object(&mut self) -> Result<(), EncodeError>;

    fn write_end_object(&mut self) -> Result<(), EncodeError>;

    fn write_start_array(&mut self) -> Result<(), EncodeError>;

    fn write_end_array(&mut self) -> Result<(), EncodeError>;

    fn write_field_name(&mut self, name: &str) -> Result<(), EncodeError>;

    fn write_string(&mut self, value: &str) -> Result<(), EncodeError>;

    fn write_number(&mut self, value: Number<'_>) -> Result<(), EncodeError>;

    fn write_null(&mut self) -> Result<(), EncodeError>;

    /// Write any `serde` value at the current position.
    fn write_serialize(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), EncodeError>;

    /// Write `name` and the string, or `null` when absent.
    fn write_string_field(&mut self, name: &str, value: Option<&str>) -> Result<(), EncodeError> {
        self.write_field_name(name)?;
        match value {
            Some(value) => self.write_string(value),
            None => self.write_null(),
        }
    }

    fn write_number_field(&mut self, name: &str, value: Number<'_>) -> Result<(), EncodeError> {
        self.write_field_name(name)?;
        self.write_number(value)
    }

    fn write_null_field(&mut self, name: &str) -> Result<(), EncodeError> {
        self.write_field_name(name)?;
        self.write_null()
    }

    /// Write a generic [`Object`], `null` if it is null.
    fn write_object(&mut self, value: &Object) -> Result<(), EncodeError> {
        match value.as_serialize() {
            Some(value) => self.write_serialize(value),
            None => self.write_null(),
        }
    }

    fn write_object_field(&mut self, name: &str, value: &Object) -> Result<(), EncodeError> {
        self.write_field_name(name)?;
        self.write_object(value)
    }
}
