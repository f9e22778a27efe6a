use alloc::vec::Vec;
use std::io;

use crate::generator::Generator;
use crate::{EncodeError, Number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object { first: bool, named: bool },
    Array { first: bool },
}

/// A [`Generator`] writing compact JSON.
///
/// Scalars and `serde` values are written through `serde_json`, so escaping
/// and float formatting follow it. Misplaced events, such as a value inside
/// an object without a field name, fail with [`EncodeError::InvalidState`].
///
/// ```
/// use jg_encode::{Generator, JsonGenerator, Number};
///
/// let mut generator = JsonGenerator::new(Vec::new());
/// generator.write_start_object().unwrap();
/// generator.write_string_field("name", Some("a\"b")).unwrap();
/// generator.write_number_field("n", Number::from_i32(3)).unwrap();
/// generator.write_end_object().unwrap();
///
/// assert_eq!(generator.into_inner(), br#"{"name":"a\"b","n":3}"#);
/// ```
pub struct JsonGenerator<W> {
    writer: W,
    scopes: Vec<Scope>,
    root_written: bool,
}

impl<W: io::Write> JsonGenerator<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            scopes: Vec::new(),
            root_written: false,
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Whether one complete top-level value has been written.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.root_written && self.scopes.is_empty()
    }

    // Separator and state bookkeeping before any value.
    fn before_value(&mut self) -> Result<(), EncodeError> {
        match self.scopes.last_mut() {
            None => {
                if self.root_written {
                    return Err(EncodeError::InvalidState("more than one top-level value"));
                }
                self.root_written = true;
            }
            Some(Scope::Array { first }) => {
                if !*first {
                    self.writer.write_all(b",")?;
                }
                *first = false;
            }
            Some(Scope::Object { named, .. }) => {
                if !*named {
                    return Err(EncodeError::InvalidState("object value without a field name"));
                }
                *named = false;
            }
        }
        Ok(())
    }

    fn write_json<T: serde_core::Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.before_value()?;
        serde_json::to_writer(&mut self.writer, value)?;
        Ok(())
    }
}

impl<W: io::Write> Generator for JsonGenerator<W> {
    fn write_start_object(&mut self) -> Result<(), EncodeError> {
        self.before_value()?;
        self.writer.write_all(b"{")?;
        self.scopes.push(Scope::Object {
            first: true,
            named: false,
        });
        Ok(())
    }

    fn write_end_object(&mut self) -> Result<(), EncodeError> {
        match self.scopes.last() {
            Some(Scope::Object { named: false, .. }) => {
                self.scopes.pop();
                self.writer.write_all(b"}")?;
                Ok(())
            }
            Some(Scope::Object { named: true, .. }) => {
                Err(EncodeError::InvalidState("field name without a value"))
            }
            _ => Err(EncodeError::InvalidState("end of object outside an object")),
        }
    }

    fn write_start_array(&mut self) -> Result<(), EncodeError> {
        self.before_value()?;
        self.writer.write_all(b"[")?;
        self.scopes.push(Scope::Array { first: true });
        Ok(())
    }

    fn write_end_array(&mut self) -> Result<(), EncodeError> {
        match self.scopes.last() {
            Some(Scope::Array { .. }) => {
                self.scopes.pop();
                self.writer.write_all(b"]")?;
                Ok(())
            }
            _ => Err(EncodeError::InvalidState("end of array outside an array")),
        }
    }

    fn write_field_name(&mut self, name: &str) -> Result<(), EncodeError> {
        let Some(Scope::Object { first, named }) = self.scopes.last_mut() else {
            return Err(EncodeError::InvalidState("field name outside an object"));
        };
        if *named {
            return Err(EncodeError::InvalidState("field name without a value"));
        }
        let separator = !*first;
        *first = false;
        *named = true;

        if separator {
            self.writer.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.writer, name)?;
        self.writer.write_all(b":")?;
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<(), EncodeError> {
        self.write_json(value)
    }

    fn write_number(&mut self, value: Number<'_>) -> Result<(), EncodeError> {
        match value {
            Number::I64(v) => self.write_json(&v),
            Number::U64(v) => self.write_json(&v),
            Number::I128(v) => self.write_json(&v),
            Number::U128(v) => self.write_json(&v),
            Number::F64(v) => self.write_json(&v),
            Number::Decimal(text) => {
                self.before_value()?;
                self.writer.write_all(text.as_bytes())?;
                Ok(())
            }
        }
    }

    fn write_null(&mut self) -> Result<(), EncodeError> {
        self.before_value()?;
        self.writer.write_all(b"null")?;
        Ok(())
    }

    fn write_serialize(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), EncodeError> {
        self.write_json(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::JsonGenerator;
    use crate::{EncodeError, Generator, Number, Object};

    fn text(generator: JsonGenerator<Vec<u8>>) -> String {
        String::from_utf8(generator.into_inner()).unwrap()
    }

    #[test]
    fn nested_separators() {
        let mut g = JsonGenerator::new(Vec::new());
        g.write_start_object().unwrap();
        g.write_field_name("list").unwrap();
        g.write_start_array().unwrap();
        g.write_number(Number::U64(1)).unwrap();
        g.write_start_object().unwrap();
        g.write_null_field("a").unwrap();
        g.write_end_object().unwrap();
        g.write_string("x").unwrap();
        g.write_end_array().unwrap();
        g.write_object_field("o", &Object::new([true, false])).unwrap();
        g.write_object_field("n", &Object::null()).unwrap();
        g.write_end_object().unwrap();

        assert!(g.is_complete());
        assert_eq!(text(g), r#"{"list":[1,{"a":null},"x"],"o":[true,false],"n":null}"#);
    }

    #[test]
    fn decimal_is_verbatim() {
        let mut g = JsonGenerator::new(Vec::new());
        g.write_number(Number::Decimal("123456789012345678901234567890.5".into())).unwrap();
        assert_eq!(text(g), "123456789012345678901234567890.5");
    }

    #[test]
    fn misuse_is_rejected() {
        let mut g = JsonGenerator::new(Vec::new());
        g.write_start_object().unwrap();
        assert!(matches!(g.write_string("v"), Err(EncodeError::InvalidState(_))));
        g.write_field_name("k").unwrap();
        assert!(matches!(g.write_field_name("k2"), Err(EncodeError::InvalidState(_))));
        assert!(matches!(g.write_end_object(), Err(EncodeError::InvalidState(_))));
        assert!(matches!(g.write_end_array(), Err(EncodeError::InvalidState(_))));
        g.write_null().unwrap();
        g.write_end_object().unwrap();
        assert!(matches!(g.write_null(), Err(EncodeError::InvalidState(_))));
    }
}
