use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::generator::Generator;
use crate::{EncodeError, Number};

/// One event recorded by a [`TokenBuffer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(String),
    String(String),
    Number(Number<'static>),
    Null,
    /// A value written through `serde`, captured as a JSON tree.
    Value(serde_json::Value),
}

/// A [`Generator`] that records every event without validating it.
///
/// Useful to look at what an encoder writes, or to write it later to
/// another generator with [`TokenBuffer::replay`].
///
/// ```
/// use jg_encode::{Generator, Token, TokenBuffer};
///
/// let mut buffer = TokenBuffer::new();
/// buffer.write_start_object().unwrap();
/// buffer.write_string_field("foo", None).unwrap();
/// buffer.write_end_object().unwrap();
///
/// assert_eq!(
///     buffer.tokens(),
///     [Token::StartObject, Token::FieldName("foo".into()), Token::Null, Token::EndObject],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    #[inline]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Write the recorded events, in order, to `generator`.
    pub fn replay(&self, generator: &mut dyn Generator) -> Result<(), EncodeError> {
        for token in &self.tokens {
            match token {
                Token::StartObject => generator.write_start_object()?,
                Token::EndObject => generator.write_end_object()?,
                Token::StartArray => generator.write_start_array()?,
                Token::EndArray => generator.write_end_array()?,
                Token::FieldName(name) => generator.write_field_name(name)?,
                Token::String(value) => generator.write_string(value)?,
                Token::Number(value) => generator.write_number(value.clone())?,
                Token::Null => generator.write_null()?,
                Token::Value(value) => generator.write_serialize(value)?,
            }
        }
        Ok(())
    }

    #[inline]
    fn push(&mut self, token: Token) -> Result<(), EncodeError> {
        self.tokens.push(token);
        Ok(())
    }
}

impl Generator for TokenBuffer {
    fn write_start_object(&mut self) -> Result<(), EncodeError> {
        self.push(Token::StartObject)
    }

    fn write_end_object(&mut self) -> Result<(), EncodeError> {
        self.push(Token::EndObject)
    }

    fn write_start_array(&mut self) -> Result<(), EncodeError> {
        self.push(Token::StartArray)
    }

    fn write_end_array(&mut self) -> Result<(), EncodeError> {
        self.push(Token::EndArray)
    }

    fn write_field_name(&mut self, name: &str) -> Result<(), EncodeError> {
        self.push(Token::FieldName(name.to_string()))
    }

    fn write_string(&mut self, value: &str) -> Result<(), EncodeError> {
        self.push(Token::String(value.to_string()))
    }

    fn write_number(&mut self, value: Number<'_>) -> Result<(), EncodeError> {
        self.push(Token::Number(value.into_owned()))
    }

    fn write_null(&mut self) -> Result<(), EncodeError> {
        self.push(Token::Null)
    }

    fn write_serialize(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), EncodeError> {
        let value = serde_json::to_value(value)?;
        self.push(Token::Value(value))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Token, TokenBuffer};
    use crate::{Generator, JsonGenerator, Number, Object};

    #[test]
    fn replay_into_json() {
        let mut buffer = TokenBuffer::new();
        buffer.write_start_object().unwrap();
        buffer.write_number_field("n", Number::from_f64(0.5)).unwrap();
        buffer.write_object_field("o", &Object::new("s")).unwrap();
        buffer.write_end_object().unwrap();

        assert_eq!(buffer.tokens()[4], Token::Value(serde_json::json!("s")));

        let mut json = JsonGenerator::new(Vec::new());
        buffer.replay(&mut json).unwrap();
        assert_eq!(json.into_inner(), br#"{"n":0.5,"o":"s"}"#);
    }
}
