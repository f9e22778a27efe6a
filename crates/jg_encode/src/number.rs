use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::sync::Arc;
use core::fmt;

// -----------------------------------------------------------------------------
// Number

/// A numeric value handed to a [`Generator`](crate::Generator).
///
/// Integers keep their full width. Arbitrary-precision values are carried
/// as their decimal text and written verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Number<'a> {
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F64(f64),
    Decimal(Cow<'a, str>),
}

impl Number<'_> {
    #[inline]
    pub const fn from_i32(value: i32) -> Number<'static> {
        Number::I64(value as i64)
    }

    #[inline]
    pub const fn from_i64(value: i64) -> Number<'static> {
        Number::I64(value)
    }

    #[inline]
    pub const fn from_f64(value: f64) -> Number<'static> {
        Number::F64(value)
    }

    pub fn into_owned(self) -> Number<'static> {
        match self {
            Number::I64(v) => Number::I64(v),
            Number::U64(v) => Number::U64(v),
            Number::I128(v) => Number::I128(v),
            Number::U128(v) => Number::U128(v),
            Number::F64(v) => Number::F64(v),
            Number::Decimal(text) => Number::Decimal(Cow::Owned(text.into_owned())),
        }
    }
}

impl fmt::Display for Number<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(v) => fmt::Display::fmt(v, f),
            Number::U64(v) => fmt::Display::fmt(v, f),
            Number::I128(v) => fmt::Display::fmt(v, f),
            Number::U128(v) => fmt::Display::fmt(v, f),
            Number::F64(v) => fmt::Display::fmt(v, f),
            Number::Decimal(text) => f.write_str(text),
        }
    }
}

// -----------------------------------------------------------------------------
// Numeric

/// A type that can be written as a JSON number.
///
/// Implemented for every primitive integer and float, for `Box`, `Rc` and
/// `Arc` of a numeric, and with the `bignum` feature for `BigInt`,
/// `BigUint` and `BigDecimal`.
///
/// ```
/// use jg_encode::{Number, Numeric};
///
/// assert_eq!(7_u8.to_number(), Number::U64(7));
/// assert_eq!(Box::new(-3_i16).to_number(), Number::I64(-3));
/// ```
pub trait Numeric {
    fn to_number(&self) -> Number<'_>;
}

macro_rules! impl_numeric {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn to_number(&self) -> Number<'_> {
                    Number::$variant(<$wide>::from(*self))
                }
            }
        )+
    };
}

impl_numeric!(I64 as i64: i8, i16, i32, i64);
impl_numeric!(U64 as u64: u8, u16, u32, u64);
impl_numeric!(I128 as i128: i128);
impl_numeric!(U128 as u128: u128);
impl_numeric!(F64 as f64: f32, f64);

impl Numeric for isize {
    #[inline]
    fn to_number(&self) -> Number<'_> {
        Number::I64(*self as i64)
    }
}

impl Numeric for usize {
    #[inline]
    fn to_number(&self) -> Number<'_> {
        Number::U64(*self as u64)
    }
}

macro_rules! impl_numeric_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<N: Numeric + ?Sized> Numeric for $ptr<N> {
                #[inline]
                fn to_number(&self) -> Number<'_> {
                    N::to_number(self)
                }
            }
        )+
    };
}

impl_numeric_pointer!(Box, Rc, Arc);

impl<N: Numeric + ?Sized> Numeric for &N {
    #[inline]
    fn to_number(&self) -> Number<'_> {
        N::to_number(self)
    }
}

#[cfg(feature = "bignum")]
impl Numeric for num_bigint::BigInt {
    fn to_number(&self) -> Number<'_> {
        Number::Decimal(Cow::Owned(self.to_string()))
    }
}

#[cfg(feature = "bignum")]
impl Numeric for num_bigint::BigUint {
    fn to_number(&self) -> Number<'_> {
        Number::Decimal(Cow::Owned(self.to_string()))
    }
}

#[cfg(feature = "bignum")]
impl Numeric for bigdecimal::BigDecimal {
    fn to_number(&self) -> Number<'_> {
        Number::Decimal(Cow::Owned(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::ToString;
    use alloc::sync::Arc;

    use super::{Number, Numeric};

    #[test]
    fn widening() {
        assert_eq!((-1_i8).to_number(), Number::I64(-1));
        assert_eq!(u64::MAX.to_number(), Number::U64(u64::MAX));
        assert_eq!(i128::MIN.to_number(), Number::I128(i128::MIN));
        assert_eq!(1.5_f32.to_number(), Number::F64(1.5));
        assert_eq!(Arc::new(9_usize).to_number(), Number::U64(9));
    }

    #[test]
    fn display_and_owned() {
        let text = "12345678901234567890123";
        let number = Number::Decimal(Cow::Borrowed(text));
        assert_eq!(number.to_string(), text);
        assert_eq!(number.into_owned(), Number::Decimal(Cow::Owned(text.into())));
        assert_eq!(Number::from_i32(-4).to_string(), "-4");
    }

    #[cfg(feature = "bignum")]
    #[test]
    fn big_numbers() {
        let big: num_bigint::BigInt = "-98765432109876543210".parse().unwrap();
        assert_eq!(big.to_number().to_string(), "-98765432109876543210");

        let decimal: bigdecimal::BigDecimal = "3.14159".parse().unwrap();
        assert_eq!(decimal.to_number().to_string(), "3.14159");
    }
}
