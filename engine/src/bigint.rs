//! [`JsBigInt`]: the evaluator's `BigInt` value type, adapted from the
//! teacher's `Rc<RawBigInt>`-backed wrapper (dropping its `num-integer`
//! dependency; `num_bigint::BigInt` implements the arithmetic `std::ops`
//! traits directly).

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use std::rc::Rc;

use num_bigint::BigInt as RawBigInt;
use num_traits::Zero;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsBigInt {
    inner: Rc<RawBigInt>,
}

impl JsBigInt {
    #[must_use]
    pub fn new<T: Into<Self>>(value: T) -> Self {
        value.into()
    }

    #[must_use]
    pub fn zero() -> Self {
        JsBigInt { inner: Rc::new(RawBigInt::zero()) }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    #[must_use]
    pub fn as_inner(&self) -> &RawBigInt {
        &self.inner
    }

    /// `StringToBigInt`: parses decimal/hex/octal/binary source text.
    #[must_use]
    pub fn from_string(s: &str) -> Option<Self> {
        let s = s.trim();
        let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            RawBigInt::parse_bytes(hex.as_bytes(), 16)
        } else if let Some(oct) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
            RawBigInt::parse_bytes(oct.as_bytes(), 8)
        } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
            RawBigInt::parse_bytes(bin.as_bytes(), 2)
        } else if s.is_empty() {
            Some(RawBigInt::zero())
        } else {
            RawBigInt::parse_bytes(s.as_bytes(), 10)
        };
        parsed.map(|v| JsBigInt { inner: Rc::new(v) })
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        use num_traits::ToPrimitive;
        self.inner.to_f64().unwrap_or(f64::NAN)
    }

    fn binary(&self, other: &Self, f: impl FnOnce(&RawBigInt, &RawBigInt) -> RawBigInt) -> Self {
        JsBigInt { inner: Rc::new(f(&self.inner, &other.inner)) }
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for JsBigInt {
            fn from(v: $t) -> Self {
                JsBigInt { inner: Rc::new(RawBigInt::from(v)) }
            }
        })*
    };
}
from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<RawBigInt> for JsBigInt {
    fn from(v: RawBigInt) -> Self {
        JsBigInt { inner: Rc::new(v) }
    }
}

impl Add for &JsBigInt {
    type Output = JsBigInt;
    fn add(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a + b)
    }
}

impl Sub for &JsBigInt {
    type Output = JsBigInt;
    fn sub(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a - b)
    }
}

impl Mul for &JsBigInt {
    type Output = JsBigInt;
    fn mul(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a * b)
    }
}

impl Div for &JsBigInt {
    type Output = JsBigInt;
    fn div(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a / b)
    }
}

impl Rem for &JsBigInt {
    type Output = JsBigInt;
    fn rem(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a % b)
    }
}

impl BitAnd for &JsBigInt {
    type Output = JsBigInt;
    fn bitand(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a & b)
    }
}

impl BitOr for &JsBigInt {
    type Output = JsBigInt;
    fn bitor(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a | b)
    }
}

impl BitXor for &JsBigInt {
    type Output = JsBigInt;
    fn bitxor(self, rhs: Self) -> JsBigInt {
        self.binary(rhs, |a, b| a ^ b)
    }
}

impl Shl<u32> for &JsBigInt {
    type Output = JsBigInt;
    fn shl(self, rhs: u32) -> JsBigInt {
        JsBigInt { inner: Rc::new(&*self.inner << rhs) }
    }
}

impl Shr<u32> for &JsBigInt {
    type Output = JsBigInt;
    fn shr(self, rhs: u32) -> JsBigInt {
        JsBigInt { inner: Rc::new(&*self.inner >> rhs) }
    }
}

impl Neg for &JsBigInt {
    type Output = JsBigInt;
    fn neg(self) -> JsBigInt {
        JsBigInt { inner: Rc::new(-&*self.inner) }
    }
}

impl fmt::Display for JsBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
