//! Plaintext domain and embedding in the exponent
//!
//! `Plaintext` is the logical amount, an integer in `[0, 2^40 - 1]`.
//! `EmbeddedPoint` is `m * BasePoint`, what encryption actually hides and
//! what decryption gives back. They are separate types on purpose:
//! turning an embedded point back into an integer is a bounded discrete-log
//! search that this crate does not perform.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::context::BabyJubJub;
use crate::config::constants::MAX_PLAINTEXT;
use crate::curve::field::is_decimal_literal;
use crate::curve::{Point, Scalar};
use crate::error::{ElGamalError, Result};

/// Amount in the uint40 domain.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Plaintext(u64);

impl Plaintext {
    pub const ZERO: Plaintext = Plaintext(0);
    pub const MAX: Plaintext = Plaintext(MAX_PLAINTEXT);

    pub fn new(value: u64) -> Result<Self> {
        if value > MAX_PLAINTEXT {
            return Err(ElGamalError::Range(value.to_string()));
        }
        Ok(Plaintext(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Sum of two amounts, failing if it leaves the uint40 domain.
    pub fn checked_add(&self, other: Plaintext) -> Result<Plaintext> {
        Plaintext::new(self.0 + other.0)
    }

    pub fn checked_sub(&self, other: Plaintext) -> Option<Plaintext> {
        self.0.checked_sub(other.0).map(Plaintext)
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Plaintext {
    type Error = ElGamalError;

    fn try_from(value: u64) -> Result<Self> {
        Plaintext::new(value)
    }
}

impl From<Plaintext> for u64 {
    fn from(p: Plaintext) -> u64 {
        p.0
    }
}

/// Conversion from the shapes an amount arrives in at the boundary.
///
/// Every implementation fails with [`ElGamalError::Range`] for negative,
/// fractional, non-numeric, or too-large input. Nothing is truncated or
/// clamped.
pub trait IntoPlaintext {
    fn into_plaintext(self) -> Result<Plaintext>;
}

impl IntoPlaintext for Plaintext {
    fn into_plaintext(self) -> Result<Plaintext> {
        Ok(self)
    }
}

impl IntoPlaintext for &Plaintext {
    fn into_plaintext(self) -> Result<Plaintext> {
        Ok(*self)
    }
}

macro_rules! int_into_plaintext {
    ($($t:ty),*) => {
        $(
            impl IntoPlaintext for $t {
                fn into_plaintext(self) -> Result<Plaintext> {
                    let value = u64::try_from(self)
                        .map_err(|_| ElGamalError::Range(self.to_string()))?;
                    Plaintext::new(value)
                }
            }
        )*
    };
}

int_into_plaintext!(u8, u16, u32, u64, u128, usize);
int_into_plaintext!(i8, i16, i32, i64, i128, isize);

impl IntoPlaintext for f64 {
    fn into_plaintext(self) -> Result<Plaintext> {
        if !self.is_finite() || self.fract() != 0.0 || self < 0.0 || self > MAX_PLAINTEXT as f64 {
            return Err(ElGamalError::Range(self.to_string()));
        }
        Plaintext::new(self as u64)
    }
}

impl IntoPlaintext for &str {
    fn into_plaintext(self) -> Result<Plaintext> {
        let trimmed = self.trim();
        let value = is_decimal_literal(trimmed, true)
            .then(|| BigInt::parse_bytes(trimmed.as_bytes(), 10))
            .flatten()
            .ok_or_else(|| ElGamalError::Range(format!("'{}'", trimmed)))?;
        (&value).into_plaintext()
    }
}

impl IntoPlaintext for &BigInt {
    fn into_plaintext(self) -> Result<Plaintext> {
        let value = self
            .to_u64()
            .ok_or_else(|| ElGamalError::Range(self.to_string()))?;
        Plaintext::new(value)
    }
}

impl IntoPlaintext for &BigUint {
    fn into_plaintext(self) -> Result<Plaintext> {
        let value = self
            .to_u64()
            .ok_or_else(|| ElGamalError::Range(self.to_string()))?;
        Plaintext::new(value)
    }
}

/// The curve point `m * BasePoint` standing for plaintext `m`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddedPoint(Point);

impl EmbeddedPoint {
    pub fn from_point(point: Point) -> Self {
        EmbeddedPoint(point)
    }

    pub fn as_point(&self) -> &Point {
        &self.0
    }

    pub fn into_point(self) -> Point {
        self.0
    }
}

impl BabyJubJub {
    /// Validate `message` and embed it as `m * BasePoint`.
    pub fn encode(&self, message: impl IntoPlaintext) -> Result<EmbeddedPoint> {
        let plaintext = message.into_plaintext()?;
        Ok(self.embed(plaintext))
    }

    /// Embedding of an already validated plaintext.
    pub fn embed(&self, plaintext: Plaintext) -> EmbeddedPoint {
        EmbeddedPoint(self.mul_base(&Scalar::from_u64(plaintext.value())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POW_40: u64 = 1 << 40;

    #[test]
    fn test_plaintext_bounds() {
        assert!(Plaintext::new(0).is_ok());
        assert!(Plaintext::new(MAX_PLAINTEXT).is_ok());
        assert!(matches!(
            Plaintext::new(TWO_POW_40),
            Err(ElGamalError::Range(_))
        ));
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(42u32.into_plaintext().unwrap().value(), 42);
        assert_eq!(42i64.into_plaintext().unwrap().value(), 42);
        assert!((-1i64).into_plaintext().is_err());
        assert!((-1i32).into_plaintext().is_err());
        assert!((u128::MAX).into_plaintext().is_err());
        assert!((TWO_POW_40 as i128).into_plaintext().is_err());
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(42.0f64.into_plaintext().unwrap().value(), 42);
        assert!(1.5f64.into_plaintext().is_err());
        assert!((-1.0f64).into_plaintext().is_err());
        assert!(f64::NAN.into_plaintext().is_err());
        assert!(f64::INFINITY.into_plaintext().is_err());
        assert!((TWO_POW_40 as f64).into_plaintext().is_err());
        assert_eq!(
            (MAX_PLAINTEXT as f64).into_plaintext().unwrap().value(),
            MAX_PLAINTEXT
        );
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!("1000000000000".into_plaintext().unwrap().value(), 1_000_000_000_000);
        assert!("1.5".into_plaintext().is_err());
        assert!("-1".into_plaintext().is_err());
        assert!("1099511627776".into_plaintext().is_err());
        assert!("abc".into_plaintext().is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Plaintext::new(MAX_PLAINTEXT - 1).unwrap();
        let one = Plaintext::new(1).unwrap();
        assert_eq!(a.checked_add(one).unwrap(), Plaintext::MAX);
        assert!(Plaintext::MAX.checked_add(one).is_err());
        assert_eq!(one.checked_sub(one), Some(Plaintext::ZERO));
        assert_eq!(Plaintext::ZERO.checked_sub(one), None);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let p: Plaintext = serde_json::from_str("42").unwrap();
        assert_eq!(p.value(), 42);
        assert!(serde_json::from_str::<Plaintext>("1099511627776").is_err());
        assert_eq!(serde_json::to_string(&p).unwrap(), "42");
    }

    #[test]
    fn test_encode_zero_is_identity() {
        let ctx = BabyJubJub::global().unwrap();
        assert!(ctx.encode(0u64).unwrap().as_point().is_identity());
    }

    #[test]
    fn test_encode_one_is_base_point() {
        let ctx = BabyJubJub::global().unwrap();
        assert_eq!(ctx.encode(1u64).unwrap().as_point(), ctx.base_point());
    }

    #[test]
    fn test_encode_known_value() {
        let ctx = BabyJubJub::global().unwrap();
        let expected = Point::from_decimal(
            "2756817265436308373152970980469407708639447434621224209076647801443201833641",
            "16414789158706146034337677946720139175629582444207655085744951462751993091228",
        )
        .unwrap();
        assert_eq!(ctx.encode(42u64).unwrap().as_point(), &expected);
    }

    #[test]
    fn test_encode_is_additive() {
        let ctx = BabyJubJub::global().unwrap();
        let a = ctx.encode(1234u64).unwrap();
        let b = ctx.encode(5678u64).unwrap();
        let sum = ctx.encode(1234u64 + 5678).unwrap();
        assert_eq!(a.as_point().add(b.as_point()), *sum.as_point());
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        let ctx = BabyJubJub::global().unwrap();
        let err = ctx.encode(TWO_POW_40).unwrap_err();
        assert!(err.to_string().contains("uint40"));
    }

    #[test]
    fn test_string_with_digit_separators_is_rejected() {
        for bad in ["4_2", "1_099_511_627_775", "1_0", "4 2", ""] {
            assert!(
                matches!(bad.into_plaintext(), Err(ElGamalError::Range(_))),
                "{:?}",
                bad
            );
        }
        assert_eq!("42".into_plaintext().unwrap().value(), 42);
        assert_eq!("+42".into_plaintext().unwrap().value(), 42);
        assert_eq!(" 1099511627775 ".into_plaintext().unwrap().value(), MAX_PLAINTEXT);
    }
}
