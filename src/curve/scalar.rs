use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::field::{is_decimal_literal, limbs_to_biguint};
use crate::error::{ElGamalError, Result};

/// Subgroup order `l`, little-endian limbs.
///
/// l = 2736030358979909402780800718157159386076813972158567259200215660948447373041
pub const ORDER_LIMBS: [u64; 4] = [
    0x677297DC392126F1,
    0xAB3EEDB83920EE0A,
    0x370A08B6D0302B0B,
    0x060C89CE5C263405,
];

/// Bit length of `l`. Every reduced scalar fits in this many bits.
pub const ORDER_BITS: usize = 251;

static ORDER: OnceLock<BigUint> = OnceLock::new();

/// The subgroup order `l`.
pub fn order() -> &'static BigUint {
    ORDER.get_or_init(|| limbs_to_biguint(&ORDER_LIMBS))
}

/// Scalar for the BabyJubJub prime-order subgroup.
///
/// Scalars arrive as arbitrary-precision integers (private keys, encryption
/// randomness, plaintext exponents) and are reduced modulo `l` on
/// construction, so every group operation sees a value in `[0, l)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn zero() -> Self {
        Scalar(BigUint::zero())
    }

    pub fn one() -> Self {
        Scalar(BigUint::one())
    }

    pub fn from_u64(val: u64) -> Self {
        Self::from_biguint(BigUint::from(val))
    }

    pub fn from_biguint(value: BigUint) -> Self {
        if &value < order() {
            Scalar(value)
        } else {
            Scalar(value % order())
        }
    }

    /// Signed input, reduced to the non-negative representative.
    pub fn from_bigint(value: &BigInt) -> Self {
        let l = BigInt::from_biguint(Sign::Plus, order().clone());
        let mut r = value % &l;
        if r.sign() == Sign::Minus {
            r += &l;
        }
        // r is in [0, l) here
        Scalar(r.magnitude().clone())
    }

    /// Parse a decimal integer, optionally signed. Values of any size are
    /// accepted and reduced.
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value = is_decimal_literal(trimmed, true)
            .then(|| BigInt::parse_bytes(trimmed.as_bytes(), 10))
            .flatten()
            .ok_or_else(|| {
                ElGamalError::InvalidScalar(format!("'{}' is not a decimal integer", trimmed))
            })?;
        Ok(Self::from_bigint(&value))
    }

    /// Parse a big-endian hex string, with or without `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let hex_str = hex_str.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        // hex::decode wants an even number of digits
        let padded = if hex_str.len() % 2 == 1 {
            format!("0{}", hex_str)
        } else {
            hex_str.to_string()
        };
        let bytes = hex::decode(&padded)
            .map_err(|e| ElGamalError::InvalidScalar(format!("hex decode failed: {}", e)))?;
        Ok(Self::from_biguint(BigUint::from_bytes_be(&bytes)))
    }

    /// Uniform scalar in `[0, l)` from the thread-local CSPRNG.
    pub fn random() -> Self {
        Self::random_with_rng(&mut rand::thread_rng())
    }

    /// Uniform scalar in `[0, l)` by rejection sampling 251-bit candidates.
    ///
    /// Sampling below `l` directly (instead of reducing a wider value) keeps
    /// the distribution free of modulo bias.
    pub fn random_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut random_bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut random_bytes);
            // keep the low 251 bits (big-endian: top byte holds bits 248..255)
            random_bytes[0] &= 0x07;

            let candidate = BigUint::from_bytes_be(&random_bytes);
            if &candidate < order() {
                return Scalar(candidate);
            }
        }
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum modulo `l`. Adding ciphertexts adds their randomness this way.
    pub fn add(&self, rhs: &Scalar) -> Scalar {
        Self::from_biguint(&self.0 + &rhs.0)
    }

    pub fn neg(&self) -> Scalar {
        if self.0.is_zero() {
            self.clone()
        } else {
            Scalar(order() - &self.0)
        }
    }

    /// 32-byte big-endian encoding.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes_be()))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.0)
    }
}

impl FromStr for Scalar {
    type Err = ElGamalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_decimal_str(s)
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Self {
        Self::from_u64(val)
    }
}

impl From<BigUint> for Scalar {
    fn from(value: BigUint) -> Self {
        Self::from_biguint(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Scalar, E> {
        Scalar::from_decimal_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from_u64(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from_bigint(&BigInt::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from_biguint(BigUint::from(v)))
    }

    // YAML and JSON readers fall back to f64 for integers wider than they
    // can hold, which has already lost precision.
    fn visit_f64<E: de::Error>(self, _v: f64) -> std::result::Result<Scalar, E> {
        Err(E::custom(
            "scalar is too large for a plain number and must be quoted as a decimal string",
        ))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_order_matches_decimal() {
        let expected = BigUint::parse_bytes(
            crate::curve::params::SUBGROUP_ORDER_DECIMAL.as_bytes(),
            10,
        )
        .unwrap();
        assert_eq!(order(), &expected);
        assert_eq!(order().bits() as usize, ORDER_BITS);
    }

    #[test]
    fn test_reduction_mod_order() {
        assert!(Scalar::from_biguint(order().clone()).is_zero());
        assert_eq!(Scalar::from_biguint(order() + 7u32), Scalar::from_u64(7));
    }

    #[test]
    fn test_negative_input_wraps() {
        let minus_one = Scalar::from_bigint(&BigInt::from(-1));
        assert_eq!(minus_one.as_biguint(), &(order() - 1u32));
        assert_eq!(minus_one.add(&Scalar::one()), Scalar::zero());
        assert_eq!(Scalar::from_decimal_str("-1").unwrap(), minus_one);
    }

    #[test]
    fn test_decimal_and_hex_parsing() {
        let from_dec = Scalar::from_decimal_str("123456789").unwrap();
        let from_hex = Scalar::from_hex("0x75bcd15").unwrap();
        assert_eq!(from_dec, from_hex);
        assert_eq!(Scalar::from_hex("75BCD15").unwrap(), from_dec);
        assert!(Scalar::from_decimal_str("12ab").is_err());
        assert!(Scalar::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_hex_roundtrip_is_fixed_width() {
        let s = Scalar::from_u64(255);
        let hex_str = s.to_hex();
        assert_eq!(hex_str.len(), 2 + 64);
        assert!(hex_str.ends_with("ff"));
        assert_eq!(Scalar::from_hex(&hex_str).unwrap(), s);
    }

    #[test]
    fn test_random_is_below_order() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let s = Scalar::random_with_rng(&mut rng);
            assert!(s.as_biguint() < order());
        }
    }

    #[test]
    fn test_random_values_differ() {
        let a = Scalar::random();
        let b = Scalar::random();
        assert_ne!(a, b, "two CSPRNG scalars collided - RNG might be broken!");
    }

    #[test]
    fn test_neg() {
        let s = Scalar::from_u64(42);
        assert!(s.add(&s.neg()).is_zero());
        assert!(Scalar::zero().neg().is_zero());
    }

    #[test]
    fn test_serde_decimal_string() {
        let s = Scalar::from_u64(987654321);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"987654321\"");
        let back: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_serde_accepts_integers() {
        let from_int: Scalar = serde_json::from_str("987654321").unwrap();
        assert_eq!(from_int, Scalar::from_u64(987654321));
        let negative: Scalar = serde_json::from_str("-1").unwrap();
        assert_eq!(negative, Scalar::one().neg());
    }

    #[test]
    fn test_decimal_parsing_is_strict() {
        for bad in ["1_0", "4_2", "1__0", "-1_0", "+", "--1", "1e3"] {
            assert!(
                matches!(Scalar::from_decimal_str(bad), Err(ElGamalError::InvalidScalar(_))),
                "{:?}",
                bad
            );
        }
        assert_eq!(Scalar::from_decimal_str("+42").unwrap(), Scalar::from_u64(42));
        assert_eq!(Scalar::from_decimal_str("-1").unwrap(), Scalar::one().neg());
        assert!(serde_json::from_str::<Scalar>("\"1_0\"").is_err());
    }

    #[test]
    fn test_serde_rejects_float_width_numbers() {
        let err = serde_json::from_str::<Scalar>("1e80").unwrap_err();
        assert!(err.to_string().contains("must be quoted"));
    }
}
