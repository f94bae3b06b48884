use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ElGamalError, Result};

/// Base field modulus of BabyJubJub (the BN254 scalar field), little-endian limbs.
///
/// p = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const MODULUS_LIMBS: [u64; 4] = [
    0x43E1F593F0000001,
    0x2833E84879B97091,
    0xB85045B68181585D,
    0x30644E72E131A029,
];

/// Width of a canonical big-endian encoding.
pub const FIELD_BYTES: usize = 32;

static MODULUS: OnceLock<BigUint> = OnceLock::new();
static MODULUS_MINUS_TWO: OnceLock<BigUint> = OnceLock::new();

/// Convert little-endian 64-bit limbs to a big integer
pub(crate) fn limbs_to_biguint(limbs: &[u64]) -> BigUint {
    let mut bytes = Vec::with_capacity(limbs.len() * 8);
    for limb in limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// True for a plain run of ASCII digits, with an optional leading sign when
/// `signed` is set. `BigUint::parse_bytes` skips `_` separators, so text
/// from outside the crate is checked here first.
pub(crate) fn is_decimal_literal(s: &str, signed: bool) -> bool {
    let digits = if signed {
        s.strip_prefix(['+', '-']).unwrap_or(s)
    } else {
        s
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// The field prime p.
pub fn modulus() -> &'static BigUint {
    MODULUS.get_or_init(|| limbs_to_biguint(&MODULUS_LIMBS))
}

fn modulus_minus_two() -> &'static BigUint {
    MODULUS_MINUS_TWO.get_or_init(|| modulus() - 2u32)
}

/// Element of the BabyJubJub base field.
///
/// The wrapped integer is always fully reduced into `[0, p)`. Values coming
/// from outside the crate go through [`FieldElement::new`] (rejects `>= p`)
/// or [`FieldElement::from_biguint_reduced`] (reduces).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    pub fn from_u64(val: u64) -> Self {
        Self::from_biguint_reduced(BigUint::from(val))
    }

    /// Strict constructor: the value must already be a canonical field element.
    pub fn new(value: BigUint) -> Result<Self> {
        if &value >= modulus() {
            return Err(ElGamalError::InvalidFieldElement(format!(
                "{} is not below the field modulus",
                value
            )));
        }
        Ok(FieldElement(value))
    }

    pub fn from_biguint_reduced(value: BigUint) -> Self {
        if &value < modulus() {
            FieldElement(value)
        } else {
            FieldElement(value % modulus())
        }
    }

    /// Parse a decimal integer in `[0, p)`.
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value = is_decimal_literal(trimmed, false)
            .then(|| BigUint::parse_bytes(trimmed.as_bytes(), 10))
            .flatten()
            .ok_or_else(|| {
                ElGamalError::InvalidFieldElement(format!("'{}' is not a decimal integer", trimmed))
            })?;
        Self::new(value)
    }

    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FIELD_BYTES {
            return Err(ElGamalError::InvalidFieldElement(format!(
                "expected {} bytes, got {}",
                FIELD_BYTES,
                bytes.len()
            )));
        }
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// Fixed-width big-endian encoding.
    pub fn to_bytes_be(&self) -> [u8; FIELD_BYTES] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; FIELD_BYTES];
        out[FIELD_BYTES - raw.len()..].copy_from_slice(&raw);
        out
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(&self, rhs: &FieldElement) -> FieldElement {
        let sum = &self.0 + &rhs.0;
        if &sum >= modulus() {
            FieldElement(sum - modulus())
        } else {
            FieldElement(sum)
        }
    }

    pub fn sub(&self, rhs: &FieldElement) -> FieldElement {
        if self.0 >= rhs.0 {
            FieldElement(&self.0 - &rhs.0)
        } else {
            FieldElement(modulus() - &rhs.0 + &self.0)
        }
    }

    pub fn neg(&self) -> FieldElement {
        if self.0.is_zero() {
            self.clone()
        } else {
            FieldElement(modulus() - &self.0)
        }
    }

    pub fn mul(&self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % modulus())
    }

    pub fn mul_u64(&self, rhs: u64) -> FieldElement {
        FieldElement((&self.0 * rhs) % modulus())
    }

    pub fn square(&self) -> FieldElement {
        self.mul(self)
    }

    pub fn double(&self) -> FieldElement {
        self.add(self)
    }

    /// Multiplicative inverse via Fermat: `x^(p-2)`.
    ///
    /// Zero maps to zero; use [`FieldElement::checked_inverse`] to tell the
    /// two apart.
    pub fn inverse(&self) -> FieldElement {
        FieldElement(self.0.modpow(modulus_minus_two(), modulus()))
    }

    pub fn checked_inverse(&self) -> Option<FieldElement> {
        if self.is_zero() {
            None
        } else {
            Some(self.inverse())
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.0)
    }
}

impl FromStr for FieldElement {
    type Err = ElGamalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_decimal_str(s)
    }
}

// Decimal strings on the wire, the shape the circuit's witness inputs use
impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

struct FieldElementVisitor;

impl<'de> Visitor<'de> for FieldElementVisitor {
    type Value = FieldElement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a canonical decimal field element")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<FieldElement, E> {
        FieldElement::from_decimal_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<FieldElement, E> {
        Ok(FieldElement::from_u64(v))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> std::result::Result<FieldElement, E> {
        Err(E::custom(
            "field element is too large for a plain number and must be quoted as a decimal string",
        ))
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(FieldElementVisitor)
    }
}
