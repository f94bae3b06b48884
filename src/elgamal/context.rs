//! Initialized BabyJubJub context
//!
//! Holds what the one-time setup produces: the verified base point and a
//! table of `2^i * BasePoint` used for fixed-base multiplication (key
//! derivation, `C1`, plaintext embedding). The context is immutable after
//! construction and is `Send + Sync`, so one instance can serve concurrent
//! callers without locking.

use std::sync::OnceLock;

use num_bigint::BigUint;

use crate::curve::params::{
    BASE_POINT_X_DECIMAL, BASE_POINT_Y_DECIMAL, FIELD_MODULUS_DECIMAL, SUBGROUP_ORDER_DECIMAL,
};
use crate::curve::{modulus, order, ExtendedPoint, FieldElement, Point, Scalar, ORDER_BITS};
use crate::error::{ElGamalError, Result};

static GLOBAL: OnceLock<BabyJubJub> = OnceLock::new();

pub struct BabyJubJub {
    base_point: Point,
    /// `base_powers[i] = 2^i * BasePoint` for `i < ORDER_BITS`
    base_powers: Vec<ExtendedPoint>,
}

impl BabyJubJub {
    /// Run the one-time setup: self-check the pinned constants and
    /// precompute the fixed-base table.
    ///
    /// Fails with [`ElGamalError::Initialization`] if the compiled-in
    /// constants disagree with their published decimal form or do not
    /// describe a base point of order `l`.
    #[tracing::instrument(level = "debug")]
    pub fn init() -> Result<Self> {
        let base_point = verify_constants()?;

        let mut base_powers = Vec::with_capacity(ORDER_BITS);
        let mut current = ExtendedPoint::from_affine(&base_point);
        for _ in 0..ORDER_BITS {
            let next = current.double();
            base_powers.push(current);
            current = next;
        }

        tracing::debug!(table_entries = base_powers.len(), "BabyJubJub context initialized");
        Ok(BabyJubJub {
            base_point,
            base_powers,
        })
    }

    /// Process-wide context, initialized on first use.
    pub fn global() -> Result<&'static BabyJubJub> {
        if let Some(ctx) = GLOBAL.get() {
            return Ok(ctx);
        }
        // Concurrent first calls may both build a context; one of them is kept.
        let ctx = Self::init()?;
        Ok(GLOBAL.get_or_init(|| ctx))
    }

    pub fn base_point(&self) -> &Point {
        &self.base_point
    }

    /// `k * BasePoint` from the precomputed table: one addition per set bit
    /// of `k`, no doublings.
    pub fn mul_base(&self, k: &Scalar) -> Point {
        let mut acc = ExtendedPoint::identity();
        for (byte_index, byte) in k.as_biguint().to_bytes_le().iter().enumerate() {
            for bit in 0..8 {
                if (byte >> bit) & 1 == 0 {
                    continue;
                }
                // k < l, so every set bit has a table entry
                if let Some(power) = self.base_powers.get(byte_index * 8 + bit) {
                    acc = acc.add(power);
                }
            }
        }
        acc.to_affine()
    }

    /// `k * point` for an arbitrary curve point.
    pub fn scalar_multiply(&self, point: &Point, k: &Scalar) -> Point {
        if point == &self.base_point {
            return self.mul_base(k);
        }
        point.mul_scalar(k)
    }
}

impl std::fmt::Debug for BabyJubJub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BabyJubJub")
            .field("base_point", &self.base_point)
            .field("table_entries", &self.base_powers.len())
            .finish()
    }
}

fn parse_constant(name: &str, decimal: &str) -> Result<BigUint> {
    BigUint::parse_bytes(decimal.as_bytes(), 10)
        .ok_or_else(|| ElGamalError::Initialization(format!("{} is not a decimal integer", name)))
}

fn verify_constants() -> Result<Point> {
    if &parse_constant("field modulus", FIELD_MODULUS_DECIMAL)? != modulus() {
        return Err(ElGamalError::Initialization(
            "field modulus limbs disagree with the published prime".to_string(),
        ));
    }
    if &parse_constant("subgroup order", SUBGROUP_ORDER_DECIMAL)? != order() {
        return Err(ElGamalError::Initialization(
            "subgroup order limbs disagree with the published order".to_string(),
        ));
    }

    let gx = FieldElement::new(parse_constant("base point x", BASE_POINT_X_DECIMAL)?)
        .map_err(|e| ElGamalError::Initialization(e.to_string()))?;
    let gy = FieldElement::new(parse_constant("base point y", BASE_POINT_Y_DECIMAL)?)
        .map_err(|e| ElGamalError::Initialization(e.to_string()))?;
    let base_point = Point::from_coordinates(gx, gy)
        .map_err(|e| ElGamalError::Initialization(format!("base point: {}", e)))?;

    if base_point != Point::base_point() {
        return Err(ElGamalError::Initialization(
            "base point limbs disagree with the published coordinates".to_string(),
        ));
    }
    if base_point.is_identity() {
        return Err(ElGamalError::Initialization(
            "base point is the identity".to_string(),
        ));
    }
    if !base_point.is_in_subgroup() {
        return Err(ElGamalError::Initialization(
            "base point does not have order l".to_string(),
        ));
    }

    Ok(base_point)
}
