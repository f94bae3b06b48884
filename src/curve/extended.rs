//! Extended twisted Edwards coordinates
//!
//! A point (X:Y:Z:T) represents the affine point x = X/Z, y = Y/Z with
//! T = X*Y/Z. Addition and doubling use the Hisil-Wong-Carter-Dawson
//! formulas (`add-2008-hwcd`, `dbl-2008-hwcd`), which need no inversion, so a
//! full scalar multiplication pays a single inversion when converting back
//! to affine form. With `a` square and `d` non-square on BabyJubJub the
//! addition law is complete: Z never vanishes for points on the curve.

use num_bigint::BigUint;

use super::field::FieldElement;
use super::params::{A, D};
use super::point::Point;

/// Window width for variable-base multiplication.
const WINDOW_BITS: u32 = 4;
const WINDOW_SIZE: usize = 1 << WINDOW_BITS;

#[derive(Clone, Debug)]
pub(crate) struct ExtendedPoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    t: FieldElement,
}

impl ExtendedPoint {
    pub(crate) fn identity() -> Self {
        ExtendedPoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::one(),
            t: FieldElement::zero(),
        }
    }

    pub(crate) fn from_affine(p: &Point) -> Self {
        ExtendedPoint {
            x: p.x().clone(),
            y: p.y().clone(),
            z: FieldElement::one(),
            t: p.x().mul(p.y()),
        }
    }

    pub(crate) fn to_affine(&self) -> Point {
        let z_inv = self.z.inverse();
        Point::from_coordinates_unchecked(self.x.mul(&z_inv), self.y.mul(&z_inv))
    }

    pub(crate) fn add(&self, other: &ExtendedPoint) -> ExtendedPoint {
        let a = self.x.mul(&other.x);
        let b = self.y.mul(&other.y);
        let c = self.t.mul_u64(D).mul(&other.t);
        let d = self.z.mul(&other.z);
        let e = self
            .x
            .add(&self.y)
            .mul(&other.x.add(&other.y))
            .sub(&a)
            .sub(&b);
        let f = d.sub(&c);
        let g = d.add(&c);
        let h = b.sub(&a.mul_u64(A));

        ExtendedPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    pub(crate) fn double(&self) -> ExtendedPoint {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().double();
        let d = a.mul_u64(A);
        let e = self.x.add(&self.y).square().sub(&a).sub(&b);
        let g = d.add(&b);
        let f = g.sub(&c);
        let h = d.sub(&b);

        ExtendedPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// Variable-base multiplication by an unreduced integer.
    ///
    /// Fixed 4-bit windows, most significant nibble first: 15 table
    /// additions up front, then 4 doublings and one addition per nibble.
    pub(crate) fn mul(&self, k: &BigUint) -> ExtendedPoint {
        let mut table = Vec::with_capacity(WINDOW_SIZE);
        table.push(ExtendedPoint::identity());
        for i in 1..WINDOW_SIZE {
            let next = table[i - 1].add(self);
            table.push(next);
        }

        let mut acc = ExtendedPoint::identity();
        for byte in k.to_bytes_be() {
            for nibble in [byte >> 4, byte & 0x0F] {
                for _ in 0..WINDOW_BITS {
                    acc = acc.double();
                }
                acc = acc.add(&table[nibble as usize]);
            }
        }
        acc
    }
}
