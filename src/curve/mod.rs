//! BabyJubJub curve arithmetic
//!
//! Field elements, scalars, and the affine group law of the twisted Edwards
//! curve the companion circuit uses. Scalar multiplication runs internally in
//! extended coordinates and returns affine points.

mod extended;
pub mod field;
pub mod params;
pub mod point;
pub mod scalar;

pub(crate) use extended::ExtendedPoint;

pub use field::{modulus, FieldElement};
pub use point::Point;
pub use scalar::{order, Scalar, ORDER_BITS};
