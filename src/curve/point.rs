use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::extended::ExtendedPoint;
use super::field::{limbs_to_biguint, FieldElement};
use super::params::{A, BASE_POINT_X_LIMBS, BASE_POINT_Y_LIMBS, D};
use super::scalar::{order, Scalar};
use crate::error::{ElGamalError, Result};

/// Affine point on BabyJubJub.
///
/// Points built through the public constructors always satisfy the curve
/// equation `a*x^2 + y^2 = 1 + d*x^2*y^2 (mod p)`. The identity is `(0, 1)`.
///
/// Serialized as `{"x": "<decimal>", "y": "<decimal>"}`; deserialization
/// runs the on-curve check, so untrusted ledger data cannot smuggle in an
/// invalid point.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PointRepr")]
pub struct Point {
    x: FieldElement,
    y: FieldElement,
}

#[derive(Deserialize)]
struct PointRepr {
    x: FieldElement,
    y: FieldElement,
}

impl TryFrom<PointRepr> for Point {
    type Error = ElGamalError;

    fn try_from(repr: PointRepr) -> Result<Self> {
        Point::from_coordinates(repr.x, repr.y)
    }
}

impl Point {
    pub fn identity() -> Self {
        Point {
            x: FieldElement::zero(),
            y: FieldElement::one(),
        }
    }

    /// The fixed generator of the prime-order subgroup.
    pub fn base_point() -> Self {
        Point {
            x: FieldElement::from_biguint_reduced(limbs_to_biguint(&BASE_POINT_X_LIMBS)),
            y: FieldElement::from_biguint_reduced(limbs_to_biguint(&BASE_POINT_Y_LIMBS)),
        }
    }

    /// Validating constructor for externally supplied coordinates.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Point { x, y };
        if !point.is_on_curve() {
            tracing::debug!(x = %point.x, y = %point.y, "Rejected point not on curve");
            return Err(ElGamalError::InvalidPoint {
                x: point.x.to_string(),
                y: point.y.to_string(),
            });
        }
        Ok(point)
    }

    /// Parse and validate decimal coordinates, the circuit's wire format.
    pub fn from_decimal(x: &str, y: &str) -> Result<Self> {
        Self::from_coordinates(
            FieldElement::from_decimal_str(x)?,
            FieldElement::from_decimal_str(y)?,
        )
    }

    /// Caller guarantees the coordinates are on the curve.
    pub(crate) fn from_coordinates_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Point { x, y }
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == FieldElement::one()
    }

    /// Checks `a*x^2 + y^2 == 1 + d*x^2*y^2 (mod p)`.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let lhs = x2.mul_u64(A).add(&y2);
        let rhs = FieldElement::one().add(&x2.mul(&y2).mul_u64(D));
        lhs == rhs
    }

    /// True when the point lies in the subgroup generated by the base point.
    pub fn is_in_subgroup(&self) -> bool {
        self.mul_unreduced(order()).is_identity()
    }

    /// Twisted Edwards addition:
    ///
    /// ```text
    /// x3 = (x1*y2 + y1*x2) / (1 + d*x1*x2*y1*y2)
    /// y3 = (y1*y2 - a*x1*x2) / (1 - d*x1*x2*y1*y2)
    /// ```
    ///
    /// Both denominators are non-zero for points on the curve.
    pub fn add(&self, other: &Point) -> Point {
        let x1x2 = self.x.mul(&other.x);
        let y1y2 = self.y.mul(&other.y);
        let x1y2 = self.x.mul(&other.y);
        let y1x2 = self.y.mul(&other.x);
        let tau = x1x2.mul(&y1y2).mul_u64(D);

        let x_num = x1y2.add(&y1x2);
        let x_den = FieldElement::one().add(&tau);
        let y_num = y1y2.sub(&x1x2.mul_u64(A));
        let y_den = FieldElement::one().sub(&tau);

        Point {
            x: x_num.mul(&x_den.inverse()),
            y: y_num.mul(&y_den.inverse()),
        }
    }

    pub fn double(&self) -> Point {
        self.add(self)
    }

    /// `(-x, y)`
    pub fn negate(&self) -> Point {
        Point {
            x: self.x.neg(),
            y: self.y.clone(),
        }
    }

    pub fn sub(&self, other: &Point) -> Point {
        self.add(&other.negate())
    }

    /// `k * self` for a scalar already reduced modulo the subgroup order.
    pub fn mul_scalar(&self, k: &Scalar) -> Point {
        self.mul_unreduced(k.as_biguint())
    }

    /// `k * self` without reducing `k`. Needed for order checks, where
    /// `l mod l` would collapse to zero.
    pub(crate) fn mul_unreduced(&self, k: &BigUint) -> Point {
        ExtendedPoint::from_affine(self).mul(k).to_affine()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point {{ x: {}, y: {} }}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::field::modulus;

    const TWO_G_X: &str =
        "10031262171927540148667355526369034398030886437092045105752248699557385197826";
    const TWO_G_Y: &str =
        "633281375905621697187330766174974863687049529291089048651929454608812697683";

    #[test]
    fn test_base_point_on_curve() {
        let g = Point::base_point();
        assert!(g.is_on_curve());
        assert!(!g.is_identity());
        assert_eq!(
            g.x().to_string(),
            crate::curve::params::BASE_POINT_X_DECIMAL
        );
        assert_eq!(
            g.y().to_string(),
            crate::curve::params::BASE_POINT_Y_DECIMAL
        );
    }

    #[test]
    fn test_identity() {
        let id = Point::identity();
        assert!(id.is_on_curve());
        assert!(id.is_identity());
        let g = Point::base_point();
        assert_eq!(g.add(&id), g);
        assert_eq!(id.add(&g), g);
    }

    #[test]
    fn test_double_known_value() {
        let two_g = Point::base_point().double();
        assert_eq!(two_g, Point::from_decimal(TWO_G_X, TWO_G_Y).unwrap());
    }

    #[test]
    fn test_add_negate_is_identity() {
        let g = Point::base_point();
        assert!(g.add(&g.negate()).is_identity());
        assert!(g.sub(&g).is_identity());
    }

    #[test]
    fn test_add_commutes() {
        let g = Point::base_point();
        let two_g = g.double();
        assert_eq!(g.add(&two_g), two_g.add(&g));
    }

    #[test]
    fn test_from_coordinates_rejects_off_curve() {
        let result = Point::from_decimal("1", "2");
        assert!(matches!(result, Err(ElGamalError::InvalidPoint { .. })));
    }

    #[test]
    fn test_from_coordinates_rejects_unreduced() {
        let p = modulus().to_string();
        assert!(matches!(
            Point::from_decimal(&p, "1"),
            Err(ElGamalError::InvalidFieldElement(_))
        ));
    }

    #[test]
    fn test_order_two_point_is_on_curve_but_not_in_subgroup() {
        // (0, -1) has order 2
        let minus_one = FieldElement::one().neg();
        let p = Point::from_coordinates(FieldElement::zero(), minus_one).unwrap();
        assert!(p.double().is_identity());
        assert!(!p.is_in_subgroup());
        assert!(Point::base_point().is_in_subgroup());
        // torsion points are cleared by the cofactor
        let cleared = p.mul_unreduced(&BigUint::from(crate::curve::params::COFACTOR));
        assert!(cleared.is_identity());
    }

    #[test]
    fn test_mul_scalar_matches_repeated_add() {
        let g = Point::base_point();
        let mut acc = Point::identity();
        for k in 0u64..20 {
            assert_eq!(g.mul_scalar(&Scalar::from_u64(k)), acc);
            acc = acc.add(&g);
        }
    }

    #[test]
    fn test_mul_by_order_is_identity() {
        let g = Point::base_point();
        assert!(g.mul_unreduced(order()).is_identity());
        // reduced scalar l collapses to zero
        assert!(g
            .mul_scalar(&Scalar::from_biguint(order().clone()))
            .is_identity());
    }

    #[test]
    fn test_serde_validates_on_curve() {
        let g = Point::base_point();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"x\":\"5299619240641551281634865583518297030282874472190772894086521144482721001553\""));
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);

        let bad = r#"{"x":"1","y":"2"}"#;
        assert!(serde_json::from_str::<Point>(bad).is_err());
    }
}
