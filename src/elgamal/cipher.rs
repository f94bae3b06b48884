//! Exponential ElGamal encryption and decryption
//!
//! ```text
//! C1 = r * BasePoint
//! C2 = m * BasePoint + r * PublicKey
//! C2 - sk * C1 = m * BasePoint
//! ```
//!
//! The randomness `r` is always supplied by the caller, so encryption is a
//! pure function of `(pk, m, r)` and reproducible bit for bit.

use serde::{Deserialize, Serialize};

use super::context::BabyJubJub;
use super::keys::{PrivateKey, PublicKey};
use super::plaintext::{EmbeddedPoint, IntoPlaintext};
use crate::curve::{Point, Scalar};
use crate::error::Result;

/// ElGamal ciphertext `{C1, C2}`. Field names follow the circuit inputs.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ciphertext {
    #[serde(rename = "C1")]
    c1: Point,
    #[serde(rename = "C2")]
    c2: Point,
}

impl Ciphertext {
    pub fn new(c1: Point, c2: Point) -> Self {
        Ciphertext { c1, c2 }
    }

    /// Encryption of zero with zero randomness; the neutral element for
    /// ciphertext addition.
    pub fn identity() -> Self {
        Ciphertext {
            c1: Point::identity(),
            c2: Point::identity(),
        }
    }

    /// Parse and validate both components from decimal coordinates.
    pub fn from_decimal(c1: (&str, &str), c2: (&str, &str)) -> Result<Self> {
        Ok(Ciphertext {
            c1: Point::from_decimal(c1.0, c1.1)?,
            c2: Point::from_decimal(c2.0, c2.1)?,
        })
    }

    pub fn c1(&self) -> &Point {
        &self.c1
    }

    pub fn c2(&self) -> &Point {
        &self.c2
    }

    /// True when both components lie in the prime-order subgroup.
    pub fn is_in_subgroup(&self) -> bool {
        self.c1.is_in_subgroup() && self.c2.is_in_subgroup()
    }
}

impl BabyJubJub {
    /// Encrypt `message` under `public_key` with caller-supplied `randomness`.
    ///
    /// The plaintext range check runs before any curve arithmetic and fails
    /// with [`crate::ElGamalError::Range`].
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn encrypt(
        &self,
        public_key: &PublicKey,
        message: impl IntoPlaintext,
        randomness: &Scalar,
    ) -> Result<Ciphertext> {
        let plaintext = message.into_plaintext()?;

        let c1 = self.mul_base(randomness);
        let shared_secret = public_key.as_point().mul_scalar(randomness);
        let embedded = self.embed(plaintext);
        let c2 = embedded.as_point().add(&shared_secret);

        Ok(Ciphertext { c1, c2 })
    }

    /// Recover the embedded point `m * BasePoint` as `C2 - sk * C1`.
    ///
    /// The integer `m` is not recovered here.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn decrypt_embedded(&self, private_key: &PrivateKey, ciphertext: &Ciphertext) -> EmbeddedPoint {
        let shared_secret = ciphertext.c1.mul_scalar(private_key.as_scalar());
        EmbeddedPoint::from_point(ciphertext.c2.add(&shared_secret.negate()))
    }

    /// Whether `ciphertext` decrypts under `private_key` to the claimed
    /// `message`. Compares embedded points; no discrete-log search.
    pub fn decrypts_to(
        &self,
        private_key: &PrivateKey,
        ciphertext: &Ciphertext,
        message: impl IntoPlaintext,
    ) -> Result<bool> {
        let expected = self.encode(message)?;
        Ok(self.decrypt_embedded(private_key, ciphertext) == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElGamalError;

    const TEST_RANDOMNESS: &str =
        "168986485046885582825082387270879151100288537211746581237924789162159767775";

    fn randomness() -> Scalar {
        Scalar::from_decimal_str(TEST_RANDOMNESS).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_42() {
        let ctx = BabyJubJub::global().unwrap();
        let sk = PrivateKey::from(123456789);
        let pk = ctx.private_to_public_key(&sk);

        let ct = ctx.encrypt(&pk, 42u64, &Scalar::from_u64(987654321)).unwrap();
        assert!(!ct.c1().is_identity());
        assert!(!ct.c2().is_identity());

        let decrypted = ctx.decrypt_embedded(&sk, &ct);
        assert_eq!(decrypted, ctx.encode(42u64).unwrap());
        assert_eq!(decrypted.as_point(), ctx.private_to_public_key(&PrivateKey::from(42)).as_point());
    }

    #[test]
    fn test_encrypt_is_deterministic() {
        let ctx = BabyJubJub::global().unwrap();
        let pk = ctx.private_to_public_key(&PrivateKey::from(123456789));
        let a = ctx.encrypt(&pk, 42u64, &randomness()).unwrap();
        let b = ctx.encrypt(&pk, 42u64, &randomness()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_plaintext_decrypts_to_identity() {
        let ctx = BabyJubJub::global().unwrap();
        let pair = ctx.generate_private_and_public_key();
        let ct = ctx.encrypt(&pair.public_key, 0u64, &randomness()).unwrap();
        assert!(!ct.c1().is_identity());
        assert!(!ct.c2().is_identity());
        let decrypted = ctx.decrypt_embedded(&pair.private_key, &ct);
        assert_eq!(
            decrypted.as_point(),
            ctx.private_to_public_key(&PrivateKey::from(0)).as_point()
        );
    }

    #[test]
    fn test_max_plaintext_roundtrip() {
        let ctx = BabyJubJub::global().unwrap();
        let pair = ctx.generate_private_and_public_key();
        let max = 1_099_511_627_775u64;
        let ct = ctx.encrypt(&pair.public_key, max, &randomness()).unwrap();
        assert!(ctx.decrypts_to(&pair.private_key, &ct, max).unwrap());
        assert!(!ctx.decrypts_to(&pair.private_key, &ct, max - 1).unwrap());
    }

    #[test]
    fn test_range_rejection() {
        let ctx = BabyJubJub::global().unwrap();
        let pk = ctx.private_to_public_key(&PrivateKey::from(7));
        let r = randomness();
        assert!(matches!(ctx.encrypt(&pk, 1u64 << 40, &r), Err(ElGamalError::Range(_))));
        assert!(matches!(ctx.encrypt(&pk, -1i64, &r), Err(ElGamalError::Range(_))));
        assert!(matches!(ctx.encrypt(&pk, 1.5f64, &r), Err(ElGamalError::Range(_))));
    }

    #[test]
    fn test_zero_randomness_leaves_c1_identity() {
        let ctx = BabyJubJub::global().unwrap();
        let pk = ctx.private_to_public_key(&PrivateKey::from(5));
        let ct = ctx.encrypt(&pk, 9u64, &Scalar::zero()).unwrap();
        assert!(ct.c1().is_identity());
        assert_eq!(ct.c2(), ctx.encode(9u64).unwrap().as_point());
    }

    #[test]
    fn test_serde_uses_circuit_field_names() {
        let ctx = BabyJubJub::global().unwrap();
        let pk = ctx.private_to_public_key(&PrivateKey::from(11));
        let ct = ctx.encrypt(&pk, 3u64, &Scalar::from_u64(17)).unwrap();
        let json = serde_json::to_value(&ct).unwrap();
        assert!(json.get("C1").and_then(|c| c.get("x")).is_some());
        assert!(json.get("C2").and_then(|c| c.get("y")).is_some());
        let back: Ciphertext = serde_json::from_value(json).unwrap();
        assert_eq!(back, ct);
        assert!(back.is_in_subgroup());
    }

    #[test]
    fn test_from_decimal_rejects_off_curve() {
        let err = Ciphertext::from_decimal(("1", "2"), ("0", "1")).unwrap_err();
        assert!(matches!(err, ElGamalError::InvalidPoint { .. }));
    }
}
