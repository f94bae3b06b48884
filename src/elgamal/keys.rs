use std::fmt;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::context::BabyJubJub;
use crate::curve::{Point, Scalar};
use crate::error::Result;

/// ElGamal private key: a scalar reduced modulo the subgroup order.
///
/// `Debug` is redacted so keys cannot leak through logs. Serialization
/// emits the decimal scalar, which the proof pipeline needs as a witness.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(Scalar);

impl PrivateKey {
    pub fn new(scalar: Scalar) -> Self {
        PrivateKey(scalar)
    }

    pub fn from_decimal_str(s: &str) -> Result<Self> {
        Ok(PrivateKey(Scalar::from_decimal_str(s)?))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Ok(PrivateKey(Scalar::from_hex(hex_str)?))
    }

    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    /// Decimal form of the secret. Only for handing to a prover, never for logs.
    pub fn expose_decimal(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(***)")
    }
}

impl From<Scalar> for PrivateKey {
    fn from(scalar: Scalar) -> Self {
        PrivateKey(scalar)
    }
}

impl From<u64> for PrivateKey {
    fn from(val: u64) -> Self {
        PrivateKey(Scalar::from_u64(val))
    }
}

/// ElGamal public key, `sk * BasePoint`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(Point);

impl PublicKey {
    /// Wrap a point received from outside (e.g. a key registry). The point
    /// type already guarantees it is on the curve.
    pub fn from_point(point: Point) -> Self {
        PublicKey(point)
    }

    pub fn from_decimal(x: &str, y: &str) -> Result<Self> {
        Ok(PublicKey(Point::from_decimal(x, y)?))
    }

    pub fn as_point(&self) -> &Point {
        &self.0
    }

    pub fn into_point(self) -> Point {
        self.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl BabyJubJub {
    /// Fresh private key, uniform in `[0, l)`, from the thread-local CSPRNG.
    pub fn generate_private_key(&self) -> PrivateKey {
        self.generate_private_key_with_rng(&mut rand::thread_rng())
    }

    pub fn generate_private_key_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> PrivateKey {
        PrivateKey(Scalar::random_with_rng(rng))
    }

    /// `sk * BasePoint`. A zero key yields the identity point and is
    /// accepted.
    pub fn private_to_public_key(&self, private_key: &PrivateKey) -> PublicKey {
        PublicKey(self.mul_base(private_key.as_scalar()))
    }

    pub fn generate_private_and_public_key(&self) -> KeyPair {
        let private_key = self.generate_private_key();
        let public_key = self.private_to_public_key(&private_key);
        tracing::debug!(public_key = %public_key.as_point(), "Generated key pair");
        KeyPair {
            private_key,
            public_key,
        }
    }
}
