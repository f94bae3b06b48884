//! Exponential ElGamal over BabyJubJub
//!
//! All operations hang off an initialized [`BabyJubJub`] context, so nothing
//! can run before the one-time setup has verified the curve constants.
//!
//! ```rust
//! use babyjub_elgamal::elgamal::{BabyJubJub, PrivateKey};
//! use babyjub_elgamal::curve::Scalar;
//!
//! let ctx = BabyJubJub::global().unwrap();
//! let sk = PrivateKey::from(123456789);
//! let pk = ctx.private_to_public_key(&sk);
//!
//! let ct = ctx.encrypt(&pk, 42u64, &Scalar::from_u64(987654321)).unwrap();
//! assert_eq!(ctx.decrypt_embedded(&sk, &ct), ctx.encode(42u64).unwrap());
//! ```

pub mod cipher;
pub mod context;
pub mod homomorphic;
pub mod keys;
pub mod plaintext;

pub use cipher::Ciphertext;
pub use context::BabyJubJub;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use plaintext::{EmbeddedPoint, IntoPlaintext, Plaintext};
