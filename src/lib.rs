//! BabyJubJub exponential ElGamal
//!
//! Additively homomorphic encryption of uint40 amounts over the BabyJubJub
//! twisted Edwards curve, compatible with circom's `babyjub` circuits:
//! - Field and curve arithmetic (`curve`)
//! - Keys, plaintext embedding, encryption and ciphertext addition (`elgamal`)
//! - Witness documents for the mint and transfer circuits (`circuit_inputs`)
//! - YAML-driven jobs for the command-line tool (`config`, `jobs`)

pub mod circuit_inputs;
pub mod config;
pub mod curve;
pub mod elgamal;
pub mod error;
pub mod jobs;

pub use error::{ElGamalError, Result};
