//! Job descriptions for the command-line tool
//!
//! A job file is a single YAML document whose `job` field selects the
//! operation. Amounts are plain integers. Scalars may be plain integers up to
//! 128 bits; anything wider, and every field coordinate, must be a quoted
//! decimal string since YAML reads longer numbers as lossy floats.
//!
//! ```yaml
//! job: encrypt
//! public_key:
//!   x: "15919299401931535325513703139194931338293993994510664661086800834970360591752"
//!   y: "1645780246786685895560641778865228215443840970280597910012614014295481144366"
//! value: 42
//! randomness: 987654321   # optional, drawn from the CSPRNG when absent
//! ```

use serde::{Deserialize, Serialize};

use crate::config::constants::MAX_PLAINTEXT;
use crate::curve::Scalar;
use crate::elgamal::{Ciphertext, PrivateKey, PublicKey};
use crate::error::{ElGamalError, Result};

// ============================================================================
// Job Payloads
// ============================================================================

/// Generate a key pair, or derive the public key of a given private key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeygenJob {
    #[serde(default)]
    pub private_key: Option<PrivateKey>,
}

/// Build the witness for the `mint` circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintJob {
    pub private_key: PrivateKey,
    pub value: u64,
    #[serde(default)]
    pub randomness: Option<Scalar>,
}

/// Build the witness for the `transfer` circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferJob {
    pub private_key: PrivateKey,
    pub public_key_to: PublicKey,
    pub value: u64,
    pub balance_old_me_clear: u64,
    pub balance_old_me_encrypted: Ciphertext,
    pub balance_old_to_encrypted: Ciphertext,
    #[serde(default)]
    pub randomness1: Option<Scalar>,
    #[serde(default)]
    pub randomness2: Option<Scalar>,
}

/// Encrypt an amount under a public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptJob {
    pub public_key: PublicKey,
    pub value: u64,
    #[serde(default)]
    pub randomness: Option<Scalar>,
}

/// Recover the embedded point, optionally checking it against a claimed
/// amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptJob {
    pub private_key: PrivateKey,
    pub ciphertext: Ciphertext,
    #[serde(default)]
    pub expected: Option<u64>,
}

/// Homomorphically add same-key ciphertexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddJob {
    pub ciphertexts: Vec<Ciphertext>,
}

// ============================================================================
// Root Job
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum JobConfig {
    Keygen(KeygenJob),
    Mint(MintJob),
    Transfer(TransferJob),
    Encrypt(EncryptJob),
    Decrypt(DecryptJob),
    Add(AddJob),
}

fn check_amount(field: &str, value: u64) -> Result<()> {
    if value > MAX_PLAINTEXT {
        return Err(ElGamalError::Config(format!(
            "{} must be at most {} (uint40), got {}",
            field, MAX_PLAINTEXT, value
        )));
    }
    Ok(())
}

impl JobConfig {
    pub fn name(&self) -> &'static str {
        match self {
            JobConfig::Keygen(_) => "keygen",
            JobConfig::Mint(_) => "mint",
            JobConfig::Transfer(_) => "transfer",
            JobConfig::Encrypt(_) => "encrypt",
            JobConfig::Decrypt(_) => "decrypt",
            JobConfig::Add(_) => "add",
        }
    }

    /// Validate job rules that parsing alone cannot express
    pub fn validate(&self) -> Result<()> {
        match self {
            JobConfig::Keygen(_) => Ok(()),
            JobConfig::Mint(job) => check_amount("value", job.value),
            JobConfig::Encrypt(job) => check_amount("value", job.value),
            JobConfig::Transfer(job) => {
                check_amount("value", job.value)?;
                check_amount("balance_old_me_clear", job.balance_old_me_clear)?;
                // Rule: cannot send more than the sender holds
                if job.value > job.balance_old_me_clear {
                    return Err(ElGamalError::Config(format!(
                        "Transfer value ({}) exceeds balance_old_me_clear ({})",
                        job.value, job.balance_old_me_clear
                    )));
                }
                Ok(())
            }
            JobConfig::Decrypt(job) => match job.expected {
                Some(expected) => check_amount("expected", expected),
                None => Ok(()),
            },
            JobConfig::Add(job) => {
                if job.ciphertexts.is_empty() {
                    return Err(ElGamalError::Config(
                        "Add job must list at least one ciphertext".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
