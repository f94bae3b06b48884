//! Witness inputs for the companion `mint` and `transfer` circuits
//!
//! These documents are what a prover feeds to the circuits. Field names
//! match the circuit ABI exactly, and every number is a decimal string.
//! Building them runs the same encryption the ledger sees, so the prover
//! and the chain agree on every ciphertext. Proof generation itself happens
//! elsewhere.

use serde::{Deserialize, Serialize};

use crate::curve::{Point, Scalar};
use crate::elgamal::{BabyJubJub, Ciphertext, Plaintext, PrivateKey, PublicKey};
use crate::error::{ElGamalError, Result};

/// Inputs of the `mint` circuit: proves `(C1, C2)` encrypts `value` under the
/// key derived from `private_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintInput {
    pub private_key: PrivateKey,
    pub randomness: Scalar,
    pub public_key: PublicKey,
    pub value: String,
    #[serde(rename = "C1")]
    pub c1: Point,
    #[serde(rename = "C2")]
    pub c2: Point,
}

impl MintInput {
    pub fn build(
        ctx: &BabyJubJub,
        private_key: &PrivateKey,
        value: Plaintext,
        randomness: &Scalar,
    ) -> Result<Self> {
        let public_key = ctx.private_to_public_key(private_key);
        let ciphertext = ctx.encrypt(&public_key, value, randomness)?;

        tracing::debug!(value = %value, "Built mint circuit input");
        Ok(MintInput {
            private_key: private_key.clone(),
            randomness: randomness.clone(),
            public_key,
            value: value.to_string(),
            c1: ciphertext.c1().clone(),
            c2: ciphertext.c2().clone(),
        })
    }

    pub fn ciphertext(&self) -> Ciphertext {
        Ciphertext::new(self.c1.clone(), self.c2.clone())
    }
}

/// What the sender knows when preparing a transfer.
#[derive(Debug, Clone)]
pub struct TransferParams {
    pub sender_private_key: PrivateKey,
    pub recipient_public_key: PublicKey,
    pub value: Plaintext,
    /// Sender's current balance in the clear (the sender can decrypt it).
    pub sender_balance: Plaintext,
    /// Sender's current balance as stored on the ledger.
    pub sender_balance_encrypted: Ciphertext,
    /// Recipient's current balance as stored on the ledger.
    pub recipient_balance_encrypted: Ciphertext,
    /// Randomness for the sender's fresh balance ciphertext.
    pub randomness1: Scalar,
    /// Randomness for the encrypted amount added to the recipient's balance.
    pub randomness2: Scalar,
}

/// Inputs of the `transfer` circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferInput {
    pub private_key: PrivateKey,
    pub randomness1: Scalar,
    pub randomness2: Scalar,
    pub value: String,
    pub balance_old_me_clear: String,
    pub public_key_me: PublicKey,
    pub public_key_to: PublicKey,
    pub balance_old_me_encrypted_1: Point,
    pub balance_old_me_encrypted_2: Point,
    pub balance_old_to_encrypted_1: Point,
    pub balance_old_to_encrypted_2: Point,
    pub balance_new_me_encrypted_1: Point,
    pub balance_new_me_encrypted_2: Point,
    pub balance_new_to_encrypted_1: Point,
    pub balance_new_to_encrypted_2: Point,
}

impl TransferInput {
    /// Assemble transfer inputs.
    ///
    /// The sender's new balance is a fresh encryption of
    /// `sender_balance - value` under `randomness1`. The recipient's new
    /// balance is the ledger ciphertext plus `Enc(pk_to, value, randomness2)`,
    /// the same homomorphic update the chain applies. The recipient's
    /// resulting clear balance is unknown to the sender and not range-checked.
    #[tracing::instrument(level = "debug", skip_all, fields(value = %params.value))]
    pub fn build(ctx: &BabyJubJub, params: &TransferParams) -> Result<Self> {
        let new_sender_balance = params
            .sender_balance
            .checked_sub(params.value)
            .ok_or(ElGamalError::InsufficientBalance {
                balance: params.sender_balance.value(),
                value: params.value.value(),
            })?;

        let public_key_me = ctx.private_to_public_key(&params.sender_private_key);
        if !ctx.decrypts_to(
            &params.sender_private_key,
            &params.sender_balance_encrypted,
            params.sender_balance,
        )? {
            tracing::warn!("Sender balance ciphertext does not match the claimed clear balance");
            return Err(ElGamalError::BalanceMismatch);
        }

        let balance_new_me =
            ctx.encrypt(&public_key_me, new_sender_balance, &params.randomness1)?;
        let amount_to =
            ctx.encrypt(&params.recipient_public_key, params.value, &params.randomness2)?;
        let balance_new_to = ctx.add_ciphertexts(&params.recipient_balance_encrypted, &amount_to);

        let old_me = &params.sender_balance_encrypted;
        let old_to = &params.recipient_balance_encrypted;

        Ok(TransferInput {
            private_key: params.sender_private_key.clone(),
            randomness1: params.randomness1.clone(),
            randomness2: params.randomness2.clone(),
            value: params.value.to_string(),
            balance_old_me_clear: params.sender_balance.to_string(),
            public_key_me,
            public_key_to: params.recipient_public_key.clone(),
            balance_old_me_encrypted_1: old_me.c1().clone(),
            balance_old_me_encrypted_2: old_me.c2().clone(),
            balance_old_to_encrypted_1: old_to.c1().clone(),
            balance_old_to_encrypted_2: old_to.c2().clone(),
            balance_new_me_encrypted_1: balance_new_me.c1().clone(),
            balance_new_me_encrypted_2: balance_new_me.c2().clone(),
            balance_new_to_encrypted_1: balance_new_to.c1().clone(),
            balance_new_to_encrypted_2: balance_new_to.c2().clone(),
        })
    }

    pub fn new_sender_balance(&self) -> Ciphertext {
        Ciphertext::new(
            self.balance_new_me_encrypted_1.clone(),
            self.balance_new_me_encrypted_2.clone(),
        )
    }

    pub fn new_recipient_balance(&self) -> Ciphertext {
        Ciphertext::new(
            self.balance_new_to_encrypted_1.clone(),
            self.balance_new_to_encrypted_2.clone(),
        )
    }
}
