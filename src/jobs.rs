//! Job execution for the command-line tool
//!
//! Each job maps onto one library operation and produces a JSON document.
//! Randomness left out of a job file is drawn from the CSPRNG and echoed in
//! the output, since a prover needs it as a witness.

use serde_json::{json, Value};

use crate::circuit_inputs::{MintInput, TransferInput, TransferParams};
use crate::config::logging::sanitize;
use crate::config::{
    AddJob, DecryptJob, EncryptJob, JobConfig, KeygenJob, MintJob, TransferJob,
};
use crate::curve::Scalar;
use crate::elgamal::{BabyJubJub, KeyPair, Plaintext};
use crate::error::Result;

/// Run a validated job against an initialized context.
#[tracing::instrument(level = "info", skip_all, fields(job = job.name()))]
pub fn run_job(ctx: &BabyJubJub, job: &JobConfig) -> Result<Value> {
    let output = match job {
        JobConfig::Keygen(j) => keygen(ctx, j)?,
        JobConfig::Mint(j) => mint(ctx, j)?,
        JobConfig::Transfer(j) => transfer(ctx, j)?,
        JobConfig::Encrypt(j) => encrypt(ctx, j)?,
        JobConfig::Decrypt(j) => decrypt(ctx, j)?,
        JobConfig::Add(j) => add(ctx, j)?,
    };
    tracing::info!("Job completed");
    Ok(output)
}

fn randomness_or_fresh(supplied: &Option<Scalar>) -> Scalar {
    match supplied {
        Some(r) => r.clone(),
        None => {
            let r = Scalar::random();
            tracing::debug!(randomness = %sanitize(&r.to_string()), "Drew fresh randomness");
            r
        }
    }
}

fn keygen(ctx: &BabyJubJub, job: &KeygenJob) -> Result<Value> {
    let pair = match &job.private_key {
        Some(sk) => KeyPair {
            public_key: ctx.private_to_public_key(sk),
            private_key: sk.clone(),
        },
        None => ctx.generate_private_and_public_key(),
    };
    Ok(serde_json::to_value(&pair)?)
}

fn mint(ctx: &BabyJubJub, job: &MintJob) -> Result<Value> {
    let randomness = randomness_or_fresh(&job.randomness);
    let input = MintInput::build(ctx, &job.private_key, Plaintext::new(job.value)?, &randomness)?;
    Ok(serde_json::to_value(&input)?)
}

fn transfer(ctx: &BabyJubJub, job: &TransferJob) -> Result<Value> {
    let params = TransferParams {
        sender_private_key: job.private_key.clone(),
        recipient_public_key: job.public_key_to.clone(),
        value: Plaintext::new(job.value)?,
        sender_balance: Plaintext::new(job.balance_old_me_clear)?,
        sender_balance_encrypted: job.balance_old_me_encrypted.clone(),
        recipient_balance_encrypted: job.balance_old_to_encrypted.clone(),
        randomness1: randomness_or_fresh(&job.randomness1),
        randomness2: randomness_or_fresh(&job.randomness2),
    };
    let input = TransferInput::build(ctx, &params)?;
    Ok(serde_json::to_value(&input)?)
}

fn encrypt(ctx: &BabyJubJub, job: &EncryptJob) -> Result<Value> {
    let randomness = randomness_or_fresh(&job.randomness);
    let ciphertext = ctx.encrypt(&job.public_key, job.value, &randomness)?;
    Ok(json!({
        "ciphertext": ciphertext,
        "randomness": randomness,
    }))
}

fn decrypt(ctx: &BabyJubJub, job: &DecryptJob) -> Result<Value> {
    let embedded = ctx.decrypt_embedded(&job.private_key, &job.ciphertext);
    let mut output = json!({ "embedded_point": embedded });
    if let Some(expected) = job.expected {
        let matches = embedded == ctx.encode(expected)?;
        if !matches {
            tracing::warn!(expected, "Ciphertext does not decrypt to the expected amount");
        }
        output["expected"] = json!(expected);
        output["matches"] = json!(matches);
    }
    Ok(output)
}

fn add(ctx: &BabyJubJub, job: &AddJob) -> Result<Value> {
    let sum = ctx.sum_ciphertexts(&job.ciphertexts);
    Ok(json!({ "ciphertext": sum }))
}
