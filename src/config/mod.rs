//! Configuration module for the command-line tool
//!
//! This module provides:
//! - Job types loaded from YAML (`JobConfig` and its payloads)
//! - YAML loading functionality (`load_job`)
//! - Structured logging setup
//! - Domain constants and environment variable overrides

pub mod constants;
mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{AddJob, DecryptJob, EncryptJob, JobConfig, KeygenJob, MintJob, TransferJob};

// Re-export loader functions
pub use loader::{load_job, load_job_from_str};
