//! Domain constants and environment-driven defaults
//!
//! The plaintext bounds mirror the companion circuit's amount width. Runtime
//! knobs here only concern the command-line tool; nothing in the curve or
//! ElGamal layers reads the environment.

use std::path::PathBuf;

use crate::curve::params::{
    A, BASE_POINT_X_DECIMAL, BASE_POINT_Y_DECIMAL, D, FIELD_MODULUS_DECIMAL,
    SUBGROUP_ORDER_DECIMAL,
};

// =============================================================================
// Plaintext Domain
// =============================================================================

/// Bit width of an encryptable amount (the circuit's `u40`).
pub const PLAINTEXT_BITS: u32 = 40;

/// Largest encryptable amount, `2^40 - 1`.
pub const MAX_PLAINTEXT: u64 = (1u64 << PLAINTEXT_BITS) - 1;

// =============================================================================
// Command-line Tool
// =============================================================================

/// Job file for the CLI when no path argument is given
///
/// Environment variable: `ELGAMAL_JOB`
pub fn job_path() -> Option<PathBuf> {
    std::env::var("ELGAMAL_JOB")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Print the pinned curve parameters (for startup logs)
pub fn log_configuration() {
    tracing::info!("=== BabyJubJub Parameters ===");
    tracing::info!("  - Field modulus p: {}", FIELD_MODULUS_DECIMAL);
    tracing::info!("  - a: {}, d: {}", A, D);
    tracing::info!("  - Base point x: {}", BASE_POINT_X_DECIMAL);
    tracing::info!("  - Base point y: {}", BASE_POINT_Y_DECIMAL);
    tracing::info!("  - Subgroup order l: {}", SUBGROUP_ORDER_DECIMAL);
    tracing::info!("  - Plaintext width: {} bits (max {})", PLAINTEXT_BITS, MAX_PLAINTEXT);
    tracing::info!("=============================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_max_plaintext_value() {
        assert_eq!(MAX_PLAINTEXT, 1_099_511_627_775);
    }

    #[test]
    #[serial(env)]
    fn test_job_path_from_env() {
        std::env::set_var("ELGAMAL_JOB", "jobs/mint.yaml");
        assert_eq!(job_path(), Some(PathBuf::from("jobs/mint.yaml")));

        std::env::set_var("ELGAMAL_JOB", "  ");
        assert_eq!(job_path(), None);

        std::env::remove_var("ELGAMAL_JOB");
        assert_eq!(job_path(), None);
    }
}
