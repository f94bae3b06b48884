//! Command-line entry point
//!
//! 1. Loads a YAML job from the path in argv[1] or `ELGAMAL_JOB`
//! 2. Initializes the curve context
//! 3. Runs the job and prints the result as JSON on stdout

use std::path::PathBuf;

use anyhow::Context;
use babyjub_elgamal::config::{self, constants};
use babyjub_elgamal::elgamal::BabyJubJub;
use babyjub_elgamal::jobs::run_job;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    config::logging::init_logging();
    constants::log_configuration();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(constants::job_path)
        .context("usage: babyjub-elgamal <job.yaml> (or set ELGAMAL_JOB)")?;

    info!(path = %path.display(), "Loading job");
    let job = match config::load_job(&path) {
        Ok(job) => job,
        Err(e) => {
            error!(error = %e, "Job configuration failed");
            return Err(e.into());
        }
    };

    let ctx = BabyJubJub::global().context("curve context initialization failed")?;
    let output = run_job(ctx, &job).with_context(|| format!("{} job failed", job.name()))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
