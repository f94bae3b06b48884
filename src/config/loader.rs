//! Job loader for YAML files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ElGamalError, Result};

use super::types::JobConfig;

/// Load and validate a job from a YAML file
///
/// This function:
/// 1. Checks if the file exists
/// 2. Parses the YAML content
/// 3. Validates the job rules
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use babyjub_elgamal::config::load_job;
///
/// let job = load_job(Path::new("jobs/mint.yaml"))?;
/// ```
pub fn load_job(path: &Path) -> Result<JobConfig> {
    if !path.exists() {
        return Err(ElGamalError::Config(format!(
            "Job file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let job: JobConfig = serde_yaml::from_reader(reader).map_err(|e| {
        ElGamalError::Config(format!("YAML parse error in '{}': {}", path.display(), e))
    })?;

    job.validate()?;

    tracing::debug!(job = job.name(), path = %path.display(), "Loaded job");
    Ok(job)
}

/// Load a job from a YAML string (useful for testing)
pub fn load_job_from_str(yaml_content: &str) -> Result<JobConfig> {
    let job: JobConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| ElGamalError::Config(format!("YAML parse error: {}", e)))?;

    job.validate()?;

    Ok(job)
}

// ============================================================================
// Tests
// ============================================================================
