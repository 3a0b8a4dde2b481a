use std::path::Path;
use tracing::{debug, info};

use crate::config::DeployConfig;
use crate::error::DeployError;

/// Check that every configured input path exists on the filesystem
///
/// Pure guard run before any mutation of the destination. The first
/// missing path aborts the run; the caller decides the exit code.
pub fn validate_inputs(config: &DeployConfig) -> Result<(), DeployError> {
    info!(
        "Validating {} library directories and {} individual files",
        config.libraries.len(),
        config.files.len()
    );

    for path in config.input_paths() {
        check_exists(path)?;
    }

    Ok(())
}

fn check_exists(path: &Path) -> Result<(), DeployError> {
    if path.exists() {
        debug!("Input path exists: {:?}", path);
        Ok(())
    } else {
        Err(DeployError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}
