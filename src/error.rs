use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a deployment run
///
/// Both variants are raised before the offending operation mutates
/// anything, so the caller can map them to an exit code and report the
/// path involved.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A configured library directory or individual file does not exist
    #[error("configured input path does not exist: {}", path.display())]
    MissingInput { path: PathBuf },

    /// The destination path is occupied by something other than a directory
    #[error("destination path exists but is not a directory: {}", path.display())]
    DestinationNotADirectory { path: PathBuf },
}
