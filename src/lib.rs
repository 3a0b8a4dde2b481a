pub mod config;
pub mod error;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::DeployConfig;
pub use error::DeployError;
pub use services::{run_deploy, validate_inputs, CopiedFile, DeployReport};
pub use utils::{clear_directory, matches_extensions, SourceWalker};
