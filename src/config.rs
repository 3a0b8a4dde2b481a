use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Deployment configuration - immutable struct passed into the entry point
///
/// Replaces ad-hoc global lists with an explicit structure the caller
/// builds, either from a JSON file or from command line arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Directories contributing files by extension filter, recursively
    pub libraries: Vec<PathBuf>,
    /// Single files copied verbatim into the destination
    pub files: Vec<PathBuf>,
    /// Staging directory, cleared before population
    pub destination: PathBuf,
    /// Extensions eligible for copying from library directories
    pub extensions: Vec<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            libraries: Vec::new(),
            files: Vec::new(),
            destination: PathBuf::from("./out"),
            extensions: vec![".c".to_string(), ".h".to_string()],
        }
    }
}

impl DeployConfig {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// All input paths that must exist before the destination is touched
    pub fn input_paths(&self) -> impl Iterator<Item = &Path> {
        self.libraries
            .iter()
            .chain(self.files.iter())
            .map(PathBuf::as_path)
    }
}
