use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::DeployConfig;
use crate::services::validation::validate_inputs;
use crate::utils::{
    clear_directory, copy_flat, ensure_directory, matches_extensions, CopyOutcome, SourceWalker,
};

/// Run the full deployment pipeline
///
/// Validates every configured input, clears and recreates the
/// destination, then copies library files followed by individual files.
/// Nothing is mutated if validation fails.
pub fn run_deploy(config: &DeployConfig) -> Result<DeployReport> {
    info!("Starting deployment to {:?}", config.destination);

    validate_inputs(config)?;

    clear_directory(&config.destination)?;
    ensure_directory(&config.destination)?;

    let mut report = DeployReport::empty();

    for library in &config.libraries {
        copy_library(library, config, &mut report)?;
    }

    for file in &config.files {
        copy_individual(file, &config.destination, &mut report)?;
    }

    info!(
        "Deployment completed. Library files: {}, individual files: {}, overwritten: {}",
        report.library_files, report.individual_files, report.overwritten
    );

    Ok(report)
}

/// Copy every allow-listed file under one library directory, flattened
fn copy_library(library: &Path, config: &DeployConfig, report: &mut DeployReport) -> Result<()> {
    if !library.is_dir() {
        // Validation already passed, so the directory vanished mid-run
        warn!("Library directory disappeared, skipping: {:?}", library);
        return Ok(());
    }

    let mut copied = 0;
    for entry in SourceWalker::new(library) {
        let path = entry?;
        if !matches_extensions(&path, &config.extensions) {
            debug!("Skipping file outside allow-list: {:?}", path);
            continue;
        }
        let outcome = copy_flat(&path, &config.destination)?;
        report.record_library_file(outcome);
        copied += 1;
    }

    info!("Copied {} files from library: {:?}", copied, library);
    Ok(())
}

/// Copy one individually listed file under its base filename
fn copy_individual(file: &Path, destination: &Path, report: &mut DeployReport) -> Result<()> {
    if !file.is_file() {
        warn!("Individual file disappeared, skipping: {:?}", file);
        return Ok(());
    }

    let outcome = copy_flat(file, destination)?;
    debug!("Copied individual file to {:?}", outcome.destination);
    report.record_individual_file(outcome);
    Ok(())
}

/// Report structure for a completed deployment
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub library_files: usize,
    pub individual_files: usize,
    pub overwritten: usize,
    pub copied_files: Vec<CopiedFile>,
}

#[derive(Debug, Clone)]
pub struct CopiedFile {
    pub source: String,
    pub destination: String,
}

impl DeployReport {
    pub fn empty() -> Self {
        Self {
            library_files: 0,
            individual_files: 0,
            overwritten: 0,
            copied_files: Vec::new(),
        }
    }

    pub fn total_copied(&self) -> usize {
        self.library_files + self.individual_files
    }

    fn record_library_file(&mut self, outcome: CopyOutcome) {
        self.library_files += 1;
        self.record(outcome);
    }

    fn record_individual_file(&mut self, outcome: CopyOutcome) {
        self.individual_files += 1;
        self.record(outcome);
    }

    fn record(&mut self, outcome: CopyOutcome) {
        if outcome.overwrote {
            self.overwritten += 1;
        }
        self.copied_files.push(CopiedFile {
            source: outcome.source.to_string_lossy().to_string(),
            destination: outcome.destination.to_string_lossy().to_string(),
        });
    }
}
