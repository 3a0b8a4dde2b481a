use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use source_deploy::{run_deploy, DeployConfig, DeployReport};

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("source-deploy")
        .version("1.0")
        .about("Aggregates build sources into a flat staging directory")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON deployment configuration file"),
        )
        .arg(
            Arg::new("library")
                .long("library")
                .value_name("DIR")
                .action(ArgAction::Append)
                .help("Library directory contributing files by extension, recursively"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("Individual file copied verbatim into the destination"),
        )
        .arg(
            Arg::new("destination")
                .long("destination")
                .value_name("DIR")
                .help("Staging directory, cleared before population (default ./out)"),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .value_name("EXT")
                .action(ArgAction::Append)
                .help("Extension allowed from library directories (default .c and .h)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .get_matches();

    // Initialize logging
    let log_level = matches.get_one::<String>("log-level").unwrap();
    initialize_logging(log_level)?;

    // Build configuration from config file and command line arguments
    let config = create_deploy_config(&matches)?;

    // Run the deployment
    let report = run_deploy(&config)?;
    print_deploy_report(&report);

    Ok(())
}

/// Build the deployment configuration from CLI arguments
///
/// Starts from the JSON config file when given, otherwise from defaults;
/// any sources, destination, or extensions passed on the command line
/// replace the corresponding fields.
fn create_deploy_config(matches: &clap::ArgMatches) -> Result<DeployConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => DeployConfig::from_file(path)?,
        None => DeployConfig::default(),
    };

    if let Some(libraries) = matches.get_many::<String>("library") {
        config.libraries = libraries.map(PathBuf::from).collect();
    }

    if let Some(files) = matches.get_many::<String>("file") {
        config.files = files.map(PathBuf::from).collect();
    }

    if let Some(destination) = matches.get_one::<String>("destination") {
        config.destination = PathBuf::from(destination);
    }

    if let Some(extensions) = matches.get_many::<String>("extension") {
        config.extensions = extensions.cloned().collect();
    }

    Ok(config)
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Print the deployment report
fn print_deploy_report(report: &DeployReport) {
    info!("=== DEPLOY REPORT ===");
    info!("Total files copied: {}", report.total_copied());
    info!("Library files: {}", report.library_files);
    info!("Individual files: {}", report.individual_files);
    info!("Collisions overwritten: {}", report.overwritten);
}
