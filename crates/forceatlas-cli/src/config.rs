//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use forceatlas::config::AppConfig;

use crate::error::CliError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Locates, reads and validates the configuration for one run.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (forceatlas/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read or parsed
/// - A section holds values the engine cannot run with
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    let Some(path) = config_path(explicit_path) else {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    let content = fs::read_to_string(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CliError::from(ConfigError::MissingFile(path.clone())),
        _ => CliError::from(err),
    })?;
    let config = parse_config(&content)?;
    info!(
        path = path.display().to_string(),
        java = config.engine().java().display().to_string(),
        dim:% = config.layout().dim();
        "Configuration loaded"
    );
    Ok(config)
}

fn config_path(explicit_path: Option<impl AsRef<Path>>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.as_ref().to_path_buf());
    }

    let local_config = Path::new("forceatlas/config.toml");
    if local_config.exists() {
        return Some(local_config.to_path_buf());
    }

    let Some(proj_dirs) = ProjectDirs::from("com", "forceatlas", "forceatlas") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let system_config = proj_dirs.config_dir().join("config.toml");
    if system_config.exists() {
        Some(system_config)
    } else {
        debug!(path = system_config.display().to_string(); "System configuration file not found");
        None
    }
}

/// Parses the `[engine]` and `[layout]` sections and checks their values.
fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let engine = config.engine();
    if engine.main_class().is_empty() {
        return Err(ConfigError::Validation("[engine] main_class must not be empty".to_string()));
    }
    if engine.max_heap().is_empty() {
        return Err(ConfigError::Validation("[engine] max_heap must not be empty".to_string()));
    }

    let layout = config.layout();
    if layout.iterations() == 0 {
        return Err(ConfigError::Validation("[layout] iterations must be at least 1".to_string()));
    }
    if layout.n_jobs() == 0 {
        return Err(ConfigError::Validation("[layout] n_jobs must be at least 1".to_string()));
    }
    if let Some(threshold) = layout.threshold().filter(|t| !(t.is_finite() && *t > 0.0)) {
        return Err(ConfigError::Validation(format!(
            "[layout] threshold must be a positive number, got {threshold}"
        )));
    }

    Ok(config)
}
