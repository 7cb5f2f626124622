use std::io;

use thiserror::Error;

use forceatlas::LayoutError;

use crate::{config::ConfigError, input::InputError};

/// Errors produced by a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{path}: {} invalid line(s)", .errors.len())]
    Input {
        errors: Vec<InputError>,
        src: String,
        path: String,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl CliError {
    pub(crate) fn new_input_error(errors: Vec<InputError>, src: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Input {
            errors,
            src: src.into(),
            path: path.into(),
        }
    }
}
