//! Command-line argument definitions for the ForceAtlas CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity, and a few per-run layout overrides.

use clap::Parser;

use forceatlas::{config::LayoutConfig, position::Dimension};

use crate::config::ConfigError;

/// Command-line arguments for the ForceAtlas layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input edge list
    #[arg(help = "Path to the input edge list")]
    pub input: String,

    /// Path to the output coordinate table
    #[arg(short, long, default_value = "layout.tsv")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Coordinate table with starting positions for some or all nodes
    #[arg(short, long)]
    pub positions: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Number of steps, or the step cap when a threshold is given
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Stop once the mean per-node change falls below this value
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Layout dimension (2 or 3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=3))]
    pub dim: Option<u8>,

    /// Seed for the engine's initial random placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Treat the input edges as directed
    #[arg(long)]
    pub directed: bool,
}

impl Args {
    /// Applies command-line overrides on top of a configured [`LayoutConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a dimension other than 2 or 3.
    pub fn apply_overrides(&self, mut layout: LayoutConfig) -> Result<LayoutConfig, ConfigError> {
        if let Some(iterations) = self.iterations {
            layout = layout.with_iterations(iterations);
        }
        if let Some(threshold) = self.threshold {
            layout = layout.with_threshold(threshold);
        }
        if let Some(dim) = self.dim {
            layout = layout.with_dim(Dimension::try_from(dim).map_err(ConfigError::Validation)?);
        }
        if let Some(seed) = self.seed {
            layout = layout.with_seed(seed);
        }
        if self.directed {
            layout = layout.with_directed(true);
        }
        Ok(layout)
    }
}
