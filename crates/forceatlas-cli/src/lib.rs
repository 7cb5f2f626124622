//! CLI logic for the ForceAtlas layout tool.
//!
//! Reads an edge list, lays it out through the external engine, and writes
//! one coordinate row per node.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod input;
mod lexer;
mod table;

pub use args::Args;
pub use error::CliError;
pub use input::InputError;

use std::fs;

use log::info;

use forceatlas::LayoutDriver;

/// Run the ForceAtlas CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed edge lists or position tables
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let layout = args.apply_overrides(app_config.layout().clone())?;

    let source = fs::read_to_string(&args.input)?;
    let graph = input::parse_edge_list(&source, layout.directed())
        .map_err(|errors| CliError::new_input_error(errors, source.as_str(), args.input.as_str()))?;

    let initial = match &args.positions {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            let positions = table::parse_positions(&source, layout.dim())
                .map_err(|errors| CliError::new_input_error(errors, source.as_str(), path.as_str()))?;
            info!(positions = positions.len(); "Initial positions loaded");
            Some(positions)
        }
        None => None,
    };

    let driver = LayoutDriver::new(app_config.engine().clone());
    let positions = driver.compute_layout(&graph, initial.as_ref(), &layout)?;

    fs::write(&args.output, table::format_positions(&positions, layout.dim()))?;

    info!(output_file = args.output; "Layout written");

    Ok(())
}
