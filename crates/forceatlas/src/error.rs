//! Error types for layout runs.
//!
//! This module provides the main error type [`LayoutError`], whose variants
//! identify the pipeline stage that failed:
//!
//! - [`SerializationError`] - writing the engine's input files
//! - [`EngineInvocationError`] - starting or running the engine process
//! - [`ResultIntegrityError`] - reading the engine's coordinate output
//!
//! Temporary file removal never fails a run; see
//! [`CleanupWarning`](crate::temp::CleanupWarning).

use std::{io, path::PathBuf};

use thiserror::Error;

use forceatlas_core::position::Dimension;

/// The main error type for layout runs.
///
/// Every variant is returned only after temporary files have been removed.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("Engine invocation error: {0}")]
    EngineInvocation(#[from] EngineInvocationError),

    #[error("Result integrity error: {0}")]
    ResultIntegrity(#[from] ResultIntegrityError),
}

/// Failure to produce the engine's input files.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("cannot create temporary file in {}: {source}", .dir.display())]
    TempFile { dir: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("edge endpoint is missing from the node index")]
    UnmappedEndpoint,

    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    NonFiniteWeight { from: String, to: String, weight: f64 },

    #[error("initial position given for `{label}`, which is not a node of the graph")]
    UnknownLabel { label: String },

    #[error("initial position for `{label}` is {found}, layout is {expected}")]
    DimensionMismatch {
        label: String,
        expected: Dimension,
        found: Dimension,
    },
}

/// Failure to run the engine to successful completion.
#[derive(Debug, Error)]
pub enum EngineInvocationError {
    #[error("cannot launch {}: {source}", .program.display())]
    Launch { program: PathBuf, source: io::Error },

    #[error("classpath entry {} does not exist", .entry.display())]
    MissingClasspath { entry: PathBuf },

    #[error("engine {}", describe_exit(.code))]
    ExitStatus { code: Option<i32> },
}

/// Engine output that is missing, malformed, or inconsistent with the graph.
#[derive(Debug, Error)]
pub enum ResultIntegrityError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse `{value}`")]
    Malformed { line: usize, value: String },

    #[error("line {line}: node index {index} is not part of the graph")]
    UnknownIndex { line: usize, index: usize },

    #[error("line {line}: node index {index} appears more than once")]
    DuplicateIndex { line: usize, index: usize },

    #[error("expected {expected} coordinate rows, found {found}")]
    RowCount { expected: usize, found: usize },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}
