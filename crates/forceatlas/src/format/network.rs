//! Pajek network writer.
//!
//! The engine reads graphs in Pajek format. Vertices are numbered from 1 and
//! labelled with their 0-based layout index; the label is what the engine
//! echoes back in its coordinate output.
//!
//! ```text
//! *vertices 3
//! 1 0 0.0 0.0 ellipse
//! 2 1 0.0 0.0 ellipse
//! 3 2 0.0 0.0 ellipse
//! *edges
//! 1 2 1
//! 2 3 1
//! ```

use std::{
    fmt::Debug,
    io::{self, Write},
};

use forceatlas_core::mapping::{IndexMapping, IndexedEdge};

use crate::error::SerializationError;

/// Rejects the first edge whose weight is NaN or infinite.
///
/// The engine cannot read such weights back, so they are caught before any
/// file is written.
pub fn check_weights<N: Debug>(
    mapping: &IndexMapping<N>,
    edges: &[IndexedEdge],
) -> Result<(), SerializationError> {
    let describe = |index: usize| match mapping.label_of(index) {
        Some(label) => format!("{label:?}"),
        None => index.to_string(),
    };

    match edges.iter().find(|edge| !edge.weight.is_finite()) {
        Some(edge) => Err(SerializationError::NonFiniteWeight {
            from: describe(edge.source),
            to: describe(edge.target),
            weight: edge.weight,
        }),
        None => Ok(()),
    }
}

/// Writes a graph of `node_count` nodes to `writer`.
///
/// Edges are emitted under `*arcs` when `directed` is set and under `*edges`
/// otherwise.
pub fn write_network<W: Write>(
    writer: &mut W,
    node_count: usize,
    edges: &[IndexedEdge],
    directed: bool,
) -> io::Result<()> {
    writeln!(writer, "*vertices {node_count}")?;
    for index in 0..node_count {
        writeln!(writer, "{} {index} 0.0 0.0 ellipse", index + 1)?;
    }

    writeln!(writer, "{}", if directed { "*arcs" } else { "*edges" })?;
    for edge in edges {
        writeln!(
            writer,
            "{} {} {}",
            edge.source + 1,
            edge.target + 1,
            edge.weight
        )?;
    }

    writer.flush()
}
