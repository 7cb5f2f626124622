//! Initial position writer.
//!
//! Tab-separated, with a leading unnamed row-number column:
//!
//! ```text
//! 	id	x	y
//! 0	2	0.5	-1
//! 1	0	3	4
//! ```

use std::{
    fmt::Debug,
    hash::Hash,
    io::{self, Write},
};

use forceatlas_core::{
    mapping::IndexMapping,
    position::{Dimension, Position, PositionMap},
};

use crate::error::SerializationError;

/// Translates label-keyed positions into `(index, position)` rows.
///
/// # Errors
///
/// Fails on the first label that is not a node of the mapping, and on any
/// position whose dimension differs from `dim`.
pub fn index_positions<N>(
    mapping: &IndexMapping<N>,
    positions: &PositionMap<N>,
    dim: Dimension,
) -> Result<Vec<(usize, Position)>, SerializationError>
where
    N: Clone + Eq + Hash + Debug,
{
    positions
        .iter()
        .map(|(label, position)| {
            let index = mapping
                .index_of(label)
                .ok_or_else(|| SerializationError::UnknownLabel {
                    label: format!("{label:?}"),
                })?;

            if position.dimension() != dim {
                return Err(SerializationError::DimensionMismatch {
                    label: format!("{label:?}"),
                    expected: dim,
                    found: position.dimension(),
                });
            }

            Ok((index, *position))
        })
        .collect()
}

/// Writes `(index, position)` rows to `writer`.
///
/// Every position must already have been checked against `dim`.
pub fn write_positions<W: Write>(
    writer: &mut W,
    dim: Dimension,
    rows: &[(usize, Position)],
) -> io::Result<()> {
    write!(writer, "\tid")?;
    for axis in dim.axes() {
        write!(writer, "\t{axis}")?;
    }
    writeln!(writer)?;

    for (row, (index, position)) in rows.iter().enumerate() {
        write!(writer, "{row}\t{index}")?;
        for coord in position.coords() {
            write!(writer, "\t{coord}")?;
        }
        writeln!(writer)?;
    }

    writer.flush()
}
