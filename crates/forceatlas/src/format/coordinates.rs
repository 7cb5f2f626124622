//! Engine coordinate output reader.
//!
//! The engine writes one tab-separated row per node after a header row:
//!
//! ```text
//! id	x	y
//! 0	-12.25	3.5
//! 1	7.0	-0.75
//! ```
//!
//! The first column is the node's layout index. The reader insists on exactly
//! one row per index in `0..node_count`.

use std::{fs, path::Path};

use forceatlas_core::position::{Dimension, Position};

use crate::error::ResultIntegrityError;

/// Reads and validates the coordinate file at `path`.
///
/// Returns positions ordered by layout index.
///
/// # Errors
///
/// Returns [`ResultIntegrityError`] if the file cannot be read, has the wrong
/// shape, or does not cover every index exactly once.
pub fn read_coordinates(
    path: &Path,
    dim: Dimension,
    node_count: usize,
) -> Result<Vec<Position>, ResultIntegrityError> {
    let content = fs::read_to_string(path).map_err(|source| ResultIntegrityError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_coordinates(&content, dim, node_count).map_err(|err| match err {
        ParseFailure::MissingHeader => ResultIntegrityError::MissingHeader {
            path: path.to_path_buf(),
        },
        ParseFailure::Integrity(err) => err,
    })
}

#[derive(Debug)]
enum ParseFailure {
    MissingHeader,
    Integrity(ResultIntegrityError),
}

impl From<ResultIntegrityError> for ParseFailure {
    fn from(err: ResultIntegrityError) -> Self {
        Self::Integrity(err)
    }
}

fn parse_coordinates(
    content: &str,
    dim: Dimension,
    node_count: usize,
) -> Result<Vec<Position>, ParseFailure> {
    let expected_columns = dim.count() + 1;

    let mut lines = content
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(ParseFailure::MissingHeader)?;
    check_columns(header_line, header.split('\t').count(), expected_columns)?;

    let mut positions: Vec<Option<Position>> = vec![None; node_count];
    let mut rows = 0;
    let mut coords = Vec::with_capacity(dim.count());

    for (line, text) in lines {
        let fields: Vec<&str> = text.split('\t').map(str::trim).collect();
        check_columns(line, fields.len(), expected_columns)?;

        let index: usize = parse_field(line, fields[0])?;
        coords.clear();
        for field in &fields[1..] {
            coords.push(parse_field::<f64>(line, field)?);
        }

        let slot = positions
            .get_mut(index)
            .ok_or(ResultIntegrityError::UnknownIndex { line, index })?;
        if slot.is_some() {
            return Err(ResultIntegrityError::DuplicateIndex { line, index }.into());
        }
        *slot = Position::from_slice(&coords);
        rows += 1;
    }

    if rows != node_count {
        return Err(ResultIntegrityError::RowCount {
            expected: node_count,
            found: rows,
        }
        .into());
    }

    // Every slot is filled: indices are in range, unique, and as many as slots.
    Ok(positions.into_iter().flatten().collect())
}

fn check_columns(line: usize, found: usize, expected: usize) -> Result<(), ResultIntegrityError> {
    if found == expected {
        Ok(())
    } else {
        Err(ResultIntegrityError::ColumnCount {
            line,
            expected,
            found,
        })
    }
}

fn parse_field<T: std::str::FromStr>(line: usize, value: &str) -> Result<T, ResultIntegrityError> {
    value.parse().map_err(|_| ResultIntegrityError::Malformed {
        line,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use tempfile::tempdir;

    use super::*;

    fn parse(content: &str, dim: Dimension, node_count: usize) -> Result<Vec<Position>, ResultIntegrityError> {
        parse_coordinates(content, dim, node_count).map_err(|err| match err {
            ParseFailure::Integrity(err) => err,
            ParseFailure::MissingHeader => panic!("unexpected missing header"),
        })
    }

    #[test]
    fn test_rows_are_ordered_by_index() {
        let content = "id\tx\ty\n2\t5.0\t6.0\n0\t1.0\t2.0\n1\t3.0\t4.0\n";

        let positions = parse(content, Dimension::Two, 3).unwrap();

        assert_eq!(positions.len(), 3);
        assert!(approx_eq!(f64, positions[0].x(), 1.0));
        assert!(approx_eq!(f64, positions[1].y(), 4.0));
        assert!(approx_eq!(f64, positions[2].x(), 5.0));
    }

    #[test]
    fn test_spatial_rows() {
        let content = "id\tx\ty\tz\r\n0\t1\t2\t3\r\n\n";

        let positions = parse(content, Dimension::Three, 1).unwrap();

        assert_eq!(positions[0], Position::new_3d(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_row() {
        let content = "id\tx\ty\n0\t1\t2\n";

        let err = parse(content, Dimension::Two, 2).unwrap_err();

        assert!(matches!(
            err,
            ResultIntegrityError::RowCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_extra_row_is_unknown_index() {
        let content = "id\tx\ty\n0\t1\t2\n1\t1\t2\n";

        let err = parse(content, Dimension::Two, 1).unwrap_err();

        assert!(matches!(
            err,
            ResultIntegrityError::UnknownIndex { line: 3, index: 1 }
        ));
    }

    #[test]
    fn test_duplicate_index() {
        let content = "id\tx\ty\n0\t1\t2\n0\t3\t4\n";

        let err = parse(content, Dimension::Two, 2).unwrap_err();

        assert!(matches!(
            err,
            ResultIntegrityError::DuplicateIndex { line: 3, index: 0 }
        ));
    }

    #[test]
    fn test_wrong_dimension() {
        let content = "id\tx\ty\n0\t1\t2\n";

        let err = parse(content, Dimension::Three, 1).unwrap_err();

        assert!(matches!(
            err,
            ResultIntegrityError::ColumnCount {
                line: 1,
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_malformed_number() {
        let content = "id\tx\ty\n0\tNaN?\t2\n";

        let err = parse(content, Dimension::Two, 1).unwrap_err();

        assert!(matches!(err, ResultIntegrityError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();

        let err = read_coordinates(&dir.path().join("absent.txt"), Dimension::Two, 1).unwrap_err();

        assert!(matches!(err, ResultIntegrityError::Read { .. }));
    }

    #[test]
    fn test_read_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "\n\n").unwrap();

        let err = read_coordinates(&path, Dimension::Two, 0).unwrap_err();

        assert!(matches!(err, ResultIntegrityError::MissingHeader { .. }));
    }

    #[test]
    fn test_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.txt");
        fs::write(&path, "id\tx\ty\n0\t-1.5\t2.25\n").unwrap();

        let positions = read_coordinates(&path, Dimension::Two, 1).unwrap();

        assert_eq!(positions, vec![Position::new_2d(-1.5, 2.25)]);
    }
}
