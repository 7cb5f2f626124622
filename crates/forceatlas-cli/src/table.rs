//! Coordinate tables.
//!
//! Layouts are written as tab-separated `label x y [z]` rows under a header
//! row. The same format is accepted as a set of starting positions, so one
//! run's output can seed the next.

use forceatlas::position::{Dimension, Position, PositionMap};

use crate::{
    input::{InputError, parse_number},
    lexer::{Token, tokenize_lines},
};

const LABEL_COLUMN: &str = "label";

/// Renders positions as a coordinate table.
pub fn format_positions(positions: &PositionMap<String>, dim: Dimension) -> String {
    let mut out = String::from(LABEL_COLUMN);
    for axis in dim.axes() {
        out.push('\t');
        out.push_str(axis);
    }
    out.push('\n');

    for (label, position) in positions {
        out.push_str(label);
        for coord in position.coords() {
            out.push('\t');
            out.push_str(&coord.to_string());
        }
        out.push('\n');
    }

    out
}

/// Parses a coordinate table of the given dimension.
///
/// The header row is optional and only recognised as `label` followed by
/// the axis names of `dim`. Comments and blank lines follow the edge-list
/// rules.
///
/// # Errors
///
/// Returns every malformed or duplicated row.
pub fn parse_positions(source: &str, dim: Dimension) -> Result<PositionMap<String>, Vec<InputError>> {
    let expected = 1 + dim.count();
    let mut positions = PositionMap::new();
    let mut errors = Vec::new();

    let lines = tokenize_lines(source).map_err(|err| vec![err])?;

    for (row, line) in lines.into_iter().enumerate() {
        if row == 0 && is_header(&line, dim) {
            continue;
        }

        if line.len() != expected {
            let span = line[0].offset..line[line.len() - 1].span().end;
            errors.push(
                InputError::new(
                    format!("expected {expected} fields, found {}", line.len()),
                    span,
                    "in this row",
                )
                .with_help(format!("{dim} rows are written as `label {}`", dim.axes().join(" "))),
            );
            continue;
        }

        let coords: Result<Vec<f64>, InputError> = line[1..]
            .iter()
            .map(|token| parse_number(token, "coordinate"))
            .collect();
        let coords = match coords {
            Ok(coords) => coords,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        let label = line[0];
        let Some(position) = Position::from_slice(&coords) else {
            continue;
        };
        if positions.insert(label.text.to_string(), position).is_some() {
            errors.push(InputError::new(
                format!("duplicate position for `{}`", label.text),
                label.span(),
                "already listed",
            ));
        }
    }

    if errors.is_empty() {
        Ok(positions)
    } else {
        Err(errors)
    }
}

fn is_header(line: &[Token<'_>], dim: Dimension) -> bool {
    match line.split_first() {
        Some((first, axes)) => {
            first.text == LABEL_COLUMN
                && axes.iter().map(|token| token.text).eq(dim.axes().iter().copied())
        }
        None => false,
    }
}
