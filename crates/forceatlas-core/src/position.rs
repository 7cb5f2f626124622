//! Coordinates produced by (or fed into) a layout run.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Number of spatial dimensions of a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum Dimension {
    #[default]
    Two,
    Three,
}

impl Dimension {
    /// Number of coordinates per node.
    pub fn count(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Column names used by the coordinate files, in order.
    pub fn axes(self) -> &'static [&'static str] {
        match self {
            Dimension::Two => &["x", "y"],
            Dimension::Three => &["x", "y", "z"],
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(format!("dimension must be 2 or 3, got {other}")),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.count())
    }
}

/// A point in 2D or 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    coords: [f64; 3],
    dimension: Dimension,
}

impl Position {
    pub fn new_2d(x: f64, y: f64) -> Self {
        Self {
            coords: [x, y, 0.0],
            dimension: Dimension::Two,
        }
    }

    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: [x, y, z],
            dimension: Dimension::Three,
        }
    }

    /// Builds a position from a coordinate slice of length 2 or 3.
    ///
    /// # Examples
    ///
    /// ```
    /// use forceatlas_core::position::{Dimension, Position};
    ///
    /// let p = Position::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(p.dimension(), Dimension::Three);
    /// assert!(Position::from_slice(&[1.0]).is_none());
    /// ```
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x, y] => Some(Self::new_2d(x, y)),
            [x, y, z] => Some(Self::new_3d(x, y, z)),
            _ => None,
        }
    }

    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Returns the depth coordinate for 3D positions.
    pub fn z(&self) -> Option<f64> {
        match self.dimension {
            Dimension::Two => None,
            Dimension::Three => Some(self.coords[2]),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns the coordinates as a slice of length [`Dimension::count`].
    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.dimension.count()]
    }
}

/// Node label to position, ordered by the node's layout index.
pub type PositionMap<N> = IndexMap<N, Position>;
