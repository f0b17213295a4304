//! Grid cells and the four cardinal directions.
//!
//! A [`Cell`] is a structured `(x, y)` coordinate used as a node identity
//! throughout the crate; equality and hashing are by value. The direction
//! convention is `x + 1` = east and `y + 1` = north.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::errors::IntegrityError;

/// A grid coordinate: `0 <= x < rows`, `0 <= y < cols`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this cell lies inside an `rows x cols` grid.
    pub fn in_bounds(self, rows: i32, cols: i32) -> bool {
        self.x >= 0 && self.x < rows && self.y >= 0 && self.y < cols
    }

    /// The cell one step in `dir`, without any bounds handling.
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// Orthogonal neighbors inside an `rows x cols` grid.
    pub fn orthogonal_neighbors(self, rows: i32, cols: i32) -> Vec<Cell> {
        Direction::iter()
            .map(|d| self.step(d))
            .filter(|c| c.in_bounds(rows, cols))
            .collect()
    }

    /// Orthogonal in-bounds neighbors not present in `used`.
    ///
    /// This is the primitive every randomized walk builds on: the walk asks
    /// for the free neighbors of its current cell and backtracks when the
    /// returned list is empty.
    pub fn free_neighbors(self, rows: i32, cols: i32, used: &HashSet<Cell>) -> Vec<Cell> {
        self.orthogonal_neighbors(rows, cols)
            .into_iter()
            .filter(|c| !used.contains(c))
            .collect()
    }

    /// Direction label from `self` to an orthogonally adjacent cell.
    ///
    /// Any pair that is not axis-aligned at unit distance is a
    /// data-integrity error, never silently skipped.
    pub fn direction_to(self, next: Cell) -> Result<Direction, IntegrityError> {
        match (next.x - self.x, next.y - self.y) {
            (0, 1) => Ok(Direction::North),
            (0, -1) => Ok(Direction::South),
            (1, 0) => Ok(Direction::East),
            (-1, 0) => Ok(Direction::West),
            _ => Err(IntegrityError::NonOrthogonalEdge { a: self, b: next }),
        }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four move directions. North increases `y`, east increases `x`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Unit vector for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}
