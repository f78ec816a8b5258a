//! Grid, position and direction value types.
//!
//! A `Grid` is a rectangular map of byte symbols addressed by `(x, y)` with
//! `y` growing downward. All rows have equal length; reads outside the bounds
//! return `None`, which compares unequal to every real symbol.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring position one step along `dir`
    pub fn step(self, dir: Direction) -> Position {
        Position::new(self.x + dir.dx, self.y + dir.dy)
    }

    pub fn manhattan(self, other: Position) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }
}

/// A unit vector heading. Rotations are coordinate swap-and-negate, so the
/// same type covers any heading a walk can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::RIGHT,
        Direction::DOWN,
        Direction::LEFT,
        Direction::UP,
    ];

    pub fn turn_left(self) -> Direction {
        Direction {
            dx: self.dy,
            dy: -self.dx,
        }
    }

    pub fn turn_right(self) -> Direction {
        Direction {
            dx: -self.dy,
            dy: self.dx,
        }
    }
}

/// Rectangular byte-symbol map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<u8>>,
    width: usize,
}

impl Grid {
    /// Parse newline-delimited rows. Fails on empty input or ragged rows.
    pub fn parse(text: &str) -> Result<Grid, Error> {
        let rows: Vec<Vec<u8>> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| line.as_bytes().to_vec())
            .collect();

        let width = match rows.first() {
            Some(row) => row.len(),
            None => return Err(Error::EmptyGrid),
        };

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
        }

        Ok(Grid { rows, width })
    }

    /// Parse and surround the map with a one-cell border of `pad`, so walks
    /// and fills can rely on a sentinel instead of bounds checks.
    pub fn parse_padded(text: &str, pad: u8) -> Result<Grid, Error> {
        let inner = Grid::parse(text)?;
        let width = inner.width + 2;

        let mut rows = Vec::with_capacity(inner.rows.len() + 2);
        rows.push(vec![pad; width]);
        for row in inner.rows {
            let mut padded = Vec::with_capacity(width);
            padded.push(pad);
            padded.extend_from_slice(&row);
            padded.push(pad);
            rows.push(padded);
        }
        rows.push(vec![pad; width]);

        Ok(Grid { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Symbol at `pos`, or `None` outside the bounds
    pub fn get(&self, pos: Position) -> Option<u8> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }

    /// Overwrite the symbol at `pos`, returning the previous one so probes
    /// can restore it. Out-of-bounds writes are ignored and return `None`.
    pub fn set(&mut self, pos: Position, symbol: u8) -> Option<u8> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
            .map(|cell| std::mem::replace(cell, symbol))
    }

    /// First position holding `symbol`, scanning row by row
    pub fn find(&self, symbol: u8) -> Result<Position, Error> {
        self.positions()
            .find(|&pos| self.get(pos) == Some(symbol))
            .ok_or(Error::SymbolNotFound(symbol))
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height() as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    pub fn count(&self, symbol: u8) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&cell| cell == symbol).count())
            .sum()
    }
}
