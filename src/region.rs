//! Flood fill and connected-region enumeration.
//!
//! A region is a maximal set of grid cells connected through equal-symbol
//! orthogonal neighbors. Filling also counts the region's perimeter: every
//! edge from a region cell into a cell holding a different symbol, where
//! anything outside the bounds counts as different.

use std::collections::{HashSet, VecDeque};

use crate::grid::{Direction, Grid, Position};

/// A filled region with its boundary measurements
#[derive(Debug, Clone)]
pub struct Region {
    pub symbol: u8,
    pub cells: HashSet<Position>,
    pub perimeter: usize,
}

impl Region {
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Number of straight fence sides around the region.
    ///
    /// Scans the bounding box twice, top-to-bottom and left-to-right, and
    /// counts maximal runs of boundary edges as one side each. A new side
    /// starts whenever the inside/outside pattern changes between adjacent
    /// scan positions.
    pub fn sides(&self) -> usize {
        if self.cells.is_empty() {
            return 0;
        }

        let x_min = self.cells.iter().map(|c| c.x).min().unwrap();
        let x_max = self.cells.iter().map(|c| c.x).max().unwrap();
        let y_min = self.cells.iter().map(|c| c.y).min().unwrap();
        let y_max = self.cells.iter().map(|c| c.y).max().unwrap();

        let inside = |x: i32, y: i32| self.cells.contains(&Position::new(x, y));

        let mut sides = 0;

        // Horizontal edges, scanned top to bottom
        for y in y_min..=y_max + 1 {
            let mut prev = (false, false);
            for x in x_min..=x_max + 1 {
                let cur = (inside(x, y - 1), inside(x, y));
                if cur.0 != cur.1 && cur != prev {
                    sides += 1;
                }
                prev = cur;
            }
        }

        // Vertical edges, scanned left to right
        for x in x_min..=x_max + 1 {
            let mut prev = (false, false);
            for y in y_min..=y_max + 1 {
                let cur = (inside(x - 1, y), inside(x, y));
                if cur.0 != cur.1 && cur != prev {
                    sides += 1;
                }
                prev = cur;
            }
        }

        sides
    }
}

/// Fill the region of cells sharing the start cell's symbol.
///
/// Returns an empty region when `start` is out of bounds.
pub fn flood_fill(grid: &Grid, start: Position) -> Region {
    match grid.get(start) {
        Some(symbol) => flood_fill_where(grid, start, |cell| cell == symbol),
        None => Region {
            symbol: 0,
            cells: HashSet::new(),
            perimeter: 0,
        },
    }
}

/// Fill the region of cells satisfying `member`, starting from `start`.
///
/// The start cell must satisfy the predicate itself, otherwise the region
/// is empty with a perimeter of 1 (the edge into the start cell).
pub fn flood_fill_where(grid: &Grid, start: Position, member: impl Fn(u8) -> bool) -> Region {
    let symbol = grid.get(start).unwrap_or(0);
    let mut cells = HashSet::new();
    let mut perimeter = 0;

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        // Out-of-bounds reads land here too and count toward the perimeter
        if !grid.get(pos).is_some_and(&member) {
            perimeter += 1;
            continue;
        }

        if !cells.insert(pos) {
            continue;
        }

        for dir in Direction::ORTHOGONAL {
            queue.push_back(pos.step(dir));
        }
    }

    Region {
        symbol,
        cells,
        perimeter,
    }
}

/// Enumerate every region of the grid, overwriting each counted region with
/// `background` so that no cell is processed twice. After the call every
/// cell holds `background`; each non-background cell was part of exactly one
/// returned region.
pub fn consume_regions(grid: &mut Grid, background: u8) -> Vec<Region> {
    let positions: Vec<Position> = grid.positions().collect();
    let mut regions = Vec::new();

    for pos in positions {
        if grid.get(pos) == Some(background) {
            continue;
        }

        let region = flood_fill(grid, pos);
        for &cell in &region.cells {
            grid.set(cell, background);
        }
        regions.push(region);
    }

    regions
}
