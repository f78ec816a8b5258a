//! Unweighted shortest paths over a grid with blocked cells.
//!
//! Standard breadth-first search: distances are non-decreasing in dequeue
//! order, so the first distance recorded for a cell is final.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid::{Direction, Grid, Position};

/// Minimum number of moves from `start` to `goal`, stepping only onto
/// in-bounds cells that do not hold `wall`. `None` means unreachable.
pub fn shortest_distance(grid: &Grid, start: Position, goal: Position, wall: u8) -> Option<usize> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((pos, dist)) = queue.pop_front() {
        if pos == goal {
            return Some(dist);
        }

        if !seen.insert(pos) {
            continue;
        }

        for dir in Direction::ORTHOGONAL {
            let next = pos.step(dir);
            if grid.get(next).is_some_and(|cell| cell != wall) {
                queue.push_back((next, dist + 1));
            }
        }
    }

    None
}

/// Distances from `start` to every reachable open cell.
///
/// Useful when many point-queries follow one search, e.g. testing how much
/// each candidate shortcut would save against the distances on the route.
pub fn distance_map(grid: &Grid, start: Position, wall: u8) -> HashMap<Position, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((pos, dist)) = queue.pop_front() {
        if distances.contains_key(&pos) {
            continue;
        }
        distances.insert(pos, dist);

        for dir in Direction::ORTHOGONAL {
            let next = pos.step(dir);
            if grid.get(next).is_some_and(|cell| cell != wall) {
                queue.push_back((next, dist + 1));
            }
        }
    }

    distances
}

/// All cells reachable from `start` where each move must satisfy the
/// pairwise predicate `step(from_symbol, to_symbol)`, e.g. a gradient climb.
/// The start cell itself is always included.
pub fn reachable(grid: &Grid, start: Position, step: impl Fn(u8, u8) -> bool) -> HashSet<Position> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if !seen.insert(pos) {
            continue;
        }

        let Some(from) = grid.get(pos) else { continue };

        for dir in Direction::ORTHOGONAL {
            let next = pos.step(dir);
            if grid.get(next).is_some_and(|to| step(from, to)) {
                queue.push_back(next);
            }
        }
    }

    seen
}
