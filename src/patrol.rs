//! Deterministic patrol walks and loop detection.
//!
//! The stepping rule is fixed: advance along the current heading, rotating
//! 90° right as long as an obstacle blocks the cell ahead. Walking off the
//! grid terminates the walk; revisiting a (position, direction) state means
//! the walk loops forever.

use std::collections::HashSet;

use crate::grid::{Direction, Grid, Position};

/// Cell symbol the walk treats as an obstacle
pub const OBSTACLE: u8 = b'#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolOutcome {
    /// The walk left the grid
    Exited,
    /// The walk revisited a state and will never leave
    Looped,
}

/// How to decide that a walk is looping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCheck {
    /// Record every visited (position, direction) state and report a loop on
    /// the first revisit. Exact for any input.
    Exact,
    /// Declare a loop once the walk exceeds this many steps without exiting.
    /// An approximation: only sound when the ceiling exceeds the number of
    /// distinct (position, direction) states the grid can hold.
    StepCeiling(usize),
}

impl Default for LoopCheck {
    fn default() -> Self {
        LoopCheck::Exact
    }
}

enum Step {
    Move(Position, Direction),
    OffGrid,
    /// Obstacles on all four sides
    BoxedIn,
}

fn step(grid: &Grid, pos: Position, dir: Direction) -> Step {
    let mut dir = dir;
    for _ in 0..4 {
        let ahead = pos.step(dir);
        match grid.get(ahead) {
            Some(OBSTACLE) => dir = dir.turn_right(),
            Some(_) => return Step::Move(ahead, dir),
            None => return Step::OffGrid,
        }
    }
    Step::BoxedIn
}

/// Walk from `start` heading `dir` and collect every position covered before
/// the walk exits or starts looping.
pub fn route(grid: &Grid, start: Position, dir: Direction) -> (HashSet<Position>, PatrolOutcome) {
    let mut positions = HashSet::new();
    let mut states = HashSet::new();
    let (mut pos, mut dir) = (start, dir);

    loop {
        positions.insert(pos);
        if !states.insert((pos, dir)) {
            return (positions, PatrolOutcome::Looped);
        }

        match step(grid, pos, dir) {
            Step::Move(next, next_dir) => {
                pos = next;
                dir = next_dir;
            }
            Step::OffGrid => return (positions, PatrolOutcome::Exited),
            Step::BoxedIn => return (positions, PatrolOutcome::Looped),
        }
    }
}

/// Determine whether the walk exits the grid or loops, using the requested
/// loop check.
pub fn outcome(grid: &Grid, start: Position, dir: Direction, check: LoopCheck) -> PatrolOutcome {
    match check {
        LoopCheck::Exact => {
            let mut states = HashSet::new();
            let (mut pos, mut dir) = (start, dir);
            loop {
                if !states.insert((pos, dir)) {
                    return PatrolOutcome::Looped;
                }
                match step(grid, pos, dir) {
                    Step::Move(next, next_dir) => {
                        pos = next;
                        dir = next_dir;
                    }
                    Step::OffGrid => return PatrolOutcome::Exited,
                    Step::BoxedIn => return PatrolOutcome::Looped,
                }
            }
        }
        LoopCheck::StepCeiling(ceiling) => {
            let (mut pos, mut dir) = (start, dir);
            for _ in 0..ceiling {
                match step(grid, pos, dir) {
                    Step::Move(next, next_dir) => {
                        pos = next;
                        dir = next_dir;
                    }
                    Step::OffGrid => return PatrolOutcome::Exited,
                    Step::BoxedIn => return PatrolOutcome::Looped,
                }
            }
            PatrolOutcome::Looped
        }
    }
}

/// Count the cells where placing a single obstacle would trap the walk in a
/// loop. Only cells on the unobstructed route are candidates (an obstacle
/// anywhere else is never encountered), and the start cell is excluded.
///
/// Each probe temporarily writes an obstacle into the grid and restores the
/// previous symbol before the next probe, so the grid is unchanged on
/// return.
pub fn count_looping_obstructions(
    grid: &mut Grid,
    start: Position,
    dir: Direction,
    check: LoopCheck,
) -> usize {
    let (mut candidates, _) = route(grid, start, dir);
    candidates.remove(&start);

    let mut count = 0;
    for pos in candidates {
        let previous = grid.set(pos, OBSTACLE);
        if outcome(grid, start, dir, check) == PatrolOutcome::Looped {
            count += 1;
        }
        if let Some(previous) = previous {
            grid.set(pos, previous);
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    const GUARD_MAP: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...";

    #[test]
    fn test_walk_off_the_grid() {
        let grid = Grid::parse("...\n.^.\n...").unwrap();
        let start = grid.find(b'^').unwrap();

        let (positions, result) = route(&grid, start, Direction::UP);
        assert_eq!(result, PatrolOutcome::Exited);
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn test_walk_loops_in_closed_room() {
        let grid = Grid::parse("####\n#..#\n#..#\n####").unwrap();
        let start = Position::new(1, 2);

        let (_, result) = route(&grid, start, Direction::UP);
        assert_eq!(result, PatrolOutcome::Looped);
        assert_eq!(
            outcome(&grid, start, Direction::UP, LoopCheck::Exact),
            PatrolOutcome::Looped
        );
    }

    #[test]
    fn test_boxed_in_counts_as_loop() {
        let grid = Grid::parse(".#.\n#.#\n.#.").unwrap();
        let start = Position::new(1, 1);
        assert_eq!(
            outcome(&grid, start, Direction::UP, LoopCheck::Exact),
            PatrolOutcome::Looped
        );
    }

    #[test]
    fn test_guard_route_length() {
        let grid = Grid::parse(GUARD_MAP).unwrap();
        let start = grid.find(b'^').unwrap();

        let (positions, result) = route(&grid, start, Direction::UP);
        assert_eq!(result, PatrolOutcome::Exited);
        assert_eq!(positions.len(), 41);
    }

    #[test]
    fn test_looping_obstruction_count() {
        let mut grid = Grid::parse(GUARD_MAP).unwrap();
        let start = grid.find(b'^').unwrap();

        let count = count_looping_obstructions(&mut grid, start, Direction::UP, LoopCheck::Exact);
        assert_eq!(count, 6);

        // Probes restored every cell
        assert_eq!(grid, Grid::parse(GUARD_MAP).unwrap());
    }

    #[test]
    fn test_step_ceiling_agrees_on_sample() {
        let mut grid = Grid::parse(GUARD_MAP).unwrap();
        let start = grid.find(b'^').unwrap();

        let count = count_looping_obstructions(
            &mut grid,
            start,
            Direction::UP,
            LoopCheck::StepCeiling(10_000),
        );
        assert_eq!(count, 6);
    }

    #[test]
    fn test_tight_ceiling_misreports_long_walks() {
        let grid = Grid::parse("...\n.^.\n...").unwrap();
        let start = grid.find(b'^').unwrap();

        // The walk needs two steps to leave the grid
        assert_eq!(
            outcome(&grid, start, Direction::UP, LoopCheck::StepCeiling(2)),
            PatrolOutcome::Exited
        );
        assert_eq!(
            outcome(&grid, start, Direction::UP, LoopCheck::StepCeiling(1)),
            PatrolOutcome::Looped
        );
    }
}
