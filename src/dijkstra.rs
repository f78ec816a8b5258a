//! Weighted shortest path where turning costs more than moving straight.
//!
//! The search state is (position, direction): two paths reaching the same
//! cell under different headings pay different costs for their next move, so
//! they are distinct states. A min-priority-queue keyed by accumulated cost
//! with lazy deletion gives Dijkstra's first-dequeue-is-optimal guarantee.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use smallvec::SmallVec;

use crate::grid::{Direction, Grid, Position};

/// Heap entry: (score, x, y, dx, dy), ordered cheapest-first via `Reverse`
type QueueEntry = Reverse<(u64, i32, i32, i32, i32)>;

/// Bookkeeping for the optimal-path marking descent
struct Descent<'a> {
    grid: &'a Grid,
    goal: Position,
    target: u64,
    /// Cheapest score each state has been entered with
    seen: HashMap<(Position, Direction), u64>,
    /// States on the current recursion path
    on_stack: HashSet<(Position, Direction)>,
    cells: HashSet<Position>,
}

/// Turn-cost shortest-path search over a walled grid
#[derive(Debug, Clone, Copy)]
pub struct TurnCostSearch {
    pub step_cost: u64,
    pub turn_cost: u64,
    pub wall: u8,
}

impl Default for TurnCostSearch {
    fn default() -> Self {
        Self {
            step_cost: 1,
            turn_cost: 1000,
            wall: b'#',
        }
    }
}

impl TurnCostSearch {
    /// The three moves out of a state: straight, or a 90° rotation followed
    /// by a step (a rotation alone never helps twice in a row).
    fn successors(
        &self,
        pos: Position,
        dir: Direction,
        score: u64,
    ) -> SmallVec<[(Position, Direction, u64); 3]> {
        let mut moves = SmallVec::new();
        moves.push((pos.step(dir), dir, score + self.step_cost));
        for turned in [dir.turn_left(), dir.turn_right()] {
            moves.push((
                pos.step(turned),
                turned,
                score + self.turn_cost + self.step_cost,
            ));
        }
        moves
    }

    fn open(&self, grid: &Grid, pos: Position) -> bool {
        grid.get(pos).is_some_and(|cell| cell != self.wall)
    }

    /// Minimum total cost from `start` heading `dir` to `goal`, or `None`
    /// if the goal is unreachable.
    pub fn cheapest(
        &self,
        grid: &Grid,
        start: Position,
        dir: Direction,
        goal: Position,
    ) -> Option<u64> {
        let mut best: HashMap<(Position, Direction), u64> = HashMap::new();
        let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

        best.insert((start, dir), 0);
        queue.push(Reverse((0, start.x, start.y, dir.dx, dir.dy)));

        while let Some(Reverse((score, x, y, dx, dy))) = queue.pop() {
            let pos = Position::new(x, y);
            let dir = Direction { dx, dy };

            if pos == goal {
                return Some(score);
            }

            // Lazy deletion: a cheaper entry for this state was already expanded
            if best.get(&(pos, dir)).is_some_and(|&b| score > b) {
                continue;
            }

            for (next, next_dir, next_score) in self.successors(pos, dir, score) {
                if !self.open(grid, next) {
                    continue;
                }
                let entry = best.entry((next, next_dir)).or_insert(u64::MAX);
                if next_score < *entry {
                    *entry = next_score;
                    queue.push(Reverse((
                        next_score,
                        next.x,
                        next.y,
                        next_dir.dx,
                        next_dir.dy,
                    )));
                }
            }
        }

        None
    }

    /// Optimal cost plus every cell lying on any optimal-cost path.
    ///
    /// Re-derives the optimal score, then walks the state space again by
    /// memoized recursive descent from the start, pruning any branch whose
    /// cost plus an admissible lower bound to the goal exceeds the optimum.
    /// Paths that revisit one of their own states are never optimal in a
    /// useful sense (they contain a cycle), so the descent skips them; with
    /// a zero step cost such cycles cost nothing and would otherwise recurse
    /// forever.
    pub fn optimal_cells(
        &self,
        grid: &Grid,
        start: Position,
        dir: Direction,
        goal: Position,
    ) -> Option<(u64, HashSet<Position>)> {
        let target = self.cheapest(grid, start, dir, goal)?;

        let mut descent = Descent {
            grid,
            goal,
            target,
            seen: HashMap::new(),
            on_stack: HashSet::new(),
            cells: HashSet::new(),
        };
        self.mark_optimal(&mut descent, start, dir, 0);

        Some((target, descent.cells))
    }

    /// Manhattan distance with a single turn penalty when both axes differ.
    /// Admissible: any real path pays at least this much.
    fn lower_bound(&self, pos: Position, goal: Position) -> u64 {
        let mut bound = pos.manhattan(goal) * self.step_cost;
        if pos.x != goal.x && pos.y != goal.y {
            bound += self.turn_cost;
        }
        bound
    }

    fn mark_optimal(
        &self,
        descent: &mut Descent<'_>,
        pos: Position,
        dir: Direction,
        score: u64,
    ) -> bool {
        if pos == descent.goal {
            if score == descent.target {
                descent.cells.insert(pos);
                return true;
            }
            return false;
        }

        if !self.open(descent.grid, pos) {
            return false;
        }

        if score + self.lower_bound(pos, descent.goal) > descent.target {
            return false;
        }

        let state = (pos, dir);

        // Revisiting an ancestor of the current path would mean walking a
        // cycle; with positive costs the score bound already rejects that,
        // but a zero-cost cycle would recurse without ever tripping it.
        if descent.on_stack.contains(&state) {
            return false;
        }

        // Prune when this exact state was already reached more cheaply; any
        // continuation costs the same from here, so the dearer visit cannot
        // be part of an optimal path.
        match descent.seen.entry(state) {
            Entry::Occupied(mut known) => {
                if score > *known.get() {
                    return false;
                }
                known.insert(score);
            }
            Entry::Vacant(slot) => {
                slot.insert(score);
            }
        }

        descent.on_stack.insert(state);
        let mut on_path = false;
        for (next, next_dir, next_score) in self.successors(pos, dir, score) {
            if self.mark_optimal(descent, next, next_dir, next_score) {
                on_path = true;
            }
        }
        descent.on_stack.remove(&state);

        if on_path {
            descent.cells.insert(pos);
        }
        on_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn run(text: &str) -> (Grid, Position, Position) {
        let grid = Grid::parse(text).unwrap();
        let start = grid.find(b'S').unwrap();
        let goal = grid.find(b'E').unwrap();
        (grid, start, goal)
    }

    #[test]
    fn test_single_turn_corridor() {
        let (grid, start, goal) = run("####\n#.E#\n#S.#\n####");
        let search = TurnCostSearch::default();

        let cost = search.cheapest(&grid, start, Direction::RIGHT, goal);
        assert_eq!(cost, Some(1002));

        let (best, cells) = search
            .optimal_cells(&grid, start, Direction::RIGHT, goal)
            .unwrap();
        assert_eq!(best, 1002);
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_unreachable_goal() {
        let (grid, start, goal) = run("S#E");
        let search = TurnCostSearch::default();
        assert_eq!(search.cheapest(&grid, start, Direction::RIGHT, goal), None);
        assert!(search
            .optimal_cells(&grid, start, Direction::RIGHT, goal)
            .is_none());
    }

    #[test]
    fn test_first_maze_example() {
        let text = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############";
        let (grid, start, goal) = run(text);
        let search = TurnCostSearch::default();

        let (cost, cells) = search
            .optimal_cells(&grid, start, Direction::RIGHT, goal)
            .unwrap();
        assert_eq!(cost, 7036);
        assert_eq!(cells.len(), 45);
    }

    #[test]
    fn test_second_maze_example() {
        let text = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################";
        let (grid, start, goal) = run(text);
        let search = TurnCostSearch::default();

        let (cost, cells) = search
            .optimal_cells(&grid, start, Direction::RIGHT, goal)
            .unwrap();
        assert_eq!(cost, 11048);
        assert_eq!(cells.len(), 64);
    }

    #[test]
    fn test_search_is_deterministic() {
        let (grid, start, goal) = run("####\n#.E#\n#S.#\n####");
        let search = TurnCostSearch::default();

        let first = search.cheapest(&grid, start, Direction::RIGHT, goal);
        let second = search.cheapest(&grid, start, Direction::RIGHT, goal);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_cost_search_terminates() {
        // With both costs zero every open cell cycles at constant score;
        // the descent must still finish instead of chasing free loops
        let (grid, start, goal) = run("S..\n...\n..E");
        let search = TurnCostSearch {
            step_cost: 0,
            turn_cost: 0,
            wall: b'#',
        };

        let (cost, cells) = search
            .optimal_cells(&grid, start, Direction::RIGHT, goal)
            .unwrap();
        assert_eq!(cost, 0);
        // Every cell lies on some cycle-free zero-cost route
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn test_custom_costs() {
        // With free turns the corridor is plain Manhattan distance
        let (grid, start, goal) = run("####\n#.E#\n#S.#\n####");
        let search = TurnCostSearch {
            step_cost: 1,
            turn_cost: 0,
            wall: b'#',
        };
        assert_eq!(
            search.cheapest(&grid, start, Direction::RIGHT, goal),
            Some(2)
        );
    }
}
