//! Grid traversal and counting engine for puzzle maps.
//!
//! This crate collects the search algorithms that recur across small
//! grid-puzzle programs: flood fill with perimeter and side counting,
//! unweighted shortest paths, turn-cost weighted shortest paths, memoized
//! recursive counting, and deterministic-walk loop detection. The engine
//! works on already-parsed grids and value lists; the companion binary
//! supplies the parse, compute, print pipeline.

pub mod bfs;
pub mod dijkstra;
pub mod error;
pub mod grid;
pub mod memo;
pub mod patrol;
pub mod region;

// Re-export main types
pub use bfs::{distance_map, reachable, shortest_distance};
pub use dijkstra::TurnCostSearch;
pub use error::Error;
pub use grid::{Direction, Grid, Position};
pub use memo::{tiling_count, StoneCounter};
pub use patrol::{count_looping_obstructions, outcome, route, LoopCheck, PatrolOutcome};
pub use region::{consume_regions, flood_fill, flood_fill_where, Region};
