//! CLI entry point for the grid engine.
//!
//! Each subcommand reads one puzzle text format from a file or stdin, runs
//! the matching search, and prints a JSON object:
//!
//!   grid-solver regions <map> [--stdin]
//!   grid-solver shortest-path <map> [--start S] [--goal E]
//!   grid-solver best-paths <map> [--step-cost 1] [--turn-cost 1000]
//!   grid-solver patrol <map> [--ceiling <n>]
//!   grid-solver stones <numbers> [--rounds 25]
//!   grid-solver tilings <palette-and-designs>

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use grid_solver::{
    consume_regions, count_looping_obstructions, route, shortest_distance, tiling_count, Direction,
    Grid, LoopCheck, PatrolOutcome, Position, StoneCounter, TurnCostSearch,
};

#[derive(Parser)]
#[command(name = "grid-solver")]
#[command(about = "Grid traversal and counting engine for puzzle maps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate equal-symbol regions and price their fences
    Regions {
        /// Path to the map file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the map from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },

    /// Minimum number of moves between the start and goal markers
    ShortestPath {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        /// Start marker symbol
        #[arg(long, default_value = "S")]
        start: char,

        /// Goal marker symbol
        #[arg(long, default_value = "E")]
        goal: char,
    },

    /// Cheapest turn-cost route from S to E, plus every cell on an optimal route
    BestPaths {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        /// Cost of moving one cell forward
        #[arg(long, default_value = "1")]
        step_cost: u64,

        /// Cost of rotating 90 degrees
        #[arg(long, default_value = "1000")]
        turn_cost: u64,
    },

    /// Walk the guard route from '^' and probe looping obstructions
    Patrol {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        /// Declare a loop past this many steps instead of exact detection
        /// (approximation, only sound for small grids)
        #[arg(long)]
        ceiling: Option<usize>,
    },

    /// Count the stones a seed line becomes after blink rounds
    Stones {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        /// Number of blink rounds
        #[arg(long, default_value = "25")]
        rounds: u32,
    },

    /// Count the ways each design can be tiled from the piece palette
    Tilings {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionsOutput {
    regions: usize,
    total_area: usize,
    fence_price: usize,
    bulk_fence_price: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShortestPathOutput {
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BestPathsOutput {
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimal_cells: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatrolOutput {
    visited: usize,
    exits: bool,
    looping_obstructions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StonesOutput {
    rounds: u32,
    stones: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TilingsOutput {
    designs: usize,
    possible_designs: usize,
    total_ways: u64,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Regions { file, stdin } => {
            let mut grid = parse_padded_grid(&read_input(file, stdin), b'.');
            let regions = consume_regions(&mut grid, b'.');

            print_json(&RegionsOutput {
                regions: regions.len(),
                total_area: regions.iter().map(|r| r.area()).sum(),
                fence_price: regions.iter().map(|r| r.area() * r.perimeter).sum(),
                bulk_fence_price: regions.iter().map(|r| r.area() * r.sides()).sum(),
            });
        }

        Commands::ShortestPath {
            file,
            stdin,
            start,
            goal,
        } => {
            let grid = parse_grid(&read_input(file, stdin));
            let start = find_marker(&grid, start);
            let goal = find_marker(&grid, goal);

            let distance = shortest_distance(&grid, start, goal, b'#');
            print_json(&ShortestPathOutput {
                reachable: distance.is_some(),
                distance,
            });
        }

        Commands::BestPaths {
            file,
            stdin,
            step_cost,
            turn_cost,
        } => {
            let grid = parse_grid(&read_input(file, stdin));
            let start = find_marker(&grid, 'S');
            let goal = find_marker(&grid, 'E');

            let search = TurnCostSearch {
                step_cost,
                turn_cost,
                wall: b'#',
            };
            let found = search.optimal_cells(&grid, start, Direction::RIGHT, goal);

            print_json(&BestPathsOutput {
                reachable: found.is_some(),
                cost: found.as_ref().map(|(cost, _)| *cost),
                optimal_cells: found.as_ref().map(|(_, cells)| cells.len()),
            });
        }

        Commands::Patrol {
            file,
            stdin,
            ceiling,
        } => {
            let mut grid = parse_grid(&read_input(file, stdin));
            let start = find_marker(&grid, '^');
            let check = match ceiling {
                Some(steps) => LoopCheck::StepCeiling(steps),
                None => LoopCheck::Exact,
            };

            let (positions, result) = route(&grid, start, Direction::UP);
            let obstructions = count_looping_obstructions(&mut grid, start, Direction::UP, check);

            print_json(&PatrolOutput {
                visited: positions.len(),
                exits: result == PatrolOutcome::Exited,
                looping_obstructions: obstructions,
            });
        }

        Commands::Stones {
            file,
            stdin,
            rounds,
        } => {
            let input = read_input(file, stdin);
            let stones: Vec<u64> = input
                .split_whitespace()
                .map(|word| {
                    word.parse().unwrap_or_else(|e| {
                        eprintln!("Error parsing stone '{}': {}", word, e);
                        process::exit(1);
                    })
                })
                .collect();

            let mut counter = StoneCounter::new();
            let total = counter.count_all(&stones, rounds).unwrap_or_else(|e| {
                eprintln!("Error counting stones: {}", e);
                process::exit(1);
            });

            print_json(&StonesOutput {
                rounds,
                stones: total,
            });
        }

        Commands::Tilings { file, stdin } => {
            let input = read_input(file, stdin);
            let mut lines = input.lines().filter(|line| !line.trim().is_empty());

            let palette: Vec<&str> = match lines.next() {
                Some(first) => first.split(',').map(str::trim).collect(),
                None => {
                    eprintln!("Error: expected a palette line followed by designs");
                    process::exit(1);
                }
            };

            let mut designs = 0;
            let mut possible = 0;
            let mut total_ways: u64 = 0;
            for design in lines {
                let ways = tiling_count(&palette, design.trim()).unwrap_or_else(|e| {
                    eprintln!("Error counting tilings for '{}': {}", design, e);
                    process::exit(1);
                });
                designs += 1;
                if ways > 0 {
                    possible += 1;
                }
                total_ways = total_ways.checked_add(ways).unwrap_or_else(|| {
                    eprintln!("Error: total tiling count overflowed");
                    process::exit(1);
                });
            }

            print_json(&TilingsOutput {
                designs,
                possible_designs: possible,
                total_ways,
            });
        }
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> String {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
    } else {
        eprintln!("Error: Must provide either a file path or --stdin");
        process::exit(1);
    }
}

fn parse_grid(text: &str) -> Grid {
    Grid::parse(text).unwrap_or_else(|e| {
        eprintln!("Error parsing map: {}", e);
        process::exit(1);
    })
}

fn parse_padded_grid(text: &str, pad: u8) -> Grid {
    Grid::parse_padded(text, pad).unwrap_or_else(|e| {
        eprintln!("Error parsing map: {}", e);
        process::exit(1);
    })
}

fn find_marker(grid: &Grid, marker: char) -> Position {
    grid.find(marker as u8).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn print_json<T: Serialize>(output: &T) {
    println!("{}", serde_json::to_string_pretty(output).unwrap());
}
