//! **lattice_mazes** carves grid mazes for a 3D maze game and lays out where the floor, walls,
//! goal and player are spawned.
//!
//! A maze is an `OccupancyGrid` of wall, path and goal cells carved by a randomized recursive
//! backtracker over a lattice of decision points. The `spawning` and `falling` modules turn a
//! finished grid into world positions and drive the walls' drop-in from an external clock.

// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

pub mod cells;
pub mod config;
pub mod errors;
pub mod falling;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod pathing;
pub mod spawning;
pub mod units;
mod utils;
