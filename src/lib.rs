//! Minimum-cost paths on obstacle grids with 8-directional movement.
//!
//! Orthogonal moves cost 1 and diagonal moves cost √2. The search runs
//! Dijkstra from the end cell over an indexed min-heap with decrease-key, then
//! reads the route forward from the start cell.

pub mod algorithm;
pub mod common;
pub mod config;
pub mod map;
pub mod output;
pub mod render;
pub mod scenario;
pub mod solver;
pub mod stat;

pub use algorithm::{shortest_path, SearchContext};
pub use common::{Direction, Location, Path, Query};
pub use map::Map;
