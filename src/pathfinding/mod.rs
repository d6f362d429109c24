//! Hierarchical pathfinding over a grid of elevated cells.
//!
//! A [CellGrid] describes the terrain. From it a [NodeGraph] is built where
//! each cell becomes a node joined to its eight neighbours by classified
//! [Edge]s. The grid is then decomposed into rectangular [Region]s of equal
//! elevation joined by [Portal]s to form the [RegionGraph].
//!
//! A search first runs A* across the [RegionGraph] to find a corridor of
//! regions and then runs A* across the [NodeGraph] restricted to that
//! corridor. The resulting [Path] can optionally be smoothed and pruned of
//! collinear waypoints.
//!

pub mod graph;
pub mod grid;
pub mod heap;
pub mod influence;
pub mod path;
pub mod regions;
pub mod search;
pub mod utilities;
