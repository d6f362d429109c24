//! This is a plugin for Bevy game engine to setup and handle the logic for hierarchical pathfinding across a grid of elevated cells
//!

pub mod pathfinding;
pub mod bundle;
pub mod plugin;

pub mod prelude;
