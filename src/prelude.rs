//! `use bevy_hierarchical_pathfinding_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::pathfinding::{
	graph::{edge::*, edge_classification::*, *},
	grid::{cell::*, cell_grid::*},
	heap::{binary_min_heap::*, priority_queue::*},
	influence::*,
	path::{path_cache::*, post_processing::*, *},
	regions::{portals::*, region_distances::*, *},
	search::{pathfinder::*, *},
	utilities::*,
	*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{influence_layer::*, path_layer::*, terrain_layer::*, *},
};
