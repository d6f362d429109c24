//! Everything an entity needs to answer path requests over a single grid
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Grid, graphs and caches of a pathfinding world
#[derive(Bundle)]
pub struct PathfindingBundle {
	/// Terrain
	cell_grid: CellGrid,
	/// Fine graph of the terrain
	node_graph: NodeGraph,
	/// Coarse graph of the terrain
	region_graph: RegionGraph,
	/// Walking distance between regions
	region_distances: RegionDistances,
	/// Search configuration
	pathfinder_settings: PathfinderSettings,
	/// Answered path requests
	path_cache: PathCache,
	/// Influence of each region
	influence_map: InfluenceMap,
}

impl PathfindingBundle {
	/// Create a new instance of [PathfindingBundle] where every cell is flat at elevation `0`
	pub fn new(columns: usize, rows: usize) -> Self {
		PathfindingBundle::from_cell_grid(CellGrid::new(columns, rows))
	}
	/// Create a new instance of [PathfindingBundle] from existing terrain
	pub fn from_cell_grid(mut cell_grid: CellGrid) -> Self {
		let node_graph = NodeGraph::new(&cell_grid);
		let region_graph = RegionGraph::new(&mut cell_grid, &node_graph);
		let pathfinder_settings = PathfinderSettings::default();
		let region_distances = {
			let mut pathfinder =
				Pathfinder::new(&cell_grid, &node_graph, &region_graph, &pathfinder_settings);
			RegionDistances::new(&mut pathfinder)
		};
		let mut influence_map = InfluenceMap::default();
		influence_map.reset(region_graph.get_regions().len());
		PathfindingBundle {
			cell_grid,
			node_graph,
			region_graph,
			region_distances,
			pathfinder_settings,
			path_cache: PathCache::default(),
			influence_map,
		}
	}
	/// Create a new instance of [PathfindingBundle] where the [CellGrid] is derived from a `ron` file
	#[cfg(feature = "ron")]
	pub fn new_from_disk(path: &str) -> Self {
		PathfindingBundle::from_cell_grid(CellGrid::from_ron(path.to_string()))
	}
	/// Create a new instance of [PathfindingBundle] where the [CellGrid] is derived from a csv of elevations
	#[cfg(feature = "csv")]
	pub fn new_from_csv(path: &str) -> Self {
		PathfindingBundle::from_cell_grid(CellGrid::from_csv(path.to_string()))
	}
	/// Create a new instance of [PathfindingBundle] where the [CellGrid] is derived from a greyscale heightmap
	#[cfg(feature = "heightmap")]
	pub fn new_from_heightmap(path: &str, max_elevation: u8) -> Self {
		PathfindingBundle::from_cell_grid(CellGrid::from_heightmap(path.to_string(), max_elevation))
	}
	/// Change the [PathfinderSettings] the bundle is spawned with
	pub fn with_settings(mut self, settings: PathfinderSettings) -> Self {
		self.pathfinder_settings = settings;
		// the weight of the heuristic can change which region paths are found
		self.region_distances = {
			let mut pathfinder = Pathfinder::new(
				&self.cell_grid,
				&self.node_graph,
				&self.region_graph,
				&self.pathfinder_settings,
			);
			RegionDistances::new(&mut pathfinder)
		};
		self
	}
	/// Get the [CellGrid]
	pub fn get_cell_grid(&self) -> &CellGrid {
		&self.cell_grid
	}
	/// Get the [NodeGraph]
	pub fn get_node_graph(&self) -> &NodeGraph {
		&self.node_graph
	}
	/// Get the [RegionGraph]
	pub fn get_region_graph(&self) -> &RegionGraph {
		&self.region_graph
	}
	/// Get the [RegionDistances]
	pub fn get_region_distances(&self) -> &RegionDistances {
		&self.region_distances
	}
	/// Get the [InfluenceMap]
	pub fn get_influence_map(&self) -> &InfluenceMap {
		&self.influence_map
	}
}
