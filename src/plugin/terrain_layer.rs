//! Logic for handling changes to the terrain of a [CellGrid] which in turn
//! rebuilds the [NodeGraph], [RegionGraph] and [RegionDistances] and cleans
//! cached paths which may of been made invalid by the change
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Used to change the terrain of a single cell
#[derive(Event)]
pub struct EventUpdateCellTerrain {
	/// Cell to update
	coordinates: CellCoordinates,
	/// New elevation of the cell
	elevation: u8,
	/// New top surface shape
	top_type: TopType,
	/// New facing of the top surface
	top_direction: Ordinal,
}

impl EventUpdateCellTerrain {
	/// Create a new instance of [EventUpdateCellTerrain]
	#[cfg(not(tarpaulin_include))]
	pub fn new(
		coordinates: CellCoordinates,
		elevation: u8,
		top_type: TopType,
		top_direction: Ordinal,
	) -> Self {
		EventUpdateCellTerrain {
			coordinates,
			elevation,
			top_type,
			top_direction,
		}
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_coordinates(&self) -> CellCoordinates {
		self.coordinates
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_elevation(&self) -> u8 {
		self.elevation
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_top_type(&self) -> TopType {
		self.top_type
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_top_direction(&self) -> Ordinal {
		self.top_direction
	}
}

/// Read [EventUpdateCellTerrain] and update the grid along with everything
/// derived from it
#[cfg(not(tarpaulin_include))]
#[allow(clippy::type_complexity)]
pub fn process_terrain_updates(
	mut events: EventReader<EventUpdateCellTerrain>,
	mut query: Query<(
		Entity,
		&mut CellGrid,
		&mut NodeGraph,
		&mut RegionGraph,
		&mut RegionDistances,
		&PathfinderSettings,
		&mut InfluenceMap,
	)>,
	mut event_cache_clean: EventWriter<EventCleanCaches>,
) {
	// coalesce events so the graphs are only rebuilt once a tick
	let updates: Vec<&EventUpdateCellTerrain> = events.read().collect();
	if updates.is_empty() {
		return;
	}
	for (
		entity,
		mut grid,
		mut node_graph,
		mut region_graph,
		mut region_distances,
		settings,
		mut influence_map,
	) in query.iter_mut()
	{
		let mut is_changed = false;
		for event in updates.iter() {
			is_changed |= grid.set_terrain(
				event.get_coordinates(),
				event.get_elevation(),
				event.get_top_type(),
				event.get_top_direction(),
			);
		}
		if !is_changed {
			continue;
		}
		debug!("Rebuilding graphs after {} terrain changes", updates.len());
		node_graph.recalculate_all_node_edges(&grid);
		region_graph.rebuild(&mut grid, &node_graph);
		*region_distances = {
			let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, settings);
			RegionDistances::new(&mut pathfinder)
		};
		influence_map.reset(region_graph.get_regions().len());
		event_cache_clean.write(EventCleanCaches(entity));
	}
}

/// Any path found on the grid of the entity may now be invalid and needs removing from the cache
#[derive(Event)]
pub struct EventCleanCaches(Entity);

/// Remove every cached [Path] of the entities whose terrain has changed.
/// Actors polling the [PathCache] need to send a new [EventPathRequest]
#[cfg(not(tarpaulin_include))]
pub fn clean_cache(mut events: EventReader<EventCleanCaches>, mut q_path: Query<&mut PathCache>) {
	for event in events.read() {
		if let Ok(mut cache) = q_path.get_mut(event.0) {
			debug!("Purging {} cached paths", cache.len());
			cache.clear();
		}
	}
}
