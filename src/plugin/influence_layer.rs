//! Moving sources of influence around and periodically spreading their
//! influence across the [InfluenceMap]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Place a source of influence or move an existing one
#[derive(Event)]
pub struct EventUpdateInfluenceSource {
	/// Source to place
	id: InfluenceSourceID,
	/// World position of the source
	position: Vec3,
}

impl EventUpdateInfluenceSource {
	pub fn new(id: InfluenceSourceID, position: Vec3) -> Self {
		EventUpdateInfluenceSource { id, position }
	}
}

/// Remove a source of influence
#[derive(Event)]
pub struct EventRemoveInfluenceSource(pub InfluenceSourceID);

/// Apply source changes to every [InfluenceMap]
#[cfg(not(tarpaulin_include))]
pub fn process_influence_sources(
	mut updates: EventReader<EventUpdateInfluenceSource>,
	mut removals: EventReader<EventRemoveInfluenceSource>,
	mut q_influence: Query<&mut InfluenceMap>,
) {
	let updates: Vec<&EventUpdateInfluenceSource> = updates.read().collect();
	let removals: Vec<&EventRemoveInfluenceSource> = removals.read().collect();
	if updates.is_empty() && removals.is_empty() {
		return;
	}
	for mut influence_map in q_influence.iter_mut() {
		for event in updates.iter() {
			influence_map.add_source(event.id, event.position);
		}
		for event in removals.iter() {
			if !influence_map.remove_source(event.0) {
				trace!("Influence source {:?} was already removed", event.0.get());
			}
		}
	}
}

/// Propagate each [InfluenceMap] once its interval has elapsed
#[cfg(not(tarpaulin_include))]
pub fn propagate_influence_maps(
	mut q_influence: Query<(&mut InfluenceMap, &CellGrid, &RegionDistances)>,
	time: Res<Time>,
) {
	for (mut influence_map, grid, region_distances) in q_influence.iter_mut() {
		if influence_map.tick(time.delta()) {
			influence_map.propagate(grid, region_distances);
		}
	}
}
