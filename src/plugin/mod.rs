//! Defines the Bevy [Plugin] for HierarchicalPathfinding
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod influence_layer;
pub mod path_layer;
pub mod terrain_layer;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	Tidy,
	Calculate,
}

pub struct HierarchicalPathfindingPlugin;

impl Plugin for HierarchicalPathfindingPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<CellCoordinates>()
			.register_type::<TopType>()
			.register_type::<EdgeType>()
			.register_type::<NodeID>()
			.register_type::<EdgeID>()
			.register_type::<RegionID>()
			.register_type::<PortalID>()
			.register_type::<RegionQualifier>()
			.register_type::<PathOptions>()
			.register_type::<PathfinderSettings>()
			.register_type::<HierarchicalFallback>()
			.register_type::<PathMetadata>()
			.register_type::<InfluenceSourceID>()
			.add_event::<terrain_layer::EventUpdateCellTerrain>()
			.add_event::<terrain_layer::EventCleanCaches>()
			.add_event::<path_layer::EventPathRequest>()
			.add_event::<influence_layer::EventUpdateInfluenceSource>()
			.add_event::<influence_layer::EventRemoveInfluenceSource>()
			.configure_sets(Update, (OrderingSet::Tidy, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					path_layer::cleanup_old_paths.in_set(OrderingSet::Tidy),
					(
						terrain_layer::process_terrain_updates,
						terrain_layer::clean_cache,
						path_layer::process_path_requests,
						influence_layer::process_influence_sources,
						influence_layer::propagate_influence_maps,
					)
						.chain()
						.in_set(OrderingSet::Calculate),
				),
			);
	}
}
