//! Search across a plateau that can only be climbed by a single ramp
//!
//! ```text
//!  row
//!   4 | 0 | 0  | 1 | 1 | 1 |
//!   3 | 0 | 0  | 1 | 1 | 1 |
//!   2 | 0 | 0E | 1 | 1 | 1 |
//!   1 | 0 | 0  | 0 | 0 | 0 |
//!   0 | 0 | 0  | 0 | 0 | 0 |
//!       0   1    2   3   4   column
//! ```
//!

use bevy::prelude::*;
use bevy_hierarchical_pathfinding_plugin::prelude::*;

/// Index of the ramp cell
const RAMP: usize = 11;

/// Build the plateau grid
fn plateau() -> CellGrid {
	let mut cells = Vec::new();
	for row in 0..5 {
		for column in 0..5 {
			let cell = match (column, row) {
				(1, 2) => Cell::slope(0, Ordinal::East),
				(c, r) if c >= 2 && r >= 2 => Cell::flat(1),
				_ => Cell::flat(0),
			};
			cells.push(cell);
		}
	}
	CellGrid::from_cells(5, 5, cells)
}

#[test]
fn regions_of_plateau() {
	let mut grid = plateau();
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	let result: Vec<usize> = grid
		.get_cells()
		.iter()
		.map(|c| c.get_region().unwrap().get())
		.collect();
	#[rustfmt::skip]
	let actual = vec![
		0, 0, 1, 1, 1,
		0, 0, 1, 1, 1,
		0, 0, 2, 2, 2,
		0, 0, 2, 2, 2,
		0, 0, 2, 2, 2,
	];
	assert_eq!(actual, result);
	assert_eq!(3, region_graph.get_regions().len());
}

#[test]
fn ramp_portal_is_walkable() {
	let mut grid = plateau();
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	let portal = region_graph
		.get_portals()
		.iter()
		.find(|p| p.get_region_one() == RegionID::new(0) && p.get_region_two() == RegionID::new(2))
		.unwrap();
	assert_eq!(EdgeType::SlopeConnection, portal.get_edge_type());
}

#[test]
fn climb_without_jumping() {
	let mut grid = plateau();
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	let settings = PathfinderSettings::default();
	let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
	for hierarchical in [true, false] {
		let options = PathOptions::new(hierarchical, false, false, false, false);
		let path = pathfinder
			.get_path(NodeID::new(0), NodeID::new(24), &options)
			.unwrap();
		let nodes = path.get_nodes();
		assert_eq!(Some(&NodeID::new(0)), nodes.first());
		assert_eq!(Some(&NodeID::new(24)), nodes.last());
		assert!(nodes.contains(&NodeID::new(RAMP)));
		for point in path.get_points() {
			assert_ne!(Some(EdgeType::Elevated), point.get_edge_type());
		}
	}
}

#[test]
fn region_path_through_ramp() {
	let mut grid = plateau();
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	let settings = PathfinderSettings::default();
	let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
	let result = pathfinder
		.find_region_path(RegionID::new(1), RegionID::new(2), false)
		.unwrap()
		.get_regions();
	let actual = vec![RegionID::new(1), RegionID::new(0), RegionID::new(2)];
	assert_eq!(actual, result);
	// with jumping the plateau is directly above
	let result = pathfinder
		.find_region_path(RegionID::new(1), RegionID::new(2), true)
		.unwrap()
		.get_regions();
	let actual = vec![RegionID::new(1), RegionID::new(2)];
	assert_eq!(actual, result);
}

#[test]
fn repeated_searches_agree() {
	let mut grid = plateau();
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	let settings = PathfinderSettings::default();
	let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
	let options = PathOptions::new(true, false, true, true, true);
	let first = pathfinder.get_path(NodeID::new(4), NodeID::new(22), &options);
	// unrelated search in between must not leak state
	let _ = pathfinder.get_path(NodeID::new(20), NodeID::new(3), &PathOptions::default());
	let second = pathfinder.get_path(NodeID::new(4), NodeID::new(22), &options);
	assert!(first.is_some());
	assert_eq!(first, second);
}

#[test]
fn graph_symmetry() {
	let mut grid = plateau();
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	for edge in node_graph.get_edges() {
		for node in [edge.get_node_one(), edge.get_node_two()] {
			assert!(node_graph.get_node(node).get_edges().contains(&edge.get_id()));
		}
	}
	for portal in region_graph.get_portals() {
		for region in [portal.get_region_one(), portal.get_region_two()] {
			assert!(region_graph.get_region(region).get_portals().contains(&portal.get_id()));
		}
	}
	let mut covered = vec![0; grid.len()];
	for region in region_graph.get_regions() {
		for index in region.get_cell_indices() {
			covered[*index] += 1;
		}
	}
	assert!(covered.iter().all(|c| *c == 1));
}

#[test]
fn plugin_answers_requests() {
	let mut app = App::new();
	app.add_plugins(HierarchicalPathfindingPlugin)
		.init_resource::<Time>();
	let entity = app
		.world_mut()
		.spawn(PathfindingBundle::from_cell_grid(plateau()))
		.id();
	let options = PathOptions::new(true, false, false, false, false);
	app.world_mut().send_event(EventPathRequest::new(
		Vec3::ZERO,
		Vec3::new(4.0, 1.0, 4.0),
		options,
	));
	app.update();
	let cache = app.world().get::<PathCache>(entity).unwrap();
	let path = cache
		.get_path(NodeID::new(0), NodeID::new(24), options)
		.unwrap();
	assert!(path.get_nodes().contains(&NodeID::new(RAMP)));
}

#[test]
fn plugin_rebuilds_after_terrain_change() {
	let mut app = App::new();
	app.add_plugins(HierarchicalPathfindingPlugin)
		.init_resource::<Time>();
	let entity = app
		.world_mut()
		.spawn(PathfindingBundle::from_cell_grid(plateau()))
		.id();
	let options = PathOptions::default();
	app.world_mut().send_event(EventPathRequest::new(
		Vec3::ZERO,
		Vec3::new(4.0, 0.0, 0.0),
		options,
	));
	app.update();
	assert_eq!(1, app.world().get::<PathCache>(entity).unwrap().len());
	// raise the south-east corner
	app.world_mut().send_event(EventUpdateCellTerrain::new(
		CellCoordinates::new(4, 0),
		3,
		TopType::Flat,
		Ordinal::Zero,
	));
	app.update();
	assert!(app.world().get::<PathCache>(entity).unwrap().is_empty());
	let region_graph = app.world().get::<RegionGraph>(entity).unwrap();
	// the raised cell splits off the one north of it
	assert_eq!(5, region_graph.get_regions().len());
	let influence = app.world().get::<InfluenceMap>(entity).unwrap();
	assert_eq!(5, influence.get_influence_values().len());
}
