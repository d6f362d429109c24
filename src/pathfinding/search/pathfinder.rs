//! Two level A* over the [RegionGraph] and [NodeGraph].
//!
//! With a hierarchical search the regions between the start and goal are
//! found first, then the node search is only allowed to step onto cells of
//! those regions:
//!
//! ```text
//!  _______________________________
//! |       |       |       |       |
//! |   x   |   x   |   x   |   G   |
//! |_______|_______|_______|_______|
//! |       |       |       |       |
//! |   S   |       |       |       |
//! |_______|_______|_______|_______|
//! ```
//!
//! A found path can then be smoothed and have its redundant waypoints removed.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Multipliers that can be applied to the heuristic. `0` turns the search
/// into Dijkstra's algorithm, `2` makes it greedy
const HEURISTIC_WEIGHTS: [f32; 3] = [0.0, 1.0, 2.0];

/// What to do when a hierarchical search can't find a route between regions
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum HierarchicalFallback {
	/// No path is returned
	#[default]
	Propagate,
	/// Search the node graph without region pruning
	Unconstrained,
}

/// Toggles of a single path request
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Reflect)]
pub struct PathOptions {
	/// Search the regions first and prune the node search to them
	hierarchical: bool,
	/// Allow crossing [EdgeType::Elevated] edges and portals
	allow_jump: bool,
	/// Bias the search toward keeping the same direction
	penalise_deviation: bool,
	/// Fit a spline through the path
	smooth: bool,
	/// Remove waypoints in the middle of straight lines
	remove_collinear: bool,
}

impl PathOptions {
	/// Create a new instance of [PathOptions]
	pub fn new(
		hierarchical: bool,
		allow_jump: bool,
		penalise_deviation: bool,
		smooth: bool,
		remove_collinear: bool,
	) -> Self {
		PathOptions {
			hierarchical,
			allow_jump,
			penalise_deviation,
			smooth,
			remove_collinear,
		}
	}
	/// Is the region search used
	pub fn is_hierarchical(&self) -> bool {
		self.hierarchical
	}
	/// Can elevated edges be crossed
	pub fn is_jump_allowed(&self) -> bool {
		self.allow_jump
	}
	/// Are changes of direction penalised
	pub fn is_penalising_deviation(&self) -> bool {
		self.penalise_deviation
	}
	/// Is the path smoothed
	pub fn is_smoothed(&self) -> bool {
		self.smooth
	}
	/// Are collinear waypoints removed
	pub fn is_removing_collinear(&self) -> bool {
		self.remove_collinear
	}
}

/// Tunables of the [Pathfinder]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PathfinderSettings {
	/// Index into the heuristic weights `[0.0, 1.0, 2.0]`
	heuristic_weight_index: usize,
	/// Behaviour when a hierarchical search fails at the region level
	fallback: HierarchicalFallback,
}

impl Default for PathfinderSettings {
	fn default() -> Self {
		PathfinderSettings {
			heuristic_weight_index: 1,
			fallback: HierarchicalFallback::default(),
		}
	}
}

impl PathfinderSettings {
	/// Create a new instance of [PathfinderSettings]. Panics if `heuristic_weight_index` is greater than 2
	pub fn new(heuristic_weight_index: usize, fallback: HierarchicalFallback) -> Self {
		let mut settings = PathfinderSettings {
			heuristic_weight_index: 1,
			fallback,
		};
		settings.select_heuristic_weight(heuristic_weight_index);
		settings
	}
	/// Choose a heuristic weight, `0` for `0.0`, `1` for `1.0` and `2` for `2.0`. Panics with any other index
	pub fn select_heuristic_weight(&mut self, index: usize) {
		if index >= HEURISTIC_WEIGHTS.len() {
			panic!(
				"Heuristic weight index must be within 0..={}, found {}",
				HEURISTIC_WEIGHTS.len() - 1,
				index
			);
		}
		self.heuristic_weight_index = index;
	}
	/// Move to the next heuristic weight, wrapping to the first
	pub fn next_heuristic_weight(&mut self) {
		self.heuristic_weight_index = (self.heuristic_weight_index + 1) % HEURISTIC_WEIGHTS.len();
	}
	/// Move to the previous heuristic weight, wrapping to the last
	pub fn previous_heuristic_weight(&mut self) {
		self.heuristic_weight_index = match self.heuristic_weight_index {
			0 => HEURISTIC_WEIGHTS.len() - 1,
			i => i - 1,
		};
	}
	/// Get the index of the selected heuristic weight
	pub fn get_heuristic_weight_index(&self) -> usize {
		self.heuristic_weight_index
	}
	/// Get the heuristic weight applied to distance estimates
	pub fn get_heuristic_weight(&self) -> f32 {
		HEURISTIC_WEIGHTS[self.heuristic_weight_index].clamp(0.0, 2.0)
	}
	/// Get the [HierarchicalFallback]
	pub fn get_fallback(&self) -> HierarchicalFallback {
		self.fallback
	}
	/// Set the [HierarchicalFallback]
	pub fn set_fallback(&mut self, fallback: HierarchicalFallback) {
		self.fallback = fallback;
	}
}

/// Runs searches against a grid and its graphs. The graphs are only read,
/// all search state lives in the pathfinder so it can be reused across
/// many searches without allocating
pub struct Pathfinder<'a> {
	/// Grid the graphs were built from, used to find the region of a node
	grid: &'a CellGrid,
	/// Fine graph
	node_graph: &'a NodeGraph,
	/// Coarse graph
	region_graph: &'a RegionGraph,
	/// Multiplier of the distance estimate of discovered elements
	heuristic_weight: f32,
	/// Behaviour when the region search fails
	fallback: HierarchicalFallback,
	/// Per node search state
	node_context: SearchContext<EdgeID>,
	/// Per region search state, regions on the last found region path are [SearchStatus::OnPath]
	region_context: SearchContext<PortalID>,
	/// Open list of node indices
	node_open_list: PriorityQueue<usize>,
	/// Open list of region indices
	region_open_list: PriorityQueue<usize>,
}

impl<'a> Pathfinder<'a> {
	/// Create a new instance of [Pathfinder]
	pub fn new(
		grid: &'a CellGrid,
		node_graph: &'a NodeGraph,
		region_graph: &'a RegionGraph,
		settings: &PathfinderSettings,
	) -> Self {
		// no region is on a path until a region search succeeds
		let mut region_context = SearchContext::new();
		region_context.begin(region_graph.get_regions().len());
		Pathfinder {
			grid,
			node_graph,
			region_graph,
			heuristic_weight: settings.get_heuristic_weight(),
			fallback: settings.get_fallback(),
			node_context: SearchContext::new(),
			region_context,
			node_open_list: PriorityQueue::new(),
			region_open_list: PriorityQueue::new(),
		}
	}
	/// Get the [RegionGraph] being searched
	pub fn get_region_graph(&self) -> &RegionGraph {
		self.region_graph
	}
	/// Find the node nearest to a world position
	pub fn get_node_id(&self, position: Vec3) -> NodeID {
		let coordinates = self.grid.from_position(position);
		NodeID::new(self.grid.get_index(coordinates))
	}
	/// Region of the cell a node sits on
	fn region_of(&self, node: NodeID) -> Option<RegionID> {
		self.region_graph.get_region_of_node(node, self.grid)
	}
	/// Find a path between two nodes, optionally searching the regions first
	/// and post-processing the result. [None] when the goal is unreachable
	pub fn get_path(&mut self, start: NodeID, goal: NodeID, options: &PathOptions) -> Option<Path> {
		let mut hierarchical = options.is_hierarchical();
		if hierarchical {
			let region_path = match (self.region_of(start), self.region_of(goal)) {
				(Some(start_region), Some(goal_region)) => {
					self.find_region_path(start_region, goal_region, options.is_jump_allowed())
				}
				_ => {
					warn!("Nodes have not been assigned regions, the RegionGraph must be built before a hierarchical search");
					None
				}
			};
			if region_path.is_none() {
				match self.fallback {
					HierarchicalFallback::Propagate => {
						debug!(
							"No region path from node {:?} to node {:?}",
							start.get(),
							goal.get()
						);
						return None;
					}
					HierarchicalFallback::Unconstrained => {
						debug!("No region path, searching without regions");
						hierarchical = false;
					}
				}
			}
		}
		let mut path = self.find_path(
			start,
			goal,
			hierarchical,
			options.is_jump_allowed(),
			options.is_penalising_deviation(),
		)?;
		if options.is_smoothed() {
			path = smooth_path(&path);
		}
		if options.is_removing_collinear() {
			path = remove_collinear_points(&path);
		}
		Some(path)
	}
	/// A* over the [NodeGraph]. When `is_hierarchical` only nodes whose region
	/// is on the last found region path are explored
	pub fn find_path(
		&mut self,
		start: NodeID,
		goal: NodeID,
		is_hierarchical: bool,
		allow_jump: bool,
		penalise_deviation: bool,
	) -> Option<Path> {
		let graph = self.node_graph;
		self.node_context.begin(graph.get_nodes().len());
		self.node_open_list.clear();

		let goal_position = graph.get_node(goal).get_position();
		let start_h = graph.get_node(start).get_position().distance(goal_position);
		let record = self.node_context.get_mut(start.get());
		record.set_costs(0.0, start_h, start_h);
		record.set_status(SearchStatus::OpenList);
		self.node_open_list.enqueue(start.get(), start_h);

		while !self.node_open_list.is_empty() {
			let best = self.node_open_list.dequeue();
			if best == goal.get() {
				return Some(self.reconstruct_path(start, goal));
			}
			let best_id = NodeID::new(best);
			let best_record = self.node_context.get(best);
			let previous_direction = if penalise_deviation {
				match (best_record.get_parent(), best_record.get_parent_link()) {
					(Some(parent), Some(link)) => {
						graph.get_edge(link).direction_from(NodeID::new(parent))
					}
					_ => None,
				}
			} else {
				None
			};
			for edge_id in graph.get_node(best_id).get_edges().iter() {
				let edge = graph.get_edge(*edge_id);
				let Some(neighbour) = edge.other_node(best_id) else {
					panic!(
						"Edge {:?} is listed on node {:?} but doesn't touch it",
						edge_id.get(),
						best
					);
				};
				match edge.get_edge_type() {
					EdgeType::Inaccessible => continue,
					EdgeType::Elevated if !allow_jump => continue,
					_ => {}
				}
				if is_hierarchical {
					let on_path = self.region_of(neighbour).is_some_and(|region| {
						self.region_context.get_status(region.get()) == SearchStatus::OnPath
					});
					if !on_path {
						continue;
					}
				}
				let penalty = match previous_direction {
					Some(previous) if Some(previous) != edge.direction_from(best_id) => {
						edge.get_cost() * 0.5
					}
					_ => 0.0,
				};
				let g_cost = best_record.get_g_cost() + edge.get_cost();
				let neighbour_record = self.node_context.get(neighbour.get());
				match neighbour_record.get_status() {
					SearchStatus::None => {
						let h_cost = graph
							.get_node(neighbour)
							.get_position()
							.distance(goal_position)
							* self.heuristic_weight;
						let f_cost = g_cost + h_cost + penalty;
						let record = self.node_context.get_mut(neighbour.get());
						record.set_costs(g_cost, h_cost, f_cost);
						record.set_parent(Some(best), Some(*edge_id));
						record.set_status(SearchStatus::OpenList);
						self.node_open_list.enqueue(neighbour.get(), f_cost);
					}
					SearchStatus::OpenList => {
						let h_cost = neighbour_record.get_h_cost();
						let f_cost = g_cost + h_cost + penalty;
						if f_cost < neighbour_record.get_f_cost() {
							let record = self.node_context.get_mut(neighbour.get());
							record.set_costs(g_cost, h_cost, f_cost);
							record.set_parent(Some(best), Some(*edge_id));
							self.node_open_list.change_priority(&neighbour.get(), f_cost);
						}
					}
					_ => {}
				}
			}
			self.node_context.set_status(best, SearchStatus::ClosedList);
		}
		warn!(
			"Null path has been returned from node {:?} to node {:?}",
			start.get(),
			goal.get()
		);
		None
	}
	/// Walk parents back from the goal and build the path from the start
	fn reconstruct_path(&self, start: NodeID, goal: NodeID) -> Path {
		let graph = self.node_graph;
		let mut path = Path::new();
		let mut current = goal.get();
		while current != start.get() {
			path.add_point(PathPoint::from_node(graph.get_node(NodeID::new(current))));
			let record = self.node_context.get(current);
			let (Some(parent), Some(link)) = (record.get_parent(), record.get_parent_link()) else {
				panic!("Node {:?} was reached without a parent", current);
			};
			path.add_point(PathPoint::from_edge(graph.get_edge(link)));
			current = parent;
		}
		path.add_point(PathPoint::from_node(graph.get_node(start)));
		path.reverse();
		path
	}
	/// A* over the [RegionGraph] using the distance between region centres.
	/// Every region of a found path is marked [SearchStatus::OnPath] for a
	/// following hierarchical [Pathfinder::find_path]
	pub fn find_region_path(
		&mut self,
		start: RegionID,
		goal: RegionID,
		allow_jump: bool,
	) -> Option<RegionPath> {
		let graph = self.region_graph;
		self.region_context.begin(graph.get_regions().len());
		self.region_open_list.clear();

		let goal_centre = graph.get_region(goal).get_centre();
		let start_h = graph.get_region(start).get_centre().distance(goal_centre);
		let record = self.region_context.get_mut(start.get());
		record.set_costs(0.0, start_h, start_h);
		record.set_status(SearchStatus::OpenList);
		self.region_open_list.enqueue(start.get(), start_h);

		while !self.region_open_list.is_empty() {
			let best = self.region_open_list.dequeue();
			if best == goal.get() {
				return Some(self.reconstruct_region_path(start, goal));
			}
			let best_id = RegionID::new(best);
			let best_record = self.region_context.get(best);
			for portal_id in graph.get_region(best_id).get_portals().iter() {
				let portal = graph.get_portal(*portal_id);
				let Some(neighbour) = portal.other_region(best_id) else {
					panic!(
						"Portal {:?} is listed on region {:?} but doesn't touch it",
						portal_id.get(),
						best
					);
				};
				if portal.get_edge_type() == EdgeType::Elevated && !allow_jump {
					continue;
				}
				let g_cost = best_record.get_g_cost() + portal.get_cost();
				let neighbour_record = self.region_context.get(neighbour.get());
				match neighbour_record.get_status() {
					SearchStatus::None => {
						let h_cost = graph
							.get_region(neighbour)
							.get_centre()
							.distance(goal_centre)
							* self.heuristic_weight;
						let f_cost = g_cost + h_cost;
						let record = self.region_context.get_mut(neighbour.get());
						record.set_costs(g_cost, h_cost, f_cost);
						record.set_parent(Some(best), Some(*portal_id));
						record.set_status(SearchStatus::OpenList);
						self.region_open_list.enqueue(neighbour.get(), f_cost);
					}
					SearchStatus::OpenList => {
						let h_cost = neighbour_record.get_h_cost();
						let f_cost = g_cost + h_cost;
						if f_cost < neighbour_record.get_f_cost() {
							let record = self.region_context.get_mut(neighbour.get());
							record.set_costs(g_cost, h_cost, f_cost);
							record.set_parent(Some(best), Some(*portal_id));
							self.region_open_list.change_priority(&neighbour.get(), f_cost);
						}
					}
					_ => {}
				}
			}
			self.region_context.set_status(best, SearchStatus::ClosedList);
		}
		debug!(
			"No region path from region {:?} to region {:?}",
			start.get(),
			goal.get()
		);
		None
	}
	/// Walk parents back from the goal region, marking each region on the way
	fn reconstruct_region_path(&mut self, start: RegionID, goal: RegionID) -> RegionPath {
		let graph = self.region_graph;
		let mut path = RegionPath::new();
		let mut current = goal.get();
		while current != start.get() {
			path.add_point(RegionPathPoint::from_region(graph.get_region(RegionID::new(current))));
			let record = self.region_context.get(current);
			self.region_context.set_status(current, SearchStatus::OnPath);
			let (Some(parent), Some(link)) = (record.get_parent(), record.get_parent_link()) else {
				panic!("Region {:?} was reached without a parent", current);
			};
			path.add_point(RegionPathPoint::from_portal(graph.get_portal(link)));
			current = parent;
		}
		path.add_point(RegionPathPoint::from_region(graph.get_region(start)));
		self.region_context.set_status(start.get(), SearchStatus::OnPath);
		path.reverse();
		path
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	/// Grid, node graph and region graph from elevations listed north row first
	fn build(rows: Vec<Vec<u8>>) -> (CellGrid, NodeGraph, RegionGraph) {
		let columns = rows[0].len();
		let row_count = rows.len();
		let cells = rows.into_iter().rev().flatten().map(Cell::flat).collect();
		let mut grid = CellGrid::from_cells(columns, row_count, cells);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		(grid, node_graph, region_graph)
	}
	/// Build the graphs of an existing grid
	fn build_from(mut grid: CellGrid) -> (CellGrid, NodeGraph, RegionGraph) {
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		(grid, node_graph, region_graph)
	}
	#[test]
	fn diagonal_across_flat_grid() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 5]; 5]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(24), &PathOptions::default()).unwrap();
		let result = path.get_nodes();
		let actual = vec![
			NodeID::new(0),
			NodeID::new(6),
			NodeID::new(12),
			NodeID::new(18),
			NodeID::new(24),
		];
		assert_eq!(actual, result);
		// flat edges aren't waypoints
		assert_eq!(5, path.len());
	}
	#[test]
	fn dijkstra_matches() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 5]; 5]);
		let settings = PathfinderSettings::new(0, HierarchicalFallback::Propagate);
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(24), &PathOptions::default()).unwrap();
		let result = path.get_nodes().len();
		assert_eq!(5, result);
	}
	#[test]
	fn start_is_goal() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 3]; 3]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let path = pathfinder.get_path(NodeID::new(4), NodeID::new(4), &PathOptions::default()).unwrap();
		assert_eq!(vec![NodeID::new(4)], path.get_nodes());
	}
	#[test]
	fn jump_required() {
		// |0|1|
		let (grid, node_graph, region_graph) = build(vec![vec![0, 1]]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let walk = PathOptions::new(true, false, false, false, false);
		assert!(pathfinder.get_path(NodeID::new(0), NodeID::new(1), &walk).is_none());
		let jump = PathOptions::new(true, true, false, false, false);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(1), &jump).unwrap();
		// the jump is kept as a waypoint
		let result: Vec<PathPointType> = path.get_points().iter().map(|p| p.get_point_type()).collect();
		let actual = vec![PathPointType::Node, PathPointType::Edge, PathPointType::Node];
		assert_eq!(actual, result);
		assert_eq!(Some(EdgeType::Elevated), path.get_points()[1].get_edge_type());
	}
	#[test]
	fn inaccessible_never_crossed() {
		// a slope side on to the walk blocks the corridor even when jumping
		#[rustfmt::skip]
		let grid = CellGrid::from_cells(3, 1, vec![
			Cell::flat(0), Cell::slope(0, Ordinal::North), Cell::flat(0),
		]);
		let (grid, node_graph, region_graph) = build_from(grid);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let jump = PathOptions::new(false, true, false, false, false);
		assert!(pathfinder.get_path(NodeID::new(0), NodeID::new(2), &jump).is_none());
	}
	#[test]
	fn climb_a_ramp() {
		// |0|0E|1|
		#[rustfmt::skip]
		let grid = CellGrid::from_cells(3, 1, vec![
			Cell::flat(0), Cell::slope(0, Ordinal::East), Cell::flat(1),
		]);
		let (grid, node_graph, region_graph) = build_from(grid);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let walk = PathOptions::new(false, false, false, false, false);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(2), &walk).unwrap();
		let result: Vec<Option<EdgeType>> = path.get_points().iter().map(|p| p.get_edge_type()).collect();
		let actual = vec![
			None,
			Some(EdgeType::SlopeConnection),
			None,
			Some(EdgeType::SlopeConnection),
			None,
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn region_path_alternates() {
		#[rustfmt::skip]
		let (grid, node_graph, region_graph) = build(vec![
			vec![1, 1, 2, 2],
			vec![0, 0, 2, 2],
			vec![0, 0, 1, 1],
		]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let path = pathfinder.find_region_path(RegionID::new(0), RegionID::new(2), true).unwrap();
		let points = path.get_points();
		assert_eq!(Some(RegionID::new(0)), points[0].get_region());
		assert_eq!(Some(RegionID::new(2)), points[points.len() - 1].get_region());
		for (i, point) in points.iter().enumerate() {
			let expected = if i % 2 == 0 {
				RegionPathPointType::Region
			} else {
				RegionPathPointType::Portal
			};
			assert_eq!(expected, point.get_point_type());
		}
	}
	#[test]
	fn region_path_needs_jump() {
		let (grid, node_graph, region_graph) = build(vec![vec![0, 1]]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		assert!(pathfinder.find_region_path(RegionID::new(0), RegionID::new(1), false).is_none());
		assert!(pathfinder.find_region_path(RegionID::new(0), RegionID::new(1), true).is_some());
	}
	#[test]
	fn hierarchical_stays_in_corridor() {
		#[rustfmt::skip]
		let (grid, node_graph, region_graph) = build(vec![
			vec![1, 1, 2, 2],
			vec![0, 0, 2, 2],
			vec![0, 0, 1, 1],
		]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let options = PathOptions::new(true, true, false, false, false);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(11), &options).unwrap();
		let corridor = pathfinder
			.find_region_path(RegionID::new(0), RegionID::new(2), true)
			.unwrap()
			.get_regions();
		for node in path.get_nodes() {
			let region = grid.get_cell_at_index(node.get()).get_region().unwrap();
			assert!(corridor.contains(&region));
		}
	}
	#[test]
	fn fallback_to_unconstrained() {
		// the first edge along the boundary is a step so the portal needs a
		// jump, the ramp beside it doesn't
		// |0E|1|
		// |0 |1|
		#[rustfmt::skip]
		let grid = CellGrid::from_cells(2, 2, vec![
			Cell::flat(0), Cell::flat(1),
			Cell::slope(0, Ordinal::East), Cell::flat(1),
		]);
		let (grid, node_graph, region_graph) = build_from(grid);
		let options = PathOptions::new(true, false, false, false, false);

		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		assert!(pathfinder.get_path(NodeID::new(2), NodeID::new(3), &options).is_none());

		let settings = PathfinderSettings::new(1, HierarchicalFallback::Unconstrained);
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let path = pathfinder.get_path(NodeID::new(2), NodeID::new(3), &options).unwrap();
		assert_eq!(vec![NodeID::new(2), NodeID::new(3)], path.get_nodes());
	}
	#[test]
	fn deterministic() {
		#[rustfmt::skip]
		let (grid, node_graph, region_graph) = build(vec![
			vec![0, 2, 2, 1, 0],
			vec![0, 1, 2, 1, 1],
			vec![3, 3, 0, 0, 1],
			vec![3, 0, 0, 2, 2],
		]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let options = PathOptions::new(true, true, true, true, true);
		let first = pathfinder.get_path(NodeID::new(0), NodeID::new(19), &options);
		let second = pathfinder.get_path(NodeID::new(0), NodeID::new(19), &options);
		assert!(first.is_some());
		assert_eq!(first, second);
	}
	#[test]
	fn straight_when_penalised() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 5]; 3]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let options = PathOptions::new(false, false, true, false, false);
		let path = pathfinder.get_path(NodeID::new(5), NodeID::new(9), &options).unwrap();
		let result = path.get_nodes();
		let actual: Vec<NodeID> = (5..10).map(NodeID::new).collect();
		assert_eq!(actual, result);
	}
	#[test]
	fn penalty_only_in_f_cost() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 3]; 3]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		pathfinder.find_path(NodeID::new(0), NodeID::new(2), false, false, true).unwrap();
		// node 5 is first reached by turning north east off the eastward walk
		let record = pathfinder.node_context.get(5);
		assert_eq!(Some(1), record.get_parent());
		let turn = node_graph.get_edge(record.get_parent_link().unwrap()).get_cost();
		let result = record.get_g_cost();
		let actual = 1.0 + turn;
		assert!(approximately(actual, result));
		let result = record.get_f_cost();
		let actual = 1.0 + turn + record.get_h_cost() + turn * 0.5;
		assert!(approximately(actual, result));
		// moving straight on is never penalised
		let goal = pathfinder.node_context.get(2);
		assert!(approximately(2.0, goal.get_g_cost()));
		assert!(approximately(2.0, goal.get_f_cost()));
	}
	#[test]
	fn hierarchical_without_region_path() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 3]; 3]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		// no region search has marked a corridor yet
		let result = pathfinder.find_path(NodeID::new(0), NodeID::new(8), true, false, false);
		assert_eq!(None, result);
		assert!(pathfinder.find_path(NodeID::new(0), NodeID::new(8), false, false, false).is_some());
	}
	#[test]
	fn open_neighbour_needs_jump() {
		// node 7 is opened from 12 first, later node 1 offers a cheaper
		// diagonal to it which cuts between two raised cells
		#[rustfmt::skip]
		let (grid, node_graph, region_graph) = build(vec![
			vec![0, 0, 0, 1, 0],
			vec![0, 1, 0, 0, 0],
			vec![0, 0, 1, 0, 0],
		]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let path = pathfinder.find_path(NodeID::new(5), NodeID::new(14), false, false, false).unwrap();
		let result = path.get_nodes();
		let actual: Vec<NodeID> = [5, 10, 11, 12, 7, 8, 9, 14].into_iter().map(NodeID::new).collect();
		assert_eq!(actual, result);
		let record = pathfinder.node_context.get(7);
		assert_eq!(Some(12), record.get_parent());
		for index in 0..node_graph.get_nodes().len() {
			if let Some(link) = pathfinder.node_context.get(index).get_parent_link() {
				assert_ne!(EdgeType::Elevated, node_graph.get_edge(link).get_edge_type());
			}
		}
		// jumping over the raised cells is shorter
		let jump = pathfinder.find_path(NodeID::new(5), NodeID::new(14), false, true, false).unwrap();
		assert!(jump.get_nodes().len() < actual.len());
	}
	#[test]
	fn post_processed() {
		let (grid, node_graph, region_graph) = build(vec![vec![0; 5]; 5]);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let smooth = PathOptions::new(false, false, false, true, false);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(24), &smooth).unwrap();
		assert_eq!(17, path.len());
		let pruned = PathOptions::new(false, false, false, false, true);
		let path = pathfinder.get_path(NodeID::new(0), NodeID::new(24), &pruned).unwrap();
		assert_eq!(vec![NodeID::new(0), NodeID::new(24)], path.get_nodes());
	}
	#[test]
	fn cycle_heuristic_weights() {
		let mut settings = PathfinderSettings::default();
		settings.next_heuristic_weight();
		assert_eq!(2.0, settings.get_heuristic_weight());
		settings.next_heuristic_weight();
		assert_eq!(0.0, settings.get_heuristic_weight());
		settings.previous_heuristic_weight();
		assert_eq!(2.0, settings.get_heuristic_weight());
	}
	#[test]
	#[should_panic]
	fn heuristic_weight_out_of_range() {
		let mut settings = PathfinderSettings::default();
		settings.select_heuristic_weight(3);
	}
}
