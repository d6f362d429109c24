//! Portals are the coarse edges of the [RegionGraph]. Wherever two regions
//! touch along a run of cells a single [Portal] links them, positioned at
//! the middle of the run:
//!
//! ```text
//!  _________________________
//! |            |            |
//! |            |            |
//! |     0      P     1      |
//! |            |            |
//! |____________|____________|
//! ```
//!
//! Only the eastern and northern boundaries of each region are scanned, the
//! western and southern ones are covered by the neighbouring regions.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of a [Portal], its index in the [RegionGraph]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct PortalID(usize);

impl PortalID {
	/// Create a new instance of [PortalID]
	pub fn new(id: usize) -> Self {
		PortalID(id)
	}
	/// Get the index
	pub fn get(&self) -> usize {
		self.0
	}
}

/// Undirected link between two neighbouring regions
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
	/// ID of the portal
	id: PortalID,
	/// Crossing point between the regions
	position: Vec3,
	/// Region the boundary scan started from
	region_one: RegionID,
	/// Neighbouring region
	region_two: RegionID,
	/// Type of the first fine edge crossing the boundary
	edge_type: EdgeType,
	/// Distance from the centre of `region_one`, through the portal, to the centre of `region_two`
	cost: f32,
}

impl Portal {
	/// Create a new instance of [Portal], the cost is the walk from one region
	/// centre through the portal to the other centre
	pub fn new(
		id: PortalID,
		position: Vec3,
		region_one: &Region,
		region_two: &Region,
		edge_type: EdgeType,
	) -> Self {
		let cost = position.distance(region_one.get_centre())
			+ region_two.get_centre().distance(position);
		Portal {
			id,
			position,
			region_one: region_one.get_id(),
			region_two: region_two.get_id(),
			edge_type,
			cost,
		}
	}
	/// Get the [PortalID]
	pub fn get_id(&self) -> PortalID {
		self.id
	}
	/// Get the crossing point
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Get the first region
	pub fn get_region_one(&self) -> RegionID {
		self.region_one
	}
	/// Get the second region
	pub fn get_region_two(&self) -> RegionID {
		self.region_two
	}
	/// Get the [EdgeType] of the portal
	pub fn get_edge_type(&self) -> EdgeType {
		self.edge_type
	}
	/// Get the traversal cost
	pub fn get_cost(&self) -> f32 {
		self.cost
	}
	/// Get the region on the opposite side from `region`. Logs an error and
	/// returns [None] if the portal doesn't touch `region`
	pub fn other_region(&self, region: RegionID) -> Option<RegionID> {
		if region == self.region_one {
			Some(self.region_two)
		} else if region == self.region_two {
			Some(self.region_one)
		} else {
			error!(
				"Region {:?} is not linked by portal {:?}",
				region.get(),
				self.id.get()
			);
			None
		}
	}
}

/// Create the portals of every region, attaching each to both regions it links
pub(crate) fn calculate_all_region_portals(
	regions: &mut [Region],
	grid: &CellGrid,
	node_graph: &NodeGraph,
) -> Vec<Portal> {
	let mut portals = Vec::new();
	for i in 0..regions.len() {
		let right = regions[i].get_right_indices().clone();
		calculate_region_portals(i, &right, Ordinal::East, regions, grid, node_graph, &mut portals);
		let top = regions[i].get_top_indices().clone();
		calculate_region_portals(i, &top, Ordinal::North, regions, grid, node_graph, &mut portals);
	}
	portals
}

/// Walk a boundary of a region and create a portal for each run of cells
/// that share a neighbouring region
fn calculate_region_portals(
	region_index: usize,
	boundary: &[usize],
	direction: Ordinal,
	regions: &mut [Region],
	grid: &CellGrid,
	node_graph: &NodeGraph,
	portals: &mut Vec<Portal>,
) {
	// (neighbouring region, edge crossing the boundary)
	let mut crossings: Vec<(RegionID, EdgeID)> = Vec::with_capacity(boundary.len());
	for index in boundary.iter() {
		let cell = grid.get_cell_at_index(*index);
		let Some(neighbour) = grid.get_neighbour(cell.get_coordinates(), direction) else {
			// on the border of the grid
			break;
		};
		let Some(neighbour_region) = neighbour.get_region() else {
			warn!(
				"Cell {:?} has no region, cannot create a portal to it",
				neighbour.get_coordinates().get()
			);
			continue;
		};
		let one = NodeID::new(*index);
		let two = NodeID::new(grid.get_index(neighbour.get_coordinates()));
		match node_graph.find_edge(one, two) {
			Some(edge) => crossings.push((neighbour_region, edge)),
			None => error!(
				"No edge between neighbouring nodes {:?} and {:?}",
				one.get(),
				two.get()
			),
		}
	}
	for run in crossings.chunk_by(|a, b| a.0 == b.0) {
		let (neighbour_region, first) = run[0];
		let first_edge = node_graph.get_edge(first);
		let position = match run.last() {
			Some((_, last)) if run.len() > 1 => {
				(first_edge.get_position() + node_graph.get_edge(*last).get_position()) / 2.0
			}
			_ => first_edge.get_position(),
		};
		let id = PortalID::new(portals.len());
		let portal = Portal::new(
			id,
			position,
			&regions[region_index],
			&regions[neighbour_region.get()],
			first_edge.get_edge_type(),
		);
		portals.push(portal);
		regions[region_index].add_portal(id);
		regions[neighbour_region.get()].add_portal(id);
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn other_side() {
		let mut grid = CellGrid::from_cells(2, 1, vec![Cell::flat(0), Cell::flat(1)]);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		let portal = region_graph.get_portal(PortalID::new(0));
		assert_eq!(Some(RegionID::new(1)), portal.other_region(RegionID::new(0)));
		assert_eq!(Some(RegionID::new(0)), portal.other_region(RegionID::new(1)));
		assert_eq!(None, portal.other_region(RegionID::new(7)));
	}
	#[test]
	fn single_cell_portal() {
		// |0|1|
		let mut grid = CellGrid::from_cells(2, 1, vec![Cell::flat(0), Cell::flat(1)]);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		assert_eq!(1, region_graph.get_portals().len());
		let portal = region_graph.get_portal(PortalID::new(0));
		assert_eq!(Vec3::new(0.5, 1.0, 0.0), portal.get_position());
		assert_eq!(EdgeType::Elevated, portal.get_edge_type());
		// centres are (0, 0, 0) and (1, 1, 0)
		let actual = Vec3::new(0.5, 1.0, 0.0).length() + Vec3::new(0.5, 0.0, 0.0).length();
		assert!(approximately(actual, portal.get_cost()));
	}
	#[test]
	fn run_collapses_into_one_portal() {
		// |0|1|
		// |0|1|
		// |0|1|
		#[rustfmt::skip]
		let mut grid = CellGrid::from_cells(2, 3, vec![
			Cell::flat(0), Cell::flat(1),
			Cell::flat(0), Cell::flat(1),
			Cell::flat(0), Cell::flat(1),
		]);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		assert_eq!(2, region_graph.get_regions().len());
		assert_eq!(1, region_graph.get_portals().len());
		let result = region_graph.get_portal(PortalID::new(0)).get_position();
		let actual = Vec3::new(0.5, 1.0, 1.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn boundary_split_between_regions() {
		// the eastern boundary of region 0 touches two different regions
		// |0|2|
		// |0|1|
		#[rustfmt::skip]
		let mut grid = CellGrid::from_cells(2, 2, vec![
			Cell::flat(0), Cell::flat(1),
			Cell::flat(0), Cell::flat(2),
		]);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		assert_eq!(3, region_graph.get_regions().len());
		let region_zero = region_graph.get_region(RegionID::new(0));
		let neighbours: Vec<RegionID> = region_zero
			.get_portals()
			.iter()
			.filter_map(|p| region_graph.get_portal(*p).other_region(region_zero.get_id()))
			.collect();
		assert_eq!(vec![RegionID::new(1), RegionID::new(2)], neighbours);
	}
}
