//! The [RegionGraph] is a coarsening of the [NodeGraph]. The grid is split
//! into rectangles of cells sharing one elevation and neighbouring
//! rectangles are linked by [Portal]s.
//!
//! Decomposition scans the grid row-major from the south-west corner. Each
//! unassigned cell seeds a new region which grows north a row at a time, and
//! when it can't grow north it tries to grow east a column at a time:
//!
//! ```text
//!  elevations            regions
//!  _______________       _______________
//! | 1 | 1 | 2 | 2 |     | 3 | 3 | 2 | 2 |
//! | 0 | 0 | 2 | 2 |     | 0 | 0 | 2 | 2 |
//! | 0 | 0 | 1 | 1 |     | 0 | 0 | 1 | 1 |
//! ```
//!
//! The result is a deterministic partition though not necessarily the
//! smallest one.
//!

pub mod portals;
pub mod region_distances;

use crate::prelude::*;
use bevy::prelude::*;
use portals::calculate_all_region_portals;

/// Unique ID of a [Region], its index in the [RegionGraph]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct RegionID(usize);

impl RegionID {
	/// Create a new instance of [RegionID]
	pub fn new(id: usize) -> Self {
		RegionID(id)
	}
	/// Get the index
	pub fn get(&self) -> usize {
		self.0
	}
}

/// What the cells of a region have in common
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum RegionQualifier {
	#[default]
	None,
	/// All cells share one elevation
	Elevation,
}

/// A rectangle of cells with the same elevation
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
	/// ID of the region
	id: RegionID,
	/// Shared property of the cells
	qualifier: RegionQualifier,
	/// Elevation of every cell in the region
	elevation: u8,
	/// Midpoint between the south-west and north-east cells
	centre: Vec3,
	/// Array index of every member cell, the first is the south-west corner
	cell_indices: Vec<usize>,
	/// Northern row of cells, west to east
	top_indices: Vec<usize>,
	/// Eastern column of cells, south to north
	right_indices: Vec<usize>,
	/// Links to neighbouring regions
	portals: Vec<PortalID>,
}

impl Region {
	/// Get the [RegionID]
	pub fn get_id(&self) -> RegionID {
		self.id
	}
	/// Get the [RegionQualifier]
	pub fn get_qualifier(&self) -> RegionQualifier {
		self.qualifier
	}
	/// Get the shared elevation
	pub fn get_elevation(&self) -> u8 {
		self.elevation
	}
	/// Get the centre used for distance estimates
	pub fn get_centre(&self) -> Vec3 {
		self.centre
	}
	/// Get every member cell index
	pub fn get_cell_indices(&self) -> &Vec<usize> {
		&self.cell_indices
	}
	/// Get the northern row of cell indices
	pub fn get_top_indices(&self) -> &Vec<usize> {
		&self.top_indices
	}
	/// Get the eastern column of cell indices
	pub fn get_right_indices(&self) -> &Vec<usize> {
		&self.right_indices
	}
	/// Get the portals of the region
	pub fn get_portals(&self) -> &Vec<PortalID> {
		&self.portals
	}
	/// Attach a portal
	fn add_portal(&mut self, portal: PortalID) {
		self.portals.push(portal);
	}
}

/// Coarse graph of regions and the portals between them
#[derive(Component, Debug, Clone, Default)]
pub struct RegionGraph {
	/// Every region, indexed by [RegionID]
	regions: Vec<Region>,
	/// Every portal, indexed by [PortalID]
	portals: Vec<Portal>,
}

impl RegionGraph {
	/// Create a new instance of [RegionGraph], assigning each cell of the
	/// grid to its region
	pub fn new(grid: &mut CellGrid, node_graph: &NodeGraph) -> Self {
		let mut graph = RegionGraph::default();
		graph.rebuild(grid, node_graph);
		graph
	}
	/// Discard the regions and portals and decompose the grid again, used
	/// after the terrain has been edited and the [NodeGraph] recalculated
	pub fn rebuild(&mut self, grid: &mut CellGrid, node_graph: &NodeGraph) {
		grid.clear_regions();
		self.regions = segment_grid_by_elevation(grid);
		self.portals = calculate_all_region_portals(&mut self.regions, grid, node_graph);
		debug!(
			"Built RegionGraph of {} regions and {} portals",
			self.regions.len(),
			self.portals.len()
		);
	}
	/// Get every region
	pub fn get_regions(&self) -> &Vec<Region> {
		&self.regions
	}
	/// Get every portal
	pub fn get_portals(&self) -> &Vec<Portal> {
		&self.portals
	}
	/// Get a region. Panics if the ID doesn't belong to the graph
	pub fn get_region(&self, id: RegionID) -> &Region {
		&self.regions[id.get()]
	}
	/// Get a portal. Panics if the ID doesn't belong to the graph
	pub fn get_portal(&self, id: PortalID) -> &Portal {
		&self.portals[id.get()]
	}
	/// Find the region containing a world position
	pub fn get_region_id(&self, position: Vec3, grid: &CellGrid) -> Option<RegionID> {
		grid.get_cell_by_position(position).get_region()
	}
	/// Find the region of the cell that a node represents
	pub fn get_region_of_node(&self, node: NodeID, grid: &CellGrid) -> Option<RegionID> {
		grid.get_cells().get(node.get())?.get_region()
	}
}

/// Greedily partition the grid into rectangles of a single elevation
fn segment_grid_by_elevation(grid: &mut CellGrid) -> Vec<Region> {
	let columns = grid.get_columns();
	let mut regions: Vec<Region> = Vec::new();
	for seed in 0..grid.len() {
		if grid.get_cell_at_index(seed).get_region().is_some() {
			continue;
		}
		let id = RegionID::new(regions.len());
		let elevation = grid.get_cell_at_index(seed).get_elevation();
		grid.set_region(seed, id);
		let mut cell_indices = vec![seed];
		let mut top_indices = vec![seed];
		let mut right_indices = vec![seed];

		let mut can_north = can_expand_north(grid, &top_indices, elevation);
		let mut can_east = !can_north && can_expand_east(grid, &right_indices, elevation);
		while can_north || can_east {
			if can_north {
				top_indices = top_indices.iter().map(|i| i + columns).collect();
				for index in top_indices.iter() {
					grid.set_region(*index, id);
					cell_indices.push(*index);
				}
				if let Some(corner) = top_indices.last() {
					right_indices.push(*corner);
				}
				can_east = can_expand_east(grid, &right_indices, elevation);
			}
			if can_east {
				right_indices = right_indices.iter().map(|i| i + 1).collect();
				for index in right_indices.iter() {
					grid.set_region(*index, id);
					cell_indices.push(*index);
				}
				if let Some(corner) = right_indices.last() {
					top_indices.push(*corner);
				}
			}
			can_north = can_expand_north(grid, &top_indices, elevation);
			can_east = !can_north && can_expand_east(grid, &right_indices, elevation);
		}

		let south_west = grid.get_cell_at_index(seed).get_position();
		let centre = match top_indices.last() {
			Some(north_east) if cell_indices.len() > 1 => {
				(south_west + grid.get_cell_at_index(*north_east).get_position()) / 2.0
			}
			_ => south_west,
		};
		trace!("Region {:?} covers {} cells", id.get(), cell_indices.len());
		regions.push(Region {
			id,
			qualifier: RegionQualifier::Elevation,
			elevation,
			centre,
			cell_indices,
			top_indices,
			right_indices,
			portals: Vec::new(),
		});
	}
	regions
}

/// Can every cell of the northern frontier grow by one row. The row above
/// must be inside the grid, unassigned and at the region's elevation
fn can_expand_north(grid: &CellGrid, top_indices: &[usize], elevation: u8) -> bool {
	let Some(first) = top_indices.first() else {
		return false;
	};
	if grid.get_coordinates(*first).get_row() >= grid.get_rows() - 1 {
		return false;
	}
	top_indices.iter().all(|i| {
		let north = grid.get_cell_at_index(i + grid.get_columns());
		north.get_region().is_none() && north.get_elevation() == elevation
	})
}

/// Can every cell of the eastern frontier grow by one column. The column to
/// the east must be inside the grid, unassigned and at the region's elevation
fn can_expand_east(grid: &CellGrid, right_indices: &[usize], elevation: u8) -> bool {
	let Some(first) = right_indices.first() else {
		return false;
	};
	if grid.get_coordinates(*first).get_column() >= grid.get_columns() - 1 {
		return false;
	}
	right_indices.iter().all(|i| {
		let east = grid.get_cell_at_index(i + 1);
		east.get_region().is_none() && east.get_elevation() == elevation
	})
}
