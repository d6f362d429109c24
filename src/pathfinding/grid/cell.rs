//! A single tile of the grid
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of a cell, its `(column, row)` position in the grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct CellCoordinates((usize, usize));

impl CellCoordinates {
	/// Create a new instance of [CellCoordinates]
	pub fn new(column: usize, row: usize) -> Self {
		CellCoordinates((column, row))
	}
	/// Get the `(column, row)` tuple
	pub fn get(&self) -> (usize, usize) {
		self.0
	}
	/// Get the column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
}

/// Shape of the top surface of a cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum TopType {
	#[default]
	Flat,
	/// Rises by one elevation step toward the facing of the cell
	Slope,
	Corner,
}

/// A grid tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
	/// Position within the grid, assigned by the [CellGrid]
	#[cfg_attr(feature = "serde", serde(skip))]
	coordinates: CellCoordinates,
	/// Height of the base of the cell
	elevation: u8,
	/// Shape of the top surface
	top_type: TopType,
	/// Direction a slope rises toward, [Ordinal::Zero] for flat tops
	top_direction: Ordinal,
	/// Region the cell belongs to once the grid has been decomposed
	#[cfg_attr(feature = "serde", serde(skip))]
	region: Option<RegionID>,
}

impl Cell {
	/// Create a new instance of [Cell], the coordinates are assigned when it is placed in a [CellGrid]
	pub fn new(elevation: u8, top_type: TopType, top_direction: Ordinal) -> Self {
		validate_top(top_type, top_direction);
		Cell {
			coordinates: CellCoordinates::default(),
			elevation,
			top_type,
			top_direction,
			region: None,
		}
	}
	/// Create a flat topped [Cell]
	pub fn flat(elevation: u8) -> Self {
		Cell::new(elevation, TopType::Flat, Ordinal::Zero)
	}
	/// Create a sloped [Cell] rising toward `facing`
	pub fn slope(elevation: u8, facing: Ordinal) -> Self {
		Cell::new(elevation, TopType::Slope, facing)
	}
	/// Get the `(column, row)` of the cell
	pub fn get_coordinates(&self) -> CellCoordinates {
		self.coordinates
	}
	/// Set where the cell sits in the grid
	pub(crate) fn set_coordinates(&mut self, coordinates: CellCoordinates) {
		self.coordinates = coordinates;
	}
	/// Get the elevation
	pub fn get_elevation(&self) -> u8 {
		self.elevation
	}
	/// Get the top surface shape
	pub fn get_top_type(&self) -> TopType {
		self.top_type
	}
	/// Get the facing of the top surface
	pub fn get_top_direction(&self) -> Ordinal {
		self.top_direction
	}
	/// Get the region the cell belongs to, [None] until regions have been built
	pub fn get_region(&self) -> Option<RegionID> {
		self.region
	}
	/// Record the region the cell has been assigned to
	pub(crate) fn set_region(&mut self, region: Option<RegionID>) {
		self.region = region;
	}
	/// Change the terrain of the cell
	pub fn set_terrain(&mut self, elevation: u8, top_type: TopType, top_direction: Ordinal) {
		validate_top(top_type, top_direction);
		self.elevation = elevation;
		self.top_type = top_type;
		self.top_direction = top_direction;
	}
	/// Is the top of the cell a slope
	pub fn is_slope(&self) -> bool {
		self.top_type == TopType::Slope
	}
	/// World position of the centre of the cell base
	pub fn get_position(&self) -> Vec3 {
		Vec3::new(
			self.coordinates.get_column() as f32 * CELL_OFFSET,
			self.elevation as f32 * CELL_OFFSET,
			self.coordinates.get_row() as f32 * CELL_OFFSET,
		)
	}
	/// World position an actor stands at on this cell, half way up a slope
	pub fn get_node_position(&self) -> Vec3 {
		if self.is_slope() {
			self.get_position() + Vec3::new(0.0, CELL_RADIUS, 0.0)
		} else {
			self.get_position()
		}
	}
}

/// Slopes only rise toward the four cardinal directions
fn validate_top(top_type: TopType, top_direction: Ordinal) {
	if top_type == TopType::Slope
		&& !matches!(
			top_direction,
			Ordinal::North | Ordinal::East | Ordinal::South | Ordinal::West
		) {
		panic!(
			"A sloped cell must face a cardinal direction, found {:?}",
			top_direction
		);
	}
}
