//! Useful structures and tools shared by the grid, graphs and search
//!

use bevy::prelude::*;

/// Distance from the centre of a cell to any of its faces
pub const CELL_RADIUS: f32 = 0.5;
/// Distance between the centres of orthogonally adjacent cells (`CELL_RADIUS * 2`)
pub const CELL_OFFSET: f32 = 1.0;

/// Convenience way of describing the 8 directions of movement around a grid cell along with the facing of a sloped cell top.
///
/// The grid origin is the south-west corner, `North` points along increasing rows (`+z`) and `East` along increasing columns (`+x`)
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
	/// Special case, the facing of a cell top that has no slope
	#[default]
	Zero,
}

impl Ordinal {
	/// Returns the opposite [Ordinal] of the current
	pub fn inverse(&self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
			Ordinal::NorthEast => Ordinal::SouthWest,
			Ordinal::SouthEast => Ordinal::NorthWest,
			Ordinal::SouthWest => Ordinal::NorthEast,
			Ordinal::NorthWest => Ordinal::SouthEast,
			Ordinal::Zero => Ordinal::Zero,
		}
	}
	/// The `(column, row)` step taken when moving one cell in this direction
	pub fn offset(&self) -> (i32, i32) {
		match self {
			Ordinal::North => (0, 1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, -1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, 1),
			Ordinal::SouthEast => (1, -1),
			Ordinal::SouthWest => (-1, -1),
			Ordinal::NorthWest => (-1, 1),
			Ordinal::Zero => (0, 0),
		}
	}
	/// Is the direction one of the four diagonals
	pub fn is_diagonal(&self) -> bool {
		matches!(
			self,
			Ordinal::NorthEast | Ordinal::SouthEast | Ordinal::SouthWest | Ordinal::NorthWest
		)
	}
}

/// Cost of traversing an edge based on the direction it was created in.
///
/// The two diagonals default to slightly different costs
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCosts {
	/// Cost of a `West` or `South` edge
	cardinal: f32,
	/// Cost of a `SouthWest` edge
	south_west: f32,
	/// Cost of a `SouthEast` edge
	south_east: f32,
}

impl Default for EdgeCosts {
	fn default() -> Self {
		EdgeCosts {
			cardinal: 1.0,
			south_west: 1.4,
			south_east: 1.41,
		}
	}
}

impl EdgeCosts {
	/// Create a new instance of [EdgeCosts]
	pub fn new(cardinal: f32, south_west: f32, south_east: f32) -> Self {
		EdgeCosts {
			cardinal,
			south_west,
			south_east,
		}
	}
	/// Get the cost of moving along an edge created in `direction`
	pub fn get_cost(&self, direction: Ordinal) -> f32 {
		match direction {
			Ordinal::SouthEast => self.south_east,
			Ordinal::SouthWest => self.south_west,
			_ => self.cardinal,
		}
	}
}

/// Float comparison tolerant of accumulated rounding, scaled to the magnitude of the inputs
pub fn approximately(a: f32, b: f32) -> bool {
	(b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}
