//! Deciding how an [Edge] between two cells can be traversed.
//!
//! Classification is a pure function of the two cells joined by the edge,
//! the direction of the edge from its first cell and, for diagonals, the two
//! cells sharing the corner that the diagonal cuts across:
//!
//! ```text
//!  SouthWest edge from `one`    SouthEast edge from `one`
//!   ______                        ______
//!  |side_|one_|                  |one_|side|
//!  |two__|south|                 |south|two|
//! ```
//!
//! Slopes rise toward their facing, a slope facing `North` is one elevation
//! step higher on its northern edge than on its southern edge.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// How an edge can be traversed
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EdgeType {
	/// Level ground on both sides
	#[default]
	Flat,
	/// Moving along a continuous slope
	Slope,
	/// A seamless join between a slope and its neighbour
	SlopeConnection,
	/// A vertical step that needs jumping
	Elevated,
	/// Cannot be walked
	Inaccessible,
	/// Not yet classified
	None,
}

/// The inputs to classifying an edge
#[derive(Debug, Clone, Copy)]
pub struct EdgeContext<'a> {
	/// Cell the edge was created from
	one: &'a Cell,
	/// Cell the edge leads to
	two: &'a Cell,
	/// Direction from `one` to `two`
	direction: Ordinal,
	/// For diagonal edges the cell south of `one`
	south: Option<&'a Cell>,
	/// For diagonal edges the cell west (`SouthWest`) or east (`SouthEast`) of `one`
	side: Option<&'a Cell>,
}

impl<'a> EdgeContext<'a> {
	/// Create a new instance of [EdgeContext]
	pub fn new(
		one: &'a Cell,
		two: &'a Cell,
		direction: Ordinal,
		south: Option<&'a Cell>,
		side: Option<&'a Cell>,
	) -> Self {
		EdgeContext {
			one,
			two,
			direction,
			south,
			side,
		}
	}
	/// Gather the cells needed to classify an edge of the grid
	pub fn from_grid(grid: &'a CellGrid, one: &'a Cell, two: &'a Cell, direction: Ordinal) -> Self {
		let (south, side) = if direction.is_diagonal() {
			let coordinates = one.get_coordinates();
			let side_ordinal = match direction {
				Ordinal::SouthWest => Ordinal::West,
				_ => Ordinal::East,
			};
			(
				grid.get_neighbour(coordinates, Ordinal::South),
				grid.get_neighbour(coordinates, side_ordinal),
			)
		} else {
			(None, None)
		};
		EdgeContext::new(one, two, direction, south, side)
	}
	/// Elevation difference of the two cells
	fn elevation_difference(&self) -> u8 {
		self.one.get_elevation().abs_diff(self.two.get_elevation())
	}
	/// Midpoint of the two cell positions
	fn average_position(&self) -> Vec3 {
		(self.one.get_position() + self.two.get_position()) / 2.0
	}
	/// The midpoint of the cells raised or lowered to `height` elevation steps
	fn at_height(&self, height: f32) -> Vec3 {
		let average = self.average_position();
		Vec3::new(average.x, height * CELL_OFFSET, average.z)
	}
	/// The midpoint of the cells lifted by `lift` above their mean height
	fn lifted(&self, lift: f32) -> Vec3 {
		self.average_position() + Vec3::new(0.0, lift, 0.0)
	}
	/// Half of the elevation difference, in whole steps
	fn half_difference(&self) -> f32 {
		(self.elevation_difference() / 2) as f32
	}
}

/// How the traversal direction lines up with the facing of a slope
#[derive(Debug, Clone, Copy, PartialEq)]
enum Alignment {
	/// Moving up or down the slope
	Collinear,
	/// Cardinal movement across the slope
	SideBySide,
	/// Diagonal movement across the slope
	Diagonal,
}

/// How the facings of two slopes relate
#[derive(Debug, Clone, Copy, PartialEq)]
enum FacingRelation {
	/// Both rise toward the same direction
	Same,
	/// They rise toward each other or away from each other
	Opposite,
	/// Facings at right angles
	Perpendicular,
}

/// Classify the edge and find the point an actor crosses it at
pub fn classify_edge(context: &EdgeContext) -> (EdgeType, Vec3) {
	let one = context.one;
	let two = context.two;
	match (one.get_top_type(), two.get_top_type()) {
		(TopType::Flat, TopType::Flat) => {
			if context.direction.is_diagonal() {
				flat_diagonal(context)
			} else {
				flat_cardinal(context)
			}
		}
		(TopType::Slope, TopType::Slope) => {
			let facing = one.get_top_direction();
			let relation = if facing == two.get_top_direction() {
				FacingRelation::Same
			} else if facing == two.get_top_direction().inverse() {
				FacingRelation::Opposite
			} else {
				FacingRelation::Perpendicular
			};
			slope_to_slope(context, relation, alignment(facing, context.direction))
		}
		(TopType::Slope, TopType::Flat) => slope_to_flat(context),
		(TopType::Flat, TopType::Slope) => flat_to_slope(context),
		_ => {
			let highest = one.get_elevation().max(two.get_elevation()) as f32 + 1.0;
			(EdgeType::Inaccessible, context.at_height(highest))
		}
	}
}

/// Find how `direction` relates to the facing of a slope
fn alignment(facing: Ordinal, direction: Ordinal) -> Alignment {
	if facing == direction || facing == direction.inverse() {
		Alignment::Collinear
	} else if direction.is_diagonal() {
		Alignment::Diagonal
	} else {
		Alignment::SideBySide
	}
}

/// Two flat cells sharing a side
fn flat_cardinal(context: &EdgeContext) -> (EdgeType, Vec3) {
	let e1 = context.one.get_elevation();
	let e2 = context.two.get_elevation();
	let edge_type = if e1 != e2 {
		EdgeType::Elevated
	} else {
		EdgeType::Flat
	};
	(edge_type, context.at_height(e1.max(e2) as f32))
}

/// Two flat cells sharing a corner, the cells either side of the corner
/// decide whether the surface is continuous
fn flat_diagonal(context: &EdgeContext) -> (EdgeType, Vec3) {
	let e1 = context.one.get_elevation();
	let e2 = context.two.get_elevation();
	let (Some(south), Some(side)) = (context.south, context.side) else {
		return (EdgeType::Inaccessible, context.at_height(e1.max(e2) as f32));
	};
	match (south.get_top_type(), side.get_top_type()) {
		(TopType::Flat, TopType::Flat) => {
			let elevations = [e1, e2, south.get_elevation(), side.get_elevation()];
			if elevations.iter().any(|e| *e != e1) {
				(EdgeType::Elevated, context.at_height(highest(&elevations)))
			} else {
				(EdgeType::Flat, context.at_height(e1 as f32))
			}
		}
		(TopType::Corner, _) | (_, TopType::Corner) => {
			let elevations = [e1, e2, south.get_elevation(), side.get_elevation()];
			(
				EdgeType::Inaccessible,
				context.at_height(highest(&elevations)),
			)
		}
		_ => {
			// the height of each neighbour at the corner the diagonal passes through
			let (side_low, south_low) = match context.direction {
				Ordinal::SouthWest => (
					[Ordinal::North, Ordinal::West],
					[Ordinal::East, Ordinal::South],
				),
				_ => (
					[Ordinal::North, Ordinal::East],
					[Ordinal::South, Ordinal::West],
				),
			};
			let side_corner = corner_elevation(side, &side_low);
			let south_corner = corner_elevation(south, &south_low);
			let elevations = [e1, e2, south_corner, side_corner];
			(
				EdgeType::Inaccessible,
				context.at_height(highest(&elevations)),
			)
		}
	}
}

/// Elevation of a cell at a shared corner, a slope is at its base when its
/// facing is one of `low_facings` and at its crest otherwise
fn corner_elevation(cell: &Cell, low_facings: &[Ordinal]) -> u8 {
	if cell.is_slope() && !low_facings.contains(&cell.get_top_direction()) {
		cell.get_elevation().saturating_add(1)
	} else {
		cell.get_elevation()
	}
}

/// Highest elevation of a set
fn highest(elevations: &[u8]) -> f32 {
	elevations.iter().copied().max().unwrap_or_default() as f32
}

/// Two sloped cells
fn slope_to_slope(
	context: &EdgeContext,
	relation: FacingRelation,
	alignment: Alignment,
) -> (EdgeType, Vec3) {
	let diff = context.elevation_difference();
	let half = context.half_difference();
	match (relation, alignment) {
		(FacingRelation::Same, Alignment::Collinear) => match diff {
			0 => (EdgeType::Elevated, context.lifted(CELL_OFFSET)),
			1 => (EdgeType::Slope, context.lifted(CELL_RADIUS)),
			_ => (EdgeType::Elevated, context.lifted(half)),
		},
		(FacingRelation::Same, Alignment::SideBySide) => {
			let edge_type = if diff == 0 {
				EdgeType::Slope
			} else {
				EdgeType::Elevated
			};
			(edge_type, context.lifted(half + CELL_RADIUS))
		}
		(FacingRelation::Same, Alignment::Diagonal) => {
			let descending =
				diff == 1 && context.one.get_elevation() > context.two.get_elevation();
			let edge_type = if descending {
				EdgeType::Slope
			} else {
				EdgeType::Elevated
			};
			(edge_type, context.lifted(half))
		}
		(FacingRelation::Opposite, Alignment::Collinear)
		| (FacingRelation::Opposite, Alignment::Diagonal) => {
			let edge_type = if diff == 0 {
				EdgeType::SlopeConnection
			} else {
				EdgeType::Elevated
			};
			(edge_type, context.lifted(half + CELL_OFFSET))
		}
		(FacingRelation::Opposite, Alignment::SideBySide) | (FacingRelation::Perpendicular, _) => {
			(EdgeType::Inaccessible, context.lifted(half + CELL_RADIUS))
		}
	}
}

/// A sloped cell leading onto a flat cell
fn slope_to_flat(context: &EdgeContext) -> (EdgeType, Vec3) {
	let e1 = context.one.get_elevation();
	let e2 = context.two.get_elevation();
	let diff = context.elevation_difference();
	let facing = context.one.get_top_direction();
	let direction = context.direction;
	if direction.is_diagonal() {
		let (Some(south), Some(side)) = (context.south, context.side) else {
			return (EdgeType::Inaccessible, context.at_height(e1.saturating_add(1).max(e2) as f32));
		};
		if south.get_top_type() != TopType::Flat || side.get_top_type() != TopType::Flat {
			return (EdgeType::Inaccessible, context.at_height(e1.saturating_add(1).max(e2) as f32));
		}
		let low = match direction {
			Ordinal::SouthWest => [Ordinal::North, Ordinal::East],
			_ => [Ordinal::North, Ordinal::West],
		};
		let elevations = [
			corner_elevation(context.one, &low),
			e2,
			south.get_elevation(),
			side.get_elevation(),
		];
		return (
			EdgeType::Inaccessible,
			context.at_height(highest(&elevations)),
		);
	}
	if facing == direction {
		// the crest of the slope meets the flat cell
		let edge_type = if diff == 1 && e1 < e2 {
			EdgeType::SlopeConnection
		} else {
			EdgeType::Elevated
		};
		(edge_type, context.at_height(e1.saturating_add(1).max(e2) as f32))
	} else if facing == direction.inverse() {
		// the base of the slope meets the flat cell
		let edge_type = if diff == 0 {
			EdgeType::SlopeConnection
		} else {
			EdgeType::Elevated
		};
		(edge_type, context.at_height(e1.max(e2) as f32))
	} else {
		(
			EdgeType::Inaccessible,
			context.at_height((e1 as f32 + 0.5).max(e2 as f32)),
		)
	}
}

/// A flat cell leading onto a sloped cell
fn flat_to_slope(context: &EdgeContext) -> (EdgeType, Vec3) {
	let e1 = context.one.get_elevation();
	let e2 = context.two.get_elevation();
	let diff = context.elevation_difference();
	let facing = context.two.get_top_direction();
	let direction = context.direction;
	if direction.is_diagonal() {
		return (EdgeType::Inaccessible, context.at_height(e1.max(e2.saturating_add(1)) as f32));
	}
	if direction == facing.inverse() {
		// the crest of the slope meets the flat cell
		let edge_type = if diff == 1 && e1 > e2 {
			EdgeType::SlopeConnection
		} else {
			EdgeType::Elevated
		};
		(edge_type, context.at_height(e1.max(e2.saturating_add(1)) as f32))
	} else if direction == facing {
		// the base of the slope meets the flat cell
		let edge_type = if (diff == 1 && e1 < e2) || diff == 0 {
			EdgeType::SlopeConnection
		} else {
			EdgeType::Elevated
		};
		(edge_type, context.at_height(e1.max(e2) as f32))
	} else {
		(
			EdgeType::Inaccessible,
			context.at_height((e1 as f32).max(e2 as f32 + 0.5)),
		)
	}
}
