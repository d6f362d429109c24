//! A connection between two neighbouring [Node]s
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of an [Edge], its index in the [NodeGraph]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct EdgeID(usize);

impl EdgeID {
	/// Create a new instance of [EdgeID]
	pub fn new(id: usize) -> Self {
		EdgeID(id)
	}
	/// Get the index
	pub fn get(&self) -> usize {
		self.0
	}
}

/// An undirected link between two nodes. The `direction` is the authoritative
/// direction the edge was created in, always one of `West`, `South`,
/// `SouthWest` or `SouthEast` from `node_one`
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
	/// ID of the edge
	id: EdgeID,
	/// Node the edge was created from
	node_one: NodeID,
	/// Node the edge leads to
	node_two: NodeID,
	/// Direction from `node_one` to `node_two`
	direction: Ordinal,
	/// Traversal cost
	cost: f32,
	/// How the edge can be traversed
	edge_type: EdgeType,
	/// Point an actor crosses the edge at
	position: Vec3,
}

impl Edge {
	/// Create a new unclassified instance of [Edge]
	pub fn new(id: EdgeID, node_one: NodeID, node_two: NodeID, direction: Ordinal, cost: f32) -> Self {
		Edge {
			id,
			node_one,
			node_two,
			direction,
			cost,
			edge_type: EdgeType::None,
			position: Vec3::ZERO,
		}
	}
	/// Get the [EdgeID]
	pub fn get_id(&self) -> EdgeID {
		self.id
	}
	/// Get the node the edge was created from
	pub fn get_node_one(&self) -> NodeID {
		self.node_one
	}
	/// Get the node the edge leads to
	pub fn get_node_two(&self) -> NodeID {
		self.node_two
	}
	/// Get the direction from `node_one` to `node_two`
	pub fn get_direction(&self) -> Ordinal {
		self.direction
	}
	/// Get the traversal cost
	pub fn get_cost(&self) -> f32 {
		self.cost
	}
	/// Get the [EdgeType]
	pub fn get_edge_type(&self) -> EdgeType {
		self.edge_type
	}
	/// Get the crossing point
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Does the edge join `node`
	pub fn contains(&self, node: NodeID) -> bool {
		self.node_one == node || self.node_two == node
	}
	/// Get the opposite end of the edge from `node`. Logs an error and
	/// returns [None] if `node` is not an endpoint
	pub fn other_node(&self, node: NodeID) -> Option<NodeID> {
		if node == self.node_one {
			Some(self.node_two)
		} else if node == self.node_two {
			Some(self.node_one)
		} else {
			error!(
				"Node {:?} is not an endpoint of edge {:?}",
				node.get(),
				self.id.get()
			);
			None
		}
	}
	/// The direction of travel when crossing the edge from `node`, [None] if
	/// `node` is not an endpoint
	pub fn direction_from(&self, node: NodeID) -> Option<Ordinal> {
		if node == self.node_one {
			Some(self.direction)
		} else if node == self.node_two {
			Some(self.direction.inverse())
		} else {
			None
		}
	}
	/// Reclassify the edge from the current state of the grid
	pub fn recalculate(&mut self, grid: &CellGrid) {
		let one = grid.get_cell_at_index(self.node_one.get());
		let two = grid.get_cell_at_index(self.node_two.get());
		let context = EdgeContext::from_grid(grid, one, two, self.direction);
		let (edge_type, position) = classify_edge(&context);
		self.edge_type = edge_type;
		self.position = position;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn other_end() {
		let edge = Edge::new(EdgeID::new(0), NodeID::new(4), NodeID::new(3), Ordinal::West, 1.0);
		assert_eq!(Some(NodeID::new(3)), edge.other_node(NodeID::new(4)));
		assert_eq!(Some(NodeID::new(4)), edge.other_node(NodeID::new(3)));
	}
	#[test]
	fn other_end_of_unrelated_node() {
		let edge = Edge::new(EdgeID::new(0), NodeID::new(4), NodeID::new(3), Ordinal::West, 1.0);
		assert_eq!(None, edge.other_node(NodeID::new(9)));
	}
	#[test]
	fn direction_of_travel() {
		let edge = Edge::new(EdgeID::new(0), NodeID::new(4), NodeID::new(0), Ordinal::SouthWest, 1.4);
		assert_eq!(Some(Ordinal::SouthWest), edge.direction_from(NodeID::new(4)));
		assert_eq!(Some(Ordinal::NorthEast), edge.direction_from(NodeID::new(0)));
		assert_eq!(None, edge.direction_from(NodeID::new(1)));
	}
	#[test]
	fn recalculate_after_edit() {
		let mut grid = CellGrid::new(2, 1);
		let mut edge = Edge::new(EdgeID::new(0), NodeID::new(1), NodeID::new(0), Ordinal::West, 1.0);
		edge.recalculate(&grid);
		assert_eq!(EdgeType::Flat, edge.get_edge_type());
		grid.set_terrain(CellCoordinates::new(0, 0), 2, TopType::Flat, Ordinal::Zero);
		edge.recalculate(&grid);
		assert_eq!(EdgeType::Elevated, edge.get_edge_type());
		assert_eq!(Vec3::new(0.5, 2.0, 0.0), edge.get_position());
	}
}
