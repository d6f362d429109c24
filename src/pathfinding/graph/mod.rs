//! Every [Cell] of the [CellGrid] has a matching [Node] and every pair of
//! neighbouring cells is joined by exactly one undirected [Edge].
//!
//! Edges are created while walking the grid row-major from the south-west
//! corner, each cell links back to the cells already visited:
//!
//! ```text
//!  _____________
//! |    |    |    |
//! |____|____|____|
//! |  W |cell|    |
//! |____|____|____|
//! | SW | S  | SE |
//! |____|____|____|
//! ```
//!
//! So moving `North`, `East`, `NorthEast` or `NorthWest` uses an edge that
//! was created in the inverse direction by the other node.
//!

pub mod edge;
pub mod edge_classification;

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of a [Node], matching the array index of its [Cell]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct NodeID(usize);

impl NodeID {
	/// Create a new instance of [NodeID]
	pub fn new(id: usize) -> Self {
		NodeID(id)
	}
	/// Get the index
	pub fn get(&self) -> usize {
		self.0
	}
}

/// A point of navigation at the centre of a cell
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
	/// ID of the node
	id: NodeID,
	/// Cell the node represents
	coordinates: CellCoordinates,
	/// Where an actor stands on the cell
	position: Vec3,
	/// Every edge touching the node, up to 8
	edges: Vec<EdgeID>,
}

impl Node {
	/// Create a new instance of [Node]
	fn new(id: NodeID, coordinates: CellCoordinates, position: Vec3) -> Self {
		Node {
			id,
			coordinates,
			position,
			edges: Vec::with_capacity(8),
		}
	}
	/// Get the [NodeID]
	pub fn get_id(&self) -> NodeID {
		self.id
	}
	/// Get the `(column, row)` of the cell the node represents
	pub fn get_coordinates(&self) -> CellCoordinates {
		self.coordinates
	}
	/// Get the world position
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Get the edges touching the node
	pub fn get_edges(&self) -> &Vec<EdgeID> {
		&self.edges
	}
}

/// Navigation graph of nodes and edges covering the whole [CellGrid]
#[derive(Component, Debug, Clone, Default)]
pub struct NodeGraph {
	/// Number of columns in the grid the graph was built from
	columns: usize,
	/// Number of rows in the grid the graph was built from
	rows: usize,
	/// One node per cell
	nodes: Vec<Node>,
	/// Every edge of the graph
	edges: Vec<Edge>,
	/// Costs applied to new edges
	edge_costs: EdgeCosts,
}

impl NodeGraph {
	/// Create a new instance of [NodeGraph] with the default [EdgeCosts]
	pub fn new(grid: &CellGrid) -> Self {
		NodeGraph::with_edge_costs(grid, EdgeCosts::default())
	}
	/// Create a new instance of [NodeGraph] with custom [EdgeCosts]
	pub fn with_edge_costs(grid: &CellGrid, edge_costs: EdgeCosts) -> Self {
		let columns = grid.get_columns();
		let rows = grid.get_rows();
		let mut graph = NodeGraph {
			columns,
			rows,
			nodes: Vec::with_capacity(grid.len()),
			edges: Vec::new(),
			edge_costs,
		};
		for (i, cell) in grid.get_cells().iter().enumerate() {
			graph.nodes.push(Node::new(
				NodeID::new(i),
				cell.get_coordinates(),
				cell.get_node_position(),
			));
			let coordinates = cell.get_coordinates();
			let column = coordinates.get_column();
			let row = coordinates.get_row();
			if column > 0 {
				graph.add_edge(grid, i, i - 1, Ordinal::West);
			}
			if row > 0 {
				graph.add_edge(grid, i, i - columns, Ordinal::South);
				if column > 0 {
					graph.add_edge(grid, i, i - (columns + 1), Ordinal::SouthWest);
				}
				if column < columns - 1 {
					graph.add_edge(grid, i, i - (columns - 1), Ordinal::SouthEast);
				}
			}
		}
		debug!(
			"Built NodeGraph of {} nodes and {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		graph
	}
	/// Create, classify and attach an edge to both of its nodes
	fn add_edge(&mut self, grid: &CellGrid, one: usize, two: usize, direction: Ordinal) {
		let id = EdgeID::new(self.edges.len());
		let mut edge = Edge::new(
			id,
			NodeID::new(one),
			NodeID::new(two),
			direction,
			self.edge_costs.get_cost(direction),
		);
		edge.recalculate(grid);
		self.edges.push(edge);
		self.nodes[one].edges.push(id);
		self.nodes[two].edges.push(id);
	}
	/// Get the number of columns of the grid
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	/// Get the number of rows of the grid
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Get every node
	pub fn get_nodes(&self) -> &Vec<Node> {
		&self.nodes
	}
	/// Get every edge
	pub fn get_edges(&self) -> &Vec<Edge> {
		&self.edges
	}
	/// Get a node. Panics if the ID doesn't belong to the graph
	pub fn get_node(&self, id: NodeID) -> &Node {
		&self.nodes[id.get()]
	}
	/// Get an edge. Panics if the ID doesn't belong to the graph
	pub fn get_edge(&self, id: EdgeID) -> &Edge {
		&self.edges[id.get()]
	}
	/// Get the node of a cell, [None] if outside of the grid
	pub fn get_node_at(&self, coordinates: CellCoordinates) -> Option<&Node> {
		if coordinates.get_column() < self.columns && coordinates.get_row() < self.rows {
			self.nodes
				.get(coordinates.get_column() + coordinates.get_row() * self.columns)
		} else {
			None
		}
	}
	/// Get the [EdgeCosts] of the graph
	pub fn get_edge_costs(&self) -> &EdgeCosts {
		&self.edge_costs
	}
	/// Find the edge joining two nodes, [None] if they aren't neighbours
	pub fn find_edge(&self, a: NodeID, b: NodeID) -> Option<EdgeID> {
		self.nodes.get(a.get())?.edges.iter().copied().find(|id| {
			let edge = &self.edges[id.get()];
			edge.contains(b) && a != b
		})
	}
	/// Refresh node positions and reclassify every edge after the terrain of
	/// the grid has changed. The grid must have the same dimensions
	pub fn recalculate_all_node_edges(&mut self, grid: &CellGrid) {
		if grid.get_columns() != self.columns || grid.get_rows() != self.rows {
			panic!(
				"NodeGraph of `({}, {})` cannot be recalculated from a grid of `({}, {})`",
				self.columns,
				self.rows,
				grid.get_columns(),
				grid.get_rows()
			);
		}
		for (node, cell) in self.nodes.iter_mut().zip(grid.get_cells().iter()) {
			node.position = cell.get_node_position();
		}
		for edge in self.edges.iter_mut() {
			edge.recalculate(grid);
		}
	}
}
