//! Results of a search, ordered from the start to the goal.
//!
//! A [Path] interleaves the nodes walked through with the edges crossed
//! between them, though only edges an actor needs to react to are kept as
//! waypoints: a jump up an [EdgeType::Elevated] edge or the join of an
//! [EdgeType::SlopeConnection]. A [RegionPath] interleaves region centres
//! with the portals crossed between them.
//!

pub mod path_cache;
pub mod post_processing;

use crate::prelude::*;
use bevy::prelude::*;

/// What a [PathPoint] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PathPointType {
	/// Centre of a node
	Node,
	/// Crossing point of an edge
	Edge,
	/// Inserted by smoothing
	Curve,
}

/// A waypoint of a [Path]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
	/// What the point represents
	point_type: PathPointType,
	/// World position
	position: Vec3,
	/// The node of a [PathPointType::Node]
	node: Option<NodeID>,
	/// The edge of a [PathPointType::Edge] and its type
	edge: Option<(EdgeID, EdgeType)>,
}

impl PathPoint {
	/// Create a waypoint at the centre of a node
	pub fn from_node(node: &Node) -> Self {
		PathPoint {
			point_type: PathPointType::Node,
			position: node.get_position(),
			node: Some(node.get_id()),
			edge: None,
		}
	}
	/// Create a waypoint at the crossing point of an edge
	pub fn from_edge(edge: &Edge) -> Self {
		PathPoint {
			point_type: PathPointType::Edge,
			position: edge.get_position(),
			node: None,
			edge: Some((edge.get_id(), edge.get_edge_type())),
		}
	}
	/// Create a waypoint along a smoothed curve
	pub fn curve(position: Vec3) -> Self {
		PathPoint {
			point_type: PathPointType::Curve,
			position,
			node: None,
			edge: None,
		}
	}
	/// Get the [PathPointType]
	pub fn get_point_type(&self) -> PathPointType {
		self.point_type
	}
	/// Get the world position
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Get the node of a node waypoint
	pub fn get_node(&self) -> Option<NodeID> {
		self.node
	}
	/// Get the edge of an edge waypoint
	pub fn get_edge(&self) -> Option<EdgeID> {
		self.edge.map(|(id, _)| id)
	}
	/// Get the type of the edge of an edge waypoint
	pub fn get_edge_type(&self) -> Option<EdgeType> {
		self.edge.map(|(_, edge_type)| edge_type)
	}
}

/// Ordered waypoints for an actor to follow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
	/// Waypoints from the start to the goal
	points: Vec<PathPoint>,
}

impl Path {
	/// Create a new empty instance of [Path]
	pub fn new() -> Self {
		Path::default()
	}
	/// Append a waypoint. Edge waypoints are dropped unless the edge is
	/// [EdgeType::Elevated] or [EdgeType::SlopeConnection]
	pub fn add_point(&mut self, point: PathPoint) {
		if point.point_type == PathPointType::Edge
			&& !matches!(
				point.get_edge_type(),
				Some(EdgeType::Elevated) | Some(EdgeType::SlopeConnection)
			) {
			return;
		}
		self.points.push(point);
	}
	/// Get the waypoints
	pub fn get_points(&self) -> &Vec<PathPoint> {
		&self.points
	}
	/// Number of waypoints
	pub fn len(&self) -> usize {
		self.points.len()
	}
	/// Is the path empty
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
	/// Get the nodes walked through, in order
	pub fn get_nodes(&self) -> Vec<NodeID> {
		self.points.iter().filter_map(|p| p.node).collect()
	}
	/// Length of the polyline through every waypoint
	pub fn get_total_distance(&self) -> f32 {
		self.points
			.windows(2)
			.map(|pair| pair[0].position.distance(pair[1].position))
			.sum()
	}
	/// Flip the order of the waypoints
	pub(crate) fn reverse(&mut self) {
		self.points.reverse();
	}
}

/// What a [RegionPathPoint] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum RegionPathPointType {
	/// Centre of a region
	Region,
	/// A portal crossed between regions
	Portal,
}

/// A waypoint of a [RegionPath]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPathPoint {
	/// What the point represents
	point_type: RegionPathPointType,
	/// World position
	position: Vec3,
	/// The region of a [RegionPathPointType::Region]
	region: Option<RegionID>,
	/// The portal of a [RegionPathPointType::Portal]
	portal: Option<PortalID>,
}

impl RegionPathPoint {
	/// Create a waypoint at the centre of a region
	pub fn from_region(region: &Region) -> Self {
		RegionPathPoint {
			point_type: RegionPathPointType::Region,
			position: region.get_centre(),
			region: Some(region.get_id()),
			portal: None,
		}
	}
	/// Create a waypoint at a portal
	pub fn from_portal(portal: &Portal) -> Self {
		RegionPathPoint {
			point_type: RegionPathPointType::Portal,
			position: portal.get_position(),
			region: None,
			portal: Some(portal.get_id()),
		}
	}
	/// Get the [RegionPathPointType]
	pub fn get_point_type(&self) -> RegionPathPointType {
		self.point_type
	}
	/// Get the world position
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Get the region of a region waypoint
	pub fn get_region(&self) -> Option<RegionID> {
		self.region
	}
	/// Get the portal of a portal waypoint
	pub fn get_portal(&self) -> Option<PortalID> {
		self.portal
	}
}

/// Ordered regions and portals from a start region to a goal region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPath {
	/// Waypoints from the start to the goal
	points: Vec<RegionPathPoint>,
}

impl RegionPath {
	/// Create a new empty instance of [RegionPath]
	pub fn new() -> Self {
		RegionPath::default()
	}
	/// Append a waypoint
	pub fn add_point(&mut self, point: RegionPathPoint) {
		self.points.push(point);
	}
	/// Get the waypoints
	pub fn get_points(&self) -> &Vec<RegionPathPoint> {
		&self.points
	}
	/// Number of waypoints
	pub fn len(&self) -> usize {
		self.points.len()
	}
	/// Is the path empty
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
	/// Get the regions passed through, in order
	pub fn get_regions(&self) -> Vec<RegionID> {
		self.points.iter().filter_map(|p| p.region).collect()
	}
	/// Length of the polyline through every waypoint
	pub fn get_total_distance(&self) -> f32 {
		self.points
			.windows(2)
			.map(|pair| pair[0].position.distance(pair[1].position))
			.sum()
	}
	/// Flip the order of the waypoints
	pub(crate) fn reverse(&mut self) {
		self.points.reverse();
	}
}
