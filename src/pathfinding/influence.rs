//! An influence map spreads a value from a set of sources across the regions
//! of the grid, falling off with walking distance. It is a consumer of the
//! [RegionDistances] table.
//!
//! A region holding a source gains the full influence of that source, every
//! other reachable region gains `influence / (decay * distance + 1)`. The
//! summed values are clamped to `0..=1` and blended into the existing map by
//! `momentum` so the map eases toward the new state over several
//! propagations.
//!

use std::{collections::BTreeMap, time::Duration};

use crate::prelude::*;
use bevy::prelude::*;

/// Influence each source contributes to its own region
const INFLUENCE_PER_SOURCE: f32 = 0.25;
/// Lowest value of a region
const MIN_INFLUENCE: f32 = 0.0;
/// Highest value of a region
const MAX_INFLUENCE: f32 = 1.0;

/// Unique ID of something exerting influence
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct InfluenceSourceID(u64);

impl InfluenceSourceID {
	/// Create a new instance of [InfluenceSourceID]
	pub fn new(id: u64) -> Self {
		InfluenceSourceID(id)
	}
	/// Get the ID
	pub fn get(&self) -> u64 {
		self.0
	}
}

/// Per region influence values fed by a set of positioned sources
#[derive(Component, Debug, Clone)]
pub struct InfluenceMap {
	/// Influence of each region, indexed by [RegionID]
	values: Vec<f32>,
	/// Where each source currently is
	sources: BTreeMap<InfluenceSourceID, Vec3>,
	/// How far the map moves toward a new propagation, `0..=1`
	momentum: f32,
	/// Distance falloff constant, `0..=1`
	decay: f32,
	/// Time between propagations
	interval: Duration,
	/// Time accumulated since the last propagation
	elapsed: Duration,
}

impl Default for InfluenceMap {
	fn default() -> Self {
		InfluenceMap::new(0, 0.5, 0.5)
	}
}

impl InfluenceMap {
	/// Create a new instance of [InfluenceMap] with every region at `0.0`,
	/// propagating every half a second
	pub fn new(region_count: usize, momentum: f32, decay: f32) -> Self {
		InfluenceMap {
			values: vec![MIN_INFLUENCE; region_count],
			sources: BTreeMap::new(),
			momentum: momentum.clamp(0.0, 1.0),
			decay: decay.clamp(0.0, 1.0),
			interval: Duration::from_millis(500),
			elapsed: Duration::ZERO,
		}
	}
	/// Get the influence of every region
	pub fn get_influence_values(&self) -> &Vec<f32> {
		&self.values
	}
	/// Get the influence of a region, `0.0` if the region is unknown
	pub fn get_influence(&self, region: RegionID) -> f32 {
		self.values.get(region.get()).copied().unwrap_or(MIN_INFLUENCE)
	}
	/// Get the momentum
	pub fn get_momentum(&self) -> f32 {
		self.momentum
	}
	/// Set the momentum, clamped to `0..=1`
	pub fn set_momentum(&mut self, momentum: f32) {
		self.momentum = momentum.clamp(0.0, 1.0);
	}
	/// Get the decay
	pub fn get_decay(&self) -> f32 {
		self.decay
	}
	/// Set the decay, clamped to `0..=1`
	pub fn set_decay(&mut self, decay: f32) {
		self.decay = decay.clamp(0.0, 1.0);
	}
	/// Set how often [InfluenceMap::tick] reports a propagation is due
	pub fn set_interval(&mut self, interval: Duration) {
		self.interval = interval;
	}
	/// Add a source or move an existing one
	pub fn add_source(&mut self, id: InfluenceSourceID, position: Vec3) {
		self.sources.insert(id, position);
	}
	/// Remove a source, returns `false` if it wasn't present
	pub fn remove_source(&mut self, id: InfluenceSourceID) -> bool {
		self.sources.remove(&id).is_some()
	}
	/// Remove every source
	pub fn clear_sources(&mut self) {
		self.sources.clear();
	}
	/// Number of sources
	pub fn get_source_count(&self) -> usize {
		self.sources.len()
	}
	/// Discard all values and resize for a rebuilt [RegionGraph]
	pub fn reset(&mut self, region_count: usize) {
		self.values = vec![MIN_INFLUENCE; region_count];
	}
	/// Advance the propagation timer, `true` when a propagation is due
	pub fn tick(&mut self, delta: Duration) -> bool {
		self.elapsed += delta;
		if self.elapsed >= self.interval {
			self.elapsed = Duration::ZERO;
			true
		} else {
			false
		}
	}
	/// Spread the influence of every source across the regions
	pub fn propagate(&mut self, grid: &CellGrid, distances: &RegionDistances) {
		if self.sources.is_empty() {
			return;
		}
		let mut next = vec![MIN_INFLUENCE; self.values.len()];
		for position in self.sources.values() {
			let Some(source_region) = grid.get_cell_by_position(*position).get_region() else {
				warn!("Influence source at {:?} is not within a region", position);
				continue;
			};
			for (i, value) in next.iter_mut().enumerate() {
				if i == source_region.get() {
					*value += INFLUENCE_PER_SOURCE;
					continue;
				}
				let distance = distances.get_path_distance(source_region, RegionID::new(i));
				if distance.is_finite() {
					*value += INFLUENCE_PER_SOURCE / (self.decay * distance + 1.0);
				} else {
					*value = self.values[i];
				}
			}
		}
		for (current, target) in self.values.iter_mut().zip(next.iter()) {
			let target = target.clamp(MIN_INFLUENCE, MAX_INFLUENCE);
			*current += (target - *current) * self.momentum;
		}
		trace!("Propagated {} influence sources", self.sources.len());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	/// Grid of `|0|0E|1|` with its distance table
	fn ramp() -> (CellGrid, RegionDistances) {
		let mut grid = CellGrid::from_cells(
			3,
			1,
			vec![Cell::flat(0), Cell::slope(0, Ordinal::East), Cell::flat(1)],
		);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		let settings = PathfinderSettings::default();
		let distances = {
			let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
			RegionDistances::new(&mut pathfinder)
		};
		(grid, distances)
	}
	#[test]
	fn no_sources_no_change() {
		let (grid, distances) = ramp();
		let mut map = InfluenceMap::new(2, 0.5, 0.5);
		map.propagate(&grid, &distances);
		assert_eq!(&vec![0.0, 0.0], map.get_influence_values());
	}
	#[test]
	fn falloff_with_distance() {
		let (grid, distances) = ramp();
		let mut map = InfluenceMap::new(2, 0.5, 0.5);
		map.add_source(InfluenceSourceID::new(1), Vec3::ZERO);
		map.propagate(&grid, &distances);
		let d = distances.get_path_distance(RegionID::new(0), RegionID::new(1));
		let source = 0.25 * 0.5;
		let far = 0.25 / (0.5 * d + 1.0) * 0.5;
		assert!(approximately(source, map.get_influence(RegionID::new(0))));
		assert!(approximately(far, map.get_influence(RegionID::new(1))));
		assert!(map.get_influence(RegionID::new(1)) < map.get_influence(RegionID::new(0)));
	}
	#[test]
	fn clamped_to_one() {
		let (grid, distances) = ramp();
		let mut map = InfluenceMap::new(2, 1.0, 0.5);
		for i in 0..8 {
			map.add_source(InfluenceSourceID::new(i), Vec3::ZERO);
		}
		map.propagate(&grid, &distances);
		assert_eq!(1.0, map.get_influence(RegionID::new(0)));
	}
	#[test]
	fn unreachable_keeps_value() {
		// |0|3|
		let mut grid = CellGrid::from_cells(2, 1, vec![Cell::flat(0), Cell::flat(3)]);
		let node_graph = NodeGraph::new(&grid);
		let region_graph = RegionGraph::new(&mut grid, &node_graph);
		let settings = PathfinderSettings::default();
		let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
		let distances = RegionDistances::new(&mut pathfinder);
		let mut map = InfluenceMap::new(2, 1.0, 0.5);
		map.add_source(InfluenceSourceID::new(0), Vec3::new(1.0, 3.0, 0.0));
		map.propagate(&grid, &distances);
		assert_eq!(0.25, map.get_influence(RegionID::new(1)));
		map.remove_source(InfluenceSourceID::new(0));
		map.add_source(InfluenceSourceID::new(1), Vec3::ZERO);
		map.propagate(&grid, &distances);
		assert_eq!(0.25, map.get_influence(RegionID::new(1)));
		assert_eq!(0.25, map.get_influence(RegionID::new(0)));
	}
	#[test]
	fn tick_interval() {
		let mut map = InfluenceMap::default();
		assert!(!map.tick(Duration::from_millis(300)));
		assert!(map.tick(Duration::from_millis(300)));
		assert!(!map.tick(Duration::from_millis(100)));
	}
}
