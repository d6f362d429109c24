//! Walking distance between every pair of regions, calculated once after
//! the [RegionGraph] is built and read by the [InfluenceMap].
//!
//! Distances are symmetric so only the upper triangle is stored, keyed by
//! `min * (last_id + 1) + max`:
//!
//! ```text
//!        0     1     2
//!  0  |  0  |  1  |  2  |
//!  1  |     |  4  |  5  |
//!  2  |     |     |  8  |
//! ```
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Lookup of the walking distance between any two regions
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct RegionDistances {
	/// Highest [RegionID] in the graph
	upper_bound: usize,
	/// Distance keyed by the pair of regions, [f32::INFINITY] when unreachable
	distances: BTreeMap<usize, f32>,
}

impl RegionDistances {
	/// Create a new instance of [RegionDistances] by searching between every
	/// pair of regions without jumping
	pub fn new(pathfinder: &mut Pathfinder) -> Self {
		let region_count = pathfinder.get_region_graph().get_regions().len();
		let upper_bound = region_count.saturating_sub(1);
		let mut distances = BTreeMap::new();
		for a in 0..region_count {
			for b in a + 1..region_count {
				let distance = pathfinder
					.find_region_path(RegionID::new(a), RegionID::new(b), false)
					.map(|path| path.get_total_distance())
					.unwrap_or(f32::INFINITY);
				distances.insert(key(a, b, upper_bound), distance);
			}
		}
		debug!(
			"Calculated distances between {} pairs of regions",
			distances.len()
		);
		RegionDistances {
			upper_bound,
			distances,
		}
	}
	/// Get the highest [RegionID] covered
	pub fn get_upper_bound(&self) -> usize {
		self.upper_bound
	}
	/// Get the walking distance between two regions, `0.0` from a region to
	/// itself and [f32::INFINITY] when unreachable or unknown
	pub fn get_path_distance(&self, a: RegionID, b: RegionID) -> f32 {
		if a == b {
			return 0.0;
		}
		self.distances
			.get(&key(a.get(), b.get(), self.upper_bound))
			.copied()
			.unwrap_or(f32::INFINITY)
	}
}

/// Key of an unordered pair of regions
fn key(a: usize, b: usize, upper_bound: usize) -> usize {
	a.min(b) * (upper_bound + 1) + a.max(b)
}
