//! Logic relating to [Path] generation
//!

use std::{collections::BTreeSet, time::Duration};

use crate::prelude::*;
use bevy::prelude::*;

/// Age at which a cached [Path] is purged
const MAX_PATH_AGE: Duration = Duration::from_secs(900);

/// A request to queue up an attempt at finding a [Path] from the source to
/// the target, the result is placed in the [PathCache]
#[derive(Event)]
pub struct EventPathRequest {
	/// World position of the actor
	source: Vec3,
	/// World position to find a path to
	target: Vec3,
	/// How to search and post-process
	options: PathOptions,
}

impl EventPathRequest {
	pub fn new(source: Vec3, target: Vec3, options: PathOptions) -> Self {
		EventPathRequest {
			source,
			target,
			options,
		}
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_source(&self) -> Vec3 {
		self.source
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_target(&self) -> Vec3 {
		self.target
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_options(&self) -> PathOptions {
		self.options
	}
}

/// Process [EventPathRequest] and insert any found [Path] into the [PathCache]
#[cfg(not(tarpaulin_include))]
pub fn process_path_requests(
	mut events: EventReader<EventPathRequest>,
	mut cache_q: Query<(
		&mut PathCache,
		&CellGrid,
		&NodeGraph,
		&RegionGraph,
		&PathfinderSettings,
	)>,
	time: Res<Time>,
) {
	let requests: Vec<&EventPathRequest> = events.read().collect();
	if requests.is_empty() {
		return;
	}
	for (mut cache, grid, node_graph, region_graph, settings) in cache_q.iter_mut() {
		let mut pathfinder = Pathfinder::new(grid, node_graph, region_graph, settings);
		let mut attempted = BTreeSet::new();
		for request in requests.iter() {
			let source = pathfinder.get_node_id(request.get_source());
			let target = pathfinder.get_node_id(request.get_target());
			let metadata =
				PathMetadata::new(source, target, request.get_options(), time.elapsed());
			// several actors may ask for the same journey, only search once
			if !is_new_request(&mut attempted, &cache, metadata) {
				continue;
			}
			match pathfinder.get_path(source, target, &request.get_options()) {
				Some(path) => {
					debug!("Path found with {} waypoints", path.len());
					cache.insert_path(metadata, path);
				}
				None => debug!(
					"No path from node {:?} to node {:?}",
					source.get(),
					target.get()
				),
			}
		}
	}
}

/// Record a request as attempted this tick, `false` if it has already been
/// searched for or its [Path] is cached
fn is_new_request(
	attempted: &mut BTreeSet<PathMetadata>,
	cache: &PathCache,
	metadata: PathMetadata,
) -> bool {
	!cache.contains(&metadata) && attempted.insert(metadata)
}

/// Purge any [Path]s older than 15 minutes
#[cfg(not(tarpaulin_include))]
pub fn cleanup_old_paths(mut q_path_cache: Query<&mut PathCache>, time: Res<Time>) {
	for mut cache in q_path_cache.iter_mut() {
		let purged = cache.remove_expired(time.elapsed(), MAX_PATH_AGE);
		if purged > 0 {
			trace!("Purged {} old paths", purged);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn repeated_request_searched_once() {
		let mut attempted = BTreeSet::new();
		let cache = PathCache::default();
		let options = PathOptions::default();
		let first = PathMetadata::new(NodeID::new(0), NodeID::new(9), options, Duration::ZERO);
		let later = PathMetadata::new(NodeID::new(0), NodeID::new(9), options, Duration::from_secs(2));
		assert!(is_new_request(&mut attempted, &cache, first));
		// an unreachable target leaves nothing in the cache
		assert!(!is_new_request(&mut attempted, &cache, later));
		let other = PathOptions::new(false, true, false, false, false);
		let jump = PathMetadata::new(NodeID::new(0), NodeID::new(9), other, Duration::ZERO);
		assert!(is_new_request(&mut attempted, &cache, jump));
	}
	#[test]
	fn cached_request_skipped() {
		let mut attempted = BTreeSet::new();
		let mut cache = PathCache::default();
		let metadata = PathMetadata::new(NodeID::new(1), NodeID::new(2), PathOptions::default(), Duration::ZERO);
		cache.insert_path(metadata, Path::new());
		let result = is_new_request(&mut attempted, &cache, metadata);
		assert!(!result);
		assert!(attempted.is_empty());
	}
}
