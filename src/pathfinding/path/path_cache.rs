//! Found paths stored against the request that produced them so that many
//! actors asking for the same journey share one search
//!

use std::{collections::BTreeMap, time::Duration};

use crate::prelude::*;
use bevy::prelude::*;

/// Describes the request a cached [Path] answers
#[derive(Clone, Copy, Debug, Reflect)]
pub struct PathMetadata {
	/// Node the path starts from
	source: NodeID,
	/// Node the path leads to
	target: NodeID,
	/// How the path was searched for and post-processed
	options: PathOptions,
	/// Marks the path based on time elapsed since app start, used to enable automatic cleardown of long lived paths that are probably not needed anymore
	time_generated: Duration,
}
// the age of a path doesn't make it a different request
impl PartialEq for PathMetadata {
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source && self.target == other.target && self.options == other.options
	}
}
impl Eq for PathMetadata {}

impl Ord for PathMetadata {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		(self.source, self.target, self.options).cmp(&(other.source, other.target, other.options))
	}
}

impl PartialOrd for PathMetadata {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PathMetadata {
	/// Create a new instance of [PathMetadata]
	pub fn new(source: NodeID, target: NodeID, options: PathOptions, time_generated: Duration) -> Self {
		PathMetadata {
			source,
			target,
			options,
			time_generated,
		}
	}
	/// Get the source node
	pub fn get_source(&self) -> NodeID {
		self.source
	}
	/// Get the target node
	pub fn get_target(&self) -> NodeID {
		self.target
	}
	/// Get the options the path was found with
	pub fn get_options(&self) -> PathOptions {
		self.options
	}
	/// Get when the path was generated
	pub fn get_time_generated(&self) -> Duration {
		self.time_generated
	}
}

/// Each key makes use of custom Ord and Eq implementations based on comparing `(source, target, options)` so a lookup doesn't need to know when the path was found
#[derive(Component, Default, Clone, Debug)]
pub struct PathCache {
	/// Paths keyed by the request
	paths: BTreeMap<PathMetadata, Path>,
}

impl PathCache {
	/// Get a reference to the map of paths
	pub fn get(&self) -> &BTreeMap<PathMetadata, Path> {
		&self.paths
	}
	/// Get a mutable reference to the map of paths
	pub fn get_mut(&mut self) -> &mut BTreeMap<PathMetadata, Path> {
		&mut self.paths
	}
	/// Get a cached [Path] if one exists
	pub fn get_path(&self, source: NodeID, target: NodeID, options: PathOptions) -> Option<&Path> {
		let path_data = PathMetadata::new(source, target, options, Duration::default());
		self.paths.get(&path_data)
	}
	/// Does the cache hold an answer to the request
	pub fn contains(&self, metadata: &PathMetadata) -> bool {
		self.paths.contains_key(metadata)
	}
	/// Insert a [Path], replacing any older answer to the same request
	pub fn insert_path(&mut self, metadata: PathMetadata, path: Path) {
		// replace the key too so the new generation time is kept
		self.paths.remove(&metadata);
		self.paths.insert(metadata, path);
	}
	/// Remove a [Path]
	pub fn remove_path(&mut self, metadata: PathMetadata) {
		self.paths.remove(&metadata);
	}
	/// Remove every [Path]
	pub fn clear(&mut self) {
		self.paths.clear();
	}
	/// Number of cached paths
	pub fn len(&self) -> usize {
		self.paths.len()
	}
	/// Is the cache empty
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}
	/// Remove every path generated more than `max_age` before `elapsed`,
	/// returns how many were removed
	pub fn remove_expired(&mut self, elapsed: Duration, max_age: Duration) -> usize {
		let before = self.paths.len();
		self.paths
			.retain(|metadata, _| elapsed.saturating_sub(metadata.get_time_generated()) <= max_age);
		before - self.paths.len()
	}
}
