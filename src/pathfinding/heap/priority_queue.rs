//! Queue of payloads ordered by ascending priority
//!

use super::binary_min_heap::BinaryMinHeap;

/// Thin wrapper over a [BinaryMinHeap] exposing queue semantics, used as the
/// open list of a search
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
	/// Backing heap
	heap: BinaryMinHeap<T>,
}

impl<T> Default for PriorityQueue<T> {
	fn default() -> Self {
		PriorityQueue {
			heap: BinaryMinHeap::default(),
		}
	}
}

impl<T: PartialEq> PriorityQueue<T> {
	/// Create a new empty instance of [PriorityQueue]
	pub fn new() -> Self {
		PriorityQueue::default()
	}
	/// Add `payload` to the queue
	pub fn enqueue(&mut self, payload: T, priority: f32) {
		self.heap.insert(priority, payload);
	}
	/// Remove the payload with the lowest priority value. Panics if the queue is empty
	pub fn dequeue(&mut self) -> T {
		self.heap.extract_root().into_payload()
	}
	/// Reposition an already queued `payload`. Returns `false` if it isn't queued
	pub fn change_priority(&mut self, payload: &T, priority: f32) -> bool {
		self.heap.change_key(payload, priority)
	}
	/// Is the queue empty
	pub fn is_empty(&self) -> bool {
		self.heap.is_empty()
	}
	/// Number of queued payloads
	pub fn len(&self) -> usize {
		self.heap.len()
	}
	/// Empty the queue for reuse
	pub fn clear(&mut self) {
		self.heap.clear();
	}
}
