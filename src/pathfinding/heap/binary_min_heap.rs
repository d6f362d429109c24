//! A min-heap over `(key, payload)` pairs stored in a 0-indexed array.
//!
//! For an element at index `i` its children sit at `2i + 1` and `2i + 2` and
//! its parent at `(i - 1) / 2`. Every parent key is less than or equal to the
//! keys of its children.
//!
//! ```text
//!            1
//!          /   \
//!         3     5
//!        / \   /
//!       6   7 8
//!
//! [1, 3, 5, 6, 7, 8]
//! ```
//!

use bevy::prelude::*;

/// An element of the heap
#[derive(Debug, Clone, PartialEq)]
pub struct HeapNode<T> {
	/// Ordering key, smallest is extracted first
	key: f32,
	/// Data associated with the key
	payload: T,
}

impl<T> HeapNode<T> {
	/// Create a new instance of [HeapNode]
	pub fn new(key: f32, payload: T) -> Self {
		HeapNode { key, payload }
	}
	/// Get the key
	pub fn get_key(&self) -> f32 {
		self.key
	}
	/// Get a reference to the payload
	pub fn get_payload(&self) -> &T {
		&self.payload
	}
	/// Consume the node returning the payload
	pub fn into_payload(self) -> T {
		self.payload
	}
}

/// Generic min-heap where the smallest key is always at the root
#[derive(Debug, Clone)]
pub struct BinaryMinHeap<T> {
	/// Array layout of the tree
	nodes: Vec<HeapNode<T>>,
}

impl<T> Default for BinaryMinHeap<T> {
	fn default() -> Self {
		BinaryMinHeap { nodes: Vec::new() }
	}
}

impl<T: PartialEq> BinaryMinHeap<T> {
	/// Create a new empty instance of [BinaryMinHeap]
	pub fn new() -> Self {
		BinaryMinHeap::default()
	}
	/// Create a heap able to hold `capacity` elements before reallocating
	pub fn with_capacity(capacity: usize) -> Self {
		BinaryMinHeap {
			nodes: Vec::with_capacity(capacity),
		}
	}
	/// Number of elements in the heap
	pub fn len(&self) -> usize {
		self.nodes.len()
	}
	/// Is the heap empty
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
	/// Get the array representation of the heap
	pub fn get(&self) -> &Vec<HeapNode<T>> {
		&self.nodes
	}
	/// Peek at the element with the smallest key
	pub fn peek(&self) -> Option<&HeapNode<T>> {
		self.nodes.first()
	}
	/// Add an element and sift it up until its parent key is no larger than its own
	pub fn insert(&mut self, key: f32, payload: T) {
		self.nodes.push(HeapNode::new(key, payload));
		let last = self.nodes.len() - 1;
		self.sift_up(last);
	}
	/// Remove and return the element with the smallest key.
	///
	/// The heap must not be empty, check [BinaryMinHeap::is_empty] first
	pub fn extract_root(&mut self) -> HeapNode<T> {
		if self.nodes.is_empty() {
			panic!("Cannot extract the root of an empty BinaryMinHeap");
		}
		let root = self.nodes.swap_remove(0);
		if !self.nodes.is_empty() {
			self.sift_down(0);
		}
		root
	}
	/// Find the element holding `payload` and move it to its new place in the
	/// heap based on `new_key`. Returns `false` if the payload is not in the heap
	pub fn change_key(&mut self, payload: &T, new_key: f32) -> bool {
		let Some(index) = self.nodes.iter().position(|n| n.payload == *payload) else {
			warn!("ChangeKey could not find the payload in the heap");
			return false;
		};
		let old_key = self.nodes[index].key;
		self.nodes[index].key = new_key;
		if new_key < old_key {
			self.sift_up(index);
		} else if new_key > old_key {
			self.sift_down(index);
		}
		true
	}
	/// Remove all elements while keeping the allocated capacity
	pub fn clear(&mut self) {
		self.nodes.clear();
	}
	/// Swap the element at `index` with its parent while it is smaller
	fn sift_up(&mut self, mut index: usize) {
		while index > 0 {
			let parent = (index - 1) / 2;
			if self.nodes[index].key < self.nodes[parent].key {
				self.nodes.swap(index, parent);
				index = parent;
			} else {
				break;
			}
		}
	}
	/// Swap the element at `index` with the smaller of its children while
	/// that child is smaller
	fn sift_down(&mut self, mut index: usize) {
		let len = self.nodes.len();
		loop {
			let left = 2 * index + 1;
			let right = left + 1;
			if left >= len {
				break;
			}
			let smallest_child = if right < len && self.nodes[right].key < self.nodes[left].key {
				right
			} else {
				left
			};
			if self.nodes[smallest_child].key < self.nodes[index].key {
				self.nodes.swap(index, smallest_child);
				index = smallest_child;
			} else {
				break;
			}
		}
	}
}
