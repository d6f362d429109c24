//! The open list of both the region and node searches is a priority queue
//! backed by a binary min-heap.
//!
//! Both are reused between searches, [BinaryMinHeap::clear] keeps the
//! allocation so that repeated pathfinding does not churn memory
//!

pub mod binary_min_heap;
pub mod priority_queue;
