//! A* bookkeeping is kept apart from the graphs. Each [Pathfinder] owns a
//! [SearchContext] per graph level holding one [SearchRecord] per node or
//! region, so the graphs themselves are never mutated by a search and can be
//! shared between any number of pathfinders.
//!
//! Starting a search doesn't touch the records, it bumps the generation of
//! the context instead. A record stamped with an older generation reads as
//! untouched.
//!

pub mod pathfinder;

/// Progress of a node or region within a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchStatus {
	/// Not yet discovered
	#[default]
	None,
	/// Discovered and waiting in the open list
	OpenList,
	/// Fully expanded
	ClosedList,
	/// Part of the found path
	OnPath,
}

/// Scratch state of a node or region during a search. `P` is the link the
/// element was reached through, an [EdgeID] or [PortalID]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRecord<P> {
	/// Progress within the search
	status: SearchStatus,
	/// Cost of the best known route from the start
	g_cost: f32,
	/// Estimated cost to the goal
	h_cost: f32,
	/// Priority within the open list
	f_cost: f32,
	/// Index of the element this one was reached from
	parent: Option<usize>,
	/// Link crossed when arriving from the parent
	parent_link: Option<P>,
	/// Search the record belongs to
	generation: u32,
}

impl<P> Default for SearchRecord<P> {
	fn default() -> Self {
		SearchRecord {
			status: SearchStatus::None,
			g_cost: 0.0,
			h_cost: 0.0,
			f_cost: 0.0,
			parent: None,
			parent_link: None,
			generation: 0,
		}
	}
}

impl<P: Copy> SearchRecord<P> {
	/// Get the [SearchStatus]
	pub fn get_status(&self) -> SearchStatus {
		self.status
	}
	/// Get the cost from the start
	pub fn get_g_cost(&self) -> f32 {
		self.g_cost
	}
	/// Get the estimated cost to the goal
	pub fn get_h_cost(&self) -> f32 {
		self.h_cost
	}
	/// Get the open list priority
	pub fn get_f_cost(&self) -> f32 {
		self.f_cost
	}
	/// Get the index of the parent
	pub fn get_parent(&self) -> Option<usize> {
		self.parent
	}
	/// Get the link crossed from the parent
	pub fn get_parent_link(&self) -> Option<P> {
		self.parent_link
	}
	/// Set the [SearchStatus]
	pub fn set_status(&mut self, status: SearchStatus) {
		self.status = status;
	}
	/// Record the costs of the element
	pub fn set_costs(&mut self, g_cost: f32, h_cost: f32, f_cost: f32) {
		self.g_cost = g_cost;
		self.h_cost = h_cost;
		self.f_cost = f_cost;
	}
	/// Record how the element was reached
	pub fn set_parent(&mut self, parent: Option<usize>, parent_link: Option<P>) {
		self.parent = parent;
		self.parent_link = parent_link;
	}
}

/// Arena of [SearchRecord]s indexed by node or region index, reset in
/// constant time between searches
#[derive(Debug, Clone)]
pub struct SearchContext<P> {
	/// One record per element of the graph being searched
	records: Vec<SearchRecord<P>>,
	/// Stamp of the current search
	generation: u32,
}

impl<P> Default for SearchContext<P> {
	fn default() -> Self {
		SearchContext {
			records: Vec::new(),
			generation: 0,
		}
	}
}

impl<P: Copy> SearchContext<P> {
	/// Create a new empty instance of [SearchContext]
	pub fn new() -> Self {
		SearchContext::default()
	}
	/// Start a new search over a graph of `size` elements, invalidating every
	/// record of the previous search
	pub fn begin(&mut self, size: usize) {
		if self.records.len() != size {
			self.records.resize_with(size, SearchRecord::default);
		}
		self.generation = self.generation.wrapping_add(1);
		if self.generation == 0 {
			// stamps have wrapped, old records could alias the new search
			for record in self.records.iter_mut() {
				record.generation = 0;
			}
			self.generation = 1;
		}
	}
	/// Number of records in the arena
	pub fn len(&self) -> usize {
		self.records.len()
	}
	/// Is the arena empty
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
	/// Get the record of an element, a fresh record if it hasn't been touched
	/// during the current search or lies outside the arena
	pub fn get(&self, index: usize) -> SearchRecord<P> {
		match self.records.get(index) {
			Some(record) if record.generation == self.generation => *record,
			_ => SearchRecord::default(),
		}
	}
	/// Get the [SearchStatus] of an element in the current search
	pub fn get_status(&self, index: usize) -> SearchStatus {
		self.get(index).status
	}
	/// Get a mutable record, claiming it for the current search. Panics if
	/// `index` is outside the arena
	pub fn get_mut(&mut self, index: usize) -> &mut SearchRecord<P> {
		let generation = self.generation;
		let record = &mut self.records[index];
		if record.generation != generation {
			*record = SearchRecord {
				generation,
				..SearchRecord::default()
			};
		}
		record
	}
	/// Set the [SearchStatus] of an element
	pub fn set_status(&mut self, index: usize, status: SearchStatus) {
		self.get_mut(index).set_status(status);
	}
}
