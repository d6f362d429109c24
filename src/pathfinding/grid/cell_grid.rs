//! The complete set of cells making up the world along with methods of
//! loading one from disk
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A `columns x rows` grid of [Cell]s stored row-major from the south-west corner
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Debug, Clone, Default)]
pub struct CellGrid {
	/// Number of cells along the `x` axis
	columns: usize,
	/// Number of cells along the `z` axis
	rows: usize,
	/// Every cell, index is `column + row * columns`
	cells: Vec<Cell>,
}

impl CellGrid {
	/// Create a new instance of [CellGrid] where every cell is flat at elevation `0`
	pub fn new(columns: usize, rows: usize) -> Self {
		CellGrid::from_cells(columns, rows, vec![Cell::flat(0); columns * rows])
	}
	/// Create a [CellGrid] from a list of cells ordered row-major from the south-west corner
	pub fn from_cells(columns: usize, rows: usize, cells: Vec<Cell>) -> Self {
		let mut grid = CellGrid {
			columns,
			rows,
			cells,
		};
		grid.assign_coordinates();
		grid
	}
	/// Validate the dimensions and stamp each cell with its position
	fn assign_coordinates(&mut self) {
		if self.columns == 0 || self.rows == 0 {
			panic!(
				"Grid dimensions `({}, {})` must both be greater than zero",
				self.columns, self.rows
			);
		}
		if self.cells.len() != self.columns * self.rows {
			panic!(
				"Grid of `({}, {})` requires {} cells, found {}",
				self.columns,
				self.rows,
				self.columns * self.rows,
				self.cells.len()
			);
		}
		let columns = self.columns;
		for (i, cell) in self.cells.iter_mut().enumerate() {
			cell.set_coordinates(CellCoordinates::new(i % columns, i / columns));
		}
	}
	/// Get the number of columns
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	/// Get the number of rows
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Get every cell
	pub fn get_cells(&self) -> &Vec<Cell> {
		&self.cells
	}
	/// Total number of cells
	pub fn len(&self) -> usize {
		self.cells.len()
	}
	/// A grid always has cells once constructed, a [Default] one does not
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
	/// Is the `(column, row)` inside the grid
	pub fn contains(&self, coordinates: CellCoordinates) -> bool {
		coordinates.get_column() < self.columns && coordinates.get_row() < self.rows
	}
	/// Get the array index of a cell
	pub fn get_index(&self, coordinates: CellCoordinates) -> usize {
		coordinates.get_column() + coordinates.get_row() * self.columns
	}
	/// Get the `(column, row)` of an array index
	pub fn get_coordinates(&self, index: usize) -> CellCoordinates {
		CellCoordinates::new(index % self.columns, index / self.columns)
	}
	/// Get a cell, [None] if outside of the grid
	pub fn get_cell(&self, coordinates: CellCoordinates) -> Option<&Cell> {
		if self.contains(coordinates) {
			self.cells.get(self.get_index(coordinates))
		} else {
			None
		}
	}
	/// Get a cell by its array index
	pub fn get_cell_at_index(&self, index: usize) -> &Cell {
		&self.cells[index]
	}
	/// Get the neighbour of a cell in the given direction, [None] at the border of the grid
	pub fn get_neighbour(&self, coordinates: CellCoordinates, ordinal: Ordinal) -> Option<&Cell> {
		if ordinal == Ordinal::Zero {
			return None;
		}
		let (column_step, row_step) = ordinal.offset();
		let column = coordinates.get_column().checked_add_signed(column_step as isize)?;
		let row = coordinates.get_row().checked_add_signed(row_step as isize)?;
		self.get_cell(CellCoordinates::new(column, row))
	}
	/// Find the `(column, row)` nearest to a world position, positions outside
	/// of the grid are clamped to its border
	pub fn from_position(&self, position: Vec3) -> CellCoordinates {
		let column = (position.x / (CELL_RADIUS * 2.0)).round().max(0.0) as usize;
		let row = (position.z / (CELL_RADIUS * 2.0)).round().max(0.0) as usize;
		CellCoordinates::new(column.min(self.columns - 1), row.min(self.rows - 1))
	}
	/// Get the cell nearest to a world position
	pub fn get_cell_by_position(&self, position: Vec3) -> &Cell {
		let coordinates = self.from_position(position);
		&self.cells[self.get_index(coordinates)]
	}
	/// Change the terrain of a cell. Returns `false` if the cell is outside of the grid.
	///
	/// The [NodeGraph] and [RegionGraph] built from this grid are stale until recalculated
	pub fn set_terrain(
		&mut self,
		coordinates: CellCoordinates,
		elevation: u8,
		top_type: TopType,
		top_direction: Ordinal,
	) -> bool {
		if !self.contains(coordinates) {
			warn!(
				"Cannot edit terrain of {:?}, it is outside of the grid",
				coordinates.get()
			);
			return false;
		}
		let index = self.get_index(coordinates);
		self.cells[index].set_terrain(elevation, top_type, top_direction);
		true
	}
	/// Assign a region to the cell at `index`
	pub(crate) fn set_region(&mut self, index: usize, region: RegionID) {
		self.cells[index].set_region(Some(region));
	}
	/// Remove all region assignments
	pub(crate) fn clear_regions(&mut self) {
		for cell in self.cells.iter_mut() {
			cell.set_region(None);
		}
	}
	/// From a `ron` file generate the [CellGrid]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: String) -> Self {
		let file = std::fs::File::open(path).expect("Failed opening CellGrid file");
		let mut grid: CellGrid = match ron::de::from_reader(file) {
			Ok(grid) => grid,
			Err(e) => panic!("Failed deserializing CellGrid: {}", e),
		};
		grid.assign_coordinates();
		grid
	}
	/// From a CSV of elevations generate the [CellGrid]. The first line of
	/// the file is the northern-most row. A value is either an elevation for
	/// a flat cell or an elevation followed by `N`, `E`, `S` or `W` for a
	/// slope rising in that direction
	#[cfg(feature = "csv")]
	pub fn from_csv(path: String) -> Self {
		let data = std::fs::File::open(path).expect("Failed opening csv");
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(data);
		let mut lines: Vec<Vec<Cell>> = Vec::new();
		for record in rdr.records() {
			let record = record.expect("Failed reading csv record");
			lines.push(record.iter().map(parse_csv_cell).collect());
		}
		let rows = lines.len();
		let columns = lines.first().map(|l| l.len()).unwrap_or(0);
		if lines.iter().any(|l| l.len() != columns) {
			panic!("Every line of the csv must contain {} values", columns);
		}
		// file runs north to south, the grid south to north
		let cells = lines.into_iter().rev().flatten().collect();
		CellGrid::from_cells(columns, rows, cells)
	}
	/// Create a [CellGrid] of flat cells from a greyscale image where each
	/// pixel is a cell. White is `max_elevation` and black is `0`, the top row
	/// of pixels is the northern-most row
	#[cfg(feature = "heightmap")]
	pub fn from_heightmap(path: String, max_elevation: u8) -> Self {
		use photon_rs::native::open_image;
		let img = open_image(&path).expect("Failed to open heightmap");
		let columns = img.get_width() as usize;
		let rows = img.get_height() as usize;
		let raw_pixels = img.get_raw_pixels();
		// raw pixels are arranged from the top left of the image and come in
		// sets of either 3 or 4 (if the alpha channel is included)
		let chunk_size = if columns * rows * 4 == raw_pixels.len() {
			4
		} else {
			3
		};
		let mut lines: Vec<Vec<Cell>> = Vec::new();
		for line in raw_pixels.chunks(columns * chunk_size) {
			let mut cells = Vec::with_capacity(columns);
			for px in line.chunks(chunk_size) {
				// careful of u8 overflow
				let colour_avg = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
				let elevation = (colour_avg / 255.0 * max_elevation as f32).round() as u8;
				cells.push(Cell::flat(elevation));
			}
			lines.push(cells);
		}
		let cells = lines.into_iter().rev().flatten().collect();
		CellGrid::from_cells(columns, rows, cells)
	}
}

/// Convert a CSV value such as `3` or `2N` into a [Cell]
#[cfg(feature = "csv")]
fn parse_csv_cell(value: &str) -> Cell {
	let value = value.trim();
	let facing = match value.chars().last() {
		Some('N') => Some(Ordinal::North),
		Some('E') => Some(Ordinal::East),
		Some('S') => Some(Ordinal::South),
		Some('W') => Some(Ordinal::West),
		_ => None,
	};
	let digits = if facing.is_some() {
		&value[..value.len() - 1]
	} else {
		value
	};
	let elevation: u8 = digits.parse().expect("CSV expects u8 elevations");
	match facing {
		Some(f) => Cell::slope(elevation, f),
		None => Cell::flat(elevation),
	}
}
