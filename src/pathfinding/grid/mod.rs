//! The world is a uniform grid of `columns x rows` cells, each with an
//! integer elevation and a top surface that is either flat, a slope rising
//! toward one of the four cardinal directions, or a corner piece.
//!
//! Cells are stored row-major from the south-west corner, so the cell at
//! `(column, row)` has index `column + row * columns`. North is the
//! direction of increasing row.
//!
//! ```text
//!  row
//!   2 | 6 | 7 | 8 |
//!   1 | 3 | 4 | 5 |
//!   0 | 0 | 1 | 2 |
//!       0   1   2   column
//! ```
//!

pub mod cell;
pub mod cell_grid;
