//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The value written into a cell
//! - [`CellAddress`] - A cell's location (e.g., "D4")
//! - [`CellRange`] - A rectangular block of cells (e.g., "D6:Q11")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;
