//! # timesheet-core
//!
//! Core logic for splitting a date range into fortnightly timesheets.
//!
//! This crate provides:
//! - [`segment`] / [`Segmenter`] - Walk a date range in 14-day windows, splitting
//!   any window that crosses a month boundary into two halves
//! - [`map_columns`] - Turn a [`Period`] into one [`SheetPlan`] per output file,
//!   describing which day columns are filled and which are cleared
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`WriteSet`] - An explicit "clear, then write" edit list for one sheet
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timesheet_core::{map_columns, segment, Part};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 2, 8).unwrap();
//!
//! let periods = segment(start, end);
//! assert_eq!(periods.len(), 1);
//!
//! let plans = map_columns(&periods[0]);
//! assert_eq!(plans[0].part, Part::FirstHalf);
//! assert_eq!(plans[0].columns.to_string(), "D:J");
//! assert_eq!(plans[1].columns.to_string(), "K:Q");
//! ```

pub mod cell;
pub mod columns;
pub mod error;
pub mod period;
pub mod writes;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellValue};
pub use columns::{column_range, header_text, map_columns, ColumnRange, Placement, SheetPlan};
pub use error::{Error, Result};
pub use period::{last_day_of_month, segment, DateSpan, Part, Period, Segmenter};
pub use writes::WriteSet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Number of calendar days covered by one full timesheet window
pub const WINDOW_DAYS: u64 = 14;
