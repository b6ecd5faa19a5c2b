//! # timesheet
//!
//! Generate fortnightly XLSX timesheets from a template.
//!
//! A date range is cut into 14-day periods. Periods that cross a month
//! boundary are split in two, so that every timesheet belongs to a single
//! month. Each resulting part is written as its own copy of the template,
//! with the period end date in `S1` and the day-of-month numbers in `D4:Q4`.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timesheet::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 2, 22).unwrap();
//! let options = TimesheetOptions::default();
//!
//! let names: Vec<_> = plan(start, end)
//!     .iter()
//!     .map(|p| file_name(p.span.end, p.part, &options))
//!     .collect();
//! assert_eq!(
//!     names,
//!     [
//!         "BF Timesheet 24-01-31 (p1).xlsx",
//!         "BF Timesheet 24-02-07 (p2).xlsx",
//!         "BF Timesheet 24-02-21.xlsx",
//!     ]
//! );
//!
//! // Write the files into a fresh timestamped folder
//! // run(start, end, "Timesheets", "template.xlsx", &options).unwrap();
//! ```

pub mod error;
pub mod options;
pub mod output;
pub mod prelude;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub use error::{Error, Result};
pub use options::TimesheetOptions;
pub use output::{file_name, provision_output_dir, provision_output_dir_at};

// Re-export core types
pub use timesheet_core::{
    column_range, header_text, last_day_of_month, map_columns, segment, CellAddress, CellRange,
    CellValue, ColumnRange, DateSpan, Part, Period, Placement, Segmenter, SheetPlan, WriteSet,
};

// Re-export I/O types
pub use timesheet_xlsx::{Template, XlsxError};

/// Every timesheet to produce for `[start, end)`, in order
pub fn plan(start: NaiveDate, end: NaiveDate) -> Vec<SheetPlan> {
    segment(start, end).iter().flat_map(map_columns).collect()
}

/// Write one filled-in copy of `template` per timesheet into `output_dir`
///
/// Returns the paths of the written files in period order. The template is
/// read once; a missing sheet is reported before any file is written.
pub fn generate<P: AsRef<Path>, T: AsRef<Path>>(
    start: NaiveDate,
    end: NaiveDate,
    output_dir: P,
    template: T,
    options: &TimesheetOptions,
) -> Result<Vec<PathBuf>> {
    let template = Template::open(template.as_ref())?;
    template.sheet_path(&options.sheet_name)?;

    let plans = plan(start, end);
    if plans.is_empty() {
        log::warn!("no periods between {} and {}", start, end);
    }

    let output_dir = output_dir.as_ref();
    let mut paths = Vec::with_capacity(plans.len());
    for sheet in &plans {
        let path = output_dir.join(file_name(sheet.span.end, sheet.part, options));
        template.patch_file(&options.sheet_name, &sheet.writes, &path)?;
        log::info!(
            "wrote {} ({}, columns {})",
            path.display(),
            sheet.span,
            sheet.columns
        );
        paths.push(path);
    }

    Ok(paths)
}

/// Create a fresh timestamped folder under `base_dir` and [`generate`] into it
pub fn run<B: AsRef<Path>, T: AsRef<Path>>(
    start: NaiveDate,
    end: NaiveDate,
    base_dir: B,
    template: T,
    options: &TimesheetOptions,
) -> Result<Vec<PathBuf>> {
    // Check the template before leaving an empty folder behind
    let template = template.as_ref();
    if !template.is_file() {
        return Err(Error::io(
            template,
            std::io::Error::new(std::io::ErrorKind::NotFound, "template not found"),
        ));
    }

    let output_dir = provision_output_dir(base_dir, options)?;
    generate(start, end, output_dir, template, options)
}
