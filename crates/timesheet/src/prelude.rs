//! Prelude module - common imports for timesheet users
//!
//! ```rust
//! use timesheet::prelude::*;
//! ```

pub use crate::{
    file_name,
    generate,
    map_columns,
    plan,
    provision_output_dir,
    run,
    segment,

    CellAddress,
    CellValue,
    ColumnRange,
    DateSpan,

    // Error types
    Error,
    Part,
    Period,
    Result,
    SheetPlan,

    // I/O types
    Template,
    TimesheetOptions,
    WriteSet,
    XlsxError,
};
