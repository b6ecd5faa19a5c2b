//! # timesheet-xlsx
//!
//! Fills in an XLSX (Office Open XML) timesheet template.
//!
//! The template is never rebuilt: only the edited cells of one worksheet are
//! rewritten, and every other part of the package (styles, other sheets,
//! printer settings, drawings) is copied over byte for byte.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::Template;
pub use writer::{patch_sheet_xml, PatchedSheet};
