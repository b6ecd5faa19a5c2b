//! Error types for timesheet generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating timesheets
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading the template or writing a timesheet
    #[error(transparent)]
    Xlsx(#[from] timesheet_xlsx::XlsxError),

    /// Filesystem error on a specific path
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
