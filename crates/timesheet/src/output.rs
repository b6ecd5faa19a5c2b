//! Output folder and file naming

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use timesheet_core::Part;

use crate::error::{Error, Result};
use crate::options::TimesheetOptions;

/// File name for the timesheet ending on `end`, e.g. `BF Timesheet 24-02-07 (p2).xlsx`
pub fn file_name(end: NaiveDate, part: Part, options: &TimesheetOptions) -> String {
    format!(
        "{}{}{}.xlsx",
        options.file_prefix,
        end.format("%y-%m-%d"),
        part.suffix()
    )
}

/// Create a fresh timestamped folder under `base` for this run
///
/// `base` is created if it does not exist yet.
pub fn provision_output_dir<P: AsRef<Path>>(base: P, options: &TimesheetOptions) -> Result<PathBuf> {
    provision_output_dir_at(base, options, Local::now().naive_local())
}

/// [`provision_output_dir`] with an explicit timestamp
///
/// If a folder for the same second already exists, a `-2`, `-3`, ... suffix is
/// appended so that a run never writes into another run's folder.
pub fn provision_output_dir_at<P: AsRef<Path>>(
    base: P,
    options: &TimesheetOptions,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let base = base.as_ref();
    std::fs::create_dir_all(base).map_err(|e| Error::io(base, e))?;

    let stem = format!(
        "{}{}",
        options.folder_prefix,
        now.format("%Y-%m-%d_%H-%M-%S")
    );

    let mut attempt = 1;
    loop {
        let name = if attempt == 1 {
            stem.clone()
        } else {
            format!("{}-{}", stem, attempt)
        };
        let path = base.join(name);
        match std::fs::create_dir(&path) {
            Ok(()) => {
                log::info!("created output folder {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(Error::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_file_name() {
        let options = TimesheetOptions::default();
        assert_eq!(
            file_name(date(2024, 1, 14), Part::Whole, &options),
            "BF Timesheet 24-01-14.xlsx"
        );
        assert_eq!(
            file_name(date(2024, 1, 31), Part::FirstHalf, &options),
            "BF Timesheet 24-01-31 (p1).xlsx"
        );
        assert_eq!(
            file_name(date(2024, 2, 7), Part::SecondHalf, &options),
            "BF Timesheet 24-02-07 (p2).xlsx"
        );
    }

    #[test]
    fn test_provision_creates_unique_folders() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("Timesheets");
        let options = TimesheetOptions::default();
        let now = date(2024, 3, 1).and_hms_opt(9, 5, 7).unwrap();

        let first = provision_output_dir_at(&base, &options, now).unwrap();
        assert_eq!(first, base.join("Timesheets_2024-03-01_09-05-07"));
        assert!(first.is_dir());

        let second = provision_output_dir_at(&base, &options, now).unwrap();
        assert_eq!(second, base.join("Timesheets_2024-03-01_09-05-07-2"));
        assert!(second.is_dir());
    }

    #[test]
    fn test_provision_fails_when_base_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("not-a-dir");
        std::fs::write(&base, b"x").unwrap();

        let err = provision_output_dir(&base, &TimesheetOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
