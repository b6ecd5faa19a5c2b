//! Generation options

/// Options for generating timesheets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetOptions {
    /// Name of the worksheet to fill in (default: "Timesheet")
    pub sheet_name: String,
    /// Prefix of every generated file name (default: "BF Timesheet ")
    pub file_prefix: String,
    /// Prefix of the timestamped output folder (default: "Timesheets_")
    pub folder_prefix: String,
}

impl Default for TimesheetOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Timesheet".to_string(),
            file_prefix: "BF Timesheet ".to_string(),
            folder_prefix: "Timesheets_".to_string(),
        }
    }
}
