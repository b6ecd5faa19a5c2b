//! Timesheets CLI - generate fortnightly timesheets from a template

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use timesheet::prelude::*;

#[derive(Parser)]
#[command(name = "timesheets")]
#[command(
    author,
    version,
    about = "Generate fortnightly XLSX timesheets from a template"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one timesheet per period into a new timestamped folder
    Generate {
        /// First day of the first period (YYYY-MM-DD)
        start: NaiveDate,

        /// No period starts on or after this day (YYYY-MM-DD)
        end: NaiveDate,

        /// Template workbook (.xlsx)
        #[arg(short, long)]
        template: PathBuf,

        /// Folder under which the timestamped output folder is created
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Worksheet to fill in
        #[arg(short, long, default_value = "Timesheet")]
        sheet: String,

        /// Print the files that would be written without touching the disk
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the periods and column ranges for a date range
    Periods {
        /// First day of the first period (YYYY-MM-DD)
        start: NaiveDate,

        /// No period starts on or after this day (YYYY-MM-DD)
        end: NaiveDate,
    },

    /// List all sheets in a template
    Sheets {
        /// Template workbook (.xlsx)
        template: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            start,
            end,
            template,
            output,
            sheet,
            dry_run,
        } => {
            let options = TimesheetOptions {
                sheet_name: sheet,
                ..TimesheetOptions::default()
            };
            if dry_run {
                dry_run_generate(start, end, &options)
            } else {
                generate_all(start, end, &template, &output, &options)
            }
        }
        Commands::Periods { start, end } => show_periods(start, end),
        Commands::Sheets { template } => list_sheets(&template),
    }
}

fn generate_all(
    start: NaiveDate,
    end: NaiveDate,
    template: &Path,
    output: &Path,
    options: &TimesheetOptions,
) -> Result<()> {
    let paths = run(start, end, output, template, options).with_context(|| {
        format!(
            "Failed to generate timesheets from '{}'",
            template.display()
        )
    })?;

    for path in &paths {
        println!("{}", path.display());
    }
    eprintln!("Wrote {} timesheet(s)", paths.len());

    Ok(())
}

fn dry_run_generate(start: NaiveDate, end: NaiveDate, options: &TimesheetOptions) -> Result<()> {
    let plans = plan(start, end);
    if plans.is_empty() {
        log::warn!("no periods between {} and {}", start, end);
    }
    for sheet in &plans {
        println!("{}", file_name(sheet.span.end, sheet.part, options));
    }
    Ok(())
}

fn show_periods(start: NaiveDate, end: NaiveDate) -> Result<()> {
    for sheet in plan(start, end) {
        println!("{}\t{}\t{}", sheet.part, sheet.span, sheet.columns);
    }
    Ok(())
}

fn list_sheets(template: &Path) -> Result<()> {
    let template = Template::open(template)
        .with_context(|| format!("Failed to open '{}'", template.display()))?;

    for (i, name) in template.sheet_names().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}
