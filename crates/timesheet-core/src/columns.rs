//! Mapping periods onto the timesheet's day columns
//!
//! The template lays out one fortnight across columns D..Q (4..=17), with the
//! day-of-month numbers in row 4 and the hour entry rows in 6..=11. A split
//! period shares that band between its two files: the first half fills the
//! leftmost columns, the second half picks up where the first half stopped.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::cell::{CellAddress, CellRange};
use crate::period::{DateSpan, Part, Period};
use crate::writes::WriteSet;

/// First day column (D), 1-based
pub const FIRST_DAY_COLUMN: u16 = 4;

/// Last day column (Q), 1-based
pub const LAST_DAY_COLUMN: u16 = 17;

/// Row holding the day-of-month numbers, 1-based
pub const DAY_ROW: u32 = 4;

/// Hour entry rows, 1-based
pub const ENTRY_ROWS: RangeInclusive<u32> = 6..=11;

/// Row of the period end date header (S1), 1-based
pub const HEADER_ROW: u32 = 1;

/// Column of the period end date header (S1), 1-based
pub const HEADER_COLUMN: u16 = 19;

/// A run of 1-based day columns inside the D..Q band
///
/// `start > end` denotes an empty run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRange {
    /// First column, 1-based
    pub start: u16,
    /// Last column (inclusive), 1-based
    pub end: u16,
}

impl ColumnRange {
    /// Create a new column range
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// The full D..Q band
    pub fn band() -> Self {
        Self::new(FIRST_DAY_COLUMN, LAST_DAY_COLUMN)
    }

    /// Check if the range covers no columns
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of columns covered
    pub fn len(&self) -> u16 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Check if a 1-based column lies in the range
    pub fn contains(&self, col: u16) -> bool {
        self.start <= col && col <= self.end
    }

    /// Iterate over the 1-based column numbers
    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    /// The cells of this range on the given 1-based rows
    pub fn cells_on(&self, rows: RangeInclusive<u32>) -> Option<CellRange> {
        if self.is_empty() || rows.is_empty() {
            return None;
        }
        Some(CellRange::new(
            CellAddress::one_based(*rows.start(), self.start),
            CellAddress::one_based(*rows.end(), self.end),
        ))
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        write!(
            f,
            "{}:{}",
            CellAddress::column_to_letters(self.start.saturating_sub(1)),
            CellAddress::column_to_letters(self.end.saturating_sub(1))
        )
    }
}

/// Where a part sits in the column band
///
/// A second half always carries the first half it follows, so its offset can
/// be computed without looking at neighbouring timesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An unsplit window, starting at column D
    Whole,
    /// First half of a split window, starting at column D
    FirstHalf,
    /// Second half of a split window, starting after `first`'s columns
    SecondHalf {
        /// The matching first half
        first: DateSpan,
    },
}

impl Placement {
    /// The part this placement lays out
    pub fn part(&self) -> Part {
        match self {
            Placement::Whole => Part::Whole,
            Placement::FirstHalf => Part::FirstHalf,
            Placement::SecondHalf { .. } => Part::SecondHalf,
        }
    }
}

fn day_count(span: &DateSpan) -> u16 {
    u16::try_from(span.days()).unwrap_or(u16::MAX)
}

/// Day columns used by `span` when laid out at `placement`
pub fn column_range(span: &DateSpan, placement: &Placement) -> ColumnRange {
    match placement {
        Placement::Whole | Placement::FirstHalf => ColumnRange::new(
            FIRST_DAY_COLUMN,
            FIRST_DAY_COLUMN
                .saturating_add(day_count(span).saturating_sub(1))
                .min(LAST_DAY_COLUMN),
        ),
        Placement::SecondHalf { first } => ColumnRange::new(
            FIRST_DAY_COLUMN.saturating_add(day_count(first)),
            LAST_DAY_COLUMN,
        ),
    }
}

/// Header text for a period ending on `date`, e.g. `2/7/24`
pub fn header_text(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

/// Everything needed to produce one timesheet file
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// Which part of the window this file covers
    pub part: Part,
    /// The dates this file covers
    pub span: DateSpan,
    /// Day columns filled with dates
    pub columns: ColumnRange,
    /// Cell edits to apply to the template sheet
    pub writes: WriteSet,
}

impl SheetPlan {
    /// Lay out `span` at `placement` and build its write set
    pub fn new(span: DateSpan, placement: Placement) -> Self {
        let columns = column_range(&span, &placement);
        let mut writes = WriteSet::new();

        // Entry cells outside this file's columns belong to the other half
        for unused in unused_columns(&columns) {
            if let Some(range) = unused.cells_on(ENTRY_ROWS) {
                writes.clear(range);
            }
        }

        if let Some(day_row) = ColumnRange::band().cells_on(DAY_ROW..=DAY_ROW) {
            writes.clear(day_row);
        }
        for (date, col) in span.dates().zip(columns.iter()) {
            writes.write(CellAddress::one_based(DAY_ROW, col), date.day());
        }

        writes.write(
            CellAddress::one_based(HEADER_ROW, HEADER_COLUMN),
            header_text(span.end),
        );

        Self {
            part: placement.part(),
            span,
            columns,
            writes,
        }
    }
}

fn unused_columns(columns: &ColumnRange) -> Vec<ColumnRange> {
    if columns.is_empty() {
        return vec![ColumnRange::band()];
    }
    let mut unused = Vec::new();
    if columns.start > FIRST_DAY_COLUMN {
        unused.push(ColumnRange::new(FIRST_DAY_COLUMN, columns.start - 1));
    }
    if columns.end < LAST_DAY_COLUMN {
        unused.push(ColumnRange::new(columns.end + 1, LAST_DAY_COLUMN));
    }
    unused
}

/// One plan per timesheet file produced by `period`, in order
pub fn map_columns(period: &Period) -> Vec<SheetPlan> {
    match *period {
        Period::Whole(span) => vec![SheetPlan::new(span, Placement::Whole)],
        Period::Split { first, second } => vec![
            SheetPlan::new(first, Placement::FirstHalf),
            SheetPlan::new(second, Placement::SecondHalf { first }),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::period::segment;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(start: NaiveDate, end: NaiveDate) -> DateSpan {
        DateSpan::new(start, end).unwrap()
    }

    fn value_at(plan: &SheetPlan, a1: &str) -> Option<CellValue> {
        plan.writes
            .resolve()
            .get(&CellAddress::parse(a1).unwrap())
            .cloned()
    }

    /// Day-row columns split into (numbered, blank)
    fn day_columns(plan: &SheetPlan) -> (Vec<u16>, Vec<u16>) {
        let cells = plan.writes.resolve();
        ColumnRange::band()
            .iter()
            .partition(|&col| !cells[&CellAddress::one_based(DAY_ROW, col)].is_empty())
    }

    #[test]
    fn test_whole_period_fills_band() {
        let plan = SheetPlan::new(span(date(2024, 1, 1), date(2024, 1, 14)), Placement::Whole);

        assert_eq!(plan.part, Part::Whole);
        assert_eq!(plan.columns, ColumnRange::new(4, 17));
        assert_eq!(day_columns(&plan), ((4..=17).collect::<Vec<_>>(), vec![]));
        assert_eq!(value_at(&plan, "D4"), Some(CellValue::Number(1.0)));
        assert_eq!(value_at(&plan, "Q4"), Some(CellValue::Number(14.0)));
        assert_eq!(value_at(&plan, "S1"), Some(CellValue::string("1/14/24")));
        // Nothing to clear in the entry rows
        assert_eq!(value_at(&plan, "D6"), None);
    }

    #[test]
    fn test_five_day_split() {
        let first = span(date(2024, 1, 27), date(2024, 1, 31));
        let second = span(date(2024, 2, 1), date(2024, 2, 9));
        let plans = map_columns(&Period::Split { first, second });

        let p1 = &plans[0];
        assert_eq!(p1.part, Part::FirstHalf);
        assert_eq!(p1.columns, ColumnRange::new(4, 8));
        assert_eq!(day_columns(p1), ((4..=8).collect::<Vec<_>>(), (9..=17).collect::<Vec<_>>()));
        assert_eq!(value_at(p1, "H6"), None);
        assert_eq!(value_at(p1, "I6"), Some(CellValue::Empty));
        assert_eq!(value_at(p1, "Q11"), Some(CellValue::Empty));
        assert_eq!(value_at(p1, "H4"), Some(CellValue::Number(31.0)));
        assert_eq!(value_at(p1, "I4"), Some(CellValue::Empty));
        assert_eq!(value_at(p1, "S1"), Some(CellValue::string("1/31/24")));

        let p2 = &plans[1];
        assert_eq!(p2.part, Part::SecondHalf);
        assert_eq!(p2.columns, ColumnRange::new(9, 17));
        assert_eq!(day_columns(p2), ((9..=17).collect::<Vec<_>>(), (4..=8).collect::<Vec<_>>()));
        assert_eq!(value_at(p2, "D6"), Some(CellValue::Empty));
        assert_eq!(value_at(p2, "H11"), Some(CellValue::Empty));
        assert_eq!(value_at(p2, "I6"), None);
        assert_eq!(value_at(p2, "H4"), Some(CellValue::Empty));
        assert_eq!(value_at(p2, "I4"), Some(CellValue::Number(1.0)));
        assert_eq!(value_at(p2, "Q4"), Some(CellValue::Number(9.0)));
        assert_eq!(value_at(p2, "S1"), Some(CellValue::string("2/9/24")));
    }

    #[test]
    fn test_day_row_is_partitioned() {
        for period in segment(date(2023, 6, 16), date(2024, 5, 1)) {
            for plan in map_columns(&period) {
                let (filled, blank) = day_columns(&plan);
                let mut all = [filled.clone(), blank].concat();
                all.sort_unstable();
                assert_eq!(all, (4..=17).collect::<Vec<_>>(), "{}", plan.span);
                assert_eq!(filled.len() as i64, plan.span.days());

                let cells = plan.writes.resolve();
                for col in ColumnRange::band().iter() {
                    let value = &cells[&CellAddress::one_based(DAY_ROW, col)];
                    assert_eq!(value.is_empty(), !plan.columns.contains(col));
                }
            }
        }
    }

    #[test]
    fn test_column_range_for_second_half() {
        let first = span(date(2024, 2, 22), date(2024, 2, 29));
        let second = span(date(2024, 3, 1), date(2024, 3, 6));
        let range = column_range(&second, &Placement::SecondHalf { first });
        assert_eq!(range, ColumnRange::new(12, 17));
        assert_eq!(range.len(), 6);
        assert_eq!(range.to_string(), "L:Q");
    }

    #[test]
    fn test_oversized_span_is_clamped_to_band() {
        let range = column_range(
            &span(date(2024, 1, 1), date(2024, 3, 1)),
            &Placement::Whole,
        );
        assert_eq!(range, ColumnRange::band());
    }

    #[test]
    fn test_header_text_has_no_padding() {
        assert_eq!(header_text(date(2024, 2, 7)), "2/7/24");
        assert_eq!(header_text(date(2023, 12, 31)), "12/31/23");
    }

    #[test]
    fn test_empty_column_range() {
        let empty = ColumnRange::new(18, 17);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.cells_on(ENTRY_ROWS), None);
        assert_eq!(empty.to_string(), "-");
    }
}
