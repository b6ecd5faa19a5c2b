//! Splitting a date range into 14-day timesheet periods
//!
//! A period normally covers 14 consecutive days. When a window would cross
//! into the next calendar month it is split at the month boundary into a
//! [`Part::FirstHalf`] and a [`Part::SecondHalf`], each of which gets its own
//! timesheet file.

use std::fmt;
use std::iter::FusedIterator;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{Error, Result};
use crate::WINDOW_DAYS;

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateSpan {
    /// First day of the span
    pub start: NaiveDate,
    /// Last day of the span (inclusive)
    pub end: NaiveDate,
}

impl DateSpan {
    /// Create a span, rejecting an end that lies before the start
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of days in the span, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate over every date in the span
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Which part of a 14-day window a timesheet covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Part {
    /// The whole window fits in one month
    Whole,
    /// The days up to and including the last day of the month
    FirstHalf,
    /// The remaining days, starting on the first of the next month
    SecondHalf,
}

impl Part {
    /// Suffix appended to the output file name
    pub fn suffix(&self) -> &'static str {
        match self {
            Part::Whole => "",
            Part::FirstHalf => " (p1)",
            Part::SecondHalf => " (p2)",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Part::Whole => "whole",
            Part::FirstHalf => "p1",
            Part::SecondHalf => "p2",
        })
    }
}

/// One 14-day window, possibly split at a month boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Period {
    /// A window that stays inside one calendar month
    Whole(DateSpan),
    /// A window straddling a month boundary
    Split {
        /// From the window start to the last day of its month
        first: DateSpan,
        /// From the first day of the next month to the window end
        second: DateSpan,
    },
}

impl Period {
    /// Flatten into the (part, dates) pairs that each become one timesheet
    pub fn parts(&self) -> Vec<(Part, DateSpan)> {
        match *self {
            Period::Whole(span) => vec![(Part::Whole, span)],
            Period::Split { first, second } => {
                vec![(Part::FirstHalf, first), (Part::SecondHalf, second)]
            }
        }
    }

    /// The full window covered by this period
    pub fn span(&self) -> DateSpan {
        match *self {
            Period::Whole(span) => span,
            Period::Split { first, second } => DateSpan {
                start: first.start,
                end: second.end,
            },
        }
    }
}

/// Last calendar day of the month containing `date`
///
/// Day 28 exists in every month and four days later is always in the next
/// month; stepping back by that day's day-of-month lands on the month end.
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let next_month = date.with_day(28)?.checked_add_days(Days::new(4))?;
    next_month.checked_sub_days(Days::new(next_month.day() as u64))
}

/// Split `[start, end)` into 14-day periods
///
/// Returns an empty sequence when `start >= end`. The last period is never
/// truncated, so it may run past `end`.
pub fn segment(start: NaiveDate, end: NaiveDate) -> Vec<Period> {
    Segmenter::new(start, end).collect()
}

/// Lazy form of [`segment`]
#[derive(Debug, Clone)]
pub struct Segmenter {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Segmenter {
    /// Start segmenting at `start`, stopping once the cursor reaches `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            cursor: Some(start),
            end,
        }
    }

    /// Build the period starting at `cursor`, returning it with the next cursor
    fn period_at(cursor: NaiveDate) -> Option<(Period, Option<NaiveDate>)> {
        let candidate_end = cursor.checked_add_days(Days::new(WINDOW_DAYS - 1))?;

        let period = if (candidate_end.year(), candidate_end.month())
            != (cursor.year(), cursor.month())
        {
            let month_end = last_day_of_month(cursor)?;
            let remaining = (candidate_end - month_end).num_days() as u64;
            let second_start = month_end.succ_opt()?;
            let second_end = second_start.checked_add_days(Days::new(remaining - 1))?;
            Period::Split {
                first: DateSpan {
                    start: cursor,
                    end: month_end,
                },
                second: DateSpan {
                    start: second_start,
                    end: second_end,
                },
            }
        } else {
            Period::Whole(DateSpan {
                start: cursor,
                end: candidate_end,
            })
        };

        Some((period, period.span().end.succ_opt()))
    }
}

impl Iterator for Segmenter {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        let cursor = self.cursor.take().filter(|c| *c < self.end)?;
        let (period, next) = Self::period_at(cursor)?;
        log::debug!("period {:?}: {}", period.parts(), period.span());
        self.cursor = next;
        Some(period)
    }
}

impl FusedIterator for Segmenter {}
