//! A1-style cell addressing

use std::fmt;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A cell address (e.g., "D4")
///
/// Row and column are stored 0-based. Ordering is row-major, which is also the
/// order cells appear in a worksheet's XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address from 0-based indices
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Create a cell address from the 1-based row and column numbers shown in Excel
    ///
    /// ```
    /// use timesheet_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::one_based(4, 4).to_string(), "D4");
    /// ```
    pub fn one_based(row: u32, col: u16) -> Self {
        Self::new(row.saturating_sub(1), col.saturating_sub(1))
    }

    /// Parse `D4`-style notation
    ///
    /// ```
    /// use timesheet_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("S1").unwrap();
    /// assert_eq!((addr.row, addr.col), (0, 18));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let letters = &s[..s.len() - digits.len()];

        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidAddress(s.to_string()));
        }

        let col = Self::letters_to_column(letters)?;
        let row = match digits.parse::<u32>() {
            Ok(0) | Err(_) => return Err(Error::InvalidAddress(s.to_string())),
            Ok(n) => n - 1,
        };
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self::new(row, col))
    }

    /// Column letters for a 0-based index (0 = A, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::with_capacity(3);
        let mut n = u32::from(col) + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// 0-based index for column letters, case-insensitive
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidAddress(letters.to_string()));
        }

        let number = letters.bytes().try_fold(0u32, |acc, b| {
            let n = acc * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
            if n > u32::from(MAX_COLS) {
                Err(Error::ColumnOutOfBounds(
                    n.min(u32::from(u16::MAX)) as u16,
                    MAX_COLS - 1,
                ))
            } else {
                Ok(n)
            }
        })?;

        Ok((number - 1) as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

/// A rectangular block of cells (e.g., "D6:Q11"), always stored top-left to bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Create a range spanning both corners, in any order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse `D4:Q4` or a single `S1`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (first, last) = s.split_once(':').unwrap_or((s, s));
        let corner =
            |part: &str| CellAddress::parse(part).map_err(|_| Error::InvalidRange(s.to_string()));
        Ok(Self::new(corner(first)?, corner(last)?))
    }

    /// Every address in the range, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> {
        let (start, end) = (self.start, self.end);
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| CellAddress::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}
