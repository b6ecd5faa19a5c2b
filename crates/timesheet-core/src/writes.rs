//! Sheet edit lists
//!
//! A [`WriteSet`] keeps range clears and cell writes apart: every clear is
//! applied first, then every write, regardless of the order they were added.
//! Resetting a band and then filling part of it therefore never leaves stale
//! template values behind.

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange, CellValue};

/// Clears followed by sparse cell writes for one worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteSet {
    clears: Vec<CellRange>,
    writes: Vec<(CellAddress, CellValue)>,
}

impl WriteSet {
    /// Create an empty write set
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every cell in `range` to [`CellValue::Empty`]
    pub fn clear(&mut self, range: CellRange) -> &mut Self {
        self.clears.push(range);
        self
    }

    /// Write a value into a single cell
    pub fn write<V: Into<CellValue>>(&mut self, addr: CellAddress, value: V) -> &mut Self {
        self.writes.push((addr, value.into()));
        self
    }

    /// Fold clears and writes into the final value of every touched cell
    ///
    /// The map is ordered row-major. Later writes to the same cell win.
    pub fn resolve(&self) -> BTreeMap<CellAddress, CellValue> {
        let mut cells = BTreeMap::new();
        for range in &self.clears {
            for addr in range.cells() {
                cells.insert(addr, CellValue::Empty);
            }
        }
        for (addr, value) in &self.writes {
            cells.insert(*addr, value.clone());
        }
        cells
    }
}
