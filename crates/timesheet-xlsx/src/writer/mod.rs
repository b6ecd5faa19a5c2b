//! XLSX template patching

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::{XlsxError, XlsxResult};
use crate::reader::{attr_value, Template};
use timesheet_core::{CellAddress, CellRange, CellValue, WriteSet};

const CONTENT_TYPES: &str = "[Content_Types].xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const CALC_CHAIN: &str = "xl/calcChain.xml";

impl Template {
    /// Apply `writes` to the named sheet and write the resulting package to a file
    ///
    /// The package is assembled in memory first, so a failed patch leaves no
    /// file behind.
    pub fn patch_file<P: AsRef<Path>>(
        &self,
        sheet_name: &str,
        writes: &WriteSet,
        path: P,
    ) -> XlsxResult<()> {
        let mut buf = Cursor::new(Vec::new());
        self.patch(sheet_name, writes, &mut buf)?;
        std::fs::write(path, buf.into_inner())?;
        Ok(())
    }

    /// Apply `writes` to the named sheet and write the resulting package
    ///
    /// Only the target worksheet part is rewritten; every other entry is copied
    /// without recompressing it. If an edit removes a formula, the calculation
    /// chain is left out (together with its content type and relationship) so
    /// that Excel rebuilds it.
    pub fn patch<W: Write + Seek>(
        &self,
        sheet_name: &str,
        writes: &WriteSet,
        writer: W,
    ) -> XlsxResult<()> {
        let sheet_path = self.sheet_path(sheet_name)?.to_string();
        let cells = writes.resolve();

        let mut archive = self.archive()?;
        let xml = {
            let file = archive
                .by_name(&sheet_path)
                .map_err(|_| XlsxError::MissingPart(sheet_path.clone()))?;
            read_entry(file)?
        };
        let patched = patch_sheet_xml(&xml, &cells)?;
        log::debug!(
            "patched {} cells in {} ({} -> {} bytes)",
            cells.len(),
            sheet_path,
            xml.len(),
            patched.xml.len()
        );

        let drop_calc_chain =
            patched.removed_formulas && archive.file_names().any(|name| name == CALC_CHAIN);
        if drop_calc_chain {
            log::debug!("formulas removed from {}, dropping {}", sheet_path, CALC_CHAIN);
        }

        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let mut zip = zip::ZipWriter::new(writer);

        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            let name = file.name().to_string();

            let content = if name == sheet_path {
                Cow::Borrowed(patched.xml.as_slice())
            } else if !drop_calc_chain {
                zip.raw_copy_file(file)?;
                continue;
            } else if name == CALC_CHAIN {
                continue;
            } else if name == CONTENT_TYPES {
                Cow::Owned(remove_elements(&read_entry(file)?, b"Override", |e| {
                    attr_value(e, b"PartName").as_deref() == Some("/xl/calcChain.xml")
                })?)
            } else if name == WORKBOOK_RELS {
                Cow::Owned(remove_elements(&read_entry(file)?, b"Relationship", |e| {
                    attr_value(e, b"Type").is_some_and(|t| t.ends_with("/calcChain"))
                })?)
            } else {
                zip.raw_copy_file(file)?;
                continue;
            };

            zip.start_file(name.as_str(), options)?;
            zip.write_all(&content)?;
        }

        zip.finish()?;
        Ok(())
    }
}

fn read_entry<R: Read>(mut file: R) -> XlsxResult<Vec<u8>> {
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

/// Copy an XML part, leaving out every `local` element accepted by `remove`
fn remove_elements<F>(xml: &[u8], local: &[u8], remove: F) -> XlsxResult<Vec<u8>>
where
    F: Fn(&BytesStart<'_>) -> bool,
{
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut skip_depth: usize = 0;

    loop {
        let event = reader.read_event()?;
        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }
        match event {
            Event::Eof => break,
            Event::Empty(ref e) if e.local_name().as_ref() == local && remove(e) => {}
            Event::Start(ref e) if e.local_name().as_ref() == local && remove(e) => {
                skip_depth = 1;
            }
            _ => writer.write_event(&event)?,
        }
    }

    Ok(writer.into_inner())
}

/// Element names used for new markup, carrying the document's prefix (if any)
struct Names {
    row: String,
    c: String,
    v: String,
    is: String,
    t: String,
}

impl Names {
    fn with_prefix(prefix: Option<&str>) -> Self {
        let name = |local: &str| match prefix {
            Some(p) => format!("{}:{}", p, local),
            None => local.to_string(),
        };
        Self {
            row: name("row"),
            c: name("c"),
            v: name("v"),
            is: name("is"),
            t: name("t"),
        }
    }
}

/// Edits for one row, keyed by 0-based column
type RowEdits<'a> = BTreeMap<u16, &'a CellValue>;

struct SheetPatcher<'a, W: Write> {
    writer: Writer<W>,
    names: Names,
    /// Rows with edits that have not been written yet
    pending: BTreeMap<u32, RowEdits<'a>>,
}

impl<'a, W: Write> SheetPatcher<'a, W> {
    /// Write every pending row that sorts before `row`
    fn flush_rows_before(&mut self, row: u32) -> XlsxResult<()> {
        while self.pending.first_key_value().is_some_and(|(r, _)| *r < row) {
            if let Some((r, edits)) = self.pending.pop_first() {
                self.write_new_row(r, &edits)?;
            }
        }
        Ok(())
    }

    fn write_new_row(&mut self, row: u32, edits: &RowEdits<'a>) -> XlsxResult<()> {
        // Clearing a cell that does not exist is a no-op
        if edits.values().all(|v| v.is_empty()) {
            return Ok(());
        }
        let mut start = BytesStart::new(self.names.row.as_str());
        start.push_attribute(("r", (row + 1).to_string().as_str()));
        self.writer.write_event(Event::Start(start))?;
        for (&col, value) in edits {
            if !value.is_empty() {
                self.write_cell(CellAddress::new(row, col), value, None)?;
            }
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(self.names.row.as_str())))?;
        Ok(())
    }

    /// Write every edit of the current row that sorts before `col`
    fn flush_cells_before(
        &mut self,
        row: u32,
        edits: &mut RowEdits<'a>,
        col: u16,
    ) -> XlsxResult<()> {
        while edits.first_key_value().is_some_and(|(c, _)| *c < col) {
            if let Some((c, value)) = edits.pop_first() {
                if !value.is_empty() {
                    self.write_cell(CellAddress::new(row, c), value, None)?;
                }
            }
        }
        Ok(())
    }

    /// Write `value` at `addr`, reusing the attributes of the cell it replaces
    ///
    /// Everything but the value type (`t`) carries over, so style, metadata
    /// and phonetic flags survive the edit.
    fn write_cell(
        &mut self,
        addr: CellAddress,
        value: &CellValue,
        replaced: Option<&BytesStart<'_>>,
    ) -> XlsxResult<()> {
        let mut cell = BytesStart::new(self.names.c.as_str());
        match replaced {
            Some(original) => {
                for attr in original.attributes().flatten() {
                    if attr.key.as_ref() != b"t" {
                        cell.push_attribute(attr);
                    }
                }
            }
            None => cell.push_attribute(("r", addr.to_a1_string().as_str())),
        }

        match value {
            CellValue::Empty => {
                self.writer.write_event(Event::Empty(cell))?;
            }
            CellValue::Number(_) => {
                self.writer.write_event(Event::Start(cell))?;
                write_text_element(&mut self.writer, &self.names.v, &value.to_string(), false)?;
                self.writer
                    .write_event(Event::End(BytesEnd::new(self.names.c.as_str())))?;
            }
            CellValue::String(s) => {
                cell.push_attribute(("t", "inlineStr"));
                self.writer.write_event(Event::Start(cell))?;
                self.writer
                    .write_event(Event::Start(BytesStart::new(self.names.is.as_str())))?;
                let preserve = s.trim() != s;
                write_text_element(&mut self.writer, &self.names.t, s, preserve)?;
                self.writer
                    .write_event(Event::End(BytesEnd::new(self.names.is.as_str())))?;
                self.writer
                    .write_event(Event::End(BytesEnd::new(self.names.c.as_str())))?;
            }
        }
        Ok(())
    }
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
    preserve: bool,
) -> XlsxResult<()> {
    let mut start = BytesStart::new(name);
    if preserve {
        start.push_attribute(("xml:space", "preserve"));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Copy of a `<row>` start tag without the `spans` hint, which edits may invalidate
fn row_start_without_spans(e: &BytesStart<'_>) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut start = BytesStart::new(name);
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != b"spans" {
            start.push_attribute(attr);
        }
    }
    start
}

/// A rewritten worksheet part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedSheet {
    /// The new worksheet XML
    pub xml: Vec<u8>,
    /// Whether any replaced cell held a formula
    pub removed_formulas: bool,
}

/// Rewrite a worksheet part so that each cell in `cells` holds the given value
///
/// Existing cells keep their attributes; cells and rows that do not exist
/// yet are inserted in sorted position. Everything outside the edited cells
/// is passed through unchanged.
///
/// Fails with [`XlsxError::InvalidFormat`] when a replaced cell is the master
/// of a shared formula whose range reaches cells that are not replaced, since
/// those cells would be left without a formula to share.
pub fn patch_sheet_xml(
    xml: &[u8],
    cells: &BTreeMap<CellAddress, CellValue>,
) -> XlsxResult<PatchedSheet> {
    let mut pending: BTreeMap<u32, RowEdits<'_>> = BTreeMap::new();
    for (addr, value) in cells {
        pending.entry(addr.row).or_default().insert(addr.col, value);
    }

    let mut reader = Reader::from_reader(xml);
    let mut patcher = SheetPatcher {
        writer: Writer::new(Vec::with_capacity(xml.len() + 1024)),
        names: Names::with_prefix(None),
        pending,
    };

    let mut in_sheet_data = false;
    // Edits of the row currently being streamed, if it has any
    let mut current: Option<(u32, RowEdits<'_>)> = None;
    let mut next_row: u32 = 0;
    let mut next_col: u16 = 0;
    // Depth inside a replaced cell whose original content is dropped
    let mut skip_depth: usize = 0;
    let mut replaced: Option<CellAddress> = None;
    let mut removed_formulas = false;

    loop {
        let event = reader.read_event()?;

        if skip_depth > 0 {
            match event {
                Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"f" => {
                    removed_formulas = true;
                    if let Some(addr) = replaced {
                        check_shared_master(e, addr, cells)?;
                    }
                    if matches!(event, Event::Start(_)) {
                        skip_depth += 1;
                    }
                }
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Eof => break,

            Event::Start(ref e) if e.local_name().as_ref() == b"sheetData" => {
                patcher.names = Names::with_prefix(prefix_of(e).as_deref());
                in_sheet_data = true;
                patcher.writer.write_event(&event)?;
            }
            Event::Empty(ref e) if e.local_name().as_ref() == b"sheetData" => {
                patcher.names = Names::with_prefix(prefix_of(e).as_deref());
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                patcher
                    .writer
                    .write_event(Event::Start(BytesStart::new(name.as_str())))?;
                patcher.flush_rows_before(u32::MAX)?;
                patcher
                    .writer
                    .write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
            Event::End(ref e) if e.local_name().as_ref() == b"sheetData" => {
                in_sheet_data = false;
                patcher.flush_rows_before(u32::MAX)?;
                patcher.writer.write_event(&event)?;
            }

            Event::Start(ref e) | Event::Empty(ref e)
                if in_sheet_data && e.local_name().as_ref() == b"row" =>
            {
                let row = match attr_value(e, b"r") {
                    Some(r) => r.trim().parse::<u32>().map_or(next_row, |r| r.saturating_sub(1)),
                    None => next_row,
                };
                next_row = row + 1;
                next_col = 0;
                patcher.flush_rows_before(row)?;

                let is_empty = matches!(event, Event::Empty(_));
                match patcher.pending.remove(&row) {
                    Some(mut edits) => {
                        patcher
                            .writer
                            .write_event(Event::Start(row_start_without_spans(e)))?;
                        if is_empty {
                            patcher.flush_cells_before(row, &mut edits, u16::MAX)?;
                            patcher
                                .writer
                                .write_event(Event::End(BytesEnd::new(patcher.names.row.clone())))?;
                        } else {
                            current = Some((row, edits));
                        }
                    }
                    None => patcher.writer.write_event(&event)?,
                }
            }
            Event::End(ref e) if in_sheet_data && e.local_name().as_ref() == b"row" => {
                if let Some((row, mut edits)) = current.take() {
                    patcher.flush_cells_before(row, &mut edits, u16::MAX)?;
                }
                patcher.writer.write_event(&event)?;
            }

            Event::Start(ref e) | Event::Empty(ref e)
                if current.is_some() && e.local_name().as_ref() == b"c" =>
            {
                let addr = match attr_value(e, b"r") {
                    Some(r) => CellAddress::parse(&r)?,
                    None => CellAddress::new(next_row.saturating_sub(1), next_col),
                };
                next_col = addr.col.saturating_add(1);

                let replacement = match current.as_mut() {
                    Some((row, edits)) => {
                        let row = *row;
                        patcher.flush_cells_before(row, edits, addr.col)?;
                        edits.remove(&addr.col)
                    }
                    None => None,
                };

                match replacement {
                    Some(value) => {
                        patcher.write_cell(addr, value, Some(e))?;
                        if matches!(event, Event::Start(_)) {
                            skip_depth = 1;
                            replaced = Some(addr);
                        }
                    }
                    None => patcher.writer.write_event(&event)?,
                }
            }

            _ => patcher.writer.write_event(&event)?,
        }
    }

    Ok(PatchedSheet {
        xml: patcher.writer.into_inner(),
        removed_formulas,
    })
}

/// Reject dropping a shared formula master while other cells still share it
fn check_shared_master(
    f: &BytesStart<'_>,
    addr: CellAddress,
    cells: &BTreeMap<CellAddress, CellValue>,
) -> XlsxResult<()> {
    if attr_value(f, b"t").as_deref() != Some("shared") {
        return Ok(());
    }
    let Some(shared) = attr_value(f, b"ref") else {
        return Ok(());
    };

    let range = CellRange::parse(&shared)?;
    match range.cells().find(|cell| !cells.contains_key(cell)) {
        Some(kept) => Err(XlsxError::InvalidFormat(format!(
            "clearing {} removes the shared formula used by {} (shared range {})",
            addr, kept, shared
        ))),
        None => Ok(()),
    }
}

/// Namespace prefix of an element, e.g. `x` for `<x:sheetData>`
fn prefix_of(e: &BytesStart<'_>) -> Option<String> {
    e.name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(edits: &[(&str, CellValue)]) -> BTreeMap<CellAddress, CellValue> {
        edits
            .iter()
            .map(|(a, v)| (CellAddress::parse(a).unwrap(), v.clone()))
            .collect()
    }

    fn patch(xml: &str, edits: &[(&str, CellValue)]) -> String {
        String::from_utf8(patch_sheet_xml(xml.as_bytes(), &cells(edits)).unwrap().xml).unwrap()
    }

    #[test]
    fn test_replaces_existing_cell_and_keeps_style() {
        let xml = r#"<worksheet><sheetData><row r="4" spans="1:19"><c r="D4" s="7"><v>99</v></c></row></sheetData></worksheet>"#;
        let out = patch(xml, &[("D4", CellValue::Number(1.0))]);
        assert_eq!(
            out,
            r#"<worksheet><sheetData><row r="4"><c r="D4" s="7"><v>1</v></c></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_clear_keeps_style_only() {
        let xml = r#"<worksheet><sheetData><row r="4"><c r="D4" s="3" t="s"><v>0</v></c><c r="E4"><f>D4+1</f><v>2</v></c></row></sheetData></worksheet>"#;
        let out = patch(
            xml,
            &[("D4", CellValue::Empty), ("E4", CellValue::Empty)],
        );
        assert_eq!(
            out,
            r#"<worksheet><sheetData><row r="4"><c r="D4" s="3"/><c r="E4"/></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_inserts_cells_in_column_order() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c><c r="Z1"><v>2</v></c></row></sheetData></worksheet>"#;
        let out = patch(xml, &[("S1", CellValue::string("2/7/24"))]);
        assert_eq!(
            out,
            r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c><c r="S1" t="inlineStr"><is><t>2/7/24</t></is></c><c r="Z1"><v>2</v></c></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_inserts_missing_rows_in_order() {
        let xml = r#"<worksheet><sheetData><row r="2"><c r="A2"><v>1</v></c></row><row r="9"/></sheetData></worksheet>"#;
        let out = patch(
            xml,
            &[
                ("S1", CellValue::string("x")),
                ("D4", CellValue::Number(5.0)),
                ("D6", CellValue::Empty),
                ("A20", CellValue::Number(3.0)),
            ],
        );
        assert_eq!(
            out,
            concat!(
                r#"<worksheet><sheetData>"#,
                r#"<row r="1"><c r="S1" t="inlineStr"><is><t>x</t></is></c></row>"#,
                r#"<row r="2"><c r="A2"><v>1</v></c></row>"#,
                r#"<row r="4"><c r="D4"><v>5</v></c></row>"#,
                r#"<row r="9"/>"#,
                r#"<row r="20"><c r="A20"><v>3</v></c></row>"#,
                r#"</sheetData></worksheet>"#
            )
        );
    }

    #[test]
    fn test_fills_empty_row_and_empty_sheet_data() {
        let xml = r#"<worksheet><sheetData><row r="4" spans="4:17"/></sheetData></worksheet>"#;
        let out = patch(xml, &[("E4", CellValue::Number(2.0))]);
        assert_eq!(
            out,
            r#"<worksheet><sheetData><row r="4"><c r="E4"><v>2</v></c></row></sheetData></worksheet>"#
        );

        let xml = r#"<worksheet><sheetData/></worksheet>"#;
        let out = patch(xml, &[("E4", CellValue::Number(2.0))]);
        assert_eq!(
            out,
            r#"<worksheet><sheetData><row r="4"><c r="E4"><v>2</v></c></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_escapes_text_and_passes_through_everything_else() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><dimension ref="A1:S11"/><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c></row>
</sheetData><mergeCells count="1"><mergeCell ref="A1:C1"/></mergeCells></worksheet>"#;
        let out = patch(xml, &[("B1", CellValue::string(" a<b "))]);
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(out.contains(
            r#"<c r="B1" t="inlineStr"><is><t xml:space="preserve"> a&lt;b </t></is></c>"#
        ));
        assert!(out.contains(r#"<mergeCells count="1"><mergeCell ref="A1:C1"/></mergeCells>"#));
        assert!(out.contains(r#"<dimension ref="A1:S11"/>"#));
    }

    #[test]
    fn test_replaced_cell_keeps_metadata_attributes() {
        let xml = r#"<worksheet><sheetData><row r="4"><c r="D4" s="3" t="s" cm="1" vm="2" ph="1"><v>0</v></c></row></sheetData></worksheet>"#;
        assert_eq!(
            patch(xml, &[("D4", CellValue::Empty)]),
            r#"<worksheet><sheetData><row r="4"><c r="D4" s="3" cm="1" vm="2" ph="1"/></row></sheetData></worksheet>"#
        );
        assert_eq!(
            patch(xml, &[("D4", CellValue::string("x"))]),
            r#"<worksheet><sheetData><row r="4"><c r="D4" s="3" cm="1" vm="2" ph="1" t="inlineStr"><is><t>x</t></is></c></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_reports_removed_formulas() {
        let xml = r#"<worksheet><sheetData><row r="4"><c r="D4"><v>1</v></c><c r="E4"><f>D4+1</f><v>2</v></c></row></sheetData></worksheet>"#;

        let kept = patch_sheet_xml(xml.as_bytes(), &cells(&[("D4", CellValue::Number(5.0))])).unwrap();
        assert!(!kept.removed_formulas);

        let removed = patch_sheet_xml(xml.as_bytes(), &cells(&[("E4", CellValue::Empty)])).unwrap();
        assert!(removed.removed_formulas);
        assert_eq!(
            String::from_utf8(removed.xml).unwrap(),
            r#"<worksheet><sheetData><row r="4"><c r="D4"><v>1</v></c><c r="E4"/></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_shared_formula_master_needs_its_whole_range() {
        let xml = r#"<worksheet><sheetData><row r="6"><c r="D6"><f t="shared" ref="D6:F6" si="0">D5*2</f><v>0</v></c><c r="E6"><f t="shared" si="0"/><v>0</v></c><c r="F6"><f t="shared" si="0"/><v>0</v></c></row></sheetData></worksheet>"#;

        let err = patch_sheet_xml(
            xml.as_bytes(),
            &cells(&[("D6", CellValue::Empty), ("E6", CellValue::Empty)]),
        )
        .unwrap_err();
        assert!(matches!(err, XlsxError::InvalidFormat(ref msg) if msg.contains("F6")));

        // Dependents alone can go, and so can the master with every dependent
        let dependent = patch(xml, &[("E6", CellValue::Empty)]);
        assert!(dependent.contains(r#"<c r="D6"><f t="shared" ref="D6:F6" si="0">D5*2</f>"#));
        let all = patch(
            xml,
            &[("D6", CellValue::Empty), ("E6", CellValue::Empty), ("F6", CellValue::Empty)],
        );
        assert_eq!(
            all,
            r#"<worksheet><sheetData><row r="6"><c r="D6"/><c r="E6"/><c r="F6"/></row></sheetData></worksheet>"#
        );
    }

    #[test]
    fn test_remove_elements() {
        let xml = r#"<Types><Default Extension="xml"/><Override PartName="/xl/calcChain.xml"/><Override PartName="/xl/workbook.xml"></Override></Types>"#;
        let out = remove_elements(xml.as_bytes(), b"Override", |e| {
            attr_value(e, b"PartName").as_deref() == Some("/xl/calcChain.xml")
        })
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<Types><Default Extension="xml"/><Override PartName="/xl/workbook.xml"></Override></Types>"#
        );
    }

    #[test]
    fn test_untouched_sheet_is_identical() {
        let xml = r#"<worksheet><sheetData><row r="1" spans="1:3"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#;
        assert_eq!(patch(xml, &[]), xml);
    }
}
