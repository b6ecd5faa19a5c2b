//! XLSX template loading

use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use timesheet_core::{CellAddress, CellValue};

/// A worksheet listed in the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetEntry {
    pub(crate) name: String,
    /// Path of the worksheet part inside the package (e.g. `xl/worksheets/sheet1.xml`)
    pub(crate) path: String,
}

/// An XLSX template held in memory
///
/// The package bytes are read once and can be patched any number of times.
#[derive(Debug, Clone)]
pub struct Template {
    bytes: Vec<u8>,
    sheets: Vec<SheetEntry>,
}

impl Template {
    /// Read a template from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Read a template from the raw bytes of an XLSX package
    pub fn from_bytes(bytes: Vec<u8>) -> XlsxResult<Self> {
        let (sheet_info, sheet_paths) = {
            let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice()))?;

            // Verify this is an XLSX file
            if archive.by_name("[Content_Types].xml").is_err() {
                return Err(XlsxError::InvalidFormat(
                    "Missing [Content_Types].xml".into(),
                ));
            }

            (
                Self::read_workbook_xml(&mut archive)?,
                Self::read_workbook_rels(&mut archive)?,
            )
        };

        let sheets = sheet_info
            .into_iter()
            .filter_map(|(name, r_id)| {
                sheet_paths
                    .get(&r_id)
                    .map(|path| SheetEntry {
                        name,
                        path: path.clone(),
                    })
            })
            .collect();

        Ok(Self { bytes, sheets })
    }

    /// Names of the worksheets, in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    /// Package path of the named worksheet
    pub fn sheet_path(&self, name: &str) -> XlsxResult<&str> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.path.as_str())
            .ok_or_else(|| XlsxError::SheetNotFound(name.to_string()))
    }

    pub(crate) fn archive(&self) -> XlsxResult<zip::ZipArchive<Cursor<&[u8]>>> {
        Ok(zip::ZipArchive::new(Cursor::new(self.bytes.as_slice()))?)
    }

    /// Read the value of one cell from the named worksheet
    ///
    /// Numbers, shared strings and inline strings are returned as-is; a cell
    /// that is missing or has no value reads as [`CellValue::Empty`].
    pub fn read_cell(&self, sheet_name: &str, addr: CellAddress) -> XlsxResult<CellValue> {
        let path = self.sheet_path(sheet_name)?.to_string();
        let mut archive = self.archive()?;
        let shared_strings = Self::read_shared_strings(&mut archive)?;

        let file = archive
            .by_name(&path)
            .map_err(|_| XlsxError::MissingPart(path.clone()))?;
        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let target = addr.to_a1_string();
        let mut buf = Vec::new();
        let mut in_target = false;
        let mut cell_type: Option<String> = None;
        let mut in_text = false;
        let mut text = String::new();
        let mut found = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"c" if attr_value(&e, b"r").as_deref() == Some(target.as_str()) => {
                        in_target = true;
                        found = true;
                        cell_type = attr_value(&e, b"t");
                    }
                    b"v" | b"t" if in_target => in_text = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"c" if in_target => break,
                    b"v" | b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text => {
                    text.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if !found || (text.is_empty() && cell_type.as_deref() != Some("inlineStr")) {
            return Ok(CellValue::Empty);
        }

        match cell_type.as_deref() {
            Some("s") => {
                let index: usize = text
                    .trim()
                    .parse()
                    .map_err(|_| XlsxError::InvalidFormat(format!("bad shared string index '{}'", text)))?;
                shared_strings
                    .get(index)
                    .cloned()
                    .map(CellValue::String)
                    .ok_or_else(|| {
                        XlsxError::InvalidFormat(format!("shared string {} out of range", index))
                    })
            }
            Some("inlineStr") | Some("str") | Some("e") => Ok(CellValue::string(text)),
            _ => text
                .trim()
                .parse::<f64>()
                .map(CellValue::Number)
                .map_err(|_| XlsxError::InvalidFormat(format!("bad number '{}' in {}", text, target))),
        }
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current_string));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            // Usually `r:id`; only the local part is fixed
                            key if key.ends_with(b":id") => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            rels.insert(id, resolve_target(&target));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}

/// Turn a relationship target into a package path
///
/// Targets are relative to `xl/` unless they start with `/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

/// Unescaped value of an attribute, if present
pub(crate) fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}
