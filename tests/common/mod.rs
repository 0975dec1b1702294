#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub enum Cell {
    Text(String),
    Number(f64),
}

/// Minimal single-sheet `.xlsx` writer: inline strings and plain numbers.
#[derive(Default)]
pub struct WorkbookBuilder {
    cells: BTreeMap<(u32, u32), Cell>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, row: u32, column: u32, value: &str) -> Self {
        self.cells.insert((row, column), Cell::Text(value.to_string()));
        self
    }

    pub fn number(mut self, row: u32, column: u32, value: f64) -> Self {
        self.cells.insert((row, column), Cell::Number(value));
        self
    }

    /// The report template: name H1, program H2, optional year L3, header row 4.
    pub fn report(name: Option<&str>, program: Option<&str>, year: Option<f64>) -> Self {
        let mut builder = Self::new()
            .text(3, 1, "Tag")
            .text(3, 2, "Tätigkeit")
            .text(3, 11, "Stunden");
        if let Some(name) = name {
            builder = builder.text(0, 7, name);
        }
        if let Some(program) = program {
            builder = builder.text(1, 7, program);
        }
        if let Some(year) = year {
            builder = builder.number(2, 11, year);
        }
        builder
    }

    /// Appends a day block starting at `row`: date row, one row per
    /// activity, hours on the last row. Returns the next free row.
    pub fn day(self, row: u32, date: &str, activities: &[&str], hours: f64) -> (Self, u32) {
        let mut builder = self.text(row, 1, date);
        let mut current = row;
        for (offset, activity) in activities.iter().enumerate() {
            current = row + 1 + offset as u32;
            builder = builder.text(current, 2, activity);
        }
        builder = builder.number(current, 11, hours);
        (builder, current + 1)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = || SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options()).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        zip.start_file("_rels/.rels", options()).unwrap();
        zip.write_all(ROOT_RELS.as_bytes()).unwrap();
        zip.start_file("xl/workbook.xml", options()).unwrap();
        zip.write_all(WORKBOOK.as_bytes()).unwrap();
        zip.start_file("xl/_rels/workbook.xml.rels", options()).unwrap();
        zip.write_all(WORKBOOK_RELS.as_bytes()).unwrap();
        zip.start_file("xl/worksheets/sheet1.xml", options()).unwrap();
        zip.write_all(self.sheet_xml().as_bytes()).unwrap();

        zip.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, dir: &Path, file_name: &str) {
        std::fs::write(dir.join(file_name), self.to_bytes()).unwrap();
    }

    fn sheet_xml(&self) -> String {
        let mut rows: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for (&(row, column), cell) in &self.cells {
            let reference = format!("{}{}", column_name(column), row + 1);
            let xml = match cell {
                Cell::Text(text) => format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference,
                    escape(text)
                ),
                Cell::Number(value) => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value),
            };
            rows.entry(row).or_default().push(xml);
        }

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (row, cells) in rows {
            xml.push_str(&format!(r#"<row r="{}">{}</row>"#, row + 1, cells.concat()));
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

fn column_name(column: u32) -> String {
    let mut n = column + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Tabelle1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
