//! In-memory form of the CSV table file.
//!
//! A [`Table`] is a header row plus rectangular string rows. Existing cells
//! are kept verbatim; only [`append`](Table::append) adds content. Columns are
//! addressed by header name, so a table written by something else (extra
//! columns, different column order) survives a round trip through the
//! catalog with its own columns intact.

use crate::error::{ErrorKind, Result};
use crate::record::{CatalogRecord, FILENAME_COLUMN, ID_COLUMN};
use exn::ResultExt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            headers: vec![ID_COLUMN.to_string(), FILENAME_COLUMN.to_string()],
            rows: Vec::new(),
        }
    }
}

impl Table {
    /// A fresh catalog table holding `records`.
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        let mut table = Self::default();
        table.append(records);
        table
    }

    /// Parse CSV bytes with a mandatory header row.
    ///
    /// Rows shorter than the header are padded with empty cells. Rows longer
    /// than the header, input without a header row, and invalid UTF-8 are
    /// rejected as [`ErrorKind::Malformed`].
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(bytes);
        let headers: Vec<String> = reader
            .headers()
            .or_raise(|| ErrorKind::Malformed("unreadable header row".to_string()))?
            .iter()
            .map(String::from)
            .collect();
        if headers.is_empty() {
            exn::bail!(ErrorKind::Malformed("missing header row".to_string()));
        }
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.or_raise(|| ErrorKind::Malformed("unreadable data row".to_string()))?;
            if record.len() > headers.len() {
                let line = record.position().map_or(0, |pos| pos.line());
                exn::bail!(ErrorKind::Malformed(format!(
                    "line {line} has {} fields but the header has {}",
                    record.len(),
                    headers.len()
                )));
            }
            let mut row: Vec<String> = record.iter().map(String::from).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    /// Serialize to CSV: `\n` line endings, fields quoted only when needed.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new().terminator(csv::Terminator::Any(b'\n')).from_writer(Vec::new());
        writer.write_record(&self.headers).or_raise(|| ErrorKind::Encode)?;
        for row in &self.rows {
            writer.write_record(row).or_raise(|| ErrorKind::Encode)?;
        }
        writer.into_inner().map_err(|e| e.into_error()).or_raise(|| ErrorKind::Encode)
    }

    /// Append records as new rows.
    ///
    /// If the `ID` or `PDF Filename` column is missing it is added to the end
    /// of the header and existing rows get an empty cell for it. Columns the
    /// records don't know about are left empty in the new rows.
    pub fn append(&mut self, records: &[CatalogRecord]) {
        if records.is_empty() {
            return;
        }
        let id_index = self.column_or_insert(ID_COLUMN);
        let filename_index = self.column_or_insert(FILENAME_COLUMN);
        self.rows.reserve(records.len());
        for record in records {
            let mut row = vec![String::new(); self.headers.len()];
            row[id_index] = record.id.to_string();
            row[filename_index] = record.filename.clone();
            self.rows.push(row);
        }
    }

    /// Highest numeric value in the `ID` column, if any.
    ///
    /// Cells written as whole floats (`3.0`) count; anything else that isn't
    /// a non-negative integer is ignored.
    pub fn max_id(&self) -> Option<u64> {
        let index = self.column(ID_COLUMN)?;
        self.rows.iter().filter_map(|row| parse_id(&row[index])).max()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn column_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.column(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }
}

fn parse_id(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if let Ok(id) = cell.parse::<u64>() {
        return Some(id);
    }
    let float = cell.parse::<f64>().ok()?;
    (float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64).then_some(float as u64)
}
