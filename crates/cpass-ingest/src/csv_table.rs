use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, Result};

/// An uploaded sheet: headers in file order and one string per cell.
///
/// Every row has exactly `headers.len()` cells; short records are padded
/// with empty strings and extra cells are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// Non-empty values of `column` taken from the first `limit` rows.
    pub fn sample_values(&self, column: usize, limit: usize) -> Vec<String> {
        self.rows
            .iter()
            .take(limit)
            .filter_map(|row| row.get(column))
            .filter(|value| !value.is_empty())
            .cloned()
            .collect()
    }

    /// Row `index` as a header-to-cell map.
    pub fn row_map(&self, index: usize) -> Option<BTreeMap<&str, &str>> {
        self.rows.get(index).map(|row| {
            self.headers
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn parse_reader<R: Read>(reader: R, source_name: &str) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Err(IngestError::EmptyCsv {
            source_name: source_name.to_string(),
        });
    };

    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(header_row.len());
    for (idx, raw) in header_row.iter().enumerate() {
        let mut header = normalize_header(raw);
        if header.is_empty() {
            header = format!("column_{}", idx + 1);
        }
        if !seen.insert(header.to_lowercase()) {
            return Err(IngestError::DuplicateHeader {
                header,
                source_name: source_name.to_string(),
            });
        }
        headers.push(header);
    }

    let rows: Vec<Vec<String>> = raw_rows
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    debug!(
        source = source_name,
        columns = headers.len(),
        rows = rows.len(),
        "read upload"
    );
    Ok(CsvTable { headers, rows })
}

/// Read a CSV upload from disk. The first non-blank record is the header.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(file, &path.display().to_string())
}

/// Parse CSV text already in memory.
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<CsvTable> {
    parse_reader(content.as_bytes(), source_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_rows_and_skips_blank_lines() {
        let table = parse_csv_str(
            "\u{feff}Name , Phone,Tasks\n\nAmina,0712,\"weeding, planting\"\nJuma\n",
            "inline",
        )
        .unwrap();
        assert_eq!(table.headers, vec!["Name", "Phone", "Tasks"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2], "weeding, planting");
        assert_eq!(table.rows[1], vec!["Juma", "", ""]);
    }

    #[test]
    fn sample_values_skip_empty_cells() {
        let table = parse_csv_str("A,B\n1,\n2,x\n3,y\n4,z\n", "inline").unwrap();
        assert_eq!(table.sample_values(1, 3), vec!["x", "y"]);
        assert_eq!(table.sample_values(0, 3), vec!["1", "2", "3"]);
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let table = parse_csv_str("Name,,Tasks\nA,B,C\n", "inline").unwrap();
        assert_eq!(table.headers[1], "column_2");
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = parse_csv_str("Name,name\nA,B\n", "inline").unwrap_err();
        assert!(matches!(err, IngestError::DuplicateHeader { .. }));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            parse_csv_str("\n\n", "inline"),
            Err(IngestError::EmptyCsv { .. })
        ));
    }

    #[test]
    fn row_map_pairs_headers_with_cells() {
        let table = parse_csv_str("Name,Tasks\nAmina,weeding\n", "inline").unwrap();
        let row = table.row_map(0).unwrap();
        assert_eq!(row.get("Tasks"), Some(&"weeding"));
        assert!(table.row_map(1).is_none());
    }
}
