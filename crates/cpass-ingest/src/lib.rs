//! Upload ingestion for CPASS.
//!
//! Reads a worker sheet into an ordered header list and string rows. No
//! interpretation happens here; column roles are decided by `cpass-map`.

pub mod csv_table;
pub mod error;

pub use csv_table::{CsvTable, parse_csv_str, read_csv_table};
pub use error::{IngestError, Result};
