use std::fs;

use cpass_ingest::{IngestError, read_csv_table};

#[test]
fn reads_upload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workers.csv");
    fs::write(
        &path,
        "Farmer Full Name,Mobile Number,What tasks do you do?\n\
         Amina Wanjiru,0712345678,\"Weeding the maize plot, then watering seedlings\"\n\
         Peter Otieno,0723456789,Milking cows; feeding calves\n",
    )
    .unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers.len(), 3);
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.cell(0, 2),
        Some("Weeding the maize plot, then watering seedlings")
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
