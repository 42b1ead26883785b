//! JSON and CSV export of scrape results.
//!
//! Every run produces `output_raw.json` (the full, validated [`BatchResult`])
//! and, when at least one profile was scraped, `output_raw.csv` with one
//! flattened row per profile.
//!
//! [`BatchResult`]: crate::profile::BatchResult

mod csv;
mod reader;
mod writer;

pub use self::csv::{CsvExporter, FlatProfileRow, MAX_LIST_ITEMS};
pub use reader::BatchReader;
pub use writer::BatchWriter;

use crate::Result;
use crate::profile::BatchResult;
use std::path::{Path, PathBuf};

pub const JSON_FILE_NAME: &str = "output_raw.json";
pub const CSV_FILE_NAME: &str = "output_raw.csv";

/// Paths of the files written by [`export_batch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub json: PathBuf,
    pub csv: Option<PathBuf>,
}

/// Write the JSON document and the flattened CSV into `dir`
pub fn export_batch(batch: &BatchResult, dir: &Path) -> Result<ExportPaths> {
    std::fs::create_dir_all(dir)?;

    let json = dir.join(JSON_FILE_NAME);
    BatchWriter::to_file(batch, &json)?;

    let csv_path = dir.join(CSV_FILE_NAME);
    let csv = if CsvExporter::to_file(&batch.profiles, &csv_path)? {
        Some(csv_path)
    } else {
        None
    };

    Ok(ExportPaths { json, csv })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileRecord;

    #[test]
    fn test_export_batch_writes_both_files() {
        let temp = tempfile::tempdir().unwrap();
        let batch = BatchResult::new(
            vec![ProfileRecord::empty("https://www.linkedin.com/in/jdoe")],
            Vec::new(),
        );

        let paths = export_batch(&batch, temp.path()).unwrap();

        assert!(paths.json.exists());
        assert_eq!(paths.csv, Some(temp.path().join(CSV_FILE_NAME)));

        let reread = BatchReader::from_file(&paths.json).unwrap();
        assert_eq!(reread.profiles, batch.profiles);
    }
}
