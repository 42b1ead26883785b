use crate::Result;
use crate::profile::{BatchResult, Validate};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct BatchReader;

impl BatchReader {
    /// Read, parse and validate an exported batch document
    pub fn from_file(path: &Path) -> Result<BatchResult> {
        tracing::debug!("Reading batch JSON from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let batch: BatchResult = serde_json::from_reader(reader)?;
        batch.validate()?;

        tracing::info!(
            "Parsed batch with {} profiles from {}",
            batch.profiles.len(),
            path.display()
        );

        Ok(batch)
    }

    /// Parse and validate a batch document from a JSON string
    pub fn from_str(content: &str) -> Result<BatchResult> {
        let batch: BatchResult = serde_json::from_str(content)?;
        batch.validate()?;
        Ok(batch)
    }
}
