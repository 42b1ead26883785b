use crate::Result;
use crate::profile::{BatchResult, Validate};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct BatchWriter;

impl BatchWriter {
    /// Validate a batch and write it to a file as pretty JSON
    pub fn to_file(batch: &BatchResult, path: &Path) -> Result<()> {
        tracing::debug!("Writing batch JSON to: {}", path.display());

        batch.validate()?;

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, batch)?;

        tracing::info!(
            "Wrote {} profiles to {}",
            batch.profiles.len(),
            path.display()
        );

        Ok(())
    }

    /// Validate a batch and render it as a pretty JSON string
    pub fn to_string(batch: &BatchResult) -> Result<String> {
        batch.validate()?;
        Ok(serde_json::to_string_pretty(batch)?)
    }
}
