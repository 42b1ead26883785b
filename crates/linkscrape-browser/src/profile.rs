use crate::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Chrome `--user-data-dir` for one run
///
/// Authentication state lives in the session cache, so the browser profile
/// is throwaway by default. A persistent directory keeps Chrome's own state
/// (cache, local storage) between runs.
pub enum UserDataDir {
    Temporary(TempDir),
    Persistent(PathBuf),
}

impl UserDataDir {
    /// Fresh directory removed when this value is dropped
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("linkscrape-").tempdir()?;
        tracing::debug!("Using temporary Chrome profile: {}", dir.path().display());
        Ok(Self::Temporary(dir))
    }

    /// Directory that survives the run; created if missing
    pub fn persistent(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        tracing::debug!("Using persistent Chrome profile: {}", path.display());
        Ok(Self::Persistent(path))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Temporary(dir) => dir.path(),
            Self::Persistent(path) => path,
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }
}
