use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    errors::{LedgerError, Result},
    ledger::{CategoryTree, Ledger},
    utils::paths::{backup_path, write_atomic},
};

use super::{LoadOutcome, StorageBackend};

/// Stores a ledger in the newline-delimited text layout produced by
/// [`Ledger::serialize`].
#[derive(Debug, Clone)]
pub struct TextStorage {
    path: PathBuf,
}

impl TextStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for TextStorage {
    fn load(&self, tree: &CategoryTree) -> Result<LoadOutcome> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no records file yet");
                return Ok(LoadOutcome::Missing);
            }
            Err(err) => return Err(err.into()),
        };

        match Ledger::deserialize(&data, tree) {
            Ok(ledger) => {
                info!(
                    path = %self.path.display(),
                    records = ledger.len(),
                    "records loaded"
                );
                Ok(LoadOutcome::Loaded(ledger))
            }
            Err(LedgerError::MalformedState(reason)) => {
                warn!(path = %self.path.display(), %reason, "discarding malformed records file");
                Ok(LoadOutcome::Malformed(reason))
            }
            Err(err) => Err(err),
        }
    }

    /// Keeps a `.bak` copy of the previous file, then replaces it atomically.
    fn save(&self, ledger: &Ledger) -> Result<()> {
        if self.path.is_file() {
            fs::copy(&self.path, backup_path(&self.path))?;
        }
        write_atomic(&self.path, &ledger.serialize())?;
        info!(path = %self.path.display(), records = ledger.len(), "records saved");
        Ok(())
    }
}
