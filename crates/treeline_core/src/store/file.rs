//! File-backed document store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::model::Document;
use crate::store::{decode_or_empty, encode, DocumentStore, StoreResult};

/// Document store keeping the whole document in one JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the given slot path.
    ///
    /// Nothing is read or written until `load`/`save`; the parent
    /// directory is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the slot path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Document {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=document_load module=store status=empty slot={}",
                    self.path.display()
                );
                return Document::new();
            }
            Err(err) => {
                error!(
                    "event=document_load module=store status=fallback slot={} error={err}",
                    self.path.display()
                );
                return Document::new();
            }
        };
        decode_or_empty(&raw, &self.path.to_string_lossy())
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let raw = encode(document)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
