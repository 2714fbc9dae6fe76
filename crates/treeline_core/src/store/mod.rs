//! Document persistence contracts.
//!
//! # Responsibility
//! - Define the single-slot load/save contract for whole documents.
//! - Keep serialization format and fallback policy out of the service
//!   layer.
//!
//! # Invariants
//! - `load` never fails: an absent slot yields an empty document, a
//!   malformed payload is logged and replaced by an empty document.
//! - `save` writes the entire document in one operation; there is no
//!   partial-write protocol.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::error;

use crate::model::Document;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Result type used by document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying storage medium failure.
    Io(std::io::Error),
    /// Document could not be encoded as JSON.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Single-slot persistence for one document.
///
/// Implementations own exactly one opaque storage slot. Decoding applies
/// the model's serde field defaults, so documents written by older schema
/// versions load with the newer optional fields filled in.
pub trait DocumentStore {
    /// Reads the slot into a document, falling back to an empty document
    /// instead of returning an error.
    fn load(&self) -> Document;
    /// Serializes the full document and writes it to the slot.
    fn save(&self, document: &Document) -> StoreResult<()>;
}

/// Decodes one raw payload, logging and substituting an empty document on
/// failure.
pub(crate) fn decode_or_empty(raw: &str, slot: &str) -> Document {
    match serde_json::from_str(raw) {
        Ok(document) => document,
        Err(err) => {
            error!("event=document_load module=store status=fallback slot={slot} error={err}");
            Document::new()
        }
    }
}

pub(crate) fn encode(document: &Document) -> StoreResult<String> {
    serde_json::to_string(document).map_err(StoreError::from)
}
