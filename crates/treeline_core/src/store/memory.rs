//! In-memory document store.

use std::cell::RefCell;

use crate::model::Document;
use crate::store::{decode_or_empty, encode, DocumentStore, StoreResult};

/// Document store backed by one in-memory string slot.
///
/// Mirrors the single-key storage medium without touching disk; used by
/// tests and by embedders that bring their own persistence.
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Creates a store with an empty slot.
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Creates a store pre-seeded with a raw payload, as if written by an
    /// earlier version of the format.
    pub fn with_payload(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns a copy of the raw slot contents.
    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Document {
        match self.slot.borrow().as_deref() {
            None => Document::new(),
            Some(raw) => decode_or_empty(raw, "memory"),
        }
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let raw = encode(document)?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }
}
