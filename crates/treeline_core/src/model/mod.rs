//! Outline domain model.
//!
//! # Responsibility
//! - Define the persisted document shape: pages owning block trees.
//! - Provide page-collection operations (create, rename, find).
//! - Generate opaque identifiers shared by the block and page namespaces.
//!
//! # Invariants
//! - Every page and block is identified by a stable opaque string id.
//! - A freshly created page owns at least one (empty) block.
//! - The `Document` is the whole persisted unit: one read/write per save.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod block;
pub mod page;

pub use block::{Block, BlockId};
pub use page::{Page, PageId};

/// Generates a fresh opaque identifier.
///
/// Uniqueness is best-effort (UUID v4 entropy), not cryptographically
/// guaranteed. Block and page ids share this scheme but live in disjoint
/// namespaces; a collision across namespaces is harmless. Ids loaded from
/// older documents may come from other schemes and are kept verbatim.
pub fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The entire persisted state: every page the user owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in creation order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Creates an empty document with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new page seeded with one empty block and returns its id.
    pub fn create_page(&mut self, title: impl Into<String>) -> PageId {
        let page = Page::new(title);
        let page_id = page.id.clone();
        self.pages.push(page);
        page_id
    }

    /// Renames a page in place.
    ///
    /// Returns `false` without touching the document when the id is
    /// unknown or the new title is empty.
    pub fn rename_page(&mut self, page_id: &str, new_title: &str) -> bool {
        if new_title.is_empty() {
            return false;
        }
        match self.find_page_mut(page_id) {
            Some(page) => {
                page.title = new_title.to_string();
                true
            }
            None => false,
        }
    }

    /// Finds a page by id.
    pub fn find_page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == page_id)
    }

    /// Finds a page by id for mutation.
    pub fn find_page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id == page_id)
    }
}
