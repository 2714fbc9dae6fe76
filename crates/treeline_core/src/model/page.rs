//! Page domain model.

use serde::{Deserialize, Serialize};

use crate::model::block::Block;
use crate::model::fresh_id;

/// Stable opaque identifier for one page.
///
/// Shares the generation scheme with [`crate::model::BlockId`] but lives in
/// a disjoint namespace.
pub type PageId = String;

/// A named top-level container owning one block tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stable opaque id, unique across the document's pages.
    pub id: PageId,
    /// User-facing title.
    pub title: String,
    /// Root sibling sequence of the page's block tree.
    pub blocks: Vec<Block>,
}

impl Page {
    /// Creates a page seeded with one empty block, so the editor always
    /// has a focus target.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            title: title.into(),
            blocks: vec![Block::new()],
        }
    }
}
