//! Block domain model.
//!
//! # Responsibility
//! - Define the outline entry record persisted inside each page tree.
//! - Provide the task-state transitions shared by every mutation path.
//!
//! # Invariants
//! - `id` is stable and unique across the owning document.
//! - `children` is a strict tree: each block is owned by exactly one
//!   sibling sequence, with no cycles.
//! - `clear_task` is the only transition that resets `done`; promotion
//!   paths leave it untouched.

use serde::{Deserialize, Serialize};

use crate::model::fresh_id;

/// Stable opaque identifier for one block.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BlockId = String;

/// One outline entry: a unit of text, task metadata, and nesting.
///
/// Fields are serialized in camelCase to stay byte-compatible with
/// documents written by earlier versions of the format. Every field except
/// `id` and `text` carries a serde default so older documents that predate
/// it load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Stable opaque id, unique across the whole document.
    pub id: BlockId,
    /// Display text, with recognized task tokens already stripped.
    pub text: String,
    /// Ordered child blocks.
    #[serde(default)]
    pub children: Vec<Block>,
    /// Whether the renderer hides descendants of this block.
    #[serde(default)]
    pub collapsed: bool,
    /// Whether this block carries task state.
    #[serde(default)]
    pub is_task: bool,
    /// Completion flag. Meaningful only while `is_task` is set; may persist
    /// stale across promotion because only `clear_task` resets it.
    #[serde(default)]
    pub done: bool,
    /// Due date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Priority level, 1..=5 when written by the property parser.
    #[serde(default)]
    pub priority: Option<u8>,
    /// Tags in insertion order. Duplicates are preserved.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Block {
    /// Creates an empty block with a fresh id and all task fields unset.
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Creates a block with the given display text and a fresh id.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            text: text.into(),
            children: Vec::new(),
            collapsed: false,
            is_task: false,
            done: false,
            due_date: None,
            priority: None,
            tags: Vec::new(),
        }
    }

    /// Returns whether the renderer should show a disclosure marker.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Flips the collapsed flag.
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Marks the block as a task. `done` is intentionally left untouched.
    pub fn promote_to_task(&mut self) {
        self.is_task = true;
    }

    /// Demotes the block from task state, clearing completion, due date,
    /// priority, and tags together as one compound transition.
    pub fn clear_task(&mut self) {
        self.is_task = false;
        self.done = false;
        self.due_date = None;
        self.priority = None;
        self.tags.clear();
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}
