//! Workspace use-case service.
//!
//! # Responsibility
//! - Own the one in-memory document and the selected-page id.
//! - Route every mutation through mutate → persist → change signal.
//!
//! # Invariants
//! - The document is loaded exactly once, when the workspace opens.
//! - Unknown block or page ids are silent no-ops, never errors.
//! - A save happens whenever, and only when, the document changed.

use chrono::Local;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Block, BlockId, Document, Page, PageId};
use crate::props::{apply_to_block, extract_properties};
use crate::store::{DocumentStore, StoreResult};
use crate::tree;

/// Leading command that promotes a block to task state.
const TODO_COMMAND: &str = "/todo";

static TODO_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/todo\s*").expect("valid todo command regex"));

/// Outcome of one text edit, used by renderers to decide whether to
/// re-render and where to restore the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    /// The edit promoted the block into task state via the `/todo` command.
    pub promoted: bool,
    /// Property tokens were extracted and the display text rebuilt.
    pub reparsed: bool,
}

/// Application context for one open document.
///
/// Owns the store, the document handle, and the selected-page id; every
/// mutation the presentation layer triggers flows through here. Multiple
/// independent workspaces can coexist in one process.
pub struct Workspace<S: DocumentStore> {
    store: S,
    document: Document,
    selected_page: Option<PageId>,
}

impl<S: DocumentStore> Workspace<S> {
    /// Opens a workspace by loading the store's document once.
    ///
    /// The first page, when present, starts selected.
    pub fn open(store: S) -> Self {
        let document = store.load();
        let selected_page = document.pages.first().map(|page| page.id.clone());
        Self {
            store,
            document,
            selected_page,
        }
    }

    /// Read access to the in-memory document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Currently selected page id.
    pub fn selected_page(&self) -> Option<&str> {
        self.selected_page.as_deref()
    }

    /// Currently selected page, the one a renderer would draw.
    pub fn current_page(&self) -> Option<&Page> {
        let page_id = self.selected_page.as_deref()?;
        self.document.find_page(page_id)
    }

    /// Creates a page, persists the document, and selects the new page.
    pub fn create_page(&mut self, title: impl Into<String>) -> StoreResult<PageId> {
        let page_id = self.document.create_page(title);
        self.selected_page = Some(page_id.clone());
        self.persist()?;
        info!("event=page_created module=service status=ok page={page_id}");
        Ok(page_id)
    }

    /// Renames a page in place. Unknown ids and empty titles are no-ops.
    pub fn rename_page(&mut self, page_id: &str, new_title: &str) -> StoreResult<bool> {
        if !self.document.rename_page(page_id, new_title) {
            return Ok(false);
        }
        self.persist()?;
        info!("event=page_renamed module=service status=ok page={page_id}");
        Ok(true)
    }

    /// Selects a page for subsequent block operations.
    ///
    /// Returns `false` and keeps the current selection when the id is
    /// unknown.
    pub fn select_page(&mut self, page_id: &str) -> bool {
        if self.document.find_page(page_id).is_none() {
            return false;
        }
        self.selected_page = Some(page_id.to_string());
        true
    }

    /// Inserts a fresh empty block as the next sibling of the anchor on
    /// the selected page (the Enter-key behavior): a new entry at the
    /// anchor's own depth, never a child.
    ///
    /// Returns the new block's id for focus, or `None` when the anchor is
    /// unknown or no page is selected.
    pub fn insert_block_after(&mut self, anchor_id: &str) -> StoreResult<Option<BlockId>> {
        let Some(blocks) = self.selected_blocks_mut() else {
            return Ok(None);
        };
        let block = Block::new();
        let block_id = block.id.clone();
        if !tree::insert_after(blocks, anchor_id, block) {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(block_id))
    }

    /// Nests a block under its preceding sibling (Tab).
    pub fn indent_block(&mut self, block_id: &str) -> StoreResult<bool> {
        self.mutate_tree(|blocks| tree::indent(blocks, block_id))
    }

    /// Lifts a block out of its parent, after it (Shift-Tab).
    pub fn outdent_block(&mut self, block_id: &str) -> StoreResult<bool> {
        self.mutate_tree(|blocks| tree::outdent(blocks, block_id))
    }

    /// Reorders a block among its siblings by `delta` positions.
    pub fn move_block(&mut self, block_id: &str, delta: isize) -> StoreResult<bool> {
        self.mutate_tree(|blocks| tree::move_by(blocks, block_id, delta))
    }

    /// Flips a block's collapsed flag.
    pub fn toggle_collapsed(&mut self, block_id: &str) -> StoreResult<bool> {
        self.mutate_block(block_id, |block| {
            block.toggle_collapsed();
            true
        })
    }

    /// Applies one text edit to a block on the selected page.
    ///
    /// A non-task block whose content starts with `/todo` is promoted with
    /// the command prefix stripped and the remaining text parsed; a task
    /// block re-parses property tokens on every edit; a plain block just
    /// stores the text. Returns `None` when the block or page is unknown.
    pub fn edit_block_text(
        &mut self,
        block_id: &str,
        content: &str,
    ) -> StoreResult<Option<TextEdit>> {
        let today = Local::now().date_naive();
        let Some(blocks) = self.selected_blocks_mut() else {
            return Ok(None);
        };
        let Some(block) = tree::get_mut(blocks, block_id) else {
            return Ok(None);
        };

        let edit = if !block.is_task && content.starts_with(TODO_COMMAND) {
            block.promote_to_task();
            block.text = TODO_COMMAND_RE.replace(content, "").into_owned();
            let extraction = extract_properties(&block.text, today);
            let reparsed = apply_to_block(block, extraction);
            TextEdit {
                promoted: true,
                reparsed,
            }
        } else {
            block.text = content.to_string();
            let reparsed = if block.is_task {
                apply_to_block(block, extract_properties(content, today))
            } else {
                false
            };
            TextEdit {
                promoted: false,
                reparsed,
            }
        };

        self.persist()?;
        Ok(Some(edit))
    }

    /// Promotes a block to task state and parses its current text for
    /// property tokens. `done` is left untouched.
    pub fn promote_to_task(&mut self, block_id: &str) -> StoreResult<bool> {
        let today = Local::now().date_naive();
        self.mutate_block(block_id, |block| {
            block.promote_to_task();
            let extraction = extract_properties(&block.text, today);
            apply_to_block(block, extraction);
            true
        })
    }

    /// Sets the completion flag. No-op for blocks not in task state.
    pub fn set_done(&mut self, block_id: &str, done: bool) -> StoreResult<bool> {
        self.mutate_block(block_id, |block| {
            if !block.is_task {
                return false;
            }
            block.done = done;
            true
        })
    }

    /// Demotes a task back to a plain block, clearing completion, due
    /// date, priority, and tags in one compound transition.
    pub fn demote_task(&mut self, block_id: &str) -> StoreResult<bool> {
        self.mutate_block(block_id, |block| {
            if !block.is_task {
                return false;
            }
            block.clear_task();
            true
        })
    }

    /// Removes the due-date chip.
    pub fn clear_due_date(&mut self, block_id: &str) -> StoreResult<bool> {
        self.mutate_block(block_id, |block| {
            if block.due_date.is_none() {
                return false;
            }
            block.due_date = None;
            true
        })
    }

    /// Removes the priority chip.
    pub fn clear_priority(&mut self, block_id: &str) -> StoreResult<bool> {
        self.mutate_block(block_id, |block| {
            if block.priority.is_none() {
                return false;
            }
            block.priority = None;
            true
        })
    }

    /// Removes every occurrence of `tag` from the block.
    pub fn remove_tag(&mut self, block_id: &str, tag: &str) -> StoreResult<bool> {
        self.mutate_block(block_id, |block| {
            let before = block.tags.len();
            block.tags.retain(|existing| existing != tag);
            block.tags.len() != before
        })
    }

    /// Root sequence of the selected page, when one is selected.
    fn selected_blocks_mut(&mut self) -> Option<&mut Vec<Block>> {
        let page_id = self.selected_page.clone()?;
        self.document
            .find_page_mut(&page_id)
            .map(|page| &mut page.blocks)
    }

    fn mutate_tree(&mut self, op: impl FnOnce(&mut Vec<Block>) -> bool) -> StoreResult<bool> {
        let Some(blocks) = self.selected_blocks_mut() else {
            return Ok(false);
        };
        if !op(blocks) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn mutate_block(
        &mut self,
        block_id: &str,
        op: impl FnOnce(&mut Block) -> bool,
    ) -> StoreResult<bool> {
        let Some(blocks) = self.selected_blocks_mut() else {
            return Ok(false);
        };
        let Some(block) = tree::get_mut(blocks, block_id) else {
            return Ok(false);
        };
        if !op(block) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> StoreResult<()> {
        self.store.save(&self.document)
    }
}
