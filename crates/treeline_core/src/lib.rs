//! Core domain logic for Treeline, a single-user outline editor.
//! This crate is the single source of truth for document invariants.

pub mod logging;
pub mod model;
pub mod props;
pub mod service;
pub mod store;
pub mod tree;

pub use logging::{default_log_level, init_logging};
pub use model::{fresh_id, Block, BlockId, Document, Page, PageId};
pub use props::{apply_to_block, extract_properties, Extraction};
pub use service::workspace::{TextEdit, Workspace};
pub use store::{DocumentStore, FileStore, MemoryStore, StoreError, StoreResult};
pub use tree::{locate, Location};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
