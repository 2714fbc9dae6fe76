//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, tree, parser, and store calls into the operations
//!   the presentation layer invokes.
//! - Keep rendering layers decoupled from storage details.

pub mod workspace;
