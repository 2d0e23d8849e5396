//! # markdown-nodes-syntax
//!
//! The syntax layer the node generator consumes: a generic, grammar-tagged
//! tree of positioned nodes over the original Markdown source, produced by
//! [tree-sitter-md], plus a [Logos] lexer for the plain text the inline
//! grammar leaves between its nodes.
//!
//! [tree-sitter-md]: https://docs.rs/tree-sitter-md
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → MarkdownParser → block tree ─┐
//!                                             ├→ MarkdownTree → SyntaxTree
//!   inline / pipe_table_cell nodes            │
//!        → inline grammar → inline trees ─────┘
//! ```
//!
//! Nodes are only identified by their grammar `kind()` string; nothing here
//! knows about headings or links as types. Turning the tree into typed
//! document nodes is the job of `markdown-nodes-engine`.
//!
//! ## Quick Start
//!
//! ```
//! use markdown_nodes_syntax::SyntaxTree;
//!
//! let tree = SyntaxTree::parse("# Hello\n").unwrap();
//! assert_eq!(tree.root().kind(), "document");
//! ```

pub mod lexer;
pub mod tree;

pub use tree::{InlineRoot, SyntaxTree, children, line_of, named_children};
pub use tree_sitter::Node;

use thiserror::Error;

/// Failures of the external parser. These indicate a broken grammar build or
/// a cancelled parse, never a problem with the Markdown text itself.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("tree-sitter-md produced no syntax tree")]
    NoTree,
}
