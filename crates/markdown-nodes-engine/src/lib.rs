//! # markdown-nodes-engine
//!
//! Turns Markdown into an ordered list of typed [`BlockNode`]s ready for a
//! renderer: headings, paragraphs of styled [`SpanNode`]s, quotes, lists,
//! code, tables. Reference-style links are resolved in a second pass so
//! definitions may appear anywhere in the document.
//!
//! ```
//! use markdown_nodes_engine::{BlockNode, SpanNode, generate_nodes};
//!
//! let nodes = generate_nodes("# Hello\n\nworld\n").unwrap();
//! assert_eq!(nodes.len(), 2);
//! let BlockNode::Paragraph(paragraph) = &nodes[1] else {
//!     panic!("expected a paragraph");
//! };
//! assert_eq!(paragraph.children, vec![SpanNode::text("world")]);
//! ```

pub mod error;
pub mod generator;
pub mod model;
pub mod options;

pub use error::GenerateError;
pub use generator::{NodeGenerator, ReferenceDefinition, ReferenceTable};
pub use markdown_nodes_syntax::SyntaxTree;
pub use model::*;
pub use options::{DuplicateDefinitions, GenerateOptions, TableAlignment};

/// Parse and generate a document with default options.
pub fn generate_nodes(markdown: &str) -> Result<Vec<BlockNode>, GenerateError> {
    generate_nodes_with(markdown, &GenerateOptions::default())
}

/// Parse and generate a document.
pub fn generate_nodes_with(
    markdown: &str,
    options: &GenerateOptions,
) -> Result<Vec<BlockNode>, GenerateError> {
    let tree = SyntaxTree::parse(markdown)?;
    NodeGenerator::with_options(&tree, options.clone())?.generate_nodes()
}
