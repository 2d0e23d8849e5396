//! # Node Generator
//!
//! Walks the grammar-tagged [`SyntaxTree`] depth first and translates it
//! into the typed document model.
//!
//! ## Passes
//!
//! 1. **Structural translation**: every block node is translated by
//!    [`blocks`], every piece of inline content by [`spans`] and [`links`].
//!    Link reference definitions are recorded in the [`ReferenceTable`]
//!    instead of producing nodes.
//! 2. **Reference resolution**: definitions may appear after their first
//!    use, so reference links that could not be resolved on sight are
//!    emitted as placeholders and completed by a second walk over the
//!    finished tree ([`ReferenceTable::resolve`]).
//!
//! The reference table lives inside one generator and is dropped with it;
//! nothing is shared between documents.
//!
//! ```
//! use markdown_nodes_engine::{BlockNode, NodeGenerator, SyntaxTree};
//!
//! let source = "[x][1]\n\n[1]: http://a\n";
//! let tree = SyntaxTree::parse(source).unwrap();
//! let nodes = NodeGenerator::new(&tree).unwrap().generate_nodes().unwrap();
//! assert!(matches!(nodes[0], BlockNode::Paragraph(_)));
//! ```

mod blocks;
mod code;
mod links;
mod references;
mod spans;
mod table;

pub use references::{ReferenceDefinition, ReferenceTable};

use markdown_nodes_syntax::{SyntaxTree, children};

use crate::error::GenerateError;
use crate::model::BlockNode;
use crate::options::GenerateOptions;

/// Grammar kind of the block tree root.
const DOCUMENT: &str = "document";

/// Translates one parsed document into [`BlockNode`]s.
pub struct NodeGenerator<'t> {
    tree: &'t SyntaxTree,
    options: GenerateOptions,
    references: ReferenceTable,
}

impl<'t> NodeGenerator<'t> {
    /// Create a generator with default options.
    ///
    /// Fails if the tree's root is not a `document` node.
    pub fn new(tree: &'t SyntaxTree) -> Result<Self, GenerateError> {
        Self::with_options(tree, GenerateOptions::default())
    }

    pub fn with_options(
        tree: &'t SyntaxTree,
        options: GenerateOptions,
    ) -> Result<Self, GenerateError> {
        let root = tree.root();
        if root.kind() != DOCUMENT {
            return Err(GenerateError::InvalidRoot(root.kind()));
        }

        let references = ReferenceTable::new(options.duplicate_definitions);
        Ok(Self {
            tree,
            options,
            references,
        })
    }

    /// Generate the document. Consumes the generator: the reference table
    /// only lives for one generation.
    pub fn generate_nodes(mut self) -> Result<Vec<BlockNode>, GenerateError> {
        let root = self.tree.root();
        let nodes = self.blocks_of(children(root))?;

        let nodes = self.references.resolve(nodes);
        for label in self.references.unresolved_labels() {
            log::warn!("Reference label `{label}` is never defined; keeping it as the destination");
        }

        log::debug!(
            "Generated {} top-level blocks with {} reference definitions",
            nodes.len(),
            self.references.len()
        );
        Ok(nodes)
    }
}
