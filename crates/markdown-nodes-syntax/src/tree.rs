//! The combined block + inline syntax tree.
//!
//! `tree-sitter-md` ships two grammars. The block grammar covers the whole
//! document and leaves every run of inline content as an opaque `inline` (or
//! `pipe_table_cell`) node, which [`MarkdownParser`] then parses with the
//! inline grammar over that node's bytes minus its named children (the `> `
//! prefix of a quoted continuation line, for example).

use std::collections::HashMap;
use std::ops::Range;

use tree_sitter::Node;
use tree_sitter_md::{MarkdownParser, MarkdownTree};

use crate::SyntaxError;

/// The root of an inline tree, borrowed from a [`SyntaxTree`].
#[derive(Debug, Clone, Copy)]
pub struct InlineRoot<'t> {
    pub node: Node<'t>,
    /// Byte ranges of the source that belong to this inline content.
    pub ranges: &'t [Range<usize>],
}

/// A parsed Markdown document: the block tree plus one inline tree per
/// inline container, all positioned over the source text.
pub struct SyntaxTree {
    source: String,
    tree: MarkdownTree,
    /// Included ranges of every inline tree, keyed by its root node id.
    inline_ranges: HashMap<usize, Vec<Range<usize>>>,
}

impl SyntaxTree {
    /// Parse `source` with the block grammar, then every inline container
    /// with the inline grammar.
    ///
    /// The block grammar only closes its last block on a line ending, so a
    /// source without a final newline is parsed with one appended.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let mut source = source.to_string();
        if !source.is_empty() && !source.ends_with('\n') {
            source.push('\n');
        }

        let tree = MarkdownParser::default()
            .parse(source.as_bytes(), None)
            .ok_or(SyntaxError::NoTree)?;

        let inline_ranges = tree
            .inline_trees()
            .iter()
            .map(|inline| {
                let ranges = inline
                    .included_ranges()
                    .iter()
                    .map(|range| range.start_byte..range.end_byte)
                    .collect();
                (inline.root_node().id(), ranges)
            })
            .collect();

        Ok(Self {
            source,
            tree,
            inline_ranges,
        })
    }

    /// The parsed source text, newline-terminated unless empty.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node of the block tree (`document` for a well-formed parse).
    pub fn root(&self) -> Node<'_> {
        self.tree.block_tree().root_node()
    }

    /// The inline tree parsed for an `inline` or `pipe_table_cell` node.
    ///
    /// Returns `None` for nodes that are not inline containers.
    pub fn inline_root(&self, node: Node<'_>) -> Option<InlineRoot<'_>> {
        let node = self.tree.inline_tree(&node)?.root_node();
        let ranges = self.inline_ranges.get(&node.id())?;
        Some(InlineRoot { node, ranges })
    }

    /// Source text covered by `node`, verbatim.
    pub fn text(&self, node: Node<'_>) -> &str {
        self.slice(node.byte_range())
    }

    /// Source text of a byte range. Out-of-bounds ranges yield `""`.
    pub fn slice(&self, range: Range<usize>) -> &str {
        self.source.get(range).unwrap_or("")
    }

    /// Source text of `node` with the text of its named children removed.
    ///
    /// Used for leaf-like blocks (code, HTML) whose only named children are
    /// container prefixes of continuation lines.
    pub fn content_text(&self, node: Node<'_>) -> String {
        let mut text = String::new();
        let mut start = node.start_byte();
        for child in named_children(node) {
            text.push_str(self.slice(start..child.start_byte()));
            start = child.end_byte();
        }
        text.push_str(self.slice(start..node.end_byte()));
        text
    }

    /// Source text of `range`, restricted to the `included` byte ranges.
    pub fn text_in(&self, range: Range<usize>, included: &[Range<usize>]) -> String {
        let mut text = String::new();
        for part in included {
            let start = part.start.max(range.start);
            let end = part.end.min(range.end);
            if start < end {
                text.push_str(self.slice(start..end));
            }
        }
        text
    }
}

/// All children of `node`, named and anonymous, in source order.
pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children of `node` in source order.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// 1-based line number of a node, for diagnostics.
pub fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn find<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        children(node).into_iter().find_map(|child| find(child, kind))
    }

    #[test]
    fn root_is_document() {
        let tree = SyntaxTree::parse("# Hello\n").unwrap();
        assert_eq!(tree.root().kind(), "document");
    }

    #[test]
    fn source_without_final_newline_is_terminated() {
        let tree = SyntaxTree::parse("# Hello").unwrap();
        assert_eq!(tree.source(), "# Hello\n");
        assert_eq!(tree.root().kind(), "document");
        assert!(find(tree.root(), "atx_heading").is_some());
    }

    #[test]
    fn setext_underline_on_the_last_line() {
        let tree = SyntaxTree::parse("Heading\n=======").unwrap();
        assert!(find(tree.root(), "setext_h1_underline").is_some());
    }

    #[test]
    fn empty_source_stays_empty() {
        let tree = SyntaxTree::parse("").unwrap();
        assert_eq!(tree.source(), "");
        assert_eq!(tree.root().kind(), "document");
    }

    #[test]
    fn block_nodes_have_no_inline_tree() {
        let tree = SyntaxTree::parse("para\n").unwrap();
        let paragraph = find(tree.root(), "paragraph").unwrap();
        assert!(tree.inline_root(paragraph).is_none());
    }

    #[test]
    fn paragraph_has_inline_tree() {
        let source = "Hello *world*\n";
        let tree = SyntaxTree::parse(source).unwrap();
        let inline = find(tree.root(), "inline").unwrap();
        let root = tree.inline_root(inline).unwrap();

        assert!(find(root.node, "emphasis").is_some());
        assert_eq!(tree.text_in(0..source.len(), root.ranges), "Hello *world*");
    }

    #[test]
    fn quote_continuation_is_excluded_from_inline_ranges() {
        let source = "> first\n> second\n";
        let tree = SyntaxTree::parse(source).unwrap();
        let inline = find(tree.root(), "inline").unwrap();
        let root = tree.inline_root(inline).unwrap();

        let text = tree.text_in(0..source.len(), root.ranges);
        assert!(!text.contains('>'), "continuation marker leaked: {text:?}");
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn table_cells_have_inline_trees() {
        let source = "| a | b |\n| --- | --- |\n| 1 | 2 |\n";
        let tree = SyntaxTree::parse(source).unwrap();
        let cell = find(tree.root(), "pipe_table_cell").unwrap();
        assert!(tree.inline_root(cell).is_some());
    }

    #[test]
    fn text_in_clips_to_included_ranges() {
        let source = "abcdef";
        let tree = SyntaxTree::parse(source).unwrap();
        assert_eq!(tree.text_in(1..5, &[0..2, 3..6]), "bde");
    }

    #[test]
    fn slice_out_of_bounds_is_empty() {
        let tree = SyntaxTree::parse("abc").unwrap();
        assert_eq!(tree.slice(2..10), "");
    }
}
