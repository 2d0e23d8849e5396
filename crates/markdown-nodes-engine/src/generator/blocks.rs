//! Block translator: one grammar node in, at most one [`BlockNode`] out.

use markdown_nodes_syntax::{Node, children, line_of};

use super::NodeGenerator;
use crate::error::GenerateError;
use crate::model::{
    BlockNode, BlockQuote, Heading, HeadingSize, List, ListItem, Paragraph, SpanNode,
};

/// Block-level nodes that carry no content of their own: container prefixes,
/// front matter and task markers.
const SKIPPED_BLOCKS: [&str; 6] = [
    "block_continuation",
    "block_quote_marker",
    "minus_metadata",
    "plus_metadata",
    "task_list_marker_checked",
    "task_list_marker_unchecked",
];

impl<'t> NodeGenerator<'t> {
    /// Translate a sequence of sibling nodes, flattening `section` wrappers.
    pub(super) fn blocks_of(
        &mut self,
        nodes: impl IntoIterator<Item = Node<'t>>,
    ) -> Result<Vec<BlockNode>, GenerateError> {
        let mut blocks = Vec::new();
        for node in nodes {
            self.translate_into(node, &mut blocks)?;
        }
        Ok(blocks)
    }

    fn translate_into(
        &mut self,
        node: Node<'t>,
        blocks: &mut Vec<BlockNode>,
    ) -> Result<(), GenerateError> {
        // tree-sitter-md groups everything below a heading into a section
        if node.kind() == "section" {
            for child in children(node) {
                self.translate_into(child, blocks)?;
            }
            return Ok(());
        }

        if let Some(block) = self.translate(node)? {
            blocks.push(block);
        }
        Ok(())
    }

    /// Translate one block node. `None` for nodes that are not content:
    /// lexical tokens, continuation markers and link reference definitions.
    pub(super) fn translate(&mut self, node: Node<'t>) -> Result<Option<BlockNode>, GenerateError> {
        if !node.is_named() || SKIPPED_BLOCKS.contains(&node.kind()) {
            log::trace!("Skipping block-level `{}`", node.kind());
            return Ok(None);
        }

        let block = match node.kind() {
            "atx_heading" | "setext_heading" => BlockNode::Heading(self.heading(node)?),
            "paragraph" => BlockNode::Paragraph(self.paragraph(node)?),
            "block_quote" => BlockNode::BlockQuote(BlockQuote {
                children: self.blocks_of(children(node))?,
            }),
            "thematic_break" => BlockNode::Rule,
            "fenced_code_block" | "indented_code_block" => {
                BlockNode::CodeBlock(self.code_block(node))
            }
            "pipe_table" => BlockNode::Table(self.table(node)?),
            "list" => self.list(node)?,
            "html_block" => BlockNode::HtmlBlock(self.html_block(node)),
            "link_reference_definition" => {
                self.link_definition(node);
                return Ok(None);
            }
            kind => {
                return Err(GenerateError::UnknownBlock {
                    kind,
                    line: line_of(node),
                });
            }
        };
        Ok(Some(block))
    }

    fn heading(&mut self, node: Node<'t>) -> Result<Heading, GenerateError> {
        let parts = children(node);
        let size = parts
            .iter()
            .find_map(|part| heading_size(part.kind()))
            .ok_or(GenerateError::UnknownHeading {
                kind: node.kind(),
                line: line_of(node),
            })?;

        let mut spans = Vec::new();
        for part in parts {
            match part.kind() {
                // ATX content, without the optional closing sequence
                "inline" => {
                    let end = closing_sequence(self.tree.text(part))
                        .map_or(part.end_byte(), |offset| part.start_byte() + offset);
                    spans.extend(self.inline_spans_until(part, end)?);
                }
                // Setext content is a whole paragraph above the underline
                "paragraph" => spans.extend(self.paragraph(part)?.children),
                _ => {}
            }
        }

        Ok(Heading {
            children: trim_blank(spans),
            size,
        })
    }

    pub(super) fn paragraph(&mut self, node: Node<'t>) -> Result<Paragraph, GenerateError> {
        let mut spans = Vec::new();
        for child in children(node) {
            if child.kind() == "inline" {
                spans.extend(self.inline_spans(child)?);
            }
        }
        Ok(Paragraph::new(trim_blank(spans)))
    }

    /// Ordered and unordered lists share item collection; they only differ in
    /// the variant wrapping the items.
    fn list(&mut self, node: Node<'t>) -> Result<BlockNode, GenerateError> {
        let items: Vec<Node<'t>> = children(node)
            .into_iter()
            .filter(|child| child.kind() == "list_item")
            .collect();

        let ordered = items.first().is_some_and(|item| {
            children(*item).iter().any(|part| {
                matches!(part.kind(), "list_marker_dot" | "list_marker_parenthesis")
            })
        });

        let list = self.list_items(&items)?;
        Ok(if ordered {
            BlockNode::OrderedList(list)
        } else {
            BlockNode::UnorderedList(list)
        })
    }

    fn list_items(&mut self, items: &[Node<'t>]) -> Result<List, GenerateError> {
        let mut list_items = Vec::with_capacity(items.len());
        for item in items {
            let content = children(*item)
                .into_iter()
                .filter(|part| !part.kind().starts_with("list_marker"));
            list_items.push(ListItem {
                content: self.blocks_of(content)?,
            });
        }
        Ok(List { list_items })
    }
}

/// Heading size from the marker or underline child of a heading node.
fn heading_size(kind: &str) -> Option<HeadingSize> {
    match kind {
        "setext_h1_underline" => Some(HeadingSize::Headline1),
        "setext_h2_underline" => Some(HeadingSize::Headline2),
        _ => kind
            .strip_prefix("atx_h")
            .and_then(|rest| rest.strip_suffix("_marker"))
            .and_then(|level| level.parse().ok())
            .and_then(HeadingSize::from_level),
    }
}

/// Offset of the closing `#` sequence of ATX heading content, if any. The
/// sequence must be preceded by a space or tab, or be the whole content.
fn closing_sequence(content: &str) -> Option<usize> {
    let trimmed = content.trim_end_matches([' ', '\t', '\r', '\n']);
    let rest = trimmed.trim_end_matches('#');
    if rest.len() == trimmed.len() {
        return None;
    }
    (rest.is_empty() || rest.ends_with([' ', '\t'])).then_some(rest.len())
}

/// Drop whitespace and line breaks from both ends of a span sequence.
pub(super) fn trim_blank(mut spans: Vec<SpanNode>) -> Vec<SpanNode> {
    let trailing = spans.iter().rev().take_while(|span| span.is_blank()).count();
    spans.truncate(spans.len() - trailing);
    let leading = spans.iter().take_while(|span| span.is_blank()).count();
    spans.drain(..leading);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_nodes_syntax::SyntaxTree;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn find<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        children(node).into_iter().find_map(|child| find(child, kind))
    }

    #[test]
    fn inline_container_is_not_a_block() {
        let tree = SyntaxTree::parse("text\n").unwrap();
        let mut generator = NodeGenerator::new(&tree).unwrap();
        let inline = find(tree.root(), "inline").unwrap();

        let err = generator.translate(inline).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnknownBlock {
                kind: "inline",
                line: 1
            }
        ));
        assert_eq!(err.to_string(), "Unknown block node `inline` at line 1");
    }

    #[test]
    fn heading_without_marker_is_an_error() {
        let tree = SyntaxTree::parse("text\n").unwrap();
        let mut generator = NodeGenerator::new(&tree).unwrap();
        let paragraph = find(tree.root(), "paragraph").unwrap();

        let err = generator.heading(paragraph).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnknownHeading {
                kind: "paragraph",
                line: 1
            }
        ));
    }

    #[test]
    fn skipped_nodes_translate_to_nothing() {
        let tree = SyntaxTree::parse("> quoted\n").unwrap();
        let mut generator = NodeGenerator::new(&tree).unwrap();
        let marker = find(tree.root(), "block_quote_marker").unwrap();

        assert_eq!(generator.translate(marker).unwrap(), None);
    }

    #[rstest]
    #[case("atx_h1_marker", Some(HeadingSize::Headline1))]
    #[case("atx_h4_marker", Some(HeadingSize::Headline4))]
    #[case("atx_h6_marker", Some(HeadingSize::Headline6))]
    #[case("setext_h1_underline", Some(HeadingSize::Headline1))]
    #[case("setext_h2_underline", Some(HeadingSize::Headline2))]
    #[case("atx_h7_marker", None)]
    #[case("inline", None)]
    fn heading_size_from_marker(#[case] kind: &str, #[case] expected: Option<HeadingSize>) {
        assert_eq!(heading_size(kind), expected);
    }

    #[rstest]
    #[case(" Title #", Some(7))]
    #[case(" Title ###   ", Some(7))]
    #[case(" Title#", None)]
    #[case(" Title \\#", None)]
    #[case(" Title", None)]
    #[case(" #", Some(1))]
    #[case("##", Some(0))]
    fn atx_closing_sequence(#[case] content: &str, #[case] expected: Option<usize>) {
        assert_eq!(closing_sequence(content), expected);
    }

    #[test]
    fn trim_blank_strips_both_ends() {
        let spans = vec![
            SpanNode::Whitespace,
            SpanNode::Eol,
            SpanNode::text("a"),
            SpanNode::Whitespace,
            SpanNode::text("b"),
            SpanNode::Whitespace,
        ];
        assert_eq!(
            trim_blank(spans),
            vec![SpanNode::text("a"), SpanNode::Whitespace, SpanNode::text("b")]
        );
    }

    #[test]
    fn trim_blank_of_only_whitespace_is_empty() {
        assert_eq!(trim_blank(vec![SpanNode::Whitespace]), vec![]);
    }
}
