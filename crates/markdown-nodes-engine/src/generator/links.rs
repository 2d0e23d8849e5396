//! Links, images and link reference definitions.

use std::ops::Range;

use markdown_nodes_syntax::{Node, children};

use super::NodeGenerator;
use super::references::ReferenceDefinition;
use super::spans::strip_angle_brackets;
use crate::error::GenerateError;
use crate::model::{Image, Link, SpanNode};

impl<'t> NodeGenerator<'t> {
    /// Autolinks and inline links: always fully resolved.
    pub(super) fn direct_link(
        &mut self,
        node: Node<'t>,
        ranges: &[Range<usize>],
    ) -> Result<SpanNode, GenerateError> {
        let link = match node.kind() {
            "uri_autolink" => {
                let uri = strip_angle_brackets(self.tree.text(node));
                Link {
                    display_text: vec![SpanNode::text(uri)],
                    url: uri.to_string(),
                    title_text: None,
                }
            }
            "email_autolink" => {
                let address = strip_angle_brackets(self.tree.text(node));
                Link {
                    display_text: vec![SpanNode::text(address)],
                    url: format!("mailto:{address}"),
                    title_text: None,
                }
            }
            _ => {
                let display_text = match child(node, "link_text") {
                    Some(text) => self.display_spans(text, ranges)?,
                    None => Vec::new(),
                };
                Link {
                    display_text,
                    url: self.destination(node),
                    title_text: self.title(node),
                }
            }
        };
        self.references.record_direct();
        Ok(SpanNode::Link(link))
    }

    /// `[text][label]`, `[label][]` and `[label]`. Resolved on sight when the
    /// label is already defined, otherwise left for the resolution pass.
    pub(super) fn reference_link(
        &mut self,
        node: Node<'t>,
        ranges: &[Range<usize>],
    ) -> Result<SpanNode, GenerateError> {
        let text = child(node, "link_text");
        let display_text = match text {
            Some(text) => self.display_spans(text, ranges)?,
            None => Vec::new(),
        };
        let label = match child(node, "link_label").or(text) {
            Some(label) => self.label(label),
            None => String::new(),
        };
        Ok(self.references.link(display_text, label))
    }

    /// Images share link syntax; the description is flattened to plain text.
    pub(super) fn image(
        &mut self,
        node: Node<'t>,
        ranges: &[Range<usize>],
    ) -> Result<SpanNode, GenerateError> {
        let description = child(node, "image_description");
        let content_description = match description {
            Some(description) => {
                let mut raw = String::new();
                self.literal_text(description, self.inner_range(description), ranges, &mut raw);
                raw.split_whitespace().collect::<Vec<_>>().join(" ")
            }
            None => String::new(),
        };

        let inline = children(node).iter().any(|part| part.kind() == "(");
        if inline || child(node, "link_destination").is_some() {
            self.references.record_direct();
            return Ok(SpanNode::Image(Image {
                image_url: self.destination(node),
                content_description,
                title_text: self.title(node),
            }));
        }

        let label = match child(node, "link_label").or(description) {
            Some(label) => self.label(label),
            None => String::new(),
        };
        Ok(self.references.image(content_description, label))
    }

    /// Record a `[label]: destination "title"` definition.
    pub(super) fn link_definition(&mut self, node: Node<'t>) {
        let Some(label) = child(node, "link_label") else {
            log::debug!("Link reference definition without a label, ignoring");
            return;
        };
        let label = self.label(label);
        let definition = ReferenceDefinition {
            url: self.destination(node),
            title: self.title(node),
        };
        log::debug!("Defined reference `{label}` -> {}", definition.url);
        self.references.define(label, definition);
    }

    fn label(&self, node: Node<'_>) -> String {
        self.tree
            .text(node)
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string()
    }

    /// Destination of a link, image or definition, with `<>` and stray
    /// quotes removed. Empty when there is none.
    fn destination(&self, node: Node<'_>) -> String {
        child(node, "link_destination")
            .map(|destination| {
                self.tree
                    .text(destination)
                    .trim_start_matches(['<', '\'', '"'])
                    .trim_end_matches(['>', '\'', '"'])
                    .to_string()
            })
            .unwrap_or_default()
    }

    fn title(&self, node: Node<'_>) -> Option<String> {
        child(node, "link_title").map(|title| {
            let text = self.tree.text(title);
            strip_title_quotes(text).to_string()
        })
    }
}

/// First child of `node` with the given kind.
fn child<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    children(node).into_iter().find(|part| part.kind() == kind)
}

/// Remove the enclosing `"…"`, `'…'` or `(…)` of a link title.
fn strip_title_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some('"'), Some('"')) | (Some('\''), Some('\'')) | (Some('('), Some(')')) => {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}
