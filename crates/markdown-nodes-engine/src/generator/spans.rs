//! Span translator.
//!
//! The inline grammar only yields nodes for constructs. The plain text
//! between them is lexed and folded into [`SpanNode`]s by [`SpanBuilder`]:
//! words separated by single spaces form one `Text` run, whitespace next to a
//! construct becomes `Whitespace`, and line endings become `Eol`.

use std::ops::Range;

use markdown_nodes_syntax::lexer::{TokenKind, lex};
use markdown_nodes_syntax::{Node, children, line_of, named_children};

use super::NodeGenerator;
use super::blocks::trim_blank;
use crate::error::GenerateError;
use crate::model::{CodeSpan, Link, SpanNode, Style, Text};

impl<'t> NodeGenerator<'t> {
    /// Spans for the inline content of an `inline` or `pipe_table_cell` node.
    pub(super) fn inline_spans(&mut self, container: Node<'t>) -> Result<Vec<SpanNode>, GenerateError> {
        self.inline_spans_until(container, container.end_byte())
    }

    /// Spans for the inline content of `container` that starts before `end`.
    pub(super) fn inline_spans_until(
        &mut self,
        container: Node<'t>,
        end: usize,
    ) -> Result<Vec<SpanNode>, GenerateError> {
        let Some(inline) = self.tree.inline_root(container) else {
            return Ok(Vec::new());
        };
        let (Some(first), Some(last)) = (inline.ranges.first(), inline.ranges.last()) else {
            return Ok(Vec::new());
        };

        let mut builder = SpanBuilder::new(self.options.bare_autolinks);
        let range = first.start..last.end.min(end).max(first.start);
        self.spans_within(inline.node, range, inline.ranges, &mut builder)?;
        Ok(builder.finish())
    }

    /// Display spans of a link text or image description, brackets excluded.
    pub(super) fn display_spans(
        &mut self,
        node: Node<'t>,
        ranges: &[Range<usize>],
    ) -> Result<Vec<SpanNode>, GenerateError> {
        // No bare autolinks inside a link
        let mut builder = SpanBuilder::new(false);
        let range = self.inner_range(node);
        self.spans_within(node, range, ranges, &mut builder)?;
        Ok(trim_blank(builder.finish()))
    }

    /// Translate the children of `parent` that fall inside `range`, together
    /// with the plain text in between.
    fn spans_within(
        &mut self,
        parent: Node<'t>,
        range: Range<usize>,
        ranges: &[Range<usize>],
        builder: &mut SpanBuilder,
    ) -> Result<(), GenerateError> {
        let mut cursor = range.start;
        for child in named_children(parent) {
            if child.end_byte() <= range.start || child.start_byte() >= range.end {
                continue;
            }
            self.push_text(builder, cursor..child.start_byte(), ranges);
            if child.kind() == "hard_line_break" {
                builder.hard_break();
            } else {
                let span = self.span(child, ranges)?;
                builder.push(span);
            }
            cursor = cursor.max(child.end_byte());
        }
        self.push_text(builder, cursor..range.end, ranges);
        Ok(())
    }

    fn push_text(&mut self, builder: &mut SpanBuilder, range: Range<usize>, ranges: &[Range<usize>]) {
        if range.start >= range.end {
            return;
        }
        let text = self.tree.text_in(range, ranges);
        for token in lex(&text) {
            match token.kind {
                TokenKind::Whitespace => builder.space(),
                TokenKind::Newline => builder.newline(),
                TokenKind::Url if builder.autolinks => {
                    self.references.record_direct();
                    builder.push(bare_link(token.text));
                }
                TokenKind::Url | TokenKind::Word => builder.push(SpanNode::text(token.text)),
            }
        }
    }

    /// Translate one inline construct.
    fn span(&mut self, node: Node<'t>, ranges: &[Range<usize>]) -> Result<SpanNode, GenerateError> {
        match node.kind() {
            "emphasis" | "strong_emphasis" | "strikethrough" => {
                Ok(SpanNode::Text(self.styled_text(node, ranges)))
            }
            "code_span" => Ok(SpanNode::CodeSpan(self.code_span(node, ranges))),
            "inline_link" | "uri_autolink" | "email_autolink" => self.direct_link(node, ranges),
            "full_reference_link" | "collapsed_reference_link" | "shortcut_link" => {
                self.reference_link(node, ranges)
            }
            "image" => self.image(node, ranges),
            "backslash_escape" => Ok(SpanNode::text(escaped(self.tree.text(node)))),
            "entity_reference" | "numeric_character_reference" => Ok(SpanNode::text(
                html_escape::decode_html_entities(self.tree.text(node)),
            )),
            // Raw HTML and `$...$` math are kept verbatim
            "html_tag" | "latex_block" => {
                Ok(SpanNode::text(self.tree.text_in(node.byte_range(), ranges)))
            }
            _ if node.child_count() == 0 && !node.is_error() && !node.is_missing() => {
                log::trace!("Treating inline leaf `{}` as text", node.kind());
                Ok(SpanNode::text(self.tree.text(node)))
            }
            kind => Err(GenerateError::UnknownSpan {
                kind,
                line: line_of(node),
            }),
        }
    }

    /// Emphasis, strong emphasis and strikethrough flatten to one `Text`.
    /// A style wrapper whose whole content is another style wrapper
    /// (`***x***`) combines both styles.
    fn styled_text(&self, node: Node<'_>, ranges: &[Range<usize>]) -> Text {
        let style = style_of(node.kind()).unwrap_or_default();
        let content = content_range(node);

        let inner: Vec<Node<'_>> = children(node)
            .into_iter()
            .filter(|child| !is_delimiter(*child))
            .collect();
        if let [only] = inner.as_slice() {
            if style_of(only.kind()).is_some() && only.byte_range() == content {
                return self.styled_text(*only, ranges).with_style(style);
            }
        }

        let mut raw = String::new();
        self.literal_text(node, node.byte_range(), ranges, &mut raw);
        Text::plain(raw.split_whitespace().collect::<Vec<_>>().join(" ")).with_style(style)
    }

    /// Literal text of `node` within `range`: delimiters dropped, escapes and
    /// entities decoded, links reduced to their display text.
    pub(super) fn literal_text(
        &self,
        node: Node<'_>,
        range: Range<usize>,
        ranges: &[Range<usize>],
        out: &mut String,
    ) {
        let mut cursor = range.start;
        for child in children(node) {
            if child.end_byte() <= range.start || child.start_byte() >= range.end {
                continue;
            }
            out.push_str(&self.tree.text_in(cursor..child.start_byte(), ranges));
            cursor = cursor.max(child.end_byte());

            if is_delimiter(child) {
                continue;
            }
            match child.kind() {
                "backslash_escape" => out.push_str(escaped(self.tree.text(child))),
                "entity_reference" | "numeric_character_reference" => {
                    out.push_str(&html_escape::decode_html_entities(self.tree.text(child)))
                }
                "code_span" => out.push_str(&self.code_span(child, ranges).text),
                "hard_line_break" => out.push(' '),
                "uri_autolink" | "email_autolink" => {
                    out.push_str(strip_angle_brackets(self.tree.text(child)))
                }
                "inline_link" | "full_reference_link" | "collapsed_reference_link"
                | "shortcut_link" | "image" => {
                    let text = children(child).into_iter().find(|part| {
                        matches!(part.kind(), "link_text" | "image_description")
                    });
                    if let Some(text) = text {
                        self.literal_text(text, self.inner_range(text), ranges, out);
                    }
                }
                "html_tag" | "latex_block" => {
                    out.push_str(&self.tree.text_in(child.byte_range(), ranges))
                }
                _ if child.child_count() > 0 => {
                    self.literal_text(child, child.byte_range(), ranges, out)
                }
                _ => out.push_str(&self.tree.text_in(child.byte_range(), ranges)),
            }
        }
        out.push_str(&self.tree.text_in(cursor..range.end, ranges));
    }

    /// Code span content with the backtick delimiters removed. Line endings
    /// become spaces and one surrounding space is stripped when present on
    /// both sides.
    pub(super) fn code_span(&self, node: Node<'_>, ranges: &[Range<usize>]) -> CodeSpan {
        let text = self.tree.text_in(content_range(node), ranges);
        let text = text.replace("\r\n", " ").replace('\n', " ");
        let padded = text.len() >= 2 && text.starts_with(' ') && text.ends_with(' ');
        if padded && !text.trim().is_empty() {
            return CodeSpan {
                text: text[1..text.len() - 1].to_string(),
            };
        }
        CodeSpan { text }
    }

    /// Byte range of a bracketed node without its `!`, `[` and `]`.
    pub(super) fn inner_range(&self, node: Node<'_>) -> Range<usize> {
        let text = self.tree.text(node);
        let mut start = node.start_byte();
        let mut end = node.end_byte();

        let body = text.strip_prefix('!').unwrap_or(text);
        start += text.len() - body.len();
        if let Some(rest) = body.strip_prefix('[') {
            start += 1;
            if rest.ends_with(']') {
                end -= 1;
            }
        }
        start..end.max(start)
    }
}

/// Accumulates spans for one run of inline content.
struct SpanBuilder {
    spans: Vec<SpanNode>,
    autolinks: bool,
    pending_space: bool,
    line_start: bool,
    after_hard_break: bool,
}

impl SpanBuilder {
    fn new(autolinks: bool) -> Self {
        Self {
            spans: Vec::new(),
            autolinks,
            pending_space: false,
            line_start: true,
            after_hard_break: false,
        }
    }

    fn space(&mut self) {
        // Indentation of continuation lines is not content
        if !self.line_start {
            self.pending_space = true;
        }
    }

    fn newline(&mut self) {
        if self.after_hard_break {
            self.after_hard_break = false;
            return;
        }
        self.break_line();
    }

    fn hard_break(&mut self) {
        self.break_line();
        self.after_hard_break = true;
    }

    fn break_line(&mut self) {
        self.pending_space = false;
        self.line_start = true;
        self.spans.push(SpanNode::Eol);
    }

    /// Append a span. Plain text directly following plain text joins it,
    /// with a single space if whitespace separated them.
    fn push(&mut self, span: SpanNode) {
        self.line_start = false;
        self.after_hard_break = false;
        let pending_space = std::mem::take(&mut self.pending_space);

        if let SpanNode::Text(next) = &span {
            if is_plain(next) {
                if let Some(SpanNode::Text(last)) = self.spans.last_mut() {
                    if is_plain(last) {
                        if pending_space {
                            last.text.push(' ');
                        }
                        last.text.push_str(&next.text);
                        return;
                    }
                }
            }
        }

        if pending_space {
            self.spans.push(SpanNode::Whitespace);
        }
        self.spans.push(span);
    }

    fn finish(mut self) -> Vec<SpanNode> {
        if self.pending_space {
            self.spans.push(SpanNode::Whitespace);
        }
        self.spans
    }
}

fn is_plain(text: &Text) -> bool {
    text.style() == Style::default()
}

/// A GFM bare autolink. `www.` links get an `http://` scheme.
fn bare_link(text: &str) -> SpanNode {
    let url = if text.starts_with("www.") {
        format!("http://{text}")
    } else {
        text.to_string()
    };
    SpanNode::Link(Link {
        display_text: vec![SpanNode::text(text)],
        url,
        title_text: None,
    })
}

fn style_of(kind: &str) -> Option<Style> {
    match kind {
        "emphasis" => Some(Style::ITALICS),
        "strong_emphasis" => Some(Style::BOLD),
        "strikethrough" => Some(Style::STRIKETHROUGH),
        _ => None,
    }
}

/// Delimiter tokens of emphasis, strikethrough and code spans.
fn is_delimiter(node: Node<'_>) -> bool {
    let kind = node.kind();
    kind.ends_with("_delimiter")
        || (!node.is_named() && kind.chars().all(|c| matches!(c, '*' | '_' | '~' | '`')))
}

/// The range of `node` between its leading and trailing delimiter runs.
///
/// A run is a sequence of touching delimiters, so the opening and closing
/// backticks of `` `a` `` are two separate runs.
fn content_range(node: Node<'_>) -> Range<usize> {
    let parts = children(node);
    let leading = delimiter_run(parts.iter().copied());
    let trailing = delimiter_run(parts[leading..].iter().rev().copied());

    let start = match leading {
        0 => node.start_byte(),
        n => parts[n - 1].end_byte(),
    };
    let end = match trailing {
        0 => node.end_byte(),
        n => parts[parts.len() - n].start_byte(),
    };
    start..end.max(start)
}

/// Number of touching delimiters at the front of `parts`.
fn delimiter_run<'t>(parts: impl Iterator<Item = Node<'t>>) -> usize {
    let mut count = 0;
    let mut previous: Option<Node<'t>> = None;
    for part in parts {
        let touching = previous.is_none_or(|previous| {
            previous.end_byte() == part.start_byte() || part.end_byte() == previous.start_byte()
        });
        if !is_delimiter(part) || !touching {
            break;
        }
        count += 1;
        previous = Some(part);
    }
    count
}

/// The character a backslash escape stands for.
fn escaped(text: &str) -> &str {
    text.strip_prefix('\\').unwrap_or(text)
}

pub(super) fn strip_angle_brackets(text: &str) -> &str {
    text.strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(text)
}
