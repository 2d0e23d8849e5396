//! Code blocks and HTML blocks: literal text taken straight from the source.

use markdown_nodes_syntax::{Node, children};

use super::NodeGenerator;
use crate::model::{CodeBlock, HtmlBlock};

impl NodeGenerator<'_> {
    pub(super) fn code_block(&self, node: Node<'_>) -> CodeBlock {
        let raw = if node.kind() == "fenced_code_block" {
            children(node)
                .into_iter()
                .find(|part| part.kind() == "code_fence_content")
                .map(|content| self.tree.content_text(content))
                .unwrap_or_default()
        } else {
            self.indented_code(node)
        };

        let language = children(node)
            .into_iter()
            .find(|part| part.kind() == "info_string")
            .map(|info| self.tree.text(info).trim().to_string())
            .filter(|language| !language.is_empty());

        CodeBlock {
            code: dedent(raw.replace("\r\n", "\n").trim_matches('\n')),
            language,
        }
    }

    /// Indented code text, one source line at a time.
    ///
    /// The node starts at the container's content column of its first line.
    /// Every line is cut at that column and loses the four columns of
    /// indentation that mark it as code; deeper indentation is kept.
    fn indented_code(&self, node: Node<'_>) -> String {
        let source = self.tree.source();
        let start = node.start_byte();
        let line_start = source
            .get(..start)
            .and_then(|before| before.rfind('\n').map(|newline| newline + 1))
            .unwrap_or(0);
        let column = start - line_start;

        self.tree
            .slice(line_start..node.end_byte())
            .lines()
            .map(|line| strip_code_indent(line.get(column..).unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(super) fn html_block(&self, node: Node<'_>) -> HtmlBlock {
        let html = self.tree.content_text(node);
        HtmlBlock {
            html: html.trim_end_matches(['\n', '\r']).to_string(),
        }
    }
}

/// Drop up to four columns of leading whitespace; a tab advances to the
/// next multiple of four.
fn strip_code_indent(line: &str) -> &str {
    let mut columns = 0;
    for (index, c) in line.char_indices() {
        if columns >= 4 {
            return &line[index..];
        }
        match c {
            ' ' => columns += 1,
            '\t' => columns += 4 - columns % 4,
            _ => return &line[index..],
        }
    }
    ""
}

/// Strip the longest run of leading spaces and tabs shared by every
/// non-blank line. Blank lines become empty.
fn dedent(code: &str) -> String {
    let indent = code
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("    a\n    b", "a\nb")]
    #[case("  a\n    b", "a\n  b")]
    #[case("    a\n\n    b", "a\n\nb")]
    #[case("a\n  b", "a\n  b")]
    #[case("\ta\n\tb", "a\nb")]
    #[case("   \n  a", "\na")]
    #[case("", "")]
    fn dedent_strips_common_indent(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(dedent(code), expected);
    }

    #[rstest]
    #[case("    code", "code")]
    #[case("      deeper", "  deeper")]
    #[case("\tcode", "code")]
    #[case("  \tcode", "code")]
    #[case("     \tcode", " \tcode")]
    #[case("   ", "")]
    #[case("", "")]
    fn code_indent_is_four_columns(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(strip_code_indent(line), expected);
    }
}
