//! Plain-text outline of a generated document, one block per paragraph of
//! output. Styling is shown with Markdown-like markers so the structure the
//! generator found is visible at a glance.

use markdown_nodes_engine::{Alignment, BlockNode, List, SpanNode, Table};

pub fn render(nodes: &[BlockNode]) -> String {
    nodes
        .iter()
        .map(|node| block_lines(node).join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_lines(node: &BlockNode) -> Vec<String> {
    match node {
        BlockNode::Heading(heading) => {
            let prefix = "#".repeat(heading.size.level() as usize);
            prefixed(&spans(&heading.children), &format!("{prefix} "), "  ")
        }
        BlockNode::Paragraph(paragraph) => lines(&spans(&paragraph.children)),
        BlockNode::BlockQuote(quote) => {
            let inner: Vec<String> = quote.children.iter().flat_map(block_lines).collect();
            inner.iter().map(|line| format!("> {line}").trim_end().to_string()).collect()
        }
        BlockNode::CodeBlock(code) => {
            let mut out = vec![format!("```{}", code.language.as_deref().unwrap_or(""))];
            out.extend(code.code.lines().map(str::to_string));
            out.push("```".to_string());
            out
        }
        BlockNode::Rule => vec!["---".to_string()],
        BlockNode::HtmlBlock(html) => lines(&html.html),
        BlockNode::OrderedList(list) => list_lines(list, |number| format!("{number}. ")),
        BlockNode::UnorderedList(list) => list_lines(list, |_| "• ".to_string()),
        BlockNode::Table(table) => table_lines(table),
    }
}

fn list_lines(list: &List, marker: impl Fn(usize) -> String) -> Vec<String> {
    let mut out = Vec::new();
    for (number, item) in list.numbered() {
        let marker = marker(number);
        let indent = " ".repeat(marker.chars().count());
        let content: Vec<String> = item.content.iter().flat_map(block_lines).collect();
        out.extend(prefixed(&content.join("\n"), &marker, &indent));
    }
    out
}

fn table_lines(table: &Table) -> Vec<String> {
    let row = |cells: Vec<String>| format!("| {} |", cells.join(" | "));

    let mut out = vec![row(table
        .columns
        .iter()
        .map(|column| spans(&column.header.children))
        .collect())];
    out.push(row(table
        .columns
        .iter()
        .map(|column| match column.alignment {
            Alignment::Left => ":--".to_string(),
            Alignment::Center => ":-:".to_string(),
            Alignment::Right => "--:".to_string(),
        })
        .collect()));
    for index in 0..table.row_count() {
        out.push(row(table
            .columns
            .iter()
            .map(|column| {
                column
                    .cells
                    .get(index)
                    .map(|cell| spans(&cell.children))
                    .unwrap_or_default()
            })
            .collect()));
    }
    out
}

/// Inline content as one string; `Eol` becomes a newline.
fn spans(children: &[SpanNode]) -> String {
    let mut out = String::new();
    for span in children {
        match span {
            SpanNode::Text(text) => {
                let mut marker = String::new();
                if text.is_bold {
                    marker.push_str("**");
                }
                if text.is_italics {
                    marker.push('*');
                }
                if text.is_strikethrough {
                    marker.push_str("~~");
                }
                let closing: String = marker.chars().rev().collect();
                out.push_str(&format!("{marker}{}{closing}", text.text));
            }
            SpanNode::Whitespace => out.push(' '),
            SpanNode::Eol => out.push('\n'),
            SpanNode::CodeSpan(code) => out.push_str(&format!("`{}`", code.text)),
            SpanNode::Link(link) => {
                out.push_str(&format!("[{}]({})", spans(&link.display_text), link.url))
            }
            SpanNode::Image(image) => {
                out.push_str(&format!("![{}]({})", image.content_description, image.image_url))
            }
        }
    }
    out
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Prefix the first line with `first` and every following line with `rest`.
fn prefixed(text: &str, first: &str, rest: &str) -> Vec<String> {
    let mut out: Vec<String> = text
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let prefix = if index == 0 { first } else { rest };
            format!("{prefix}{line}").trim_end().to_string()
        })
        .collect();
    if out.is_empty() {
        out.push(first.trim_end().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use markdown_nodes_engine::generate_nodes;

    fn outline(markdown: &str) -> String {
        render(&generate_nodes(markdown).unwrap())
    }

    #[test]
    fn snapshot_headings_and_paragraphs() {
        assert_snapshot!(outline("# Title\n\n**bold** _italics_ ~~gone~~ `code`\n\n## Sub\n"), @r"
# Title

**bold** *italics* ~~gone~~ `code`

## Sub
");
    }

    #[test]
    fn snapshot_nested_lists() {
        assert_snapshot!(outline("- outer\n  1. first\n  2. second\n     - inner\n- last\n"), @r"
• outer
  1. first
  2. second
     • inner
• last
");
    }

    #[test]
    fn snapshot_quote_and_code() {
        assert_snapshot!(outline("> quoted\n> > deeper\n\n```rust\nlet x = 1;\n```\n\n***\n"), @r"
> quoted
> > deeper

```rust
let x = 1;
```

---
");
    }

    #[test]
    fn snapshot_links_and_table() {
        assert_snapshot!(outline("[x][1] and ![logo](http://img)\n\n| a | b |\n| :-: | --: |\n| 1 |\n\n[1]: http://a\n"), @r"
[x](http://a) and ![logo](http://img)

| a | b |
| :-: | --: |
| 1 |   |
");
    }
}
