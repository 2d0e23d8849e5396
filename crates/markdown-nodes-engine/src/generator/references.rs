//! The reference-link table and the deferred resolution pass.

use std::collections::HashMap;

use crate::model::{
    BlockNode, BlockQuote, Column, Heading, Image, Link, List, ListItem, Paragraph, SpanNode,
    Table,
};
use crate::options::DuplicateDefinitions;

/// Destination and title a reference label stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub url: String,
    pub title: Option<String>,
}

/// Link reference definitions of one document, keyed by label as written.
///
/// Reference links that cannot be resolved on sight become placeholders
/// whose destination holds the label; [`ReferenceTable::resolve`] completes
/// them once every definition has been seen.
///
/// Placeholders are tracked by position: every link and image of the
/// document is numbered in the order it is emitted, which is the order the
/// resolution walk visits them. Callers emitting a link or image without
/// going through [`link`](Self::link) or [`image`](Self::image) report it
/// with [`record_direct`](Self::record_direct).
#[derive(Debug, Default)]
pub struct ReferenceTable {
    definitions: HashMap<String, ReferenceDefinition>,
    /// Labels of the placeholders, by link position.
    placeholders: HashMap<usize, String>,
    /// Links and images emitted so far.
    emitted: usize,
    precedence: DuplicateDefinitions,
}

impl ReferenceTable {
    pub fn new(precedence: DuplicateDefinitions) -> Self {
        Self {
            precedence,
            ..Self::default()
        }
    }

    pub fn define(&mut self, label: String, definition: ReferenceDefinition) {
        match self.precedence {
            DuplicateDefinitions::FirstWins => {
                self.definitions.entry(label).or_insert(definition);
            }
            DuplicateDefinitions::LastWins => {
                self.definitions.insert(label, definition);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.definitions.get(label)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Count a link or image that is complete as emitted.
    pub fn record_direct(&mut self) {
        self.emitted += 1;
    }

    /// A reference link, resolved if possible, otherwise a placeholder.
    pub fn link(&mut self, display_text: Vec<SpanNode>, label: String) -> SpanNode {
        let link = match self.resolvable_now(&label) {
            Some(definition) => Link {
                display_text,
                url: definition.url.clone(),
                title_text: definition.title.clone(),
            },
            None => {
                log::debug!("Deferring reference link `{label}`");
                Link {
                    display_text,
                    url: self.defer(label),
                    title_text: None,
                }
            }
        };
        self.emitted += 1;
        SpanNode::Link(link)
    }

    /// A reference image, resolved if possible, otherwise a placeholder.
    pub fn image(&mut self, content_description: String, label: String) -> SpanNode {
        let image = match self.resolvable_now(&label) {
            Some(definition) => Image {
                image_url: definition.url.clone(),
                content_description,
                title_text: definition.title.clone(),
            },
            None => {
                log::debug!("Deferring reference image `{label}`");
                Image {
                    image_url: self.defer(label),
                    content_description,
                    title_text: None,
                }
            }
        };
        self.emitted += 1;
        SpanNode::Image(image)
    }

    /// Register a placeholder at the current position and return its
    /// destination, the label itself.
    fn defer(&mut self, label: String) -> String {
        self.placeholders.insert(self.emitted, label.clone());
        label
    }

    /// With last-wins precedence a later definition can still replace the
    /// current one, so nothing resolves before the whole document is seen.
    fn resolvable_now(&self, label: &str) -> Option<&ReferenceDefinition> {
        match self.precedence {
            DuplicateDefinitions::FirstWins => self.definitions.get(label),
            DuplicateDefinitions::LastWins => None,
        }
    }

    /// Rewrite every placeholder in `nodes` whose label is now defined.
    /// Placeholders with undefined labels keep the label as destination.
    pub fn resolve(&self, nodes: Vec<BlockNode>) -> Vec<BlockNode> {
        if self.placeholders.is_empty() {
            return nodes;
        }
        Resolver {
            references: self,
            position: 0,
        }
        .blocks(nodes)
    }

    /// Labels used by reference links but never defined, sorted and
    /// deduplicated.
    pub fn unresolved_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .placeholders
            .values()
            .filter(|label| !self.definitions.contains_key(*label))
            .map(String::as_str)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

/// One walk over a finished document, numbering links and images the same
/// way the table did while they were emitted.
struct Resolver<'a> {
    references: &'a ReferenceTable,
    position: usize,
}

impl Resolver<'_> {
    /// The definition for the link or image at the current position, if it
    /// is a placeholder whose label is now defined. Advances the position.
    fn next_definition(&mut self) -> Option<&ReferenceDefinition> {
        let position = self.position;
        self.position += 1;
        let label = self.references.placeholders.get(&position)?;
        self.references.definitions.get(label)
    }

    fn blocks(&mut self, blocks: Vec<BlockNode>) -> Vec<BlockNode> {
        blocks.into_iter().map(|block| self.block(block)).collect()
    }

    fn block(&mut self, block: BlockNode) -> BlockNode {
        match block {
            BlockNode::Heading(heading) => BlockNode::Heading(Heading {
                children: self.spans(heading.children),
                size: heading.size,
            }),
            BlockNode::Paragraph(paragraph) => BlockNode::Paragraph(self.paragraph(paragraph)),
            BlockNode::BlockQuote(quote) => BlockNode::BlockQuote(BlockQuote {
                children: self.blocks(quote.children),
            }),
            BlockNode::OrderedList(list) => BlockNode::OrderedList(self.list(list)),
            BlockNode::UnorderedList(list) => BlockNode::UnorderedList(self.list(list)),
            BlockNode::Table(table) => BlockNode::Table(self.table(table)),
            block @ (BlockNode::CodeBlock(_) | BlockNode::Rule | BlockNode::HtmlBlock(_)) => block,
        }
    }

    fn paragraph(&mut self, paragraph: Paragraph) -> Paragraph {
        Paragraph::new(self.spans(paragraph.children))
    }

    fn list(&mut self, list: List) -> List {
        List {
            list_items: list
                .list_items
                .into_iter()
                .map(|item| ListItem {
                    content: self.blocks(item.content),
                })
                .collect(),
        }
    }

    /// Tables are emitted row by row but stored column by column, so the
    /// walk goes row-major to match the emission order.
    fn table(&mut self, table: Table) -> Table {
        let rows = table.row_count();
        let mut headers = Vec::with_capacity(table.columns.len());
        let mut alignments = Vec::with_capacity(table.columns.len());
        let mut cells: Vec<std::vec::IntoIter<Paragraph>> = Vec::new();
        for column in table.columns {
            headers.push(column.header);
            alignments.push(column.alignment);
            cells.push(column.cells.into_iter());
        }

        let headers: Vec<Paragraph> = headers
            .into_iter()
            .map(|header| self.paragraph(header))
            .collect();
        let mut resolved: Vec<Vec<Paragraph>> = vec![Vec::with_capacity(rows); headers.len()];
        for _ in 0..rows {
            for (column, cells) in cells.iter_mut().enumerate() {
                if let Some(cell) = cells.next() {
                    resolved[column].push(self.paragraph(cell));
                }
            }
        }

        Table {
            columns: headers
                .into_iter()
                .zip(alignments)
                .zip(resolved)
                .map(|((header, alignment), cells)| Column {
                    header,
                    alignment,
                    cells,
                })
                .collect(),
        }
    }

    fn spans(&mut self, spans: Vec<SpanNode>) -> Vec<SpanNode> {
        spans.into_iter().map(|span| self.span(span)).collect()
    }

    /// Link text is emitted before the link around it, so it is walked first.
    fn span(&mut self, span: SpanNode) -> SpanNode {
        match span {
            SpanNode::Link(mut link) => {
                link.display_text = self.spans(link.display_text);
                if let Some(definition) = self.next_definition() {
                    link.url = definition.url.clone();
                    link.title_text = definition.title.clone();
                }
                SpanNode::Link(link)
            }
            SpanNode::Image(mut image) => {
                if let Some(definition) = self.next_definition() {
                    image.image_url = definition.url.clone();
                    image.title_text = definition.title.clone();
                }
                SpanNode::Image(image)
            }
            span @ (SpanNode::Text(_)
            | SpanNode::Whitespace
            | SpanNode::Eol
            | SpanNode::CodeSpan(_)) => span,
        }
    }
}
