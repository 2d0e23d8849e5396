use serde::Serialize;

use super::span::SpanNode;

/// A structural unit of a document.
///
/// A document is an ordered `Vec<BlockNode>`; children of every container
/// keep source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockNode {
    Heading(Heading),
    Paragraph(Paragraph),
    BlockQuote(BlockQuote),
    CodeBlock(CodeBlock),
    /// Horizontal separator
    Rule,
    HtmlBlock(HtmlBlock),
    OrderedList(List),
    UnorderedList(List),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub children: Vec<SpanNode>,
    pub size: HeadingSize,
}

/// Heading rank, `Headline1` being the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeadingSize {
    Headline1,
    Headline2,
    Headline3,
    Headline4,
    Headline5,
    Headline6,
}

impl HeadingSize {
    /// Size for an ATX level (`#` count) or setext level; `None` outside 1..=6.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Headline1),
            2 => Some(Self::Headline2),
            3 => Some(Self::Headline3),
            4 => Some(Self::Headline4),
            5 => Some(Self::Headline5),
            6 => Some(Self::Headline6),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::Headline1 => 1,
            Self::Headline2 => 2,
            Self::Headline3 => 3,
            Self::Headline4 => 4,
            Self::Headline5 => 5,
            Self::Headline6 => 6,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub children: Vec<SpanNode>,
}

impl Paragraph {
    pub fn new(children: Vec<SpanNode>) -> Self {
        Self { children }
    }

    /// Placeholder used for table cells missing from short rows.
    pub fn whitespace() -> Self {
        Self {
            children: vec![SpanNode::Whitespace],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockQuote {
    pub children: Vec<BlockNode>,
}

/// Literal code: outer blank lines trimmed, common indentation removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub code: String,
    pub language: Option<String>,
}

/// Raw HTML, not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlBlock {
    pub html: String,
}

/// Items of an ordered or unordered list; the list kind lives on
/// [`BlockNode`], so markers are purely presentational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct List {
    pub list_items: Vec<ListItem>,
}

impl List {
    /// Items paired with their positional number, starting at 1.
    ///
    /// Ordered lists are numbered by position, never by the numerals written
    /// in the source.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &ListItem)> {
        self.list_items
            .iter()
            .enumerate()
            .map(|(index, item)| (index + 1, item))
    }
}

/// Block-level content of one list item, so items can hold paragraphs and
/// nested lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<BlockNode>,
}

/// A GFM table stored column-wise.
///
/// Every column holds the same number of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.cells.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub header: Paragraph,
    pub alignment: Alignment,
    pub cells: Vec<Paragraph>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}
