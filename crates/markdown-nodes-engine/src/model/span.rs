use serde::Serialize;

/// Inline content of a paragraph, heading, link or table cell.
///
/// Span nodes never reference the source text or the syntax tree they were
/// generated from; every payload is owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpanNode {
    /// A run of literal text with style flags
    Text(Text),
    /// A single space between two inline tokens
    Whitespace,
    /// A forced line break inside a paragraph
    Eol,
    /// Inline code (backtick-delimited), never styled
    CodeSpan(CodeSpan),
    /// A hyperlink with its own inline display content
    Link(Link),
    /// An embedded image
    Image(Image),
}

/// Literal text plus three independent, combinable style flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Text {
    pub text: String,
    pub is_bold: bool,
    pub is_italics: bool,
    pub is_strikethrough: bool,
}

impl Text {
    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.is_bold |= style.bold;
        self.is_italics |= style.italics;
        self.is_strikethrough |= style.strikethrough;
        self
    }

    /// The style flags carried by this text.
    pub fn style(&self) -> Style {
        Style {
            bold: self.is_bold,
            italics: self.is_italics,
            strikethrough: self.is_strikethrough,
        }
    }
}

/// A set of text style flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    pub bold: bool,
    pub italics: bool,
    pub strikethrough: bool,
}

impl Style {
    pub const BOLD: Style = Style {
        bold: true,
        italics: false,
        strikethrough: false,
    };
    pub const ITALICS: Style = Style {
        bold: false,
        italics: true,
        strikethrough: false,
    };
    pub const STRIKETHROUGH: Style = Style {
        bold: false,
        italics: false,
        strikethrough: true,
    };

    pub fn union(self, other: Style) -> Style {
        Style {
            bold: self.bold || other.bold,
            italics: self.italics || other.italics,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSpan {
    pub text: String,
}

/// A link. `url` is always a resolved destination, except for reference
/// links whose label was never defined: those keep the label itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub display_text: Vec<SpanNode>,
    pub url: String,
    pub title_text: Option<String>,
}

/// An image. Unlike [`Link`] the description is flattened to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub image_url: String,
    pub content_description: String,
    pub title_text: Option<String>,
}

impl SpanNode {
    /// Unstyled text span.
    pub fn text(text: impl Into<String>) -> Self {
        SpanNode::Text(Text::plain(text))
    }

    /// Whether this span carries no visible content.
    pub fn is_blank(&self) -> bool {
        matches!(self, SpanNode::Whitespace | SpanNode::Eol)
    }
}
