//! The type-safe document model produced by the generator.
//!
//! Closed enums with per-variant payloads: every consumer matches them
//! exhaustively, so a new variant is flagged wherever it must be handled.

pub mod block;
pub mod span;

pub use block::{
    Alignment, BlockNode, BlockQuote, CodeBlock, Column, Heading, HeadingSize, HtmlBlock, List,
    ListItem, Paragraph, Table,
};
pub use span::{CodeSpan, Image, Link, SpanNode, Style, Text};
