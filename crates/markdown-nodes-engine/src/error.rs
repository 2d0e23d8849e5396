use markdown_nodes_syntax::SyntaxError;
use thiserror::Error;

/// Generation failures.
///
/// Every variant is fatal: it means the syntax tree has a shape the
/// generator was not written for (a grammar/generator mismatch), never that
/// the Markdown itself was bad. Incomplete-but-valid input degrades
/// gracefully instead of erroring.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("The root node must be of kind `document`, but it was `{0}`")]
    InvalidRoot(&'static str),

    #[error("Unknown block node `{kind}` at line {line}")]
    UnknownBlock { kind: &'static str, line: usize },

    #[error("Unsure how to handle `{kind}` inside a paragraph (line {line})")]
    UnknownSpan { kind: &'static str, line: usize },

    #[error("Unsure how to handle heading `{kind}` at line {line}")]
    UnknownHeading { kind: &'static str, line: usize },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
