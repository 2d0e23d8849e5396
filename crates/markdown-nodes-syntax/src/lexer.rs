//! # Lexer - Tokenizing Inline Text Runs
//!
//! The inline grammar of `tree-sitter-md` only produces nodes for constructs
//! (emphasis, links, code spans, ...). Plain text between those nodes is not
//! represented in the tree at all, so this module splits those gaps into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token:
//!
//! ```
//! use markdown_nodes_syntax::lexer::lex;
//!
//! let input = "see https://example.com now\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are minimal and context-free:
//! - runs of spaces and tabs → [`TokenKind::Whitespace`]
//! - line endings → [`TokenKind::Newline`]
//! - GFM bare autolinks (`http://`, `https://`, `www.`) → [`TokenKind::Url`]
//! - everything else, grouped into runs → [`TokenKind::Word`]
//!
//! Trailing punctuation is split off URLs by [`lex`] following the GFM
//! extended autolink rules, so `see https://a.b.` yields the URL `https://a.b`
//! followed by a `.` word.

use logos::Logos;

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Bare autolink
    #[regex(r"https?://[^ \t\r\n<>]+", priority = 5)]
    #[regex(r"www\.[^ \t\r\n<>]+", priority = 5)]
    Url,

    /// Any run of non-whitespace characters
    #[regex(r"[^ \t\r\n]+")]
    Word,
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        match result {
            Ok(TokenKind::Url) => {
                let (url, rest) = split_trailing_punctuation(text);
                if url.is_empty() || url.ends_with("://") || url == "www." {
                    tokens.push(Token {
                        kind: TokenKind::Word,
                        text,
                    });
                    continue;
                }
                tokens.push(Token {
                    kind: TokenKind::Url,
                    text: url,
                });
                if !rest.is_empty() {
                    tokens.push(Token {
                        kind: TokenKind::Word,
                        text: rest,
                    });
                }
            }
            Ok(kind) => tokens.push(Token { kind, text }),
            // Logos error means an unrecognized character - keep it as a word
            Err(()) => tokens.push(Token {
                kind: TokenKind::Word,
                text,
            }),
        }
    }

    tokens
}

/// Split trailing punctuation off a bare URL.
///
/// `?`, `!`, `.`, `,`, `:`, `*`, `_` and `~` are never the last character of
/// an autolink, and a trailing `)` is only kept while parentheses balance.
fn split_trailing_punctuation(url: &str) -> (&str, &str) {
    let mut end = url.len();
    loop {
        let Some(last) = url[..end].chars().last() else {
            break;
        };
        let trim = match last {
            '?' | '!' | '.' | ',' | ':' | '*' | '_' | '~' | '\'' | '"' => true,
            ')' => {
                let opens = url[..end].matches('(').count();
                let closes = url[..end].matches(')').count();
                closes > opens
            }
            _ => false,
        };
        if !trim {
            break;
        }
        end -= last.len_utf8();
    }
    url.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        let tokens = lex("hello");
        assert_eq!(tokens, vec![token(TokenKind::Word, "hello")]);
    }

    #[test]
    fn lex_whitespace() {
        let tokens = lex("  \t  ");
        assert_eq!(tokens, vec![token(TokenKind::Whitespace, "  \t  ")]);
    }

    #[test]
    fn lex_newline_lf() {
        assert_eq!(lex("\n"), vec![token(TokenKind::Newline, "\n")]);
    }

    #[test]
    fn lex_newline_crlf() {
        assert_eq!(lex("\r\n"), vec![token(TokenKind::Newline, "\r\n")]);
    }

    #[test]
    fn lex_words_and_spaces() {
        let tokens = lex("one two");
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Word, "one"),
                token(TokenKind::Whitespace, " "),
                token(TokenKind::Word, "two"),
            ]
        );
    }

    #[test]
    fn lex_bare_url() {
        let tokens = lex("visit https://google.com today");
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Word, "visit"),
                token(TokenKind::Whitespace, " "),
                token(TokenKind::Url, "https://google.com"),
                token(TokenKind::Whitespace, " "),
                token(TokenKind::Word, "today"),
            ]
        );
    }

    #[test]
    fn lex_www_url() {
        assert_eq!(
            lex("www.example.com"),
            vec![token(TokenKind::Url, "www.example.com")]
        );
    }

    #[test]
    fn url_trailing_punctuation_is_split() {
        assert_eq!(
            lex("https://a.example/path."),
            vec![
                token(TokenKind::Url, "https://a.example/path"),
                token(TokenKind::Word, "."),
            ]
        );
    }

    #[test]
    fn url_keeps_balanced_parentheses() {
        assert_eq!(
            lex("https://en.wikipedia.org/wiki/Rust_(language)"),
            vec![token(
                TokenKind::Url,
                "https://en.wikipedia.org/wiki/Rust_(language)"
            )]
        );
    }

    #[test]
    fn url_drops_unbalanced_parenthesis() {
        assert_eq!(
            lex("https://example.com)"),
            vec![
                token(TokenKind::Url, "https://example.com"),
                token(TokenKind::Word, ")"),
            ]
        );
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "Hello there\nsee www.rust-lang.org, ok?\r\n  done";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }
}
