//! Token classification for pattern strings
//!
//! `tokenize` splits a pattern into typed, contiguous tokens for the breakdown view.
//! It is total: whatever the user has typed, it returns tokens whose texts concatenate
//! back to the input.
//!
//! The scan is left to right with a fixed priority at each cursor position:
//!
//! 1. named group opener `(?<name>` (also `(?P<name>`)
//! 2. non-capturing group opener `(?:`
//! 3. escape sequence `\x`
//! 4. character class `[...]`, honoring a leading `^` and escaped characters
//! 5. group delimiters `(` and `)`
//! 6. quantifiers `*`, `+`, `?`, `{m}`, `{m,}`, `{m,n}`
//! 7. anchors `^` and `$`
//! 8. alternation `|`
//! 9. wildcard `.`
//! 10. any other single character as a literal
//!
//! When logos cannot recognize the input at the cursor (an unterminated class, a trailing
//! backslash, a `{` that is not a bounded quantifier) exactly one character is emitted and
//! scanning restarts right after it.

mod notes;
pub mod tokens;

use logos::Logos;
use serde::Serialize;
pub use tokens::PatternToken;

/// Display category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Literal,
    EscapedClass,
    Quantifier,
    Anchor,
    GroupMarker,
    NamedGroupMarker,
    CharacterClass,
    Alternation,
    Wildcard,
    Error,
}

impl From<PatternToken> for TokenKind {
    fn from(raw: PatternToken) -> Self {
        match raw {
            PatternToken::NamedGroupOpen => TokenKind::NamedGroupMarker,
            PatternToken::NonCapturingOpen | PatternToken::GroupOpen | PatternToken::GroupClose => {
                TokenKind::GroupMarker
            }
            PatternToken::Escape => TokenKind::EscapedClass,
            PatternToken::CharacterClass => TokenKind::CharacterClass,
            PatternToken::Quantifier => TokenKind::Quantifier,
            PatternToken::Anchor => TokenKind::Anchor,
            PatternToken::Alternation => TokenKind::Alternation,
            PatternToken::Wildcard => TokenKind::Wildcard,
            PatternToken::Literal => TokenKind::Literal,
        }
    }
}

/// One lexical unit of a pattern, with byte offsets into the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Token {
    fn recognized(raw: PatternToken, source: &str, start: usize, end: usize) -> Self {
        let text = &source[start..end];
        Token {
            kind: raw.into(),
            text: text.to_string(),
            start,
            end,
            note: notes::describe(raw, text),
        }
    }

    /// Single-character token for input logos could not recognize
    fn fallback(ch: char, start: usize, at_end: bool) -> Self {
        let (kind, note) = match ch {
            '[' => (
                TokenKind::Error,
                Some("unterminated character class".to_string()),
            ),
            '\\' if at_end => (TokenKind::Error, Some("trailing backslash".to_string())),
            // A half-typed `(?<name` still opens a group
            '(' => (
                TokenKind::GroupMarker,
                Some("start of capturing group".to_string()),
            ),
            _ => (TokenKind::Literal, None),
        };
        Token {
            kind,
            text: ch.to_string(),
            start,
            end: start + ch.len_utf8(),
            note,
        }
    }
}

/// Tokenize a pattern string; never fails
pub fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut base = 0;

    'scan: while base < pattern.len() {
        let mut lexer = PatternToken::lexer(&pattern[base..]);

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let start = base + span.start;
            match result {
                Ok(raw) => tokens.push(Token::recognized(raw, pattern, start, base + span.end)),
                Err(()) => {
                    let Some(ch) = pattern[start..].chars().next() else {
                        break 'scan;
                    };
                    let next = start + ch.len_utf8();
                    tokens.push(Token::fallback(ch, start, next == pattern.len()));
                    base = next;
                    continue 'scan;
                }
            }
        }
        break;
    }

    tokens
}

/// Reassemble the source pattern from its tokens
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text.as_str()).collect()
}
