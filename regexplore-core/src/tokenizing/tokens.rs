//! Raw lexical rules for pattern strings
//!
//! Rules are declared with the logos derive. Every rule starts with a distinct leading
//! character except the `(` family, where longest match picks the named group opener over
//! `(?:` over a bare `(`. That makes logos' longest-match resolution agree with the fixed
//! scan priority the breakdown view relies on.
use logos::Logos;

/// All lexical units logos can recognize in a pattern
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum PatternToken {
    // Groups
    #[regex(r"\(\?P?<[^>=!][^>]*>")]
    NamedGroupOpen,
    #[token("(?:")]
    NonCapturingOpen,
    #[token("(")]
    GroupOpen,
    #[token(")")]
    GroupClose,

    // Backslash plus exactly one character, newline included
    #[regex(r"\\(.|\n)")]
    Escape,

    // Bracketed class up to the first unescaped `]`
    #[regex(r"\[\^?(\\(.|\n)|[^\\\]])*\]")]
    CharacterClass,

    // Repetition
    #[token("*")]
    #[token("+")]
    #[token("?")]
    #[regex(r"\{[0-9]+(,[0-9]*)?\}")]
    Quantifier,

    #[token("^")]
    #[token("$")]
    Anchor,

    #[token("|")]
    Alternation,

    #[token(".")]
    Wildcard,

    // Any single character that carries no syntax of its own
    #[regex(r"[^\\\[\(\)\*\+\?\{\^\$\|\.]")]
    Literal,
}

impl PatternToken {
    /// Check if this token opens a group of any flavor
    pub fn is_group_open(&self) -> bool {
        matches!(
            self,
            PatternToken::NamedGroupOpen | PatternToken::NonCapturingOpen | PatternToken::GroupOpen
        )
    }
}
