//! Pattern inference from sample text
//!
//! [`generalize`] walks the text left to right. At each cursor position the recognizers below
//! are tried in order against the remaining suffix and the first one matching a non-empty
//! prefix wins: its fragment is appended and the cursor moves past the matched sample text.
//! When nothing matches, one character is emitted, escaped if it is a metacharacter.
//!
//! Recognizer order:
//!
//! 1. IPv4 dotted quad
//! 2. HTTP method followed by a word boundary
//! 3. HTTP version `HTTP/d.d`
//! 4. three-digit status code (leading 1-5) followed by whitespace or end of input
//! 5. `D/Mon/YYYY` date
//! 6. `YYYY-MM-DD` date
//! 7. `HH:MM:SS` time
//! 8. numeric timezone offset `+HHMM` / `-HHMM`
//! 9. absolute path up to the next space or quote
//! 10. digit run
//! 11. lowercase run
//! 12. uppercase run
//! 13. word-character run
//! 14. whitespace run (a lone space stays literal, anything else becomes `\s+`)
//!
//! The result always matches its own source text, and every other text with the same
//! recognized shape.

use crate::classifying::classify_whole_span;
use crate::classifying::dates::{DAY_MONTH_NAME_YEAR, ISO_DATE};
use crate::classifying::fragments::*;
use crate::error::PatternError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// What a recognizer appends once it wins
#[derive(Debug, Clone, Copy)]
enum Emit {
    Fixed(&'static str),
    Whitespace,
}

/// Extra condition on the character right after the matched prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
    Anything,
    WhitespaceOrEnd,
}

struct Recognizer {
    name: &'static str,
    shape: Regex,
    emit: Emit,
    follow: Follow,
}

impl Recognizer {
    fn new(name: &'static str, shape: &str, emit: Emit) -> Self {
        Recognizer {
            name,
            shape: Regex::new(&format!("^(?:{})", shape)).unwrap(),
            emit,
            follow: Follow::Anything,
        }
    }

    fn fixed(name: &'static str, fragment: &'static str) -> Self {
        Self::new(name, fragment, Emit::Fixed(fragment))
    }

    fn followed_by(mut self, follow: Follow) -> Self {
        self.follow = follow;
        self
    }

    /// Length of the sample text this recognizer claims at the start of `rest`
    fn claim(&self, rest: &str) -> Option<usize> {
        let found = self.shape.find(rest)?;
        if found.end() == 0 {
            return None;
        }
        if self.follow == Follow::WhitespaceOrEnd {
            let next = rest[found.end()..].chars().next();
            if !next.map_or(true, char::is_whitespace) {
                return None;
            }
        }
        Some(found.end())
    }

    fn fragment(&self, matched: &str) -> String {
        match self.emit {
            Emit::Fixed(fragment) => fragment.to_string(),
            Emit::Whitespace if matched == " " => " ".to_string(),
            Emit::Whitespace => WHITESPACE.to_string(),
        }
    }
}

static RECOGNIZERS: Lazy<Vec<Recognizer>> = Lazy::new(|| {
    vec![
        Recognizer::fixed("ipv4", IPV4),
        Recognizer::new("method", &format!(r"{}\b", HTTP_METHOD), Emit::Fixed(HTTP_METHOD)),
        Recognizer::fixed("http-version", HTTP_VERSION),
        Recognizer::fixed("status", STATUS_CODE).followed_by(Follow::WhitespaceOrEnd),
        Recognizer::fixed("date", DAY_MONTH_NAME_YEAR),
        Recognizer::fixed("iso-date", ISO_DATE),
        Recognizer::fixed("time", TIME),
        Recognizer::fixed("timezone", TIMEZONE),
        Recognizer::fixed("path", PATH),
        Recognizer::fixed("digits", DIGITS),
        Recognizer::fixed("lowercase", LOWERCASE),
        Recognizer::fixed("uppercase", UPPERCASE),
        Recognizer::fixed("word", WORD),
        Recognizer::new("whitespace", WHITESPACE, Emit::Whitespace),
    ]
});

/// Rule name reported for single-character fallback segments
pub const LITERAL_RULE: &str = "literal";

/// One step of the segmentation: which rule claimed which sample text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub rule: &'static str,
    pub text: String,
    pub fragment: String,
    pub start: usize,
    pub end: usize,
}

/// Segment `text` greedily, left to right; never fails
pub fn generalize_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        let claimed = RECOGNIZERS
            .iter()
            .find_map(|recognizer| recognizer.claim(rest).map(|len| (recognizer, len)));

        let segment = match claimed {
            Some((recognizer, len)) => {
                let matched = &rest[..len];
                Segment {
                    rule: recognizer.name,
                    text: matched.to_string(),
                    fragment: recognizer.fragment(matched),
                    start: cursor,
                    end: cursor + len,
                }
            }
            None => {
                let Some(ch) = rest.chars().next() else {
                    break;
                };
                let matched = &rest[..ch.len_utf8()];
                Segment {
                    rule: LITERAL_RULE,
                    text: matched.to_string(),
                    fragment: regex::escape(matched),
                    start: cursor,
                    end: cursor + matched.len(),
                }
            }
        };

        cursor = segment.end;
        segments.push(segment);
    }

    segments
}

/// Abstract every recognizable run of `text` into a pattern fragment
pub fn generalize(text: &str) -> String {
    generalize_segments(text)
        .into_iter()
        .map(|segment| segment.fragment)
        .collect()
}

/// Fragment for a user selection: whole-span classification first, generalization otherwise
pub fn fragment_for_selection(text: &str) -> String {
    match classify_whole_span(text) {
        Some(fragment) => fragment,
        None => {
            tracing::debug!(len = text.len(), "no whole-span classifier, generalizing");
            generalize(text)
        }
    }
}

static CAPTURE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Wrap a fragment as a named capture group
pub fn wrap_named(fragment: &str, name: &str) -> Result<String, PatternError> {
    if !CAPTURE_NAME.is_match(name) {
        return Err(PatternError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(format!("(?<{}>{})", name, fragment))
}
