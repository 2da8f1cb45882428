//! Whole-span sample classifiers
//!
//! An ordered catalogue of named abstractions (IP address, status code, date...) used when the
//! user has isolated a span of sample text. Each entry answers "is this exact text one of
//! mine?" and produces a fragment for it. The exact-literal entry is only applied on explicit
//! request.
//!
//! Table order is priority: [`classify_whole_span`] returns the fragment of the first entry
//! whose predicate accepts the text. The table is never reordered or looked up by key for
//! classification. When nothing matches the caller falls back to
//! [`generalize`](crate::generalizing::generalize); this module never does that itself.

pub mod dates;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub use dates::date_fragment;

/// Fragments shared with the generalization engine
pub mod fragments {
    pub const IPV4: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";
    pub const STATUS_CODE: &str = r"[1-5]\d{2}";
    pub const HTTP_METHOD: &str = r"(?:GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS|CONNECT|TRACE)";
    pub const HTTP_VERSION: &str = r"HTTP/\d\.\d";
    pub const PATH: &str = r#"/[^\s"]*"#;
    pub const TIME: &str = r"\d{2}:\d{2}:\d{2}";
    pub const TIMEZONE: &str = r"[+-]\d{4}";
    pub const DIGITS: &str = r"\d+";
    pub const LOWERCASE: &str = r"[a-z]+";
    pub const UPPERCASE: &str = r"[A-Z]+";
    pub const WORD: &str = r"\w+";
    pub const NON_SPACE: &str = r"\S+";
    pub const WHITESPACE: &str = r"\s+";
    pub const WILDCARD: &str = r".*";
}

/// A recognizable shape of selected text
pub trait Classifier: Send + Sync {
    /// Stable identifier, used for explicit selection
    fn id(&self) -> &'static str;

    /// Button label for the catalogue
    fn label(&self) -> &'static str;

    /// Does the whole of `text` have this shape?
    fn matches(&self, text: &str) -> bool;

    /// Fragment standing in for `text`
    fn generate(&self, text: &str) -> String;

    /// Whether automatic whole-span classification may pick this entry
    fn auto_select(&self) -> bool {
        true
    }
}

/// Classifier defined by an anchored shape and a fixed fragment
struct ShapeClassifier {
    id: &'static str,
    label: &'static str,
    shape: Regex,
    fragment: &'static str,
    guard: Option<fn(&str) -> bool>,
}

impl ShapeClassifier {
    fn new(id: &'static str, label: &'static str, shape: &str, fragment: &'static str) -> Self {
        ShapeClassifier {
            id,
            label,
            shape: Regex::new(&format!("^(?:{})$", shape)).unwrap(),
            fragment,
            guard: None,
        }
    }

    fn guarded(mut self, guard: fn(&str) -> bool) -> Self {
        self.guard = Some(guard);
        self
    }
}

impl Classifier for ShapeClassifier {
    fn id(&self) -> &'static str {
        self.id
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn matches(&self, text: &str) -> bool {
        self.shape.is_match(text) && self.guard.map_or(true, |guard| guard(text))
    }

    fn generate(&self, _text: &str) -> String {
        self.fragment.to_string()
    }
}

/// Dates pick their fragment through the date sub-classifier
struct DateClassifier;

impl Classifier for DateClassifier {
    fn id(&self) -> &'static str {
        "date"
    }

    fn label(&self) -> &'static str {
        "Date"
    }

    fn matches(&self, text: &str) -> bool {
        date_fragment(text).is_some()
    }

    fn generate(&self, text: &str) -> String {
        match date_fragment(text) {
            Some(fragment) => fragment.to_string(),
            None => regex::escape(text),
        }
    }
}

/// The exact text, escaped. Always offered, never picked automatically.
struct EscapedLiteral;

impl Classifier for EscapedLiteral {
    fn id(&self) -> &'static str {
        "literal"
    }

    fn label(&self) -> &'static str {
        "Exact text"
    }

    fn matches(&self, text: &str) -> bool {
        !text.is_empty()
    }

    fn generate(&self, text: &str) -> String {
        regex::escape(text)
    }

    fn auto_select(&self) -> bool {
        false
    }
}

fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

static CATALOGUE: Lazy<Vec<Box<dyn Classifier>>> = Lazy::new(|| {
    use fragments::*;
    let table: Vec<Box<dyn Classifier>> = vec![
        Box::new(ShapeClassifier::new("ipv4", "IP address", IPV4, IPV4)),
        Box::new(ShapeClassifier::new(
            "status",
            "HTTP status code",
            STATUS_CODE,
            STATUS_CODE,
        )),
        Box::new(ShapeClassifier::new(
            "method",
            "HTTP method",
            HTTP_METHOD,
            HTTP_METHOD,
        )),
        Box::new(ShapeClassifier::new("path", "Path", PATH, PATH)),
        Box::new(DateClassifier),
        Box::new(ShapeClassifier::new("time", "Time", TIME, TIME)),
        Box::new(ShapeClassifier::new("digits", "Number", DIGITS, DIGITS)),
        Box::new(ShapeClassifier::new("word", "Word", WORD, WORD).guarded(has_letter)),
        Box::new(ShapeClassifier::new(
            "non-space",
            "Non-space run",
            NON_SPACE,
            NON_SPACE,
        )),
        Box::new(ShapeClassifier::new("wildcard", "Anything", r".+", WILDCARD)),
        Box::new(EscapedLiteral),
    ];
    table
});

/// The ordered classifier table
pub fn catalogue() -> &'static [Box<dyn Classifier>] {
    &CATALOGUE
}

/// Fragment from the first auto-selectable classifier accepting the whole of `text`
pub fn classify_whole_span(text: &str) -> Option<String> {
    catalogue()
        .iter()
        .filter(|classifier| classifier.auto_select())
        .find(|classifier| classifier.matches(text))
        .map(|classifier| classifier.generate(text))
}

/// Apply one named catalogue entry, regardless of its predicate
pub fn classify_with(id: &str, text: &str) -> Option<String> {
    catalogue()
        .iter()
        .find(|classifier| classifier.id() == id)
        .map(|classifier| classifier.generate(text))
}

/// Serializable view of a catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifierInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub auto_select: bool,
}

/// Describe the catalogue in priority order
pub fn describe_catalogue() -> Vec<ClassifierInfo> {
    catalogue()
        .iter()
        .map(|classifier| ClassifierInfo {
            id: classifier.id(),
            label: classifier.label(),
            auto_select: classifier.auto_select(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4() {
        assert_eq!(
            classify_whole_span("192.168.1.1").as_deref(),
            Some(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}")
        );
    }

    #[test]
    fn test_status_wins_over_digits() {
        assert_eq!(classify_whole_span("404").as_deref(), Some(fragments::STATUS_CODE));
        assert_eq!(classify_whole_span("604").as_deref(), Some(fragments::DIGITS));
    }

    #[test]
    fn test_method_wins_over_word() {
        assert_eq!(classify_whole_span("GET").as_deref(), Some(fragments::HTTP_METHOD));
        assert_eq!(classify_whole_span("GETTER").as_deref(), Some(fragments::WORD));
    }

    #[test]
    fn test_word_requires_a_letter() {
        assert_eq!(classify_whole_span("a_1").as_deref(), Some(fragments::WORD));
        assert_eq!(classify_whole_span("___").as_deref(), Some(fragments::NON_SPACE));
    }

    #[test]
    fn test_date_uses_sub_classifier() {
        assert_eq!(
            classify_whole_span("10/Oct/2000").as_deref(),
            Some(dates::DAY_MONTH_NAME_YEAR)
        );
        assert_eq!(classify_whole_span("2000-10-10").as_deref(), Some(dates::ISO_DATE));
    }

    #[test]
    fn test_text_with_spaces_is_wildcard() {
        assert_eq!(classify_whole_span("hello world").as_deref(), Some(fragments::WILDCARD));
        assert_eq!(classify_with("wildcard", "hello world").as_deref(), Some(".*"));
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(classify_whole_span(""), None);
        assert_eq!(classify_whole_span("two\nlines"), None);
    }

    #[test]
    fn test_literal_is_never_auto_selected_but_available() {
        let literal = catalogue().last().unwrap();
        assert_eq!(literal.id(), "literal");
        assert!(!literal.auto_select());
        assert_eq!(classify_with("literal", "a.b").as_deref(), Some(r"a\.b"));
        assert_eq!(classify_with("nope", "a.b"), None);
    }

    #[test]
    fn test_catalogue_order() {
        let ids: Vec<_> = describe_catalogue().into_iter().map(|info| info.id).collect();
        assert_eq!(
            ids,
            vec![
                "ipv4",
                "status",
                "method",
                "path",
                "date",
                "time",
                "digits",
                "word",
                "non-space",
                "wildcard",
                "literal"
            ]
        );
    }
}
