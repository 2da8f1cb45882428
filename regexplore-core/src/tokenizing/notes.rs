//! Human-readable notes attached to tokens for the breakdown tooltip

use super::tokens::PatternToken;

/// Describe a recognized token, or `None` when the text speaks for itself
pub(super) fn describe(raw: PatternToken, text: &str) -> Option<String> {
    let note = match raw {
        PatternToken::NamedGroupOpen => {
            let name = text
                .trim_end_matches('>')
                .split_once('<')
                .map(|(_, name)| name)
                .unwrap_or_default();
            format!("start of named group '{}'", name)
        }
        PatternToken::NonCapturingOpen => "start of non-capturing group".to_string(),
        PatternToken::GroupOpen => "start of capturing group".to_string(),
        PatternToken::GroupClose => "end of group".to_string(),
        PatternToken::Escape => describe_escape(text),
        PatternToken::CharacterClass => describe_class(text),
        PatternToken::Quantifier => describe_quantifier(text),
        PatternToken::Anchor => match text {
            "^" => "start of text (or line in multiline mode)".to_string(),
            _ => "end of text (or line in multiline mode)".to_string(),
        },
        PatternToken::Alternation => "or".to_string(),
        PatternToken::Wildcard => "any character".to_string(),
        PatternToken::Literal => return None,
    };
    Some(note)
}

fn describe_escape(text: &str) -> String {
    let escaped = text.chars().nth(1).unwrap_or('\\');
    let known = match escaped {
        'd' => "digit",
        'D' => "non-digit",
        'w' => "word character (letter, digit, underscore)",
        'W' => "non-word character",
        's' => "whitespace",
        'S' => "non-whitespace",
        'b' => "word boundary",
        'B' => "non-word boundary",
        'n' => "newline",
        't' => "tab",
        'r' => "carriage return",
        'A' => "start of text",
        'z' => "end of text",
        _ => "",
    };
    if !known.is_empty() {
        known.to_string()
    } else if escaped.is_ascii_punctuation() {
        format!("literal '{}'", escaped)
    } else {
        format!("escaped character '{}'", escaped)
    }
}

fn describe_class(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    match inner.strip_prefix('^') {
        Some(negated) => format!("any character except {}", negated),
        None => format!("one of {}", inner),
    }
}

fn describe_quantifier(text: &str) -> String {
    match text {
        "*" => "zero or more".to_string(),
        "+" => "one or more".to_string(),
        "?" => "optional (zero or one)".to_string(),
        _ => {
            let bounds = &text[1..text.len() - 1];
            match bounds.split_once(',') {
                None => format!("exactly {} times", bounds),
                Some((min, "")) => format!("{} or more times", min),
                Some((min, max)) => format!("between {} and {} times", min, max),
            }
        }
    }
}
