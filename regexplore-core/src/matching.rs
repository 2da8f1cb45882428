//! Live matching of the pattern buffer against sample text
//!
//! [`execute`] compiles the pattern with the selected flags and scans the sample, producing a
//! fresh list of [`MatchRecord`]s in search order. Results are never updated in place; any
//! change to pattern, flags or sample means calling it again.
//!
//! - An empty pattern yields no matches and no error.
//! - An invalid pattern yields [`PatternError::Compile`] with the engine diagnostic.
//! - Without the global flag at most one search is made. With it, scanning resumes at the end
//!   of each match, moving one extra character past zero-length matches.
//! - Exceeding the [`MatchBudget`] yields [`PatternError::BudgetExceeded`], never a silent
//!   "no match".

mod budget;
mod highlight;

pub use budget::MatchBudget;
pub use highlight::{highlight, HighlightSpan};

use crate::error::PatternError;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Name of the synthetic capture reported for patterns without groups
pub const WHOLE_MATCH: &str = "match";

/// Matching options as exposed in the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multiline: bool,
    pub dot_all: bool,
}

impl Flags {
    /// Only the global flag set
    pub fn global() -> Self {
        Flags {
            global: true,
            ..Flags::default()
        }
    }

    /// Parse the one-letter form, e.g. `"gim"`
    pub fn parse(letters: &str) -> Result<Self, PatternError> {
        let mut flags = Flags::default();
        for letter in letters.chars() {
            match letter {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multiline = true,
                's' => flags.dot_all = true,
                other => return Err(PatternError::InvalidFlag { flag: other }),
            }
        }
        Ok(flags)
    }

    /// The one-letter form, in `gims` order
    pub fn letters(&self) -> String {
        [
            (self.global, 'g'),
            (self.case_insensitive, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
        ]
        .into_iter()
        .filter_map(|(set, letter)| set.then_some(letter))
        .collect()
    }
}

/// A named or positional sub-match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub name: String,
    pub value: String,
}

/// One match of the pattern in the sample text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub matched_text: String,
    /// Byte offset into the sample
    pub start_offset: usize,
    /// 1-based
    pub line_number: usize,
    pub captures: Vec<Capture>,
}

impl MatchRecord {
    fn new(regex: &Regex, captures: &Captures<'_>, whole: regex::Match<'_>, sample: &str) -> Self {
        MatchRecord {
            matched_text: whole.as_str().to_string(),
            start_offset: whole.start(),
            line_number: line_number(sample, whole.start()),
            captures: collect_captures(regex, captures, whole),
        }
    }

    pub fn end_offset(&self) -> usize {
        self.start_offset + self.matched_text.len()
    }

    /// Look up a capture by name (`group_1` etc. for unnamed groups)
    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|capture| capture.name == name)
            .map(|capture| capture.value.as_str())
    }
}

fn line_number(sample: &str, offset: usize) -> usize {
    1 + sample.as_bytes()[..offset]
        .iter()
        .filter(|&&byte| byte == b'\n')
        .count()
}

/// Named captures if the pattern has any, positional ones otherwise, the whole match last.
/// Groups that did not participate are left out.
fn collect_captures(
    regex: &Regex,
    captures: &Captures<'_>,
    whole: regex::Match<'_>,
) -> Vec<Capture> {
    let named: Vec<(usize, &str)> = regex
        .capture_names()
        .enumerate()
        .filter_map(|(index, name)| name.map(|name| (index, name)))
        .collect();

    if !named.is_empty() {
        return named
            .into_iter()
            .filter_map(|(index, name)| {
                captures.get(index).map(|found| Capture {
                    name: name.to_string(),
                    value: found.as_str().to_string(),
                })
            })
            .collect();
    }

    if regex.captures_len() > 1 {
        return (1..regex.captures_len())
            .filter_map(|index| {
                captures.get(index).map(|found| Capture {
                    name: format!("group_{}", index),
                    value: found.as_str().to_string(),
                })
            })
            .collect();
    }

    vec![Capture {
        name: WHOLE_MATCH.to_string(),
        value: whole.as_str().to_string(),
    }]
}

/// Compile with flags and size limits applied
pub fn compile(pattern: &str, flags: Flags, budget: &MatchBudget) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multiline)
        .dot_matches_new_line(flags.dot_all)
        .size_limit(budget.size_limit)
        .dfa_size_limit(budget.size_limit)
        .build()
        .map_err(|err| match err {
            regex::Error::CompiledTooBig(limit) => {
                PatternError::budget(format!("compiled pattern exceeds {} bytes", limit))
            }
            regex::Error::Syntax(message) => PatternError::compile(message),
            other => PatternError::compile(other.to_string()),
        })
}

/// Run `pattern` against `sample` with the default budget
pub fn execute(
    pattern: &str,
    flags: Flags,
    sample: &str,
) -> Result<Vec<MatchRecord>, PatternError> {
    execute_with_budget(pattern, flags, sample, &MatchBudget::default())
}

/// Run `pattern` against `sample` within `budget`
pub fn execute_with_budget(
    pattern: &str,
    flags: Flags,
    sample: &str,
    budget: &MatchBudget,
) -> Result<Vec<MatchRecord>, PatternError> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }

    let regex = compile(pattern, flags, budget).inspect_err(|err| {
        tracing::debug!(%err, "pattern rejected");
    })?;

    let started = Instant::now();
    let mut matches = Vec::new();
    let mut at = 0;

    while at <= sample.len() {
        let Some(captures) = regex.captures_at(sample, at) else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };

        if matches.len() == budget.max_matches {
            return Err(PatternError::budget(format!(
                "more than {} matches",
                budget.max_matches
            )));
        }
        matches.push(MatchRecord::new(&regex, &captures, whole, sample));

        if !flags.global {
            break;
        }
        at = if whole.is_empty() {
            step_past(sample, whole.end())
        } else {
            whole.end()
        };

        if started.elapsed() > budget.time_limit {
            return Err(PatternError::budget(format!(
                "scan took longer than {} ms",
                budget.time_limit.as_millis()
            )));
        }
    }

    tracing::debug!(
        matches = matches.len(),
        flags = %flags.letters(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "pattern executed"
    );
    Ok(matches)
}

/// Offset of the character after `offset`, or one past the end
fn step_past(sample: &str, offset: usize) -> usize {
    sample[offset..]
        .chars()
        .next()
        .map_or(offset + 1, |ch| offset + ch.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_global_line_numbers() {
        let matches = execute(r"\d+", Flags::global(), "a1\nb22\nc333").unwrap();
        let texts: Vec<_> = matches.iter().map(|m| m.matched_text.as_str()).collect();
        let lines: Vec<_> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(texts, vec!["1", "22", "333"]);
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_non_global_searches_once() {
        let matches = execute(r"\d+", Flags::default(), "a1\nb22").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start_offset, 1);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(execute("", Flags::global(), "anything").unwrap(), vec![]);
    }

    #[test]
    fn test_unbalanced_group_is_compile_error() {
        let err = execute("(", Flags::global(), "abc").unwrap_err();
        assert!(matches!(err, PatternError::Compile { .. }));
    }

    #[test]
    fn test_named_captures_skip_unset_groups() {
        let matches = execute(r"(?<a>x)|(?<b>y)", Flags::default(), "y").unwrap();
        assert_eq!(
            matches[0].captures,
            vec![Capture {
                name: "b".to_string(),
                value: "y".to_string()
            }]
        );
    }

    #[test]
    fn test_positional_captures() {
        let matches = execute(r"(\w+)@(\w+)", Flags::default(), "me@host").unwrap();
        assert_eq!(matches[0].capture("group_1"), Some("me"));
        assert_eq!(matches[0].capture("group_2"), Some("host"));
    }

    #[test]
    fn test_whole_match_capture_without_groups() {
        let matches = execute("b+", Flags::default(), "abbc").unwrap();
        assert_eq!(matches[0].capture(WHOLE_MATCH), Some("bb"));
        assert_eq!(matches[0].end_offset(), 3);
    }

    #[test]
    fn test_zero_length_matches_terminate() {
        let matches = execute("", Flags::global(), "abc").unwrap();
        assert!(matches.is_empty());
        let matches = execute("^", Flags::global(), "é").unwrap();
        assert_eq!(matches.len(), 1);
        let matches = execute(r"\b", Flags::global(), "ab cd").unwrap();
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn test_flags() {
        let sample = "Foo\nfoo";
        assert_eq!(execute("foo", Flags::parse("gi").unwrap(), sample).unwrap().len(), 2);
        assert_eq!(execute("^foo$", Flags::parse("gm").unwrap(), sample).unwrap().len(), 1);
        assert_eq!(execute("o.f", Flags::parse("s").unwrap(), sample).unwrap().len(), 1);
        assert_eq!(execute("o.f", Flags::default(), sample).unwrap().len(), 0);
    }

    #[test]
    fn test_flag_letters_round_trip() {
        let flags = Flags::parse("sg").unwrap();
        assert_eq!(flags.letters(), "gs");
        assert_eq!(
            Flags::parse("gx"),
            Err(PatternError::InvalidFlag { flag: 'x' })
        );
    }

    #[test]
    fn test_match_limit_is_budget_error() {
        let budget = MatchBudget::default().with_max_matches(2);
        let err = execute_with_budget("a", Flags::global(), "aaa", &budget).unwrap_err();
        assert!(err.is_budget());
        assert!(execute_with_budget("a", Flags::global(), "aa", &budget).is_ok());
    }

    #[test]
    fn test_size_limit_is_budget_error() {
        let budget = MatchBudget::default().with_size_limit(100);
        let err = execute_with_budget(r"\w{50}", Flags::default(), "x", &budget).unwrap_err();
        assert!(err.is_budget());
    }

    #[test]
    fn test_time_limit_is_budget_error() {
        let budget = MatchBudget::default().with_time_limit(Duration::ZERO);
        let sample = "a".repeat(64);
        let err = execute_with_budget("a", Flags::global(), &sample, &budget).unwrap_err();
        assert!(err.is_budget());
    }
}
