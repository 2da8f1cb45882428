//! Partition of the sample text into matched and unmatched spans
//!
//! Pure post-processing over match records; the pattern engine is not consulted again.

use super::MatchRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSpan {
    pub text: String,
    pub is_match: bool,
}

impl HighlightSpan {
    fn plain(text: &str) -> Self {
        HighlightSpan {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        HighlightSpan {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Split `sample` around `matches`; the span texts always concatenate back to `sample`
///
/// Zero-length matches produce no span. Records that overlap an earlier one, or that do not
/// describe `sample` (stale results from a previous edit), are skipped.
pub fn highlight(sample: &str, matches: &[MatchRecord]) -> Vec<HighlightSpan> {
    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by_key(|record| record.start_offset);

    let mut spans = Vec::new();
    let mut cursor = 0;

    for record in ordered {
        let start = record.start_offset;
        let end = record.end_offset();
        if start == end || start < cursor {
            continue;
        }
        if sample.get(start..end) != Some(record.matched_text.as_str()) {
            continue;
        }
        if start > cursor {
            spans.push(HighlightSpan::plain(&sample[cursor..start]));
        }
        spans.push(HighlightSpan::matched(&record.matched_text));
        cursor = end;
    }

    if cursor < sample.len() {
        spans.push(HighlightSpan::plain(&sample[cursor..]));
    }

    spans
}
