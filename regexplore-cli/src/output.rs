//! Rendering of command results as text, JSON or YAML

use regexplore_config::OutputFormat;
use regexplore_core::generalizing::Segment;
use regexplore_core::matching::{HighlightSpan, MatchRecord};
use regexplore_core::tokenizing::Token;
use serde::Serialize;

/// Print `value` in the requested format; `text` renders the human form
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) {
    let rendered = match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    };
    match rendered {
        Ok(out) => println!("{}", out.trim_end()),
        Err(e) => {
            eprintln!("Error formatting output: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn tokens_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            let kind = format!("{:?}", token.kind);
            format!(
                "{:>4}..{:<4} {:<18} {:<14} {}",
                token.start,
                token.end,
                kind,
                token.text,
                token.note.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn segments_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            let text = format!("{:?}", segment.text);
            format!("{:<14} {:<24} {}", segment.rule, text, segment.fragment)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn matches_text(matches: &[MatchRecord]) -> String {
    if matches.is_empty() {
        return "no matches".to_string();
    }
    let mut lines = Vec::new();
    for record in matches {
        lines.push(format!(
            "line {} @{}: {:?}",
            record.line_number, record.start_offset, record.matched_text
        ));
        for capture in &record.captures {
            lines.push(format!("    {} = {:?}", capture.name, capture.value));
        }
    }
    lines.join("\n")
}

/// Matched spans wrapped in `[[` `]]`
pub fn highlight_text(spans: &[HighlightSpan]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.is_match {
                format!("[[{}]]", span.text)
            } else {
                span.text.clone()
            }
        })
        .collect()
}
