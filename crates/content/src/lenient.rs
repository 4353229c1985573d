//! A chain of repairs applied to JSON-ish text until it parses.
//!
//! Each step transforms the output of the previous one and the result is
//! re-parsed. Steps that do not change the text are skipped.

use log::debug;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)```").expect("BUG: invalid FENCED_BLOCK_RE regex literal")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStep {
    /// The text as received.
    Strict,
    /// The body of the first fenced code block.
    StripFences,
    /// Typographic quotes straightened, invisible characters removed.
    Normalize,
    /// Commas directly before `}` or `]` removed.
    TrailingCommas,
    /// The first balanced `{...}` or `[...]` span.
    BracketSlice,
}

impl RepairStep {
    pub const CHAIN: [RepairStep; 5] = [
        RepairStep::Strict,
        RepairStep::StripFences,
        RepairStep::Normalize,
        RepairStep::TrailingCommas,
        RepairStep::BracketSlice,
    ];

    /// Applies the repair, or returns `None` when it does not change `text`.
    pub fn apply(self, text: &str) -> Option<String> {
        match self {
            RepairStep::Strict => Some(text.to_string()),
            RepairStep::StripFences => strip_code_fence(text),
            RepairStep::Normalize => normalize_characters(text),
            RepairStep::TrailingCommas => strip_trailing_commas(text),
            RepairStep::BracketSlice => slice_json_span(text),
        }
    }
}

/// Outcome of [`parse_lenient`].
#[derive(Debug, Clone, PartialEq)]
pub struct LenientParse {
    /// The parsed value, `None` if every step failed.
    pub value: Option<Value>,
    /// The text that parsed, or the last text attempted.
    pub text: String,
    /// The step that produced a parseable text.
    pub step: Option<RepairStep>,
}

impl LenientParse {
    pub fn is_parsed(&self) -> bool {
        self.value.is_some()
    }
}

/// Parses `raw` as JSON, repairing common defects step by step. Never fails.
pub fn parse_lenient(raw: &str) -> LenientParse {
    let mut candidate = raw.to_string();

    for step in RepairStep::CHAIN {
        let Some(repaired) = step.apply(&candidate) else {
            continue;
        };
        candidate = repaired;
        match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => {
                debug!("Content parsed after {:?}.", step);
                return LenientParse {
                    value: Some(value),
                    text: candidate,
                    step: Some(step),
                };
            }
            Err(e) => debug!("Content did not parse after {:?}: {}", step, e),
        }
    }

    LenientParse {
        value: None,
        text: candidate,
        step: None,
    }
}

/// Returns the body of the first fenced code block.
pub fn strip_code_fence(text: &str) -> Option<String> {
    if let Some(captures) = FENCED_BLOCK_RE.captures(text) {
        return captures.get(1).map(|body| body.as_str().trim().to_string());
    }
    // An opening fence that was never closed.
    let trimmed = text.trim_start();
    if trimmed.starts_with("```") {
        let body = trimmed.split_once('\n').map(|(_, body)| body).unwrap_or("");
        return Some(body.trim().to_string());
    }
    None
}

/// Straightens typographic quotes and drops zero-width characters.
pub fn normalize_characters(text: &str) -> Option<String> {
    let normalized: String = text
        .chars()
        .filter_map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => Some('"'),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => Some('\''),
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' => None,
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
            c => Some(c),
        })
        .collect();
    (normalized != text).then_some(normalized)
}

/// Removes commas that are followed (after whitespace) by `}` or `]`.
///
/// Commas inside string literals are left alone.
pub fn strip_trailing_commas(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut changed = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, Some('}') | Some(']')) {
                    changed = true;
                } else {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    changed.then_some(out)
}

/// Returns the first balanced `{...}` or `[...]` span.
///
/// When the brackets never balance, the span runs to the last matching
/// closing bracket instead.
pub fn slice_json_span(text: &str) -> Option<String> {
    let start = text.find(['{', '['])?;
    let (open, close) = if text[start..].starts_with('{') { ('{', '}') } else { ('[', ']') };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return changed(text, &text[start..end]);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    changed(text, &text[start..=end])
}

fn changed(original: &str, slice: &str) -> Option<String> {
    (slice != original).then(|| slice.to_string())
}
