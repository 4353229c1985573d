//! Greedy line breaking over measured strings.
//!
//! Words are packed onto a line until the next one would overflow. A single
//! token wider than the line is cut at the longest prefix that still fits
//! with a trailing hyphen, found by binary search over character boundaries.

use crate::fonts::FontMetrics;

const HYPHEN: &str = "-";
const ELLIPSIS: &str = "…";

/// How a wrapped line ends relative to the text it was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnd {
    /// At whitespace, a newline or the end of the text.
    #[default]
    WordBreak,
    /// Inside a word, with an inserted trailing hyphen.
    Hyphenated,
    /// Inside a word, without a hyphen because not even one character fits next to it.
    Split,
}

impl LineEnd {
    /// Bytes at the end of the line that are not part of the source text.
    pub fn inserted_len(self) -> usize {
        match self {
            LineEnd::Hyphenated => HYPHEN.len(),
            LineEnd::WordBreak | LineEnd::Split => 0,
        }
    }

    /// The word on this line continues at the start of the next one.
    pub fn continues_word(self) -> bool {
        self != LineEnd::WordBreak
    }
}

/// One output line of [`wrap_paragraphs`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    /// The line opens a new paragraph and should be preceded by the paragraph gap.
    pub gap_before: bool,
    pub end: LineEnd,
}

impl WrappedLine {
    /// The line without an inserted hyphen.
    pub fn source_text(&self) -> &str {
        &self.text[..self.text.len() - self.end.inserted_len()]
    }
}

/// Lines of a multi-paragraph text, ready to be drawn top to bottom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedText {
    pub lines: Vec<WrappedLine>,
}

impl WrappedText {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn paragraph_gaps(&self) -> usize {
        self.lines.iter().filter(|line| line.gap_before).count()
    }

    /// Total height when every line takes `line_height` and each paragraph gap takes `gap`.
    pub fn height(&self, line_height: f32, gap: f32) -> f32 {
        self.len() as f32 * line_height + self.paragraph_gaps() as f32 * gap
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

/// Wraps `text` to lines no wider than `max_width`.
///
/// Whitespace runs collapse to single spaces. Newlines force a break.
/// Every produced line measures at most `max_width` as long as `max_width`
/// can hold a single character.
pub fn wrap_text<F: FontMetrics + ?Sized>(text: &str, font: &F, size: f32, max_width: f32) -> Vec<String> {
    wrap_with_ends(text, font, size, max_width)
        .into_iter()
        .map(|(line, _)| line)
        .collect()
}

fn wrap_with_ends<F: FontMetrics + ?Sized>(text: &str, font: &F, size: f32, max_width: f32) -> Vec<(String, LineEnd)> {
    let mut lines = Vec::new();
    for hard_line in text.lines() {
        wrap_line(hard_line, font, size, max_width, &mut lines);
    }
    lines
}

fn wrap_line<F: FontMetrics + ?Sized>(
    line: &str,
    font: &F,
    size: f32,
    max_width: f32,
    out: &mut Vec<(String, LineEnd)>,
) {
    let mut current = String::new();

    for word in line.split_whitespace() {
        if !current.is_empty() {
            let candidate_width = font.text_width(&current, size) + font.text_width(" ", size) + font.text_width(word, size);
            if candidate_width <= max_width {
                current.push(' ');
                current.push_str(word);
                continue;
            }
            out.push((std::mem::take(&mut current), LineEnd::WordBreak));
        }

        if font.text_width(word, size) <= max_width {
            current.push_str(word);
            continue;
        }

        let mut pieces = split_long_token(word, font, size, max_width);
        // The tail carries no hyphen and may still share its line with the next word.
        if let Some((tail, _)) = pieces.pop() {
            out.extend(pieces);
            current = tail;
        }
    }

    if !current.is_empty() {
        out.push((current, LineEnd::WordBreak));
    }
}

/// Splits a token that is wider than `max_width` into hyphenated pieces.
///
/// All pieces except the last end in a hyphen.
fn split_long_token<F: FontMetrics + ?Sized>(
    token: &str,
    font: &F,
    size: f32,
    max_width: f32,
) -> Vec<(String, LineEnd)> {
    let mut pieces = Vec::new();
    let mut rest = token;

    while font.text_width(rest, size) > max_width {
        let boundaries: Vec<usize> = rest.char_indices().map(|(i, _)| i).skip(1).collect();
        if boundaries.is_empty() {
            break;
        }

        let fits = |cut: usize| {
            let head = &rest[..boundaries[cut]];
            font.text_width(head, size) + font.text_width(HYPHEN, size) <= max_width
        };

        // Largest `cut` whose prefix plus hyphen fits.
        let (mut lo, mut hi) = (0usize, boundaries.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            if fits(mid) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        if lo == 0 {
            // Not even one character fits next to a hyphen: emit it bare so the loop advances.
            let end = boundaries[0];
            pieces.push((rest[..end].to_string(), LineEnd::Split));
            rest = &rest[end..];
        } else {
            let end = boundaries[lo - 1];
            pieces.push((format!("{}{}", &rest[..end], HYPHEN), LineEnd::Hyphenated));
            rest = &rest[end..];
        }
    }

    pieces.push((rest.to_string(), LineEnd::WordBreak));
    pieces
}

/// Wraps text made of blank-line separated paragraphs.
///
/// Each paragraph is wrapped on its own; the first line of every paragraph
/// after the first is flagged so the caller can insert a gap.
pub fn wrap_paragraphs<F: FontMetrics + ?Sized>(text: &str, font: &F, size: f32, max_width: f32) -> WrappedText {
    let mut wrapped = WrappedText::default();
    let mut paragraph = String::new();
    let mut paragraphs = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !paragraph.is_empty() {
                paragraphs.push(std::mem::take(&mut paragraph));
            }
        } else {
            if !paragraph.is_empty() {
                paragraph.push('\n');
            }
            paragraph.push_str(line);
        }
    }
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let lines = wrap_with_ends(paragraph, font, size, max_width);
        for (line_index, (line, end)) in lines.into_iter().enumerate() {
            wrapped.lines.push(WrappedLine {
                text: line,
                gap_before: index > 0 && line_index == 0,
                end,
            });
        }
    }

    wrapped
}

/// Truncates `text` with an ellipsis so it fits on one line of `max_width`.
pub fn fit_with_ellipsis<F: FontMetrics + ?Sized>(text: &str, font: &F, size: f32, max_width: f32) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if font.text_width(&text, size) <= max_width {
        return text;
    }

    let ellipsis_width = font.text_width(ELLIPSIS, size);
    if ellipsis_width > max_width {
        return String::new();
    }

    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let fits = |count: usize| {
        let head = text[..boundaries[count]].trim_end();
        font.text_width(head, size) + ellipsis_width <= max_width
    };

    // Largest number of leading characters that fit next to the ellipsis.
    // The full text is known not to fit, so at most `len - 1` characters remain.
    let (mut lo, mut hi) = (0usize, boundaries.len() - 1);
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    format!("{}{}", text[..boundaries[lo]].trim_end(), ELLIPSIS)
}
