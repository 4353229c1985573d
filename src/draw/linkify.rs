//! URL detection for wrapped text.
//!
//! URLs are found in the paragraph as written, before wrapping, and then
//! mapped back onto the wrapped lines. A URL that was split across lines
//! yields one segment per line, each carrying the full address.

use regex::Regex;
use shotdoc_layout::WrappedLine;
use std::ops::Range;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"'()\[\]{}]+"#).expect("BUG: invalid URL regex literal")
});

/// Punctuation that ends a sentence rather than a URL.
const TRAILING: &[char] = &['.', ',', ';', ':', '!', '?'];

/// A run of a line that is either plain text or part of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub text: &'a str,
    /// The complete URL this run belongs to.
    pub link: Option<&'a str>,
}

fn url_ranges(text: &str) -> Vec<Range<usize>> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| {
            let trimmed = m.as_str().trim_end_matches(TRAILING);
            // A bare scheme is not a link.
            (!trimmed.ends_with("//")).then(|| m.start()..m.start() + trimmed.len())
        })
        .collect()
}

/// Where a line's source text sits in the rejoined paragraph.
#[derive(Debug, Clone)]
struct LineSpan {
    start: usize,
    len: usize,
    hyphenated: bool,
}

/// Wrapped lines with the URLs of the text they were cut from.
#[derive(Debug, Clone)]
pub(crate) struct LinkedLines {
    source: String,
    urls: Vec<Range<usize>>,
    spans: Vec<LineSpan>,
}

impl LinkedLines {
    pub fn new(lines: &[WrappedLine]) -> Self {
        let mut source = String::new();
        let mut spans = Vec::with_capacity(lines.len());
        let mut joined_word = false;

        for line in lines {
            if !source.is_empty() && !joined_word {
                source.push(if line.gap_before { '\n' } else { ' ' });
            }
            let text = line.source_text();
            spans.push(LineSpan {
                start: source.len(),
                len: text.len(),
                hyphenated: line.end.inserted_len() > 0,
            });
            source.push_str(text);
            joined_word = line.end.continues_word();
        }

        let urls = url_ranges(&source);
        Self { source, urls, spans }
    }

    /// Splits line `index` (whose text is `line`) into plain and URL runs, in order.
    /// Empty runs are omitted. An inserted hyphen belongs to the URL it splits.
    pub fn segments<'a>(&'a self, index: usize, line: &'a str) -> Vec<Segment<'a>> {
        let Some(span) = self.spans.get(index) else {
            return vec![Segment { text: line, link: None }];
        };
        let line_end = span.start + span.len;

        let mut out = Vec::new();
        let mut cursor = 0;
        for url in self.urls.iter().filter(|url| url.start < line_end && url.end > span.start) {
            let from = url.start.max(span.start) - span.start;
            let mut to = url.end.min(line_end) - span.start;
            if url.end > line_end && span.hyphenated {
                to = line.len();
            }
            if from > cursor {
                out.push(Segment {
                    text: &line[cursor..from],
                    link: None,
                });
            }
            out.push(Segment {
                text: &line[from..to],
                link: Some(&self.source[url.clone()]),
            });
            cursor = to;
        }
        if cursor < line.len() {
            out.push(Segment {
                text: &line[cursor..],
                link: None,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotdoc_layout::{StandardFont, wrap_paragraphs};

    fn wrap(text: &str, width: f32) -> Vec<WrappedLine> {
        wrap_paragraphs(text, &StandardFont::Helvetica, 11.0, width).lines
    }

    fn links(text: &str) -> Vec<String> {
        let lines = wrap(text, 10_000.0);
        let linked = LinkedLines::new(&lines);
        lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| linked.segments(i, &line.text))
            .filter_map(|s| s.link.map(str::to_string))
            .collect()
    }

    #[test]
    fn finds_urls_and_drops_sentence_punctuation() {
        assert_eq!(
            links("See https://example.com/docs. Or http://a.b/c?x=1, then stop"),
            vec!["https://example.com/docs", "http://a.b/c?x=1"]
        );
    }

    #[test]
    fn keeps_surrounding_text_in_order() {
        let lines = wrap("Open (https://example.com) now", 10_000.0);
        let linked = LinkedLines::new(&lines);
        let parts = linked.segments(0, &lines[0].text);
        let texts: Vec<&str> = parts.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["Open (", "https://example.com", ") now"]);
        assert_eq!(texts.concat(), "Open (https://example.com) now");
    }

    #[test]
    fn plain_lines_are_one_segment() {
        let lines = wrap("no links here", 10_000.0);
        let linked = LinkedLines::new(&lines);
        assert_eq!(
            linked.segments(0, &lines[0].text),
            vec![Segment {
                text: "no links here",
                link: None
            }]
        );
        assert!(links("https:// alone").is_empty());
    }

    #[test]
    fn wrapped_url_links_every_piece_to_the_full_address() {
        let url = format!("https://example.com/docs/{}", "a".repeat(120));
        let lines = wrap(&format!("See {} for details.", url), 483.0);
        assert!(lines.len() > 2);
        let linked = LinkedLines::new(&lines);

        let mut pieces = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            for segment in linked.segments(i, &line.text) {
                if let Some(link) = segment.link {
                    assert_eq!(link, url);
                    pieces.push(segment.text);
                }
            }
        }
        // Every line carrying part of the URL gets a link, hyphens included.
        assert_eq!(pieces.len(), lines.len() - 1);
        assert!(pieces[0].starts_with("https://") && pieces[0].ends_with('-'));
        let rebuilt: String = pieces.iter().map(|p| p.strip_suffix('-').unwrap_or(p)).collect();
        assert_eq!(rebuilt, url);
    }

    #[test]
    fn urls_do_not_run_across_lines_broken_at_spaces() {
        let lines = wrap("https://a.example\nnext line", 10_000.0);
        assert_eq!(lines.len(), 2);
        let linked = LinkedLines::new(&lines);
        assert_eq!(linked.segments(1, &lines[1].text)[0].link, None);
        assert_eq!(linked.segments(0, &lines[0].text)[0].link, Some("https://a.example"));
    }
}
