use crate::fonts::{FontMetrics, StandardFont};
use crate::text::wrapper::{LineEnd, fit_with_ellipsis, wrap_paragraphs, wrap_text};
use proptest::prelude::*;

const SIZE: f32 = 11.0;

fn assert_lines_fit(lines: &[String], font: StandardFont, max_width: f32) {
    for line in lines {
        let width = font.text_width(line, SIZE);
        assert!(width <= max_width + 1e-3, "line '{line}' is {width} wide, max {max_width}");
    }
}

#[test]
fn test_greedy_wrap_packs_words() {
    let _ = env_logger::builder().is_test(true).try_init();
    let font = StandardFont::Helvetica;
    let text = "Open the settings panel and choose the account tab to continue";
    let max_width = font.text_width("Open the settings panel and", SIZE) + 0.5;

    let lines = wrap_text(text, &font, SIZE, max_width);
    assert_eq!(lines[0], "Open the settings panel and");
    assert_eq!(lines.join(" "), text);
    assert_lines_fit(&lines, font, max_width);
}

#[test]
fn test_whitespace_collapses_and_newlines_break() {
    let font = StandardFont::Helvetica;
    let lines = wrap_text("alpha    beta\ngamma", &font, SIZE, 500.0);
    assert_eq!(lines, vec!["alpha beta".to_string(), "gamma".to_string()]);
    assert!(wrap_text("   ", &font, SIZE, 500.0).is_empty());
}

#[test]
fn test_long_token_is_hyphenated() {
    let font = StandardFont::Helvetica;
    let token = "https://example.com/a/really/long/path/that/cannot/possibly/fit/on/one/line";
    let max_width = 120.0;

    let lines = wrap_text(token, &font, SIZE, max_width);
    assert!(lines.len() > 1);
    assert_lines_fit(&lines, font, max_width);
    for line in &lines[..lines.len() - 1] {
        assert!(line.ends_with('-'), "expected hyphen in '{line}'");
    }
    let rebuilt: String = lines
        .iter()
        .map(|line| line.strip_suffix('-').unwrap_or(line))
        .collect();
    assert_eq!(rebuilt, token);
}

#[test]
fn test_split_takes_the_longest_fitting_prefix() {
    let font = StandardFont::Helvetica;
    let token = "abcdefghijklmnopqrstuvwxyz";
    let max_width = 60.0;
    let lines = wrap_text(token, &font, SIZE, max_width);
    let first = lines[0].strip_suffix('-').unwrap();
    let next_char = token[first.len()..].chars().next().unwrap();
    let longer = format!("{first}{next_char}-");
    assert!(font.text_width(&longer, SIZE) > max_width);
}

#[test]
fn test_tail_of_split_token_shares_line() {
    let font = StandardFont::Helvetica;
    let max_width = font.text_width("wwwwwwwwww", SIZE);
    let lines = wrap_text("wwwwwwwwwwwwwww ok", &font, SIZE, max_width);
    assert_eq!(lines.last().map(String::as_str), Some("wwwwww ok"));
    assert_lines_fit(&lines, font, max_width);
}

#[test]
fn test_paragraphs_wrap_independently_with_gap() {
    let font = StandardFont::Helvetica;
    let wrapped = wrap_paragraphs("First paragraph.\n\n\nSecond one\nwith a break.", &font, SIZE, 500.0);
    let texts: Vec<&str> = wrapped.texts().collect();
    assert_eq!(texts, vec!["First paragraph.", "Second one", "with a break."]);
    assert!(!wrapped.lines[0].gap_before);
    assert!(wrapped.lines[1].gap_before);
    assert!(!wrapped.lines[2].gap_before);
    assert_eq!(wrapped.paragraph_gaps(), 1);
    assert_eq!(wrapped.height(10.0, 4.0), 34.0);
}

#[test]
fn test_line_ends_mark_inserted_hyphens() {
    let font = StandardFont::Helvetica;
    // The token itself ends with a hyphen, which must not be mistaken for an inserted one.
    let token = "https://example.com/a/really/long/path/that/cannot/possibly/fit-";
    let wrapped = wrap_paragraphs(&format!("See {token}"), &font, SIZE, 120.0);

    let ends: Vec<LineEnd> = wrapped.lines.iter().map(|line| line.end).collect();
    assert_eq!(ends[0], LineEnd::WordBreak, "'See' breaks at the space");
    assert!(ends[1..ends.len() - 1].iter().all(|end| *end == LineEnd::Hyphenated));
    assert_eq!(ends.last(), Some(&LineEnd::WordBreak));

    let rebuilt: String = wrapped.lines[1..].iter().map(|line| line.source_text()).collect();
    assert_eq!(rebuilt, token);
}

#[test]
fn test_narrow_column_splits_without_hyphen() {
    let font = StandardFont::Helvetica;
    let max_width = font.text_width("W", SIZE);
    let wrapped = wrap_paragraphs("WWW", &font, SIZE, max_width);
    let ends: Vec<LineEnd> = wrapped.lines.iter().map(|line| line.end).collect();
    assert_eq!(ends, vec![LineEnd::Split, LineEnd::Split, LineEnd::WordBreak]);
    assert!(ends[0].continues_word());
    assert_eq!(wrapped.lines[0].source_text(), "W");
}

#[test]
fn test_fit_with_ellipsis() {
    let font = StandardFont::HelveticaBold;
    assert_eq!(fit_with_ellipsis("Short", &font, SIZE, 200.0), "Short");

    let long = "Configuring the deployment pipeline for staging and production";
    let max_width = 150.0;
    let fitted = fit_with_ellipsis(long, &font, SIZE, max_width);
    assert!(fitted.ends_with('…'));
    assert!(font.text_width(&fitted, SIZE) <= max_width);
    let stem = fitted.trim_end_matches('…');
    assert!(long.starts_with(stem));
    assert_eq!(fit_with_ellipsis(long, &font, SIZE, 2.0), "");
}

proptest! {
    #[test]
    fn prop_every_wrapped_line_fits(
        text in "[a-zA-Z0-9 .,:/?&=_-]{0,300}",
        max_width in 25.0f32..400.0,
        bold in any::<bool>(),
    ) {
        let font = if bold { StandardFont::HelveticaBold } else { StandardFont::Helvetica };
        let lines = wrap_text(&text, &font, SIZE, max_width);
        for line in &lines {
            prop_assert!(font.text_width(line, SIZE) <= max_width + 1e-3);
            prop_assert!(!line.is_empty());
        }
        let words: usize = text.split_whitespace().count();
        prop_assert!(lines.len() >= words.min(1));
    }

    #[test]
    fn prop_wrapping_keeps_every_character(
        text in "[a-zA-Z]{1,40}( [a-zA-Z]{1,40}){0,20}",
        max_width in 25.0f32..300.0,
    ) {
        let font = StandardFont::Helvetica;
        let lines = wrap_text(&text, &font, SIZE, max_width);
        let rebuilt: String = lines
            .iter()
            .map(|line| line.strip_suffix('-').unwrap_or(line))
            .collect::<String>()
            .replace(' ', "");
        prop_assert_eq!(rebuilt, text.replace(' ', ""));
    }
}
