use crate::embed::EmbeddedShots;
use shotdoc_idf::{HeadingLevel, HeadingOptions, LayoutBlock};

pub const APPENDIX_TITLE: &str = "Appendix: Screenshots";

/// Blocks for the screenshot appendix: a heading on a fresh page, then
/// every embedded shot in figure order. Empty when nothing was embedded.
pub fn appendix_blocks(shots: &EmbeddedShots) -> Vec<LayoutBlock> {
    if shots.is_empty() {
        return Vec::new();
    }
    let heading = LayoutBlock::Heading {
        text: APPENDIX_TITLE.to_string(),
        level: HeadingLevel::Section,
        options: HeadingOptions {
            page_break_before: true,
            keep_next_lines: Some(0),
        },
    };
    std::iter::once(heading)
        .chain(
            shots
                .by_figure_number()
                .map(|shot| LayoutBlock::Figure(shot.source_shot_id.clone())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_shots_no_appendix() {
        assert!(appendix_blocks(&EmbeddedShots::default()).is_empty());
    }
}
