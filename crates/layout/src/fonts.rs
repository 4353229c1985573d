//! Metrics for the PDF standard Helvetica family.
//!
//! Documents are set in the base-14 fonts with `WinAnsiEncoding`, so no font
//! program is embedded and widths come from the Adobe font metrics below.
//! Text is always measured through [`encode_win_ansi`], which means the width
//! of a string is the width of exactly the bytes that end up in the content
//! stream, including `?` substitutions for characters the encoding lacks.
//!
//! Kerning and ligatures are not applied.

/// Advance widths for codes 0x20..=0x7E in 1/1000 em.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Advance widths for codes 0x80..=0xFF; zero marks codes WinAnsi leaves undefined.
const HELVETICA_HIGH: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

const HELVETICA_BOLD_HIGH: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 0xF0
];

/// Something that can report advance widths for WinAnsi-encoded text.
pub trait FontMetrics {
    /// Advance width of one encoded byte in 1/1000 em.
    fn advance(&self, code: u8) -> u16;

    /// Width in points of `text` set at `size`.
    fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| u32::from(self.advance(code)))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// The standard fonts a document draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl StandardFont {
    pub const ALL: [StandardFont; 3] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
    ];

    /// The PostScript name written as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// The key the font is registered under in page resources.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
        }
    }

    fn tables(&self) -> (&'static [u16; 95], &'static [u16; 128]) {
        match self {
            // Oblique shares the upright metrics.
            StandardFont::Helvetica | StandardFont::HelveticaOblique => (&HELVETICA_ASCII, &HELVETICA_HIGH),
            StandardFont::HelveticaBold => (&HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_HIGH),
        }
    }
}

impl FontMetrics for StandardFont {
    fn advance(&self, code: u8) -> u16 {
        let (ascii, high) = self.tables();
        let width = match code {
            0x20..=0x7E => ascii[usize::from(code - 0x20)],
            0x80..=0xFF => high[usize::from(code - 0x80)],
            _ => 0,
        };
        if width == 0 {
            // Undefined codes never survive encoding; measure them like '?'.
            ascii[usize::from(b'?' - 0x20)]
        } else {
            width
        }
    }
}

/// Encodes `text` as WinAnsi bytes.
///
/// Control characters become spaces and characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_code).collect()
}

fn win_ansi_code(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        c if c.is_control() => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '\u{2010}' | '\u{2011}' | '\u{2212}' => b'-',
        '\u{2009}' | '\u{202F}' | '\u{2007}' => b' ',
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii_with_afm_widths() {
        let font = StandardFont::Helvetica;
        // H(722) + i(222) = 944 units
        assert!((font.text_width("Hi", 10.0) - 9.44).abs() < 1e-4);
        assert!((StandardFont::HelveticaBold.text_width("Hi", 10.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn oblique_shares_upright_metrics() {
        let text = "Screenshots and steps";
        assert_eq!(
            StandardFont::Helvetica.text_width(text, 11.0),
            StandardFont::HelveticaOblique.text_width(text, 11.0)
        );
    }

    #[test]
    fn encodes_typographic_punctuation() {
        assert_eq!(encode_win_ansi("“a”–•…"), vec![0x93, b'a', 0x94, 0x96, 0x95, 0x85]);
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn replaces_unencodable_and_control_characters() {
        assert_eq!(encode_win_ansi("日本\tx"), vec![b'?', b'?', b' ', b'x']);
        let font = StandardFont::Helvetica;
        assert_eq!(font.text_width("日", 10.0), font.text_width("?", 10.0));
    }
}
