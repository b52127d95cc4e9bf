use std::path::Path;

use pdf_writer::types::FontFlags;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::Error;

/// WinAnsi bytes 0x80..=0x9F that do not map straight onto Latin-1.
const WINANSI_HIGH: [(u8, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

fn winansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => WINANSI_HIGH.iter().find(|(_, ch)| *ch == c).map(|(b, _)| *b),
    }
}

fn winansi_char(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        _ => WINANSI_HIGH.iter().find(|(b, _)| *b == byte).map(|(_, c)| *c),
    }
}

/// Encode text for a WinAnsi PDF string. Returns the bytes and how many chars were dropped.
pub(crate) fn encode_winansi(text: &str) -> (Vec<u8>, usize) {
    let mut dropped = 0;
    let bytes = text
        .chars()
        .filter_map(|c| {
            let b = winansi_byte(c);
            if b.is_none() {
                dropped += 1;
            }
            b
        })
        .collect();
    (bytes, dropped)
}

// Helvetica advance widths (1000 units/em) for ASCII 32..=126.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn builtin_widths(ascii: &[u16; 95]) -> Vec<f32> {
    (32u16..=255)
        .map(|b| match b {
            32..=126 => ascii[(b - 32) as usize] as f32,
            _ => 556.0,
        })
        .collect()
}

struct TrueTypeData {
    ps_name: String,
    data: Vec<u8>,
    bbox: Rect,
    ascent: f32,
    descent: f32,
    cap_height: f32,
    italic: bool,
}

enum Source {
    Builtin(&'static [u8]),
    TrueType(Box<TrueTypeData>),
}

/// Reduce a font name to the characters allowed in a PDF /BaseFont name.
fn postscript_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// A font usable in the PDF emitter: its WinAnsi widths plus how to write it out.
pub(crate) struct PdfFont {
    widths_1000: Vec<f32>, // WinAnsi 32..=255
    source: Source,
}

impl PdfFont {
    pub(crate) fn helvetica() -> Self {
        PdfFont {
            widths_1000: builtin_widths(&HELVETICA_ASCII),
            source: Source::Builtin(b"Helvetica"),
        }
    }

    pub(crate) fn helvetica_bold() -> Self {
        PdfFont {
            widths_1000: builtin_widths(&HELVETICA_BOLD_ASCII),
            source: Source::Builtin(b"Helvetica-Bold"),
        }
    }

    /// Load a TrueType/OpenType file (first face of a collection) for embedding.
    pub(crate) fn from_file(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path)
            .map_err(|e| Error::Font(format!("cannot read {}: {e}", path.display())))?;
        let face = Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("cannot parse {}: {e}", path.display())))?;

        let units = face.units_per_em() as f32;
        let scale = |v: f32| v / units * 1000.0;

        let widths_1000: Vec<f32> = (32u8..=255u8)
            .map(|byte| {
                winansi_char(byte)
                    .and_then(|c| face.glyph_index(c))
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| scale(adv as f32))
                    .unwrap_or(0.0)
            })
            .collect();

        let family = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME && n.is_unicode())
            .and_then(|n| n.to_string())
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| String::from("EmbeddedFont"));
        let ps_name = postscript_name(&family);

        let bb = face.global_bounding_box();
        let bbox = Rect::new(
            scale(bb.x_min as f32),
            scale(bb.y_min as f32),
            scale(bb.x_max as f32),
            scale(bb.y_max as f32),
        );
        let ascent = scale(face.ascender() as f32);
        let descent = scale(face.descender() as f32);
        let cap_height = face
            .capital_height()
            .map(|h| scale(h as f32))
            .unwrap_or(700.0);
        let italic = face.is_italic();

        log::debug!("loaded font {ps_name} from {}", path.display());

        Ok(PdfFont {
            widths_1000,
            source: Source::TrueType(Box::new(TrueTypeData {
                ps_name,
                data,
                bbox,
                ascent,
                descent,
                cap_height,
                italic,
            })),
        })
    }

    pub(crate) fn char_width(&self, c: char, size: f32) -> f32 {
        winansi_byte(c)
            .map(|b| self.widths_1000[(b - 32) as usize])
            .unwrap_or(0.0)
            * size
            / 1000.0
    }

    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c, size)).sum()
    }

    /// Write the font objects and return the font dictionary reference.
    pub(crate) fn write(&self, pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Result<Ref, Error> {
        let font_ref = alloc();
        match &self.source {
            Source::Builtin(base) => {
                pdf.type1_font(font_ref)
                    .base_font(Name(*base))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Source::TrueType(tt) => {
                let descriptor_ref = alloc();
                let data_ref = alloc();

                let data_len = i32::try_from(tt.data.len())
                    .map_err(|_| Error::Font(format!("{} is too large to embed", tt.ps_name)))?;
                pdf.stream(data_ref, &tt.data)
                    .pair(Name(b"Length1"), data_len);

                let mut flags = FontFlags::NON_SYMBOLIC;
                if tt.italic {
                    flags |= FontFlags::ITALIC;
                }
                pdf.font_descriptor(descriptor_ref)
                    .name(Name(tt.ps_name.as_bytes()))
                    .flags(flags)
                    .bbox(tt.bbox)
                    .italic_angle(0.0)
                    .ascent(tt.ascent)
                    .descent(tt.descent)
                    .cap_height(tt.cap_height)
                    .stem_v(80.0)
                    .font_file2(data_ref);

                let mut d = pdf.indirect(font_ref).dict();
                d.pair(Name(b"Type"), Name(b"Font"));
                d.pair(Name(b"Subtype"), Name(b"TrueType"));
                d.pair(Name(b"BaseFont"), Name(tt.ps_name.as_bytes()));
                d.pair(Name(b"Encoding"), Name(b"WinAnsiEncoding"));
                d.pair(Name(b"FirstChar"), 32i32);
                d.pair(Name(b"LastChar"), 255i32);
                d.pair(Name(b"FontDescriptor"), descriptor_ref);
                d.insert(Name(b"Widths"))
                    .array()
                    .items(self.widths_1000.iter().copied());
            }
        }
        Ok(font_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winansi_keeps_latin1_and_smart_quotes() {
        let (bytes, dropped) = encode_winansi("caf\u{e9} \u{201C}x\u{201D}");
        assert_eq!(bytes, b"caf\xe9 \x93x\x94");
        assert_eq!(dropped, 0);
    }

    #[test]
    fn winansi_drops_unmappable_chars() {
        let (bytes, dropped) = encode_winansi("\u{3a9} = 2\u{3c0}r");
        assert_eq!(bytes, b" = 2r");
        assert_eq!(dropped, 2);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let text = "Section A: Physics";
        assert!(PdfFont::helvetica_bold().text_width(text, 12.0) > PdfFont::helvetica().text_width(text, 12.0));
    }

    #[test]
    fn postscript_name_drops_spaces_and_punctuation() {
        assert_eq!(postscript_name("Open Sans (Bold)"), "OpenSansBold");
        assert_eq!(postscript_name("DejaVuSans-Bold"), "DejaVuSans-Bold");
    }

    #[test]
    fn widths_come_from_the_font_file() {
        let Some(path) = test_fonts::system_ttf() else {
            eprintln!("no system TrueType font found, skipping");
            return;
        };
        let font = PdfFont::from_file(&path).unwrap();

        let data = std::fs::read(&path).unwrap();
        let face = Face::parse(&data, 0).unwrap();
        let gid = face.glyph_index('M').unwrap();
        let advance = face.glyph_hor_advance(gid).unwrap() as f32;
        let expected = advance / face.units_per_em() as f32 * 1000.0;

        assert!((font.char_width('M', 1000.0) - expected).abs() < 0.01);
        assert!(matches!(font.source, Source::TrueType(_)));
    }

    #[test]
    fn missing_font_file_is_a_font_error() {
        let err = PdfFont::from_file(Path::new("/nonexistent/font.ttf")).err();
        assert!(matches!(err, Some(Error::Font(_))));
    }
}
