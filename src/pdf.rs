use std::path::PathBuf;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::emit::DocumentEmitter;
use crate::error::Error;
use crate::fonts::{PdfFont, encode_winansi};
use crate::model::{Block, BlockKind};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PdfOptions {
    pub page_size: PageSize,
    pub margin: f32,
    pub header_size: f32,
    pub question_size: f32,
    pub leading: f32, // line height as a multiple of font size
    /// TrueType/OpenType file for question text; Helvetica when unset.
    pub font: Option<PathBuf>,
    /// TrueType/OpenType file for section headers; Helvetica-Bold when unset.
    pub bold_font: Option<PathBuf>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            page_size: PageSize::Letter,
            margin: 72.0,
            header_size: 12.0,
            question_size: 10.0,
            leading: 1.2,
            font: None,
            bold_font: None,
        }
    }
}

struct Line {
    text: String,
    bold: bool,
    size: f32,
    baseline: f32,
}

pub struct PdfEmitter {
    options: PdfOptions,
    regular: PdfFont,
    bold: PdfFont,
}

impl PdfEmitter {
    pub fn new(options: PdfOptions) -> Result<Self, Error> {
        let regular = match &options.font {
            Some(path) => PdfFont::from_file(path)?,
            None => PdfFont::helvetica(),
        };
        let bold = match &options.bold_font {
            Some(path) => PdfFont::from_file(path)?,
            None => PdfFont::helvetica_bold(),
        };
        Ok(PdfEmitter { options, regular, bold })
    }

    fn layout(&self, blocks: &[Block]) -> Vec<Vec<Line>> {
        let opts = &self.options;
        let (_, page_height) = opts.page_size.dimensions();
        let top = page_height - opts.margin;
        let bottom = opts.margin;
        let max_width = self.text_width();

        let mut pages: Vec<Vec<Line>> = vec![Vec::new()];
        let mut cursor_y = top;

        for block in blocks {
            let (bold, size) = match block.kind {
                BlockKind::SectionHeader => (true, opts.header_size),
                BlockKind::Question => (false, opts.question_size),
                BlockKind::Spacer => {
                    let gap = opts.question_size * opts.leading;
                    // A spacer never opens a page and is dropped at a page top.
                    if cursor_y < top && cursor_y - gap >= bottom {
                        cursor_y -= gap;
                    }
                    continue;
                }
            };
            let font = if bold { &self.bold } else { &self.regular };
            let line_height = size * opts.leading;

            let lines = wrap_text(&block.text, font, size, max_width);
            let dropped = lost_chars(&lines);
            if dropped > 0 {
                log::warn!("{dropped} character(s) not representable in the PDF font dropped from: {}", block.text);
            }

            for text in lines {
                if cursor_y - line_height < bottom && cursor_y < top {
                    pages.push(Vec::new());
                    cursor_y = top;
                }
                let baseline = cursor_y - size;
                cursor_y -= line_height;
                if let Some(page) = pages.last_mut() {
                    page.push(Line { text, bold, size, baseline });
                }
            }
        }

        log::debug!("laid out {} block(s) on {} page(s)", blocks.len(), pages.len());
        pages
    }

    fn text_width(&self) -> f32 {
        let (page_width, _) = self.options.page_size.dimensions();
        page_width - 2.0 * self.options.margin
    }
}

/// Characters of already wrapped lines that WinAnsi cannot encode.
fn lost_chars(lines: &[String]) -> usize {
    lines.iter().map(|line| encode_winansi(line).1).sum()
}

/// Greedy word wrap. A word wider than the line is split between characters.
fn wrap_text(text: &str, font: &PdfFont, size: f32, max_width: f32) -> Vec<String> {
    let space = font.char_width(' ', size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = font.text_width(word, size);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for c in word.chars() {
                let w = font.char_width(c, size);
                if current_width + w > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl DocumentEmitter for PdfEmitter {
    fn file_name(&self) -> &'static str {
        "question_paper.pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, blocks: &[Block]) -> Result<Vec<u8>, Error> {
        let pages = self.layout(blocks);
        let (page_width, page_height) = self.options.page_size.dimensions();
        let cursor_x = self.options.margin;

        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();
        let regular_ref = self.regular.write(&mut pdf, &mut alloc)?;
        let bold_ref = self.bold.write(&mut pdf, &mut alloc)?;
        let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

        let page_count = i32::try_from(page_ids.len())
            .map_err(|_| Error::Pdf(format!("too many pages: {}", page_ids.len())))?;

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().map(|&(page_id, _)| page_id))
            .count(page_count);
        pdf.document_info(info_id)
            .title(TextStr("Question Paper"))
            .creator(TextStr("qpaper"));

        for (lines, &(page_id, content_id)) in pages.iter().zip(&page_ids) {
            let mut content = Content::new();
            for line in lines {
                let (bytes, _) = encode_winansi(&line.text);
                content
                    .begin_text()
                    .set_font(if line.bold { BOLD } else { REGULAR }, line.size)
                    .next_line(cursor_x, line.baseline)
                    .show(Str(&bytes))
                    .end_text();
            }
            pdf.stream(content_id, &content.finish());

            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, page_width, page_height))
                .parent(pages_id)
                .contents(content_id);
            page.resources()
                .fonts()
                .pair(REGULAR, regular_ref)
                .pair(BOLD, bold_ref);
        }

        Ok(pdf.finish())
    }
}
