use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::emit::DocumentEmitter;
use crate::error::Error;
use crate::model::{Block, BlockKind};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_DOC_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const STYLES_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const CORE_PROPS_REL: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const CORE_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Question Paper</dc:title><dc:creator>qpaper</dc:creator></cp:coreProperties>"#;

#[derive(Clone, Debug)]
pub struct DocxOptions {
    pub font_name: String,
    pub font_size: f32, // points
}

impl Default for DocxOptions {
    fn default() -> Self {
        DocxOptions {
            font_name: String::from("Calibri"),
            font_size: 11.0,
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // XML 1.0 forbids most control characters outright.
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

fn paragraph_xml(block: &Block) -> String {
    match block.kind {
        BlockKind::Spacer => String::from("<w:p/>"),
        BlockKind::SectionHeader => format!(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape_xml(&block.text)
        ),
        BlockKind::Question => format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape_xml(&block.text)
        ),
    }
}

fn document_xml(blocks: &[Block]) -> String {
    let body: String = blocks.iter().map(paragraph_xml).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WML_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn styles_xml(options: &DocxOptions) -> String {
    let font = escape_xml(&options.font_name);
    // w:sz is in half-points
    let half_points = (options.font_size * 2.0).round() as u32;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WML_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}" w:eastAsia="{font}"/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style></w:styles>"#
    )
}

fn package_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{OFFICE_DOC_REL}" Target="word/document.xml"/><Relationship Id="rId2" Type="{CORE_PROPS_REL}" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn document_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{STYLES_REL}" Target="styles.xml"/></Relationships>"#
    )
}

#[derive(Default)]
pub struct DocxEmitter {
    options: DocxOptions,
}

impl DocxEmitter {
    pub fn new(options: DocxOptions) -> Self {
        DocxEmitter { options }
    }
}

impl DocumentEmitter for DocxEmitter {
    fn file_name(&self) -> &'static str {
        "question_paper.docx"
    }

    fn mime_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn render(&self, blocks: &[Block]) -> Result<Vec<u8>, Error> {
        // Fixed timestamp keeps the archive byte-for-byte reproducible.
        let file_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", package_rels()),
            ("docProps/core.xml", CORE_PROPS.to_string()),
            ("word/document.xml", document_xml(blocks)),
            ("word/styles.xml", styles_xml(&self.options)),
            ("word/_rels/document.xml.rels", document_rels()),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, xml) in &parts {
            zip.start_file(*name, file_options)?;
            zip.write_all(xml.as_bytes())?;
        }
        let bytes = zip.finish()?.into_inner();

        log::debug!("packed {} paragraph(s) into {} DOCX bytes", blocks.len(), bytes.len());
        Ok(bytes)
    }
}
