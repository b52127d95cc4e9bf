use std::io::{Cursor, Read};
use std::num::NonZeroU32;

use qpaper::{DocumentEmitter, DocxEmitter, DocxOptions, Paper, Section, render_blocks};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn marks(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

fn sample_paper() -> Paper {
    Paper::new(vec![
        Section::new("Physics", "Attempt all questions", marks(5), "What is mass?\nDefine force."),
        Section::new("Maths & Logic", "Attempt any 2", marks(3), "Is 3 < 4?\n\"Prove\" it's true."),
    ])
}

fn read_part(docx: &[u8], name: &str) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
    xml
}

fn is_wml(node: &roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

/// (text, bold) for every body paragraph.
fn paragraphs(document_xml: &str) -> Vec<(String, bool)> {
    let xml = roxmltree::Document::parse(document_xml).unwrap();
    let body = xml
        .root_element()
        .children()
        .find(|n| is_wml(n, "body"))
        .unwrap();
    body.children()
        .filter(|n| is_wml(n, "p"))
        .map(|p| {
            let text: String = p
                .descendants()
                .filter(|n| is_wml(n, "t"))
                .filter_map(|n| n.text())
                .collect();
            let bold = p.descendants().any(|n| is_wml(&n, "b"));
            (text, bold)
        })
        .collect()
}

#[test]
fn package_has_the_required_parts() {
    let docx = DocxEmitter::default().render(&render_blocks(&sample_paper())).unwrap();
    let zip = zip::ZipArchive::new(Cursor::new(&docx[..])).unwrap();
    let names: Vec<&str> = zip.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/_rels/document.xml.rels",
        "docProps/core.xml",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }
}

#[test]
fn one_paragraph_per_block_with_bold_headers() {
    let blocks = render_blocks(&sample_paper());
    let docx = DocxEmitter::default().render(&blocks).unwrap();
    let paras = paragraphs(&read_part(&docx, "word/document.xml"));

    assert_eq!(paras.len(), blocks.len());
    assert_eq!(
        paras,
        vec![
            (
                "Section A: Physics - Attempt Attempt all questions each carrying 5 marks".to_string(),
                true
            ),
            ("Q.1: What is mass?".to_string(), false),
            ("Q.2: Define force.".to_string(), false),
            (String::new(), false),
            (
                "Section B: Maths & Logic - Attempt Attempt any 2 each carrying 3 marks".to_string(),
                true
            ),
            ("Q.1: Is 3 < 4?".to_string(), false),
            ("Q.2: \"Prove\" it's true.".to_string(), false),
            (String::new(), false),
        ]
    );
}

#[test]
fn styles_carry_the_configured_font() {
    let emitter = DocxEmitter::new(DocxOptions {
        font_name: "Times New Roman".into(),
        font_size: 12.0,
    });
    let docx = emitter.render(&render_blocks(&sample_paper())).unwrap();
    let styles = read_part(&docx, "word/styles.xml");
    let xml = roxmltree::Document::parse(&styles).unwrap();
    let rfonts = xml.descendants().find(|n| is_wml(n, "rFonts")).unwrap();
    assert_eq!(rfonts.attribute((WML_NS, "ascii")), Some("Times New Roman"));
    let sz = xml.descendants().find(|n| is_wml(n, "sz")).unwrap();
    assert_eq!(sz.attribute((WML_NS, "val")), Some("24"));
}

#[test]
fn output_is_reproducible() {
    let blocks = render_blocks(&sample_paper());
    let emitter = DocxEmitter::default();
    assert_eq!(emitter.render(&blocks).unwrap(), emitter.render(&blocks).unwrap());
}

#[test]
fn artifact_is_named_for_download() {
    let artifact = DocxEmitter::default().emit(&render_blocks(&sample_paper())).unwrap();
    assert_eq!(artifact.file_name, "question_paper.docx");
    assert_eq!(
        artifact.mime_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(&artifact.bytes[..2], b"PK");
}
