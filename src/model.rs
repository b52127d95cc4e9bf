use std::num::NonZeroU32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub attempt_description: String,
    pub marks_per_question: NonZeroU32,
    pub questions: Vec<String>, // trimmed, blank lines already dropped
}

impl Section {
    pub fn new(
        title: impl Into<String>,
        attempt_description: impl Into<String>,
        marks_per_question: NonZeroU32,
        raw_questions: &str,
    ) -> Self {
        Section {
            title: title.into(),
            attempt_description: attempt_description.into(),
            marks_per_question,
            questions: split_questions(raw_questions),
        }
    }
}

/// One question per line; surrounding whitespace is trimmed and blank lines are skipped.
pub fn split_questions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Sections in the order they were entered. Order defines lettering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paper {
    pub sections: Vec<Section>,
}

impl Paper {
    pub fn new(sections: Vec<Section>) -> Self {
        Paper { sections }
    }
}

/// Positional label for a section: A..Z, then AA, AB, .. (bijective base 26).
pub fn section_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    SectionHeader,
    Question,
    Spacer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn header(text: String) -> Self {
        Block { kind: BlockKind::SectionHeader, text }
    }

    pub fn question(text: String) -> Self {
        Block { kind: BlockKind::Question, text }
    }

    pub fn spacer() -> Self {
        Block { kind: BlockKind::Spacer, text: String::new() }
    }
}
