//! The paper form: what a user fills in, one entry per section.

use std::io::Read;
use std::num::NonZeroU32;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Paper, Section};

fn default_marks() -> NonZeroU32 {
    NonZeroU32::MIN
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_marks")]
    pub marks: NonZeroU32,
    #[serde(default)]
    pub attempt: String,
    /// Raw question text, one question per line.
    #[serde(default)]
    pub questions: String,
}

impl Default for SectionForm {
    fn default() -> Self {
        SectionForm {
            title: String::new(),
            marks: default_marks(),
            attempt: String::new(),
            questions: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaperForm {
    pub sections: Vec<SectionForm>,
}

impl PaperForm {
    /// A form with `count` empty sections.
    pub fn blank(count: usize) -> Self {
        PaperForm {
            sections: vec![SectionForm::default(); count],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a fresh paper from the current form contents.
    pub fn to_paper(&self) -> Paper {
        Paper::new(
            self.sections
                .iter()
                .map(|s| Section::new(s.title.as_str(), s.attempt.as_str(), s.marks, &s.questions))
                .collect(),
        )
    }
}
