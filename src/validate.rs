use crate::model::{Paper, section_label};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Problem {
    IncompleteSections,
    NoQuestions,
}

impl Problem {
    pub fn message(self) -> &'static str {
        match self {
            Problem::NoQuestions => {
                "Please add at least one question in any section before generating the paper."
            }
            Problem::IncompleteSections => {
                "Please make sure that the title and attempt description for all sections are filled."
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub structurally_complete: bool,
    pub has_any_question: bool,
    /// Labels (A, B, ..) of sections missing a title or attempt description.
    pub incomplete_sections: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.structurally_complete && self.has_any_question
    }

    /// One entry per failing check, questions first.
    pub fn problems(&self) -> Vec<Problem> {
        let mut problems = Vec::new();
        if !self.has_any_question {
            problems.push(Problem::NoQuestions);
        }
        if !self.structurally_complete {
            problems.push(Problem::IncompleteSections);
        }
        problems
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn validate(paper: &Paper) -> Validation {
    let incomplete_sections: Vec<String> = paper
        .sections
        .iter()
        .enumerate()
        .filter(|(_, s)| is_blank(&s.title) || is_blank(&s.attempt_description))
        .map(|(i, _)| section_label(i))
        .collect();

    let has_any_question = paper
        .sections
        .iter()
        .flat_map(|s| s.questions.iter())
        .any(|q| !is_blank(q));

    Validation {
        structurally_complete: incomplete_sections.is_empty(),
        has_any_question,
        incomplete_sections,
    }
}
