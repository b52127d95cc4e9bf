use crate::model::{Block, Paper, section_label};

/// Lay a validated paper out as the block sequence shared by every emitter.
///
/// Each section yields a header, its numbered questions, then a spacer.
/// Question numbers restart at 1 in every section.
pub fn render_blocks(paper: &Paper) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (i, section) in paper.sections.iter().enumerate() {
        blocks.push(Block::header(format!(
            "Section {}: {} - Attempt {} each carrying {} marks",
            section_label(i),
            section.title,
            section.attempt_description,
            section.marks_per_question,
        )));
        for (j, q) in section.questions.iter().enumerate() {
            blocks.push(Block::question(format!("Q.{}: {}", j + 1, q)));
        }
        blocks.push(Block::spacer());
    }
    log::debug!(
        "rendered {} blocks from {} sections",
        blocks.len(),
        paper.sections.len()
    );
    blocks
}
