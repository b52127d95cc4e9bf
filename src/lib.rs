mod blocks;
mod docx;
mod emit;
mod error;
mod fonts;
mod form;
mod model;
mod pdf;
mod validate;

pub use blocks::render_blocks;
pub use docx::{DocxEmitter, DocxOptions};
pub use emit::{Artifact, DocumentEmitter};
pub use error::Error;
pub use form::{PaperForm, SectionForm};
pub use model::{Block, BlockKind, Paper, Section, section_label, split_questions};
pub use pdf::{PageSize, PdfEmitter, PdfOptions};
pub use validate::{Problem, Validation, validate};

/// Validate `paper`, render its blocks once and hand them to every emitter in turn.
pub fn generate(paper: &Paper, emitters: &[&dyn DocumentEmitter]) -> Result<Vec<Artifact>, Error> {
    let validation = validate(paper);
    if !validation.is_valid() {
        return Err(Error::Invalid(validation));
    }
    let blocks = render_blocks(paper);
    emitters.iter().map(|e| e.emit(&blocks)).collect()
}
