use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::Block;

/// A finished output file, ready to be offered for download or written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, Error> {
        let path = dir.join(self.file_name);
        std::fs::write(&path, &self.bytes)?;
        log::info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Turns the shared block sequence into one document format.
pub trait DocumentEmitter {
    fn file_name(&self) -> &'static str;
    fn mime_type(&self) -> &'static str;
    fn render(&self, blocks: &[Block]) -> Result<Vec<u8>, Error>;

    fn emit(&self, blocks: &[Block]) -> Result<Artifact, Error> {
        let bytes = self.render(blocks)?;
        Ok(Artifact {
            file_name: self.file_name(),
            mime_type: self.mime_type(),
            bytes,
        })
    }
}
