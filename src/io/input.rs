//! Upload source trait definition.

use std::fmt::Debug;
use std::io::Read;

use crate::store::DocumentKind;

/// Something an uploaded document can be read from.
pub trait UploadSource: Send + Sync + Debug {
    /// File name as the editor supplied it, e.g. `staff.csv`.
    ///
    /// Used for error messages, logging and classifying the document.
    fn file_name(&self) -> &str;

    /// Open and return a new readable stream.
    ///
    /// Each call should return a fresh stream positioned at the beginning.
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;

    /// Document kind, by default derived from the file name extension.
    fn kind(&self) -> DocumentKind {
        DocumentKind::from_file_name(self.file_name())
    }

    /// Read the whole upload into memory.
    fn read_all(&self) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open()?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
