//! In-memory upload source.

use std::io::{self, Cursor, Read};
use std::sync::Arc;

use super::UploadSource;

/// Upload held in memory, cheap to clone.
#[derive(Debug, Clone)]
pub struct MemoryUpload {
    file_name: String,
    data: Arc<[u8]>,
}

impl MemoryUpload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: Arc::from(data.into()),
        }
    }

    pub fn from_string(file_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(file_name, data.into().into_bytes())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl UploadSource for MemoryUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.data.clone())))
    }
}
