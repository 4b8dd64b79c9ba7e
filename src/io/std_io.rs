//! Filesystem and stdin upload sources.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::UploadSource;

/// Upload read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileUpload {
    file_name: String,
    path: PathBuf,
}

impl FileUpload {
    /// The file name is the last path component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { file_name, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UploadSource for FileUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let file = std::fs::File::open(&self.path)?;
        Ok(Box::new(io::BufReader::new(file)))
    }
}

/// Upload piped through stdin. Needs an explicit file name to be classified.
///
/// Stdin can only be consumed once; a second `open` yields an empty stream.
#[derive(Debug, Clone)]
pub struct StdinUpload {
    file_name: String,
}

impl StdinUpload {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl UploadSource for StdinUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::stdin()))
    }
}
