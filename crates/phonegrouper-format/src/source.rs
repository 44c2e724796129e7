use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::FormatError;
use crate::Result;

/// Large inputs are read through one big buffer rather than many small reads.
pub const READ_BUFFER_SIZE: usize = 8 * 1024 * 1024;

pub trait LineSource {
    fn source_name(&self) -> String;
    fn open(&self) -> Result<Box<dyn BufRead>>;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path).map_err(|source| FormatError::Open {
            path: self.path.clone(),
            source,
        })?;
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl LineSource for StdinSource {
    fn source_name(&self) -> String {
        "<stdin>".to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(io::stdin())))
    }
}

/// Resolves a command-line input argument; `-` reads standard input.
pub fn source_for(input: &Path) -> Box<dyn LineSource> {
    if input == Path::new("-") {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource::new(input))
    }
}

#[cfg(test)]
mod tests {
    use super::{source_for, FileSource, LineSource};
    use crate::error::FormatError;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reports_path() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("missing.txt");
        let err = FileSource::new(&path).open().err().expect("open error");
        assert!(matches!(err, FormatError::Open { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn dash_selects_stdin() {
        assert_eq!(source_for(Path::new("-")).source_name(), "<stdin>");
        assert_eq!(source_for(Path::new("numbers.txt")).source_name(), "numbers.txt");
    }
}
