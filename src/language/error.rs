use std::{fmt, io, path::Path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> LoadingError<'i> {
    /// Classify an I/O failure encountered while reading the given file.
    pub fn from_io(error: &io::Error, filename: &'i Path) -> LoadingError<'i> {
        match error.kind() {
            io::ErrorKind::NotFound => LoadingError {
                problem: "File not found".to_string(),
                details: String::new(),
                filename,
            },
            _ => LoadingError {
                problem: "Failed reading".to_string(),
                details: error
                    .kind()
                    .to_string(),
                filename,
            },
        }
    }
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}", self.problem)
        } else {
            write!(f, "{}: {}", self.problem, self.details)
        }
    }
}
