//! Reading artifacts. Checkers receive a Source rather than touching the
//! filesystem, so they can equally run against in-memory fixtures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::language::LoadingError;

pub trait Source {
    /// Read the entire file into an owned String.
    fn read<'p>(&self, path: &'p Path) -> Result<String, LoadingError<'p>>;

    fn exists(&self, path: &Path) -> bool;

    /// All files below root whose extension is one of those given, sorted
    /// by path. A missing root yields nothing.
    fn walk(&self, root: &Path, extensions: &[&str]) -> Vec<PathBuf>;
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filesystem;

impl Source for Filesystem {
    fn read<'p>(&self, path: &'p Path) -> Result<String, LoadingError<'p>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError::from_io(&error, path))
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk(&self, root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
        if !root.is_dir() {
            debug!("Not a directory: {}", root.display());
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    debug!(?error);
                    None
                }
            })
            .filter(|entry| {
                entry
                    .file_type()
                    .is_file()
            })
            .map(|entry| entry.into_path())
            .filter(|path| has_extension(path, extensions))
            .collect();

        files.sort();
        files
    }
}

/// Files held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    files: BTreeMap<PathBuf, String>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Memory {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .insert(path.into(), content.into());
    }
}

impl Source for Memory {
    fn read<'p>(&self, path: &'p Path) -> Result<String, LoadingError<'p>> {
        match self
            .files
            .get(path)
        {
            Some(content) => Ok(content.clone()),
            None => Err(LoadingError {
                problem: "File not found".to_string(),
                details: String::new(),
                filename: path,
            }),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|key| key.starts_with(path))
    }

    fn walk(&self, root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
        self.files
            .keys()
            .filter(|key| key.starts_with(root) && key.as_path() != root)
            .filter(|key| has_extension(key, extensions))
            .cloned()
            .collect()
    }
}
