//! Material library resolution
//!
//! Geometry documents name their material libraries with `mtllib`. The
//! parser never touches the file system itself; it asks a
//! [`LibraryResolver`] to turn the reference into a line source.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Trait for opening the material libraries a geometry document references
///
/// # Example
///
/// ```
/// use objbom::{LibraryResolver, Result};
/// use std::io::BufRead;
///
/// struct Builtin;
///
/// impl LibraryResolver for Builtin {
///     fn open(&self, reference: &str) -> Result<Box<dyn BufRead + '_>> {
///         match reference {
///             "default.mtl" => Ok(Box::new("newmtl white\nKd 1\n".as_bytes())),
///             other => Err(objbom::Error::MissingFile(other.to_string())),
///         }
///     }
/// }
/// ```
pub trait LibraryResolver {
    /// Key identifying the library across documents
    ///
    /// Two references with the same identity are parsed only once per run.
    fn identity(&self, reference: &str) -> String {
        reference.to_string()
    }

    /// Open the referenced library for reading
    fn open(&self, reference: &str) -> Result<Box<dyn BufRead + '_>>;
}

/// Resolves references relative to a directory, usually the geometry document's
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    /// Create a resolver rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory references are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

impl LibraryResolver for DirectoryResolver {
    fn identity(&self, reference: &str) -> String {
        let path = self.path(reference);
        path.canonicalize()
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }

    fn open(&self, reference: &str) -> Result<Box<dyn BufRead + '_>> {
        let path = self.path(reference);
        let file = File::open(&path)
            .map_err(|e| Error::MissingFile(format!("{}: {}", path.display(), e)))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Resolves references from an in-memory table
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    libraries: HashMap<String, String>,
}

impl MemoryResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register library text under `reference`
    pub fn with_library(mut self, reference: impl Into<String>, text: impl Into<String>) -> Self {
        self.libraries.insert(reference.into(), text.into());
        self
    }
}

impl LibraryResolver for MemoryResolver {
    fn open(&self, reference: &str) -> Result<Box<dyn BufRead + '_>> {
        self.libraries
            .get(reference)
            .map(|text| Box::new(Cursor::new(text.as_bytes())) as Box<dyn BufRead + '_>)
            .ok_or_else(|| Error::MissingFile(reference.to_string()))
    }
}
