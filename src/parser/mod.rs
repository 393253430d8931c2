//! Text parsing for geometry and material library documents
//!
//! Both document kinds are line oriented: every non-blank line is split on
//! whitespace into a directive keyword and its arguments. Problems are
//! reported at three severities:
//!
//! - warnings are logged and parsing continues,
//! - document errors stop the current document and are returned (geometry)
//!   or logged (material libraries),
//! - I/O failures on the line source surface as [`Error::Io`].

mod face;
mod geometry;
mod material;

use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{Asset, Container, MaterialLibrary};
use crate::resolver::LibraryResolver;

pub use face::{FaceRefs, VertexRef, parse_face, resolve_index};
pub use geometry::parse_geometry;
pub use material::parse_material_library;

/// How face corners are turned into output vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexMode {
    /// Corners with identical (position, normal, uv) indices share one vertex
    #[default]
    Deduplicated,
    /// Every triangle corner emits its own vertex, so a quad yields six
    Expanded,
}

/// Configuration for parsing geometry documents
///
/// The vertex mode is fixed for a whole run.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    vertex_mode: VertexMode,
}

impl ParserConfig {
    /// Create a configuration with deduplicated vertices
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the vertex mode
    pub fn with_vertex_mode(mut self, mode: VertexMode) -> Self {
        self.vertex_mode = mode;
        self
    }

    /// The selected vertex mode
    pub fn vertex_mode(&self) -> VertexMode {
        self.vertex_mode
    }
}

/// Run-wide state shared by every document of one conversion
///
/// Holds the material id sequence and the libraries parsed so far. Ids are
/// handed out in increasing order and never reused, so materials from
/// different documents never collide.
#[derive(Debug, Default)]
pub struct ParseContext {
    next_material_id: u32,
    libraries: Vec<MaterialLibrary>,
    library_index: HashMap<String, usize>,
}

impl ParseContext {
    /// Create an empty context; the first material gets id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next material id
    pub fn allocate_material_id(&mut self) -> Result<u16> {
        let id = u16::try_from(self.next_material_id).map_err(|_| {
            Error::InvalidModel(format!(
                "material id space exhausted ({} materials already defined)",
                self.next_material_id
            ))
        })?;
        self.next_material_id += 1;
        Ok(id)
    }

    /// Libraries parsed so far, in first-reference order
    pub fn libraries(&self) -> &[MaterialLibrary] {
        &self.libraries
    }

    /// Index of an already parsed library by resolver identity
    pub(crate) fn find_library(&self, identity: &str) -> Option<usize> {
        self.library_index.get(identity).copied()
    }

    /// Register a parsed library and return its index
    pub(crate) fn register_library(&mut self, identity: String, library: MaterialLibrary) -> usize {
        let index = self.libraries.len();
        self.libraries.push(library);
        self.library_index.insert(identity, index);
        index
    }

    /// Consume the context, keeping its libraries
    pub fn into_libraries(self) -> Vec<MaterialLibrary> {
        self.libraries
    }
}

/// Drives a conversion run: parses documents one by one into a [`Container`]
///
/// # Example
///
/// ```
/// use objbom::{Converter, MemoryResolver, ParserConfig};
///
/// let resolver = MemoryResolver::new().with_library("scene.mtl", "newmtl red\nKd 1 0 0\n");
/// let obj = "mtllib scene.mtl\nv 0 0 0\nv 1 0 0\nv 1 1 0\nusemtl red\nf 1 2 3\n";
///
/// let mut converter = Converter::new(ParserConfig::new());
/// converter.add_document("triangle", obj.as_bytes(), &resolver)?;
/// let container = converter.finish();
///
/// assert_eq!(container.assets.len(), 1);
/// assert_eq!(container.material_count(), 1);
/// # Ok::<(), objbom::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    config: ParserConfig,
    context: ParseContext,
    assets: Vec<Asset>,
}

impl Converter {
    /// Create a converter with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            context: ParseContext::new(),
            assets: Vec::new(),
        }
    }

    /// Parse one geometry document and append its asset
    ///
    /// A document that fails contributes no asset; the error is logged and
    /// returned so the caller can decide whether to continue. Libraries the
    /// document loaded before failing stay registered.
    pub fn add_document<R: BufRead>(
        &mut self,
        name: &str,
        reader: R,
        resolver: &dyn LibraryResolver,
    ) -> Result<()> {
        match parse_geometry(name, reader, resolver, &mut self.context, &self.config) {
            Ok(asset) => {
                self.assets.push(asset);
                Ok(())
            }
            Err(err) => {
                log::error!("Dropping document '{}': {}", name, err);
                Err(err)
            }
        }
    }

    /// Assets parsed so far
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// The shared parse context
    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Finish the run and return the container to encode
    pub fn finish(self) -> Container {
        Container {
            libraries: self.context.into_libraries(),
            assets: self.assets,
        }
    }
}

/// Split a line into its directive keyword and arguments
///
/// Returns `None` for blank lines.
pub(crate) fn split_directive(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next()?;
    Some((keyword, tokens.collect()))
}

/// Parse a required numeric argument
pub(crate) fn parse_number<T: FromStr>(
    directive: &str,
    value: Option<&&str>,
    expected: &str,
) -> Result<T> {
    let value = value.ok_or_else(|| {
        Error::directive(directive, &format!("missing argument, expected {}", expected))
    })?;
    value
        .parse::<T>()
        .map_err(|_| Error::parse_error_with_context(directive, value, expected))
}

/// Parse a required float argument
pub(crate) fn parse_f32(directive: &str, value: Option<&&str>) -> Result<f32> {
    parse_number(directive, value, "floating-point number")
}

/// The name argument of `newmtl`, `usemtl`, `g` and `o`
///
/// Names are single tokens; anything after the first token is ignored.
pub(crate) fn required_name<'a>(directive: &str, args: &[&'a str]) -> Result<&'a str> {
    args.first()
        .copied()
        .ok_or_else(|| Error::directive(directive, "missing name"))
}
