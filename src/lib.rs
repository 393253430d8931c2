//! # objbom
//!
//! A pure Rust converter from Wavefront OBJ geometry and MTL material
//! libraries to BOM, a compact little-endian binary container.
//!
//! Geometry documents reference vertex attributes through shared,
//! 1-based or relative indices. The converter resolves them into compact
//! indexed meshes with 16-bit face indices, one vertex buffer set per
//! object, and encodes every optional field behind an attribute bitmask.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Triangles and quads in all four vertex reference forms
//! - Corner deduplication, or fully expanded vertices
//! - Material libraries shared across documents, with run-wide material ids
//! - Decoding of BOM containers back into the in-memory model
//!
//! ## Example
//!
//! ```no_run
//! use objbom::{Converter, DirectoryResolver, ParserConfig};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = DirectoryResolver::new("models");
//! let mut converter = Converter::new(ParserConfig::new());
//!
//! let file = BufReader::new(File::open("models/boat.obj")?);
//! converter.add_document("boat", file, &resolver)?;
//!
//! let container = converter.finish();
//! container.write_to_file("boat.bom")?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod model;
pub mod parser;
mod reader;
pub mod resolver;
mod validator;
mod writer;

pub use error::{Error, ErrorContext, Result};
pub use model::{
    Asset, Color, Container, Face, FaceCulling, Group, MapModifier, Material, MaterialLibrary,
    Object, TextureMap, Vector2, Vector3,
};
pub use parser::{Converter, ParseContext, ParserConfig, VertexMode};
pub use reader::read_container;
pub use resolver::{DirectoryResolver, LibraryResolver, MemoryResolver};
pub use validator::validate_container;
pub use writer::write_container;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

impl Container {
    /// Decode a BOM container from a reader
    ///
    /// # Example
    ///
    /// ```no_run
    /// use objbom::Container;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let container = Container::from_reader(File::open("boat.bom")?)?;
    /// println!("{} asset(s)", container.assets.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        read_container(reader)
    }

    /// Decode a BOM container from a file path
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Encode the container into a writer and hand the writer back
    ///
    /// # Example
    ///
    /// ```
    /// use objbom::Container;
    ///
    /// let bytes = Container::new().to_writer(Vec::new())?;
    /// assert_eq!(&bytes[..3], b"BOM");
    /// # Ok::<(), objbom::Error>(())
    /// ```
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<W> {
        write_container(self, &mut writer)?;
        Ok(writer)
    }

    /// Encode the container into a file, creating or truncating it
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file))?;
        Ok(())
    }
}
