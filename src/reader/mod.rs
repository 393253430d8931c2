//! Binary reading for BOM containers
//!
//! Decodes the layout produced by [`crate::write_container`]. The
//! container stores materials by position only, so decoded materials are
//! numbered `0..n` and collected into a single unnamed library.

mod core;
mod material;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::format::{FileAttributes, SIGNATURE, VERSION};
use crate::model::{Color, Container, MaterialLibrary, Vector2, Vector3};

/// Read a BOM container
///
/// A wrong signature or malformed content is [`Error::InvalidFormat`], a
/// newer format version is [`Error::Unsupported`] and a truncated stream
/// surfaces as [`Error::Io`] with `UnexpectedEof`.
pub fn read_container<R: Read>(mut reader: R) -> Result<Container> {
    let mut signature = [0u8; 3];
    reader.read_exact(&mut signature)?;
    if signature != SIGNATURE {
        return Err(Error::InvalidFormat(format!(
            "bad signature {:?}, expected \"BOM\"",
            String::from_utf8_lossy(&signature)
        )));
    }

    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(Error::Unsupported(format!(
            "container version {} (this build reads version {})",
            version, VERSION
        )));
    }

    let attributes = FileAttributes::from_bits_truncate(reader.read_u16::<LittleEndian>()?);
    let mut container = Container::new();

    let mut material_count = 0;
    if attributes.contains(FileAttributes::MATERIAL_LIBRARY) {
        material_count = reader.read_u16::<LittleEndian>()?;
        let mut library = MaterialLibrary::new("");
        for id in 0..material_count {
            library.insert(material::read_material(&mut reader, id)?);
        }
        container.libraries.push(library);
    }

    let asset_count = reader.read_u16::<LittleEndian>()?;
    for _ in 0..asset_count {
        container
            .assets
            .push(core::read_asset(&mut reader, material_count)?);
    }

    log::debug!(
        "Read container: {} material(s), {} asset(s)",
        material_count,
        asset_count
    );
    Ok(container)
}

/// Read a u16-length-prefixed UTF-8 string
pub(crate) fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u16::<LittleEndian>()? as usize;
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}

pub(crate) fn read_vector2<R: Read>(reader: &mut R) -> Result<Vector2> {
    Ok(Vector2::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}

pub(crate) fn read_vector3<R: Read>(reader: &mut R) -> Result<Vector3> {
    Ok(Vector3::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}

pub(crate) fn read_color<R: Read>(reader: &mut R) -> Result<Color> {
    Ok(Color::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}
