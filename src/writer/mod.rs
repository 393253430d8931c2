//! Binary writing for BOM containers
//!
//! This module serializes a [`Container`] into the BOM layout: signature,
//! version and file attributes, the material table, then every asset with
//! its objects and groups. All multi-byte values are little-endian and
//! strings carry a 16-bit byte length.

mod core;
mod material;

use std::collections::HashMap;
use std::io::Write as IoWrite;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::format::{FileAttributes, SIGNATURE, VERSION};
use crate::model::{Color, Container, Vector2, Vector3};
use crate::validator::validate_container;

/// Material id to position in the material table
pub(crate) type MaterialOrdinals = HashMap<u16, u16>;

/// Write a container in BOM format
///
/// The container is validated first; nothing is written if validation
/// fails. Group material ids are written as positions in the material
/// table, so a decoded container numbers its materials `0..n`.
pub fn write_container<W: IoWrite>(container: &Container, mut writer: W) -> Result<()> {
    validate_container(container)?;

    writer.write_all(&SIGNATURE)?;
    writer.write_u8(VERSION)?;

    let material_count = container.material_count();
    let mut attributes = FileAttributes::NONE;
    attributes.set(FileAttributes::MATERIAL_LIBRARY, material_count > 0);
    writer.write_u16::<LittleEndian>(attributes.bits())?;

    if attributes.contains(FileAttributes::MATERIAL_LIBRARY) {
        writer.write_u16::<LittleEndian>(to_u16(material_count, "materials")?)?;
        for material in container.materials() {
            material::write_material(&mut writer, material)?;
        }
    }

    let ordinals = material_ordinals(container)?;
    writer.write_u16::<LittleEndian>(to_u16(container.assets.len(), "assets")?)?;
    for asset in &container.assets {
        core::write_asset(&mut writer, asset, &ordinals)?;
    }

    writer.flush()?;
    log::debug!(
        "Wrote container: {} material(s), {} asset(s)",
        material_count,
        container.assets.len()
    );
    Ok(())
}

fn material_ordinals(container: &Container) -> Result<MaterialOrdinals> {
    container
        .materials()
        .enumerate()
        .map(|(ordinal, material)| Ok((material.id, to_u16(ordinal, "materials")?)))
        .collect()
}

/// Narrow a count or length to the 16 bits the format allows
pub(crate) fn to_u16(value: usize, what: &str) -> Result<u16> {
    u16::try_from(value).map_err(|_| {
        Error::InvalidModel(format!(
            "{} {} exceed the container limit of {}",
            value,
            what,
            u16::MAX
        ))
    })
}

/// Narrow a count to the 32 bits the format allows
pub(crate) fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        Error::InvalidModel(format!("{} {} exceed the container limit", value, what))
    })
}

/// Write a u16-length-prefixed string
pub(crate) fn write_string<W: IoWrite>(writer: &mut W, value: &str) -> Result<()> {
    writer.write_u16::<LittleEndian>(to_u16(value.len(), "string bytes")?)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

pub(crate) fn write_vector2<W: IoWrite>(writer: &mut W, v: &Vector2) -> Result<()> {
    writer.write_f32::<LittleEndian>(v.x)?;
    writer.write_f32::<LittleEndian>(v.y)?;
    Ok(())
}

pub(crate) fn write_vector3<W: IoWrite>(writer: &mut W, v: &Vector3) -> Result<()> {
    writer.write_f32::<LittleEndian>(v.x)?;
    writer.write_f32::<LittleEndian>(v.y)?;
    writer.write_f32::<LittleEndian>(v.z)?;
    Ok(())
}

pub(crate) fn write_color<W: IoWrite>(writer: &mut W, c: &Color) -> Result<()> {
    writer.write_f32::<LittleEndian>(c.r)?;
    writer.write_f32::<LittleEndian>(c.g)?;
    writer.write_f32::<LittleEndian>(c.b)?;
    Ok(())
}
