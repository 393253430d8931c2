//! Asset, object and group writing

use std::io::Write as IoWrite;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{MaterialOrdinals, to_u16, to_u32, write_string, write_vector2, write_vector3};
use crate::error::{Error, Result};
use crate::format::{AssetAttributes, GeometryAttributes, GroupAttributes, ObjectAttributes};
use crate::model::{Asset, Group, Object};

/// Write an asset with all its objects
pub(super) fn write_asset<W: IoWrite>(
    writer: &mut W,
    asset: &Asset,
    ordinals: &MaterialOrdinals,
) -> Result<()> {
    let mut attributes = AssetAttributes::NONE;
    attributes.set(AssetAttributes::NAME, asset.name.is_some());
    writer.write_u16::<LittleEndian>(attributes.bits())?;
    if let Some(ref name) = asset.name {
        write_string(writer, name)?;
    }

    writer.write_u16::<LittleEndian>(to_u16(asset.objects.len(), "objects")?)?;
    for object in &asset.objects {
        write_object(writer, object, ordinals)?;
    }
    Ok(())
}

/// Write an object: optional vertex buffers, then its groups
pub(super) fn write_object<W: IoWrite>(
    writer: &mut W,
    object: &Object,
    ordinals: &MaterialOrdinals,
) -> Result<()> {
    let has_geometry = object.has_geometry();
    let mut attributes = ObjectAttributes::NONE;
    attributes.set(ObjectAttributes::GEOMETRY, has_geometry);
    writer.write_u16::<LittleEndian>(attributes.bits())?;

    if has_geometry {
        write_geometry(writer, object)?;
    }

    writer.write_u16::<LittleEndian>(to_u16(object.groups.len(), "groups")?)?;
    for group in &object.groups {
        write_group(writer, group, has_geometry, ordinals)?;
    }
    Ok(())
}

fn write_geometry<W: IoWrite>(writer: &mut W, object: &Object) -> Result<()> {
    let mut attributes = GeometryAttributes::NONE;
    attributes.set(GeometryAttributes::NORMAL, !object.normals.is_empty());
    attributes.set(GeometryAttributes::UV, !object.uvs.is_empty());
    attributes.set(GeometryAttributes::UV2, !object.uvs2.is_empty());
    writer.write_u16::<LittleEndian>(attributes.bits())?;

    writer.write_u32::<LittleEndian>(to_u32(object.vertex_count(), "vertices")?)?;
    for position in &object.positions {
        write_vector3(writer, position)?;
    }
    for normal in &object.normals {
        write_vector3(writer, normal)?;
    }
    for uv in object.uvs.iter().chain(&object.uvs2) {
        write_vector2(writer, uv)?;
    }
    Ok(())
}

/// Write a group record
///
/// Index data, smoothing and material only exist for objects with geometry.
pub(super) fn write_group<W: IoWrite>(
    writer: &mut W,
    group: &Group,
    has_geometry: bool,
    ordinals: &MaterialOrdinals,
) -> Result<()> {
    let mut attributes = GroupAttributes::NONE;
    attributes.set(GroupAttributes::NAME, group.name.is_some());
    if has_geometry {
        attributes.set(GroupAttributes::INDEX, !group.faces.is_empty());
        attributes.insert(GroupAttributes::SMOOTHING);
        attributes.set(GroupAttributes::MATERIAL, group.material.is_some());
    }
    writer.write_u16::<LittleEndian>(attributes.bits())?;

    if let Some(ref name) = group.name {
        write_string(writer, name)?;
    }
    if !has_geometry {
        return Ok(());
    }

    if attributes.contains(GroupAttributes::INDEX) {
        writer.write_u32::<LittleEndian>(to_u32(group.faces.len() * 3, "indices")?)?;
        for face in &group.faces {
            for index in face.indices() {
                writer.write_u16::<LittleEndian>(index)?;
            }
        }
    }
    writer.write_u8(group.smoothing)?;
    if let Some(id) = group.material {
        let ordinal = ordinals.get(&id).copied().ok_or_else(|| {
            Error::InvalidModel(format!("group references unknown material {}", id))
        })?;
        writer.write_u16::<LittleEndian>(ordinal)?;
    }
    Ok(())
}
