//! Asset, object and group reading

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{read_string, read_vector2, read_vector3};
use crate::error::{Error, Result};
use crate::format::{
    AssetAttributes, GeometryAttributes, GroupAttributes, MAX_OBJECT_VERTICES, ObjectAttributes,
};
use crate::model::{Asset, Face, Group, Object};

/// Read an asset with all its objects
pub(super) fn read_asset<R: Read>(reader: &mut R, material_count: u16) -> Result<Asset> {
    let attributes = AssetAttributes::from_bits_truncate(reader.read_u16::<LittleEndian>()?);
    let name = if attributes.contains(AssetAttributes::NAME) {
        Some(read_string(reader)?)
    } else {
        None
    };

    let mut asset = Asset::new(name);
    let object_count = reader.read_u16::<LittleEndian>()?;
    for _ in 0..object_count {
        asset.objects.push(read_object(reader, material_count)?);
    }
    Ok(asset)
}

/// Read an object and its groups
pub(super) fn read_object<R: Read>(reader: &mut R, material_count: u16) -> Result<Object> {
    let attributes = ObjectAttributes::from_bits_truncate(reader.read_u16::<LittleEndian>()?);
    let mut object = Object::new();
    let has_geometry = attributes.contains(ObjectAttributes::GEOMETRY);

    if has_geometry {
        let geometry = GeometryAttributes::from_bits_truncate(reader.read_u16::<LittleEndian>()?);
        let vertex_count = reader.read_u32::<LittleEndian>()? as usize;
        if vertex_count > MAX_OBJECT_VERTICES {
            return Err(Error::InvalidFormat(format!(
                "object declares {} vertices, the limit is {}",
                vertex_count, MAX_OBJECT_VERTICES
            )));
        }

        object.positions = (0..vertex_count)
            .map(|_| read_vector3(reader))
            .collect::<Result<_>>()?;
        if geometry.contains(GeometryAttributes::NORMAL) {
            object.normals = (0..vertex_count)
                .map(|_| read_vector3(reader))
                .collect::<Result<_>>()?;
        }
        if geometry.contains(GeometryAttributes::UV) {
            object.uvs = (0..vertex_count)
                .map(|_| read_vector2(reader))
                .collect::<Result<_>>()?;
        }
        if geometry.contains(GeometryAttributes::UV2) {
            object.uvs2 = (0..vertex_count)
                .map(|_| read_vector2(reader))
                .collect::<Result<_>>()?;
        }
    }

    let group_count = reader.read_u16::<LittleEndian>()?;
    for _ in 0..group_count {
        let group = read_group(reader, has_geometry, object.vertex_count(), material_count)?;
        object.groups.push(group);
    }
    Ok(object)
}

/// Read a group record
pub(super) fn read_group<R: Read>(
    reader: &mut R,
    has_geometry: bool,
    vertex_count: usize,
    material_count: u16,
) -> Result<Group> {
    let attributes = GroupAttributes::from_bits_truncate(reader.read_u16::<LittleEndian>()?);
    let name = if attributes.contains(GroupAttributes::NAME) {
        Some(read_string(reader)?)
    } else {
        None
    };
    let mut group = Group::new(name);
    if !has_geometry {
        return Ok(group);
    }

    if attributes.contains(GroupAttributes::INDEX) {
        let index_count = reader.read_u32::<LittleEndian>()? as usize;
        if index_count % 3 != 0 {
            return Err(Error::InvalidFormat(format!(
                "group index count {} is not a multiple of 3",
                index_count
            )));
        }
        for _ in 0..index_count / 3 {
            let mut indices = [0u16; 3];
            for index in &mut indices {
                *index = reader.read_u16::<LittleEndian>()?;
                if *index as usize >= vertex_count {
                    return Err(Error::InvalidFormat(format!(
                        "face index {} is outside the object's {} vertices",
                        index, vertex_count
                    )));
                }
            }
            group.faces.push(Face::new(indices[0], indices[1], indices[2]));
        }
    }
    if attributes.contains(GroupAttributes::SMOOTHING) {
        group.smoothing = reader.read_u8()?;
    }
    if attributes.contains(GroupAttributes::MATERIAL) {
        let material = reader.read_u16::<LittleEndian>()?;
        if material >= material_count {
            return Err(Error::InvalidFormat(format!(
                "group references material {} but the container has {}",
                material, material_count
            )));
        }
        group.material = Some(material);
    }
    Ok(group)
}
