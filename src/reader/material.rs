//! Material record reading

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{read_color, read_string, read_vector2};
use crate::error::{Error, Result};
use crate::format::{MapAttributes, MaterialAttributes};
use crate::model::{FaceCulling, MapModifier, Material, TextureMap};

const MAP_SLOTS: [MaterialAttributes; 7] = [
    MaterialAttributes::AMBIENT_MAP,
    MaterialAttributes::DIFFUSE_MAP,
    MaterialAttributes::SPECULAR_MAP,
    MaterialAttributes::EMISSIVE_MAP,
    MaterialAttributes::DISSOLVE_MAP,
    MaterialAttributes::BUMP_MAP,
    MaterialAttributes::DISPLACEMENT_MAP,
];

/// Read one material record, assigning it `id`
pub(super) fn read_material<R: Read>(reader: &mut R, id: u16) -> Result<Material> {
    let attributes = MaterialAttributes::from_bits_truncate(reader.read_u32::<LittleEndian>()?);
    let mut material = Material::new(id, read_string(reader)?);

    if attributes.contains(MaterialAttributes::ILLUMINATION_MODEL) {
        material.illumination_model = Some(reader.read_u8()?);
    }
    if attributes.contains(MaterialAttributes::SPECULAR_EXPONENT) {
        material.specular_exponent = Some(reader.read_f32::<LittleEndian>()?);
    }
    if attributes.contains(MaterialAttributes::OPTICAL_DENSITY) {
        material.optical_density = Some(reader.read_f32::<LittleEndian>()?);
    }
    if attributes.contains(MaterialAttributes::DISSOLVE) {
        material.dissolve = Some(reader.read_f32::<LittleEndian>()?);
    }
    if attributes.contains(MaterialAttributes::TRANSMISSION_FILTER) {
        material.transmission_filter = Some(read_color(reader)?);
    }
    if attributes.contains(MaterialAttributes::AMBIENT_REFLECTANCE) {
        material.ambient = Some(read_color(reader)?);
    }
    if attributes.contains(MaterialAttributes::DIFFUSE_REFLECTANCE) {
        material.diffuse = Some(read_color(reader)?);
    }
    if attributes.contains(MaterialAttributes::SPECULAR_REFLECTANCE) {
        material.specular = Some(read_color(reader)?);
    }
    if attributes.contains(MaterialAttributes::EMISSIVE_REFLECTANCE) {
        material.emissive = Some(read_color(reader)?);
    }

    for slot in MAP_SLOTS {
        if attributes.contains(slot) {
            let map = read_map(reader)?;
            if let Some(target) = material.map_slot_mut(slot) {
                *target = Some(map);
            }
        }
    }

    if attributes.contains(MaterialAttributes::FACE_CULLING) {
        let value = reader.read_u8()?;
        let culling = FaceCulling::from_u8(value).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "material '{}': face culling value {} is not in 0-3",
                material.name, value
            ))
        })?;
        material.face_culling = Some(culling);
    }
    if attributes.contains(MaterialAttributes::LIGHTMAP) {
        material.lightmap = Some(read_map(reader)?);
    }
    Ok(material)
}

/// Read a map block
pub(super) fn read_map<R: Read>(reader: &mut R) -> Result<TextureMap> {
    let attributes = MapAttributes::from_bits_truncate(reader.read_u16::<LittleEndian>()?);
    let mut map = TextureMap::default();

    if attributes.contains(MapAttributes::PATH) {
        map.path = Some(read_string(reader)?);
    }
    if attributes.contains(MapAttributes::SCALE) {
        map.scale = Some(read_vector2(reader)?);
    }
    if attributes.contains(MapAttributes::OFFSET) {
        map.offset = Some(read_vector2(reader)?);
    }

    let kind = attributes & MapAttributes::LIGHTMAP_INTENSITY;
    if !kind.is_empty() {
        let value = reader.read_f32::<LittleEndian>()?;
        map.modifier = Some(if kind == MapAttributes::LIGHTMAP_INTENSITY {
            MapModifier::LightmapIntensity(value)
        } else if kind == MapAttributes::BUMP_SCALE {
            MapModifier::BumpScale(value)
        } else {
            MapModifier::DisplacementScale(value)
        });
    }
    Ok(map)
}
