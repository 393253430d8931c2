//! Validation of a container before it is encoded
//!
//! The container format uses 16-bit counts, lengths and face indices, and
//! group material references are written as positions in the material
//! table. Validation ensures that:
//! - Material, asset, object and group counts fit in 16 bits
//! - Every string fits a 16-bit length prefix
//! - Vertex buffers are parallel and hold at most 65536 vertices
//! - Face indices reference existing vertices
//! - Group materials exist and material ids are unique
//! - Map modifiers match the slot they are stored in

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::format::{MAX_OBJECT_VERTICES, MaterialAttributes};
use crate::model::{Container, MapModifier, Material, Object, TextureMap};

/// Validate a container for encoding
pub fn validate_container(container: &Container) -> Result<()> {
    validate_counts(container)?;
    validate_strings(container)?;
    validate_material_ids(container)?;
    validate_map_modifiers(container)?;
    for (asset_idx, asset) in container.assets.iter().enumerate() {
        for (object_idx, object) in asset.objects.iter().enumerate() {
            validate_object_geometry(asset_idx, object_idx, object)?;
        }
    }
    validate_material_references(container)?;
    Ok(())
}

fn check_count(what: &str, count: usize) -> Result<()> {
    if count > u16::MAX as usize {
        return Err(Error::InvalidModel(format!(
            "{} {} exceed the container limit of {}",
            count,
            what,
            u16::MAX
        )));
    }
    Ok(())
}

/// Validates material, asset, object and group counts
pub fn validate_counts(container: &Container) -> Result<()> {
    check_count("materials", container.material_count())?;
    check_count("assets", container.assets.len())?;
    for asset in &container.assets {
        check_count("objects", asset.objects.len())?;
        for object in &asset.objects {
            check_count("groups", object.groups.len())?;
        }
    }
    Ok(())
}

fn check_string(what: &str, value: &str) -> Result<()> {
    if value.len() > u16::MAX as usize {
        return Err(Error::InvalidModel(format!(
            "{} is {} bytes long, strings are limited to {} bytes",
            what,
            value.len(),
            u16::MAX
        )));
    }
    Ok(())
}

/// Validates that every string fits a 16-bit length prefix
pub fn validate_strings(container: &Container) -> Result<()> {
    for material in container.materials() {
        check_string("Material name", &material.name)?;
        for (_, map) in material.maps() {
            if let Some(path) = map.and_then(|m| m.path.as_deref()) {
                check_string("Texture path", path)?;
            }
        }
        if let Some(path) = material.lightmap.as_ref().and_then(|m| m.path.as_deref()) {
            check_string("Lightmap path", path)?;
        }
    }
    for asset in &container.assets {
        if let Some(ref name) = asset.name {
            check_string("Asset name", name)?;
        }
        for object in &asset.objects {
            for group in &object.groups {
                if let Some(ref name) = group.name {
                    check_string("Group name", name)?;
                }
            }
        }
    }
    Ok(())
}

/// Validates the vertex buffers and face indices of one object
pub fn validate_object_geometry(asset_idx: usize, object_idx: usize, object: &Object) -> Result<()> {
    let vertex_count = object.vertex_count();
    if vertex_count > MAX_OBJECT_VERTICES {
        return Err(Error::InvalidModel(format!(
            "Asset {} object {}: {} vertices exceed the limit of {} per object. \
             Split the geometry into more objects.",
            asset_idx, object_idx, vertex_count, MAX_OBJECT_VERTICES
        )));
    }

    for (name, len) in [
        ("normal", object.normals.len()),
        ("uv", object.uvs.len()),
        ("uv2", object.uvs2.len()),
    ] {
        if len != 0 && len != vertex_count {
            return Err(Error::InvalidModel(format!(
                "Asset {} object {}: {} buffer holds {} entries but the object has {} vertices. \
                 Optional vertex buffers must be empty or hold one entry per vertex.",
                asset_idx, object_idx, name, len, vertex_count
            )));
        }
    }

    for (group_idx, group) in object.groups.iter().enumerate() {
        for (face_idx, face) in group.faces.iter().enumerate() {
            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(Error::InvalidModel(format!(
                    "Asset {} object {} group {}: face {} references vertex {} \
                     but the object has {} vertices",
                    asset_idx, object_idx, group_idx, face_idx, index, vertex_count
                )));
            }
        }
    }
    Ok(())
}

/// Validates that material ids are unique across libraries
pub fn validate_material_ids(container: &Container) -> Result<()> {
    let mut seen = HashSet::new();
    for material in container.materials() {
        if !seen.insert(material.id) {
            return Err(Error::InvalidModel(format!(
                "Material id {} ('{}') is defined more than once",
                material.id, material.name
            )));
        }
    }
    Ok(())
}

/// Validates that every group material refers to a material in the container
pub fn validate_material_references(container: &Container) -> Result<()> {
    let ids: HashSet<u16> = container.materials().map(|m| m.id).collect();
    for (asset_idx, asset) in container.assets.iter().enumerate() {
        for object in &asset.objects {
            for group in &object.groups {
                if let Some(id) = group.material {
                    if !ids.contains(&id) {
                        return Err(Error::InvalidModel(format!(
                            "Asset {}: group {} references material {} which is not in the container",
                            asset_idx,
                            group.name.as_deref().unwrap_or("<unnamed>"),
                            id
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

fn modifier_allowed(slot: MaterialAttributes, modifier: &MapModifier) -> bool {
    match modifier {
        MapModifier::BumpScale(_) => slot == MaterialAttributes::BUMP_MAP,
        MapModifier::DisplacementScale(_) => slot == MaterialAttributes::DISPLACEMENT_MAP,
        MapModifier::LightmapIntensity(_) => slot == MaterialAttributes::LIGHTMAP,
    }
}

fn map_slots(material: &Material) -> impl Iterator<Item = (MaterialAttributes, &TextureMap)> {
    material
        .maps()
        .into_iter()
        .chain(std::iter::once((
            MaterialAttributes::LIGHTMAP,
            material.lightmap.as_ref(),
        )))
        .filter_map(|(slot, map)| map.map(|m| (slot, m)))
}

/// Validates that map modifiers match their slot
pub fn validate_map_modifiers(container: &Container) -> Result<()> {
    for material in container.materials() {
        for (slot, map) in map_slots(material) {
            if let Some(ref modifier) = map.modifier {
                if !modifier_allowed(slot, modifier) {
                    return Err(Error::InvalidModel(format!(
                        "Material '{}': {:?} is not valid on the {:?} slot",
                        material.name, modifier, slot
                    )));
                }
            }
        }
    }
    Ok(())
}
