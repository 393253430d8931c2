//! Material record writing

use std::io::Write as IoWrite;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{write_color, write_string, write_vector2};
use crate::error::Result;
use crate::model::{Material, TextureMap};

/// Write one material record
///
/// Optional fields follow the attribute mask in bit order.
pub(super) fn write_material<W: IoWrite>(writer: &mut W, material: &Material) -> Result<()> {
    writer.write_u32::<LittleEndian>(material.attributes().bits())?;
    write_string(writer, &material.name)?;

    if let Some(model) = material.illumination_model {
        writer.write_u8(model)?;
    }
    for value in [
        material.specular_exponent,
        material.optical_density,
        material.dissolve,
    ]
    .into_iter()
    .flatten()
    {
        writer.write_f32::<LittleEndian>(value)?;
    }
    for color in [
        &material.transmission_filter,
        &material.ambient,
        &material.diffuse,
        &material.specular,
        &material.emissive,
    ]
    .into_iter()
    .flatten()
    {
        write_color(writer, color)?;
    }
    for (_, map) in material.maps() {
        if let Some(map) = map {
            write_map(writer, map)?;
        }
    }
    if let Some(culling) = material.face_culling {
        writer.write_u8(culling as u8)?;
    }
    if let Some(ref lightmap) = material.lightmap {
        write_map(writer, lightmap)?;
    }
    Ok(())
}

/// Write a map block
pub(super) fn write_map<W: IoWrite>(writer: &mut W, map: &TextureMap) -> Result<()> {
    writer.write_u16::<LittleEndian>(map.attributes().bits())?;

    if let Some(path) = map.path.as_deref().filter(|p| !p.is_empty()) {
        write_string(writer, path)?;
    }
    if let Some(ref scale) = map.scale {
        write_vector2(writer, scale)?;
    }
    if let Some(ref offset) = map.offset {
        write_vector2(writer, offset)?;
    }
    if let Some(modifier) = map.modifier {
        writer.write_f32::<LittleEndian>(modifier.value())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, FaceCulling, MapModifier, Vector2};

    #[test]
    fn test_field_order() {
        let mut material = Material::new(0, "m");
        material.illumination_model = Some(2);
        material.dissolve = Some(0.5);
        material.diffuse = Some(Color::new(1.0, 0.0, 0.0));
        material.face_culling = Some(FaceCulling::Back);

        let mut bytes = Vec::new();
        write_material(&mut bytes, &material).unwrap();

        let attrs = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(attrs, 1 | 1 << 1 | 1 << 4 | 1 << 7 | 1 << 17);
        assert_eq!(&bytes[4..7], &[0x01, 0x00, b'm']);
        assert_eq!(bytes[7], 2);
        assert_eq!(&bytes[8..12], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
        assert_eq!(bytes.len(), 8 + 4 + 12 + 1);
        assert_eq!(bytes[24], FaceCulling::Back as u8);
    }

    #[test]
    fn test_map_block() {
        let mut map = TextureMap::new("b.png");
        map.offset = Some(Vector2::new(0.25, 0.5));
        map.modifier = Some(MapModifier::BumpScale(2.0));

        let mut bytes = Vec::new();
        write_map(&mut bytes, &map).unwrap();

        assert_eq!(&bytes[0..2], &[0b0001_1011, 0x00]);
        assert_eq!(&bytes[2..4], &[0x05, 0x00]);
        assert_eq!(&bytes[4..9], b"b.png");
        assert_eq!(&bytes[9..13], &0.25f32.to_le_bytes());
        assert_eq!(&bytes[13..17], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[17..21], &2.0f32.to_le_bytes());
        assert_eq!(bytes.len(), 21);
    }

    #[test]
    fn test_map_without_path() {
        let map = TextureMap::default();
        let mut bytes = Vec::new();
        write_map(&mut bytes, &map).unwrap();
        assert_eq!(bytes, vec![0x01, 0x00]);
    }
}
