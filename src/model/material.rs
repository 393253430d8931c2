//! Material types: texture maps, materials and material libraries

use std::collections::BTreeMap;

use super::core::{Color, Vector2};
use crate::format::{MapAttributes, MaterialAttributes};

/// The one numeric modifier a texture map may carry
///
/// Which variant is valid depends on the map slot: bump maps carry a bump
/// scale, displacement maps a displacement scale and the lightmap an
/// intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapModifier {
    /// Bump depth multiplier (`-bm`)
    BumpScale(f32),
    /// Displacement scale (third value of `-s` on `disp`)
    DisplacementScale(f32),
    /// Lightmap intensity (`-intensity`)
    LightmapIntensity(f32),
}

impl MapModifier {
    /// The modifier value regardless of kind
    pub fn value(&self) -> f32 {
        match *self {
            MapModifier::BumpScale(v)
            | MapModifier::DisplacementScale(v)
            | MapModifier::LightmapIntensity(v) => v,
        }
    }

    /// The map attribute bits announcing this modifier kind
    pub fn attribute(&self) -> MapAttributes {
        match self {
            MapModifier::BumpScale(_) => MapAttributes::BUMP_SCALE,
            MapModifier::DisplacementScale(_) => MapAttributes::DISPLACEMENT_SCALE,
            MapModifier::LightmapIntensity(_) => MapAttributes::LIGHTMAP_INTENSITY,
        }
    }
}

/// A texture reference with its placement options
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureMap {
    /// Texture file path as written in the library
    pub path: Option<String>,
    /// Texture scale (`-s u v`)
    pub scale: Option<Vector2>,
    /// Texture offset (`-o u v`)
    pub offset: Option<Vector2>,
    /// Slot-specific modifier
    pub modifier: Option<MapModifier>,
}

impl TextureMap {
    /// Create a map referencing `path` with no options
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Attribute mask describing which fields are populated
    pub fn attributes(&self) -> MapAttributes {
        let mut attrs = MapAttributes::NONE;
        attrs.set(
            MapAttributes::PATH,
            self.path.as_ref().is_some_and(|p| !p.is_empty()),
        );
        attrs.set(MapAttributes::SCALE, self.scale.is_some());
        attrs.set(MapAttributes::OFFSET, self.offset.is_some());
        if let Some(modifier) = self.modifier {
            attrs |= modifier.attribute();
        }
        attrs
    }
}

/// Which faces a renderer should cull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceCulling {
    /// Render both sides
    None = 0,
    /// Cull front faces
    Front = 1,
    /// Cull back faces
    Back = 2,
    /// Cull everything
    All = 3,
}

impl FaceCulling {
    /// Parse the keyword used by the `cull-face` extension
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(FaceCulling::None),
            "front" => Some(FaceCulling::Front),
            "back" => Some(FaceCulling::Back),
            "all" => Some(FaceCulling::All),
            _ => None,
        }
    }

    /// Decode the wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(FaceCulling::None),
            1 => Some(FaceCulling::Front),
            2 => Some(FaceCulling::Back),
            3 => Some(FaceCulling::All),
            _ => None,
        }
    }
}

/// A surface material
///
/// Every optional property is `None` until a directive sets it; the
/// attribute mask written to the container is derived from that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Run-wide unique id
    pub id: u16,
    /// Material name from `newmtl`
    pub name: String,
    /// Illumination model (`illum`)
    pub illumination_model: Option<u8>,
    /// Specular exponent (`Ns`)
    pub specular_exponent: Option<f32>,
    /// Optical density / index of refraction (`Ni`)
    pub optical_density: Option<f32>,
    /// Dissolve / opacity (`d`, or `1 - Tr`)
    pub dissolve: Option<f32>,
    /// Transmission filter (`Tf`)
    pub transmission_filter: Option<Color>,
    /// Ambient reflectance (`Ka`)
    pub ambient: Option<Color>,
    /// Diffuse reflectance (`Kd`)
    pub diffuse: Option<Color>,
    /// Specular reflectance (`Ks`)
    pub specular: Option<Color>,
    /// Emissive reflectance (`Ke`)
    pub emissive: Option<Color>,
    /// `map_Ka`
    pub ambient_map: Option<TextureMap>,
    /// `map_Kd`
    pub diffuse_map: Option<TextureMap>,
    /// `map_Ks`
    pub specular_map: Option<TextureMap>,
    /// `map_Ke`
    pub emissive_map: Option<TextureMap>,
    /// `map_d`
    pub dissolve_map: Option<TextureMap>,
    /// `map_bump` / `bump`
    pub bump_map: Option<TextureMap>,
    /// `disp`
    pub displacement_map: Option<TextureMap>,
    /// Face culling mode (`# :EXT: cull-face`)
    pub face_culling: Option<FaceCulling>,
    /// Lightmap (`# :EXT: lightmap`)
    pub lightmap: Option<TextureMap>,
}

impl Material {
    /// Create a new material with no properties set
    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attribute mask describing which properties are populated
    pub fn attributes(&self) -> MaterialAttributes {
        let mut attrs = MaterialAttributes::NONE;
        attrs.set(
            MaterialAttributes::ILLUMINATION_MODEL,
            self.illumination_model.is_some(),
        );
        attrs.set(
            MaterialAttributes::SPECULAR_EXPONENT,
            self.specular_exponent.is_some(),
        );
        attrs.set(
            MaterialAttributes::OPTICAL_DENSITY,
            self.optical_density.is_some(),
        );
        attrs.set(MaterialAttributes::DISSOLVE, self.dissolve.is_some());
        attrs.set(
            MaterialAttributes::TRANSMISSION_FILTER,
            self.transmission_filter.is_some(),
        );
        attrs.set(MaterialAttributes::AMBIENT_REFLECTANCE, self.ambient.is_some());
        attrs.set(MaterialAttributes::DIFFUSE_REFLECTANCE, self.diffuse.is_some());
        attrs.set(MaterialAttributes::SPECULAR_REFLECTANCE, self.specular.is_some());
        attrs.set(MaterialAttributes::EMISSIVE_REFLECTANCE, self.emissive.is_some());
        attrs.set(MaterialAttributes::AMBIENT_MAP, self.ambient_map.is_some());
        attrs.set(MaterialAttributes::DIFFUSE_MAP, self.diffuse_map.is_some());
        attrs.set(MaterialAttributes::SPECULAR_MAP, self.specular_map.is_some());
        attrs.set(MaterialAttributes::EMISSIVE_MAP, self.emissive_map.is_some());
        attrs.set(MaterialAttributes::DISSOLVE_MAP, self.dissolve_map.is_some());
        attrs.set(MaterialAttributes::BUMP_MAP, self.bump_map.is_some());
        attrs.set(
            MaterialAttributes::DISPLACEMENT_MAP,
            self.displacement_map.is_some(),
        );
        attrs.set(MaterialAttributes::FACE_CULLING, self.face_culling.is_some());
        attrs.set(MaterialAttributes::LIGHTMAP, self.lightmap.is_some());
        attrs
    }

    /// The seven standard map slots in wire order, with their attribute bit
    pub fn maps(&self) -> [(MaterialAttributes, Option<&TextureMap>); 7] {
        [
            (MaterialAttributes::AMBIENT_MAP, self.ambient_map.as_ref()),
            (MaterialAttributes::DIFFUSE_MAP, self.diffuse_map.as_ref()),
            (MaterialAttributes::SPECULAR_MAP, self.specular_map.as_ref()),
            (MaterialAttributes::EMISSIVE_MAP, self.emissive_map.as_ref()),
            (MaterialAttributes::DISSOLVE_MAP, self.dissolve_map.as_ref()),
            (MaterialAttributes::BUMP_MAP, self.bump_map.as_ref()),
            (
                MaterialAttributes::DISPLACEMENT_MAP,
                self.displacement_map.as_ref(),
            ),
        ]
    }

    /// Mutable access to a standard map slot by its attribute bit
    pub fn map_slot_mut(&mut self, slot: MaterialAttributes) -> Option<&mut Option<TextureMap>> {
        if slot == MaterialAttributes::AMBIENT_MAP {
            Some(&mut self.ambient_map)
        } else if slot == MaterialAttributes::DIFFUSE_MAP {
            Some(&mut self.diffuse_map)
        } else if slot == MaterialAttributes::SPECULAR_MAP {
            Some(&mut self.specular_map)
        } else if slot == MaterialAttributes::EMISSIVE_MAP {
            Some(&mut self.emissive_map)
        } else if slot == MaterialAttributes::DISSOLVE_MAP {
            Some(&mut self.dissolve_map)
        } else if slot == MaterialAttributes::BUMP_MAP {
            Some(&mut self.bump_map)
        } else if slot == MaterialAttributes::DISPLACEMENT_MAP {
            Some(&mut self.displacement_map)
        } else if slot == MaterialAttributes::LIGHTMAP {
            Some(&mut self.lightmap)
        } else {
            None
        }
    }
}

/// The materials defined by one library document, keyed by id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialLibrary {
    /// Library name (the `mtllib` reference)
    pub name: String,
    /// Materials ordered by id
    pub materials: BTreeMap<u16, Material>,
}

impl MaterialLibrary {
    /// Create a new empty library
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: BTreeMap::new(),
        }
    }

    /// Insert a material under its id
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.id, material);
    }

    /// Find a material by name
    pub fn find_by_name(&self, name: &str) -> Option<&Material> {
        self.materials.values().find(|m| m.name == name)
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library holds no materials
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_material_has_only_none_bit() {
        let material = Material::new(0, "empty");
        assert_eq!(material.attributes(), MaterialAttributes::NONE);
    }

    #[test]
    fn test_material_attributes_follow_fields() {
        let mut material = Material::new(1, "lit");
        material.diffuse = Some(Color::gray(0.8));
        material.bump_map = Some(TextureMap::new("bump.png"));
        material.face_culling = Some(FaceCulling::Back);

        let attrs = material.attributes();
        assert!(attrs.contains(MaterialAttributes::DIFFUSE_REFLECTANCE));
        assert!(attrs.contains(MaterialAttributes::BUMP_MAP));
        assert!(attrs.contains(MaterialAttributes::FACE_CULLING));
        assert!(!attrs.contains(MaterialAttributes::AMBIENT_REFLECTANCE));
        assert!(!attrs.contains(MaterialAttributes::LIGHTMAP));
    }

    #[test]
    fn test_map_attributes() {
        let mut map = TextureMap::new("disp.png");
        map.scale = Some(Vector2::new(2.0, 2.0));
        map.modifier = Some(MapModifier::DisplacementScale(0.5));

        let attrs = map.attributes();
        assert!(attrs.contains(MapAttributes::PATH | MapAttributes::SCALE));
        assert!(!attrs.contains(MapAttributes::OFFSET));
        assert!(attrs.contains(MapAttributes::DISPLACEMENT_SCALE));
        assert!(!attrs.contains(MapAttributes::BUMP_SCALE));
    }

    #[test]
    fn test_empty_path_is_not_announced() {
        let map = TextureMap {
            path: Some(String::new()),
            ..TextureMap::default()
        };
        assert!(!map.attributes().contains(MapAttributes::PATH));
    }

    #[test]
    fn test_face_culling_keywords() {
        assert_eq!(FaceCulling::from_keyword("back"), Some(FaceCulling::Back));
        assert_eq!(FaceCulling::from_keyword("sideways"), None);
        assert_eq!(FaceCulling::from_u8(3), Some(FaceCulling::All));
        assert_eq!(FaceCulling::from_u8(4), None);
    }

    #[test]
    fn test_library_lookup_by_name() {
        let mut library = MaterialLibrary::new("scene.mtl");
        library.insert(Material::new(7, "glass"));
        library.insert(Material::new(3, "wood"));

        assert_eq!(library.find_by_name("glass").map(|m| m.id), Some(7));
        assert!(library.find_by_name("steel").is_none());
        let ids: Vec<u16> = library.materials.keys().copied().collect();
        assert_eq!(ids, vec![3, 7]);
    }
}
