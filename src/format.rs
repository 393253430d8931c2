//! BOM container constants and attribute bitmasks
//!
//! Every optional field of the container is announced by a bit in the
//! attribute mask that precedes it. Bit 0 (`NONE`) is set in every mask
//! that the writer emits and carries no meaning for the reader.

use bitflags::bitflags;

/// File signature, always the first three bytes of a container
pub const SIGNATURE: [u8; 3] = *b"BOM";

/// Container format version written by this crate
pub const VERSION: u8 = 1;

/// Maximum number of distinct vertices one object may hold (16-bit face indices)
pub const MAX_OBJECT_VERTICES: usize = u16::MAX as usize + 1;

bitflags! {
    /// File-level attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileAttributes: u16 {
        const NONE = 1 << 0;
        const MATERIAL_LIBRARY = 1 << 1;
    }
}

bitflags! {
    /// Fields present in a material record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialAttributes: u32 {
        const NONE = 1 << 0;
        const ILLUMINATION_MODEL = 1 << 1;
        const SPECULAR_EXPONENT = 1 << 2;
        const OPTICAL_DENSITY = 1 << 3;
        const DISSOLVE = 1 << 4;
        const TRANSMISSION_FILTER = 1 << 5;
        const AMBIENT_REFLECTANCE = 1 << 6;
        const DIFFUSE_REFLECTANCE = 1 << 7;
        const SPECULAR_REFLECTANCE = 1 << 8;
        const EMISSIVE_REFLECTANCE = 1 << 9;
        const AMBIENT_MAP = 1 << 10;
        const DIFFUSE_MAP = 1 << 11;
        const SPECULAR_MAP = 1 << 12;
        const EMISSIVE_MAP = 1 << 13;
        const DISSOLVE_MAP = 1 << 14;
        const BUMP_MAP = 1 << 15;
        const DISPLACEMENT_MAP = 1 << 16;
        const FACE_CULLING = 1 << 17;
        const LIGHTMAP = 1 << 18;
    }
}

bitflags! {
    /// Fields present in a map block
    ///
    /// Bits 4 and 5 together encode the modifier kind: bump scale (bit 4),
    /// displacement scale (bit 5) or lightmap intensity (both bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapAttributes: u16 {
        const NONE = 1 << 0;
        const PATH = 1 << 1;
        const SCALE = 1 << 2;
        const OFFSET = 1 << 3;
        const BUMP_SCALE = 1 << 4;
        const DISPLACEMENT_SCALE = 1 << 5;
        const LIGHTMAP_INTENSITY = Self::BUMP_SCALE.bits() | Self::DISPLACEMENT_SCALE.bits();
    }
}

bitflags! {
    /// Fields present in an asset record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AssetAttributes: u16 {
        const NONE = 1 << 0;
        const NAME = 1 << 1;
    }
}

bitflags! {
    /// Fields present in an object record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectAttributes: u16 {
        const NONE = 1 << 0;
        const GEOMETRY = 1 << 1;
    }
}

bitflags! {
    /// Optional vertex buffers following the positions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeometryAttributes: u16 {
        const NONE = 1 << 0;
        const NORMAL = 1 << 1;
        const UV = 1 << 2;
        const UV2 = 1 << 3;
    }
}

bitflags! {
    /// Fields present in a group record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GroupAttributes: u16 {
        const NONE = 1 << 0;
        const NAME = 1 << 1;
        const INDEX = 1 << 2;
        const SMOOTHING = 1 << 3;
        const MATERIAL = 1 << 4;
    }
}

impl Default for FileAttributes {
    fn default() -> Self {
        FileAttributes::NONE
    }
}

impl Default for MaterialAttributes {
    fn default() -> Self {
        MaterialAttributes::NONE
    }
}

impl Default for MapAttributes {
    fn default() -> Self {
        MapAttributes::NONE
    }
}
