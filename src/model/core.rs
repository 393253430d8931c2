//! Geometry types: vectors, faces, objects, groups, assets and the container

use super::material::{Material, MaterialLibrary};

/// A 3D vector of 32-bit floats (positions and normals)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// Create a new vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A 2D vector of 32-bit floats (texture coordinates, map scale and offset)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    /// X (u) component
    pub x: f32,
    /// Y (v) component
    pub y: f32,
}

impl Vector2 {
    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An RGB color of 32-bit floats
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Create a new color
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color with all three channels set to `value`
    pub fn gray(value: f32) -> Self {
        Self::new(value, value, value)
    }
}

/// A triangle defined by three indices into its object's vertex buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    /// Index of first vertex
    pub v1: u16,
    /// Index of second vertex
    pub v2: u16,
    /// Index of third vertex
    pub v3: u16,
}

impl Face {
    /// Create a new face
    pub fn new(v1: u16, v2: u16, v3: u16) -> Self {
        Self { v1, v2, v3 }
    }

    /// The three indices in winding order
    pub fn indices(&self) -> [u16; 3] {
        [self.v1, self.v2, self.v3]
    }
}

/// A named run of faces sharing one material and smoothing value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Group name from the `g`/`o` directive
    pub name: Option<String>,
    /// Material id, set by a successful `usemtl`
    pub material: Option<u16>,
    /// 0 = flat, 1 = smooth, other values are smoothing-group numbers
    pub smoothing: u8,
    /// Triangles in input order
    pub faces: Vec<Face>,
}

impl Group {
    /// Create a new empty group
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            material: None,
            smoothing: 0,
            faces: Vec::new(),
        }
    }
}

/// An indexed mesh: parallel vertex buffers plus the groups indexing them
///
/// Every non-empty buffer holds exactly [`Object::vertex_count`] entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    /// Vertex positions; their count defines the vertex count
    pub positions: Vec<Vector3>,
    /// Vertex normals (empty or one per vertex)
    pub normals: Vec<Vector3>,
    /// Primary texture coordinates (empty or one per vertex)
    pub uvs: Vec<Vector2>,
    /// Secondary texture coordinates (empty or one per vertex)
    pub uvs2: Vec<Vector2>,
    /// Groups in input order
    pub groups: Vec<Group>,
}

impl Object {
    /// Create a new empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices, defined by the positions buffer
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the object carries any vertex data
    pub fn has_geometry(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Append one vertex and return its index
    ///
    /// Attributes the vertex lacks are zero-filled when the buffer is already
    /// populated; a buffer populated for the first time is back-filled with
    /// zeros for the earlier vertices.
    pub fn push_vertex(
        &mut self,
        position: Vector3,
        normal: Option<Vector3>,
        uv: Option<Vector2>,
        uv2: Option<Vector2>,
    ) -> usize {
        let index = self.positions.len();
        push_attribute(&mut self.normals, index, normal);
        push_attribute(&mut self.uvs, index, uv);
        push_attribute(&mut self.uvs2, index, uv2);
        self.positions.push(position);
        index
    }

    /// Total number of faces across all groups
    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|g| g.faces.len()).sum()
    }
}

fn push_attribute<T: Copy + Default>(buffer: &mut Vec<T>, index: usize, value: Option<T>) {
    match value {
        Some(value) => {
            buffer.resize(index, T::default());
            buffer.push(value);
        }
        None if !buffer.is_empty() => buffer.push(T::default()),
        None => {}
    }
}

/// The objects contributed by one geometry document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Asset {
    /// Asset name, derived from the source document
    pub name: Option<String>,
    /// Objects in input order
    pub objects: Vec<Object>,
}

impl Asset {
    /// Create a new empty asset
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            objects: Vec::new(),
        }
    }
}

/// Everything one conversion run serializes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    /// Material libraries in the order they were first referenced
    pub libraries: Vec<MaterialLibrary>,
    /// Assets in input order
    pub assets: Vec<Asset>,
}

impl Container {
    /// Create a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// All materials in emission order (library order, then id order)
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.libraries.iter().flat_map(|lib| lib.materials.values())
    }

    /// Total number of materials across all libraries
    pub fn material_count(&self) -> usize {
        self.libraries.iter().map(|lib| lib.materials.len()).sum()
    }

    /// Look up a material by id in any library
    pub fn material(&self, id: u16) -> Option<&Material> {
        self.libraries.iter().find_map(|lib| lib.materials.get(&id))
    }
}
