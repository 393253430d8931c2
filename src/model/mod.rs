//! Data structures shared by the parsers and the container codec

mod core;
mod material;

pub use core::{Asset, Color, Container, Face, Group, Object, Vector2, Vector3};

pub use material::{FaceCulling, MapModifier, Material, MaterialLibrary, TextureMap};
