//! Material library parsing
//!
//! A library document is a sequence of `newmtl` blocks. Properties apply to
//! the most recent material; properties written before the first `newmtl`
//! apply to a pending material that becomes the first record (or the
//! `default` material when the document defines none).

use std::fmt;
use std::io::BufRead;

use super::{ParseContext, parse_f32, parse_number, required_name, split_directive};
use crate::error::{Error, Result};
use crate::format::MaterialAttributes;
use crate::model::{Color, FaceCulling, MapModifier, Material, MaterialLibrary, TextureMap, Vector2};

/// Name given to the material of a library that defines none
pub const DEFAULT_MATERIAL_NAME: &str = "default";

/// Parse a material library document
///
/// Ids are drawn from `context`. A malformed directive stops the document;
/// the error is logged and the materials read up to that point are kept.
/// The only error returned is running out of material ids before the
/// first material could be allocated.
pub fn parse_material_library<R: BufRead>(
    name: &str,
    reader: R,
    context: &mut ParseContext,
) -> Result<MaterialLibrary> {
    let pending_id = context.allocate_material_id()?;
    let mut builder = LibraryBuilder::new(name, pending_id);

    for (index, line) in reader.lines().enumerate() {
        builder.line = index + 1;
        let result = line
            .map_err(Error::from)
            .and_then(|line| builder.apply(&line, context));
        if let Err(err) = result {
            log::error!(
                "Stopped reading material library: {}",
                err.at(name, builder.line)
            );
            break;
        }
    }

    let library = builder.finish();
    log::debug!(
        "Material library '{}': {} material(s)",
        library.name,
        library.len()
    );
    Ok(library)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapKind {
    Standard,
    Bump,
    Displacement,
    Lightmap,
}

impl MapKind {
    fn for_slot(slot: MaterialAttributes) -> Self {
        if slot == MaterialAttributes::BUMP_MAP {
            MapKind::Bump
        } else if slot == MaterialAttributes::DISPLACEMENT_MAP {
            MapKind::Displacement
        } else if slot == MaterialAttributes::LIGHTMAP {
            MapKind::Lightmap
        } else {
            MapKind::Standard
        }
    }
}

struct LibraryBuilder<'a> {
    document: &'a str,
    line: usize,
    pending: Material,
    materials: Vec<Material>,
    explicit_dissolve: bool,
}

impl<'a> LibraryBuilder<'a> {
    fn new(document: &'a str, pending_id: u16) -> Self {
        Self {
            document,
            line: 0,
            pending: Material::new(pending_id, ""),
            materials: Vec::new(),
            explicit_dissolve: false,
        }
    }

    fn warn(&self, message: fmt::Arguments<'_>) {
        log::warn!("{}:{}: {}", self.document, self.line, message);
    }

    fn current(&mut self) -> &mut Material {
        match self.materials.last_mut() {
            Some(material) => material,
            None => &mut self.pending,
        }
    }

    fn apply(&mut self, line: &str, context: &mut ParseContext) -> Result<()> {
        let Some((keyword, args)) = split_directive(line) else {
            return Ok(());
        };

        match keyword {
            "newmtl" => {
                let name = required_name(keyword, &args)?;
                if self.materials.is_empty() {
                    let mut first = std::mem::take(&mut self.pending);
                    first.name = name.to_string();
                    self.materials.push(first);
                } else {
                    let id = context.allocate_material_id()?;
                    self.materials.push(Material::new(id, name));
                    self.explicit_dissolve = false;
                }
            }
            "illum" => {
                let model = parse_number(keyword, args.first(), "illumination model (0-255)")?;
                self.current().illumination_model = Some(model);
            }
            "Ns" => self.current().specular_exponent = Some(parse_f32(keyword, args.first())?),
            "Ni" => self.current().optical_density = Some(parse_f32(keyword, args.first())?),
            "d" => {
                self.current().dissolve = Some(parse_f32(keyword, args.first())?);
                self.explicit_dissolve = true;
            }
            "Tr" => {
                let transparency = parse_f32(keyword, args.first())?;
                if self.explicit_dissolve {
                    self.warn(format_args!("ignoring 'Tr', dissolve already set with 'd'"));
                } else {
                    self.current().dissolve = Some(1.0 - transparency);
                }
            }
            "Tf" => self.current().transmission_filter = Some(parse_color(keyword, &args)?),
            "Ka" => self.current().ambient = Some(parse_color(keyword, &args)?),
            "Kd" => self.current().diffuse = Some(parse_color(keyword, &args)?),
            "Ks" => self.current().specular = Some(parse_color(keyword, &args)?),
            "Ke" => self.current().emissive = Some(parse_color(keyword, &args)?),
            "map_Ka" => self.set_map(MaterialAttributes::AMBIENT_MAP, keyword, &args)?,
            "map_Kd" => self.set_map(MaterialAttributes::DIFFUSE_MAP, keyword, &args)?,
            "map_Ks" => self.set_map(MaterialAttributes::SPECULAR_MAP, keyword, &args)?,
            "map_Ke" => self.set_map(MaterialAttributes::EMISSIVE_MAP, keyword, &args)?,
            "map_d" => self.set_map(MaterialAttributes::DISSOLVE_MAP, keyword, &args)?,
            "map_bump" | "map_Bump" | "bump" => {
                self.set_map(MaterialAttributes::BUMP_MAP, keyword, &args)?
            }
            "disp" => self.set_map(MaterialAttributes::DISPLACEMENT_MAP, keyword, &args)?,
            "#" if args.first() == Some(&":EXT:") => self.apply_extension(&args[1..])?,
            comment if comment.starts_with('#') => {}
            other => self.warn(format_args!("skipping unknown directive '{}'", other)),
        }
        Ok(())
    }

    fn apply_extension(&mut self, args: &[&str]) -> Result<()> {
        match args.first().copied() {
            Some("cull-face") => {
                let mode = args
                    .get(1)
                    .copied()
                    .ok_or_else(|| Error::directive("cull-face", "missing mode"))?;
                let culling = FaceCulling::from_keyword(mode).ok_or_else(|| {
                    Error::directive(
                        "cull-face",
                        &format!("unknown mode '{}', expected none, front, back or all", mode),
                    )
                })?;
                self.current().face_culling = Some(culling);
            }
            Some("lightmap") => self.set_map(MaterialAttributes::LIGHTMAP, "lightmap", &args[1..])?,
            Some(other) => self.warn(format_args!("skipping unknown extension '{}'", other)),
            None => self.warn(format_args!("skipping empty extension line")),
        }
        Ok(())
    }

    fn set_map(&mut self, slot: MaterialAttributes, directive: &str, args: &[&str]) -> Result<()> {
        let map = self.parse_map(directive, args, MapKind::for_slot(slot))?;
        if let Some(target) = self.current().map_slot_mut(slot) {
            *target = Some(map);
        }
        Ok(())
    }

    fn parse_map(&self, directive: &str, args: &[&str], kind: MapKind) -> Result<TextureMap> {
        let mut map = TextureMap::default();
        let mut i = 0;

        while i < args.len() {
            match args[i] {
                "-o" => {
                    map.offset = Some(parse_pair(&args[i + 1..])?);
                    i += 3;
                }
                "-s" => {
                    map.scale = Some(parse_pair(&args[i + 1..])?);
                    i += 3;
                    // disp accepts a third -s value as its scale when a path still follows
                    if kind == MapKind::Displacement && i + 1 < args.len() {
                        if let Ok(value) = args[i].parse::<f32>() {
                            map.modifier = Some(MapModifier::DisplacementScale(value));
                            i += 1;
                        }
                    }
                }
                "-bm" => {
                    let value = parse_f32("-bm", args.get(i + 1))?;
                    i += 2;
                    if kind == MapKind::Bump {
                        map.modifier = Some(MapModifier::BumpScale(value));
                    } else {
                        self.warn(format_args!("'-bm' is only valid on bump maps, ignored on '{}'", directive));
                    }
                }
                "-intensity" => {
                    let value = parse_f32("-intensity", args.get(i + 1))?;
                    i += 2;
                    if kind == MapKind::Lightmap {
                        map.modifier = Some(MapModifier::LightmapIntensity(value));
                    } else {
                        self.warn(format_args!("'-intensity' is only valid on lightmaps, ignored on '{}'", directive));
                    }
                }
                path => {
                    map.path = Some(path.to_string());
                    if i + 1 < args.len() {
                        self.warn(format_args!(
                            "ignoring trailing arguments after '{}' path '{}'",
                            directive, path
                        ));
                    }
                    break;
                }
            }
        }

        if map.path.is_none() {
            self.warn(format_args!("'{}' has no texture path", directive));
        }
        Ok(map)
    }

    fn finish(self) -> MaterialLibrary {
        let mut library = MaterialLibrary::new(self.document);
        if self.materials.is_empty() {
            let mut material = self.pending;
            material.name = DEFAULT_MATERIAL_NAME.to_string();
            library.insert(material);
        }
        for material in self.materials {
            library.insert(material);
        }
        library
    }
}

fn parse_pair(args: &[&str]) -> Result<Vector2> {
    Ok(Vector2::new(
        parse_f32("map option", args.first())?,
        parse_f32("map option", args.get(1))?,
    ))
}

fn parse_color(directive: &str, args: &[&str]) -> Result<Color> {
    let r = parse_f32(directive, args.first())?;
    match args.len() {
        1 => Ok(Color::gray(r)),
        2 => Err(Error::directive(
            directive,
            "expected one or three color components, got two",
        )),
        _ => Ok(Color::new(
            r,
            parse_f32(directive, args.get(1))?,
            parse_f32(directive, args.get(2))?,
        )),
    }
}
