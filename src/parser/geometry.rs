//! Geometry document parsing and vertex indexing
//!
//! Attribute pools (`v`, `vn`, `vt`, `vt2`) are document wide and indexed by
//! face lines with 1-based or relative indices. Every `g`/`o` starts a new
//! object whose vertex buffers hold only the corners its faces use, so face
//! indices are local to the object and fit in 16 bits.

use std::collections::HashMap;
use std::io::BufRead;

use super::face::{parse_face, resolve_index};
use super::{
    ParseContext, ParserConfig, VertexMode, parse_f32, parse_material_library, parse_number,
    required_name, split_directive,
};
use crate::error::{Error, Result};
use crate::format::MAX_OBJECT_VERTICES;
use crate::model::{Asset, Face, Group, Object, Vector2, Vector3};
use crate::resolver::LibraryResolver;

/// Directives for primitives that cannot be represented as triangles
const UNSUPPORTED_PRIMITIVES: &[&str] = &[
    "p", "l", "curv", "curv2", "surf", "cstype", "deg", "bmat", "step", "parm", "trim", "hole",
    "scrv", "sp", "end",
];

/// Parse a geometry document into an asset
///
/// Material libraries named by `mtllib` are opened through `resolver` and
/// parsed into `context` the first time they are referenced in the run.
/// Any error aborts the document and carries the offending line.
///
/// # Example
///
/// ```
/// use objbom::{MemoryResolver, ParserConfig};
/// use objbom::parser::{ParseContext, parse_geometry};
///
/// let mut context = ParseContext::new();
/// let asset = parse_geometry(
///     "quad",
///     "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n".as_bytes(),
///     &MemoryResolver::new(),
///     &mut context,
///     &ParserConfig::new(),
/// )?;
///
/// assert_eq!(asset.objects[0].vertex_count(), 4);
/// assert_eq!(asset.objects[0].face_count(), 2);
/// # Ok::<(), objbom::Error>(())
/// ```
pub fn parse_geometry<R: BufRead>(
    name: &str,
    reader: R,
    resolver: &dyn LibraryResolver,
    context: &mut ParseContext,
    config: &ParserConfig,
) -> Result<Asset> {
    let mut state = DocumentState::new(name, config.vertex_mode());

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        state.line = line_number;
        let line = line.map_err(|e| Error::from(e).at(name, line_number))?;
        state
            .apply(&line, resolver, context)
            .map_err(|e| e.at(name, line_number))?;
    }

    let asset = state.finish();
    log::info!(
        "Parsed '{}': {} object(s), {} face(s)",
        name,
        asset.objects.len(),
        asset.objects.iter().map(Object::face_count).sum::<usize>()
    );
    Ok(asset)
}

/// A face corner after index resolution; also the deduplication key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CornerKey {
    position: usize,
    normal: Option<usize>,
    uv: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Corner {
    key: CornerKey,
    uv2: Option<usize>,
}

struct DocumentState<'a> {
    document: &'a str,
    line: usize,
    mode: VertexMode,

    positions: Vec<Vector3>,
    normals: Vec<Vector3>,
    uvs: Vec<Vector2>,
    uvs2: Vec<Vector2>,

    /// Indices into the context's libraries, in activation order
    libraries: Vec<usize>,
    material: Option<u16>,
    smoothing: u8,

    objects: Vec<Object>,
    /// Output index per corner for the current object
    cache: HashMap<CornerKey, u16>,
}

impl<'a> DocumentState<'a> {
    fn new(document: &'a str, mode: VertexMode) -> Self {
        Self {
            document,
            line: 0,
            mode,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            uvs2: Vec::new(),
            libraries: Vec::new(),
            material: None,
            smoothing: 0,
            objects: Vec::new(),
            cache: HashMap::new(),
        }
    }

    fn apply(
        &mut self,
        line: &str,
        resolver: &dyn LibraryResolver,
        context: &mut ParseContext,
    ) -> Result<()> {
        let Some((keyword, args)) = split_directive(line) else {
            return Ok(());
        };

        match keyword {
            "v" => {
                let position = parse_vector3(keyword, &args)?;
                self.positions.push(position);
            }
            "vn" => {
                let normal = parse_vector3(keyword, &args)?;
                self.normals.push(normal);
            }
            "vt" => {
                let uv = self.parse_uv(keyword, &args)?;
                self.uvs.push(uv);
            }
            "vt2" => {
                let uv = self.parse_uv(keyword, &args)?;
                self.uvs2.push(uv);
            }
            "f" => self.add_face(line)?,
            "g" | "o" => self.begin_object(args.first().map(|name| name.to_string())),
            "usemtl" => self.use_material(required_name(keyword, &args)?, context)?,
            "mtllib" => self.load_libraries(&args, resolver, context)?,
            "s" => self.set_smoothing(&args)?,
            primitive if UNSUPPORTED_PRIMITIVES.contains(&primitive) => {
                return Err(Error::Unsupported(format!(
                    "'{}' primitives (only triangles and quads are supported)",
                    primitive
                )));
            }
            comment if comment.starts_with('#') => {}
            other => log::warn!(
                "{}:{}: skipping unknown directive '{}'",
                self.document,
                self.line,
                other
            ),
        }
        Ok(())
    }

    fn parse_uv(&self, directive: &str, args: &[&str]) -> Result<Vector2> {
        let u = parse_f32(directive, args.first())?;
        let v = match args.get(1) {
            Some(_) => parse_f32(directive, args.get(1))?,
            None => 0.0,
        };
        if args.len() > 2 {
            let w = parse_f32(directive, args.get(2))?;
            if w != 0.0 {
                log::warn!(
                    "{}:{}: discarding third texture coordinate component {}",
                    self.document,
                    self.line,
                    w
                );
            }
        }
        Ok(Vector2::new(u, v))
    }

    fn set_smoothing(&mut self, args: &[&str]) -> Result<()> {
        let value = match args.first().copied() {
            Some("off") => 0,
            Some("on") => 1,
            other => {
                let group: u32 = parse_number("s", other.as_ref(), "smoothing group (off, on or a number)")?;
                // stored in 8 bits; larger groups keep their low byte
                let value = group as u8;
                if u32::from(value) != group {
                    log::warn!(
                        "{}:{}: smoothing group {} truncated to {}",
                        self.document,
                        self.line,
                        group,
                        value
                    );
                }
                value
            }
        };
        self.smoothing = value;
        if let Some(group) = self.objects.last_mut().and_then(|o| o.groups.last_mut()) {
            group.smoothing = value;
        }
        Ok(())
    }

    fn use_material(&mut self, name: &str, context: &ParseContext) -> Result<()> {
        let id = self
            .libraries
            .iter()
            .find_map(|&index| context.libraries()[index].find_by_name(name))
            .map(|material| material.id);

        let Some(id) = id else {
            let err = Error::UnknownMaterial(name.to_string());
            return Err(if self.libraries.is_empty() {
                err.with_hint("No material library is active; reference one with 'mtllib' first")
            } else {
                err
            });
        };

        self.material = Some(id);
        if let Some(group) = self.objects.last_mut().and_then(|o| o.groups.last_mut()) {
            group.material = Some(id);
        }
        Ok(())
    }

    fn load_libraries(
        &mut self,
        references: &[&str],
        resolver: &dyn LibraryResolver,
        context: &mut ParseContext,
    ) -> Result<()> {
        if references.is_empty() {
            return Err(Error::directive("mtllib", "missing library name"));
        }

        for &reference in references {
            let identity = resolver.identity(reference);
            let index = match context.find_library(&identity) {
                Some(index) => index,
                None => {
                    let reader = match resolver.open(reference) {
                        Ok(reader) => reader,
                        Err(err) => {
                            log::error!(
                                "{}:{}: skipping material library '{}': {}",
                                self.document,
                                self.line,
                                reference,
                                err
                            );
                            continue;
                        }
                    };
                    let library = parse_material_library(reference, reader, context)?;
                    context.register_library(identity, library)
                }
            };
            if !self.libraries.contains(&index) {
                self.libraries.push(index);
            }
        }
        Ok(())
    }

    fn begin_object(&mut self, name: Option<String>) {
        let mut group = Group::new(name);
        group.material = self.material;
        group.smoothing = self.smoothing;

        let mut object = Object::new();
        object.groups.push(group);
        self.objects.push(object);
        self.cache.clear();
    }

    fn current_object(&mut self) -> &mut Object {
        if self.objects.is_empty() {
            self.begin_object(None);
        }
        let last = self.objects.len() - 1;
        &mut self.objects[last]
    }

    fn add_face(&mut self, line: &str) -> Result<()> {
        let face = parse_face(line)?;

        // resolve every corner before emitting so a bad index leaves no partial face
        let corners = face
            .corners()
            .iter()
            .map(|corner| -> Result<Corner> {
                let position = resolve_index(corner.position, self.positions.len(), "position")?;
                let uv = corner
                    .uv
                    .map(|raw| resolve_index(raw, self.uvs.len(), "texture coordinate"))
                    .transpose()?;
                let normal = corner
                    .normal
                    .map(|raw| resolve_index(raw, self.normals.len(), "normal"))
                    .transpose()?;
                let uv2 = match corner.uv {
                    Some(raw) if !self.uvs2.is_empty() => Some(resolve_index(
                        raw,
                        self.uvs2.len(),
                        "secondary texture coordinate",
                    )?),
                    _ => None,
                };
                Ok(Corner {
                    key: CornerKey { position, normal, uv },
                    uv2,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut triangles = Vec::with_capacity(2);
        match self.mode {
            VertexMode::Deduplicated => {
                let indices = corners
                    .iter()
                    .map(|corner| self.emit_vertex(corner))
                    .collect::<Result<Vec<_>>>()?;
                for &[a, b, c] in face.triangles() {
                    triangles.push(Face::new(indices[a], indices[b], indices[c]));
                }
            }
            // every triangle corner gets its own vertex, quads included
            VertexMode::Expanded => {
                for &[a, b, c] in face.triangles() {
                    let v1 = self.emit_vertex(&corners[a])?;
                    let v2 = self.emit_vertex(&corners[b])?;
                    let v3 = self.emit_vertex(&corners[c])?;
                    triangles.push(Face::new(v1, v2, v3));
                }
            }
        }

        self.push_triangles(triangles);
        Ok(())
    }

    fn push_triangles(&mut self, triangles: Vec<Face>) {
        let object = self.current_object();
        let last = object.groups.len() - 1;
        object.groups[last].faces.extend(triangles);
    }

    fn emit_vertex(&mut self, corner: &Corner) -> Result<u16> {
        if self.mode == VertexMode::Deduplicated {
            if let Some(&index) = self.cache.get(&corner.key) {
                return Ok(index);
            }
        }

        let position = self.positions[corner.key.position];
        let normal = corner.key.normal.map(|i| self.normals[i]);
        let uv = corner.key.uv.map(|i| self.uvs[i]);
        let uv2 = corner.uv2.map(|i| self.uvs2[i]);

        let object = self.current_object();
        let index = u16::try_from(object.vertex_count()).map_err(|_| {
            Error::InvalidIndex(format!(
                "object exceeds the limit of {} vertices",
                MAX_OBJECT_VERTICES
            ))
        })?;
        object.push_vertex(position, normal, uv, uv2);

        if self.mode == VertexMode::Deduplicated {
            self.cache.insert(corner.key, index);
        }
        Ok(index)
    }

    fn finish(mut self) -> Asset {
        if self.objects.is_empty() {
            self.begin_object(None);
        }
        let name = (!self.document.is_empty()).then(|| self.document.to_string());
        Asset {
            name,
            objects: self.objects,
        }
    }
}

fn parse_vector3(directive: &str, args: &[&str]) -> Result<Vector3> {
    Ok(Vector3::new(
        parse_f32(directive, args.first())?,
        parse_f32(directive, args.get(1))?,
        parse_f32(directive, args.get(2))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FaceCulling;
    use crate::resolver::MemoryResolver;

    fn parse_with(text: &str, resolver: &MemoryResolver, mode: VertexMode) -> Result<Asset> {
        let mut context = ParseContext::new();
        parse_geometry(
            "test",
            text.as_bytes(),
            resolver,
            &mut context,
            &ParserConfig::new().with_vertex_mode(mode),
        )
    }

    fn parse(text: &str) -> Result<Asset> {
        parse_with(text, &MemoryResolver::new(), VertexMode::Deduplicated)
    }

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\n";

    #[test]
    fn test_single_triangle() {
        let asset = parse(&format!("{TRIANGLE}f 1 2 3\n")).unwrap();
        assert_eq!(asset.name.as_deref(), Some("test"));
        assert_eq!(asset.objects.len(), 1);

        let object = &asset.objects[0];
        assert_eq!(object.vertex_count(), 3);
        assert_eq!(object.positions[2], Vector3::new(1.0, 1.0, 0.0));
        assert!(object.normals.is_empty());
        assert_eq!(object.groups.len(), 1);
        assert_eq!(object.groups[0].faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_relative_indices_match_absolute() {
        let absolute = parse(&format!("{TRIANGLE}f 1 2 3\n")).unwrap();
        let relative = parse(&format!("{TRIANGLE}f -3 -2 -1\n")).unwrap();
        assert_eq!(absolute, relative);
    }

    #[test]
    fn test_relative_index_uses_pool_at_face_line() {
        let asset = parse("v 0 0 0\nv 1 0 0\nv 2 0 0\nf -1 -2 -3\nv 9 9 9\n").unwrap();
        let object = &asset.objects[0];
        assert_eq!(object.positions[0], Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(object.vertex_count(), 3);
    }

    #[test]
    fn test_quad_is_fanned() {
        let asset = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        let group = &asset.objects[0].groups[0];
        assert_eq!(group.faces, vec![Face::new(0, 1, 2), Face::new(0, 2, 3)]);
        assert_eq!(asset.objects[0].vertex_count(), 4);
    }

    #[test]
    fn test_shared_corners_are_deduplicated() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1//1 3//1 4//1\n";
        let asset = parse(text).unwrap();
        let object = &asset.objects[0];
        assert_eq!(object.vertex_count(), 4);
        assert_eq!(object.normals.len(), 4);
        assert_eq!(
            object.groups[0].faces,
            vec![Face::new(0, 1, 2), Face::new(0, 2, 3)]
        );
    }

    #[test]
    fn test_corners_differing_in_uv_are_distinct() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nvt 0 0\nvt 1 1\nf 1/1 2/1 3/1\nf 1/2 2/1 3/1\n";
        let asset = parse(text).unwrap();
        let object = &asset.objects[0];
        assert_eq!(object.vertex_count(), 4);
        assert_eq!(object.uvs[3], Vector2::new(1.0, 1.0));
        assert_eq!(object.groups[0].faces[1], Face::new(3, 1, 2));
    }

    #[test]
    fn test_expanded_mode_never_shares() {
        let text = format!("{TRIANGLE}f 1 2 3\nf 1 2 3\n");
        let asset = parse_with(&text, &MemoryResolver::new(), VertexMode::Expanded).unwrap();
        let object = &asset.objects[0];
        assert_eq!(object.vertex_count(), 6);
        assert_eq!(
            object.groups[0].faces,
            vec![Face::new(0, 1, 2), Face::new(3, 4, 5)]
        );
    }

    #[test]
    fn test_expanded_quad_has_six_vertices() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let asset = parse_with(text, &MemoryResolver::new(), VertexMode::Expanded).unwrap();
        let object = &asset.objects[0];
        assert_eq!(object.vertex_count(), 6);
        assert_eq!(
            object.groups[0].faces,
            vec![Face::new(0, 1, 2), Face::new(3, 4, 5)]
        );
        assert_eq!(object.positions[3], Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(object.positions[4], Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(object.positions[5], Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_secondary_uv_uses_uv_index() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt2 0.5 0.5\nvt2 0.25 0.25\nvt2 0.75 0.75\nf 1/3 2/2 3/1\n";
        let asset = parse(text).unwrap();
        let object = &asset.objects[0];
        assert_eq!(object.uvs2.len(), 3);
        assert_eq!(object.uvs2[0], Vector2::new(0.75, 0.75));
        assert_eq!(object.uvs2[2], Vector2::new(0.5, 0.5));
    }

    #[test]
    fn test_ngon_aborts_document() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 2 0\nf 1 2 3 4 5\n").unwrap_err();
        assert!(matches!(err.kind(), Error::Unsupported(_)));
        assert!(err.to_string().contains("test:6"));
    }

    #[test]
    fn test_out_of_range_index() {
        for face in ["f 1 2 4", "f 0 1 2", "f -4 -2 -1", "f 1/1 2/1 3/1", "f 1//1 2//1 3//1"] {
            let err = parse(&format!("{TRIANGLE}{face}\n")).unwrap_err();
            assert!(matches!(err.kind(), Error::InvalidIndex(_)), "{face}");
        }
    }

    #[test]
    fn test_malformed_face_is_syntax_error() {
        let err = parse(&format!("{TRIANGLE}f 1 2\n")).unwrap_err();
        assert!(matches!(err.kind(), Error::Syntax(_)));
    }

    #[test]
    fn test_unsupported_primitives() {
        for directive in ["p 1", "l 1 2", "curv 0 1 1 2", "surf 0 1 0 1 1 2 3 4", "cstype bezier"] {
            let err = parse(&format!("{TRIANGLE}{directive}\n")).unwrap_err();
            assert!(matches!(err.kind(), Error::Unsupported(_)), "{directive}");
        }
    }

    #[test]
    fn test_groups_start_new_objects() {
        let text = format!("{TRIANGLE}g first\nf 1 2 3\no second\nf 3 2 1\n");
        let asset = parse(&text).unwrap();
        assert_eq!(asset.objects.len(), 2);
        assert_eq!(asset.objects[0].groups[0].name.as_deref(), Some("first"));
        assert_eq!(asset.objects[1].groups[0].name.as_deref(), Some("second"));
        // indices restart for every object
        assert_eq!(asset.objects[1].groups[0].faces, vec![Face::new(0, 1, 2)]);
        assert_eq!(asset.objects[1].positions[0], Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_document_without_faces_has_one_empty_object() {
        let asset = parse("# only a comment\n\nv 0 0 0\n").unwrap();
        assert_eq!(asset.objects.len(), 1);
        assert!(!asset.objects[0].has_geometry());
        assert_eq!(asset.objects[0].groups.len(), 1);
        assert!(asset.objects[0].groups[0].faces.is_empty());
    }

    #[test]
    fn test_smoothing_applies_to_current_and_later_groups() {
        let text = format!("{TRIANGLE}g a\ns 4\nf 1 2 3\ng b\nf 1 2 3\ns off\n");
        let asset = parse(&text).unwrap();
        assert_eq!(asset.objects[0].groups[0].smoothing, 4);
        assert_eq!(asset.objects[1].groups[0].smoothing, 0);

        let asset = parse("s on\ng a\n").unwrap();
        assert_eq!(asset.objects[0].groups[0].smoothing, 1);

        let err = parse("s sometimes\n").unwrap_err();
        assert!(matches!(err.kind(), Error::ParseError(_)));
    }

    #[test]
    fn test_large_smoothing_group_is_truncated() {
        let text = format!("{TRIANGLE}g a\ns 300\nf 1 2 3\ng b\ns 255\n");
        let asset = parse(&text).unwrap();
        assert_eq!(asset.objects[0].groups[0].smoothing, 44);
        assert_eq!(asset.objects[1].groups[0].smoothing, 255);
    }

    #[test]
    fn test_usemtl_resolves_through_active_libraries() {
        let resolver = MemoryResolver::new()
            .with_library("a.mtl", "newmtl shared\nnewmtl only_a\n")
            .with_library("b.mtl", "newmtl shared\nnewmtl only_b\n");
        let text = format!(
            "mtllib a.mtl b.mtl\n{TRIANGLE}g one\nusemtl shared\nf 1 2 3\ng two\nusemtl only_b\nf 1 2 3\ng three\n"
        );
        let asset = parse_with(&text, &resolver, VertexMode::Deduplicated).unwrap();
        assert_eq!(asset.objects[0].groups[0].material, Some(0));
        assert_eq!(asset.objects[1].groups[0].material, Some(3));
        // the active material carries into later groups
        assert_eq!(asset.objects[2].groups[0].material, Some(3));
    }

    #[test]
    fn test_unknown_material_aborts_document() {
        let resolver = MemoryResolver::new().with_library("a.mtl", "newmtl red\n");
        let err = parse_with("mtllib a.mtl\nusemtl blue\n", &resolver, VertexMode::Deduplicated)
            .unwrap_err();
        assert!(matches!(err.kind(), Error::UnknownMaterial(_)));
        assert!(err.to_string().contains("test:2"));

        let err = parse("usemtl red\n").unwrap_err();
        assert!(err.to_string().contains("Hint:"));
    }

    #[test]
    fn test_missing_library_is_skipped() {
        let resolver = MemoryResolver::new().with_library("present.mtl", "newmtl red\n");
        let text = "mtllib missing.mtl present.mtl\nusemtl red\n";
        let mut context = ParseContext::new();
        let asset = parse_geometry(
            "test",
            text.as_bytes(),
            &resolver,
            &mut context,
            &ParserConfig::new(),
        )
        .unwrap();
        assert_eq!(context.libraries().len(), 1);
        assert_eq!(asset.objects[0].groups[0].material, Some(0));
    }

    #[test]
    fn test_library_parsed_once_per_context() {
        let resolver = MemoryResolver::new().with_library(
            "scene.mtl",
            "newmtl a\n# :EXT: cull-face front\n",
        );
        let mut context = ParseContext::new();
        for name in ["first", "second"] {
            parse_geometry(
                name,
                "mtllib scene.mtl\nmtllib scene.mtl\n".as_bytes(),
                &resolver,
                &mut context,
                &ParserConfig::new(),
            )
            .unwrap();
        }
        assert_eq!(context.libraries().len(), 1);
        let material = context.libraries()[0].find_by_name("a").unwrap();
        assert_eq!(material.face_culling, Some(FaceCulling::Front));
    }

    #[test]
    fn test_w_components_are_accepted() {
        let asset = parse("v 0 0 0 1\nv 1 0 0 1\nv 1 1 0 1\nvt 0.5 0.5 0.7\nf 1/1 2/1 3/1\n").unwrap();
        assert_eq!(asset.objects[0].uvs[0], Vector2::new(0.5, 0.5));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = parse("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        assert!(matches!(err.kind(), Error::ParseError(_)));
        assert!(err.to_string().contains("test:2"));
    }

    #[test]
    fn test_vertex_limit_per_object() {
        let mut text = String::from("v 0 0 0\nv 1 0 0\nv 0 1 0\n");
        // 21845 expanded triangles fill 65535 vertices
        for _ in 0..21845 {
            text.push_str("f 1 2 3\n");
        }
        let asset = parse_with(&text, &MemoryResolver::new(), VertexMode::Expanded);
        assert!(asset.is_ok());

        text.push_str("f 1 2 3\n");
        let err = parse_with(&text, &MemoryResolver::new(), VertexMode::Expanded).unwrap_err();
        assert!(matches!(err.kind(), Error::InvalidIndex(_)));
    }
}
