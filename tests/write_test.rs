//! Tests for BOM writing and reading

use objbom::{
    Asset, Color, Container, Error, Face, FaceCulling, Group, MapModifier, Material,
    MaterialLibrary, Object, TextureMap, Vector2, Vector3, read_container, write_container,
};

fn full_material(id: u16) -> Material {
    let mut material = Material::new(id, format!("material_{}", id));
    material.illumination_model = Some(2);
    material.specular_exponent = Some(96.078431);
    material.optical_density = Some(1.45);
    material.dissolve = Some(0.8);
    material.transmission_filter = Some(Color::gray(1.0));
    material.ambient = Some(Color::new(0.1, 0.1, 0.1));
    material.diffuse = Some(Color::new(0.64, 0.32, 0.16));
    material.specular = Some(Color::new(0.5, 0.5, 0.5));
    material.emissive = Some(Color::gray(0.0));
    material.ambient_map = Some(TextureMap::new("ambient.png"));
    material.diffuse_map = Some(TextureMap {
        path: Some("diffuse.png".to_string()),
        scale: Some(Vector2::new(2.0, 2.0)),
        offset: Some(Vector2::new(0.5, 0.0)),
        modifier: None,
    });
    material.specular_map = Some(TextureMap::new("specular.png"));
    material.emissive_map = Some(TextureMap::new("emissive.png"));
    material.dissolve_map = Some(TextureMap::new("alpha.png"));
    material.bump_map = Some(TextureMap {
        path: Some("bump.png".to_string()),
        modifier: Some(MapModifier::BumpScale(0.25)),
        ..TextureMap::default()
    });
    material.displacement_map = Some(TextureMap {
        path: Some("height.png".to_string()),
        scale: Some(Vector2::new(1.0, 1.0)),
        modifier: Some(MapModifier::DisplacementScale(0.1)),
        ..TextureMap::default()
    });
    material.face_culling = Some(FaceCulling::Back);
    material.lightmap = Some(TextureMap {
        path: Some("light.png".to_string()),
        modifier: Some(MapModifier::LightmapIntensity(3.0)),
        ..TextureMap::default()
    });
    material
}

fn quad_object(with_attributes: bool) -> Object {
    let mut object = Object::new();
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    for (x, y) in corners {
        if with_attributes {
            object.push_vertex(
                Vector3::new(x, y, 0.0),
                Some(Vector3::new(0.0, 0.0, 1.0)),
                Some(Vector2::new(x, y)),
                Some(Vector2::new(y, x)),
            );
        } else {
            object.push_vertex(Vector3::new(x, y, 0.0), None, None, None);
        }
    }
    let mut group = Group::new(Some("quad".to_string()));
    group.faces = vec![Face::new(0, 1, 2), Face::new(0, 2, 3)];
    group.smoothing = 1;
    object.groups.push(group);
    object
}

fn roundtrip(container: &Container) -> Container {
    let mut bytes = Vec::new();
    write_container(container, &mut bytes).expect("write should succeed");
    read_container(&bytes[..]).expect("read should succeed")
}

/// Test that every material field survives encoding
#[test]
fn test_roundtrip_full_material() {
    let mut library = MaterialLibrary::new("scene.mtl");
    library.insert(full_material(0));
    library.insert(Material::new(1, "plain"));
    let container = Container {
        libraries: vec![library],
        assets: Vec::new(),
    };

    let decoded = roundtrip(&container);
    assert_eq!(decoded.libraries.len(), 1);
    assert_eq!(decoded.libraries[0].name, "");
    assert_eq!(decoded.material(0), Some(&full_material(0)));
    assert_eq!(decoded.material(1), Some(&Material::new(1, "plain")));
}

/// Test that vertex buffers and faces decode to the same values
#[test]
fn test_roundtrip_geometry_is_bit_exact() {
    let mut asset = Asset::new(Some("boat".to_string()));
    asset.objects.push(quad_object(true));
    asset.objects.push(quad_object(false));
    let container = Container {
        libraries: Vec::new(),
        assets: vec![asset],
    };

    let decoded = roundtrip(&container);
    assert_eq!(decoded, container);
    let object = &decoded.assets[0].objects[0];
    assert_eq!(object.uvs2[1], Vector2::new(0.0, 1.0));
    assert!(decoded.assets[0].objects[1].normals.is_empty());
}

/// Test that group materials are written as positions in the material list
#[test]
fn test_material_ids_become_ordinals() {
    let mut first = MaterialLibrary::new("a.mtl");
    first.insert(Material::new(10, "ten"));
    first.insert(Material::new(20, "twenty"));
    let mut second = MaterialLibrary::new("b.mtl");
    second.insert(Material::new(5, "five"));

    let mut object = quad_object(false);
    object.groups[0].material = Some(5);
    let mut asset = Asset::new(None);
    asset.objects.push(object);

    let container = Container {
        libraries: vec![first, second],
        assets: vec![asset],
    };
    let decoded = roundtrip(&container);

    let names: Vec<&str> = decoded.materials().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ten", "twenty", "five"]);
    assert_eq!(decoded.assets[0].objects[0].groups[0].material, Some(2));
    assert_eq!(decoded.material(2).map(|m| m.name.as_str()), Some("five"));
}

#[test]
fn test_group_of_empty_object_keeps_only_name() {
    let mut object = Object::new();
    let mut group = Group::new(Some("empty".to_string()));
    group.smoothing = 2;
    object.groups.push(group);
    let mut asset = Asset::new(None);
    asset.objects.push(object);
    let container = Container {
        libraries: Vec::new(),
        assets: vec![asset],
    };

    let decoded = roundtrip(&container);
    let group = &decoded.assets[0].objects[0].groups[0];
    assert_eq!(group.name.as_deref(), Some("empty"));
    assert_eq!(group.smoothing, 0);
    assert!(decoded.assets[0].name.is_none());
}

#[test]
fn test_write_rejects_dangling_material() {
    let mut object = quad_object(false);
    object.groups[0].material = Some(1);
    let mut asset = Asset::new(None);
    asset.objects.push(object);
    let container = Container {
        libraries: Vec::new(),
        assets: vec![asset],
    };

    let mut bytes = Vec::new();
    let err = write_container(&container, &mut bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidModel(_)));
    assert!(bytes.is_empty());
}

#[test]
fn test_truncated_stream_is_io_error() {
    let mut asset = Asset::new(Some("a".to_string()));
    asset.objects.push(quad_object(true));
    let container = Container {
        libraries: Vec::new(),
        assets: vec![asset],
    };
    let mut bytes = Vec::new();
    write_container(&container, &mut bytes).unwrap();

    for len in [0, 3, 10, bytes.len() / 2, bytes.len() - 1] {
        match read_container(&bytes[..len]) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("truncated at {}: unexpected {:?}", len, other),
        }
    }
}

/// Test writing to and reading from a file
#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bom");

    let mut library = MaterialLibrary::new("scene.mtl");
    library.insert(full_material(0));
    let mut object = quad_object(true);
    object.groups[0].material = Some(0);
    let mut asset = Asset::new(Some("scene".to_string()));
    asset.objects.push(object);
    let container = Container {
        libraries: vec![library],
        assets: vec![asset],
    };

    container.write_to_file(&path).unwrap();
    let decoded = Container::read_from_file(&path).unwrap();
    assert_eq!(decoded.assets, container.assets);
    assert_eq!(decoded.material(0), container.material(0));
}
