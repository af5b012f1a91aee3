use meshcsg::polygon::{Polygon, SharedTag};
use meshcsg::vertex::Vertex;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

fn triangle() -> Polygon {
    let vertices = vec![
        Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        Vertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::z()),
    ];
    Polygon::try_new(vertices, SharedTag::default()).unwrap()
}

#[test]
fn too_few_vertices_is_degenerate() {
    let vertices = vec![
        Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
    ];
    assert!(Polygon::try_new(vertices, SharedTag::default()).is_none());
}

#[test]
fn zero_area_triangle_is_degenerate() {
    let p = Point3::new(1.0, 2.0, 3.0);
    let vertices = vec![
        Vertex::new(p, Vector3::z()),
        Vertex::new(p, Vector3::z()),
        Vertex::new(p, Vector3::z()),
    ];
    assert!(Polygon::try_new(vertices, SharedTag::default()).is_none());
}

#[test]
fn plane_derived_from_first_three_vertices() {
    let poly = triangle();
    // winding above gives a +z facing plane at z = 0
    assert!((poly.plane.normal - Vector3::z()).norm() < 1e-12);
    assert!(poly.plane.w.abs() < 1e-12);
}

#[test]
fn flip_reverses_winding_and_normals() {
    let mut poly = triangle();
    let original_positions: Vec<_> = poly.vertices.iter().map(|v| v.pos).collect();

    poly.flip();

    let flipped_positions: Vec<_> = poly.vertices.iter().map(|v| v.pos).collect();
    let mut reversed = original_positions.clone();
    reversed.reverse();
    assert_eq!(flipped_positions, reversed);

    for v in &poly.vertices {
        assert_eq!(v.normal, -Vector3::z());
    }
    assert!((poly.plane.normal + Vector3::z()).norm() < 1e-12);
}

#[test]
fn double_flip_is_identity() {
    let mut poly = triangle();
    let original = poly.clone();

    poly.flip();
    poly.flip();

    assert_eq!(poly.vertices, original.vertices);
    assert_eq!(poly.plane, original.plane);
}

#[test]
fn vertex_interpolation_covers_all_attributes() {
    let a = Vertex::with_attributes(
        Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Some(Vector2::new(0.0, 0.0)),
        Some(Vector4::new(1.0, 0.0, 0.0, 1.0)),
    );
    let b = Vertex::with_attributes(
        Point3::new(2.0, 2.0, 2.0),
        Vector3::new(0.0, 1.0, 0.0),
        Some(Vector2::new(1.0, 0.5)),
        Some(Vector4::new(0.0, 1.0, 0.0, 1.0)),
    );

    let mid = a.interpolate(&b, 0.5);
    assert_eq!(mid.pos, Point3::new(1.0, 1.0, 1.0));
    assert_eq!(mid.normal, Vector3::new(0.0, 0.5, 0.5));
    assert_eq!(mid.uv, Some(Vector2::new(0.5, 0.25)));
    assert_eq!(mid.color, Some(Vector4::new(0.5, 0.5, 0.0, 1.0)));
}

#[test]
fn interpolation_drops_attributes_missing_on_either_end() {
    let a = Vertex::with_attributes(
        Point3::new(0.0, 0.0, 0.0),
        Vector3::z(),
        Some(Vector2::new(0.0, 0.0)),
        None,
    );
    let b = Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z());

    let mid = a.interpolate(&b, 0.25);
    assert_eq!(mid.pos, Point3::new(0.25, 0.0, 0.0));
    assert!(mid.uv.is_none());
    assert!(mid.color.is_none());
}

#[test]
fn interpolation_endpoints() {
    let a = Vertex::new(Point3::new(0.0, 1.0, 2.0), Vector3::x());
    let b = Vertex::new(Point3::new(4.0, 5.0, 6.0), Vector3::y());

    assert_eq!(a.interpolate(&b, 0.0).pos, a.pos);
    assert_eq!(a.interpolate(&b, 1.0).pos, b.pos);
}

#[test]
fn shared_tag_is_plain_data() {
    let tag = SharedTag {
        submesh_id: 1,
        mesh_id: 2,
        material_index: 3,
    };
    let copy = tag;
    assert_eq!(tag, copy);
    assert_eq!(SharedTag::default().material_index, 0);
}
