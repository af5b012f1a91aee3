//! Test support library
//! Provides helper functions & fixtures shared by the integration tests.

#![allow(dead_code)]

use meshcsg::float_types::Real;
use meshcsg::mesh::{MeshGeometry, SubMesh};
use nalgebra::{Point3, Vector3};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a mesh's position buffer.
pub fn bounding_box(geometry: &MeshGeometry) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        -Real::MAX,
        -Real::MAX,
        -Real::MAX,
    ];

    for i in 0..geometry.vertex_count() {
        let p = geometry.position(i);
        bounds[0] = bounds[0].min(p.x);
        bounds[1] = bounds[1].min(p.y);
        bounds[2] = bounds[2].min(p.z);
        bounds[3] = bounds[3].max(p.x);
        bounds[4] = bounds[4].max(p.y);
        bounds[5] = bounds[5].max(p.z);
    }
    bounds
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn assert_bounds(geometry: &MeshGeometry, expected: [Real; 6]) {
    let bounds = bounding_box(geometry);
    for (got, want) in bounds.iter().zip(expected.iter()) {
        assert!(
            approx_eq(*got, *want, 1e-4),
            "bounding box {bounds:?} differs from expected {expected:?}"
        );
    }
}

/// Axis-aligned cube of the given side length centered at `center`, as an
/// indexed triangle mesh (24 vertices, 12 triangles, one submesh).
///
/// Faces are wound so that each triangle's derived plane normal points
/// outward; vertex normals are the outward face normals.
pub fn cube(center: [Real; 3], size: Real) -> MeshGeometry {
    let h = size / 2.0;
    let [cx, cy, cz] = center;

    // Each face: 4 corners counter-clockwise seen from outside, plus the
    // outward normal.
    let faces: [([[Real; 3]; 4], [Real; 3]); 6] = [
        (
            [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]],
            [1.0, 0.0, 0.0],
        ),
        (
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
            [-1.0, 0.0, 0.0],
        ),
        (
            [[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]],
            [0.0, 1.0, 0.0],
        ),
        (
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
            [0.0, -1.0, 0.0],
        ),
        (
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
            [0.0, 0.0, 1.0],
        ),
        (
            [[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]],
            [0.0, 0.0, -1.0],
        ),
    ];

    let mut geometry = MeshGeometry::default();
    for (corners, normal) in &faces {
        let base = geometry.vertex_count() as u32;
        for corner in corners {
            geometry
                .positions
                .extend([cx + corner[0], cy + corner[1], cz + corner[2]]);
            geometry.normals.extend(*normal);
        }
        // plane normals derive from (c - a) x (b - a), so triangles are
        // emitted clockwise seen from outside
        geometry
            .indices
            .extend([base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    geometry.sub_meshes.push(SubMesh {
        index_start: 0,
        index_count: geometry.indices.len() as u32,
        material_index: 0,
    });
    geometry
}

/// `cube` with per-face uv coordinates added.
pub fn cube_with_uvs(center: [Real; 3], size: Real) -> MeshGeometry {
    let mut geometry = cube(center, size);
    let face_uvs: [[Real; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let mut uvs = Vec::with_capacity(geometry.vertex_count() * 2);
    for _ in 0..6 {
        for uv in &face_uvs {
            uvs.extend(*uv);
        }
    }
    geometry.uvs = Some(uvs);
    geometry
}

fn ray_hits_triangle(
    origin: &Point3<Real>,
    direction: &Vector3<Real>,
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
) -> bool {
    let e1 = b - a;
    let e2 = c - a;
    let p = direction.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() < 1e-9 {
        return false;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }
    let q = s.cross(&e1);
    let v = direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }
    e2.dot(&q) * inv_det > 1e-9
}

/// Point containment via ray-crossing parity over the mesh's triangles.
/// The direction is deliberately skew to every axis so rays do not graze
/// edges of axis-aligned fixtures.
pub fn contains(geometry: &MeshGeometry, point: [Real; 3]) -> bool {
    let origin = Point3::new(point[0], point[1], point[2]);
    let direction = Vector3::new(0.5377, 0.2931, 0.1123).normalize();

    let mut crossings = 0usize;
    for tri in geometry.indices.chunks_exact(3) {
        let a = geometry.position(tri[0] as usize);
        let b = geometry.position(tri[1] as usize);
        let c = geometry.position(tri[2] as usize);
        if ray_hits_triangle(&origin, &direction, &a, &b, &c) {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}
