//! The in-memory triangle-mesh contract consumed and produced by the CSG
//! engine.
//!
//! This is the crate's only boundary: the surrounding renderer hands in flat
//! vertex/index buffers plus a world transform, and receives the same shape
//! back. No renderer types cross this boundary.

use crate::float_types::Real;
use nalgebra::{Matrix4, Point3, Quaternion, Unit, Vector2, Vector3, Vector4};

/// A contiguous index-buffer range rendered with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    pub index_start: u32,
    pub index_count: u32,
    pub material_index: i32,
}

/// Winding convention declared by the mesh's material.
///
/// Triangles of a [`ClockWise`](SideOrientation::ClockWise) mesh are
/// extracted with their vertex order reversed so that every solid entering a
/// boolean operation uses the same front-face convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideOrientation {
    #[default]
    CounterClockWise,
    ClockWise,
}

/// An indexed triangle mesh with optional uv/color attributes, submesh
/// descriptors, and a world transform.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    /// 3 floats per vertex.
    pub positions: Vec<Real>,
    /// 3 floats per vertex. Required for conversion; an empty or short
    /// buffer is rejected.
    pub normals: Vec<Real>,
    /// 2 floats per vertex, if present.
    pub uvs: Option<Vec<Real>>,
    /// 4 floats (rgba) per vertex, if present.
    pub colors: Option<Vec<Real>>,
    /// 3 indices per triangle.
    pub indices: Vec<u32>,
    /// Material ranges over `indices`. An empty list is treated as one
    /// submesh spanning the whole buffer with material 0.
    pub sub_meshes: Vec<SubMesh>,

    pub position: Vector3<Real>,
    pub rotation: Vector3<Real>,
    pub rotation_quaternion: Option<Unit<Quaternion<Real>>>,
    pub scaling: Vector3<Real>,
    /// Composed world matrix. Conversion trusts this field rather than
    /// recomposing it from the parts above.
    pub matrix: Matrix4<Real>,

    pub side_orientation: SideOrientation,
}

impl Default for MeshGeometry {
    fn default() -> Self {
        MeshGeometry {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: None,
            colors: None,
            indices: Vec::new(),
            sub_meshes: Vec::new(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            rotation_quaternion: None,
            scaling: Vector3::new(1.0, 1.0, 1.0),
            matrix: Matrix4::identity(),
            side_orientation: SideOrientation::default(),
        }
    }
}

impl MeshGeometry {
    /// Number of vertices described by the position buffer.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, i: usize) -> Point3<Real> {
        Point3::new(
            self.positions[3 * i],
            self.positions[3 * i + 1],
            self.positions[3 * i + 2],
        )
    }

    pub fn normal(&self, i: usize) -> Vector3<Real> {
        Vector3::new(
            self.normals[3 * i],
            self.normals[3 * i + 1],
            self.normals[3 * i + 2],
        )
    }

    pub fn uv(&self, i: usize) -> Option<Vector2<Real>> {
        self.uvs
            .as_ref()
            .map(|uvs| Vector2::new(uvs[2 * i], uvs[2 * i + 1]))
    }

    pub fn color(&self, i: usize) -> Option<Vector4<Real>> {
        self.colors.as_ref().map(|colors| {
            Vector4::new(
                colors[4 * i],
                colors[4 * i + 1],
                colors[4 * i + 2],
                colors[4 * i + 3],
            )
        })
    }
}
