//! Convex coplanar polygons and their provenance tag.

use crate::plane::Plane;
use crate::vertex::Vertex;

/// Provenance carried by every polygon through boolean operations, so the
/// reconstructed mesh can be split back into per-material submeshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SharedTag {
    /// Index of the submesh this polygon was extracted from.
    pub submesh_id: u32,
    /// Per-import counter disambiguating polygons from different source
    /// meshes combined in one solid.
    pub mesh_id: u32,
    /// Material slot of the originating submesh.
    pub material_index: i32,
}

/// An ordered, convex, coplanar run of vertices. Winding order determines the
/// front-facing side, consistent with `plane.normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub shared: SharedTag,
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon, deriving its plane from the first three vertices.
    ///
    /// Returns `None` when fewer than three vertices are supplied or the
    /// leading triangle is degenerate; callers skip such polygons.
    pub fn try_new(vertices: Vec<Vertex>, shared: SharedTag) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane =
            Plane::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos)?;
        Some(Polygon {
            vertices,
            shared,
            plane,
        })
    }

    /// Turn the polygon inside out: reverse winding, flip every vertex
    /// normal, flip the cached plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }
}
