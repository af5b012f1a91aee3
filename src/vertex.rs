//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// A vertex of a polygon: position, normal, and optional uv / rgba color.
///
/// The normal is stored verbatim and is not required to be unit length;
/// planes are derived from positions, not from these normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Option<Vector2<Real>>,
    pub color: Option<Vector4<Real>>,
}

impl Vertex {
    /// Create a new [`Vertex`] carrying only position and normal.
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex {
            pos,
            normal,
            uv: None,
            color: None,
        }
    }

    /// Create a [`Vertex`] with the full attribute set.
    pub const fn with_attributes(
        pos: Point3<Real>,
        normal: Vector3<Real>,
        uv: Option<Vector2<Real>>,
        color: Option<Vector4<Real>>,
    ) -> Self {
        Vertex {
            pos,
            normal,
            uv,
            color,
        }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other`
    /// (`t = 1`).
    ///
    /// Normals are interpolated as well; uv and color interpolate when both
    /// endpoints carry them and are dropped otherwise.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let pos = self.pos + (other.pos - self.pos) * t;
        let normal = self.normal + (other.normal - self.normal) * t;
        let uv = match (self.uv, other.uv) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            _ => None,
        };
        let color = match (self.color, other.color) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            _ => None,
        };
        Vertex {
            pos,
            normal,
            uv,
            color,
        }
    }
}
