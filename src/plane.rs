//! Infinite plane representation and polygon classification / splitting.

use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use nalgebra::{Point3, Vector3};

// Per-vertex (and OR-folded per-polygon) classification values.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// An infinite plane `normal · p = w` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and offset.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    /// Derive the plane spanned by three points, or `None` when the triangle
    /// is degenerate (coincident or collinear points).
    ///
    /// `None` is the sentinel callers use to silently drop zero-area
    /// triangles during mesh conversion and polygon splitting.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Option<Self> {
        let v0 = c - a;
        let v1 = b - a;
        if v0.norm_squared() == 0.0 || v1.norm_squared() == 0.0 {
            return None;
        }
        let cross = v0.cross(&v1);
        if cross.norm_squared() < Real::EPSILON * Real::EPSILON {
            return None;
        }
        let normal = cross.normalize();
        Some(Plane {
            normal,
            w: normal.dot(&a.coords),
        })
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Reverse the plane in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify a point as [`FRONT`], [`BACK`], or [`COPLANAR`] within
    /// [`EPSILON`].
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Split `polygon` by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Coplanar polygons land in `coplanar_front` when their own plane normal
    /// agrees with this plane's. Spanning polygons are cut along the plane;
    /// fragments that collapse below three vertices or lose their plane are
    /// dropped.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut split_front = Vec::with_capacity(polygon.vertices.len() + 1);
                let mut split_back = Vec::with_capacity(polygon.vertices.len() + 1);

                for i in 0..polygon.vertices.len() {
                    // j wraps around to close the polygon's edge loop
                    let j = (i + 1) % polygon.vertices.len();
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];

                    if ti != BACK {
                        split_front.push(vi.clone());
                    }
                    if ti != FRONT {
                        split_back.push(vi.clone());
                    }

                    // Edge crosses the plane: interpolate the crossing vertex
                    // into both halves. The denominator cannot vanish here,
                    // one endpoint is beyond +EPSILON and the other beyond
                    // -EPSILON.
                    if (ti | tj) == SPANNING {
                        let t = (self.w - self.normal.dot(&vi.pos.coords))
                            / self.normal.dot(&(vj.pos - vi.pos));
                        let v = vi.interpolate(vj, t);
                        split_front.push(v.clone());
                        split_back.push(v);
                    }
                }

                if let Some(p) = Polygon::try_new(split_front, polygon.shared) {
                    front.push(p);
                }
                if let Some(p) = Polygon::try_new(split_back, polygon.shared) {
                    back.push(p);
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
