//! The CSG solid and its boolean operators.
//!
//! A [`Csg`] is a flat polygon list plus the transform attributes cached from
//! the source mesh; the BSP tree only exists for the duration of an
//! operation. The clip/invert sequences below are the canonical BSP CSG
//! recipe: the double clip handles fragments straddling the other solid's
//! boundary, and the invert pair keeps boundary-coincident polygons with
//! correctly oriented normals.

use crate::bsp::Node;
use crate::float_types::Real;
use crate::polygon::Polygon;
use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// A solid: flat list of polygons plus the cached source-mesh transform.
#[derive(Debug, Clone)]
pub struct Csg {
    pub polygons: Vec<Polygon>,

    pub matrix: Matrix4<Real>,
    pub position: Vector3<Real>,
    pub rotation: Vector3<Real>,
    pub rotation_quaternion: Option<Unit<Quaternion<Real>>>,
    pub scaling: Vector3<Real>,
}

impl Default for Csg {
    fn default() -> Self {
        Self::new()
    }
}

impl Csg {
    /// Returns an empty solid with an identity transform.
    pub fn new() -> Self {
        Csg {
            polygons: Vec::new(),
            matrix: Matrix4::identity(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            rotation_quaternion: None,
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Build a solid from an existing polygon list. The transform attributes
    /// start at identity.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Csg {
            polygons,
            ..Csg::new()
        }
    }

    /// Consume the solid, yielding its polygons.
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    pub(crate) fn copy_transform_attributes(&mut self, other: &Csg) {
        self.matrix = other.matrix;
        self.position = other.position;
        self.rotation = other.rotation;
        self.rotation_quaternion = other.rotation_quaternion;
        self.scaling = other.scaling;
    }

    /// Return a new solid covering the volume of both operands. The result
    /// carries `self`'s transform attributes; neither operand is modified.
    pub fn union(&self, other: &Csg) -> Csg {
        let mut a = Node::from_polygons(self.polygons.clone());
        let mut b = Node::from_polygons(other.polygons.clone());

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());

        let mut csg = Csg::from_polygons(a.all_polygons());
        csg.copy_transform_attributes(self);
        csg
    }

    /// Return a new solid covering `self`'s volume with `other`'s removed.
    pub fn subtract(&self, other: &Csg) -> Csg {
        let mut a = Node::from_polygons(self.polygons.clone());
        let mut b = Node::from_polygons(other.polygons.clone());

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        a.invert();

        let mut csg = Csg::from_polygons(a.all_polygons());
        csg.copy_transform_attributes(self);
        csg
    }

    /// Return a new solid covering the volume common to both operands.
    pub fn intersect(&self, other: &Csg) -> Csg {
        let mut a = Node::from_polygons(self.polygons.clone());
        let mut b = Node::from_polygons(other.polygons.clone());

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.all_polygons());
        a.invert();

        let mut csg = Csg::from_polygons(a.all_polygons());
        csg.copy_transform_attributes(self);
        csg
    }

    /// Union with `other`, rebuilding `self`'s polygon list in place. Takes
    /// the right-hand solid by value: in-place variants trade the pure
    /// variants' defensive clones for fewer allocations.
    pub fn union_mut(&mut self, other: Csg) {
        let mut a = Node::from_polygons(std::mem::take(&mut self.polygons));
        let mut b = Node::from_polygons(other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());

        self.polygons = a.all_polygons();
    }

    /// Subtract `other`, rebuilding `self`'s polygon list in place.
    pub fn subtract_mut(&mut self, other: Csg) {
        let mut a = Node::from_polygons(std::mem::take(&mut self.polygons));
        let mut b = Node::from_polygons(other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        a.invert();

        self.polygons = a.all_polygons();
    }

    /// Intersect with `other`, rebuilding `self`'s polygon list in place.
    pub fn intersect_mut(&mut self, other: Csg) {
        let mut a = Node::from_polygons(std::mem::take(&mut self.polygons));
        let mut b = Node::from_polygons(other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.all_polygons());
        a.invert();

        self.polygons = a.all_polygons();
    }

    /// Return this solid turned inside out (every polygon flipped). No BSP
    /// tree is involved.
    pub fn inverse(&self) -> Csg {
        let mut csg = self.clone();
        csg.inverse_mut();
        csg
    }

    /// Turn this solid inside out in place.
    pub fn inverse_mut(&mut self) {
        for p in &mut self.polygons {
            p.flip();
        }
    }
}
