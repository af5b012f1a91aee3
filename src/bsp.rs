//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations.
//!
//! The tree is a transient computation structure for the boolean operators;
//! solids keep flat polygon lists. All traversals use explicit stacks so that
//! adversarial inputs (O(n)-depth trees) cannot overflow the call stack.

use crate::plane::Plane;
use crate::polygon::Polygon;

/// A BSP tree node, holding the polygons coplanar with its splitting plane
/// plus optional front/back subtrees.
#[derive(Debug, Clone)]
pub struct Node {
    /// Splitting plane, or `None` for an empty node.
    pub plane: Option<Plane>,

    /// Subtree on the positive side of `plane`.
    pub front: Option<Box<Node>>,

    /// Subtree on the negative side of `plane`.
    pub back: Option<Box<Node>>,

    /// Polygons coplanar with `plane`, either orientation.
    pub polygons: Vec<Polygon>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Build (or extend) the tree from the given polygons.
    ///
    /// A node with no plane yet adopts the first inserted polygon's plane.
    /// Polygons coplanar with a node's plane stay on that node regardless of
    /// orientation; front/back fragments descend into lazily created
    /// children.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }

        let mut stack = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = node
                .plane
                .get_or_insert_with(|| polys[0].plane.clone());

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.append(&mut front_parts);
                back.append(&mut back_parts);
            }

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((front_node, front));
            }

            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((back_node, back));
            }
        }
    }

    /// Convert solid space to empty space and vice versa: flip every polygon
    /// and plane, and swap each node's children.
    pub fn invert(&mut self) {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            for p in &mut node.polygons {
                p.flip();
            }
            if let Some(ref mut plane) = node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(front) = node.front.as_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_mut() {
                stack.push(back);
            }
        }
    }

    /// Remove from `polygons` every fragment that lies inside the solid this
    /// tree bounds, returning the surviving fragments.
    ///
    /// An empty tree removes nothing. A node without a back child stands for
    /// solid interior, so fragments behind it are discarded; a node without a
    /// front child passes its front fragments through unchanged.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                front_parts.extend(coplanar_front);
                back_parts.extend(coplanar_back);
                front_polys.append(&mut front_parts);
                back_polys.append(&mut back_parts);
            }

            if let Some(front_node) = &node.front {
                if !front_polys.is_empty() {
                    stack.push((front_node, front_polys));
                }
            } else {
                result.extend(front_polys);
            }

            if let Some(back_node) = &node.back {
                if !back_polys.is_empty() {
                    stack.push((back_node, back_polys));
                }
            }
            // no back child: back_polys are inside the solid, dropped
        }
        result
    }

    /// Remove all polygons in this tree that are inside the other tree's
    /// solid volume.
    pub fn clip_to(&mut self, bsp: &Node) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_mut() {
                stack.push(back);
            }
        }
    }

    /// Flatten the tree back into a polygon list.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::polygon::{Polygon, SharedTag};
    use crate::vertex::Vertex;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn build_single_polygon() {
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.5, 1.0, 0.0), Vector3::z()),
        ];
        let polygon = Polygon::try_new(vertices, SharedTag::default()).unwrap();

        let node = Node::from_polygons(vec![polygon]);
        assert_eq!(node.all_polygons().len(), 1);
        assert!(node.plane.is_some());
    }
}
