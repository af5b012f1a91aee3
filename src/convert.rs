//! Mesh ⇄ CSG conversion: importing triangle meshes into solids and
//! reconstructing welded mesh geometry from boolean results.

use crate::csg::Csg;
use crate::errors::ConversionError;
use crate::float_types::Real;
use crate::mesh::{MeshGeometry, SideOrientation, SubMesh};
use crate::polygon::{Polygon, SharedTag};
use crate::vertex::Vertex;
use hashbrown::HashMap;
use nalgebra::Matrix4;

/// Converts meshes into [`Csg`] solids, tagging each conversion with a
/// monotonically increasing mesh id so that polygons from several source
/// meshes can be told apart when one combined solid is rebuilt into
/// submeshes.
///
/// Use one importer per group of meshes that will be combined; a fresh
/// importer restarts the ids at zero.
#[derive(Debug, Default)]
pub struct MeshImporter {
    next_mesh_id: u32,
}

impl MeshImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert an indexed triangle mesh into a solid.
    ///
    /// Vertex positions and normals are brought into world space via the
    /// mesh's composed matrix. With `absolute` the world transform stays
    /// baked into the polygons and the solid's cached transform is reset to
    /// identity; otherwise the mesh's transform attributes are cached on the
    /// solid for later reconstruction. Degenerate triangles are skipped
    /// silently.
    pub fn import(
        &mut self,
        mesh: &MeshGeometry,
        absolute: bool,
    ) -> Result<Csg, ConversionError> {
        validate(mesh)?;

        let mesh_id = self.next_mesh_id;
        self.next_mesh_id += 1;

        let matrix = mesh.matrix;
        // Normals transform by the inverse transpose so non-uniform scaling
        // keeps them perpendicular to their faces.
        let normal_matrix = matrix
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or_else(Matrix4::identity);
        let reverse = mesh.side_orientation == SideOrientation::ClockWise;

        let whole_mesh;
        let sub_meshes: &[SubMesh] = if mesh.sub_meshes.is_empty() {
            whole_mesh = [SubMesh {
                index_start: 0,
                index_count: mesh.indices.len() as u32,
                material_index: 0,
            }];
            &whole_mesh
        } else {
            &mesh.sub_meshes
        };

        let mut polygons = Vec::with_capacity(mesh.triangle_count());

        for (submesh_id, sub) in sub_meshes.iter().enumerate() {
            let start = sub.index_start as usize;
            let end = start + sub.index_count as usize;
            let shared = SharedTag {
                submesh_id: submesh_id as u32,
                mesh_id,
                material_index: sub.material_index,
            };

            for tri in mesh.indices[start..end].chunks_exact(3) {
                let (i1, i2) = if reverse {
                    (tri[2], tri[1])
                } else {
                    (tri[1], tri[2])
                };

                let vertices = [tri[0], i1, i2]
                    .iter()
                    .map(|&idx| {
                        let idx = idx as usize;
                        Vertex::with_attributes(
                            matrix.transform_point(&mesh.position(idx)),
                            normal_matrix.transform_vector(&mesh.normal(idx)),
                            mesh.uv(idx),
                            mesh.color(idx),
                        )
                    })
                    .collect();

                // degenerate triangles yield no plane and are dropped here
                if let Some(polygon) = Polygon::try_new(vertices, shared) {
                    polygons.push(polygon);
                }
            }
        }

        let mut csg = Csg::from_polygons(polygons);
        if !absolute {
            csg.matrix = mesh.matrix;
            csg.position = mesh.position;
            csg.rotation = mesh.rotation;
            csg.rotation_quaternion = mesh.rotation_quaternion;
            csg.scaling = mesh.scaling;
        }
        Ok(csg)
    }
}

fn validate(mesh: &MeshGeometry) -> Result<(), ConversionError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(ConversionError::NonTriangulated(mesh.indices.len()));
    }

    let vertex_count = mesh.vertex_count();
    if mesh.normals.len() != mesh.positions.len() {
        return Err(ConversionError::MissingNormals {
            expected: mesh.positions.len(),
            got: mesh.normals.len(),
        });
    }
    if let Some(uvs) = &mesh.uvs {
        if uvs.len() != vertex_count * 2 {
            return Err(ConversionError::AttributeLengthMismatch {
                attribute: "uv",
                expected: vertex_count * 2,
                got: uvs.len(),
            });
        }
    }
    if let Some(colors) = &mesh.colors {
        if colors.len() != vertex_count * 4 {
            return Err(ConversionError::AttributeLengthMismatch {
                attribute: "color",
                expected: vertex_count * 4,
                got: colors.len(),
            });
        }
    }

    for sub in &mesh.sub_meshes {
        let end = sub.index_start as u64 + sub.index_count as u64;
        if end > mesh.indices.len() as u64 {
            return Err(ConversionError::SubMeshOutOfRange {
                start: sub.index_start,
                end: end as u32,
                len: mesh.indices.len(),
            });
        }
    }

    for &index in &mesh.indices {
        if index as usize >= vertex_count {
            return Err(ConversionError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

/// Fixed-point quantization scale for the weld key. Tighter than EPSILON so
/// welding only merges corners the boolean math produced as exact
/// duplicates.
const QUANTIZATION_SCALE: Real = 1e8;

fn quantize(value: Real) -> i64 {
    (value * QUANTIZATION_SCALE).round() as i64
}

/// Structural weld key: two corners merge only when position, normal, uv,
/// and color all agree under quantization.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct WeldKey {
    pos: [i64; 3],
    normal: [i64; 3],
    uv: Option<[i64; 2]>,
    color: Option<[i64; 4]>,
}

impl Csg {
    /// One-shot conversion of a single mesh; see [`MeshImporter::import`].
    pub fn from_mesh(mesh: &MeshGeometry, absolute: bool) -> Result<Csg, ConversionError> {
        MeshImporter::new().import(mesh, absolute)
    }

    /// Rebuild welded, fan-triangulated mesh geometry from this solid, in
    /// the solid's local frame (the cached transform is inverted out of the
    /// polygon vertices).
    ///
    /// With `keep_sub_meshes` the polygons are stably ordered by
    /// `(mesh_id, submesh_id)` and contiguous index spans are emitted per
    /// source submesh, offsetting material indices per source mesh so the
    /// material tables of several imported meshes do not collide. Otherwise
    /// a single submesh with material 0 covers everything.
    pub fn build_geometry(&self, keep_sub_meshes: bool) -> MeshGeometry {
        let inverse = self.matrix.try_inverse().unwrap_or_else(Matrix4::identity);
        // Undo the import-time inverse-transpose normal transform.
        let normal_inverse = self.matrix.transpose();

        let mut polygons = self.polygons.clone();
        if keep_sub_meshes {
            polygons.sort_by_key(|p| (p.shared.mesh_id, p.shared.submesh_id));
        }
        let material_offsets = material_offsets(&polygons);

        let has_uv = polygons
            .iter()
            .any(|p| p.vertices.iter().any(|v| v.uv.is_some()));
        let has_color = polygons
            .iter()
            .any(|p| p.vertices.iter().any(|v| v.color.is_some()));

        let mut positions: Vec<Real> = Vec::new();
        let mut normals: Vec<Real> = Vec::new();
        let mut uvs: Vec<Real> = Vec::new();
        let mut colors: Vec<Real> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut sub_meshes: Vec<SubMesh> = Vec::new();
        let mut weld: HashMap<WeldKey, u32> = HashMap::new();

        let mut current_span: Option<(u32, u32)> = None;
        let mut span_start = 0u32;
        let mut span_material = 0i32;

        for polygon in &polygons {
            if keep_sub_meshes {
                let span_key = (polygon.shared.mesh_id, polygon.shared.submesh_id);
                if current_span != Some(span_key) {
                    if current_span.is_some() {
                        sub_meshes.push(SubMesh {
                            index_start: span_start,
                            index_count: indices.len() as u32 - span_start,
                            material_index: span_material,
                        });
                    }
                    span_start = indices.len() as u32;
                    span_material = polygon.shared.material_index
                        + material_offsets
                            .get(&polygon.shared.mesh_id)
                            .copied()
                            .unwrap_or(0);
                    current_span = Some(span_key);
                }
            }

            // fan triangulation: [0, j-1, j]
            for j in 2..polygon.vertices.len() {
                for &k in &[0, j - 1, j] {
                    let vertex = &polygon.vertices[k];
                    let pos = inverse.transform_point(&vertex.pos);
                    let normal = normal_inverse.transform_vector(&vertex.normal);

                    let key = WeldKey {
                        pos: [quantize(pos.x), quantize(pos.y), quantize(pos.z)],
                        normal: [
                            quantize(normal.x),
                            quantize(normal.y),
                            quantize(normal.z),
                        ],
                        uv: vertex.uv.map(|uv| [quantize(uv.x), quantize(uv.y)]),
                        color: vertex.color.map(|c| {
                            [quantize(c.x), quantize(c.y), quantize(c.z), quantize(c.w)]
                        }),
                    };

                    let index = *weld.entry(key).or_insert_with(|| {
                        positions.extend([pos.x, pos.y, pos.z]);
                        normals.extend([normal.x, normal.y, normal.z]);
                        if has_uv {
                            let uv = vertex.uv.unwrap_or_else(nalgebra::Vector2::zeros);
                            uvs.extend([uv.x, uv.y]);
                        }
                        if has_color {
                            let c = vertex.color.unwrap_or_else(nalgebra::Vector4::zeros);
                            colors.extend([c.x, c.y, c.z, c.w]);
                        }
                        (positions.len() / 3 - 1) as u32
                    });
                    indices.push(index);
                }
            }
        }

        if keep_sub_meshes {
            if current_span.is_some() {
                sub_meshes.push(SubMesh {
                    index_start: span_start,
                    index_count: indices.len() as u32 - span_start,
                    material_index: span_material,
                });
            }
        } else {
            sub_meshes.push(SubMesh {
                index_start: 0,
                index_count: indices.len() as u32,
                material_index: 0,
            });
        }

        MeshGeometry {
            positions,
            normals,
            uvs: has_uv.then_some(uvs),
            colors: has_color.then_some(colors),
            indices,
            sub_meshes,
            ..MeshGeometry::default()
        }
    }

    /// [`build_geometry`](Csg::build_geometry) plus re-application of the
    /// cached transform attributes, so the surrounding scene can place the
    /// result exactly where the boolean math assumed it was.
    pub fn to_mesh(&self, keep_sub_meshes: bool) -> MeshGeometry {
        let mut geometry = self.build_geometry(keep_sub_meshes);
        geometry.position = self.position;
        geometry.rotation = self.rotation;
        geometry.rotation_quaternion = self.rotation_quaternion;
        geometry.scaling = self.scaling;
        geometry.matrix = self.matrix;
        geometry
    }
}

/// Cumulative material-index offset per source mesh, in ascending mesh-id
/// order: each mesh's materials start after the previous mesh's highest
/// slot.
fn material_offsets(polygons: &[Polygon]) -> HashMap<u32, i32> {
    let mut max_material: HashMap<u32, i32> = HashMap::new();
    for p in polygons {
        max_material
            .entry(p.shared.mesh_id)
            .and_modify(|m| *m = (*m).max(p.shared.material_index))
            .or_insert(p.shared.material_index);
    }

    let mut mesh_ids: Vec<u32> = max_material.keys().copied().collect();
    mesh_ids.sort_unstable();

    let mut offsets = HashMap::new();
    let mut acc = 0i32;
    for id in mesh_ids {
        offsets.insert(id, acc);
        acc += max_material[&id] + 1;
    }
    offsets
}
