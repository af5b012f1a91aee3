//! Errors reported at the mesh → CSG boundary.

/// All the ways an input mesh can fail the indexed-triangle-mesh contract.
///
/// Conversion aborts on the first violation; no geometry is derived from a
/// mesh that fails these checks. Degenerate triangles are *not* an error —
/// they are silently skipped during conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The index buffer length is not a multiple of 3.
    #[error("index count {0} is not a multiple of 3; only triangle lists are supported")]
    NonTriangulated(usize),

    /// An index refers past the end of the vertex buffers.
    #[error("vertex index {index} is out of range (mesh has {vertex_count} vertices)")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// The normal buffer is absent or does not cover every vertex.
    #[error("normal buffer holds {got} floats, expected {expected}; normals are required")]
    MissingNormals { expected: usize, got: usize },

    /// An optional attribute buffer disagrees with the vertex count.
    #[error("{attribute} buffer holds {got} floats, expected {expected}")]
    AttributeLengthMismatch {
        attribute: &'static str,
        expected: usize,
        got: usize,
    },

    /// A submesh descriptor points outside the index buffer.
    #[error("submesh range {start}..{end} exceeds index buffer length {len}")]
    SubMeshOutOfRange { start: u32, end: u32, len: usize },
}
