//! **Constructive Solid Geometry (CSG)** on indexed triangle meshes, built
//! around Boolean operations (*union*, *subtract*, *intersect*) over sets of
//! polygons stored in [BSP](bsp) trees.
//!
//! A renderer hands in a [`mesh::MeshGeometry`] (flat vertex/index buffers,
//! submesh descriptors, world transform), gets back a [`csg::Csg`] solid to
//! combine with others, and finally reconstructs welded mesh geometry:
//!
//! ```
//! use meshcsg::csg::Csg;
//! # fn demo(a: &meshcsg::mesh::MeshGeometry, b: &meshcsg::mesh::MeshGeometry)
//! # -> Result<(), meshcsg::errors::ConversionError> {
//! let solid_a = Csg::from_mesh(a, false)?;
//! let solid_b = Csg::from_mesh(b, false)?;
//! let carved = solid_a.subtract(&solid_b);
//! let geometry = carved.to_mesh(true);
//! # let _ = geometry; Ok(())
//! # }
//! ```
//!
//! # Features
//! - **f64** (default): use f64 as `Real`
//! - **f32**: use f32 as `Real`, conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod bsp;
pub mod convert;
pub mod csg;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod vertex;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use convert::MeshImporter;
pub use csg::Csg;
pub use mesh::MeshGeometry;
pub use vertex::Vertex;
