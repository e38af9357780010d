//! CPU-side mesh generation.
//!
//! Meshes are generated once, uploaded once and never mutated.

mod circle_mesh;

pub use circle_mesh::{CircleMesh, CircleMeshDesc, MeshVertex};
