//! Data types shared by the world model and the renderer.
//!
//! - `material` holds the texture keys and the block material they imply
//! - `mesh` contains the cube and quad geometry and their GPU buffers
//! - `instance` holds per-instance transform, tint and lighting data
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod instance;
pub mod material;
pub mod mesh;
pub mod texture;
