//! Data that ends up on the GPU.
//!
//! - `geometry` holds the static mesh and its vertex/index buffers
//! - `texture` contains the GPU texture wrapper, the depth buffer and the
//!   placeholder-then-populated scene texture

pub mod geometry;
pub mod texture;
