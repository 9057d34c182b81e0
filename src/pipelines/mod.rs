//! Render pipeline definitions.
//!
//! - `basic` assembles the depth-tested, textured triangle pipeline
//! - `shader` validates the WGSL pair and owns the resulting pipeline together
//!   with its bind group layouts

pub mod basic;
pub mod shader;
