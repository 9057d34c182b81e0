//! obamoid
//!
//! A textured pyramid on a transparent canvas. It turns slowly on its own and
//! can be grabbed and spun with the mouse or a finger. The same code runs as a
//! native window and as a WASM module drawing into a page's `<canvas>`.
//!
//! High-level modules
//! - `settings`: canvas id, texture location, projection and rotation tuning
//! - `transform`: column-major matrix helpers and the model/view/projection set
//! - `input`: pointer drag state and the drag-to-rotate mapping
//! - `scene`: the state one frame reads (matrices, drag, viewport)
//! - `context`: window surface, device and queue
//! - `data_structures`: mesh buffers and GPU textures
//! - `pipelines`: the WGSL program, its validation and the render pipeline
//! - `resources`: asset fetching and asynchronous texture loading
//! - `render`: per-frame upload and draw
//! - `flow`: the winit event loop tying it together
//!

pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod transform;

pub use error::{ShaderError, TextureError};
pub use flow::{run, run_with};
pub use settings::Settings;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point, called when the module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run().map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
