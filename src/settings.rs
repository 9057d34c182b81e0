//! Tunable constants of the demo.
//!
//! Everything the render loop, the transform state and the input controller need
//! to know about the scene lives in [`Settings`]. The defaults reproduce the
//! reference look: a 40° perspective, the camera three units back and the mesh
//! lifted slightly so its apex sits near the centre of the canvas.

use cgmath::Deg;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Id of the `<canvas>` element used on the web.
    pub canvas_id: &'static str,
    /// Title of the native window.
    pub title: &'static str,
    /// Texture image, relative to the page (web) or to `assets/` (native).
    pub texture_url: &'static str,
    /// Vertical field of view.
    pub fov: Deg<f32>,
    pub z_near: f32,
    pub z_far: f32,
    /// Distance of the camera from the origin along -z.
    pub camera_distance: f32,
    /// Fixed translation of the model along +y.
    pub model_lift: f32,
    /// Auto-rotation about y in radians per elapsed millisecond.
    pub auto_rotation_speed: f32,
    /// Radians of rotation for a drag across the shorter canvas side,
    /// before dividing by that side's length in pixels.
    pub drag_sensitivity: f32,
    pub clear_colour: wgpu::Color,
    /// Re-orthonormalize the model rotation every n frames. `0` disables it.
    pub orthonormalize_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_id: "obamoid",
            title: "obamoid",
            texture_url: "obamoid.png",
            fov: Deg(40.0),
            z_near: 1.0,
            z_far: 10.0,
            camera_distance: 3.0,
            model_lift: 0.3,
            auto_rotation_speed: 0.001,
            drag_sensitivity: 5.0,
            clear_colour: wgpu::Color::TRANSPARENT,
            orthonormalize_every: 0,
        }
    }
}
