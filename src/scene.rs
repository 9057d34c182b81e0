//! Scene state shared by the input and render paths.

use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    input::{InputController, PointerEvent},
    settings::Settings,
    transform::{Transforms, orthonormalize},
};

/// Everything that changes between frames: the matrices and the drag state.
///
/// The render loop owns the scene; input handlers and the per-frame update
/// borrow it mutably, the draw call reads it.
#[derive(Debug)]
pub struct Scene {
    pub settings: Settings,
    pub transforms: Transforms,
    pub input: InputController,
    size: (u32, u32),
    frames: u64,
}

impl Scene {
    pub fn new(settings: Settings, width: u32, height: u32) -> Self {
        let transforms = Transforms::new(&settings, width, height);
        let input = InputController::new(settings.drag_sensitivity, width, height);
        Self {
            settings,
            transforms,
            input,
            size: (width, height),
            frames: 0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.transforms.resize(&self.settings, width, height);
        self.input.resize(width, height);
    }

    /// Advance one frame by `dt` of real elapsed time.
    pub fn update(&mut self, dt: Duration) {
        self.transforms
            .auto_rotate(dt, self.settings.auto_rotation_speed);
        self.frames += 1;
        let every = u64::from(self.settings.orthonormalize_every);
        if every > 0 && self.frames % every == 0 {
            orthonormalize(&mut self.transforms.model);
        }
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.input.handle(event, &mut self.transforms.model);
    }

    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        self.input
            .handle_window_event(event, &mut self.transforms.model)
    }
}
