//! Pointer dragging.
//!
//! Mouse and touch input are folded into one logical pointer: the mouse, or
//! the finger that touched first. While that pointer is held, every move
//! rotates the model about y (horizontal motion) and then about x (vertical
//! motion). The rotation per pixel is scaled by the shorter side of the
//! canvas so a full-width drag feels the same at any resolution.

use cgmath::Rad;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, TouchPhase, WindowEvent},
};

use crate::transform::{Matrix, rotate_x, rotate_y};

/// Which pointer an event came from. Touches are told apart by finger id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    Mouse,
    Touch(u64),
}

/// A window event reduced to what the drag state machine cares about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Pointer, PhysicalPosition<f64>),
    Move(Pointer, PhysicalPosition<f64>),
    Release(Pointer),
}

impl PointerEvent {
    /// Translate a winit event. `cursor` is the last known cursor position,
    /// used for mouse presses which carry no coordinates of their own.
    pub fn from_window_event(
        event: &WindowEvent,
        cursor: PhysicalPosition<f64>,
    ) -> Option<Self> {
        match event {
            WindowEvent::MouseInput { state, .. } => Some(match state {
                ElementState::Pressed => PointerEvent::Press(Pointer::Mouse, cursor),
                ElementState::Released => PointerEvent::Release(Pointer::Mouse),
            }),
            WindowEvent::CursorMoved { position, .. } => {
                Some(PointerEvent::Move(Pointer::Mouse, *position))
            }
            WindowEvent::Touch(touch) => {
                let finger = Pointer::Touch(touch.id);
                Some(match touch.phase {
                    TouchPhase::Started => PointerEvent::Press(finger, touch.location),
                    TouchPhase::Moved => PointerEvent::Move(finger, touch.location),
                    TouchPhase::Ended | TouchPhase::Cancelled => PointerEvent::Release(finger),
                })
            }
            _ => None,
        }
    }
}

/// Drag state. Only the pointer that started a drag can move or end it; a
/// second finger landing mid-drag is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drag {
    Idle,
    Dragging {
        pointer: Pointer,
        last: PhysicalPosition<f64>,
    },
}

#[derive(Debug)]
pub struct InputController {
    drag: Drag,
    offset: (f64, f64),
    sensitivity: f32,
    multiplier: f32,
    cursor: PhysicalPosition<f64>,
}

impl InputController {
    pub fn new(sensitivity: f32, width: u32, height: u32) -> Self {
        Self {
            drag: Drag::Idle,
            offset: (0.0, 0.0),
            sensitivity,
            multiplier: multiplier(sensitivity, width, height),
            cursor: PhysicalPosition::new(0.0, 0.0),
        }
    }

    pub fn drag(&self) -> Drag {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Dragging { .. })
    }

    /// Pixel delta of the most recent move.
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Radians of rotation per dragged pixel.
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn cursor(&self) -> PhysicalPosition<f64> {
        self.cursor
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.multiplier = multiplier(self.sensitivity, width, height);
    }

    pub fn press(&mut self, pointer: Pointer, position: PhysicalPosition<f64>) {
        if pointer == Pointer::Mouse {
            self.cursor = position;
        }
        if matches!(self.drag, Drag::Dragging { pointer: active, .. } if active != pointer) {
            return;
        }
        self.offset = (0.0, 0.0);
        self.drag = Drag::Dragging {
            pointer,
            last: position,
        };
    }

    /// Track the pointer and, while it is the one dragging, rotate `model` by
    /// the delta since its previous position.
    pub fn move_to(&mut self, pointer: Pointer, position: PhysicalPosition<f64>, model: &mut Matrix) {
        if pointer == Pointer::Mouse {
            self.cursor = position;
        }
        let Drag::Dragging { pointer: active, last } = self.drag else {
            return;
        };
        if active != pointer {
            return;
        }
        let dx = position.x - last.x;
        let dy = position.y - last.y;
        self.offset = (dx, dy);
        self.drag = Drag::Dragging {
            pointer,
            last: position,
        };
        rotate_y(model, Rad(dx as f32 * self.multiplier));
        rotate_x(model, Rad(dy as f32 * self.multiplier));
    }

    pub fn release(&mut self, pointer: Pointer) {
        if matches!(self.drag, Drag::Dragging { pointer: active, .. } if active == pointer) {
            self.drag = Drag::Idle;
        }
    }

    pub fn handle(&mut self, event: PointerEvent, model: &mut Matrix) {
        match event {
            PointerEvent::Press(pointer, position) => self.press(pointer, position),
            PointerEvent::Move(pointer, position) => self.move_to(pointer, position, model),
            PointerEvent::Release(pointer) => self.release(pointer),
        }
    }

    /// Feed a winit event. Returns whether it was a pointer event.
    pub fn handle_window_event(&mut self, event: &WindowEvent, model: &mut Matrix) -> bool {
        match PointerEvent::from_window_event(event, self.cursor) {
            Some(pointer_event) => {
                self.handle(pointer_event, model);
                true
            }
            None => false,
        }
    }
}

fn multiplier(sensitivity: f32, width: u32, height: u32) -> f32 {
    sensitivity / width.min(height).max(1) as f32
}
