//! Touch input conversion from winit.
//!
//! [`TouchInputHandler`] turns `winit::event::Touch` values into
//! [`TouchEvent`]s ready for [`WidgetTree::dispatch`](super::WidgetTree::dispatch),
//! and tracks which touches are currently down.
//!
//! ```ignore
//! let mut touches = TouchInputHandler::new();
//!
//! // In the winit event loop:
//! WindowEvent::Touch(touch) => {
//!     let mut event = WidgetEvent::Touch(touches.handle_touch(touch, None));
//!     tree.dispatch(&mut event);
//! }
//! ```

use std::collections::HashMap;

use winit::event::{Force as WinitForce, Touch, TouchPhase as WinitTouchPhase};

use trellis_core::logging::targets;
use trellis_render::Point;

use super::events::{KeyboardModifiers, TouchEvent, TouchForce, TouchPhase, TouchPoint};

/// Converts a winit TouchPhase to a Trellis TouchPhase.
pub fn from_winit_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

/// Converts a winit Force to a Trellis TouchForce.
pub fn from_winit_force(force: WinitForce) -> TouchForce {
    match force {
        WinitForce::Calibrated {
            force,
            max_possible_force,
            altitude_angle,
        } => TouchForce::Calibrated {
            force,
            max_possible_force,
            altitude_angle,
        },
        WinitForce::Normalized(f) => TouchForce::Normalized(f),
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveTouch {
    /// Last reported surface position.
    position: Point,
    start_position: Point,
}

/// Stateful converter for winit touch input.
#[derive(Debug, Default)]
pub struct TouchInputHandler {
    active_touches: HashMap<u64, ActiveTouch>,
    modifiers: KeyboardModifiers,
}

impl TouchInputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the keyboard modifier state attached to produced events.
    pub fn update_modifiers(&mut self, modifiers: KeyboardModifiers) {
        self.modifiers = modifiers;
    }

    pub fn active_touch_count(&self) -> usize {
        self.active_touches.len()
    }

    /// Last position of touch `id`, if it is down.
    pub fn touch_position(&self, id: u64) -> Option<Point> {
        self.active_touches.get(&id).map(|t| t.position)
    }

    /// Where an active touch first went down.
    pub fn touch_start_position(&self, id: u64) -> Option<Point> {
        self.active_touches.get(&id).map(|t| t.start_position)
    }

    /// Converts a winit touch, updating the set of active touches.
    ///
    /// `global_pos` defaults to the window position. The event's `local_pos`
    /// also starts as the window position and is rewritten during dispatch.
    pub fn handle_touch(&mut self, touch: Touch, global_pos: Option<Point>) -> TouchEvent {
        let phase = from_winit_touch_phase(touch.phase);
        let window_pos = Point::new(touch.location.x as f32, touch.location.y as f32);
        let force = touch.force.map(from_winit_force);

        match phase {
            TouchPhase::Started => {
                self.active_touches.insert(
                    touch.id,
                    ActiveTouch {
                        position: window_pos,
                        start_position: window_pos,
                    },
                );
            }
            TouchPhase::Moved => match self.active_touches.get_mut(&touch.id) {
                Some(active) => active.position = window_pos,
                None => {
                    tracing::warn!(target: targets::TOUCH, id = touch.id, "move for unknown touch");
                }
            },
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active_touches.remove(&touch.id);
            }
        }

        let mut point = TouchPoint::new(
            touch.id,
            window_pos,
            window_pos,
            global_pos.unwrap_or(window_pos),
            phase,
        );
        if let Some(force) = force {
            point = point.with_force(force);
        }

        TouchEvent::new(point, self.modifiers)
    }

    /// Forget all active touches.
    pub fn reset(&mut self) {
        self.active_touches.clear();
    }
}
