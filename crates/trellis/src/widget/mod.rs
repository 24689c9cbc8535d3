//! Widget system for Trellis.
//!
//! - [`Widget`] trait: the base trait for all UI elements
//! - [`WidgetBase`]: common state every widget embeds
//! - [`WidgetEvent`]: mouse and touch input, with pointer grabs
//! - [`WidgetTree`]: owns top-level widgets, routes events and paints them
//!
//! # Creating a Widget
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement [`Object`](trellis_core::Object) and the `Widget` trait
//! 3. Provide `size_hint()` and `paint()`
//! 4. Override `event()` to react to input
//!
//! # Pointer Grabs
//!
//! A widget that calls [`EventBase::grab`] while handling a press receives
//! every later event of that pointer, wherever it moves, until the pointer is
//! released or cancelled. [`EventBase::is_grabbed`] tells the widget that an
//! event was routed to it through its grab.
//!
//! # Coordinate Systems
//!
//! - **Local coordinates**: origin at the widget's top-left corner, y down
//! - **Parent coordinates**: relative to the parent's top-left corner
//! - **Window coordinates**: relative to the surface's top-left corner
//!
//! Top-level widgets in a [`WidgetTree`] are positioned in window
//! coordinates, so their parent coordinates are window coordinates.

mod base;
mod dispatcher;
mod events;
pub mod layout;
mod touch;
mod traits;
pub mod widgets;

pub use base::WidgetBase;
pub use dispatcher::{DispatchResult, WidgetTree};
pub use events::{
    EventBase, KeyboardModifiers, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, PointerId, PointerPhase, TouchEvent, TouchForce, TouchPhase, TouchPoint,
    WidgetEvent,
};
pub use touch::{from_winit_force, from_winit_touch_phase, TouchInputHandler};
pub use traits::{widget_cast, widget_cast_mut, PaintContext, SizeHint, Widget};
