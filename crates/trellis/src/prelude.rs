//! Prelude module for Trellis.
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Signal/Slot, Property and Object System
// ============================================================================

pub use crate::object::{init_global_registry, Object, ObjectBase, ObjectId};
pub use crate::property::Property;
pub use crate::signal::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    DispatchResult, PaintContext, PointerId, PointerPhase, SizeHint, TouchInputHandler, Widget,
    WidgetBase, WidgetEvent, WidgetTree,
};

// ============================================================================
// Widgets & Layout
// ============================================================================

pub use crate::widget::layout::{FillDirection, GridLayout};
pub use crate::widget::widgets::{Button, ComboBox, Label, OptionRenderer, OptionWidget};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::ComboBoxConfig;

// ============================================================================
// Geometry Types
// ============================================================================

pub use trellis_render::{Color, Point, Rect, Size};
