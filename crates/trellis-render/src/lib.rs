//! Geometry, color and renderer abstraction for Trellis.
//!
//! - [`types`]: [`Point`], [`Size`], [`Rect`] and [`Color`] value types
//! - [`Renderer`]: the drawing interface widgets paint through
//! - [`RecordingRenderer`]: a headless renderer that captures [`DrawCommand`]s

pub mod recording;
pub mod renderer;
pub mod types;

pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::{FrameStats, Renderer};
pub use types::{Color, Point, Rect, Size};
