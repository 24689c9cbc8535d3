//! The drawing seam between widgets and a backend.
//!
//! Widgets paint in their own local coordinates. The widget tree pushes an
//! offset for each widget before calling its `paint`, so a renderer only has
//! to keep a stack of accumulated translations.

use crate::types::{Color, Point, Rect, Size};

/// Counters collected between `begin_frame` and `end_frame`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Fills and text runs; clears are not counted.
    pub draw_calls: u32,
}

/// The 2D rendering interface used by widgets.
///
/// # Frame Lifecycle
///
/// ```ignore
/// renderer.begin_frame(Color::BLACK, Size::new(800.0, 600.0));
///
/// renderer.push_offset(Point::new(10.0, 10.0));
/// renderer.fill_rect(Rect::new(0.0, 0.0, 200.0, 20.0), Color::DARK_GRAY);
/// renderer.draw_text(Rect::new(0.0, 0.0, 200.0, 20.0), "a", Color::WHITE);
/// renderer.pop_offset();
///
/// assert_eq!(renderer.end_frame().draw_calls, 2);
/// ```
pub trait Renderer {
    /// Begin a new frame cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// Finish the current frame.
    fn end_frame(&mut self) -> FrameStats;

    /// Translate subsequent drawing by `offset`, on top of any current offset.
    fn push_offset(&mut self, offset: Point);

    /// Undo the most recent [`push_offset`](Self::push_offset).
    fn pop_offset(&mut self);

    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text inside `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, color: Color);
}
