//! A [`Renderer`] that records draw commands instead of rasterizing them.
//!
//! Used by headless harnesses and paint tests. Every recorded rectangle is
//! already translated into surface coordinates.

use crate::renderer::{FrameStats, Renderer};
use crate::types::{Color, Point, Rect, Size};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame cleared.
    Clear { color: Color, viewport: Size },
    /// Solid rectangle.
    FillRect { rect: Rect, color: Color },
    /// Line of text.
    Text { rect: Rect, text: String, color: Color },
}

/// Records draw commands for the current frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    offsets: Vec<Point>,
    in_frame: bool,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last `begin_frame`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The text commands in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&Rect, &str, &Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { rect, text, color } => Some((rect, text.as_str(), color)),
            _ => None,
        })
    }

    fn current_offset(&self) -> Point {
        self.offsets.last().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&self, rect: Rect) -> Rect {
        let offset = self.current_offset();
        rect.offset(offset.x, offset.y)
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        if self.in_frame {
            tracing::warn!(target: "trellis_render::recording", "begin_frame called twice without end_frame");
        }
        self.commands.clear();
        self.offsets.clear();
        self.in_frame = true;
        self.commands.push(DrawCommand::Clear {
            color: clear_color,
            viewport: viewport_size,
        });
    }

    fn end_frame(&mut self) -> FrameStats {
        self.in_frame = false;
        if !self.offsets.is_empty() {
            tracing::warn!(
                target: "trellis_render::recording",
                depth = self.offsets.len(),
                "frame ended with unbalanced offsets"
            );
            self.offsets.clear();
        }
        let draw_calls = self
            .commands
            .iter()
            .filter(|cmd| !matches!(cmd, DrawCommand::Clear { .. }))
            .count();
        FrameStats {
            draw_calls: u32::try_from(draw_calls).unwrap_or(u32::MAX),
        }
    }

    fn push_offset(&mut self, offset: Point) {
        let base = self.current_offset();
        self.offsets.push(base.offset(offset.x, offset.y));
    }

    fn pop_offset(&mut self) {
        if self.offsets.pop().is_none() {
            tracing::warn!(target: "trellis_render::recording", "pop_offset without matching push_offset");
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.translate(rect);
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color) {
        let rect = self.translate(rect);
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_owned(),
            color,
        });
    }
}
