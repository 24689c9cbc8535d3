//! Single-line text widget.
//!
//! ```ignore
//! use trellis::widget::widgets::Label;
//! use trellis_render::Color;
//!
//! let label = Label::new("Hello").with_color(Color::from_rgb8(100, 100, 100));
//! ```

use trellis_core::{Object, ObjectId};
use trellis_render::Color;

use super::combo_box::OptionWidget;
use super::text_size_hint;
use crate::widget::{PaintContext, SizeHint, Widget, WidgetBase};

/// A widget that displays a single line of text.
pub struct Label {
    base: WidgetBase,
    text: String,
    color: Color,
}

impl Label {
    /// Create a white label.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            text: text.into(),
            color: Color::WHITE,
        }
    }

    /// Set the text color (builder pattern).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.base.update();
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.base.update();
        }
    }
}

impl Object for Label {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for Label {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        text_size_hint(&self.text)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        if !self.text.is_empty() {
            ctx.draw_text(&self.text, self.color);
        }
    }
}

impl OptionWidget for Label {
    fn text(&self) -> &str {
        Label::text(self)
    }

    fn color(&self) -> Color {
        Label::color(self)
    }

    fn set_color(&mut self, color: Color) {
        Label::set_color(self, color);
    }
}

static_assertions::assert_impl_all!(Label: Send, Sync);
