//! Push button widget.
//!
//! A button paints a background and a line of text, and emits `clicked`
//! when a pointer pressed on it is released over it.
//!
//! ```ignore
//! let button = Button::new("OK").with_background_color(Color::DARK_GRAY);
//! button.clicked.connect(|_| println!("clicked"));
//! ```

use trellis_core::{Object, ObjectId, Signal};
use trellis_render::Color;

use super::text_size_hint;
use crate::widget::{
    PaintContext, PointerId, PointerPhase, SizeHint, Widget, WidgetBase, WidgetEvent,
};

/// A clickable button with a text label.
pub struct Button {
    base: WidgetBase,
    text: String,
    /// Text color.
    color: Color,
    background_color: Color,
    /// The pointer currently holding the button down.
    down: Option<PointerId>,

    /// Emitted when a press on the button is released over it.
    pub clicked: Signal<()>,
    pub pressed: Signal<()>,
    pub released: Signal<()>,
}

impl Button {
    /// Create a button with white text on a dark gray background.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_base(WidgetBase::new::<Self>(), text)
    }

    /// Create a button around an existing base.
    ///
    /// Composite widgets use this so the base is registered under their own
    /// type.
    pub fn with_base(base: WidgetBase, text: impl Into<String>) -> Self {
        Self {
            base,
            text: text.into(),
            color: Color::WHITE,
            background_color: Color::DARK_GRAY,
            down: None,
            clicked: Signal::new(),
            pressed: Signal::new(),
            released: Signal::new(),
        }
    }

    /// Set the text color (builder pattern).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder form of `set_background_color`.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text, returning whether it changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        self.base.update();
        true
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

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        if self.background_color != color {
            self.background_color = color;
            self.base.update();
        }
    }

    /// Whether a pointer is holding the button down.
    pub fn is_down(&self) -> bool {
        self.down.is_some()
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    fn handle_press(&mut self, event: &mut WidgetEvent) -> bool {
        if self.down.is_some()
            || !self.base.accepts_input()
            || !self.base.contains_point(event.local_pos())
        {
            return false;
        }
        self.down = Some(event.pointer_id());
        event.base_mut().grab();
        self.base.update();
        self.pressed.emit(());
        true
    }

    fn handle_release(&mut self, event: &WidgetEvent, cancelled: bool) -> bool {
        if self.down != Some(event.pointer_id()) {
            return false;
        }
        self.down = None;
        self.base.update();
        self.released.emit(());
        if !cancelled && self.base.contains_point(event.local_pos()) {
            self.clicked.emit(());
        }
        true
    }
}

impl Object for Button {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for Button {
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
        let background = if self.is_down() {
            self.background_color.with_alpha(self.background_color.a * 0.6)
        } else {
            self.background_color
        };
        ctx.fill_background(background);
        if !self.text.is_empty() {
            ctx.draw_text(&self.text, self.color);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let handled = match event.phase() {
            PointerPhase::Pressed => self.handle_press(event),
            PointerPhase::Released => self.handle_release(event, false),
            PointerPhase::Cancelled => self.handle_release(event, true),
            PointerPhase::Moved => false,
        };
        if handled {
            event.accept();
        }
        handled
    }
}

static_assertions::assert_impl_all!(Button: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use trellis_core::init_global_registry;
    use trellis_render::{Point, Rect};

    use super::*;
    use crate::widget::{KeyboardModifiers, MouseButton, MousePressEvent, MouseReleaseEvent};

    fn setup() {
        init_global_registry();
    }

    fn button() -> Button {
        let mut button = Button::new("OK");
        button.set_geometry(Rect::new(0.0, 0.0, 40.0, 20.0));
        button
    }

    fn press(x: f32, y: f32) -> WidgetEvent {
        WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            Point::new(x, y),
            KeyboardModifiers::NONE,
        ))
    }

    fn release(x: f32, y: f32) -> WidgetEvent {
        WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            Point::new(x, y),
            KeyboardModifiers::NONE,
        ))
    }

    #[test]
    fn test_click_inside() {
        setup();
        let mut button = button();
        let clicks = Arc::new(AtomicUsize::new(0));
        let clicks_clone = clicks.clone();
        button.clicked.connect(move |_| {
            clicks_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut down = press(5.0, 5.0);
        assert!(button.event(&mut down));
        assert!(down.base().is_grab_requested());
        assert!(button.is_down());

        assert!(button.event(&mut release(6.0, 6.0)));
        assert!(!button.is_down());
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        setup();
        let mut button = button();
        let clicks = Arc::new(AtomicUsize::new(0));
        let clicks_clone = clicks.clone();
        button.clicked.connect(move |_| {
            clicks_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.event(&mut press(5.0, 5.0));
        assert!(button.event(&mut release(100.0, 5.0)));
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_disabled_ignores_press() {
        setup();
        let mut button = button();
        button.set_enabled(false);
        assert!(!button.event(&mut press(5.0, 5.0)));
        assert!(!button.is_down());
    }

    #[test]
    fn test_set_text_reports_change() {
        setup();
        let mut button = button();
        assert!(!button.set_text("OK"));
        assert!(button.set_text("Cancel"));
        assert_eq!(button.text(), "Cancel");
    }
}
