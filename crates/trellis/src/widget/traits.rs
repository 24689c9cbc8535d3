//! The `Widget` trait and the values it exchanges with its owner.
//!
//! # Key Types
//!
//! - [`Widget`]: implemented by every element of the tree
//! - [`PaintContext`]: a renderer translated to the widget's origin
//! - [`SizeHint`]: preferred and minimum size

use std::any::Any;

use trellis_core::Object;
use trellis_render::{Color, Point, Rect, Renderer, Size};

use super::base::WidgetBase;
use super::events::WidgetEvent;

/// Handed to [`Widget::paint`].
///
/// The renderer is already translated so that `(0, 0)` is the widget's
/// top-left corner.
pub struct PaintContext<'a> {
    renderer: &'a mut dyn Renderer,
    /// Always at the origin.
    widget_rect: Rect,
}

impl<'a> PaintContext<'a> {
    pub fn new(renderer: &'a mut dyn Renderer, widget_rect: Rect) -> Self {
        Self {
            renderer,
            widget_rect,
        }
    }

    /// Get the renderer.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.widget_rect.size
    }

    /// Fill the whole widget rectangle.
    pub fn fill_background(&mut self, color: Color) {
        let rect = self.widget_rect;
        self.renderer.fill_rect(rect, color);
    }

    /// Draw `text` across the whole widget rectangle.
    pub fn draw_text(&mut self, text: &str, color: Color) {
        let rect = self.widget_rect;
        self.renderer.draw_text(rect, text, color);
    }

    /// Paint `child` translated to its own geometry.
    ///
    /// Hidden children are skipped.
    pub fn paint_child(&mut self, child: &dyn Widget) {
        if !child.is_visible() {
            return;
        }
        let geometry = child.geometry();
        self.renderer.push_offset(geometry.origin);
        let mut child_ctx = PaintContext::new(&mut *self.renderer, child.rect());
        child.paint(&mut child_ctx);
        self.renderer.pop_offset();
    }
}

/// Preferred and minimum sizes a widget reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    pub preferred: Size,
    pub minimum: Option<Size>,
}

impl SizeHint {
    /// Create a hint with the given preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
        }
    }

    /// Create a hint from preferred dimensions.
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(Size::new(width, height))
    }

    /// Set the minimum size (builder pattern).
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }
}

/// The base trait for all widgets.
///
/// # Example
///
/// ```
/// use trellis::widget::{PaintContext, SizeHint, Widget, WidgetBase};
/// use trellis::{init_global_registry, Object, ObjectId};
///
/// struct Swatch {
///     state: WidgetBase,
/// }
///
/// impl Object for Swatch {
///     fn object_id(&self) -> ObjectId {
///         self.state.object_id()
///     }
/// }
///
/// impl Widget for Swatch {
///     fn widget_base(&self) -> &WidgetBase {
///         &self.state
///     }
///
///     fn widget_base_mut(&mut self) -> &mut WidgetBase {
///         &mut self.state
///     }
///
///     fn size_hint(&self) -> SizeHint {
///         SizeHint::from_dimensions(20.0, 20.0)
///     }
///
///     fn paint(&self, ctx: &mut PaintContext<'_>) {
///         ctx.fill_background(trellis::render::Color::RED);
///     }
/// }
///
/// init_global_registry();
/// let swatch = Swatch { state: WidgetBase::new::<Swatch>() };
/// assert!(swatch.is_visible());
/// ```
pub trait Widget: Object + Send + Sync {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// The embedded [`WidgetBase`].
    fn widget_base(&self) -> &WidgetBase;

    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The size this widget would like to have.
    fn size_hint(&self) -> SizeHint;

    /// Paint the widget in local coordinates.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// React to pointer input.
    ///
    /// Returning `true` stops the widget tree from offering the event to
    /// widgets further back.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }

    // =========================================================================
    // Defaults delegating to WidgetBase
    // =========================================================================

    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    fn pos(&self) -> Point {
        self.widget_base().pos()
    }

    fn size(&self) -> Size {
        self.widget_base().size()
    }

    fn rect(&self) -> Rect {
        self.widget_base().rect()
    }

    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.widget_base_mut().set_enabled(enabled);
    }

    fn map_from_parent(&self, point: Point) -> Point {
        self.widget_base().map_from_parent(point)
    }

    /// Hit test in local coordinates.
    fn contains_point(&self, point: Point) -> bool {
        self.widget_base().contains_point(point)
    }

    /// Request a repaint.
    fn update(&mut self) {
        self.widget_base_mut().update();
    }

    fn needs_repaint(&self) -> bool {
        self.widget_base().needs_repaint()
    }
}

/// Downcast a widget trait object to its concrete type.
pub fn widget_cast<T: Widget + 'static>(widget: &dyn Widget) -> Option<&T> {
    (widget as &dyn Any).downcast_ref::<T>()
}

/// Mutable variant of [`widget_cast`].
pub fn widget_cast_mut<T: Widget + 'static>(widget: &mut dyn Widget) -> Option<&mut T> {
    (widget as &mut dyn Any).downcast_mut::<T>()
}
