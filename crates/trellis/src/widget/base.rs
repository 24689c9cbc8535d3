//! State shared by every widget.
//!
//! `WidgetBase` holds the state every widget shares: its object identity,
//! geometry, visibility, enabled state and repaint flag.

use trellis_core::{Object, ObjectBase, ObjectId, ObjectResult, Signal};
use trellis_render::{Point, Rect, Size};

/// Identity, geometry and flags embedded in every widget.
///
/// Widget implementations include this as a field and return it from
/// [`Widget::widget_base`](super::Widget::widget_base).
///
/// Geometry is expressed in the parent's coordinate space; for top-level
/// widgets that is the surface.
pub struct WidgetBase {
    /// Registry handle; the widget's `ObjectId` comes from here.
    object_base: ObjectBase,

    /// Position relative to the parent, and size.
    geometry: Rect,

    visible: bool,

    /// Whether the widget accepts input.
    enabled: bool,

    needs_repaint: bool,

    /// Fires with the new geometry after any position or size change.
    pub geometry_changed: Signal<Rect>,
}

impl WidgetBase {
    /// Register a new widget of type `T` with empty geometry.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            geometry: Rect::ZERO,
            visible: true,
            enabled: true,
            needs_repaint: true,
            geometry_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Name used by `find_child_by_name` and tree dumps.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    pub fn parent_id(&self) -> Option<ObjectId> {
        self.object_base.parent()
    }

    /// Attach to `parent` in the object tree, or detach with `None`.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object_base.set_parent(parent)
    }

    /// Ids of attached children, oldest first.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object_base.children()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_base.find_child_by_name(name)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position in the parent's coordinates, and size.
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry, emitting `geometry_changed` if it changed.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.needs_repaint = true;
            self.geometry_changed.emit(rect);
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Move without resizing.
    pub fn set_pos(&mut self, pos: Point) {
        self.set_geometry(Rect {
            origin: pos,
            size: self.geometry.size,
        });
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Resize, keeping the top-left corner.
    pub fn set_size(&mut self, size: Size) {
        self.set_geometry(Rect {
            origin: self.geometry.origin,
            size,
        });
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.geometry.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.geometry.size.height
    }

    /// The widget's local coordinate space: `(0, 0)` with the widget's size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.geometry.size.width, self.geometry.size.height)
    }

    // =========================================================================
    // Visibility & Enabled State
    // =========================================================================

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.needs_repaint = true;
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.needs_repaint = true;
        }
    }

    /// Whether the widget should react to input at all.
    #[inline]
    pub fn accepts_input(&self) -> bool {
        self.visible && self.enabled
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Mark the widget dirty.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    /// Called by the tree once the widget has been painted.
    pub(crate) fn clear_repaint_flag(&mut self) {
        self.needs_repaint = false;
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Local point to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        point.offset(self.geometry.origin.x, self.geometry.origin.y)
    }

    /// Parent point to local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        point.offset(-self.geometry.origin.x, -self.geometry.origin.y)
    }

    /// Hit test against the local rectangle.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}
