//! Widget ownership, event dispatch and painting.
//!
//! [`WidgetTree`] owns the top-level widgets of one surface in z-order
//! (back to front) and routes pointer events to them.
//!
//! # Event Flow
//!
//! 1. **Grabbed pointers**: if a widget holds the grab for the event's
//!    pointer, the event goes to that widget only, with
//!    [`EventBase::is_grabbed`](super::EventBase::is_grabbed) set. The grab
//!    is dropped after a release or cancel has been delivered.
//!
//! 2. **Hit testing**: otherwise the event is offered front-to-back to every
//!    visible widget containing the point until one accepts it.
//!
//! 3. **Grab requests**: a widget that calls
//!    [`EventBase::grab`](super::EventBase::grab) while handling a press
//!    becomes the grabber for that pointer. The first request wins.
//!
//! `local_pos` is rewritten into each receiver's coordinates before
//! delivery.
//!
//! # Usage
//!
//! ```ignore
//! let mut tree = WidgetTree::new(Size::new(800.0, 600.0));
//! let id = tree.add(ComboBox::new(values));
//! let result = tree.dispatch(&mut event);
//! let stats = tree.paint(&mut renderer);
//! ```

use std::collections::HashMap;

use trellis_core::logging::targets;
use trellis_core::{ObjectId, PerfSpan};
use trellis_render::{Color, FrameStats, Point, Renderer, Size};

use super::events::{PointerId, PointerPhase, WidgetEvent};
use super::traits::{widget_cast, widget_cast_mut, PaintContext, Widget};

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// A widget handled the event.
    Accepted,
    /// Nobody handled it.
    Ignored,
    /// The pointer's grabber is no longer in the tree.
    WidgetNotFound,
}

impl DispatchResult {
    /// Check if the event was handled.
    pub fn was_handled(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Owns the top-level widgets of a surface and dispatches events to them.
pub struct WidgetTree {
    widgets: HashMap<ObjectId, Box<dyn Widget>>,
    /// Back to front.
    order: Vec<ObjectId>,
    /// Pointer grabs acquired on press.
    grabs: HashMap<PointerId, ObjectId>,
    surface_size: Size,
    background: Color,
}

impl WidgetTree {
    /// Create an empty tree for a surface of `surface_size`.
    pub fn new(surface_size: Size) -> Self {
        Self {
            widgets: HashMap::new(),
            order: Vec::new(),
            grabs: HashMap::new(),
            surface_size,
            background: Color::BLACK,
        }
    }

    /// Set the clear color used by [`paint`](Self::paint) (builder pattern).
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[inline]
    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Number of top-level widgets.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // =========================================================================
    // Ownership
    // =========================================================================

    /// Add a widget on top of the existing ones.
    ///
    /// A widget without a size is given its preferred size.
    pub fn add_widget(&mut self, mut widget: Box<dyn Widget>) -> ObjectId {
        if widget.size().is_empty() {
            let preferred = widget.size_hint().preferred;
            widget.widget_base_mut().set_size(preferred);
        }
        let id = widget.object_id();
        tracing::debug!(target: targets::DISPATCH, ?id, "widget added");
        self.order.push(id);
        self.widgets.insert(id, widget);
        id
    }

    /// Add a concrete widget, returning its id.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> ObjectId {
        self.add_widget(Box::new(widget))
    }

    /// Remove a widget, releasing any grabs it holds.
    pub fn remove_widget(&mut self, id: ObjectId) -> Option<Box<dyn Widget>> {
        let widget = self.widgets.remove(&id)?;
        self.order.retain(|&other| other != id);
        self.grabs.retain(|_, grabber| *grabber != id);
        Some(widget)
    }

    pub fn widget(&self, id: ObjectId) -> Option<&dyn Widget> {
        self.widgets.get(&id).map(|w| w.as_ref())
    }

    pub fn widget_mut(&mut self, id: ObjectId) -> Option<&mut dyn Widget> {
        self.widgets.get_mut(&id).map(|w| w.as_mut())
    }

    /// Borrow a widget as its concrete type.
    pub fn get<T: Widget + 'static>(&self, id: ObjectId) -> Option<&T> {
        self.widget(id).and_then(widget_cast::<T>)
    }

    /// Mutably borrow a widget as its concrete type.
    pub fn get_mut<T: Widget + 'static>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.widget_mut(id).and_then(widget_cast_mut::<T>)
    }

    /// Widget ids back to front.
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// The widget currently holding the grab for `pointer`.
    pub fn grabber(&self, pointer: PointerId) -> Option<ObjectId> {
        self.grabs.get(&pointer).copied()
    }

    /// The front-most visible widget containing `window_pos`.
    pub fn widget_at(&self, window_pos: Point) -> Option<ObjectId> {
        self.order.iter().rev().copied().find(|id| {
            self.widgets
                .get(id)
                .is_some_and(|w| w.is_visible() && w.contains_point(w.map_from_parent(window_pos)))
        })
    }

    /// Dispatch a pointer event.
    #[tracing::instrument(
        skip_all,
        target = "trellis::dispatch",
        level = "trace",
        fields(pointer = ?event.pointer_id(), phase = ?event.phase())
    )]
    pub fn dispatch(&mut self, event: &mut WidgetEvent) -> DispatchResult {
        let pointer = event.pointer_id();
        let phase = event.phase();

        if let Some(grabber) = self.grabber(pointer) {
            let result = self.deliver(grabber, event, true);
            if phase.ends_sequence() {
                self.grabs.remove(&pointer);
                tracing::debug!(target: targets::DISPATCH, ?pointer, ?grabber, "grab released");
            }
            if result == DispatchResult::WidgetNotFound {
                self.grabs.remove(&pointer);
            }
            return result;
        }

        let window_pos = event.window_pos();
        let candidates: Vec<ObjectId> = self
            .order
            .iter()
            .rev()
            .copied()
            .filter(|id| {
                self.widgets
                    .get(id)
                    .is_some_and(|w| w.is_visible() && w.contains_point(w.map_from_parent(window_pos)))
            })
            .collect();

        for id in candidates {
            let result = self.deliver(id, event, false);

            if phase == PointerPhase::Pressed && event.base().is_grab_requested() {
                self.grabs.entry(pointer).or_insert_with(|| {
                    tracing::debug!(target: targets::DISPATCH, ?pointer, grabber = ?id, "grab acquired");
                    id
                });
            }
            if result.was_handled() {
                return result;
            }
        }

        DispatchResult::Ignored
    }

    fn deliver(&mut self, id: ObjectId, event: &mut WidgetEvent, grabbed: bool) -> DispatchResult {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return DispatchResult::WidgetNotFound;
        };
        let local = widget.map_from_parent(event.window_pos());
        event.set_local_pos(local);
        event.base_mut().set_grabbed(grabbed);

        if widget.event(event) || event.is_accepted() {
            DispatchResult::Accepted
        } else {
            DispatchResult::Ignored
        }
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint every visible widget back to front.
    pub fn paint(&mut self, renderer: &mut dyn Renderer) -> FrameStats {
        let _perf = PerfSpan::new("widget_tree.paint");
        renderer.begin_frame(self.background, self.surface_size);
        for id in &self.order {
            if let Some(widget) = self.widgets.get_mut(id) {
                if widget.is_visible() {
                    let geometry = widget.geometry();
                    renderer.push_offset(geometry.origin);
                    let mut ctx = PaintContext::new(&mut *renderer, widget.rect());
                    widget.paint(&mut ctx);
                    renderer.pop_offset();
                }
                widget.widget_base_mut().clear_repaint_flag();
            }
        }
        renderer.end_frame()
    }
}
