//! ComboBox widget: a button that pops up a list of options while pressed.
//!
//! Pressing the button opens a single-column popup directly above it with one
//! option per value. While the pointer stays down, the option under it is
//! highlighted; releasing over an option selects it and closes the popup.
//! Releasing anywhere else just closes the popup.
//!
//! The popup stacks options bottom-up: the first value sits in the bottom
//! row, right above the button, and the last value in the top row.
//!
//! Every pointer (the mouse, or each touch) gets its own popup, kept in a
//! per-pointer gesture context for the length of one press/release sequence.
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::widgets::ComboBox;
//! use trellis_render::{Color, Rect};
//!
//! let combo = ComboBox::new(["a", "b", "c"])
//!     .with_geometry(Rect::new(300.0, 290.0, 200.0, 20.0))
//!     .with_highlight_color(Color::new(1.0, 0.2, 0.2, 1.0));
//!
//! combo.text_changed.connect(|text| println!("selected {text}"));
//! ```
//!
//! # Signals
//!
//! - `current_index_changed(usize)`: the committed selection changed
//! - `text_changed(String)`: the displayed text changed (always after
//!   `current_index_changed` when both fire)
//! - `highlight_index_changed(usize)`: a different option is under the pointer

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use trellis_core::logging::targets;
use trellis_core::{Object, ObjectId, ObjectResult, Property, Signal};
use trellis_render::{Color, Point, Rect};

use super::button::Button;
use super::label::Label;
use super::text_size_hint;
use crate::widget::layout::{FillDirection, GridLayout};
use crate::widget::{
    PaintContext, PointerId, PointerPhase, SizeHint, Widget, WidgetBase, WidgetEvent,
};

/// A widget that can represent one option in a combo box popup.
///
/// The combo box recolors options as the pointer moves over them.
pub trait OptionWidget: Widget {
    /// The option's text.
    fn text(&self) -> &str;

    /// The current text color.
    fn color(&self) -> Color;

    /// Change the text color.
    fn set_color(&mut self, color: Color);
}

/// Factory that builds the widget shown for each option.
///
/// Receives the option's text and the combo box's text color.
#[derive(Clone)]
pub struct OptionRenderer(Arc<dyn Fn(&str, Color) -> Box<dyn OptionWidget> + Send + Sync>);

impl OptionRenderer {
    /// Wrap a factory closure.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str, Color) -> Box<dyn OptionWidget> + Send + Sync + 'static,
    {
        Self(Arc::new(factory))
    }

    /// Render options as [`Label`]s.
    pub fn label() -> Self {
        Self::new(|text, color| Box::new(Label::new(text).with_color(color)))
    }

    /// Build the widget for one option.
    pub fn create(&self, text: &str, color: Color) -> Box<dyn OptionWidget> {
        (self.0)(text, color)
    }
}

impl Default for OptionRenderer {
    fn default() -> Self {
        Self::label()
    }
}

impl fmt::Debug for OptionRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OptionRenderer(..)")
    }
}

/// The popup container holding one option widget per value.
pub type OptionGrid = GridLayout<dyn OptionWidget>;

/// Errors reported by [`ComboBox`] setters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboBoxError {
    /// The requested index does not name a value.
    #[error("index {index} is out of range for {len} values")]
    IndexOutOfRange { index: usize, len: usize },
}

/// State for one pointer between press and release.
struct GestureContext {
    /// Parented to the combo box while it exists.
    popup: OptionGrid,
}

/// A button that pops up a list of values to choose from.
pub struct ComboBox {
    /// Text, colors, geometry and painting of the closed combo box.
    button: Button,
    values: Vec<String>,
    option_renderer: OptionRenderer,
    highlight_color: Color,
    current_index: Property<usize>,
    highlight_index: Property<usize>,
    gestures: HashMap<PointerId, GestureContext>,

    /// Emitted after the committed selection changes.
    pub current_index_changed: Signal<usize>,
    /// Emitted when a different option becomes highlighted.
    pub highlight_index_changed: Signal<usize>,
    /// Emitted when the displayed text changes.
    pub text_changed: Signal<String>,
}

impl ComboBox {
    /// Create a combo box showing `values`, with the first one selected.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let text = values.first().cloned().unwrap_or_default();
        Self {
            button: Button::with_base(WidgetBase::new::<Self>(), text),
            values,
            option_renderer: OptionRenderer::default(),
            highlight_color: Color::WHITE,
            current_index: Property::new(0),
            highlight_index: Property::new(0),
            gestures: HashMap::new(),
            current_index_changed: Signal::new(),
            highlight_index_changed: Signal::new(),
            text_changed: Signal::new(),
        }
    }

    /// Set the option factory (builder pattern).
    pub fn with_option_renderer(mut self, renderer: OptionRenderer) -> Self {
        self.option_renderer = renderer;
        self
    }

    /// Set the highlight color (builder pattern).
    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    /// Set the text color (builder pattern).
    pub fn with_color(mut self, color: Color) -> Self {
        self.button.set_color(color);
        self
    }

    /// Builder form of `set_background_color`.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.button.set_background_color(color);
        self
    }

    /// Set the geometry (builder pattern).
    pub fn with_geometry(mut self, rect: Rect) -> Self {
        self.set_geometry(rect);
        self
    }

    /// Select `index` (builder pattern).
    pub fn with_current_index(mut self, index: usize) -> Result<Self, ComboBoxError> {
        self.set_current_index(index)?;
        Ok(self)
    }

    // =========================================================================
    // Values & Selection
    // =========================================================================

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replace the values.
    ///
    /// Open popups are closed without selecting anything. If the current
    /// index no longer names a value it is reset to 0. The text is
    /// recomputed either way.
    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self.cancel_gestures();

        if self.current_index.get() >= self.values.len() && self.current_index.set(0) {
            self.current_index_changed.emit(0);
        }
        self.sync_text();
    }

    /// Index of the committed selection.
    pub fn current_index(&self) -> usize {
        self.current_index.get()
    }

    /// Select the value at `index`, updating the text.
    ///
    /// Emits `current_index_changed` and then `text_changed` for whatever
    /// actually changed. Fails without touching any state if `index` does
    /// not name a value.
    pub fn set_current_index(&mut self, index: usize) -> Result<(), ComboBoxError> {
        if index >= self.values.len() && !(index == 0 && self.values.is_empty()) {
            return Err(ComboBoxError::IndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        if self.current_index.set(index) {
            self.current_index_changed.emit(index);
        }
        self.sync_text();
        Ok(())
    }

    /// The value at the current index, or `None` when there are no values.
    pub fn current_value(&self) -> Option<&str> {
        self.values.get(self.current_index.get()).map(String::as_str)
    }

    /// Index of the option most recently under the pointer.
    ///
    /// Kept after the popup closes.
    pub fn highlight_index(&self) -> usize {
        self.highlight_index.get()
    }

    fn set_highlight_index(&mut self, index: usize) {
        if self.highlight_index.set(index) {
            tracing::trace!(target: targets::COMBO_BOX, index, "highlight changed");
            self.highlight_index_changed.emit(index);
        }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        self.button.text()
    }

    /// Make the text match the current value.
    fn sync_text(&mut self) {
        let text = self.current_value().unwrap_or_default().to_owned();
        if self.button.set_text(text.clone()) {
            self.text_changed.emit(text);
        }
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    pub fn option_renderer(&self) -> &OptionRenderer {
        &self.option_renderer
    }

    /// Replace the option factory. Popups already open keep their options.
    pub fn set_option_renderer(&mut self, renderer: OptionRenderer) {
        self.option_renderer = renderer;
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = color;
    }

    /// Text color, also used for options that are not highlighted.
    pub fn color(&self) -> Color {
        self.button.color()
    }

    pub fn set_color(&mut self, color: Color) {
        self.button.set_color(color);
    }

    pub fn background_color(&self) -> Color {
        self.button.background_color()
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.button.set_background_color(color);
    }

    // =========================================================================
    // Popups
    // =========================================================================

    /// Whether any pointer currently has a popup open.
    pub fn is_popup_open(&self) -> bool {
        !self.gestures.is_empty()
    }

    /// The popup opened by `pointer`, if any.
    pub fn popup_for(&self, pointer: PointerId) -> Option<&OptionGrid> {
        self.gestures.get(&pointer).map(|gesture| &gesture.popup)
    }

    /// Number of popups currently open.
    pub fn open_popup_count(&self) -> usize {
        self.gestures.len()
    }

    /// Build a popup whose bottom edge touches the button's top edge.
    fn build_popup(&self) -> ObjectResult<OptionGrid> {
        let mut popup = OptionGrid::new(self.button.size())
            .with_fill_direction(FillDirection::BottomUp);
        popup.widget_base().set_name("popup");
        let color = self.button.color();
        for value in &self.values {
            let option = self.option_renderer.create(value, color);
            option.widget_base().set_name(value.as_str());
            popup.add_widget(option)?;
        }
        let height = popup.size().height;
        popup.widget_base_mut().set_pos(Point::new(0.0, -height));
        popup.widget_base().set_parent(Some(self.object_id()))?;
        Ok(popup)
    }

    /// Close every open popup without selecting.
    fn cancel_gestures(&mut self) {
        if !self.gestures.is_empty() {
            tracing::debug!(
                target: targets::COMBO_BOX,
                count = self.gestures.len(),
                "cancelling open popups"
            );
            self.gestures.clear();
            self.button.widget_base_mut().update();
        }
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    fn handle_press(&mut self, event: &mut WidgetEvent) -> bool {
        let pointer = event.pointer_id();
        if !self.button.widget_base().accepts_input()
            || !self.button.widget_base().contains_point(event.local_pos())
            || self.values.is_empty()
            || self.gestures.contains_key(&pointer)
        {
            return false;
        }

        let popup = match self.build_popup() {
            Ok(popup) => popup,
            Err(err) => {
                tracing::warn!(target: targets::COMBO_BOX, %err, "failed to build popup");
                return false;
            }
        };

        event.base_mut().grab();
        tracing::debug!(
            target: targets::COMBO_BOX,
            ?pointer,
            options = popup.len(),
            "popup opened"
        );
        self.gestures.insert(pointer, GestureContext { popup });
        self.button.widget_base_mut().update();
        true
    }

    fn handle_move(&mut self, event: &WidgetEvent) -> bool {
        if !event.base().is_grabbed() {
            return false;
        }
        let base_color = self.button.color();
        let highlight_color = self.highlight_color;
        let Some(gesture) = self.gestures.get_mut(&event.pointer_id()) else {
            return false;
        };

        let point = gesture.popup.map_from_parent(event.local_pos());
        let hit = gesture.popup.child_at(point);
        for (index, option) in gesture.popup.children_mut().iter_mut().enumerate() {
            option.set_color(if hit == Some(index) {
                highlight_color
            } else {
                base_color
            });
        }

        if let Some(index) = hit {
            self.set_highlight_index(index);
        }
        self.button.widget_base_mut().update();
        true
    }

    fn handle_release(&mut self, event: &WidgetEvent) -> bool {
        if !event.base().is_grabbed() {
            return false;
        }
        let pointer = event.pointer_id();
        let Some(gesture) = self.gestures.remove(&pointer) else {
            return false;
        };
        self.button.widget_base_mut().update();

        let point = gesture.popup.map_from_parent(event.local_pos());
        let hit = gesture.popup.child_at(point);
        drop(gesture);

        let Some(index) = hit else {
            tracing::debug!(target: targets::COMBO_BOX, ?pointer, "popup closed without selection");
            return false;
        };
        tracing::debug!(target: targets::COMBO_BOX, ?pointer, index, "option selected");
        if let Err(err) = self.set_current_index(index) {
            tracing::warn!(target: targets::COMBO_BOX, %err, "selection no longer valid");
        }
        true
    }

    fn handle_cancel(&mut self, event: &WidgetEvent) -> bool {
        if !event.base().is_grabbed() {
            return false;
        }
        let pointer = event.pointer_id();
        if self.gestures.remove(&pointer).is_none() {
            return false;
        }
        tracing::debug!(target: targets::COMBO_BOX, ?pointer, "popup cancelled");
        self.button.widget_base_mut().update();
        true
    }
}

impl Object for ComboBox {
    fn object_id(&self) -> ObjectId {
        self.button.object_id()
    }
}

impl Widget for ComboBox {
    fn widget_base(&self) -> &WidgetBase {
        self.button.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.button.widget_base_mut()
    }

    /// Wide enough for the longest value.
    fn size_hint(&self) -> SizeHint {
        self.values
            .iter()
            .map(|value| text_size_hint(value.as_str()))
            .max_by(|a, b| a.preferred.width.total_cmp(&b.preferred.width))
            .unwrap_or_else(|| self.button.size_hint())
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        self.button.paint(ctx);
        for gesture in self.gestures.values() {
            let renderer = ctx.renderer();
            renderer.push_offset(gesture.popup.pos());
            let mut popup_ctx = PaintContext::new(&mut *renderer, gesture.popup.rect());
            gesture.popup.paint(&mut popup_ctx);
            renderer.pop_offset();
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let handled = match event.phase() {
            PointerPhase::Pressed => self.handle_press(event),
            PointerPhase::Moved => self.handle_move(event),
            PointerPhase::Released => self.handle_release(event),
            PointerPhase::Cancelled => self.handle_cancel(event),
        };
        if handled {
            event.accept();
        }
        handled
    }
}

static_assertions::assert_impl_all!(ComboBox: Send, Sync);

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use trellis_core::{global_registry, init_global_registry};
    use trellis_render::{RecordingRenderer, Renderer, Size};

    use super::*;
    use crate::widget::{KeyboardModifiers, TouchEvent, TouchPhase, TouchPoint};

    const ROW: f32 = 20.0;

    fn setup() {
        init_global_registry();
    }

    /// `["a", "b", "c"]` at the origin, 200x20, red highlight.
    fn combo() -> ComboBox {
        ComboBox::new(["a", "b", "c"])
            .with_geometry(Rect::new(0.0, 0.0, 200.0, ROW))
            .with_highlight_color(Color::new(1.0, 0.2, 0.2, 1.0))
    }

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32, grabbed: bool) -> WidgetEvent {
        let pos = Point::new(x, y);
        let mut event = WidgetEvent::Touch(TouchEvent::new(
            TouchPoint::new(id, pos, pos, pos, phase),
            KeyboardModifiers::NONE,
        ));
        event.base_mut().set_grabbed(grabbed);
        event
    }

    /// Center of popup row `row` (0 = top) for a popup of `n` rows.
    fn row_y(n: usize, row: usize) -> f32 {
        -(n as f32) * ROW + row as f32 * ROW + ROW / 2.0
    }

    fn texts_top_to_bottom(popup: &OptionGrid) -> Vec<String> {
        popup
            .indices_top_to_bottom()
            .map(|index| popup.children()[index].text().to_owned())
            .collect()
    }

    #[test]
    fn test_text_follows_current_index() {
        setup();
        let mut combo = combo();
        assert_eq!(combo.text(), "a");
        for (index, value) in ["a", "b", "c"].iter().enumerate() {
            combo.set_current_index(index).unwrap();
            assert_eq!(combo.current_index(), index);
            assert_eq!(combo.text(), *value);
        }
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        setup();
        let mut combo = combo();
        combo.set_current_index(1).unwrap();
        assert_eq!(
            combo.set_current_index(3),
            Err(ComboBoxError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(combo.current_index(), 1);
        assert_eq!(combo.text(), "b");
    }

    #[test]
    fn test_index_then_text_signals() {
        setup();
        let mut combo = combo();
        let log = Arc::new(Mutex::new(Vec::new()));
        let index_log = log.clone();
        combo
            .current_index_changed
            .connect(move |index| index_log.lock().push(format!("index {index}")));
        let text_log = log.clone();
        combo
            .text_changed
            .connect(move |text| text_log.lock().push(format!("text {text}")));

        combo.set_current_index(2).unwrap();
        combo.set_current_index(2).unwrap();
        assert_eq!(*log.lock(), vec!["index 2".to_owned(), "text c".to_owned()]);
    }

    #[test]
    fn test_press_opens_popup_above() {
        setup();
        let mut combo = combo();
        let mut press = touch(1, TouchPhase::Started, 10.0, 10.0, false);
        assert!(combo.event(&mut press));
        assert!(press.is_accepted());
        assert!(press.base().is_grab_requested());

        let popup = combo.popup_for(PointerId::Touch(1)).unwrap();
        assert_eq!(combo.open_popup_count(), 1);
        assert_eq!(popup.len(), 3);
        assert_eq!(popup.geometry(), Rect::new(0.0, -60.0, 200.0, 60.0));
        assert_eq!(texts_top_to_bottom(popup), vec!["c", "b", "a"]);
        assert!(popup.children().iter().all(|o| o.color() == Color::WHITE));
        assert_eq!(popup.widget_base().parent_id(), Some(combo.object_id()));
        assert_eq!(combo.widget_base().children_ids(), vec![popup.object_id()]);
    }

    #[test]
    fn test_press_outside_or_disabled_ignored() {
        setup();
        let mut combo = combo();
        assert!(!combo.event(&mut touch(1, TouchPhase::Started, 10.0, 30.0, false)));
        combo.set_enabled(false);
        assert!(!combo.event(&mut touch(2, TouchPhase::Started, 10.0, 10.0, false)));
        assert!(!combo.is_popup_open());
    }

    #[test]
    fn test_empty_values_disable_interaction() {
        setup();
        let mut combo = ComboBox::new(Vec::<String>::new())
            .with_geometry(Rect::new(0.0, 0.0, 200.0, ROW));
        assert_eq!(combo.text(), "");
        assert_eq!(combo.current_value(), None);
        let mut press = touch(1, TouchPhase::Started, 10.0, 10.0, false);
        assert!(!combo.event(&mut press));
        assert!(!press.is_accepted());
        assert!(!combo.is_popup_open());
        assert!(combo.set_current_index(0).is_ok());
        assert!(combo.set_current_index(1).is_err());
    }

    #[test]
    fn test_move_highlights_row() {
        setup();
        let n = 3;
        for row in 0..n {
            let mut combo = combo();
            combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
            combo.event(&mut touch(1, TouchPhase::Moved, 50.0, row_y(n, row), true));

            let expected = n - row - 1;
            assert_eq!(combo.highlight_index(), expected);
            let popup = combo.popup_for(PointerId::Touch(1)).unwrap();
            for (index, option) in popup.children().iter().enumerate() {
                let want = if index == expected {
                    combo.highlight_color()
                } else {
                    Color::WHITE
                };
                assert_eq!(option.color(), want, "row {row}, option {index}");
            }
        }
    }

    #[test]
    fn test_move_off_options_restores_colors() {
        setup();
        let mut combo = combo();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        combo.event(&mut touch(1, TouchPhase::Moved, 50.0, row_y(3, 0), true));
        combo.event(&mut touch(1, TouchPhase::Moved, 500.0, row_y(3, 0), true));

        let popup = combo.popup_for(PointerId::Touch(1)).unwrap();
        assert!(popup.children().iter().all(|o| o.color() == Color::WHITE));
        assert_eq!(combo.highlight_index(), 2);
    }

    #[test]
    fn test_highlight_signal_only_on_change() {
        setup();
        let mut combo = combo();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        combo
            .highlight_index_changed
            .connect(move |&index| seen_clone.lock().push(index));

        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        combo.event(&mut touch(1, TouchPhase::Moved, 50.0, row_y(3, 1), true));
        combo.event(&mut touch(1, TouchPhase::Moved, 60.0, row_y(3, 1), true));
        combo.event(&mut touch(1, TouchPhase::Moved, 60.0, row_y(3, 0), true));
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn test_ungrabbed_move_ignored() {
        setup();
        let mut combo = combo();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        assert!(!combo.event(&mut touch(1, TouchPhase::Moved, 50.0, row_y(3, 0), false)));
        assert_eq!(combo.highlight_index(), 0);
    }

    #[test]
    fn test_release_over_row_commits() {
        setup();
        let n = 3;
        for row in 0..n {
            let mut combo = combo();
            combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
            let mut release = touch(1, TouchPhase::Ended, 50.0, row_y(n, row), true);
            assert!(combo.event(&mut release));
            assert!(release.is_accepted());
            assert_eq!(combo.current_index(), n - row - 1);
            assert_eq!(combo.text(), ["a", "b", "c"][n - row - 1]);
            assert!(!combo.is_popup_open());
            assert!(combo.widget_base().children_ids().is_empty());
        }
    }

    #[test]
    fn test_release_on_popup_edge_commits() {
        setup();
        for (x, y) in [(200.0, -10.0), (10.0, 0.0)] {
            let mut combo = combo();
            combo.set_current_index(2).unwrap();
            combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
            let mut release = touch(1, TouchPhase::Ended, x, y, true);
            assert!(combo.event(&mut release));
            assert_eq!(combo.current_index(), 0);
            assert_eq!(combo.text(), "a");
        }
    }

    #[test]
    fn test_release_outside_keeps_selection() {
        setup();
        let mut combo = combo();
        combo.set_current_index(1).unwrap();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        let mut release = touch(1, TouchPhase::Ended, 10.0, 10.0, true);
        assert!(!combo.event(&mut release));
        assert!(!release.is_accepted());
        assert_eq!(combo.current_index(), 1);
        assert_eq!(combo.text(), "b");
        assert!(!combo.is_popup_open());
    }

    #[test]
    fn test_popup_destroyed_on_close() {
        setup();
        let registry = global_registry().unwrap();
        let mut combo = combo();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        let popup_id = combo.popup_for(PointerId::Touch(1)).unwrap().object_id();
        assert!(registry.contains(popup_id));
        combo.event(&mut touch(1, TouchPhase::Ended, 10.0, 10.0, true));
        assert!(!registry.contains(popup_id));
    }

    #[test]
    fn test_cancel_closes_without_commit() {
        setup();
        let mut combo = combo();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        assert!(combo.event(&mut touch(1, TouchPhase::Cancelled, 50.0, row_y(3, 0), true)));
        assert_eq!(combo.current_index(), 0);
        assert!(!combo.is_popup_open());
    }

    #[test]
    fn test_popups_are_per_pointer() {
        setup();
        let mut combo = combo();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        combo.event(&mut touch(2, TouchPhase::Started, 100.0, 10.0, false));
        assert_eq!(combo.open_popup_count(), 2);

        combo.event(&mut touch(2, TouchPhase::Ended, 50.0, row_y(3, 0), true));
        assert_eq!(combo.current_index(), 2);
        assert!(combo.popup_for(PointerId::Touch(1)).is_some());
        assert!(combo.popup_for(PointerId::Touch(2)).is_none());
    }

    #[test]
    fn test_set_values_cancels_and_clamps() {
        setup();
        let mut combo = combo();
        combo.set_current_index(2).unwrap();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));

        combo.set_values(["x", "y"]);
        assert!(!combo.is_popup_open());
        assert_eq!(combo.current_index(), 0);
        assert_eq!(combo.text(), "x");

        combo.set_values(["p", "q", "r"]);
        assert_eq!(combo.current_index(), 0);
        assert_eq!(combo.text(), "p");

        combo.set_values(Vec::<String>::new());
        assert_eq!(combo.text(), "");
    }

    #[test]
    fn test_custom_option_renderer() {
        setup();
        let renderer = OptionRenderer::new(|text, _color| {
            Box::new(Label::new(text.to_uppercase()).with_color(Color::GRAY))
        });
        let mut combo = combo().with_option_renderer(renderer);
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));
        let popup = combo.popup_for(PointerId::Touch(1)).unwrap();
        assert_eq!(texts_top_to_bottom(popup), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_paint_shows_popup_above_button() {
        setup();
        let mut combo = combo();
        combo.event(&mut touch(1, TouchPhase::Started, 10.0, 10.0, false));

        let mut renderer = RecordingRenderer::new();
        renderer.begin_frame(Color::BLACK, Size::new(200.0, 100.0));
        let mut ctx = PaintContext::new(&mut renderer, combo.rect());
        combo.paint(&mut ctx);

        let texts: Vec<(Rect, String)> = renderer
            .texts()
            .map(|(rect, text, _)| (*rect, text.to_owned()))
            .collect();
        assert_eq!(
            texts,
            vec![
                (Rect::new(0.0, 0.0, 200.0, ROW), "a".to_owned()),
                (Rect::new(0.0, -60.0, 200.0, ROW), "c".to_owned()),
                (Rect::new(0.0, -40.0, 200.0, ROW), "b".to_owned()),
                (Rect::new(0.0, -20.0, 200.0, ROW), "a".to_owned()),
            ]
        );
    }
}
