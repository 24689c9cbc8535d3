//! Combo box gestures driven through a full widget tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use trellis::logging::targets;
use trellis::prelude::*;
use trellis::render::RecordingRenderer;
use trellis::widget::{KeyboardModifiers, MouseButton, MouseMoveEvent, MousePressEvent};
use trellis::widget::{MouseReleaseEvent, TouchEvent, TouchPhase, TouchPoint};
use trellis::{ObjectTreeDebug, TreeFormatOptions, TreeStyle};

const SURFACE: Size = Size::new(800.0, 600.0);

/// Center of popup row `row` (0 = top) for the combo at y = 290.
fn row_y(row: usize) -> f32 {
    230.0 + row as f32 * 20.0 + 10.0
}

fn setup() -> (WidgetTree, ObjectId) {
    init_global_registry();
    let mut tree = WidgetTree::new(SURFACE);
    let combo = ComboBox::new(["a", "b", "c"])
        .with_geometry(Rect::from_center(Point::new(400.0, 300.0), Size::new(200.0, 20.0)))
        .with_highlight_color(Color::new(1.0, 0.2, 0.2, 1.0));
    let id = tree.add(combo);
    (tree, id)
}

fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> WidgetEvent {
    let pos = Point::new(x, y);
    WidgetEvent::Touch(TouchEvent::new(
        TouchPoint::new(id, pos, pos, pos, phase),
        KeyboardModifiers::NONE,
    ))
}

fn combo(tree: &WidgetTree, id: ObjectId) -> &ComboBox {
    tree.get::<ComboBox>(id).unwrap()
}

#[test]
fn test_select_scenario() {
    let (mut tree, id) = setup();
    let highlights = Arc::new(Mutex::new(Vec::new()));
    let texts = Arc::new(Mutex::new(Vec::new()));
    {
        let combo = combo(&tree, id);
        let highlights = highlights.clone();
        combo
            .highlight_index_changed
            .connect(move |&index| highlights.lock().push(index));
        let texts = texts.clone();
        combo.text_changed.connect(move |text| texts.lock().push(text.clone()));
    }

    let result = tree.dispatch(&mut touch(1, TouchPhase::Started, 400.0, 300.0));
    assert_eq!(result, DispatchResult::Accepted);
    assert_eq!(tree.grabber(PointerId::Touch(1)), Some(id));

    let popup = combo(&tree, id).popup_for(PointerId::Touch(1)).unwrap();
    let rows: Vec<&str> = popup
        .indices_top_to_bottom()
        .map(|index| popup.children()[index].text())
        .collect();
    assert_eq!(rows, vec!["c", "b", "a"]);

    tree.dispatch(&mut touch(1, TouchPhase::Moved, 400.0, row_y(0)));
    assert_eq!(combo(&tree, id).highlight_index(), 2);

    let result = tree.dispatch(&mut touch(1, TouchPhase::Ended, 400.0, row_y(2)));
    assert_eq!(result, DispatchResult::Accepted);
    assert_eq!(tree.grabber(PointerId::Touch(1)), None);

    let combo = combo(&tree, id);
    assert_eq!(combo.current_index(), 0);
    assert_eq!(combo.text(), "a");
    assert!(!combo.is_popup_open());
    assert_eq!(*highlights.lock(), vec![2]);
    assert!(texts.lock().is_empty());
}

#[test]
fn test_grab_keeps_events_from_widget_underneath() {
    let (mut tree, combo_id) = setup();
    let pressed = Arc::new(AtomicUsize::new(0));
    let mut button = Button::new("under");
    button.set_geometry(Rect::new(300.0, 200.0, 200.0, 60.0));
    let pressed_clone = pressed.clone();
    button.pressed.connect(move |_| {
        pressed_clone.fetch_add(1, Ordering::SeqCst);
    });
    tree.add(button);

    tree.dispatch(&mut touch(7, TouchPhase::Started, 400.0, 300.0));

    let far = tree.dispatch(&mut touch(7, TouchPhase::Moved, 700.0, 500.0));
    assert_eq!(far, DispatchResult::Accepted);
    tree.dispatch(&mut touch(7, TouchPhase::Moved, 400.0, row_y(1)));
    tree.dispatch(&mut touch(7, TouchPhase::Ended, 400.0, row_y(0)));

    assert_eq!(pressed.load(Ordering::SeqCst), 0);
    assert_eq!(combo(&tree, combo_id).current_index(), 2);
    assert_eq!(combo(&tree, combo_id).text(), "c");
}

#[test]
fn test_release_outside_is_idempotent() {
    let (mut tree, id) = setup();
    tree.dispatch(&mut touch(1, TouchPhase::Started, 400.0, 300.0));
    tree.dispatch(&mut touch(1, TouchPhase::Moved, 400.0, row_y(1)));
    let result = tree.dispatch(&mut touch(1, TouchPhase::Ended, 50.0, 50.0));

    assert_eq!(result, DispatchResult::Ignored);
    assert_eq!(tree.grabber(PointerId::Touch(1)), None);
    let combo = combo(&tree, id);
    assert_eq!(combo.current_index(), 0);
    assert_eq!(combo.text(), "a");
    assert!(!combo.is_popup_open());
}

#[test]
fn test_empty_combo_lets_press_through() {
    init_global_registry();
    let mut tree = WidgetTree::new(SURFACE);
    let id = tree.add(
        ComboBox::new(Vec::<String>::new()).with_geometry(Rect::new(0.0, 0.0, 200.0, 20.0)),
    );
    let result = tree.dispatch(&mut touch(1, TouchPhase::Started, 10.0, 10.0));
    assert_eq!(result, DispatchResult::Ignored);
    assert_eq!(tree.grabber(PointerId::Touch(1)), None);
    assert!(!combo(&tree, id).is_popup_open());
}

#[test]
fn test_mouse_gesture() {
    let (mut tree, id) = setup();
    let modifiers = KeyboardModifiers::NONE;
    tree.dispatch(&mut WidgetEvent::MousePress(MousePressEvent::new(
        MouseButton::Left,
        Point::new(350.0, 295.0),
        modifiers,
    )));
    assert!(combo(&tree, id).popup_for(PointerId::Mouse).is_some());

    tree.dispatch(&mut WidgetEvent::MouseMove(MouseMoveEvent::new(
        Point::new(350.0, row_y(1)),
        1,
        modifiers,
    )));
    tree.dispatch(&mut WidgetEvent::MouseRelease(MouseReleaseEvent::new(
        MouseButton::Left,
        Point::new(350.0, row_y(1)),
        modifiers,
    )));

    assert_eq!(combo(&tree, id).current_index(), 1);
    assert_eq!(combo(&tree, id).text(), "b");
}

#[test]
fn test_popup_in_object_tree_and_paint() {
    let (mut tree, id) = setup();
    combo(&tree, id).widget_base().set_name("combo");
    tree.dispatch(&mut touch(1, TouchPhase::Started, 400.0, 300.0));

    let debug = ObjectTreeDebug::with_options(TreeFormatOptions {
        style: TreeStyle::Ascii,
        ..TreeFormatOptions::minimal()
    });
    assert_eq!(
        debug.format_subtree(id).unwrap(),
        "combo\n`-- popup\n    +-- a\n    +-- b\n    `-- c\n"
    );

    let mut renderer = RecordingRenderer::new();
    tree.paint(&mut renderer);
    let texts: Vec<(f32, String)> = renderer
        .texts()
        .map(|(rect, text, _)| (rect.top(), text.to_owned()))
        .collect();
    assert_eq!(
        texts,
        vec![
            (290.0, "a".to_owned()),
            (230.0, "c".to_owned()),
            (250.0, "b".to_owned()),
            (270.0, "a".to_owned()),
        ]
    );

    tree.dispatch(&mut touch(1, TouchPhase::Cancelled, 400.0, 300.0));
    assert_eq!(debug.format_subtree(id).unwrap(), "combo\n");
}

/// Records the target of every event it sees.
struct TargetLog(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> Layer<S> for TargetLog {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.0.lock().push(event.metadata().target().to_owned());
    }
}

#[test]
fn test_gesture_logs_under_published_targets() {
    let (mut tree, _) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(TargetLog(seen.clone()));

    tracing::subscriber::with_default(subscriber, || {
        tree.dispatch(&mut touch(1, TouchPhase::Started, 400.0, 300.0));
        tree.dispatch(&mut touch(1, TouchPhase::Ended, 400.0, row_y(1)));
    });

    let seen = seen.lock();
    assert!(seen.iter().any(|target| target == targets::DISPATCH));
    assert!(seen.iter().any(|target| target == targets::COMBO_BOX));
    assert!(seen.iter().all(|target| target.starts_with("trellis")));
}
