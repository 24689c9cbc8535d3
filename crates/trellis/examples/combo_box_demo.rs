//! Combo Box Demo
//!
//! Builds a surface with one combo box centred in it, connects printing
//! slots, then replays a scripted touch gesture through the same path a
//! winit event loop would use: `winit::event::Touch` -> `TouchInputHandler`
//! -> `WidgetTree::dispatch`.
//!
//! Run with: cargo run -p trellis --example combo_box_demo [config.toml]
//!
//! Set `RUST_LOG=trellis=debug` to watch popups open and close.

use std::error::Error;

use trellis::prelude::*;
use trellis::render::RecordingRenderer;
use trellis::{ObjectTreeDebug, TreeFormatOptions};
use winit::dpi::PhysicalPosition;
use winit::event::{DeviceId, Touch, TouchPhase};

const SURFACE: Size = Size::new(800.0, 600.0);

/// `["a", "b", "c"]`, 200x20, centred, red highlight.
fn default_config() -> ComboBoxConfig {
    let size = Size::new(200.0, 20.0);
    let rect = Rect::from_center(Point::new(SURFACE.width / 2.0, SURFACE.height / 2.0), size);
    ComboBoxConfig {
        values: vec!["a".into(), "b".into(), "c".into()],
        highlight_color: [1.0, 0.2, 0.2, 1.0],
        geometry: Some(trellis::GeometryConfig {
            x: rect.left(),
            y: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }),
        ..Default::default()
    }
}

fn winit_touch(id: u64, phase: TouchPhase, pos: Point) -> Touch {
    // SAFETY: the dummy id never reaches a platform backend.
    #[allow(unused_unsafe)]
    let device_id = unsafe { DeviceId::dummy() };
    Touch {
        device_id,
        phase,
        location: PhysicalPosition::new(pos.x as f64, pos.y as f64),
        force: None,
        id,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    init_global_registry();

    let config = match std::env::args().nth(1) {
        Some(path) => ComboBoxConfig::load(path)?,
        None => default_config(),
    };

    let combo = ComboBox::from_config(&config)?;
    combo.widget_base().set_name("combo");
    combo
        .text_changed
        .connect(|text| println!("text changed: {text:?}"));
    combo
        .highlight_index_changed
        .connect(|index| println!("highlight index: {index}"));

    let geometry = combo.geometry();
    let row_height = geometry.height();
    let rows = combo.values().len();

    let mut tree = WidgetTree::new(SURFACE);
    let id = tree.add(combo);
    let mut touches = TouchInputHandler::new();

    // Press on the combo box, sweep up through every popup row from the
    // bottom, then release on the top row.
    let press = geometry.center();
    let mut script = vec![(TouchPhase::Started, press)];
    for row in (0..rows).rev() {
        let y = geometry.top() - (rows - row) as f32 * row_height + row_height / 2.0;
        script.push((TouchPhase::Moved, Point::new(press.x, y)));
    }
    let release = script.last().map_or(press, |&(_, pos)| pos);
    script.push((TouchPhase::Ended, release));

    for (phase, pos) in script {
        let mut event = WidgetEvent::Touch(touches.handle_touch(winit_touch(0, phase, pos), None));
        let result = tree.dispatch(&mut event);
        tracing::info!(?phase, x = pos.x, y = pos.y, ?result, "dispatched");

        if phase == TouchPhase::Started {
            let tree_dump = ObjectTreeDebug::with_options(TreeFormatOptions::minimal())
                .format_subtree(id)?;
            println!("{tree_dump}");
        }
    }

    let mut renderer = RecordingRenderer::new();
    let stats = tree.paint(&mut renderer);
    if let Some(combo) = tree.get::<ComboBox>(id) {
        println!(
            "selected index {} ({:?}), {} draw calls",
            combo.current_index(),
            combo.text(),
            stats.draw_calls
        );
    }
    Ok(())
}
