//! Trellis - a touch-first widget toolkit.
//!
//! This is the main crate: it re-exports the core object, signal and
//! property systems and provides the widget layer on top of them.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! init_global_registry();
//!
//! let mut tree = WidgetTree::new(Size::new(800.0, 600.0));
//! let combo = ComboBox::new(["a", "b", "c"])
//!     .with_geometry(Rect::from_center(Point::new(400.0, 300.0), Size::new(200.0, 20.0)));
//! combo.text_changed.connect(|text| println!("selected {text}"));
//! let id = tree.add(combo);
//!
//! assert_eq!(tree.get::<ComboBox>(id).map(ComboBox::text), Some("a"));
//! ```

pub use trellis_core::*;

/// Graphics value types and renderer abstraction.
pub mod render {
    pub use trellis_render::*;
}

pub mod config;
mod error;
pub mod prelude;
pub mod widget;

pub use config::{ComboBoxConfig, GeometryConfig};
pub use error::{ConfigError, Result, WidgetError};
