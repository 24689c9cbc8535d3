//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces the widget toolkit is built on:
//!
//! - **Object Model**: Parent-child relationships, naming, stable identifiers
//! - **Signal/Slot System**: Type-safe observer notifications
//! - **Property System**: Reactive values with change detection
//! - **Logging**: Tracing targets and object tree visualization
//!
//! # Signals and Properties
//!
//! A widget keeps its state in [`Property`] cells and announces changes
//! through [`Signal`]s. `Property::set` reports whether the value actually
//! changed, so a signal fires only on real changes.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use trellis_core::{Property, Signal};
//!
//! struct Selection {
//!     index: Property<usize>,
//!     index_changed: Signal<usize>,
//! }
//!
//! impl Selection {
//!     fn select(&self, index: usize) {
//!         if self.index.set(index) {
//!             self.index_changed.emit(index);
//!         }
//!     }
//! }
//!
//! let selection = Selection { index: Property::new(0), index_changed: Signal::new() };
//! let emitted = Arc::new(AtomicUsize::new(0));
//! let counter = emitted.clone();
//! selection.index_changed.connect(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! selection.select(2);
//! selection.select(2);
//! assert_eq!(selection.index.get(), 2);
//! assert_eq!(emitted.load(Ordering::SeqCst), 1);
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod property;
pub mod signal;

pub use error::SignalError;
pub use logging::{ObjectTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{
    global_registry, init_global_registry, object_cast, object_cast_mut, Object, ObjectBase,
    ObjectError, ObjectId, ObjectRegistry, ObjectResult, SharedObjectRegistry,
};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
