//! Layout containers.
//!
//! - [`GridLayout`] - single-column stack of equally sized rows

mod grid_layout;

pub use grid_layout::{FillDirection, GridLayout};
