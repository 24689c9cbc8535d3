//! Standard widgets for Trellis.
//!
//! - [`Label`]: One line of colored text
//! - [`Button`]: Clickable button
//! - [`ComboBox`]: Button that pops up a list of values to pick from

mod button;
mod combo_box;
mod label;

pub use button::Button;
pub use combo_box::{ComboBox, ComboBoxError, OptionGrid, OptionRenderer, OptionWidget};
pub use label::Label;

use trellis_render::Size;

use super::SizeHint;

/// Advance of one character in the fixed-width text metrics.
const CHAR_WIDTH: f32 = 8.0;
const LINE_HEIGHT: f32 = 20.0;
/// Horizontal padding on each side of the text.
const PADDING: f32 = 8.0;

/// Size hint for a single line of `text`.
pub(crate) fn text_size_hint(text: &str) -> SizeHint {
    let width = text.chars().count() as f32 * CHAR_WIDTH + 2.0 * PADDING;
    SizeHint::from_dimensions(width, LINE_HEIGHT)
        .with_minimum(Size::new(2.0 * PADDING, LINE_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_hint() {
        assert_eq!(text_size_hint("").preferred, Size::new(16.0, 20.0));
        assert_eq!(text_size_hint("abc").preferred, Size::new(40.0, 20.0));
        assert_eq!(text_size_hint("äö").preferred.width, 32.0);
    }
}
