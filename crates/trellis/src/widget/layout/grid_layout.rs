//! Single-column grid container.
//!
//! `GridLayout` owns a list of typed child widgets and stacks them as
//! equally sized rows. The fill direction decides where appended children
//! go: [`FillDirection::TopDown`] puts the first child in the top row,
//! [`FillDirection::BottomUp`] puts it in the bottom row.
//!
//! # Example
//!
//! ```ignore
//! let mut grid: GridLayout<Label> = GridLayout::new(Size::new(200.0, 20.0))
//!     .with_fill_direction(FillDirection::BottomUp);
//! grid.add_widget(Box::new(Label::new("a")))?;
//! grid.add_widget(Box::new(Label::new("b")))?;
//!
//! // "b" is drawn above "a".
//! assert_eq!(grid.index_at_row(0), Some(1));
//! ```

use trellis_core::{Object, ObjectId, ObjectResult};
use trellis_render::{Point, Rect, Size};

use crate::widget::{PaintContext, SizeHint, Widget, WidgetBase};

/// Where newly appended children are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillDirection {
    /// First child in the top row.
    #[default]
    TopDown,
    /// First child in the bottom row.
    BottomUp,
}

/// A one-column stack of equally sized rows.
pub struct GridLayout<T: Widget + ?Sized + 'static> {
    base: WidgetBase,
    /// Children in append order.
    children: Vec<Box<T>>,
    cell_size: Size,
    fill: FillDirection,
    spacing: f32,
}

impl<T: Widget + ?Sized + 'static> GridLayout<T> {
    /// Create an empty grid whose rows are `cell_size`.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new(cell_size: Size) -> Self {
        let mut grid = Self {
            base: WidgetBase::new::<Self>(),
            children: Vec::new(),
            cell_size,
            fill: FillDirection::TopDown,
            spacing: 0.0,
        };
        grid.relayout();
        grid
    }

    /// Set the fill direction (builder pattern).
    pub fn with_fill_direction(mut self, fill: FillDirection) -> Self {
        self.fill = fill;
        self.relayout();
        self
    }

    /// Set the vertical gap between rows (builder pattern).
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self.relayout();
        self
    }

    #[inline]
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    #[inline]
    pub fn fill_direction(&self) -> FillDirection {
        self.fill
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child and parent it to this grid.
    pub fn add_widget(&mut self, child: Box<T>) -> ObjectResult<()> {
        child.widget_base().set_parent(Some(self.base.object_id()))?;
        self.children.push(child);
        self.relayout();
        Ok(())
    }

    /// Children in append order.
    pub fn children(&self) -> &[Box<T>] {
        &self.children
    }

    /// Mutable access to the children in append order.
    ///
    /// Geometry set through this slice is overwritten by the next relayout.
    pub fn children_mut(&mut self) -> &mut [Box<T>] {
        &mut self.children
    }

    /// The row (0 = top) that holds the child at `index`.
    pub fn row_of(&self, index: usize) -> Option<usize> {
        let len = self.children.len();
        (index < len).then(|| match self.fill {
            FillDirection::TopDown => index,
            FillDirection::BottomUp => len - index - 1,
        })
    }

    /// The child index shown in `row` (0 = top).
    ///
    /// The mapping is its own inverse in both fill directions.
    pub fn index_at_row(&self, row: usize) -> Option<usize> {
        self.row_of(row)
    }

    /// Child indices ordered from the top row to the bottom row.
    pub fn indices_top_to_bottom(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.children.len()).filter_map(|row| self.index_at_row(row))
    }

    /// The index of the first child, scanning top to bottom, whose bounds
    /// contain `point` (in the grid's coordinates).
    ///
    /// Edges are inclusive; a point on the edge between two rows picks the
    /// upper one.
    pub fn child_at(&self, point: Point) -> Option<usize> {
        self.indices_top_to_bottom()
            .find(|&index| self.children[index].geometry().contains_inclusive(point))
    }

    /// Reposition every child and resize the grid to fit.
    fn relayout(&mut self) {
        let rows = self.children.len();
        let pitch = self.cell_size.height + self.spacing;
        let height = if rows == 0 {
            0.0
        } else {
            rows as f32 * self.cell_size.height + (rows - 1) as f32 * self.spacing
        };
        self.base.set_size(Size::new(self.cell_size.width, height));

        for index in 0..rows {
            let Some(row) = self.row_of(index) else { continue };
            let rect = Rect::new(
                0.0,
                row as f32 * pitch,
                self.cell_size.width,
                self.cell_size.height,
            );
            self.children[index].set_geometry(rect);
        }
    }
}

impl<T: Widget + ?Sized + 'static> Object for GridLayout<T> {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl<T: Widget + ?Sized + 'static> Widget for GridLayout<T> {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::new(self.base.size())
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        for index in self.indices_top_to_bottom() {
            let child = &self.children[index];
            if !child.is_visible() {
                continue;
            }
            let renderer = ctx.renderer();
            renderer.push_offset(child.pos());
            let mut child_ctx = PaintContext::new(&mut *renderer, child.rect());
            child.paint(&mut child_ctx);
            renderer.pop_offset();
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::init_global_registry;
    use trellis_render::{Color, RecordingRenderer, Renderer};

    use super::*;
    use crate::widget::widgets::Label;

    fn setup() {
        init_global_registry();
    }

    fn grid(fill: FillDirection, texts: &[&str]) -> GridLayout<Label> {
        let mut grid = GridLayout::new(Size::new(200.0, 20.0)).with_fill_direction(fill);
        for text in texts {
            grid.add_widget(Box::new(Label::new(*text))).unwrap();
        }
        grid
    }

    #[test]
    fn test_top_down_rows() {
        setup();
        let grid = grid(FillDirection::TopDown, &["a", "b", "c"]);
        assert_eq!(grid.size(), Size::new(200.0, 60.0));
        assert_eq!(grid.children()[0].geometry(), Rect::new(0.0, 0.0, 200.0, 20.0));
        assert_eq!(grid.children()[2].geometry(), Rect::new(0.0, 40.0, 200.0, 20.0));
        assert_eq!(grid.indices_top_to_bottom().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_bottom_up_rows() {
        setup();
        let grid = grid(FillDirection::BottomUp, &["a", "b", "c"]);
        assert_eq!(grid.children()[0].geometry(), Rect::new(0.0, 40.0, 200.0, 20.0));
        assert_eq!(grid.children()[2].geometry(), Rect::new(0.0, 0.0, 200.0, 20.0));
        assert_eq!(grid.indices_top_to_bottom().collect::<Vec<_>>(), vec![2, 1, 0]);
        assert_eq!(grid.row_of(0), Some(2));
        assert_eq!(grid.index_at_row(0), Some(2));
        assert_eq!(grid.row_of(3), None);
    }

    #[test]
    fn test_child_at() {
        setup();
        let grid = grid(FillDirection::BottomUp, &["a", "b", "c"]);
        assert_eq!(grid.child_at(Point::new(10.0, 5.0)), Some(2));
        assert_eq!(grid.child_at(Point::new(10.0, 20.0)), Some(2));
        assert_eq!(grid.child_at(Point::new(10.0, 21.0)), Some(1));
        assert_eq!(grid.child_at(Point::new(10.0, 60.0)), Some(0));
        assert_eq!(grid.child_at(Point::new(200.0, 50.0)), Some(0));
        assert_eq!(grid.child_at(Point::new(10.0, 60.5)), None);
        assert_eq!(grid.child_at(Point::new(250.0, 5.0)), None);
    }

    #[test]
    fn test_spacing_and_parenting() {
        setup();
        let grid = grid(FillDirection::TopDown, &["a", "b"]).with_spacing(4.0);
        assert_eq!(grid.size(), Size::new(200.0, 44.0));
        assert_eq!(grid.children()[1].pos(), Point::new(0.0, 24.0));
        assert_eq!(grid.widget_base().children_ids().len(), 2);
        assert_eq!(
            grid.children()[0].widget_base().parent_id(),
            Some(grid.object_id())
        );
    }

    #[test]
    fn test_paint_top_to_bottom() {
        setup();
        let grid = grid(FillDirection::BottomUp, &["a", "b", "c"]);
        let mut renderer = RecordingRenderer::new();
        renderer.begin_frame(Color::BLACK, Size::new(200.0, 60.0));
        let mut ctx = PaintContext::new(&mut renderer, grid.rect());
        grid.paint(&mut ctx);
        let texts: Vec<&str> = renderer.texts().map(|(_, text, _)| text).collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
    }
}
