//! Basic geometry and color types.
//!
//! Coordinates are in logical pixels with the origin at the top-left and y
//! growing downward.

use bytemuck::{Pod, Zeroable};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `(0, 0)`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle of `size` centred on `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Half-open hit test: left and top edges inside, right and bottom outside.
    ///
    /// The left and top edges are inclusive, the right and bottom edges
    /// exclusive, so stacked rows never both contain a shared edge.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Closed hit test: every edge counts as inside.
    ///
    /// Two stacked rows both contain their shared edge, so callers scanning
    /// a stack decide which one wins.
    #[inline]
    pub fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Return a copy moved by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// A straight-alpha RGBA color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from float channels.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from byte channels.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Build from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether every channel lies in `0.0..=1.0`.
    pub fn is_normalized(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Return this color with a different alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Self = Self::from_rgb(0.25, 0.25, 0.25);
}

impl From<[f32; 4]> for Color {
    fn from(rgba: [f32; 4]) -> Self {
        Self::from_array(rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.9, 19.9)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
        assert!(!rect.contains(Point::new(5.0, 20.0)));
        assert!(!rect.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_stacked_rows_share_no_point() {
        let upper = Rect::new(0.0, -40.0, 200.0, 20.0);
        let lower = Rect::new(0.0, -20.0, 200.0, 20.0);
        let edge = Point::new(50.0, -20.0);
        assert!(!upper.contains(edge));
        assert!(lower.contains(edge));
    }

    #[test]
    fn test_rect_contains_inclusive_edges() {
        let rect = Rect::new(0.0, -20.0, 200.0, 20.0);
        assert!(rect.contains_inclusive(Point::new(200.0, -10.0)));
        assert!(rect.contains_inclusive(Point::new(10.0, 0.0)));
        assert!(rect.contains_inclusive(Point::new(0.0, -20.0)));
        assert!(!rect.contains_inclusive(Point::new(200.1, -10.0)));
        assert!(!rect.contains_inclusive(Point::new(10.0, 0.1)));
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(Point::new(400.0, 300.0), Size::new(200.0, 20.0));
        assert_eq!(rect, Rect::new(300.0, 290.0, 200.0, 20.0));
        assert_eq!(rect.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_rect_union_and_offset() {
        let a = Rect::new(0.0, -60.0, 200.0, 60.0);
        let b = Rect::new(0.0, 0.0, 200.0, 20.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -60.0, 200.0, 80.0));
        assert_eq!(b.offset(5.0, -5.0), Rect::new(5.0, -5.0, 200.0, 20.0));
    }

    #[test]
    fn test_color_arrays() {
        let highlight = Color::from_array([1.0, 0.2, 0.2, 1.0]);
        assert_eq!(highlight.to_array(), [1.0, 0.2, 0.2, 1.0]);
        assert!(highlight.is_normalized());
        assert!(!Color::new(1.5, 0.0, 0.0, 1.0).is_normalized());
        assert_eq!(Color::from([1.0, 1.0, 1.0, 1.0]), Color::WHITE);
        assert_eq!(Color::WHITE.with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn test_color_is_pod() {
        let bytes: &[u8] = bytemuck::bytes_of(&Color::WHITE);
        assert_eq!(bytes.len(), 16);
    }
}
