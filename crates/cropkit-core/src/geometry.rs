//! Point, size and rectangle value types in canvas coordinates.
//!
//! All values are `f32` canvas units (the on-screen interactive space), not
//! source image pixels. Origin is the top-left corner, y grows downward.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position (or a delta between two positions) on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in canvas units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            top_left: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    /// A rectangle of `size` centered inside `container`.
    ///
    /// When `size` is larger than the container on an axis, the rectangle is
    /// pinned to the origin on that axis instead of going negative.
    pub fn centered_in(container: Size, size: Size) -> Self {
        let x = ((container.width - size.width) / 2.0).max(0.0);
        let y = ((container.height - size.height) / 2.0).max(0.0);
        Self::from_origin_size(Point::new(x, y), size)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.top_left.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.top_left.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.top_left.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.size.height
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.y())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Point-in-rect test. Left/top edges are inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x() && point.x < self.right() && point.y >= self.y() && point.y < self.bottom()
    }

    /// Shrink symmetrically by `margin` on every side.
    ///
    /// A margin larger than half a dimension collapses that dimension to zero
    /// around the center.
    pub fn shrink(&self, margin: f32) -> Rect {
        let inset_x = margin.min(self.width() / 2.0);
        let inset_y = margin.min(self.height() / 2.0);
        Rect::new(
            self.x() + inset_x,
            self.y() + inset_y,
            self.width() - 2.0 * inset_x,
            self.height() - 2.0 * inset_y,
        )
    }

    /// Square of side `2 * radius` centered on `center`.
    pub fn around(center: Point, radius: f32) -> Rect {
        Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    pub fn offset(&self, delta: Point) -> Rect {
        Rect::from_origin_size(self.top_left + delta, self.size)
    }

    pub fn with_origin(&self, top_left: Point) -> Rect {
        Rect::from_origin_size(top_left, self.size)
    }

    /// Whether the rectangle lies entirely inside `(0, 0) .. canvas`.
    pub fn fits_within(&self, canvas: Size) -> bool {
        self.fits_horizontally(canvas.width) && self.fits_vertically(canvas.height)
    }

    pub fn fits_horizontally(&self, canvas_width: f32) -> bool {
        self.x() >= 0.0 && self.right() <= canvas_width
    }

    pub fn fits_vertically(&self, canvas_height: f32) -> bool {
        self.y() >= 0.0 && self.bottom() <= canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sub() {
        let d = Point::new(10.0, 5.0) - Point::new(4.0, 8.0);
        assert_eq!(d, Point::new(6.0, -3.0));
    }

    #[test]
    fn test_point_add() {
        assert_eq!(Point::new(1.0, 2.0) + Point::new(3.0, 4.0), Point::new(4.0, 6.0));
    }

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(29.9, 29.9)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(15.0, 30.0)));
        assert!(!r.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_shrink() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).shrink(10.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 80.0, 30.0));
    }

    #[test]
    fn test_shrink_collapses_without_going_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 100.0).shrink(20.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.x(), 5.0);
        assert_eq!(r.height(), 60.0);
        assert!(!r.contains(Point::new(5.0, 50.0)));
    }

    #[test]
    fn test_centered_in() {
        let r = Rect::centered_in(Size::new(1000.0, 1000.0), Size::new(720.0, 900.0));
        assert_eq!(r, Rect::new(140.0, 50.0, 720.0, 900.0));
    }

    #[test]
    fn test_centered_in_oversized_pins_to_origin() {
        let r = Rect::centered_in(Size::new(100.0, 100.0), Size::new(150.0, 50.0));
        assert_eq!(r.x(), 0.0);
        assert_eq!(r.y(), 25.0);
    }

    #[test]
    fn test_fits_within() {
        let canvas = Size::new(100.0, 100.0);
        assert!(Rect::new(0.0, 0.0, 100.0, 100.0).fits_within(canvas));
        assert!(!Rect::new(-0.1, 0.0, 50.0, 50.0).fits_within(canvas));
        assert!(!Rect::new(60.0, 0.0, 50.0, 50.0).fits_within(canvas));
        assert!(!Rect::new(0.0, 51.0, 50.0, 50.0).fits_within(canvas));
    }

    #[test]
    fn test_corners() {
        let r = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(r.top_right(), Point::new(11.0, 2.0));
        assert_eq!(r.bottom_left(), Point::new(1.0, 22.0));
        assert_eq!(r.bottom_right(), Point::new(11.0, 22.0));
    }

    #[test]
    fn test_size_validity() {
        assert!(Size::new(1.0, 1.0).is_valid());
        assert!(!Size::new(0.0, 1.0).is_valid());
        assert!(!Size::new(f32::NAN, 1.0).is_valid());
        assert!(!Size::new(f32::INFINITY, 1.0).is_valid());
    }
}
