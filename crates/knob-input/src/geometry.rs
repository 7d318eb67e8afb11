// SPDX-License-Identifier: MIT
//
// Points and rectangles in layout space.
//
// Rectangles are what the layout layer reports for each interactive
// surface. The drag machinery only needs two things from them: whether
// a press landed inside, and how far along an axis a pointer is.

/// A position in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside. Left and top edges are inclusive,
    /// right and bottom edges exclusive, so adjacent rectangles never
    /// both claim a point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// How far across the rectangle `x` lies, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_x(&self, x: f64) -> f64 {
        unit_fraction(x - self.x, self.width)
    }

    /// How far down the rectangle `y` lies, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_y(&self, y: f64) -> f64 {
        unit_fraction(y - self.y, self.height)
    }
}

/// `offset / extent` clamped to `[0, 1]`.
///
/// A collapsed surface (zero or negative extent) maps everything to 0.
#[must_use]
pub fn unit_fraction(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / extent).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 100.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(109.9, 29.9)));
        assert!(!rect.contains(Point::new(110.0, 15.0)));
        assert!(!rect.contains(Point::new(50.0, 30.0)));
        assert!(!rect.contains(Point::new(9.0, 15.0)));
    }

    #[test]
    fn fractions_clamp() {
        let rect = Rect::new(10.0, 0.0, 100.0, 50.0);
        assert_eq!(rect.fraction_x(60.0), 0.5);
        assert_eq!(rect.fraction_x(-100.0), 0.0);
        assert_eq!(rect.fraction_x(500.0), 1.0);
        assert_eq!(rect.fraction_y(25.0), 0.5);
    }

    #[test]
    fn collapsed_extent_is_zero() {
        assert_eq!(unit_fraction(5.0, 0.0), 0.0);
        assert_eq!(unit_fraction(5.0, -3.0), 0.0);
        assert_eq!(unit_fraction(f64::NAN, 10.0), 0.0);
    }
}
