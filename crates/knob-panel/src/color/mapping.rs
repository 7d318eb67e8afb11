//! Pointer position to channel value, one function per picker surface.

use knob_input::{Point, Rect, unit_fraction};

/// Saturation and value under `point` on the field.
///
/// The field is square, so its width scales both axes. Saturation grows
/// to the right, value grows upward.
#[must_use]
pub fn saturation_value_at(field: Rect, point: Point) -> (f64, f64) {
    let s = unit_fraction(point.x - field.x, field.width);
    let v = 1.0 - unit_fraction(point.y - field.y, field.width);
    (s, v)
}

/// Hue in degrees under `point` on the vertical rail, 360 at the top.
#[must_use]
pub fn hue_at(rail: Rect, point: Point) -> f64 {
    (1.0 - rail.fraction_y(point.y)) * 360.0
}

/// Alpha under `point` on the horizontal rail, to two decimals.
#[must_use]
pub fn alpha_at(rail: Rect, point: Point) -> f64 {
    (rail.fraction_x(point.x) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIELD: Rect = Rect::new(10.0, 20.0, 100.0, 100.0);

    #[test]
    fn field_corners() {
        assert_eq!(saturation_value_at(FIELD, Point::new(10.0, 20.0)), (0.0, 1.0));
        assert_eq!(saturation_value_at(FIELD, Point::new(500.0, 500.0)), (1.0, 0.0));
        assert_eq!(saturation_value_at(FIELD, Point::new(-5.0, -5.0)), (0.0, 1.0));
        assert_eq!(saturation_value_at(FIELD, Point::new(60.0, 45.0)), (0.5, 0.75));
    }

    #[test]
    fn field_uses_width_for_both_axes() {
        let wide = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(saturation_value_at(wide, Point::new(100.0, 100.0)), (0.5, 0.5));
    }

    #[test]
    fn hue_rail() {
        let rail = Rect::new(0.0, 0.0, 16.0, 100.0);
        assert_eq!(hue_at(rail, Point::new(5.0, 0.0)), 360.0);
        assert_eq!(hue_at(rail, Point::new(5.0, 50.0)), 180.0);
        assert_eq!(hue_at(rail, Point::new(5.0, 250.0)), 0.0);
    }

    #[test]
    fn alpha_rail_rounds() {
        let rail = Rect::new(0.0, 0.0, 121.0, 16.0);
        assert_eq!(alpha_at(rail, Point::new(40.0, 4.0)), 0.33);
        assert_eq!(alpha_at(rail, Point::new(-10.0, 4.0)), 0.0);
        assert_eq!(alpha_at(rail, Point::new(121.0, 4.0)), 1.0);
    }
}
