use std::f64::consts::TAU;

use serde::Serialize;

/// A position relative to the radar centre.
///
/// Angles run clockwise from the positive vertical axis, so a point at
/// `angle` and `distance` sits at `(distance * sin(angle), distance * cos(angle))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_polar(angle: f64, distance: f64) -> Self {
        Self {
            x: distance * angle.sin(),
            y: distance * angle.cos(),
        }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Inverse of [`Point::from_polar`], normalised to `[0, 2π)`.
    pub fn angle(self) -> f64 {
        self.x.atan2(self.y).rem_euclid(TAU)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Inner and outer radius of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingBand {
    pub inner: f64,
    pub outer: f64,
}

impl RingBand {
    /// Equal-width bands: ring `order` of `ring_count` spans
    /// `[R * (order - 1) / count, R * order / count]`.
    pub fn for_order(order: u32, ring_count: usize, max_radius: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let count = ring_count.max(1) as f64;
        let order = f64::from(order.max(1));
        Self {
            inner: max_radius * (order - 1.0) / count,
            outer: max_radius * order / count,
        }
    }

    pub fn width(self) -> f64 {
        self.outer - self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn zero_angle_points_straight_up() {
        let point = Point::from_polar(0.0, 10.0);
        assert_close(point.x, 0.0);
        assert_close(point.y, 10.0);
    }

    #[test]
    fn quarter_turn_points_right() {
        let point = Point::from_polar(FRAC_PI_2, 4.0);
        assert_close(point.x, 4.0);
        assert_close(point.y, 0.0);
    }

    #[test]
    fn angle_recovers_polar_input() {
        for angle in [0.1, 1.0, PI, 4.0, 6.2] {
            let point = Point::from_polar(angle, 3.0);
            assert_close(point.angle(), angle);
            assert_close(point.magnitude(), 3.0);
        }
    }

    #[test]
    fn innermost_band_starts_at_centre() {
        let band = RingBand::for_order(1, 4, 100.0);
        assert_close(band.inner, 0.0);
        assert_close(band.outer, 25.0);
    }

    #[test]
    fn outermost_band_ends_at_max_radius() {
        let band = RingBand::for_order(4, 4, 100.0);
        assert_close(band.inner, 75.0);
        assert_close(band.outer, 100.0);
    }

    #[test]
    fn bands_have_equal_width() {
        let widths: Vec<f64> = (1..=5)
            .map(|order| RingBand::for_order(order, 5, 80.0).width())
            .collect();
        for width in widths {
            assert_close(width, 16.0);
        }
    }
}
