// ABOUTME: Projection of RGB onto the hue/chroma plane.
// ABOUTME: Red lies on the x axis; green and blue sit 120 degrees either side.

use crate::angle::{COS_120, SIN_120};
use crate::hue::Hue;
use crate::rgb::{Channel, Rgb, RgbPn};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl Xy {
    /// Project a triple; coordinates are in the triple's channel units
    pub fn from_rgb<C: Channel>(rgb: &Rgb<C>) -> Self {
        let [r, g, b] = rgb.as_f64_array();
        Self {
            x: r + COS_120 * g + COS_120 * b,
            y: SIN_120 * g - SIN_120 * b,
        }
    }

    /// Hue angle, `None` for greys
    pub fn angle(&self) -> Option<f64> {
        if self.x == 0.0 && self.y == 0.0 {
            None
        } else {
            Some(self.y.atan2(self.x))
        }
    }

    pub fn hypot(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// The non-negative proportional triple with a zero minimum channel that
    /// projects onto this point. Coordinates must be proportional.
    pub fn base_triple(&self) -> RgbPn {
        let (x, y) = (self.x, self.y);
        let (r, g, b) = if y >= 0.0 && x + y / SQRT_3 >= 0.0 {
            let g = 2.0 * y / SQRT_3;
            (x + g / 2.0, g, 0.0)
        } else if y < 0.0 && x - y / SQRT_3 >= 0.0 {
            let b = -2.0 * y / SQRT_3;
            (x + b / 2.0, 0.0, b)
        } else {
            (0.0, -x + y / SQRT_3, -x - y / SQRT_3)
        };
        RgbPn::from_f64_array([r.max(0.0), g.max(0.0), b.max(0.0)])
    }

    /// The base triple along this point's direction with the given
    /// (corrected, proportional) chroma. `None` when the point has no angle.
    pub fn triple_at_chroma(&self, chroma: f64) -> Option<RgbPn> {
        let angle = self.angle()?;
        let correction = Hue::<f64>::from_angle(angle).chroma_correction();
        let factor = chroma / (self.hypot() * correction);
        Some(self.scaled(factor).base_triple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::PI_120;
    use crate::rgb::Rgb16;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primaries_project_onto_unit_circle() {
        let red = Xy::from_rgb(&RgbPn::RED);
        assert_eq!(red, Xy { x: 1.0, y: 0.0 });
        assert_abs_diff_eq!(Xy::from_rgb(&RgbPn::GREEN).hypot(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            Xy::from_rgb(&RgbPn::GREEN).angle().unwrap_or(0.0),
            PI_120,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(Xy::from_rgb(&RgbPn::CYAN).hypot(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grey_has_no_angle() {
        assert_eq!(Xy::from_rgb(&Rgb16::grey(1234)).angle(), None);
        assert_eq!(Xy::from_rgb(&Rgb16::BLACK).angle(), None);
    }

    #[test]
    fn test_base_triple_inverts_projection() {
        for rgb in [
            RgbPn::new(0.8, 0.3, 0.0),
            RgbPn::new(0.6, 0.0, 0.25),
            RgbPn::new(0.0, 0.5, 0.9),
            RgbPn::new(0.0, 1.0, 0.2),
        ] {
            let back = Xy::from_rgb(&rgb).base_triple();
            for i in 0..3 {
                assert_abs_diff_eq!(back[i], rgb[i], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_base_triple_strips_grey() {
        let back = Xy::from_rgb(&RgbPn::new(0.9, 0.5, 0.4)).base_triple();
        assert_abs_diff_eq!(back.red, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(back.green, 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(back.blue, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triple_at_chroma() {
        let xy = Xy::from_rgb(&Rgb16::new(65535, 65535, 0));
        let half = xy.triple_at_chroma(0.5).unwrap_or_default();
        assert_abs_diff_eq!(half.red, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(half.green, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(half.blue, 0.0, epsilon = 1e-9);
        assert_eq!(Xy::default().triple_at_chroma(0.5), None);
    }
}
