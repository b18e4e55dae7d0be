// ABOUTME: Hue as a chromatic angle plus the triple that realises it at full strength.
// ABOUTME: Reconstructs triples for a requested total or value and orders hues by angle.

use std::cmp::Ordering;

use crate::angle::{self, PI_120, PI_60};
use crate::rgb::{Channel, Rgb};
use crate::xy::Xy;

#[derive(Debug, Clone, Copy)]
struct Sector<C> {
    /// Channel indices: full, partial, empty
    io: [usize; 3],
    other: C,
    angle: f64,
}

/// A hue angle in (-PI, PI], or grey when there is no angle.
///
/// At full strength a hue has one channel at `ONE`, one at `other` and one at
/// zero.
#[derive(Debug, Clone, Copy)]
pub struct Hue<C> {
    sector: Option<Sector<C>>,
}

impl<C: Channel> Hue<C> {
    pub fn grey() -> Self {
        Self { sector: None }
    }

    /// Hue for an angle; NaN gives grey
    pub fn from_angle(angle: f64) -> Self {
        let angle = angle::normalize(angle);
        if angle.is_nan() {
            return Self::grey();
        }
        let magnitude = angle.abs();
        let positive = angle >= 0.0;
        let (io, offset) = if magnitude <= PI_60 {
            (if positive { [0, 1, 2] } else { [0, 2, 1] }, magnitude)
        } else if magnitude <= PI_120 {
            (if positive { [1, 0, 2] } else { [2, 0, 1] }, PI_120 - magnitude)
        } else {
            (if positive { [1, 2, 0] } else { [2, 1, 0] }, magnitude - PI_120)
        };
        let other = C::from_scaled(C::one() * offset.sin() / (PI_120 - offset).sin());
        Self {
            sector: Some(Sector { io, other, angle }),
        }
    }

    pub fn from_rgb(rgb: &Rgb<C>) -> Self {
        match Xy::from_rgb(rgb).angle() {
            Some(angle) => Self::from_angle(angle),
            None => Self::grey(),
        }
    }

    pub fn is_grey(&self) -> bool {
        self.sector.is_none()
    }

    pub fn angle(&self) -> Option<f64> {
        self.sector.map(|s| s.angle)
    }

    /// Channel indices from the full channel to the empty one
    pub fn io(&self) -> Option<[usize; 3]> {
        self.sector.map(|s| s.io)
    }

    /// Strength of the partial channel at full strength (`ONE` for grey)
    pub fn other(&self) -> C {
        self.sector.map_or(C::ONE, |s| s.other)
    }

    /// Full strength triple; white for grey
    pub fn rgb(&self) -> Rgb<C> {
        match self.sector {
            None => Rgb::WHITE,
            Some(sector) => {
                let mut result = Rgb::BLACK;
                result[sector.io[0]] = C::ONE;
                result[sector.io[1]] = sector.other;
                result
            }
        }
    }

    /// Triple of this hue whose channels add up to `total` (channel units).
    ///
    /// Totals beyond the full strength triple move toward white: the full
    /// channel stays saturated while the other two rise.
    pub fn rgb_with_total(&self, total: f64) -> Rgb<C> {
        let Some(sector) = self.sector else {
            return Rgb::grey(C::from_scaled(total / 3.0));
        };
        let one = C::one();
        let other = sector.other.as_f64();
        let current = one + other;
        let shortfall = total - current;
        let mut channels = [0.0; 3];
        if shortfall <= 0.0 {
            channels[sector.io[0]] = one * total / current;
            channels[sector.io[1]] = other * total / current;
        } else {
            let weakest = shortfall * one / (2.0 * one - other);
            channels[sector.io[0]] = one;
            channels[sector.io[2]] = weakest;
            channels[sector.io[1]] = other + shortfall - weakest;
        }
        Rgb::from_f64_array(channels)
    }

    /// Triple of this hue with the given proportional value
    pub fn rgb_with_value(&self, value: f64) -> Rgb<C> {
        self.rgb_with_total(value * 3.0 * C::one())
    }

    /// Factor turning a raw XY magnitude into a chroma where every full
    /// strength hue has chroma one
    pub fn chroma_correction(&self) -> f64 {
        let Some(sector) = self.sector else {
            return 1.0;
        };
        let a = C::one();
        let b = sector.other.as_f64();
        if b == 0.0 || a == b {
            return 1.0;
        }
        a / (a * a + b * b - a * b).sqrt()
    }

    /// Value of the full strength triple
    pub fn max_chroma_value(&self) -> f64 {
        self.rgb().value()
    }

    /// Highest chroma this hue reaches at the given value
    pub fn max_chroma_for_value(&self, value: f64) -> f64 {
        if self.is_grey() || value <= 0.0 || value >= 1.0 {
            return 0.0;
        }
        let mcv = self.max_chroma_value();
        if value <= mcv {
            value / mcv
        } else {
            let other = self.other().as_f64() / C::one();
            ((3.0 - 3.0 * value) / (2.0 - other)).min(1.0)
        }
    }

    /// Lowest value at which this hue can show the given chroma
    pub fn min_value_for_chroma(&self, chroma: f64) -> f64 {
        if self.is_grey() {
            return 0.0;
        }
        chroma * self.max_chroma_value()
    }

    /// Highest value at which this hue can show the given chroma
    pub fn max_value_for_chroma(&self, chroma: f64) -> f64 {
        if self.is_grey() {
            return 1.0;
        }
        chroma * self.max_chroma_value() + 1.0 - chroma
    }

    /// Signed angular distance from `other`; `None` if either is grey
    pub fn difference(&self, other: &Self) -> Option<f64> {
        Some(angle::difference(self.angle()?, other.angle()?))
    }
}

impl<C: Channel> PartialEq for Hue<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Channel> Eq for Hue<C> {}

impl<C: Channel> PartialOrd for Hue<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Greys sort before every hue; hues sort by angle
impl<C: Channel> Ord for Hue<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.angle(), other.angle()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.total_cmp(&b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb::{Rgb16, Rgb8, RgbPn};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_grey_triples_give_grey_hue() {
        for level in [0u16, 1, 30000, 65535] {
            let hue = Hue::from_rgb(&Rgb16::grey(level));
            assert!(hue.is_grey());
            assert_eq!(hue.angle(), None);
            assert_eq!(hue.rgb(), Rgb16::WHITE);
        }
    }

    #[test]
    fn test_pure_hue_reconstructs_exactly() {
        for rgb in [
            Rgb16::RED,
            Rgb16::YELLOW,
            Rgb16::CYAN,
            Rgb16::new(65535, 30000, 0),
            Rgb16::new(0, 12345, 65535),
            Rgb16::new(65535, 0, 50000),
        ] {
            assert_eq!(Hue::from_rgb(&rgb).rgb(), rgb);
        }
    }

    #[test]
    fn test_from_angle_sectors() {
        assert_eq!(Hue::<u8>::from_angle(0.0).rgb(), Rgb8::RED);
        assert_eq!(Hue::<u8>::from_angle(PI_60).rgb(), Rgb8::YELLOW);
        assert_eq!(Hue::<u8>::from_angle(PI_120).rgb(), Rgb8::GREEN);
        assert_eq!(Hue::<u8>::from_angle(-PI_120).rgb(), Rgb8::BLUE);
        assert_eq!(Hue::<u8>::from_angle(std::f64::consts::PI).rgb(), Rgb8::CYAN);
        assert_eq!(Hue::<u8>::from_angle(-PI_60).rgb(), Rgb8::MAGENTA);
        assert!(Hue::<u8>::from_angle(f64::NAN).is_grey());
    }

    #[test]
    fn test_rgb_with_total_scales_down() {
        let hue = Hue::from_rgb(&Rgb8::new(200, 50, 0));
        assert_eq!(hue.rgb(), Rgb8::new(255, 64, 0));
        assert_eq!(hue.rgb_with_total(250.0), Rgb8::new(200, 50, 0));
    }

    #[test]
    fn test_rgb_with_total_heads_to_white() {
        let hue = Hue::<u16>::from_angle(0.0);
        assert_eq!(hue.rgb_with_total(3.0 * 65535.0), Rgb16::WHITE);
        let rgb = hue.rgb_with_value(2.0 / 3.0);
        assert_eq!(rgb, Rgb16::new(65535, 32768, 32768));
    }

    #[test]
    fn test_grey_rgb_with_value() {
        let grey = Hue::<u16>::grey();
        assert_eq!(grey.rgb_with_value(0.5), Rgb16::grey(32768));
    }

    #[test]
    fn test_chroma_correction() {
        assert_eq!(Hue::<u16>::from_angle(0.0).chroma_correction(), 1.0);
        assert_eq!(Hue::<u16>::grey().chroma_correction(), 1.0);
        let hue = Hue::<f64>::from_angle(PI_60 / 2.0);
        // other is one half: 1 / sqrt(1 + 1/4 - 1/2)
        assert_abs_diff_eq!(hue.other(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hue.chroma_correction(), 1.0 / 0.75f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_value_limits_for_chroma() {
        let red = Hue::<f64>::from_angle(0.0);
        assert_abs_diff_eq!(red.max_chroma_value(), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(red.max_chroma_for_value(1.0 / 3.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(red.max_chroma_for_value(1.0 / 6.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(red.max_chroma_for_value(2.0 / 3.0), 0.5, epsilon = 1e-12);
        assert_eq!(red.max_chroma_for_value(1.0), 0.0);
        assert_abs_diff_eq!(red.min_value_for_chroma(0.5), 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(red.max_value_for_chroma(0.5), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ordering_puts_grey_first() {
        let grey = Hue::<f64>::grey();
        let red = Hue::<f64>::from_rgb(&RgbPn::RED);
        let green = Hue::<f64>::from_rgb(&RgbPn::GREEN);
        let blue = Hue::<f64>::from_rgb(&RgbPn::BLUE);
        let mut hues = vec![green, grey, red, blue];
        hues.sort();
        assert!(hues[0].is_grey());
        assert_eq!(hues[1], blue);
        assert_eq!(hues[2], red);
        assert_eq!(hues[3], green);
        assert_eq!(grey, Hue::grey());
        assert_ne!(grey, red);
    }

    #[test]
    fn test_difference() {
        let red = Hue::<u16>::from_angle(0.0);
        let blue = Hue::<u16>::from_angle(-PI_120);
        assert_abs_diff_eq!(red.difference(&blue).unwrap_or(0.0), PI_120, epsilon = 1e-12);
        assert_eq!(red.difference(&Hue::grey()), None);
    }
}
