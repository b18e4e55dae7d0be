// ABOUTME: Stateful step-wise colour editor over a proportional triple.
// ABOUTME: Nudges value, chroma or hue while holding the other two as steady as the gamut allows.

use crate::hcv::Hcv;
use crate::hue::Hue;
use crate::rgb::{Channel, Rgb, RgbPn};
use crate::xy::Xy;

const EPSILON: f64 = 1e-9;

/// Editing state for one colour.
///
/// Every operation returns `false` when the colour is already at the limit
/// in the requested direction; nothing changes in that case. The last
/// non-grey hue is remembered so chroma can be reintroduced after it has
/// been taken all the way out.
#[derive(Debug, Clone)]
pub struct RgbManipulator {
    rgb: RgbPn,
    value: f64,
    chroma: f64,
    hue: Hue<f64>,
    xy: Xy,
    last_hue: Option<Hue<f64>>,
}

impl RgbManipulator {
    pub fn new<C: Channel>(rgb: Rgb<C>) -> Self {
        let mut manipulator = Self {
            rgb: RgbPn::BLACK,
            value: 0.0,
            chroma: 0.0,
            hue: Hue::grey(),
            xy: Xy::default(),
            last_hue: None,
        };
        manipulator.set_rgb(rgb);
        manipulator
    }

    /// Replace the colour being edited. The remembered hue survives a grey.
    pub fn set_rgb<C: Channel>(&mut self, rgb: Rgb<C>) {
        self.install(rgb.convert());
    }

    pub fn rgb<C: Channel>(&self) -> Rgb<C> {
        self.rgb.convert()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    pub fn hue(&self) -> Hue<f64> {
        self.hue
    }

    pub fn last_hue(&self) -> Option<Hue<f64>> {
        self.last_hue
    }

    pub fn xy(&self) -> Xy {
        self.xy
    }

    fn install(&mut self, rgb: RgbPn) {
        let hcv = Hcv::new(rgb);
        self.rgb = rgb;
        self.value = hcv.value;
        self.chroma = hcv.chroma;
        self.hue = hcv.hue;
        self.xy = Xy::from_rgb(&rgb);
        if !self.hue.is_grey() {
            self.last_hue = Some(self.hue);
        }
    }

    pub fn increment_value(&mut self, delta: f64) -> bool {
        if delta <= 0.0 || self.value >= 1.0 - EPSILON {
            tracing::trace!(value = self.value, "value already at maximum");
            return false;
        }
        let new_value = self.value + delta;
        if new_value >= 1.0 {
            self.install(RgbPn::WHITE);
        } else if self.hue.is_grey() {
            self.install(RgbPn::grey(new_value));
        } else if new_value <= self.hue.max_value_for_chroma(self.chroma) {
            self.install(self.rgb.lifted(delta));
        } else {
            let chroma = self.hue.max_chroma_for_value(new_value);
            tracing::debug!(from = self.chroma, to = chroma, "value increase costs chroma");
            self.install(compose(&self.hue, chroma, new_value));
        }
        true
    }

    pub fn decrement_value(&mut self, delta: f64) -> bool {
        if delta <= 0.0 || self.value <= EPSILON {
            tracing::trace!(value = self.value, "value already at minimum");
            return false;
        }
        let new_value = self.value - delta;
        if new_value <= 0.0 {
            self.install(RgbPn::BLACK);
        } else if self.hue.is_grey() {
            self.install(RgbPn::grey(new_value));
        } else if new_value >= self.hue.min_value_for_chroma(self.chroma) {
            self.install(self.rgb.lifted(-delta));
        } else {
            let chroma = self.hue.max_chroma_for_value(new_value);
            tracing::debug!(from = self.chroma, to = chroma, "value decrease costs chroma");
            self.install(compose(&self.hue, chroma, new_value));
        }
        true
    }

    pub fn increment_chroma(&mut self, delta: f64) -> bool {
        if delta <= 0.0 {
            return false;
        }
        if self.hue.is_grey() {
            let hue = self.last_hue.unwrap_or_else(|| Hue::from_angle(0.0));
            let delta = delta.min(1.0);
            let rgb = if self.value <= EPSILON {
                hue.rgb().scaled(delta)
            } else if self.value >= 1.0 - EPSILON {
                hue.rgb().scaled(delta).lifted(1.0 - delta)
            } else {
                let chroma = delta.min(hue.max_chroma_for_value(self.value));
                if chroma <= 0.0 {
                    return false;
                }
                compose(&hue, chroma, self.value)
            };
            self.install(rgb);
            return true;
        }

        let max_chroma = self.hue.max_chroma_for_value(self.value);
        if self.chroma >= max_chroma - EPSILON {
            tracing::trace!(chroma = self.chroma, "chroma already at maximum for value");
            return false;
        }
        let chroma = (self.chroma + delta).min(max_chroma);
        match self.xy.triple_at_chroma(chroma) {
            Some(base) => {
                let value = self.value;
                self.install(base.lifted(value - base.value()));
                true
            }
            None => false,
        }
    }

    pub fn decrement_chroma(&mut self, delta: f64) -> bool {
        if delta <= 0.0 || self.hue.is_grey() {
            tracing::trace!("no chroma to remove");
            return false;
        }
        let chroma = self.chroma - delta;
        if chroma <= EPSILON {
            self.install(RgbPn::grey(self.value));
            return true;
        }
        match self.xy.triple_at_chroma(chroma) {
            Some(base) => {
                let value = self.value;
                self.install(base.lifted(value - base.value()));
                true
            }
            None => false,
        }
    }

    /// Turn the hue by `delta` radians keeping the value; chroma drops only
    /// when the new hue cannot reach it at this value
    pub fn rotate_hue(&mut self, delta: f64) -> bool {
        let Some(angle) = self.hue.angle() else {
            tracing::trace!("grey has no hue to rotate");
            return false;
        };
        if delta == 0.0 {
            return false;
        }
        let hue = Hue::from_angle(angle + delta);
        let chroma = self.chroma.min(hue.max_chroma_for_value(self.value));
        self.install(compose(&hue, chroma, self.value));
        true
    }
}

/// The triple of `hue` at `chroma` topped up with grey to reach `value`
fn compose(hue: &Hue<f64>, chroma: f64, value: f64) -> RgbPn {
    hue.rgb()
        .scaled(chroma)
        .lifted(value - chroma * hue.max_chroma_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{PI_120, PI_60};
    use crate::rgb::Rgb16;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_increment_value_ends_at_white() {
        let mut m = RgbManipulator::new(Rgb16::new(40000, 10000, 0));
        let mut steps = 0;
        let mut previous = m.value();
        while m.increment_value(0.07) {
            assert!(m.value() >= previous);
            previous = m.value();
            steps += 1;
            assert!(steps < 100);
        }
        assert_abs_diff_eq!(m.value(), 1.0, epsilon = 1e-9);
        assert_eq!(m.rgb::<u16>(), Rgb16::WHITE);
    }

    #[test]
    fn test_decrement_value_ends_at_black() {
        let mut m = RgbManipulator::new(Rgb16::new(65535, 30000, 20000));
        while m.decrement_value(0.1) {}
        assert_eq!(m.rgb::<u16>(), Rgb16::BLACK);
        assert!(!m.decrement_value(0.1));
    }

    #[test]
    fn test_value_shift_keeps_hue_and_chroma() {
        let mut m = RgbManipulator::new(RgbPn::new(0.6, 0.3, 0.2));
        let (hue, chroma) = (m.hue(), m.chroma());
        assert!(m.increment_value(0.1));
        assert_abs_diff_eq!(m.chroma(), chroma, epsilon = 1e-9);
        assert_abs_diff_eq!(
            m.hue().difference(&hue).unwrap_or(1.0),
            0.0,
            epsilon = 1e-9
        );
        assert!(m.decrement_value(0.1));
        let rgb = m.rgb::<f64>();
        assert_abs_diff_eq!(rgb.red, 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(rgb.blue, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_chroma_round_trip_remembers_hue() {
        let mut m = RgbManipulator::new(Rgb16::RED);
        assert_abs_diff_eq!(m.chroma(), 1.0, epsilon = 1e-9);
        while m.decrement_chroma(0.25) {}
        assert!(m.hue().is_grey());
        assert_eq!(m.chroma(), 0.0);
        assert_abs_diff_eq!(m.value(), 1.0 / 3.0, epsilon = 1e-9);
        let remembered = m.last_hue().and_then(|h| h.angle());
        assert_abs_diff_eq!(remembered.unwrap_or(1.0), 0.0, epsilon = 1e-9);

        assert!(m.increment_chroma(0.25));
        assert_abs_diff_eq!(m.hue().angle().unwrap_or(1.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.chroma(), 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(m.value(), 1.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_increment_chroma_stops_at_limit() {
        let mut m = RgbManipulator::new(RgbPn::new(0.5, 0.25, 0.25));
        let hue = m.hue();
        while m.increment_chroma(0.1) {}
        assert_abs_diff_eq!(m.chroma(), hue.max_chroma_for_value(m.value()), epsilon = 1e-9);
        assert_abs_diff_eq!(m.value(), 1.0 / 3.0, epsilon = 1e-9);
        assert_eq!(m.rgb::<u16>(), Rgb16::RED);
    }

    #[test]
    fn test_chroma_from_black_and_white() {
        let mut black = RgbManipulator::new(Rgb16::BLACK);
        assert!(black.increment_chroma(0.5));
        assert_eq!(black.rgb::<u16>(), Rgb16::new(32768, 0, 0));

        let mut white = RgbManipulator::new(Rgb16::WHITE);
        assert!(white.increment_chroma(0.5));
        assert_eq!(white.rgb::<u16>(), Rgb16::new(65535, 32768, 32768));
    }

    #[test]
    fn test_rotate_red_to_green() {
        let mut m = RgbManipulator::new(Rgb16::RED);
        assert!(m.rotate_hue(PI_120));
        assert_eq!(m.rgb::<u16>(), Rgb16::new(0, 65535, 0));
        assert_abs_diff_eq!(m.value(), 1.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_keeps_value_and_loses_chroma_only_if_needed() {
        let mut m = RgbManipulator::new(RgbPn::new(1.0, 0.0, 0.0));
        assert!(m.rotate_hue(PI_60));
        // Yellow at value 1/3 can only reach half chroma
        assert_abs_diff_eq!(m.value(), 1.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.chroma(), 0.5, epsilon = 1e-9);
        let rgb = m.rgb::<f64>();
        assert_abs_diff_eq!(rgb.red, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(rgb.green, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_grey_refuses_rotation() {
        let mut m = RgbManipulator::new(Rgb16::grey(30000));
        assert!(!m.rotate_hue(0.5));
        assert!(!m.decrement_chroma(0.1));
        assert_eq!(m.rgb::<u16>(), Rgb16::grey(30000));
    }

    #[test]
    fn test_non_positive_steps_are_refused() {
        let mut m = RgbManipulator::new(Rgb16::new(30000, 20000, 10000));
        assert!(!m.increment_value(0.0));
        assert!(!m.decrement_value(-0.1));
        assert!(!m.increment_chroma(0.0));
        assert!(!m.rotate_hue(0.0));
    }
}
