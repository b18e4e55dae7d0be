// ABOUTME: Hue, chroma and value derived together from one RGB triple.
// ABOUTME: Provides value-preserving hue rotation and grey equivalents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hue::Hue;
use crate::rgb::{Channel, Rgb};
use crate::xy::Xy;

/// Which end of the grey scale a colour leans toward relative to its
/// full strength hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaSide {
    Black,
    White,
}

/// Chroma this close to one counts as full strength
pub const FULL_CHROMA_TOLERANCE: f64 = 1e-9;

/// Read-only description of a triple. Chroma and value are proportions.
#[derive(Debug, Clone, Copy)]
pub struct Hcv<C> {
    pub rgb: Rgb<C>,
    pub hue: Hue<C>,
    pub chroma: f64,
    pub value: f64,
}

impl<C: Channel> Hcv<C> {
    pub fn new(rgb: Rgb<C>) -> Self {
        let xy = Xy::from_rgb(&rgb);
        let hue = match xy.angle() {
            Some(angle) => Hue::from_angle(angle),
            None => Hue::grey(),
        };
        let chroma = (xy.hypot() * hue.chroma_correction() / C::one()).clamp(0.0, 1.0);
        Self {
            rgb,
            hue,
            chroma,
            value: rgb.value(),
        }
    }

    /// Grey with the same value
    pub fn value_rgb(&self) -> Rgb<C> {
        Rgb::grey_with_value(self.value)
    }

    /// The hue's own triple at `value` (this colour's value when `None`),
    /// carrying no more grey than the value requires
    pub fn hue_rgb_for_value(&self, value: Option<f64>) -> Rgb<C> {
        self.hue.rgb_with_value(value.unwrap_or(self.value))
    }

    /// The triple with its hue turned by `delta` radians at the same value.
    ///
    /// Two-channel colours carry no grey, so they are rebuilt from the new
    /// hue and only gain grey when the value demands it.
    pub fn rotated_rgb(&self, delta: f64) -> Rgb<C> {
        match (self.rgb.ncomps(), self.hue.angle()) {
            (2, Some(angle)) => Hue::<C>::from_angle(angle + delta).rgb_with_value(self.value),
            _ => self.rgb.rotated(delta),
        }
    }

    /// The grey reached by adding white or black until chroma is zero.
    /// A full strength colour goes to whichever end of the value axis its
    /// hue's max chroma value is closer to.
    pub fn zero_chroma_rgb(&self) -> Rgb<C> {
        if self.hue.is_grey() {
            return self.value_rgb();
        }
        let mcv = self.hue.max_chroma_value();
        let dc = 1.0 - self.chroma;
        if dc > FULL_CHROMA_TOLERANCE {
            return Rgb::grey_with_value((self.value - mcv * self.chroma) / dc);
        }
        if mcv < 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }

    /// Lighter than the full strength hue counts as the white side
    pub fn chroma_side(&self) -> ChromaSide {
        if self.rgb.sum() > self.hue.rgb().sum() {
            ChromaSide::White
        } else {
            ChromaSide::Black
        }
    }

    pub fn greyness(&self) -> f64 {
        1.0 - self.chroma
    }

    pub fn is_grey(&self) -> bool {
        self.hue.is_grey()
    }
}

impl<C: Channel> From<Rgb<C>> for Hcv<C> {
    fn from(rgb: Rgb<C>) -> Self {
        Self::new(rgb)
    }
}

impl<C: Channel> fmt::Display for Hcv<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(HUE = {}, VALUE = {:.2}, CHROMA = {:.2})",
            self.hue.rgb(),
            self.value,
            self.chroma
        )
    }
}
