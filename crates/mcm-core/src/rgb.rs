// ABOUTME: Three channel colour triples at 8-bit, 16-bit or proportional depth.
// ABOUTME: Handles depth conversion, value, and hue rotation about the grey axis.

use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::angle::{self, PI_120, SIN_120};

/// A single colour channel. `ONE` is full intensity.
pub trait Channel: Copy + PartialOrd + fmt::Debug + Default + ToPrimitive + 'static {
    const ZERO: Self;
    const ONE: Self;

    /// Build a channel from a value already expressed in this channel's units,
    /// rounding and clamping as the depth requires.
    fn from_scaled(value: f64) -> Self;

    /// Write the channel the way series files expect it
    fn write_channel(self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }

    fn one() -> f64 {
        Self::ONE.as_f64()
    }
}

impl Channel for u8 {
    const ZERO: Self = 0;
    const ONE: Self = u8::MAX;

    fn from_scaled(value: f64) -> Self {
        (value + 0.5).floor().clamp(0.0, 255.0) as u8
    }

    fn write_channel(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self)
    }
}

impl Channel for u16 {
    const ZERO: Self = 0;
    const ONE: Self = u16::MAX;

    fn from_scaled(value: f64) -> Self {
        (value + 0.5).floor().clamp(0.0, 65535.0) as u16
    }

    fn write_channel(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self)
    }
}

impl Channel for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_scaled(value: f64) -> Self {
        value.clamp(0.0, 1.0)
    }

    fn write_channel(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb<C> {
    pub red: C,
    pub green: C,
    pub blue: C,
}

pub type Rgb8 = Rgb<u8>;
pub type Rgb16 = Rgb<u16>;
/// Proportional channels in [0, 1]
pub type RgbPn = Rgb<f64>;

impl<C: Channel> Rgb<C> {
    pub const BLACK: Self = Self::new(C::ZERO, C::ZERO, C::ZERO);
    pub const WHITE: Self = Self::new(C::ONE, C::ONE, C::ONE);
    pub const RED: Self = Self::new(C::ONE, C::ZERO, C::ZERO);
    pub const GREEN: Self = Self::new(C::ZERO, C::ONE, C::ZERO);
    pub const BLUE: Self = Self::new(C::ZERO, C::ZERO, C::ONE);
    pub const CYAN: Self = Self::new(C::ZERO, C::ONE, C::ONE);
    pub const MAGENTA: Self = Self::new(C::ONE, C::ZERO, C::ONE);
    pub const YELLOW: Self = Self::new(C::ONE, C::ONE, C::ZERO);

    pub const fn new(red: C, green: C, blue: C) -> Self {
        Self { red, green, blue }
    }

    pub const fn grey(level: C) -> Self {
        Self::new(level, level, level)
    }

    /// Grey with the given proportional value
    pub fn grey_with_value(value: f64) -> Self {
        Self::grey(C::from_scaled(value * C::one()))
    }

    pub fn from_array(channels: [C; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    pub fn to_array(&self) -> [C; 3] {
        [self.red, self.green, self.blue]
    }

    /// Channels in this depth's units as floats
    pub fn as_f64_array(&self) -> [f64; 3] {
        [self.red.as_f64(), self.green.as_f64(), self.blue.as_f64()]
    }

    /// Round and clamp channels given in this depth's units
    pub fn from_f64_array(channels: [f64; 3]) -> Self {
        Self::new(
            C::from_scaled(channels[0]),
            C::from_scaled(channels[1]),
            C::from_scaled(channels[2]),
        )
    }

    /// Rescale to another depth
    pub fn convert<D: Channel>(&self) -> Rgb<D> {
        let [r, g, b] = self.as_f64_array();
        let (to, from) = (D::one(), C::one());
        Rgb::new(
            D::from_scaled(r * to / from),
            D::from_scaled(g * to / from),
            D::from_scaled(b * to / from),
        )
    }

    pub fn sum(&self) -> f64 {
        self.as_f64_array().iter().sum()
    }

    /// Mean channel intensity as a proportion of full scale
    pub fn value(&self) -> f64 {
        self.sum() / (3.0 * C::one())
    }

    /// Number of non-zero channels
    pub fn ncomps(&self) -> usize {
        self.to_array().iter().filter(|c| **c > C::ZERO).count()
    }

    pub fn is_grey(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// Channel indices ordered from largest to smallest value
    pub fn indices_value_order(&self) -> [usize; 3] {
        let channels = self.to_array();
        let mut order = [0, 1, 2];
        order.sort_by(|a, b| {
            channels[*b]
                .partial_cmp(&channels[*a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    pub fn max_channel(&self) -> C {
        self[self.indices_value_order()[0]]
    }

    pub fn min_channel(&self) -> C {
        self[self.indices_value_order()[2]]
    }

    /// Cyclic channel permutation equal to a rotation of `thirds` * 120 degrees.
    /// A positive step moves red into green, green into blue and blue into red.
    pub fn permuted(&self, thirds: i32) -> Self {
        Self::from_array(permute(self.to_array(), thirds))
    }

    /// Rotate the hue by `delta` radians keeping the value unchanged.
    ///
    /// Whole thirds of a turn are exact channel permutations. The remainder
    /// is an exact rotation about the grey axis; if that pushes a channel out
    /// of range the chromatic part is shrunk toward the grey of equal value
    /// until it fits.
    pub fn rotated(&self, delta: f64) -> Self {
        let delta = angle::normalize(delta);
        if delta == 0.0 || delta.is_nan() {
            return *self;
        }

        let mut residual = delta;
        let mut channels = self.as_f64_array();
        if residual >= PI_120 {
            channels = permute(channels, 1);
            residual -= PI_120;
        } else if residual <= -PI_120 {
            channels = permute(channels, -1);
            residual += PI_120;
        }
        if residual == 0.0 {
            return Self::from_f64_array(channels);
        }

        let total: f64 = channels.iter().sum();
        let k1 = (PI_120 - residual.abs()).sin() / SIN_120;
        let k2 = residual.abs().sin() / SIN_120;
        let neighbour = permute(channels, if residual > 0.0 { 1 } else { -1 });
        let mut rotated = [0.0; 3];
        for i in 0..3 {
            rotated[i] = k1 * channels[i] + k2 * neighbour[i];
        }
        let shift = (total - rotated.iter().sum::<f64>()) / 3.0;
        for channel in rotated.iter_mut() {
            *channel += shift;
        }

        Self::from_f64_array(fit_to_gamut(rotated, total / 3.0, C::one()))
    }

    /// Rounded mean of a set of samples, `None` when there are none
    pub fn mean<I: IntoIterator<Item = Self>>(samples: I) -> Option<Self> {
        let mut totals = [0.0; 3];
        let mut count = 0usize;
        for sample in samples {
            for (total, channel) in totals.iter_mut().zip(sample.as_f64_array()) {
                *total += channel;
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self::from_f64_array(totals.map(|t| t / n)))
    }
}

fn permute<T: Copy>(channels: [T; 3], thirds: i32) -> [T; 3] {
    let [r, g, b] = channels;
    match thirds.rem_euclid(3) {
        0 => channels,
        1 => [b, r, g],
        _ => [g, b, r],
    }
}

fn fit_to_gamut(channels: [f64; 3], mean: f64, one: f64) -> [f64; 3] {
    let mut t: f64 = 1.0;
    for channel in channels {
        if channel < 0.0 {
            t = t.min(mean / (mean - channel));
        } else if channel > one {
            t = t.min((one - mean) / (channel - mean));
        }
    }
    if t < 1.0 {
        channels.map(|c| mean + t * (c - mean))
    } else {
        channels
    }
}

impl RgbPn {
    /// Scale every channel
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_f64_array(self.as_f64_array().map(|c| c * factor))
    }

    /// Add a grey level to every channel
    pub fn lifted(&self, amount: f64) -> Self {
        Self::from_f64_array(self.as_f64_array().map(|c| c + amount))
    }
}

impl<C> Index<usize> for Rgb<C> {
    type Output = C;

    fn index(&self, index: usize) -> &C {
        match index {
            0 => &self.red,
            1 => &self.green,
            2 => &self.blue,
            _ => panic!("RGB channel index out of range: {}", index),
        }
    }
}

impl<C> IndexMut<usize> for Rgb<C> {
    fn index_mut(&mut self, index: usize) -> &mut C {
        match index {
            0 => &mut self.red,
            1 => &mut self.green,
            2 => &mut self.blue,
            _ => panic!("RGB channel index out of range: {}", index),
        }
    }
}

impl<C: Channel> fmt::Display for Rgb<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB(")?;
        self.red.write_channel(f)?;
        write!(f, ", ")?;
        self.green.write_channel(f)?;
        write!(f, ", ")?;
        self.blue.write_channel(f)?;
        write!(f, ")")
    }
}
