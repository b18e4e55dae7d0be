// ABOUTME: Paint colours: an HCV description plus transparency and finish ratings.
// ABOUTME: Also the named colour, the ideal palette and the colour source sum type.

use std::fmt;

use mcm_core::{Hcv, Hue, Rgb16};

use crate::rating::{Finish, Fluorescence, Metallic, Transparency};

/// Anything with a name and a colour that can go into a mixture
pub trait Paint {
    fn name(&self) -> &str;
    fn colour(&self) -> &Colour;
}

#[derive(Debug, Clone, Copy)]
pub struct Colour {
    hcv: Hcv<u16>,
    transparency: Transparency,
    finish: Finish,
    metallic: Metallic,
    fluorescence: Fluorescence,
}

impl Colour {
    /// An opaque flat colour
    pub fn new(rgb: Rgb16) -> Self {
        Self::with_ratings(rgb, Transparency::default(), Finish::default())
    }

    pub fn with_ratings(rgb: Rgb16, transparency: Transparency, finish: Finish) -> Self {
        Self {
            hcv: Hcv::new(rgb),
            transparency,
            finish,
            metallic: Metallic::default(),
            fluorescence: Fluorescence::default(),
        }
    }

    /// The same colour with its metallic and fluorescence ratings replaced
    pub fn with_effects(mut self, metallic: Metallic, fluorescence: Fluorescence) -> Self {
        self.metallic = metallic;
        self.fluorescence = fluorescence;
        self
    }

    pub fn rgb(&self) -> Rgb16 {
        self.hcv.rgb
    }

    pub fn hcv(&self) -> &Hcv<u16> {
        &self.hcv
    }

    pub fn hue(&self) -> Hue<u16> {
        self.hcv.hue
    }

    pub fn hue_angle(&self) -> Option<f64> {
        self.hcv.hue.angle()
    }

    pub fn hue_rgb(&self) -> Rgb16 {
        self.hcv.hue.rgb()
    }

    pub fn value(&self) -> f64 {
        self.hcv.value
    }

    pub fn value_rgb(&self) -> Rgb16 {
        self.hcv.value_rgb()
    }

    pub fn chroma(&self) -> f64 {
        self.hcv.chroma
    }

    pub fn transparency(&self) -> Transparency {
        self.transparency
    }

    pub fn finish(&self) -> Finish {
        self.finish
    }

    pub fn metallic(&self) -> Metallic {
        self.metallic
    }

    pub fn fluorescence(&self) -> Fluorescence {
        self.fluorescence
    }

    pub fn set_rgb(&mut self, rgb: Rgb16) {
        self.hcv = Hcv::new(rgb);
    }

    pub fn set_transparency(&mut self, transparency: Transparency) {
        self.transparency = transparency;
    }

    pub fn set_finish(&mut self, finish: Finish) {
        self.finish = finish;
    }

    pub fn set_metallic(&mut self, metallic: Metallic) {
        self.metallic = metallic;
    }

    pub fn set_fluorescence(&mut self, fluorescence: Fluorescence) {
        self.fluorescence = fluorescence;
    }
}

impl PartialEq for Colour {
    fn eq(&self, other: &Self) -> bool {
        self.rgb() == other.rgb()
            && self.transparency == other.transparency
            && self.finish == other.finish
            && self.metallic == other.metallic
            && self.fluorescence == other.fluorescence
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGB: {} Transparency: {} Finish: {} {}",
            self.rgb(),
            self.transparency,
            self.finish,
            self.hcv
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedColour {
    pub name: String,
    pub colour: Colour,
}

impl NamedColour {
    pub fn new(name: impl Into<String>, colour: Colour) -> Self {
        Self {
            name: name.into(),
            colour,
        }
    }
}

impl Paint for NamedColour {
    fn name(&self) -> &str {
        &self.name
    }

    fn colour(&self) -> &Colour {
        &self.colour
    }
}

impl fmt::Display for NamedColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The full range at full strength, light to dark round the wheel, all gloss
pub fn ideal_colours() -> Vec<NamedColour> {
    [
        ("White", Rgb16::WHITE),
        ("Magenta", Rgb16::MAGENTA),
        ("Red", Rgb16::RED),
        ("Yellow", Rgb16::YELLOW),
        ("Green", Rgb16::GREEN),
        ("Cyan", Rgb16::CYAN),
        ("Blue", Rgb16::BLUE),
        ("Black", Rgb16::BLACK),
    ]
    .into_iter()
    .map(|(name, rgb)| {
        let colour = Colour::with_ratings(rgb, Transparency::default(), Finish::from_value(4.0));
        NamedColour::new(name, colour)
    })
    .collect()
}

/// The forms a colour arrives in from the outside world
#[derive(Debug, Clone, Copy)]
pub enum ColourSource {
    Raw(Rgb16),
    Hcv(Hcv<u16>),
    Rated(Colour),
}

impl ColourSource {
    pub fn rgb(&self) -> Rgb16 {
        match self {
            ColourSource::Raw(rgb) => *rgb,
            ColourSource::Hcv(hcv) => hcv.rgb,
            ColourSource::Rated(colour) => colour.rgb(),
        }
    }

    pub fn hcv(&self) -> Hcv<u16> {
        match self {
            ColourSource::Raw(rgb) => Hcv::new(*rgb),
            ColourSource::Hcv(hcv) => *hcv,
            ColourSource::Rated(colour) => *colour.hcv(),
        }
    }

    /// Unrated sources get the default ratings
    pub fn into_colour(self) -> Colour {
        match self {
            ColourSource::Rated(colour) => colour,
            other => Colour::new(other.rgb()),
        }
    }
}

impl From<Rgb16> for ColourSource {
    fn from(rgb: Rgb16) -> Self {
        ColourSource::Raw(rgb)
    }
}

impl From<Hcv<u16>> for ColourSource {
    fn from(hcv: Hcv<u16>) -> Self {
        ColourSource::Hcv(hcv)
    }
}

impl From<Colour> for ColourSource {
    fn from(colour: Colour) -> Self {
        ColourSource::Rated(colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_ratings() {
        let colour = Colour::new(Rgb16::new(0x2D00, 0x2B00, 0x3000));
        assert_eq!(colour.transparency().abbrev().unwrap(), "O");
        assert_eq!(colour.finish().abbrev().unwrap(), "F");
    }

    #[test]
    fn test_set_rgb_refreshes_hcv() {
        let mut colour = Colour::new(Rgb16::BLACK);
        assert!(colour.hue().is_grey());
        colour.set_rgb(Rgb16::RED);
        assert_abs_diff_eq!(colour.chroma(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(colour.hue_angle().unwrap_or(1.0), 0.0, epsilon = 1e-9);
        colour.set_finish(Finish::from_value(4.0));
        assert_eq!(colour.finish().description().unwrap(), "Gloss");
    }

    #[test]
    fn test_ideal_colours() {
        let ideal = ideal_colours();
        assert_eq!(ideal.len(), 8);
        assert_eq!(ideal[0].colour.rgb(), Rgb16::WHITE);
        assert_eq!(ideal[7].name, "Black");
        for named in &ideal {
            assert_eq!(named.colour.finish().abbrev().unwrap(), "G");
            assert_eq!(named.colour.transparency().abbrev().unwrap(), "O");
        }
    }

    #[test]
    fn test_effects_default_and_compare() {
        let plain = Colour::new(Rgb16::new(0xD000, 0xB000, 0x3000));
        assert_eq!(plain.metallic().abbrev().unwrap(), "NM");
        assert_eq!(plain.fluorescence().abbrev().unwrap(), "NF");
        let gold = plain.with_effects(Metallic::from_value(3.0), Fluorescence::default());
        assert_eq!(gold.metallic().description().unwrap(), "Metal");
        assert_ne!(gold, plain);
    }

    #[test]
    fn test_colour_source_conversions() {
        let rgb = Rgb16::new(100, 200, 300);
        let from_raw = ColourSource::from(rgb);
        let from_hcv = ColourSource::from(Hcv::new(rgb));
        let rated = Colour::with_ratings(rgb, Transparency::from_value(4.0), Finish::default());
        let from_rated = ColourSource::from(rated);

        for source in [from_raw, from_hcv, from_rated] {
            assert_eq!(source.rgb(), rgb);
            assert_abs_diff_eq!(source.hcv().value, rgb.value());
        }
        assert_eq!(from_raw.into_colour(), Colour::new(rgb));
        assert_eq!(from_rated.into_colour().transparency().abbrev().unwrap(), "T");
    }
}
