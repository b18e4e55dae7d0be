// ABOUTME: Mixing paints by parts into a blended colour.
// ABOUTME: Colour and ratings are parts-weighted means; parts can be reduced by their GCD.

use std::fmt;

use mcm_core::Rgb16;

use crate::colour::{Colour, Paint};
use crate::rating::{Finish, Fluorescence, Metallic, Transparency};

/// A quantity of one paint in a mixture
#[derive(Debug, Clone, PartialEq)]
pub struct PaintBlob<P> {
    pub paint: P,
    pub parts: u32,
}

impl<P> PaintBlob<P> {
    pub fn new(paint: P, parts: u32) -> Self {
        Self { paint, parts }
    }
}

pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Greatest common divisor of all the parts, zero when every part is zero
pub fn gcd_of<I: IntoIterator<Item = u32>>(parts: I) -> u32 {
    parts.into_iter().fold(0, gcd)
}

#[derive(Debug, Clone)]
pub struct MixedColour<P> {
    colour: Colour,
    blobs: Vec<PaintBlob<P>>,
}

impl<P: Paint> MixedColour<P> {
    /// Mix the blobs. Components are kept largest share first; a mixture
    /// with no parts at all is black with zero ratings.
    pub fn new(mut blobs: Vec<PaintBlob<P>>) -> Self {
        let total: u64 = blobs.iter().map(|b| b.parts as u64).sum();
        let colour = if total == 0 {
            Colour::with_ratings(
                Rgb16::BLACK,
                Transparency::from_value(0.0),
                Finish::from_value(0.0),
            )
            .with_effects(Metallic::from_value(0.0), Fluorescence::from_value(0.0))
        } else {
            let mut channels = [0u64; 3];
            // transparency, finish, metallic, fluorescence
            let mut ratings = [0.0f64; 4];
            for blob in &blobs {
                let colour = blob.paint.colour();
                let parts = blob.parts as u64;
                for (sum, channel) in channels.iter_mut().zip(colour.rgb().to_array()) {
                    *sum += channel as u64 * parts;
                }
                let values = [
                    colour.transparency().value(),
                    colour.finish().value(),
                    colour.metallic().value(),
                    colour.fluorescence().value(),
                ];
                for (sum, value) in ratings.iter_mut().zip(values) {
                    *sum += value * blob.parts as f64;
                }
            }
            let [transparency, finish, metallic, fluorescence] = ratings.map(|r| r / total as f64);
            // round half up
            let mean = |sum: u64| ((2 * sum + total) / (2 * total)) as u16;
            Colour::with_ratings(
                Rgb16::new(mean(channels[0]), mean(channels[1]), mean(channels[2])),
                Transparency::from_value(transparency),
                Finish::from_value(finish),
            )
            .with_effects(
                Metallic::from_value(metallic),
                Fluorescence::from_value(fluorescence),
            )
        };
        blobs.sort_by(|a, b| b.parts.cmp(&a.parts));
        Self { colour, blobs }
    }

    pub fn colour(&self) -> &Colour {
        &self.colour
    }

    pub fn blobs(&self) -> &[PaintBlob<P>] {
        &self.blobs
    }

    pub fn total_parts(&self) -> u64 {
        self.blobs.iter().map(|b| b.parts as u64).sum()
    }

    pub fn contains_paint(&self, name: &str) -> bool {
        self.blobs.iter().any(|b| b.paint.name() == name)
    }

    /// The same mixture with every part divided by the parts' GCD
    pub fn simplified(self) -> Self {
        let divisor = gcd_of(self.blobs.iter().map(|b| b.parts));
        if divisor <= 1 {
            return self;
        }
        let blobs = self
            .blobs
            .into_iter()
            .map(|b| PaintBlob::new(b.paint, b.parts / divisor))
            .collect();
        Self::new(blobs)
    }
}

impl<P: Paint> fmt::Display for MixedColour<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mixed Colour: {}", self.colour)?;
        writeln!(f, "Components:")?;
        for blob in &self.blobs {
            writeln!(f, "\t{} Part(s): {}", blob.parts, blob.paint.name())?;
        }
        Ok(())
    }
}

/// A mixture the user has named and annotated
#[derive(Debug, Clone)]
pub struct NamedMixedColour<P> {
    pub name: String,
    pub notes: String,
    pub mixture: MixedColour<P>,
}

impl<P: Paint> NamedMixedColour<P> {
    pub fn new(name: impl Into<String>, notes: impl Into<String>, blobs: Vec<PaintBlob<P>>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
            mixture: MixedColour::new(blobs),
        }
    }
}

impl<P: Paint> Paint for NamedMixedColour<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn colour(&self) -> &Colour {
        self.mixture.colour()
    }
}

impl<P: Paint> fmt::Display for NamedMixedColour<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: \"{}\" Notes: \"{}\"", self.name, self.notes)?;
        write!(f, "{}", self.mixture)
    }
}
