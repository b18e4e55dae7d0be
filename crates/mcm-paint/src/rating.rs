// ABOUTME: Transparency, finish, metallic and fluorescence ratings for paints.
// ABOUTME: Each rating is a float on a scale of named levels so mixtures can average them.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One named step on a rating scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub abbrev: &'static str,
    pub description: &'static str,
    pub value: f64,
}

pub trait Scale {
    const NAME: &'static str;
    const LEVELS: &'static [Level];
    const DEFAULT_VALUE: f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinishScale;

impl Scale for FinishScale {
    const NAME: &'static str = "finish";
    const LEVELS: &'static [Level] = &[
        Level { abbrev: "G", description: "Gloss", value: 4.0 },
        Level { abbrev: "SG", description: "Semi-gloss", value: 3.0 },
        Level { abbrev: "SF", description: "Semi-flat", value: 2.0 },
        Level { abbrev: "F", description: "Flat", value: 1.0 },
    ];
    const DEFAULT_VALUE: f64 = 1.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransparencyScale;

impl Scale for TransparencyScale {
    const NAME: &'static str = "transparency";
    const LEVELS: &'static [Level] = &[
        Level { abbrev: "O", description: "Opaque", value: 1.0 },
        Level { abbrev: "SO", description: "Semi-opaque", value: 2.0 },
        Level { abbrev: "ST", description: "Semi-transparent", value: 3.0 },
        Level { abbrev: "T", description: "Transparent", value: 4.0 },
    ];
    const DEFAULT_VALUE: f64 = 1.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetallicScale;

impl Scale for MetallicScale {
    const NAME: &'static str = "metallic";
    const LEVELS: &'static [Level] = &[
        Level { abbrev: "NM", description: "Nonmetallic", value: 1.0 },
        Level { abbrev: "MY", description: "Metallic", value: 2.0 },
        Level { abbrev: "M", description: "Metal", value: 3.0 },
    ];
    const DEFAULT_VALUE: f64 = 1.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FluorescenceScale;

impl Scale for FluorescenceScale {
    const NAME: &'static str = "fluorescence";
    const LEVELS: &'static [Level] = &[
        Level { abbrev: "NF", description: "Nonfluorescent", value: 1.0 },
        Level { abbrev: "SF", description: "Semi-fluorescent", value: 2.0 },
        Level { abbrev: "F", description: "Fluorescent", value: 3.0 },
    ];
    const DEFAULT_VALUE: f64 = 1.0;
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RatingError {
    #[error("Unrecognized {scale} value: {text}")]
    BadValue { scale: &'static str, text: String },

    #[error("Invalid {scale} rating: {value}")]
    Invalid { scale: &'static str, value: f64 },
}

/// A position on a rating scale. Mixed paints land between levels.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Rating<S> {
    value: f64,
    #[serde(skip)]
    scale: PhantomData<S>,
}

pub type Finish = Rating<FinishScale>;
pub type Transparency = Rating<TransparencyScale>;
pub type Metallic = Rating<MetallicScale>;
pub type Fluorescence = Rating<FluorescenceScale>;

impl<S: Scale> Rating<S> {
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            scale: PhantomData,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn levels() -> &'static [Level] {
        S::LEVELS
    }

    /// The level this rating rounds to
    pub fn level(&self) -> Result<&'static Level, RatingError> {
        let rounded = self.value.round();
        S::LEVELS
            .iter()
            .find(|level| level.value == rounded)
            .ok_or(RatingError::Invalid {
                scale: S::NAME,
                value: self.value,
            })
    }

    pub fn abbrev(&self) -> Result<&'static str, RatingError> {
        self.level().map(|level| level.abbrev)
    }

    pub fn description(&self) -> Result<&'static str, RatingError> {
        self.level().map(|level| level.description)
    }
}

impl<S: Scale> Default for Rating<S> {
    fn default() -> Self {
        Self::from_value(S::DEFAULT_VALUE)
    }
}

impl<S> Clone for Rating<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Rating<S> {}

impl<S> PartialEq for Rating<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<S> PartialOrd for Rating<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<S: Scale> fmt::Debug for Rating<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rating<{}>({})", S::NAME, self.value)
    }
}

/// Writes the abbreviation, or the raw number when it matches no level
impl<S: Scale> fmt::Display for Rating<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.abbrev() {
            Ok(abbrev) => write!(f, "{}", abbrev),
            Err(_) => write!(f, "{}", self.value),
        }
    }
}

/// Accepts an abbreviation, a description or a plain number
impl<S: Scale> FromStr for Rating<S> {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Some(level) = S::LEVELS
            .iter()
            .find(|level| level.abbrev == text || level.description == text)
        {
            return Ok(Self::from_value(level.value));
        }
        text.parse::<f64>()
            .map(Self::from_value)
            .map_err(|_| RatingError::BadValue {
                scale: S::NAME,
                text: text.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_abbrev_and_description() {
        assert_eq!("SG".parse::<Finish>().unwrap().value(), 3.0);
        assert_eq!("Semi-transparent".parse::<Transparency>().unwrap().value(), 3.0);
        assert_eq!("2.5".parse::<Finish>().unwrap().value(), 2.5);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "Shiny".parse::<Finish>().unwrap_err();
        assert!(matches!(err, RatingError::BadValue { scale: "finish", .. }));
        // Abbreviations belong to their own scale
        assert!("G".parse::<Transparency>().is_err());
    }

    #[test]
    fn test_abbrev_rounds_value() {
        assert_eq!(Finish::from_value(3.4).abbrev().unwrap(), "SG");
        assert_eq!(Finish::from_value(1.5).abbrev().unwrap(), "SF");
        assert_eq!(Transparency::from_value(3.6).description().unwrap(), "Transparent");
    }

    #[test]
    fn test_out_of_scale_value() {
        let rating = Transparency::from_value(0.0);
        assert!(matches!(rating.abbrev(), Err(RatingError::Invalid { .. })));
        assert_eq!(rating.to_string(), "0");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Transparency::default().abbrev().unwrap(), "O");
        assert_eq!(Finish::default().abbrev().unwrap(), "F");
        assert_eq!(Metallic::default().abbrev().unwrap(), "NM");
        assert_eq!(Fluorescence::default().description().unwrap(), "Nonfluorescent");
    }

    #[test]
    fn test_metallic_and_fluorescence_levels() {
        assert_eq!("M".parse::<Metallic>().unwrap().description().unwrap(), "Metal");
        assert_eq!("Metallic".parse::<Metallic>().unwrap().abbrev().unwrap(), "MY");
        assert_eq!("F".parse::<Fluorescence>().unwrap().value(), 3.0);
        // Same abbreviation, different scale
        assert_eq!("SF".parse::<Fluorescence>().unwrap().value(), 2.0);
        assert!(matches!(
            Metallic::from_value(4.0).abbrev(),
            Err(RatingError::Invalid { scale: "metallic", .. })
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(Finish::from_value(4.0) > Finish::from_value(1.0));
    }

    #[test]
    fn test_serde_as_plain_number() {
        let json = serde_json::to_string(&Finish::from_value(2.0)).unwrap();
        assert_eq!(json, "2.0");
        let back: Finish = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Finish::from_value(2.0));
    }
}
