// ABOUTME: Paint series definition files: a manufacturer, a series name and its paints.
// ABOUTME: Reads the current keyword form and the legacy 8-bit form, writes the current form.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mcm_core::Rgb16;

use crate::colour::{ideal_colours, Colour, NamedColour, Paint};
use crate::rating::{Finish, Fluorescence, Metallic, RatingError, Transparency};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId {
    pub maker: String,
    pub name: String,
}

impl SeriesId {
    pub fn new(maker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            maker: maker.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.maker, self.name)
    }
}

/// A paint as sold in a series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPaint {
    pub series: SeriesId,
    pub named: NamedColour,
    pub notes: String,
}

impl SeriesPaint {
    /// The `ModelPaint(...)` line written to series files
    pub fn definition(&self) -> Result<String, RatingError> {
        let colour = self.colour();
        let rgb = colour.rgb();
        Ok(format!(
            "ModelPaint(name=\"{}\", rgb=RGB16(red=0x{:X}, green=0x{:X}, blue=0x{:X}), \
             transparency=\"{}\", finish=\"{}\", metallic=\"{}\", fluorescence=\"{}\", notes=\"{}\")",
            self.named.name,
            rgb.red,
            rgb.green,
            rgb.blue,
            colour.transparency().abbrev()?,
            colour.finish().abbrev()?,
            colour.metallic().abbrev()?,
            colour.fluorescence().abbrev()?,
            self.notes
        ))
    }
}

impl Paint for SeriesPaint {
    fn name(&self) -> &str {
        &self.named.name
    }

    fn colour(&self) -> &Colour {
        &self.named.colour
    }
}

impl fmt::Display for SeriesPaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.named.name, self.series)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("Too few lines: {0}")]
    TooFewLines(usize),

    #[error("Manufacturer not found")]
    MissingManufacturer,

    #[error("Series name not found")]
    MissingSeriesName,

    #[error("Badly formed definition: {0}")]
    BadlyFormed(String),

    #[error("Bad rating: {0}")]
    Rating(#[from] RatingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintSeries {
    id: SeriesId,
    paints: BTreeMap<String, SeriesPaint>,
}

impl PaintSeries {
    pub fn new(id: SeriesId) -> Self {
        Self {
            id,
            paints: BTreeMap::new(),
        }
    }

    /// The eight full strength colours of an imaginary perfect range
    pub fn ideal() -> Self {
        let mut series = Self::new(SeriesId::new("Imaginary", "Ideal Paint Colours Series"));
        for colour in ideal_colours() {
            series.add_paint(colour, "");
        }
        series
    }

    pub fn id(&self) -> &SeriesId {
        &self.id
    }

    /// Add a paint, replacing any existing paint of the same name
    pub fn add_paint(&mut self, named: NamedColour, notes: impl Into<String>) {
        let paint = SeriesPaint {
            series: self.id.clone(),
            named,
            notes: notes.into(),
        };
        self.paints.insert(paint.named.name.clone(), paint);
    }

    pub fn get(&self, name: &str) -> Option<&SeriesPaint> {
        self.paints.get(name)
    }

    /// Paints in name order
    pub fn paints(&self) -> impl Iterator<Item = &SeriesPaint> {
        self.paints.values()
    }

    pub fn len(&self) -> usize {
        self.paints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paints.is_empty()
    }

    pub fn definition_text(&self) -> Result<String, SeriesError> {
        let mut text = format!("Manufacturer: {}\nSeries: {}\n", self.id.maker, self.id.name);
        for paint in self.paints.values() {
            text.push_str(&paint.definition()?);
            text.push('\n');
        }
        Ok(text)
    }

    pub fn load(path: &Path) -> Result<Self, SeriesError> {
        let content = std::fs::read_to_string(path)?;
        let series: Self = content.parse()?;
        tracing::info!(
            "Loaded series {} with {} paints from {}",
            series.id,
            series.len(),
            path.display()
        );
        Ok(series)
    }

    pub fn save(&self, path: &Path) -> Result<(), SeriesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.definition_text()?)?;
        Ok(())
    }
}

impl FromStr for PaintSeries {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() < 2 {
            return Err(SeriesError::TooFewLines(lines.len()));
        }
        let maker = header_value(lines[0], "Manufacturer:").ok_or(SeriesError::MissingManufacturer)?;
        let name = header_value(lines[1], "Series:").ok_or(SeriesError::MissingSeriesName)?;

        let mut series = Self::new(SeriesId::new(maker, name));
        let body: Vec<&str> = lines[2..]
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();
        let legacy = body.first().is_some_and(|line| parse_legacy_line(line).is_ok());
        if legacy {
            tracing::debug!("Reading {} in the legacy 8-bit format", series.id);
        }
        for line in body {
            if legacy {
                series.add_paint(parse_legacy_line(line)?, "");
            } else {
                let (named, notes) = parse_paint_line(line)?;
                series.add_paint(named, notes);
            }
        }
        Ok(series)
    }
}

fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let value = line.trim().strip_prefix(key)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn badly_formed(line: &str) -> SeriesError {
    SeriesError::BadlyFormed(line.to_string())
}

/// `NamedColour(name="X", rgb=RGB(..), transparency="O", finish="F")`, also
/// spelled `ModelPaint(...)` with metallic, fluorescence and notes.
/// Missing ratings take their defaults.
fn parse_paint_line(line: &str) -> Result<(NamedColour, String), SeriesError> {
    let body = ["NamedColour(", "ModelPaint("]
        .iter()
        .find_map(|head| line.strip_prefix(head))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| badly_formed(line))?;

    let mut name = None;
    let mut rgb = None;
    let mut transparency = Transparency::default();
    let mut finish = Finish::default();
    let mut metallic = Metallic::default();
    let mut fluorescence = Fluorescence::default();
    let mut notes = String::new();
    for argument in split_arguments(body) {
        let (key, value) = argument.split_once('=').ok_or_else(|| badly_formed(line))?;
        let value = value.trim();
        match key.trim() {
            "name" => name = Some(unquote(value).to_string()),
            "rgb" => rgb = Some(parse_rgb(value).ok_or_else(|| badly_formed(line))?),
            "transparency" => transparency = unquote(value).parse()?,
            "finish" => finish = unquote(value).parse()?,
            "metallic" => metallic = unquote(value).parse()?,
            "fluorescence" => fluorescence = unquote(value).parse()?,
            "notes" => notes = unquote(value).to_string(),
            other => tracing::trace!("Ignoring paint attribute {}", other),
        }
    }
    match (name, rgb) {
        (Some(name), Some(rgb)) => Ok((
            NamedColour::new(
                name,
                Colour::with_ratings(rgb, transparency, finish).with_effects(metallic, fluorescence),
            ),
            notes,
        )),
        _ => Err(badly_formed(line)),
    }
}

/// `Name: RGB(r, g, b), Transparency('O'), Finish('F')` with 8-bit channels
fn parse_legacy_line(line: &str) -> Result<NamedColour, SeriesError> {
    let (name, rest) = line.split_once(':').ok_or_else(|| badly_formed(line))?;
    let rest = rest.trim_start();
    let rgb_end = rest.find(')').ok_or_else(|| badly_formed(line))? + 1;
    let (rgb_text, rest) = rest.split_at(rgb_end);
    let channels = parse_channels(rgb_text.strip_prefix("RGB").unwrap_or(rgb_text))
        .filter(|channels| channels.iter().all(|c| *c <= 0xFF))
        .ok_or_else(|| badly_formed(line))?;

    let mut arguments = split_arguments(rest.strip_prefix(',').ok_or_else(|| badly_formed(line))?);
    let transparency = arguments
        .next()
        .and_then(|a| call_argument(a, "Transparency"))
        .ok_or_else(|| badly_formed(line))?
        .parse::<Transparency>()?;
    let finish = arguments
        .next()
        .and_then(|a| call_argument(a, "Finish"))
        .ok_or_else(|| badly_formed(line))?
        .parse::<Finish>()?;
    if arguments.next().is_some() {
        return Err(badly_formed(line));
    }

    let rgb = Rgb16::new(channels[0] << 8, channels[1] << 8, channels[2] << 8);
    Ok(NamedColour::new(
        name.trim(),
        Colour::with_ratings(rgb, transparency, finish),
    ))
}

/// `Transparency('O')` gives `O`
fn call_argument<'a>(text: &'a str, function: &str) -> Option<&'a str> {
    let inner = text
        .trim()
        .strip_prefix(function)?
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(unquote(inner.trim()))
}

/// `RGB(..)` or `RGB16(..)` with positional or keyword channels
fn parse_rgb(text: &str) -> Option<Rgb16> {
    let args = text
        .strip_prefix("RGB16")
        .or_else(|| text.strip_prefix("RGB"))?;
    let [red, green, blue] = parse_channels(args)?;
    Some(Rgb16::new(red, green, blue))
}

/// `(a, b, c)` where each entry may carry a `red=` style label and may be hex
fn parse_channels(text: &str) -> Option<[u16; 3]> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut channels = [0u16; 3];
    let mut count = 0;
    for part in inner.split(',') {
        if count == 3 {
            return None;
        }
        let number = match part.split_once('=') {
            Some((_, number)) => number,
            None => part,
        };
        channels[count] = parse_channel(number.trim())?;
        count += 1;
    }
    (count == 3).then_some(channels)
}

fn parse_channel(text: &str) -> Option<u16> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Split on commas that are outside quotes and brackets
fn split_arguments(text: &str) -> impl Iterator<Item = &str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces.into_iter().map(str::trim).filter(|p| !p.is_empty())
}
