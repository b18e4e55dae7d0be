// ABOUTME: Mixing session persistence.
// ABOUTME: Saves the target colour and named mixtures to disk and rebuilds them from loaded series.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use mcm_core::Rgb16;

use crate::colour::Paint;
use crate::mixture::{NamedMixedColour, PaintBlob};
use crate::series::{PaintSeries, SeriesId, SeriesPaint};

/// One component of a saved mixture, referring to a series paint by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureComponent {
    pub series: SeriesId,
    pub paint: String,
    pub parts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMixture {
    pub name: String,
    pub notes: String,
    pub components: Vec<MixtureComponent>,
}

/// Everything needed to pick up a mixing session where it was left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingSession {
    pub version: u32,
    /// Colour being matched
    pub target: Option<Rgb16>,
    /// Series files the mixtures draw on
    pub series_files: Vec<PathBuf>,
    pub mixtures: Vec<SavedMixture>,
}

impl MixingSession {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            target: None,
            series_files: Vec::new(),
            mixtures: Vec::new(),
        }
    }

    /// Record a mixture by reference to its series paints
    pub fn add_mixture(&mut self, mixture: &NamedMixedColour<SeriesPaint>) {
        let components = mixture
            .mixture
            .blobs()
            .iter()
            .map(|blob| MixtureComponent {
                series: blob.paint.series.clone(),
                paint: blob.paint.name().to_string(),
                parts: blob.parts,
            })
            .collect();
        self.mixtures.push(SavedMixture {
            name: mixture.name.clone(),
            notes: mixture.notes.clone(),
            components,
        });
    }

    /// Rebuild the saved mixtures from the given series
    pub fn resolve(
        &self,
        series: &[PaintSeries],
    ) -> Result<Vec<NamedMixedColour<SeriesPaint>>, SessionError> {
        self.mixtures
            .iter()
            .map(|saved| {
                let blobs = saved
                    .components
                    .iter()
                    .map(|component| {
                        series
                            .iter()
                            .filter(|s| *s.id() == component.series)
                            .find_map(|s| s.get(&component.paint))
                            .map(|paint| PaintBlob::new(paint.clone(), component.parts))
                            .ok_or_else(|| SessionError::UnknownPaint {
                                series: component.series.clone(),
                                paint: component.paint.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(NamedMixedColour::new(&saved.name, &saved.notes, blobs))
            })
            .collect()
    }

    /// Get the default session file path (~/.local/state/mcm/session.bin)
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|p| p.join("mcm").join("session.bin"))
    }

    /// Save as zstd compressed JSON
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(self)?;
        let mut encoder = zstd::Encoder::new(Vec::new(), 3)?;
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;

        std::fs::write(path, compressed)?;
        tracing::debug!("Saved {} mixtures to {}", self.mixtures.len(), path.display());
        Ok(())
    }

    pub fn save_to_default(&self) -> Result<PathBuf, SessionError> {
        let path = Self::default_path().ok_or(SessionError::NoStatePath)?;
        self.save(&path)?;
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let compressed = std::fs::read(path)?;

        let mut decoder = zstd::Decoder::new(&compressed[..])?;
        let mut json = Vec::new();
        decoder.read_to_end(&mut json)?;

        let session: MixingSession = serde_json::from_slice(&json)?;
        if session.version > Self::CURRENT_VERSION {
            return Err(SessionError::UnsupportedVersion(session.version));
        }

        Ok(session)
    }

    /// Load session from default path, returns None if not found or invalid
    pub fn load_from_default() -> Option<Self> {
        let path = Self::default_path()?;
        Self::load(&path).ok()
    }
}

impl Default for MixingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine state directory")]
    NoStatePath,

    #[error("Unsupported session version: {0}")]
    UnsupportedVersion(u32),

    #[error("Paint {paint:?} not found in series {series}")]
    UnknownPaint { series: SeriesId, paint: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mixture(ideal: &PaintSeries) -> NamedMixedColour<SeriesPaint> {
        let red = ideal.get("Red").unwrap().clone();
        let white = ideal.get("White").unwrap().clone();
        NamedMixedColour::new(
            "Pink",
            "undercoat",
            vec![PaintBlob::new(red, 1), PaintBlob::new(white, 1)],
        )
    }

    #[test]
    fn test_session_roundtrip() {
        let ideal = PaintSeries::ideal();
        let mut session = MixingSession::new();
        session.target = Some(Rgb16::new(60000, 30000, 30000));
        session.series_files.push(PathBuf::from("/home/test/ideal.txt"));
        session.add_mixture(&sample_mixture(&ideal));

        let temp_path = std::env::temp_dir().join("mcm_test_session.bin");
        session.save(&temp_path).unwrap();
        let loaded = MixingSession::load(&temp_path).unwrap();

        assert_eq!(loaded, session);
        assert_eq!(loaded.mixtures[0].components.len(), 2);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_resolve_rebuilds_mixture() {
        let ideal = PaintSeries::ideal();
        let mut session = MixingSession::new();
        session.add_mixture(&sample_mixture(&ideal));

        let resolved = session.resolve(&[ideal]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Pink");
        assert_eq!(resolved[0].colour().rgb(), Rgb16::new(65535, 32768, 32768));
    }

    #[test]
    fn test_resolve_reports_missing_paint() {
        let ideal = PaintSeries::ideal();
        let mut session = MixingSession::new();
        session.add_mixture(&sample_mixture(&ideal));

        let other = PaintSeries::new(SeriesId::new("Someone", "Else"));
        let err = session.resolve(&[other]).unwrap_err();
        assert!(matches!(err, SessionError::UnknownPaint { .. }));
    }

    #[test]
    fn test_default_path() {
        if let Some(p) = MixingSession::default_path() {
            assert!(p.ends_with("mcm/session.bin"));
        }
    }
}
