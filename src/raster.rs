//! The pipeline's output raster and draw outcome.

use crate::error::{RasterError, RasterResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Version tag carried by Level 3 rasters.
pub const LEVEL3_VERSION: &str = "l3";

/// Radial-indexed range distances and values, ready for geographic overlay.
///
/// For every radial `i`, `radials[i]` and `values[i]` have the same length,
/// and `radials`, `values` and `azimuths` all have one entry per radial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RasterOutput {
    /// Range distances per radial, in output bin units
    pub radials: Vec<Vec<f64>>,
    /// Values per radial, parallel to `radials`
    pub values: Vec<Vec<f64>>,
    /// Azimuth of each radial in degrees
    pub azimuths: Vec<f64>,
    /// Format tag; `"l3"` for Level 3 output, absent for Level 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl RasterOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty Level 3 raster.
    pub fn level3() -> Self {
        Self {
            version: Some(LEVEL3_VERSION.to_string()),
            ..Self::default()
        }
    }

    /// Appends one radial. Distances and values are paired gate by gate.
    pub fn push_radial<I>(&mut self, azimuth: f64, gates: I)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (distances, values): (Vec<f64>, Vec<f64>) = gates.into_iter().unzip();
        self.azimuths.push(azimuth);
        self.radials.push(distances);
        self.values.push(values);
    }

    /// Number of radials.
    pub fn len(&self) -> usize {
        self.azimuths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.azimuths.is_empty()
    }

    /// Total number of gates across all radials.
    pub fn gate_count(&self) -> usize {
        self.radials.iter().map(Vec::len).sum()
    }

    /// Checks the length invariants; useful on rasters read back from JSON.
    pub fn validate(&self) -> RasterResult<()> {
        if self.radials.len() != self.azimuths.len() || self.values.len() != self.azimuths.len() {
            return Err(RasterError::MissingData(format!(
                "raster has {} azimuths, {} radials and {} value rows",
                self.azimuths.len(),
                self.radials.len(),
                self.values.len()
            )));
        }
        let mismatched = self
            .radials
            .iter()
            .zip(&self.values)
            .position(|(distances, values)| distances.len() != values.len());
        if let Some(i) = mismatched {
            return Err(RasterError::MissingData(format!(
                "radial {} has {} distances but {} values",
                i,
                self.radials[i].len(),
                self.values[i].len()
            )));
        }
        Ok(())
    }

    /// `{radials, values, azimuths[, version]}` JSON document.
    pub fn to_json(&self) -> RasterResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json_str: &str) -> RasterResult<Self> {
        let raster: Self = serde_json::from_str(json_str)?;
        raster.validate()?;
        Ok(raster)
    }

    /// The JSON document as a `data:` URL, the in-memory transfer buffer
    /// handed to the map collaborator.
    pub fn to_data_url(&self) -> RasterResult<String> {
        let json = self.to_json()?;
        Ok(format!("data:text/plain;base64,{}", STANDARD.encode(json)))
    }
}

/// Range stride for an output `size` against the native raster size.
///
/// Sizes above `native_size` would need upsampling and are rejected, as is 0.
pub fn output_scale(size: u32, native_size: u32) -> RasterResult<f64> {
    if size > native_size {
        return Err(RasterError::InvalidScale(format!(
            "upsampling is not supported, provide a size <= {}",
            native_size
        )));
    }
    if size < 1 {
        return Err(RasterError::InvalidScale("provide a size > 0".to_string()));
    }
    Ok(native_size as f64 / size as f64)
}

/// Result of a draw call that did not fail.
///
/// `NothingToDraw` is an expected outcome (e.g. the product is not useful at
/// this elevation's waveform); callers skip rendering without logging a fault.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome<T> {
    Drawn(T),
    NothingToDraw,
}

impl<T> DrawOutcome<T> {
    pub fn is_drawn(&self) -> bool {
        matches!(self, DrawOutcome::Drawn(_))
    }

    pub fn drawn(self) -> Option<T> {
        match self {
            DrawOutcome::Drawn(value) => Some(value),
            DrawOutcome::NothingToDraw => None,
        }
    }

    pub fn as_ref(&self) -> DrawOutcome<&T> {
        match self {
            DrawOutcome::Drawn(value) => DrawOutcome::Drawn(value),
            DrawOutcome::NothingToDraw => DrawOutcome::NothingToDraw,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DrawOutcome<U> {
        match self {
            DrawOutcome::Drawn(value) => DrawOutcome::Drawn(f(value)),
            DrawOutcome::NothingToDraw => DrawOutcome::NothingToDraw,
        }
    }
}
