//! Decoded Level 2 scan records.
//!
//! These mirror the structure handed over by the external Level 2 decoder:
//! a volume holds one [`ScanRecord`] per elevation, and each radial carries
//! its moments keyed by data name (`reflect`, `velocity`, ...). The pipeline
//! only borrows these for the duration of a draw call.

use crate::error::{RasterError, RasterResult};
use crate::geometry::{azimuth_spacing, REFERENCE_GATE_SIZE_KM};
use crate::product::Product;
use crate::vcp::{get_vcp_definition, VcpDefinition, VcpElevation, WaveformType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Range-ordered gate values of one moment on one radial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentData {
    /// Gate spacing in km
    pub gate_size: f64,
    /// Range to the center of the first gate in km
    pub first_gate: f64,
    /// One entry per gate; `None` is below threshold or range folded
    pub moment_data: Vec<Option<f64>>,
}

impl MomentData {
    pub fn new(gate_size: f64, first_gate: f64, moment_data: Vec<Option<f64>>) -> Self {
        Self {
            gate_size,
            first_gate,
            moment_data,
        }
    }
}

/// One radial of a Level 2 elevation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialRecord {
    /// Azimuth angle in degrees (0 = North, clockwise)
    pub azimuth: f64,
    /// Angular width of the radial in degrees, when reported
    #[serde(default)]
    pub azimuth_resolution: Option<f64>,
    /// Moments present on this radial
    #[serde(default)]
    pub moments: BTreeMap<Product, MomentData>,
}

impl RadialRecord {
    pub fn new(azimuth: f64) -> Self {
        Self {
            azimuth,
            azimuth_resolution: None,
            moments: BTreeMap::new(),
        }
    }

    /// Adds a moment, builder style.
    pub fn with_moment(mut self, product: Product, data: MomentData) -> Self {
        self.moments.insert(product, data);
        self
    }

    pub fn moment(&self, product: Product) -> Option<&MomentData> {
        self.moments.get(&product)
    }
}

/// All radials of one elevation plus the VCP metadata for that elevation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Elevation number as reported by the decoder
    pub elevation: usize,
    /// Waveform of this elevation; absent when no VCP record was decoded
    #[serde(default)]
    pub waveform_type: Option<WaveformType>,
    /// Half-degree azimuth spacing (super resolution)
    #[serde(default)]
    pub super_resolution: bool,
    pub radials: Vec<RadialRecord>,
}

impl ScanRecord {
    pub fn new(elevation: usize, radials: Vec<RadialRecord>) -> Self {
        Self {
            elevation,
            waveform_type: None,
            super_resolution: false,
            radials,
        }
    }

    /// Fills waveform and super-resolution flags from a VCP cut.
    ///
    /// `cut_index` is zero-based; elevation numbers start at 1.
    pub fn with_vcp(mut self, vcp: &VcpDefinition, cut_index: usize) -> Self {
        if let Some(cut) = vcp.elevations.get(cut_index) {
            self.waveform_type = Some(cut.waveform);
            self.super_resolution = cut.half_degree_azimuth;
        } else {
            log::warn!(
                "VCP {} has no cut {} (elevation {})",
                vcp.number,
                cut_index,
                self.elevation
            );
        }
        self
    }

    /// Records the azimuth spacing measured from the radials on every radial
    /// and flags super resolution when it is under 0.75°.
    pub fn with_azimuth_spacing(mut self) -> Self {
        let azimuths: Vec<f64> = self.radials.iter().map(|r| r.azimuth).collect();
        let spacing = azimuth_spacing(&azimuths);
        for radial in &mut self.radials {
            radial.azimuth_resolution = spacing;
        }
        self.super_resolution = spacing.is_some_and(is_half_degree);
        self
    }

    /// Angular resolution in radians: 0.5° when super resolution is flagged,
    /// 1° otherwise.
    pub fn angular_resolution(&self) -> f64 {
        resolution_radians(self.super_resolution)
    }

    /// Azimuth spacing reported by the first radial, in degrees.
    pub fn reported_resolution(&self) -> Option<f64> {
        self.radials.first().and_then(|r| r.azimuth_resolution)
    }

    /// Reflectivity gate size of the first radial, in km.
    ///
    /// Every product of the elevation is scaled by this gate size, falling
    /// back to the 0.25 km reference when reflectivity is absent.
    pub fn reference_gate_size(&self) -> f64 {
        self.radials
            .first()
            .and_then(|r| r.moment(Product::Reflectivity))
            .map_or(REFERENCE_GATE_SIZE_KM, |m| m.gate_size)
    }

    /// Whether any radial carries data for `product`.
    pub fn has_product(&self, product: Product) -> bool {
        self.radials.iter().any(|r| r.moments.contains_key(&product))
    }
}

fn is_half_degree(spacing: f64) -> bool {
    spacing < 0.75
}

fn resolution_radians(half_degree: bool) -> f64 {
    let resolution = std::f64::consts::PI / 180.0;
    if half_degree {
        resolution / 2.0
    } else {
        resolution
    }
}

/// Waveform and angular resolution an elevation is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSettings {
    pub waveform: Option<WaveformType>,
    /// Angular resolution in radians
    pub resolution: f64,
}

/// A decoded Level 2 volume: one record per elevation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level2Volume {
    /// VCP number, when the metadata record was decoded
    #[serde(default)]
    pub vcp: Option<u16>,
    pub elevations: Vec<ScanRecord>,
}

impl Level2Volume {
    pub fn new(elevations: Vec<ScanRecord>) -> Self {
        Self {
            vcp: None,
            elevations,
        }
    }

    /// Load a volume from the decoder's JSON form.
    pub fn from_json(json_str: &str) -> RasterResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Record for an elevation number.
    pub fn elevation(&self, elevation: usize) -> RasterResult<&ScanRecord> {
        self.elevations
            .iter()
            .find(|record| record.elevation == elevation)
            .ok_or_else(|| {
                RasterError::MissingData(format!(
                    "elevation {} not present (have {:?})",
                    elevation,
                    self.elevation_numbers()
                ))
            })
    }

    pub fn elevation_numbers(&self) -> Vec<usize> {
        self.elevations.iter().map(|r| r.elevation).collect()
    }

    /// VCP cut of an elevation number, when the volume's VCP is known.
    pub fn vcp_cut(&self, elevation: usize) -> Option<&'static VcpElevation> {
        let vcp = get_vcp_definition(self.vcp?)?;
        vcp.elevations.get(elevation.checked_sub(1)?)
    }

    /// Settings for drawing `record`.
    ///
    /// Flags on the record win. A record without a waveform takes it from
    /// the volume's VCP cut; super resolution comes from the record flag,
    /// then the VCP cut, then the radials' reported azimuth spacing.
    pub fn settings(&self, record: &ScanRecord) -> ElevationSettings {
        let cut = self.vcp_cut(record.elevation);
        let half_degree = record.super_resolution
            || match cut {
                Some(cut) => cut.half_degree_azimuth,
                None => record.reported_resolution().is_some_and(is_half_degree),
            };
        ElevationSettings {
            waveform: record.waveform_type.or(cut.map(|c| c.waveform)),
            resolution: resolution_radians(half_degree),
        }
    }
}
