//! Conversion from volumes decoded by the `nexrad` crate.
//!
//! Only reflectivity and velocity are carried over; other moments are left
//! for the caller to add if needed.
//!
//! Super resolution is derived from the sweep's azimuth spacing. The archive
//! radials do not say which waveform a cut used: set [`Level2Volume::vcp`] or
//! call [`ScanRecord::with_vcp`] on the result so preferred-waveform
//! filtering can apply.

use crate::error::{RasterError, RasterResult};
use crate::product::Product;
use crate::scan::{Level2Volume, MomentData, RadialRecord, ScanRecord};
use nexrad::prelude::{GateValue, Radial, Volume};

/// Builds a scan record from the radials of one sweep.
pub fn scan_from_radials(radials: &[Radial], elevation: usize) -> RasterResult<ScanRecord> {
    if radials.is_empty() {
        return Err(RasterError::MissingData(format!(
            "sweep {} has no radials",
            elevation
        )));
    }

    let records = radials
        .iter()
        .map(|radial| {
            let mut record = RadialRecord::new(radial.azimuth_angle_degrees() as f64);
            if let Some(data) = radial.reflectivity() {
                record = record.with_moment(
                    Product::Reflectivity,
                    MomentData::new(
                        data.gate_interval_km() as f64,
                        data.first_gate_range_km() as f64,
                        gate_values(data.values().iter()),
                    ),
                );
            }
            if let Some(data) = radial.velocity() {
                record = record.with_moment(
                    Product::Velocity,
                    MomentData::new(
                        data.gate_interval_km() as f64,
                        data.first_gate_range_km() as f64,
                        gate_values(data.values().iter()),
                    ),
                );
            }
            record
        })
        .collect();

    Ok(ScanRecord::new(elevation, records).with_azimuth_spacing())
}

/// Builds a Level 2 volume, numbering sweeps from 1.
pub fn volume_from(volume: &Volume) -> RasterResult<Level2Volume> {
    let elevations = volume
        .sweeps()
        .iter()
        .enumerate()
        .map(|(i, sweep)| scan_from_radials(sweep.radials(), i + 1))
        .collect::<RasterResult<Vec<_>>>()?;
    log::debug!("adapter: converted {} sweeps", elevations.len());
    Ok(Level2Volume::new(elevations))
}

/// Decodes an archive file and converts it.
pub fn load_volume(data: &[u8]) -> RasterResult<Level2Volume> {
    let volume = nexrad::load(data)
        .map_err(|e| RasterError::MissingData(format!("failed to load NEXRAD data: {}", e)))?;
    volume_from(&volume)
}

fn gate_values<'a, I>(values: I) -> Vec<Option<f64>>
where
    I: Iterator<Item = &'a GateValue>,
{
    values
        .map(|value| match value {
            GateValue::Value(v) => Some(*v as f64),
            _ => None,
        })
        .collect()
}
