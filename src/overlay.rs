//! Geographic placement of a drawn raster around its radar station.
//!
//! Each gate becomes a four-corner wedge in lon/lat using a flat-earth
//! approximation (1° ≈ 111 km, longitude corrected by the cosine of the
//! station latitude). Good enough for radar ranges; not for geodesy.

use crate::error::{RasterError, RasterResult};
use crate::geometry::{RadialArc, RadialConstants};
use crate::raster::RasterOutput;
use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

const KM_PER_DEGREE: f64 = 111.0;

/// Radar site location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point `range_km` away along compass bearing `azimuth` (radians).
    pub fn offset(&self, range_km: f64, azimuth: f64) -> Coord<f64> {
        let east_deg = range_km * azimuth.sin() / KM_PER_DEGREE;
        let north_deg = range_km * azimuth.cos() / KM_PER_DEGREE;
        let lat_correction = self.lat.to_radians().cos();
        Coord {
            x: self.lon + east_deg / lat_correction,
            y: self.lat + north_deg,
        }
    }
}

/// One gate wedge with the value drawn in it.
#[derive(Debug, Clone, PartialEq)]
pub struct GatePolygon {
    pub polygon: Polygon<f64>,
    pub value: f64,
}

/// Wedges for every gate of `raster`.
///
/// `arcs` must be parallel to the raster's radials. A gate at distance `d`
/// spans `d * multiplier` to `(d + 1) * multiplier` metres.
pub fn gate_polygons(
    raster: &RasterOutput,
    arcs: &[RadialArc],
    station: Station,
    constants: RadialConstants,
) -> RasterResult<Vec<GatePolygon>> {
    raster.validate()?;
    if arcs.len() != raster.len() {
        return Err(RasterError::InvalidOptions(format!(
            "{} arcs for {} radials",
            arcs.len(),
            raster.len()
        )));
    }

    let km_per_unit = constants.multiplier / 1000.0;
    let mut polygons = Vec::with_capacity(raster.gate_count());

    for ((distances, values), arc) in raster.radials.iter().zip(&raster.values).zip(arcs) {
        for (distance, value) in distances.iter().zip(values) {
            let inner_km = distance * km_per_unit;
            let outer_km = (distance + 1.0) * km_per_unit;
            let ring = vec![
                station.offset(inner_km, arc.start_angle),
                station.offset(inner_km, arc.end_angle),
                station.offset(outer_km, arc.end_angle),
                station.offset(outer_km, arc.start_angle),
            ];
            polygons.push(GatePolygon {
                polygon: Polygon::new(LineString::from(ring), vec![]),
                value: *value,
            });
        }
    }

    log::debug!("overlay: {} gate polygons", polygons.len());
    Ok(polygons)
}
