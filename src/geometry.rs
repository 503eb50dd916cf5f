//! Polar output geometry: gate-size normalization, dead zone and arc angles.
//!
//! WSR-88D radars use a 0.25 km gate. TDWR uses 0.15 km but reports 0.3 km
//! for processing reasons, so a reported 0.3 is halved before scaling. Every
//! Level 2 plot is normalized to the 0.25 km reference so plots from
//! different radar families share one scale.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Baseline gate size of the Level 2 output raster in km.
pub const REFERENCE_GATE_SIZE_KM: f64 = 0.25;

/// Gate size TDWR reports even though it samples at half that.
pub const TDWR_REPORTED_GATE_SIZE_KM: f64 = 0.3;

/// Arc widening applied to each radial so neighbours overlap slightly and no
/// empty slivers appear at long range. Renderers must apply the same factor.
pub const ARC_OVERPAINT: f64 = 1.1;

/// Gate size actually sampled, given the reported one.
pub fn effective_gate_size(raw_gate_size: f64) -> f64 {
    if (raw_gate_size - TDWR_REPORTED_GATE_SIZE_KM).abs() < 1e-9 {
        raw_gate_size / 2.0
    } else {
        raw_gate_size
    }
}

/// Factor that maps native bin units onto the reference gate size.
pub fn gate_size_scaling(raw_gate_size: f64) -> f64 {
    REFERENCE_GATE_SIZE_KM / effective_gate_size(raw_gate_size)
}

/// Blind zone near the radar, in output bin units.
pub fn dead_zone(first_gate: f64, gate_size: f64, scale: f64) -> f64 {
    first_gate / gate_size / scale
}

/// Output range distance of the gate at `bin_index`.
pub fn range_distance(bin_index: usize, dead_zone: f64, gate_size_scaling: f64) -> f64 {
    (bin_index as f64 + dead_zone) * gate_size_scaling
}

/// Start and end angle of a radial's arc, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialArc {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl RadialArc {
    /// Arc centered on `azimuth_deg`, `resolution` radians wide, widened by
    /// [`ARC_OVERPAINT`].
    pub fn centered(azimuth_deg: f64, resolution: f64) -> Self {
        let center = azimuth_deg * (PI / 180.0);
        let half_resolution = resolution / 2.0;
        Self {
            start_angle: center - half_resolution * ARC_OVERPAINT,
            end_angle: center + half_resolution * ARC_OVERPAINT,
        }
    }

    /// Arc starting at `start_deg` and spanning `delta_deg`, as Level 3
    /// radials are described.
    pub fn from_start(start_deg: f64, delta_deg: f64) -> Self {
        let start_angle = start_deg * (PI / 180.0);
        Self {
            start_angle,
            end_angle: start_angle + delta_deg * (PI / 180.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Shorter angular distance between two azimuths, in degrees.
pub fn azimuth_gap(a: f64, b: f64) -> f64 {
    let delta = (b - a).rem_euclid(360.0);
    delta.min(360.0 - delta)
}

/// Azimuth spacing of a sweep in degrees: the smallest non-zero gap between
/// consecutive radials. `None` for fewer than two distinct azimuths.
pub fn azimuth_spacing(azimuths: &[f64]) -> Option<f64> {
    azimuths
        .windows(2)
        .map(|pair| azimuth_gap(pair[0], pair[1]))
        .filter(|gap| *gap > 1e-6)
        .min_by(f64::total_cmp)
}

/// Gate resolution and distance multiplier for a radar data version.
///
/// `multiplier` converts an output range distance to metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialConstants {
    pub gate_res_m: f64,
    pub multiplier: f64,
}

/// Constants for a Level 2 message version ("01", "E2", "08") or a Level 3
/// product ("l3", "NXQ", "TZX", ...). Anything else is treated as modern
/// super-resolution Level 2.
pub fn radial_constants(version: &str) -> RadialConstants {
    let (gate_res_m, factor) = match version {
        // legacy, non super-res
        "01" => (2000.0, 8.0),
        "E2" => (500.0, 32.0),
        // Level 2 TDWR
        "08" => (150.0, 1.2),
        "l3" => (125.0, 2.0),
        "NXQ" | "N0S" | "DVL" | "NSW" => (500.0, 2.0),
        "TZX" | "TVX" => (73.7, 2.0),
        "TZL" => (150.0, 2.0),
        _ => (125.0, 2.0),
    };
    RadialConstants {
        gate_res_m,
        multiplier: gate_res_m * factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tdwr_halving_rule() {
        assert!((effective_gate_size(0.3) - 0.15).abs() < 1e-12);
        assert!((gate_size_scaling(0.3) - gate_size_scaling(0.15)).abs() < 1e-12);
        assert!((gate_size_scaling(0.15) - 0.25 / 0.15).abs() < 1e-12);
        assert!((gate_size_scaling(0.25) - 1.0).abs() < 1e-12);
        assert!((gate_size_scaling(1.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_azimuth_spacing() {
        assert_eq!(azimuth_spacing(&[0.25, 0.75, 1.25]), Some(0.5));
        // a missing radial does not widen the spacing
        assert_eq!(azimuth_spacing(&[10.0, 12.0, 13.0]), Some(1.0));
        assert_eq!(azimuth_spacing(&[359.5, 0.5]), Some(1.0));
        assert_eq!(azimuth_spacing(&[42.0]), None);
        assert_eq!(azimuth_spacing(&[42.0, 42.0]), None);
        assert_eq!(azimuth_gap(350.0, 10.0), 20.0);
    }

    #[test]
    fn test_dead_zone_and_distance() {
        let dz = dead_zone(2.125, 0.25, 2.0);
        assert!((dz - 4.25).abs() < 1e-12);
        assert!((range_distance(10, dz, 1.0) - 14.25).abs() < 1e-12);
        assert!((range_distance(0, 0.0, 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_arc_overpaint() {
        let resolution = PI / 180.0;
        let arc = RadialArc::centered(90.0, resolution);
        let center = PI / 2.0;
        assert!((arc.start_angle - (center - resolution / 2.0 * 1.1)).abs() < 1e-12);
        assert!((arc.end_angle - (center + resolution / 2.0 * 1.1)).abs() < 1e-12);
        assert!((arc.width() - resolution * 1.1).abs() < 1e-12);

        let l3 = RadialArc::from_start(10.0, 1.0);
        assert!((l3.width() - resolution).abs() < 1e-12);
    }

    #[test]
    fn test_radial_constants() {
        assert_eq!(radial_constants("01").multiplier, 16000.0);
        assert_eq!(radial_constants("E2").multiplier, 16000.0);
        assert!((radial_constants("08").multiplier - 180.0).abs() < 1e-9);
        assert_eq!(radial_constants("NXQ").gate_res_m, 500.0);
        assert!((radial_constants("TZX").multiplier - 147.4).abs() < 1e-9);
        assert_eq!(radial_constants("anything").multiplier, 250.0);
    }
}
