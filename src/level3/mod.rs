//! Level 3 draw path.
//!
//! Level 3 products arrive already reduced to data levels, so no filtering,
//! downsampling or gate-size normalization happens: each non-empty bin is
//! emitted at its raw index offset by the packet's first bin. The renderer
//! maps a bin value `v` to `palette[round(v * palette_scale)]`.

mod products;

pub use products::{PaletteDescriptor, ProductDescriptor, ProductRegistry};

use crate::error::{RasterError, RasterResult};
use crate::geometry::RadialArc;
use crate::palette::Color;
use crate::raster::{output_scale, RasterOutput};
use serde::{Deserialize, Serialize};

/// Native (maximum) output size of a Level 3 raster.
pub const NATIVE_SIZE: u32 = 1800;

/// One radial of a radial data packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level3Radial {
    /// Azimuth where the radial starts, in degrees
    pub start_angle: f64,
    /// Angular width in degrees
    pub angle_delta: f64,
    /// Data levels; null and 0 mean no data
    pub bins: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialPacket {
    /// Index of the first range bin
    pub first_bin: usize,
    pub radials: Vec<Level3Radial>,
}

/// A decoded Level 3 product file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level3Record {
    pub product_code: u16,
    #[serde(default)]
    pub station_id: Option<String>,
    /// Largest data level the product can carry
    #[serde(default)]
    pub max_data_value: Option<f64>,
    #[serde(default)]
    pub radial_packets: Vec<RadialPacket>,
}

impl Level3Record {
    pub fn from_json(json_str: &str) -> RasterResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Level3Options {
    /// Output size; must be in `1..=NATIVE_SIZE`
    pub size: u32,
    pub background: String,
    pub line_width: f64,
}

impl Default for Level3Options {
    fn default() -> Self {
        Self {
            size: NATIVE_SIZE,
            background: "black".to_string(),
            line_width: 2.0,
        }
    }
}

impl Level3Options {
    pub fn from_json(json_str: &str) -> RasterResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }
}

/// A drawn Level 3 product.
#[derive(Debug, Clone, PartialEq)]
pub struct Level3Raster {
    pub abbreviation: &'static str,
    pub station_id: Option<String>,
    /// Bin offsets and raw data levels per radial, tagged `"l3"`
    pub raster: RasterOutput,
    /// Arc of each radial, parallel to `raster.azimuths`
    pub arcs: Vec<RadialArc>,
    pub scale: f64,
    /// Colors by palette index
    pub palette: Vec<Color>,
    pub palette_scale: f64,
}

impl Level3Raster {
    /// Display color of a raw bin value.
    pub fn color_of_bin(&self, value: f64) -> Color {
        let index = (value * self.palette_scale).round();
        if index < 0.0 {
            return Color::TRANSPARENT;
        }
        self.palette
            .get(index as usize)
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }
}

/// Draw a Level 3 record, looking its product up in `registry`.
pub fn draw(
    record: &Level3Record,
    registry: &ProductRegistry,
    options: &Level3Options,
) -> RasterResult<Level3Raster> {
    let product = registry.get(record.product_code).ok_or_else(|| {
        RasterError::UnknownProduct(format!("Level 3 product code {}", record.product_code))
    })?;
    draw_product(record, product, options)
}

/// Draw a Level 3 record with an explicit product descriptor.
pub fn draw_product(
    record: &Level3Record,
    product: &ProductDescriptor,
    options: &Level3Options,
) -> RasterResult<Level3Raster> {
    let start = web_time::Instant::now();

    let scale = output_scale(options.size, NATIVE_SIZE)?;
    let palette = product.palette.generate()?;
    let palette_scale = product.palette.palette_scale(record.max_data_value);

    let packet = record.radial_packets.first().ok_or_else(|| {
        RasterError::MissingData(format!(
            "{} has no radial data packet",
            product.abbreviation()
        ))
    })?;

    let mut raster = RasterOutput::level3();
    let mut arcs = Vec::with_capacity(packet.radials.len());
    for radial in &packet.radials {
        let gates = radial
            .bins
            .iter()
            .enumerate()
            .filter_map(|(index, bin)| match bin {
                Some(value) if *value != 0.0 => Some(((index + packet.first_bin) as f64, *value)),
                _ => None,
            });
        raster.push_radial(radial.start_angle, gates);
        arcs.push(RadialArc::from_start(radial.start_angle, radial.angle_delta));
    }

    log::debug!(
        "Level 3 draw: {} ({}), {} radials, {} gates in {:.1}ms",
        product.abbreviation(),
        product.code,
        raster.len(),
        raster.gate_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Level3Raster {
        abbreviation: product.abbreviation(),
        station_id: record.station_id.clone(),
        raster,
        arcs,
        scale,
        palette,
        palette_scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Level3Record {
        Level3Record {
            product_code: 170,
            station_id: Some("KLWX".to_string()),
            max_data_value: None,
            radial_packets: vec![RadialPacket {
                first_bin: 3,
                radials: vec![
                    Level3Radial {
                        start_angle: 0.0,
                        angle_delta: 1.0,
                        bins: vec![None, Some(0.0), Some(16.0), Some(16.0), Some(200.0)],
                    },
                    Level3Radial {
                        start_angle: 1.0,
                        angle_delta: 1.0,
                        bins: vec![Some(0.0), None],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_draw_skips_empty_bins() {
        let registry = ProductRegistry::standard().unwrap();
        let out = draw(&record(), &registry, &Level3Options::default()).unwrap();

        assert_eq!(out.abbreviation, "DAA");
        assert_eq!(out.raster.version.as_deref(), Some("l3"));
        assert_eq!(out.raster.azimuths, vec![0.0, 1.0]);
        assert_eq!(out.raster.radials[0], vec![5.0, 6.0, 7.0]);
        assert_eq!(out.raster.values[0], vec![16.0, 16.0, 200.0]);
        assert!(out.raster.radials[1].is_empty());
        assert!(out.raster.validate().is_ok());
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.station_id.as_deref(), Some("KLWX"));
    }

    #[test]
    fn test_palette_scale_and_colors() {
        let registry = ProductRegistry::standard().unwrap();
        let out = draw(&record(), &registry, &Level3Options::default()).unwrap();
        assert_eq!(out.palette.len(), 256);
        assert_eq!(out.palette_scale, 255.0);
        assert_eq!(out.color_of_bin(-1.0), Color::TRANSPARENT);

        let mut scaled = record();
        scaled.max_data_value = Some(255.0);
        let out = draw(&scaled, &registry, &Level3Options::default()).unwrap();
        assert_eq!(out.palette_scale, 1.0);
        assert_eq!(out.color_of_bin(16.0), out.palette[16]);
        assert_ne!(out.color_of_bin(16.0), Color::TRANSPARENT);
        assert_eq!(out.color_of_bin(0.0), Color::TRANSPARENT);
    }

    #[test]
    fn test_errors() {
        let registry = ProductRegistry::standard().unwrap();
        let options = Level3Options {
            size: 1801,
            ..Level3Options::default()
        };
        assert!(matches!(
            draw(&record(), &registry, &options),
            Err(RasterError::InvalidScale(_))
        ));

        let mut unknown = record();
        unknown.product_code = 2;
        assert!(matches!(
            draw(&unknown, &registry, &Level3Options::default()),
            Err(RasterError::UnknownProduct(_))
        ));

        let mut empty = record();
        empty.radial_packets.clear();
        assert!(matches!(
            draw(&empty, &registry, &Level3Options::default()),
            Err(RasterError::MissingData(_))
        ));
    }

    #[test]
    fn test_record_from_json() {
        let json = r#"{
            "productCode": 165,
            "maxDataValue": 150,
            "radialPackets": [
                {
                    "firstBin": 0,
                    "radials": [{"startAngle": 10.5, "angleDelta": 1.0, "bins": [0, 30, null]}]
                }
            ]
        }"#;
        let record = Level3Record::from_json(json).unwrap();
        let registry = ProductRegistry::standard().unwrap();
        let options = Level3Options {
            size: 900,
            ..Default::default()
        };
        let out = draw(&record, &registry, &options).unwrap();
        assert_eq!(out.abbreviation, "N0H");
        assert_eq!(out.scale, 2.0);
        assert_eq!(out.raster.radials[0], vec![1.0]);
        assert_eq!(out.raster.values[0], vec![30.0]);
        assert!((out.arcs[0].start_angle - 10.5_f64.to_radians()).abs() < 1e-12);
    }
}
