//! Level 2 draw orchestration.
//!
//! A draw call runs one elevation and product of a decoded volume through
//! filter, downsample, index and run-length encode, then lays the encoded
//! radials out as range distances normalized to the 0.25 km reference gate.

use crate::downsample::downsample;
use crate::error::{RasterError, RasterResult};
use crate::filter::filter;
use crate::geometry::{
    dead_zone, gate_size_scaling, range_distance, RadialArc,
};
use crate::indexer::{index_product, IndexedProduct};
use crate::palette::{Color, PaletteSet};
use crate::product::Product;
use crate::raster::{output_scale, DrawOutcome, RasterOutput};
use crate::rle;
use crate::scan::Level2Volume;
use serde::{Deserialize, Serialize};

/// Native (maximum) output size of a Level 2 raster.
pub const NATIVE_SIZE: u32 = 3600;

/// Options accepted by [`draw`]. Missing JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Level2Options {
    /// Output size; must be in `1..=NATIVE_SIZE`
    pub size: u32,
    /// Square crop applied by the renderer; clamped to `size`
    pub crop_to: u32,
    /// Renderer background, passed through untouched
    pub background: String,
    /// Arc stroke width at the reference gate size
    pub line_width: f64,
    /// Skip products that the elevation's waveform does not carry well
    pub use_preferred_waveforms: bool,
    /// Elevation number to draw
    pub elevation: usize,
    /// Product code (`REF`, `VEL`, `SW`, `ZDR`, `PHI`, `RHO`)
    pub product: String,
    /// Return the palette colors with the raster
    pub palettize: bool,
}

impl Default for Level2Options {
    fn default() -> Self {
        Self {
            size: NATIVE_SIZE,
            crop_to: NATIVE_SIZE,
            background: "black".to_string(),
            line_width: 2.0,
            use_preferred_waveforms: true,
            elevation: 1,
            product: "REF".to_string(),
            palettize: false,
        }
    }
}

impl Level2Options {
    pub fn from_json(json_str: &str) -> RasterResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn for_product(product: &str, elevation: usize) -> Self {
        Self {
            product: product.to_string(),
            elevation,
            ..Self::default()
        }
    }
}

/// A drawn Level 2 elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct Level2Raster {
    pub product: Product,
    /// Distances and raw filtered values per radial
    pub raster: RasterOutput,
    /// Arc of each radial, parallel to `raster.azimuths`
    pub arcs: Vec<RadialArc>,
    /// Downsampled product in palette-index form
    pub indexed: IndexedProduct,
    pub scale: f64,
    /// Angular resolution of the elevation in radians
    pub resolution: f64,
    pub gate_size_scaling: f64,
    /// Effective crop, `min(size, crop_to)`
    pub crop_to: u32,
    /// Stroke width compensated for the gate size scaling
    pub line_width: f64,
    /// Palette colors by index, when `palettize` was requested
    pub palette: Option<Vec<Color>>,
}

/// Draw one elevation and product of a decoded volume.
///
/// Returns `NothingToDraw` when preferred waveforms are in use and the
/// elevation's waveform does not carry the product.
pub fn draw(
    volume: &Level2Volume,
    palettes: &PaletteSet,
    options: &Level2Options,
) -> RasterResult<DrawOutcome<Level2Raster>> {
    let start = web_time::Instant::now();

    let scale = output_scale(options.size, NATIVE_SIZE)?;
    if options.crop_to < 1 {
        return Err(RasterError::InvalidOptions(
            "provide a cropTo > 0".to_string(),
        ));
    }
    let crop_to = options.size.min(options.crop_to);

    let product: Product = options.product.parse()?;
    let record = volume.elevation(options.elevation)?;
    let settings = volume.settings(record);

    if options.use_preferred_waveforms {
        if let Some(waveform) = settings.waveform {
            if !waveform.prefers(product) {
                log::debug!(
                    "Level 2 draw: {} not preferred at elevation {} (waveform {})",
                    product,
                    record.elevation,
                    waveform.code()
                );
                return Ok(DrawOutcome::NothingToDraw);
            }
        }
    }

    let palette = palettes
        .get(product)
        .ok_or_else(|| RasterError::UnknownProductPalette(product.to_string()))?;

    let resolution = settings.resolution;
    let filtered = filter(record, product)?;
    // every product is scaled by the reflectivity gate size
    let scaling = gate_size_scaling(record.reference_gate_size());

    let downsampled = downsample(&filtered, scale, resolution, palette)?;
    let indexed = index_product(downsampled, palette);
    // geometry comes from the filtered data, not the downsampled product
    let encoded = rle::encode(&filtered, resolution);

    let mut raster = RasterOutput::new();
    let mut arcs = Vec::with_capacity(encoded.len());
    for radial in &encoded {
        let dz = dead_zone(radial.first_gate, radial.gate_size, scale);
        raster.push_radial(
            radial.azimuth,
            radial
                .gates()
                .map(|(index, value)| (range_distance(index, dz, scaling), value)),
        );
        arcs.push(RadialArc::centered(radial.azimuth, radial.resolution));
    }

    log::debug!(
        "Level 2 draw: {} elevation {}, {} radials, {} gates in {:.1}ms",
        product,
        record.elevation,
        raster.len(),
        raster.gate_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(DrawOutcome::Drawn(Level2Raster {
        product,
        raster,
        arcs,
        indexed,
        scale,
        resolution,
        gate_size_scaling: scaling,
        crop_to,
        line_width: options.line_width / scaling,
        palette: options.palettize.then(|| palette.colors().to_vec()),
    }))
}
