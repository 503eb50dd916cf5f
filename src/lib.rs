//! Polar rasterization of NEXRAD radial data.
//!
//! Decoded Level 2 volumes and Level 3 products go in; per-radial range
//! distances, values and azimuths come out, ready to be placed on a map
//! around the radar site. Palettes and the Level 3 product registry are
//! built once and passed by reference to every draw call.
//!
//! ```no_run
//! use nexrad_polar_raster::{level2, Level2Options, Level2Volume, PaletteSet};
//!
//! # fn run(json: &str) -> nexrad_polar_raster::RasterResult<()> {
//! let palettes = PaletteSet::standard()?;
//! let volume = Level2Volume::from_json(json)?;
//! let options = Level2Options::for_product("REF", 1);
//! if let Some(drawn) = level2::draw(&volume, &palettes, &options)?.drawn() {
//!     println!("{}", drawn.raster.to_data_url()?);
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "nexrad")]
pub mod adapter;
pub mod downsample;
mod error;
pub mod filter;
pub mod geometry;
pub mod indexer;
pub mod level2;
pub mod level3;
pub mod overlay;
pub mod palette;
mod product;
mod raster;
pub mod rle;
mod scan;
pub mod units;
pub mod vcp;

pub use error::{RasterError, RasterResult};
pub use level2::{Level2Options, Level2Raster};
pub use level3::{Level3Options, Level3Raster, Level3Record, ProductRegistry};
pub use palette::{Color, Palette, PaletteIndex, PaletteSet};
pub use product::Product;
pub use raster::{output_scale, DrawOutcome, RasterOutput, LEVEL3_VERSION};
pub use rle::Bin;
pub use scan::{ElevationSettings, Level2Volume, MomentData, RadialRecord, ScanRecord};
pub use vcp::WaveformType;
