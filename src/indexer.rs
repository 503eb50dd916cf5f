//! Palette-index form of a downsampled product.

use crate::downsample::DownsampledProduct;
use crate::palette::{Palette, PaletteIndex};
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// A radial whose bins hold palette indices instead of physical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedRadial {
    pub azimuth: f64,
    pub gate_size: f64,
    pub first_gate: f64,
    /// Null bins stay null and are never classified
    pub bins: Vec<Option<PaletteIndex>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedProduct {
    pub product: Product,
    pub scale: f64,
    pub resolution: f64,
    pub radials: Vec<IndexedRadial>,
}

impl IndexedProduct {
    /// Number of non-null bins across every radial.
    pub fn populated_bins(&self) -> usize {
        self.radials
            .iter()
            .map(|r| r.bins.iter().filter(|b| b.is_some()).count())
            .sum()
    }
}

/// Replaces every physical value with `palette.classify(value)`.
///
/// Consumes the downsampled product; the physical values do not survive.
pub fn index_product(downsampled: DownsampledProduct, palette: &Palette) -> IndexedProduct {
    let radials = downsampled
        .radials
        .into_iter()
        .map(|radial| IndexedRadial {
            azimuth: radial.azimuth,
            gate_size: radial.gate_size,
            first_gate: radial.first_gate,
            bins: radial
                .bins
                .into_iter()
                .map(|bin| bin.map(|value| palette.classify(value)))
                .collect(),
        })
        .collect();

    IndexedProduct {
        product: downsampled.product,
        scale: downsampled.scale,
        resolution: downsampled.resolution,
        radials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downsample::DownsampledRadial;
    use crate::palette::Color;

    #[test]
    fn test_indexes_values_and_keeps_nulls() {
        let palette = Palette::new(&[(0.0, Color::rgb(0, 0, 1)), (10.0, Color::rgb(0, 0, 2))])
            .unwrap();
        let downsampled = DownsampledProduct {
            product: Product::Reflectivity,
            scale: 1.0,
            resolution: 0.01,
            radials: vec![DownsampledRadial {
                azimuth: 12.0,
                gate_size: 0.25,
                first_gate: 2.0,
                bins: vec![Some(-5.0), None, Some(3.0), Some(42.0)],
            }],
        };

        let indexed = index_product(downsampled, &palette);
        assert_eq!(
            indexed.radials[0].bins,
            vec![Some(Palette::NO_DATA), None, Some(1), Some(2)]
        );
        assert_eq!(indexed.radials[0].azimuth, 12.0);
        assert_eq!(indexed.populated_bins(), 3);
    }
}
