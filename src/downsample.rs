//! Range and azimuth downsampling of a filtered product.
//!
//! Bins are grouped along range at a `scale`-bin stride. Each group is
//! reduced to one representative value chosen by the palette's dominant
//! class: the class that occurs most often in the group wins, ties go to the
//! class seen first in range order, and the first value of the winning class
//! (the one closest to the radar) is kept.
//!
//! When the native data is half-degree but the output is coarse enough
//! (`scale >= 2`) to only show whole degrees, adjacent radial pairs merge
//! bin-by-bin with the same rule, and the merged radial sits at the center
//! of the pair.

use crate::error::{RasterError, RasterResult};
use crate::filter::FilteredProduct;
use crate::geometry::azimuth_gap;
use crate::palette::{Palette, PaletteIndex};
use crate::product::Product;
use std::f64::consts::PI;

/// One full degree in radians.
const FULL_DEGREE: f64 = PI / 180.0;

/// Output scale at which half-degree radials collapse into whole degrees.
const ANGULAR_MERGE_SCALE: f64 = 2.0;

/// A radial after downsampling. Owns its bins.
#[derive(Debug, Clone, PartialEq)]
pub struct DownsampledRadial {
    /// Azimuth in degrees; the center of the merged group
    pub azimuth: f64,
    /// Range spacing of one output bin in km
    pub gate_size: f64,
    /// Range to the first gate in km
    pub first_gate: f64,
    pub bins: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownsampledProduct {
    pub product: Product,
    /// Range stride applied
    pub scale: f64,
    /// Angular resolution of the output radials in radians
    pub resolution: f64,
    pub radials: Vec<DownsampledRadial>,
}

/// Downsample `filtered` by `scale` along range and, where the resolution
/// allows, by two in azimuth.
///
/// `scale` must be at least 1; upsampling is rejected with `InvalidScale`.
pub fn downsample(
    filtered: &FilteredProduct<'_>,
    scale: f64,
    resolution: f64,
    palette: &Palette,
) -> RasterResult<DownsampledProduct> {
    if scale.is_nan() || scale < 1.0 {
        return Err(RasterError::InvalidScale(format!(
            "scale factor {} is below 1",
            scale
        )));
    }

    let ranged: Vec<DownsampledRadial> = filtered
        .radials
        .iter()
        .map(|radial| DownsampledRadial {
            azimuth: radial.azimuth,
            gate_size: radial.gate_size * scale,
            first_gate: radial.first_gate,
            bins: downsample_range(radial.bins, scale, palette),
        })
        .collect();

    let merge = scale >= ANGULAR_MERGE_SCALE && resolution < FULL_DEGREE * 0.75;
    let (radials, resolution) = if merge {
        (merge_radial_pairs(ranged, resolution, palette), resolution * 2.0)
    } else {
        (ranged, resolution)
    };

    log::debug!(
        "downsample: {} radials of {} at scale {:.3}{}",
        radials.len(),
        filtered.product,
        scale,
        if merge { ", azimuth pairs merged" } else { "" }
    );

    Ok(DownsampledProduct {
        product: filtered.product,
        scale,
        resolution,
        radials,
    })
}

/// Reduce one radial's bins in groups of `scale` bins.
fn downsample_range(bins: &[Option<f64>], scale: f64, palette: &Palette) -> Vec<Option<f64>> {
    if scale == 1.0 {
        return bins.to_vec();
    }

    let out_len = (bins.len() as f64 / scale).ceil() as usize;
    (0..out_len)
        .map(|j| {
            let start = (j as f64 * scale).floor() as usize;
            let end = (((j + 1) as f64 * scale).floor() as usize).min(bins.len());
            dominant_value(bins[start..end].iter().copied(), palette)
        })
        .collect()
}

/// Merge neighbouring radials two by two.
///
/// Only radials one `resolution` (radians) apart are paired. A radial whose
/// neighbour is missing, and a trailing odd radial, are kept on their own.
fn merge_radial_pairs(
    radials: Vec<DownsampledRadial>,
    resolution: f64,
    palette: &Palette,
) -> Vec<DownsampledRadial> {
    let spacing = resolution.to_degrees() + 1e-6;
    let mut merged = Vec::with_capacity(radials.len().div_ceil(2));
    let mut iter = radials.into_iter().peekable();

    while let Some(first) = iter.next() {
        let adjacent =
            |next: &DownsampledRadial| azimuth_gap(first.azimuth, next.azimuth) <= spacing;
        let Some(second) = iter.next_if(adjacent) else {
            merged.push(first);
            continue;
        };

        let len = first.bins.len().max(second.bins.len());
        let bins = (0..len)
            .map(|j| {
                let a = first.bins.get(j).copied().flatten();
                let b = second.bins.get(j).copied().flatten();
                dominant_value([a, b].into_iter(), palette)
            })
            .collect();

        merged.push(DownsampledRadial {
            azimuth: center_azimuth(first.azimuth, second.azimuth),
            gate_size: first.gate_size,
            first_gate: first.first_gate,
            bins,
        });
    }

    merged
}

/// Azimuth halfway between `a` and `b` along the shorter arc, in `[0, 360)`.
pub fn center_azimuth(a: f64, b: f64) -> f64 {
    let mut delta = (b - a) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    (a + delta / 2.0).rem_euclid(360.0)
}

/// The value that best represents a group under the palette's classes.
///
/// Null values are ignored; an all-null group stays null.
pub fn dominant_value<I>(values: I, palette: &Palette) -> Option<f64>
where
    I: Iterator<Item = Option<f64>>,
{
    // (class, occurrences, first value of that class), in first-seen order
    let mut classes: Vec<(PaletteIndex, usize, f64)> = Vec::new();

    for value in values.flatten() {
        let class = palette.classify(value);
        match classes.iter_mut().find(|(c, _, _)| *c == class) {
            Some(entry) => entry.1 += 1,
            None => classes.push((class, 1, value)),
        }
    }

    let mut best: Option<&(PaletteIndex, usize, f64)> = None;
    for entry in &classes {
        // strictly greater keeps the earliest class on ties
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(_, _, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilteredRadial;
    use crate::palette::Color;

    fn palette() -> Palette {
        Palette::new(&[
            (0.0, Color::rgb(0, 0, 255)),
            (10.0, Color::rgb(0, 255, 0)),
            (20.0, Color::rgb(255, 0, 0)),
        ])
        .unwrap()
    }

    fn product<'a>(bins: &'a [&'a [Option<f64>]], azimuth_step: f64) -> FilteredProduct<'a> {
        FilteredProduct {
            product: Product::Reflectivity,
            radials: bins
                .iter()
                .enumerate()
                .map(|(i, b)| FilteredRadial {
                    azimuth: i as f64 * azimuth_step,
                    gate_size: 0.25,
                    first_gate: 2.0,
                    bins: b,
                })
                .collect(),
        }
    }

    #[test]
    fn test_scale_one_is_identity() {
        let a = [Some(1.0), None, Some(25.0)];
        let b = [None, Some(12.0)];
        let rows: [&[Option<f64>]; 2] = [&a, &b];
        let filtered = product(&rows, 0.5);
        let half_degree = FULL_DEGREE / 2.0;

        let out = downsample(&filtered, 1.0, half_degree, &palette()).unwrap();
        assert_eq!(out.radials.len(), 2);
        assert_eq!(out.radials[0].bins, a.to_vec());
        assert_eq!(out.radials[1].bins, b.to_vec());
        assert_eq!(out.radials[1].azimuth, 0.5);
        assert_eq!(out.radials[0].gate_size, 0.25);
        assert_eq!(out.resolution, half_degree);
    }

    #[test]
    fn test_rejects_upsampling() {
        let a = [Some(1.0)];
        let rows: [&[Option<f64>]; 1] = [&a];
        let filtered = product(&rows, 1.0);
        assert!(matches!(
            downsample(&filtered, 0.5, FULL_DEGREE, &palette()),
            Err(RasterError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_range_grouping_uses_dominant_class() {
        // groups of 2: [1, 25] tie -> first; [12, 15] same class -> 12;
        // [None, None] -> None; [22] -> 22
        let a = [
            Some(1.0),
            Some(25.0),
            Some(12.0),
            Some(15.0),
            None,
            None,
            Some(22.0),
        ];
        let rows: [&[Option<f64>]; 1] = [&a];
        let filtered = product(&rows, 1.0);

        let out = downsample(&filtered, 2.0, FULL_DEGREE, &palette()).unwrap();
        assert_eq!(
            out.radials[0].bins,
            vec![Some(1.0), Some(12.0), None, Some(22.0)]
        );
        assert!((out.radials[0].gate_size - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_majority_beats_first() {
        let values = [Some(1.0), Some(11.0), Some(12.0)];
        assert_eq!(dominant_value(values.into_iter(), &palette()), Some(11.0));
        assert_eq!(dominant_value([None, None].into_iter(), &palette()), None);
    }

    #[test]
    fn test_half_degree_pairs_merge_at_coarse_scale() {
        let a = [Some(1.0), Some(1.0)];
        let b = [Some(15.0), Some(15.0), Some(30.0), Some(30.0)];
        let c = [Some(5.0), Some(5.0)];
        let rows: [&[Option<f64>]; 3] = [&a, &b, &c];
        let filtered = product(&rows, 0.5);

        let out = downsample(&filtered, 2.0, FULL_DEGREE / 2.0, &palette()).unwrap();
        assert_eq!(out.radials.len(), 2);
        assert!((out.resolution - FULL_DEGREE).abs() < 1e-12);
        // pair (0.0, 0.5) -> centered at 0.25
        assert!((out.radials[0].azimuth - 0.25).abs() < 1e-12);
        // bin 0: 1.0 vs 15.0 tie -> first radial; bin 1: only second radial has data
        assert_eq!(out.radials[0].bins, vec![Some(1.0), Some(30.0)]);
        // odd radial passes through
        assert_eq!(out.radials[1].azimuth, 1.0);
    }

    #[test]
    fn test_gap_keeps_unpaired_radial() {
        // the radial at 0.5 was dropped upstream
        let a = [Some(1.0)];
        let b = [Some(15.0)];
        let c = [Some(25.0)];
        let rows: [&[Option<f64>]; 3] = [&a, &b, &c];
        let mut filtered = product(&rows, 0.5);
        for (radial, azimuth) in filtered.radials.iter_mut().zip([0.0, 1.0, 1.5]) {
            radial.azimuth = azimuth;
        }

        let out = downsample(&filtered, 2.0, FULL_DEGREE / 2.0, &palette()).unwrap();
        assert_eq!(out.radials.len(), 2);
        assert_eq!(out.radials[0].azimuth, 0.0);
        assert_eq!(out.radials[0].bins, vec![Some(1.0)]);
        assert!((out.radials[1].azimuth - 1.25).abs() < 1e-12);
        assert_eq!(out.radials[1].bins, vec![Some(15.0)]);
    }

    #[test]
    fn test_pairs_across_north() {
        let a = [Some(1.0)];
        let b = [Some(2.0)];
        let rows: [&[Option<f64>]; 2] = [&a, &b];
        let mut filtered = product(&rows, 0.5);
        filtered.radials[0].azimuth = 359.75;
        filtered.radials[1].azimuth = 0.25;

        let out = downsample(&filtered, 2.0, FULL_DEGREE / 2.0, &palette()).unwrap();
        assert_eq!(out.radials.len(), 1);
        assert!(out.radials[0].azimuth.abs() < 1e-12);
    }

    #[test]
    fn test_full_degree_data_never_merges() {
        let a = [Some(1.0), Some(1.0)];
        let b = [Some(2.0), Some(2.0)];
        let rows: [&[Option<f64>]; 2] = [&a, &b];
        let filtered = product(&rows, 1.0);
        let out = downsample(&filtered, 4.0, FULL_DEGREE, &palette()).unwrap();
        assert_eq!(out.radials.len(), 2);
    }

    #[test]
    fn test_center_azimuth_wraps() {
        assert!((center_azimuth(359.5, 0.0) - 359.75).abs() < 1e-12);
        assert!((center_azimuth(0.0, 359.0) - 359.5).abs() < 1e-12);
        assert!((center_azimuth(10.0, 11.0) - 10.5).abs() < 1e-12);
    }
}
