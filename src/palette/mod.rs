//! Value-to-color classification tables.
//!
//! A [`Palette`] is built once from an ascending `[threshold, color]` table
//! and then shared read-only between draw calls. Index 0 is reserved for
//! "no data": any value below the first threshold (or NaN) classifies to it.
//! Table entry `i` owns palette index `i + 1`.

mod tables;

pub use tables::{
    CORRELATION_COEFFICIENT, DIFFERENTIAL_PHASE, DIFFERENTIAL_REFLECTIVITY, HYDROMETEOR_CLASS,
    PRECIPITATION_ACCUMULATION, REFLECTIVITY, SPECTRUM_WIDTH, VELOCITY_KNOTS,
    VERTICALLY_INTEGRATED_LIQUID,
};

use crate::error::{RasterError, RasterResult};
use crate::product::Product;
use crate::units;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index into a palette. `Palette::NO_DATA` marks values below every threshold.
pub type PaletteIndex = u16;

/// An RGBA display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, used for the "no data" slot.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// CSS color string, e.g. `rgba(255, 0, 0, 1)`.
    pub fn to_css(&self) -> String {
        let alpha = self.a as f64 / 255.0;
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            (alpha * 1000.0).round() / 1000.0
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Ordered classification table for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Lower bound of each class, strictly ascending
    thresholds: Vec<f64>,
    /// Colors by palette index; slot 0 is the "no data" color
    colors: Vec<Color>,
}

impl Palette {
    /// Reserved index for values below the first threshold.
    pub const NO_DATA: PaletteIndex = 0;

    /// Builds a palette from `[threshold, color]` pairs sorted ascending.
    ///
    /// Rejects empty tables, NaN thresholds and tables that are not strictly
    /// ascending.
    pub fn new(table: &[(f64, Color)]) -> RasterResult<Self> {
        if table.is_empty() {
            return Err(RasterError::InvalidPalette("table is empty".to_string()));
        }
        if table.len() >= PaletteIndex::MAX as usize {
            return Err(RasterError::InvalidPalette(format!(
                "{} entries exceed the palette index range",
                table.len()
            )));
        }
        if let Some((threshold, _)) = table.iter().find(|(t, _)| t.is_nan()) {
            return Err(RasterError::InvalidPalette(format!(
                "threshold {} is not a number",
                threshold
            )));
        }
        if let Some(pair) = table.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(RasterError::InvalidPalette(format!(
                "thresholds not ascending: {} followed by {}",
                pair[0].0, pair[1].0
            )));
        }

        let mut colors = Vec::with_capacity(table.len() + 1);
        colors.push(Color::TRANSPARENT);
        colors.extend(table.iter().map(|(_, c)| *c));

        Ok(Self {
            thresholds: table.iter().map(|(t, _)| *t).collect(),
            colors,
        })
    }

    /// Builds a palette whose thresholds are authored in a color-table unit
    /// and converted to the unit of the product's gate values first.
    pub fn with_unit_conversion(table: &[(f64, Color)], product_code: &str) -> RasterResult<Self> {
        let mut thresholds: Vec<f64> = table.iter().map(|(t, _)| *t).collect();
        units::scale_color_table(&mut thresholds, product_code);
        let converted: Vec<(f64, Color)> = thresholds
            .into_iter()
            .zip(table.iter().map(|(_, c)| *c))
            .collect();
        Self::new(&converted)
    }

    /// Maps a raw value to its palette index.
    ///
    /// The index is the number of thresholds at or below `value`, which makes
    /// classification monotonic in `value`.
    pub fn classify(&self, value: f64) -> PaletteIndex {
        if value.is_nan() {
            return Self::NO_DATA;
        }
        self.thresholds.partition_point(|t| *t <= value) as PaletteIndex
    }

    /// Color for a palette index.
    ///
    /// # Panics
    /// Panics if `index` is outside `0..self.len()`. Indices come from
    /// [`Palette::classify`], so an out-of-range index is a programming error.
    pub fn color_of(&self, index: PaletteIndex) -> Color {
        assert!(
            (index as usize) < self.colors.len(),
            "palette index {} out of range (palette has {} indices)",
            index,
            self.colors.len()
        );
        self.colors[index as usize]
    }

    /// Non-panicking variant of [`Palette::color_of`].
    pub fn get_color(&self, index: PaletteIndex) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    /// Classifies a raw value and returns its color.
    pub fn color_for_value(&self, value: f64) -> Color {
        self.color_of(self.classify(value))
    }

    /// Lower bound of the class at `index`; `None` for the no-data slot.
    pub fn lower_bound(&self, index: PaletteIndex) -> Option<f64> {
        (index as usize)
            .checked_sub(1)
            .and_then(|i| self.thresholds.get(i).copied())
    }

    /// Number of palette indices including the no-data slot.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.colors.len() <= 1
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Colors by palette index, including the no-data slot.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// CSS color strings by palette index.
    pub fn lookup_rgba(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_css).collect()
    }
}

/// Palettes for the Level 2 products, keyed by product.
///
/// Built once at startup and passed by shared reference to each draw call.
#[derive(Debug, Clone, Default)]
pub struct PaletteSet {
    palettes: HashMap<Product, Palette>,
}

impl PaletteSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tables for every Level 2 product.
    pub fn standard() -> RasterResult<Self> {
        let mut set = Self::new();
        set.insert(Product::Reflectivity, Palette::new(REFLECTIVITY)?);
        set.insert(
            Product::Velocity,
            Palette::with_unit_conversion(VELOCITY_KNOTS, Product::Velocity.code())?,
        );
        set.insert(Product::SpectrumWidth, Palette::new(SPECTRUM_WIDTH)?);
        set.insert(
            Product::DifferentialReflectivity,
            Palette::new(DIFFERENTIAL_REFLECTIVITY)?,
        );
        set.insert(Product::DifferentialPhase, Palette::new(DIFFERENTIAL_PHASE)?);
        set.insert(
            Product::CorrelationCoefficient,
            Palette::new(CORRELATION_COEFFICIENT)?,
        );
        log::debug!("PaletteSet: built {} standard palettes", set.len());
        Ok(set)
    }

    /// Registers (or replaces) the palette for a product.
    pub fn insert(&mut self, product: Product, palette: Palette) {
        self.palettes.insert(product, palette);
    }

    pub fn get(&self, product: Product) -> Option<&Palette> {
        self.palettes.get(&product)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_step() -> Palette {
        Palette::new(&[
            (0.0, Color::rgb(0, 0, 255)),
            (10.0, Color::rgb(0, 255, 0)),
            (20.0, Color::rgb(255, 0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_classify_buckets() {
        let palette = three_step();
        assert_eq!(palette.classify(-5.0), Palette::NO_DATA);
        assert_eq!(palette.classify(0.0), 1);
        assert_eq!(palette.classify(9.99), 1);
        assert_eq!(palette.classify(10.0), 2);
        assert_eq!(palette.classify(1000.0), 3);
        assert_eq!(palette.classify(f64::NAN), Palette::NO_DATA);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let palette = Palette::new(REFLECTIVITY).unwrap();
        let mut previous = palette.classify(-40.0);
        let mut value = -40.0;
        while value < 90.0 {
            value += 0.25;
            let index = palette.classify(value);
            assert!(index >= previous, "classify dropped at {}", value);
            previous = index;
        }
    }

    #[test]
    fn test_color_lookup() {
        let palette = three_step();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.color_of(0), Color::TRANSPARENT);
        assert_eq!(palette.color_of(2), Color::rgb(0, 255, 0));
        assert_eq!(palette.color_for_value(25.0), Color::rgb(255, 0, 0));
        assert_eq!(palette.get_color(4), None);
        assert_eq!(palette.lower_bound(0), None);
        assert_eq!(palette.lower_bound(3), Some(20.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_color_of_out_of_range_panics() {
        three_step().color_of(7);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(
            Palette::new(&[]),
            Err(RasterError::InvalidPalette(_))
        ));
        let unsorted = [(10.0, Color::rgb(1, 1, 1)), (5.0, Color::rgb(2, 2, 2))];
        assert!(matches!(
            Palette::new(&unsorted),
            Err(RasterError::InvalidPalette(_))
        ));
        let duplicate = [(5.0, Color::rgb(1, 1, 1)), (5.0, Color::rgb(2, 2, 2))];
        assert!(Palette::new(&duplicate).is_err());
        let nan = [(f64::NAN, Color::rgb(1, 1, 1))];
        assert!(Palette::new(&nan).is_err());
    }

    #[test]
    fn test_velocity_table_converted_to_ms() {
        let set = PaletteSet::standard().unwrap();
        let velocity = set.get(Product::Velocity).unwrap();
        let knots_first = VELOCITY_KNOTS[0].0;
        assert!((velocity.thresholds()[0] - knots_first / 1.944).abs() < 1e-9);
    }

    #[test]
    fn test_standard_set_covers_level2_products() {
        let set = PaletteSet::standard().unwrap();
        for product in Product::ALL {
            assert!(set.get(product).is_some(), "missing {:?}", product);
        }
    }

    #[test]
    fn test_color_formats() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("00000080"), Some(Color::rgba(0, 0, 0, 128)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::rgb(255, 0, 0).to_css(), "rgba(255, 0, 0, 1)");
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203ff");
    }
}
