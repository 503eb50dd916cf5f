//! Level 3 product registry.

use crate::error::{RasterError, RasterResult};
use crate::palette::{
    Color, Palette, CORRELATION_COEFFICIENT, DIFFERENTIAL_REFLECTIVITY, HYDROMETEOR_CLASS,
    PRECIPITATION_ACCUMULATION, REFLECTIVITY, VELOCITY_KNOTS, VERTICALLY_INTEGRATED_LIQUID,
};
use std::collections::BTreeMap;

/// Number of data levels of an 8-bit digital product.
const DIGITAL_LEVELS: usize = 256;

/// Number of data levels of a legacy 4-bit product.
const LEGACY_LEVELS: usize = 16;

/// How a product's data levels map onto a color table.
///
/// Data level `n` stands for the value `n * level_scale + level_offset` in
/// the unit of `table`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteDescriptor {
    pub table: &'static [(f64, Color)],
    /// Product code whose color-table unit conversion applies to `table`
    pub conversion: Option<&'static str>,
    /// Data value the palette was designed around; see `palette_scale`
    pub base_scale: Option<f64>,
    pub level_scale: f64,
    pub level_offset: f64,
    /// Number of palette entries generated
    pub levels: usize,
}

impl PaletteDescriptor {
    const fn levels(table: &'static [(f64, Color)]) -> Self {
        Self {
            table,
            conversion: None,
            base_scale: None,
            level_scale: 1.0,
            level_offset: 0.0,
            levels: DIGITAL_LEVELS,
        }
    }

    const fn encoded(table: &'static [(f64, Color)], level_scale: f64, level_offset: f64) -> Self {
        Self {
            level_scale,
            level_offset,
            ..Self::levels(table)
        }
    }

    fn converted(mut self, code: &'static str) -> Self {
        self.conversion = Some(code);
        self
    }

    fn legacy(mut self) -> Self {
        self.levels = LEGACY_LEVELS;
        self
    }

    /// One color per data level, index 0 first.
    pub fn generate(&self) -> RasterResult<Vec<Color>> {
        let palette = match self.conversion {
            Some(code) => Palette::with_unit_conversion(self.table, code)?,
            None => Palette::new(self.table)?,
        };
        Ok((0..self.levels)
            .map(|level| level as f64 * self.level_scale + self.level_offset)
            .map(|value| palette.color_for_value(value))
            .collect())
    }

    /// Factor mapping a bin value into palette index space.
    ///
    /// `max_data_value` defaults to 255; the base scale falls back to the
    /// maximum data value, then to 1.
    pub fn palette_scale(&self, max_data_value: Option<f64>) -> f64 {
        let base = self.base_scale.or(max_data_value).unwrap_or(1.0);
        max_data_value.unwrap_or(255.0) / base
    }
}

/// Static metadata of one Level 3 product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDescriptor {
    pub code: u16,
    /// Product abbreviations, one per elevation for tilt-specific products
    pub abbreviations: &'static [&'static str],
    pub description: &'static str,
    pub palette: PaletteDescriptor,
}

impl ProductDescriptor {
    /// The primary abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        self.abbreviations.first().copied().unwrap_or("")
    }
}

fn standard_descriptors() -> Vec<ProductDescriptor> {
    use PaletteDescriptor as P;

    let reflectivity = P::encoded(REFLECTIVITY, 0.5, -33.0);
    let velocity = P::encoded(VELOCITY_KNOTS, 0.5, -64.5).converted("N0G");
    let precipitation = P::levels(PRECIPITATION_ACCUMULATION);
    let hydrometeors = P::levels(HYDROMETEOR_CLASS).converted("N0H");

    fn product(
        code: u16,
        abbreviations: &'static [&'static str],
        description: &'static str,
        palette: PaletteDescriptor,
    ) -> ProductDescriptor {
        ProductDescriptor {
            code,
            abbreviations,
            description,
            palette,
        }
    }

    vec![
        product(
            78,
            &["N1P"],
            "One-hour precipitation",
            P::encoded(PRECIPITATION_ACCUMULATION, 16.0, 0.0).legacy(),
        ),
        product(
            80,
            &["NTP"],
            "Storm total precipitation",
            P::encoded(PRECIPITATION_ACCUMULATION, 16.0, 0.0).legacy(),
        ),
        product(
            165,
            &["N0H", "N1H", "N2H", "N3H"],
            "Hydrometeor classification",
            hydrometeors,
        ),
        product(170, &["DAA"], "Digital one-hour accumulation", precipitation),
        product(172, &["DTA"], "Digital storm total accumulation", precipitation),
        product(177, &["HHC"], "Hybrid hydrometeor classification", hydrometeors),
        product(94, &["NXQ"], "Digital base reflectivity", reflectivity),
        product(99, &["N0U"], "Digital base velocity", velocity),
        product(153, &["N0B"], "Super-resolution reflectivity", reflectivity),
        product(154, &["N0G"], "Super-resolution velocity", velocity),
        product(
            159,
            &["N0X"],
            "Digital differential reflectivity",
            P::encoded(DIFFERENTIAL_REFLECTIVITY, 1.0 / 16.0, -8.0),
        ),
        product(
            161,
            &["N0C"],
            "Digital correlation coefficient",
            P::encoded(CORRELATION_COEFFICIENT, 1.0 / 300.0, 60.5 / 300.0),
        ),
        product(
            134,
            &["DVL"],
            "Digital vertically integrated liquid",
            P::levels(VERTICALLY_INTEGRATED_LIQUID),
        ),
        product(
            56,
            &["N0S"],
            "Storm relative mean velocity",
            P::encoded(VELOCITY_KNOTS, 8.0, -64.0).converted("N0S").legacy(),
        ),
    ]
}

/// Product descriptors keyed by product code.
///
/// Built once and shared read-only; construction rejects duplicate codes.
#[derive(Debug, Clone)]
pub struct ProductRegistry {
    products: BTreeMap<u16, ProductDescriptor>,
}

impl ProductRegistry {
    pub fn new(descriptors: Vec<ProductDescriptor>) -> RasterResult<Self> {
        let mut products = BTreeMap::new();
        for descriptor in descriptors {
            let code = descriptor.code;
            if products.insert(code, descriptor).is_some() {
                return Err(RasterError::DuplicateProductCode(code));
            }
        }
        log::info!("Level 3 registry: {} products", products.len());
        Ok(Self { products })
    }

    /// Registry of every supported Level 3 product.
    pub fn standard() -> RasterResult<Self> {
        Self::new(standard_descriptors())
    }

    pub fn get(&self, code: u16) -> Option<&ProductDescriptor> {
        self.products.get(&code)
    }

    /// Descriptor for a product abbreviation such as `N0B` or `N2H`.
    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&ProductDescriptor> {
        let abbreviation = abbreviation.trim();
        self.products
            .values()
            .find(|p| p.abbreviations.iter().any(|a| *a == abbreviation))
    }

    /// Every abbreviation of every product, in product-code order.
    pub fn abbreviations(&self) -> Vec<&'static str> {
        self.products
            .values()
            .flat_map(|p| p.abbreviations.iter().copied())
            .collect()
    }

    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.products.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
