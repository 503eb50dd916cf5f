//! Product selection out of a scan record.

use crate::error::{RasterError, RasterResult};
use crate::product::Product;
use crate::scan::ScanRecord;

/// One radial of the selected moment. Gate values are borrowed from the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredRadial<'a> {
    /// Azimuth angle in degrees
    pub azimuth: f64,
    /// Gate spacing in km
    pub gate_size: f64,
    /// Range to the first gate in km
    pub first_gate: f64,
    pub bins: &'a [Option<f64>],
}

/// The named moment of every radial that carries it, in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredProduct<'a> {
    pub product: Product,
    pub radials: Vec<FilteredRadial<'a>>,
}

impl FilteredProduct<'_> {
    pub fn len(&self) -> usize {
        self.radials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radials.is_empty()
    }
}

/// Selects the moment named by `product_name` from `record`.
///
/// Fails with `UnknownProduct` if the name is not a known product code,
/// `MissingData` if the record has no radials, and `UnsupportedProduct` if
/// no radial carries that moment. Radials lacking the moment are skipped.
pub fn filter_product<'a>(
    record: &'a ScanRecord,
    product_name: &str,
) -> RasterResult<FilteredProduct<'a>> {
    let product: Product = product_name.parse()?;
    filter(record, product)
}

/// Typed variant of [`filter_product`].
pub fn filter(record: &ScanRecord, product: Product) -> RasterResult<FilteredProduct<'_>> {
    if record.radials.is_empty() {
        return Err(RasterError::MissingData(format!(
            "elevation {} has no radials",
            record.elevation
        )));
    }

    let radials: Vec<FilteredRadial<'_>> = record
        .radials
        .iter()
        .filter_map(|radial| {
            radial.moment(product).map(|moment| FilteredRadial {
                azimuth: radial.azimuth,
                gate_size: moment.gate_size,
                first_gate: moment.first_gate,
                bins: &moment.moment_data,
            })
        })
        .collect();

    if radials.is_empty() {
        return Err(RasterError::UnsupportedProduct(product.to_string()));
    }

    if radials.len() < record.radials.len() {
        log::debug!(
            "filter: {} of {} radials carry {}",
            radials.len(),
            record.radials.len(),
            product
        );
    }

    Ok(FilteredProduct { product, radials })
}
