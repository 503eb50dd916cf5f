//! Run-length coding of radial bins.
//!
//! A radial's bins are walked once; consecutive bins with the same raw value
//! collapse into a [`Bin::Run`]. Single values stay [`Bin::Plain`] and null
//! bins stay [`Bin::Null`]. Consumers must accept `Run { count: 1 }` as an
//! equivalent of `Plain`.

use crate::filter::FilteredProduct;
use serde::{Deserialize, Serialize};

/// One entry of a run-length coded radial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bin {
    /// No data at this gate
    Null,
    Plain(f64),
    /// `count` consecutive gates sharing `value`
    Run { value: f64, count: usize },
}

impl Bin {
    /// Number of physical gates covered.
    pub fn span(&self) -> usize {
        match self {
            Bin::Null | Bin::Plain(_) => 1,
            Bin::Run { count, .. } => *count,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Bin::Null => None,
            Bin::Plain(value) | Bin::Run { value, .. } => Some(*value),
        }
    }
}

/// A run-length coded radial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedRadial {
    /// Azimuth in degrees
    pub azimuth: f64,
    /// Gate spacing in km
    pub gate_size: f64,
    /// Range to the first gate in km
    pub first_gate: f64,
    /// Angular resolution of the radial in radians
    pub resolution: f64,
    pub moment_data: Vec<Bin>,
}

impl EncodedRadial {
    /// Number of physical gates in the radial.
    pub fn gate_count(&self) -> usize {
        self.moment_data.iter().map(Bin::span).sum()
    }

    /// Non-null gates with their physical index, runs expanded.
    pub fn gates(&self) -> Gates<'_> {
        Gates::new(&self.moment_data)
    }
}

/// Run-length encode every radial of a filtered product.
///
/// Runs are formed on raw value equality, before any classification.
pub fn encode(filtered: &FilteredProduct<'_>, resolution: f64) -> Vec<EncodedRadial> {
    filtered
        .radials
        .iter()
        .map(|radial| {
            let moment_data = encode_bins(radial.bins);
            debug_assert_eq!(
                moment_data.iter().map(Bin::span).sum::<usize>(),
                radial.bins.len(),
                "run boundaries do not cover the radial"
            );
            EncodedRadial {
                azimuth: radial.azimuth,
                gate_size: radial.gate_size,
                first_gate: radial.first_gate,
                resolution,
                moment_data,
            }
        })
        .collect()
}

/// Encode one radial's gate values.
pub fn encode_bins(bins: &[Option<f64>]) -> Vec<Bin> {
    let mut encoded = Vec::new();
    let mut current: Option<(f64, usize)> = None;

    for &bin in bins {
        if let (Some(value), Some((run_value, count))) = (bin, current.as_mut()) {
            if *run_value == value {
                *count += 1;
                continue;
            }
        }
        if let Some((value, count)) = current.take() {
            encoded.push(close_run(value, count));
        }
        match bin {
            Some(value) => current = Some((value, 1)),
            None => encoded.push(Bin::Null),
        }
    }
    if let Some((value, count)) = current {
        encoded.push(close_run(value, count));
    }

    encoded
}

fn close_run(value: f64, count: usize) -> Bin {
    if count == 1 {
        Bin::Plain(value)
    } else {
        Bin::Run { value, count }
    }
}

/// Expand a radial back to one entry per physical gate.
pub fn decode(radial: &EncodedRadial) -> Vec<Option<f64>> {
    decode_bins(&radial.moment_data)
}

/// Expand coded bins back to one entry per physical gate.
pub fn decode_bins(bins: &[Bin]) -> Vec<Option<f64>> {
    let mut decoded = Vec::with_capacity(bins.iter().map(Bin::span).sum());
    for bin in bins {
        decoded.extend(std::iter::repeat(bin.value()).take(bin.span()));
    }
    decoded
}

/// Iterator over the non-null gates of coded bins as `(gate index, value)`.
pub struct Gates<'a> {
    bins: std::slice::Iter<'a, Bin>,
    /// Physical index of the next gate to emit
    position: usize,
    /// Value of the run being emitted
    current_value: Option<f64>,
    /// Gates left in the current run
    remaining: usize,
}

impl<'a> Gates<'a> {
    pub fn new(bins: &'a [Bin]) -> Self {
        Self {
            bins: bins.iter(),
            position: 0,
            current_value: None,
            remaining: 0,
        }
    }
}

impl Iterator for Gates<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining > 0 {
                self.remaining -= 1;
                let index = self.position;
                self.position += 1;
                if let Some(value) = self.current_value {
                    return Some((index, value));
                }
                continue;
            }

            let bin = self.bins.next()?;
            self.current_value = bin.value();
            self.remaining = bin.span();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_merges_equal_values() {
        let bins = [Some(1.0), Some(1.0), Some(1.0), Some(2.0), None, None, Some(2.0)];
        assert_eq!(
            encode_bins(&bins),
            vec![
                Bin::Run { value: 1.0, count: 3 },
                Bin::Plain(2.0),
                Bin::Null,
                Bin::Null,
                Bin::Plain(2.0),
            ]
        );
    }

    #[test]
    fn test_round_trip_preserves_nulls_and_singletons() {
        let cases: Vec<Vec<Option<f64>>> = vec![
            vec![],
            vec![None],
            vec![Some(3.5)],
            vec![None, Some(1.0), Some(1.0), None, Some(-2.0), Some(-2.0), Some(-2.0)],
            vec![Some(0.0), Some(0.0), Some(7.0), None],
        ];
        for bins in cases {
            assert_eq!(decode_bins(&encode_bins(&bins)), bins);
        }
    }

    #[test]
    fn test_decode_accepts_unit_runs() {
        let bins = [Bin::Run { value: 4.0, count: 1 }, Bin::Plain(4.0), Bin::Null];
        assert_eq!(decode_bins(&bins), vec![Some(4.0), Some(4.0), None]);
    }

    #[test]
    fn test_gates_report_physical_indices() {
        let bins = [
            Bin::Null,
            Bin::Run { value: 5.0, count: 3 },
            Bin::Null,
            Bin::Plain(9.0),
            Bin::Run { value: 1.0, count: 1 },
        ];
        let gates: Vec<_> = Gates::new(&bins).collect();
        assert_eq!(
            gates,
            vec![(1, 5.0), (2, 5.0), (3, 5.0), (5, 9.0), (6, 1.0)]
        );
    }

    #[test]
    fn test_encoded_radial_gate_count() {
        let radial = EncodedRadial {
            azimuth: 0.0,
            gate_size: 0.25,
            first_gate: 2.0,
            resolution: 0.01,
            moment_data: encode_bins(&[Some(1.0), Some(1.0), None]),
        };
        assert_eq!(radial.gate_count(), 3);
        assert_eq!(decode(&radial), vec![Some(1.0), Some(1.0), None]);
        assert_eq!(radial.gates().count(), 2);
    }
}
