//! Level 2 moment products.
//!
//! Products are addressed by their three-character code (`REF`, `VEL`, ...)
//! and stored in a scan under the decoder's data name (`reflect`,
//! `velocity`, ...).

use crate::error::RasterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Level 2 radial moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "reflect")]
    Reflectivity,
    #[serde(rename = "velocity")]
    Velocity,
    #[serde(rename = "spectrum")]
    SpectrumWidth,
    #[serde(rename = "zdr")]
    DifferentialReflectivity,
    #[serde(rename = "phi")]
    DifferentialPhase,
    #[serde(rename = "rho")]
    CorrelationCoefficient,
}

impl Product {
    /// Every known Level 2 product.
    pub const ALL: [Product; 6] = [
        Product::Reflectivity,
        Product::Velocity,
        Product::SpectrumWidth,
        Product::DifferentialReflectivity,
        Product::DifferentialPhase,
        Product::CorrelationCoefficient,
    ];

    /// Three-character product code. Spectrum width keeps its trailing space.
    pub fn code(&self) -> &'static str {
        match self {
            Product::Reflectivity => "REF",
            Product::Velocity => "VEL",
            Product::SpectrumWidth => "SW ",
            Product::DifferentialReflectivity => "ZDR",
            Product::DifferentialPhase => "PHI",
            Product::CorrelationCoefficient => "RHO",
        }
    }

    /// Name of the moment array in a decoded radial.
    pub fn data_name(&self) -> &'static str {
        match self {
            Product::Reflectivity => "reflect",
            Product::Velocity => "velocity",
            Product::SpectrumWidth => "spectrum",
            Product::DifferentialReflectivity => "zdr",
            Product::DifferentialPhase => "phi",
            Product::CorrelationCoefficient => "rho",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().trim_end())
    }
}

impl FromStr for Product {
    type Err = RasterError;

    /// Accepts the product code (`"SW"` with or without the padding space).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end() {
            "REF" => Ok(Product::Reflectivity),
            "VEL" => Ok(Product::Velocity),
            "SW" => Ok(Product::SpectrumWidth),
            "ZDR" => Ok(Product::DifferentialReflectivity),
            "PHI" => Ok(Product::DifferentialPhase),
            "RHO" => Ok(Product::CorrelationCoefficient),
            _ => Err(RasterError::UnknownProduct(s.to_string())),
        }
    }
}
