//! Volume Coverage Pattern (VCP) definitions and waveform rules.
//!
//! Each elevation of a VCP is scanned with one waveform. The waveform
//! decides which moments carry useful data at that elevation, which is what
//! the preferred-waveform check in the Level 2 draw relies on.

use crate::product::Product;
use serde::{Deserialize, Serialize};

/// Elevation scan waveform, numbered as in the VCP message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WaveformType {
    /// 1: long-PRF surveillance half of a split cut
    ContiguousSurveillance,
    /// 2: short-PRF Doppler half of a split cut, velocity only
    ContiguousDopplerWithAmbiguityResolution,
    /// 3
    ContiguousDopplerWithoutAmbiguityResolution,
    /// 4
    Batch,
    /// 5
    StaggeredPulsePair,
}

static SURVEILLANCE_PRODUCTS: &[Product] = &[
    Product::Reflectivity,
    Product::SpectrumWidth,
    Product::DifferentialReflectivity,
    Product::DifferentialPhase,
    Product::CorrelationCoefficient,
];

static DOPPLER_PRODUCTS: &[Product] = &[Product::Velocity];

impl WaveformType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::ContiguousSurveillance),
            2 => Some(Self::ContiguousDopplerWithAmbiguityResolution),
            3 => Some(Self::ContiguousDopplerWithoutAmbiguityResolution),
            4 => Some(Self::Batch),
            5 => Some(Self::StaggeredPulsePair),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::ContiguousSurveillance => 1,
            Self::ContiguousDopplerWithAmbiguityResolution => 2,
            Self::ContiguousDopplerWithoutAmbiguityResolution => 3,
            Self::Batch => 4,
            Self::StaggeredPulsePair => 5,
        }
    }

    /// Products that carry useful data when scanned with this waveform.
    pub fn preferred_products(&self) -> &'static [Product] {
        match self {
            Self::ContiguousSurveillance => SURVEILLANCE_PRODUCTS,
            Self::ContiguousDopplerWithAmbiguityResolution => DOPPLER_PRODUCTS,
            _ => &Product::ALL,
        }
    }

    pub fn prefers(&self, product: Product) -> bool {
        self.preferred_products().contains(&product)
    }
}

impl TryFrom<u8> for WaveformType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown waveform type {}", code))
    }
}

impl From<WaveformType> for u8 {
    fn from(waveform: WaveformType) -> Self {
        waveform.code()
    }
}

/// A single elevation cut within a VCP
#[derive(Clone, Debug)]
pub struct VcpElevation {
    /// Elevation angle in degrees
    pub angle: f32,
    pub waveform: WaveformType,
    /// Radials are collected every 0.5° instead of 1°
    pub half_degree_azimuth: bool,
}

/// Definition of a Volume Coverage Pattern
#[derive(Clone, Debug)]
pub struct VcpDefinition {
    /// VCP number (e.g., 215, 35)
    pub number: u16,
    /// Short name for the VCP
    pub name: &'static str,
    /// List of elevation cuts in scan order
    pub elevations: &'static [VcpElevation],
}

const fn cut(angle: f32, waveform: WaveformType, half_degree_azimuth: bool) -> VcpElevation {
    VcpElevation {
        angle,
        waveform,
        half_degree_azimuth,
    }
}

use self::WaveformType::{
    Batch as B, ContiguousDopplerWithAmbiguityResolution as CDW,
    ContiguousDopplerWithoutAmbiguityResolution as CDWO, ContiguousSurveillance as CS,
};

/// VCP 215 - Precipitation Mode (most common)
static VCP_215_ELEVATIONS: &[VcpElevation] = &[
    cut(0.5, CS, true),
    cut(0.5, CDW, true),
    cut(0.9, CS, true),
    cut(0.9, CDW, true),
    cut(1.3, CS, true),
    cut(1.3, CDW, true),
    cut(1.8, B, false),
    cut(2.4, B, false),
    cut(3.1, B, false),
    cut(4.0, B, false),
    cut(5.1, B, false),
    cut(6.4, B, false),
    cut(8.0, CDWO, false),
    cut(10.0, CDWO, false),
    cut(12.5, CDWO, false),
    cut(15.6, CDWO, false),
    cut(19.5, CDWO, false),
];

static VCP_215: VcpDefinition = VcpDefinition {
    number: 215,
    name: "Precipitation",
    elevations: VCP_215_ELEVATIONS,
};

/// VCP 35 - Clear Air Mode
static VCP_35_ELEVATIONS: &[VcpElevation] = &[
    cut(0.5, CS, true),
    cut(0.5, CDW, true),
    cut(0.9, CS, true),
    cut(0.9, CDW, true),
    cut(1.3, CS, true),
    cut(1.3, CDW, true),
    cut(1.8, B, false),
    cut(2.4, B, false),
    cut(3.1, B, false),
    cut(4.0, B, false),
    cut(5.1, CDWO, false),
    cut(6.4, CDWO, false),
];

static VCP_35: VcpDefinition = VcpDefinition {
    number: 35,
    name: "Clear Air",
    elevations: VCP_35_ELEVATIONS,
};

/// VCP 212 - Precipitation Mode (faster)
static VCP_212_ELEVATIONS: &[VcpElevation] = &[
    cut(0.5, CS, true),
    cut(0.5, CDW, true),
    cut(0.9, CS, true),
    cut(0.9, CDW, true),
    cut(1.3, CS, true),
    cut(1.3, CDW, true),
    cut(1.8, B, false),
    cut(2.4, B, false),
    cut(3.1, B, false),
    cut(4.0, B, false),
    cut(5.1, B, false),
    cut(6.4, CDWO, false),
    cut(8.0, CDWO, false),
    cut(10.0, CDWO, false),
    cut(12.5, CDWO, false),
    cut(15.6, CDWO, false),
    cut(19.5, CDWO, false),
];

static VCP_212: VcpDefinition = VcpDefinition {
    number: 212,
    name: "Precip Fast",
    elevations: VCP_212_ELEVATIONS,
};

/// Get the VCP definition for a given VCP number
pub fn get_vcp_definition(vcp: u16) -> Option<&'static VcpDefinition> {
    match vcp {
        215 => Some(&VCP_215),
        35 => Some(&VCP_35),
        212 => Some(&VCP_212),
        _ => None,
    }
}

/// Operating mode of a VCP number ("Precip Mode" or "Clear Air Mode").
pub fn vcp_mode(vcp: u16) -> Option<&'static str> {
    match vcp {
        12 | 112 | 121 | 212 | 215 | 80 | 90 => Some("Precip Mode"),
        31 | 32 | 35 => Some("Clear Air Mode"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_products() {
        let doppler = WaveformType::from_code(2).unwrap();
        assert!(doppler.prefers(Product::Velocity));
        assert!(!doppler.prefers(Product::Reflectivity));

        let surveillance = WaveformType::from_code(1).unwrap();
        assert!(surveillance.prefers(Product::Reflectivity));
        assert!(!surveillance.prefers(Product::Velocity));

        for code in 3..=5 {
            let waveform = WaveformType::from_code(code).unwrap();
            assert_eq!(waveform.preferred_products().len(), Product::ALL.len());
        }
        assert_eq!(WaveformType::from_code(9), None);
    }

    #[test]
    fn test_waveform_serde_as_code() {
        let json = serde_json::to_string(&WaveformType::Batch).unwrap();
        assert_eq!(json, "4");
        let parsed: WaveformType = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, WaveformType::ContiguousDopplerWithAmbiguityResolution);
        assert!(serde_json::from_str::<WaveformType>("7").is_err());
    }

    #[test]
    fn test_vcp_lookup() {
        let vcp = get_vcp_definition(215).unwrap();
        assert_eq!(vcp.number, 215);
        assert!(vcp.elevations[0].half_degree_azimuth);
        assert_eq!(vcp.elevations[1].waveform.code(), 2);
        assert!(get_vcp_definition(999).is_none());

        assert_eq!(vcp_mode(35), Some("Clear Air Mode"));
        assert_eq!(vcp_mode(212), Some("Precip Mode"));
        assert_eq!(vcp_mode(1), None);
    }
}
