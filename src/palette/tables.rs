//! Static color tables.
//!
//! Each table is `[lower threshold, color]` sorted ascending. Level 2 tables
//! are in the physical unit of the gate values except velocity, which is
//! authored in knots. Level 3 tables are in raw data-level units.

use super::Color;

/// NWS standard reflectivity (dBZ).
pub static REFLECTIVITY: &[(f64, Color)] = &[
    (5.0, Color::rgba(0, 236, 236, 180)),  // Light cyan
    (10.0, Color::rgba(1, 160, 246, 180)), // Cyan
    (15.0, Color::rgba(0, 0, 246, 180)),   // Blue
    (20.0, Color::rgba(0, 255, 0, 180)),   // Light green
    (25.0, Color::rgba(0, 200, 0, 180)),   // Green
    (30.0, Color::rgba(0, 144, 0, 180)),   // Dark green
    (35.0, Color::rgba(255, 255, 0, 200)), // Yellow
    (40.0, Color::rgba(231, 192, 0, 200)), // Gold
    (45.0, Color::rgba(255, 144, 0, 200)), // Orange
    (50.0, Color::rgba(255, 0, 0, 220)),   // Red
    (55.0, Color::rgba(214, 0, 0, 220)),   // Dark red
    (60.0, Color::rgba(192, 0, 0, 220)),   // Maroon
    (65.0, Color::rgba(255, 0, 255, 240)), // Magenta
    (70.0, Color::rgba(153, 85, 201, 240)),
    (75.0, Color::rgb(255, 255, 255)),
];

/// Base velocity (knots, negative toward the radar).
pub static VELOCITY_KNOTS: &[(f64, Color)] = &[
    (-140.0, Color::rgb(252, 0, 130)),
    (-100.0, Color::rgb(109, 2, 150)),
    (-80.0, Color::rgb(22, 13, 156)),
    (-60.0, Color::rgb(36, 224, 247)),
    (-40.0, Color::rgb(1, 233, 47)),
    (-20.0, Color::rgb(3, 127, 1)),
    (-10.0, Color::rgb(78, 121, 76)),
    (-1.0, Color::rgb(137, 137, 137)),
    (1.0, Color::rgb(109, 0, 0)),
    (10.0, Color::rgb(249, 51, 76)),
    (20.0, Color::rgb(255, 211, 215)),
    (40.0, Color::rgb(255, 136, 0)),
    (60.0, Color::rgb(255, 255, 0)),
    (80.0, Color::rgb(231, 112, 255)),
    (100.0, Color::rgb(255, 255, 255)),
];

/// Spectrum width (m/s).
pub static SPECTRUM_WIDTH: &[(f64, Color)] = &[
    (0.0, Color::rgb(45, 45, 45)),
    (2.0, Color::rgb(118, 118, 118)),
    (4.0, Color::rgb(0, 173, 0)),
    (6.0, Color::rgb(255, 255, 0)),
    (8.0, Color::rgb(255, 136, 0)),
    (10.0, Color::rgb(255, 0, 0)),
    (12.0, Color::rgb(255, 255, 255)),
];

/// Differential reflectivity (dB).
pub static DIFFERENTIAL_REFLECTIVITY: &[(f64, Color)] = &[
    (-4.0, Color::rgb(55, 55, 55)),
    (-2.0, Color::rgb(138, 138, 138)),
    (-0.5, Color::rgb(196, 196, 196)),
    (0.0, Color::rgb(0, 0, 166)),
    (0.5, Color::rgb(0, 120, 255)),
    (1.0, Color::rgb(0, 196, 0)),
    (2.0, Color::rgb(255, 255, 0)),
    (3.0, Color::rgb(255, 136, 0)),
    (4.0, Color::rgb(255, 0, 0)),
    (5.0, Color::rgb(189, 0, 119)),
    (6.0, Color::rgb(255, 255, 255)),
];

/// Differential phase (degrees).
pub static DIFFERENTIAL_PHASE: &[(f64, Color)] = &[
    (0.0, Color::rgb(0, 0, 128)),
    (45.0, Color::rgb(0, 96, 255)),
    (90.0, Color::rgb(0, 200, 200)),
    (135.0, Color::rgb(0, 200, 0)),
    (180.0, Color::rgb(255, 255, 0)),
    (225.0, Color::rgb(255, 136, 0)),
    (270.0, Color::rgb(255, 0, 0)),
    (315.0, Color::rgb(255, 0, 255)),
];

/// Correlation coefficient (unitless, 0..1.05).
pub static CORRELATION_COEFFICIENT: &[(f64, Color)] = &[
    (0.2, Color::rgb(20, 0, 50)),
    (0.45, Color::rgb(0, 0, 110)),
    (0.65, Color::rgb(0, 140, 255)),
    (0.75, Color::rgb(0, 200, 120)),
    (0.8, Color::rgb(120, 220, 0)),
    (0.85, Color::rgb(255, 230, 0)),
    (0.9, Color::rgb(255, 160, 0)),
    (0.95, Color::rgb(230, 0, 0)),
    (0.97, Color::rgb(160, 0, 40)),
    (1.0, Color::rgb(255, 180, 215)),
    (1.05, Color::rgb(255, 255, 255)),
];

/// Hydrometeor classification data levels.
pub static HYDROMETEOR_CLASS: &[(f64, Color)] = &[
    (10.0, Color::rgb(156, 156, 156)), // Biological
    (20.0, Color::rgb(118, 118, 118)), // Ground clutter
    (30.0, Color::rgb(243, 179, 179)), // Ice crystals
    (40.0, Color::rgb(99, 151, 249)),  // Dry snow
    (50.0, Color::rgb(13, 241, 2)),    // Wet snow
    (60.0, Color::rgb(98, 177, 97)),   // Light/moderate rain
    (70.0, Color::rgb(1, 130, 0)),     // Heavy rain
    (80.0, Color::rgb(251, 254, 1)),   // Big drops
    (90.0, Color::rgb(210, 133, 4)),   // Graupel
    (100.0, Color::rgb(255, 0, 0)),    // Hail, possibly with rain
    (110.0, Color::rgb(160, 0, 0)),    // Large hail
    (120.0, Color::rgb(255, 0, 255)),  // Giant hail
    (140.0, Color::rgb(231, 1, 254)),  // Unknown
    (150.0, Color::rgb(119, 0, 125)),  // Range folded
];

/// Precipitation accumulation data levels (0..255).
pub static PRECIPITATION_ACCUMULATION: &[(f64, Color)] = &[
    (1.0, Color::rgb(170, 170, 170)),
    (16.0, Color::rgb(118, 118, 118)),
    (32.0, Color::rgb(0, 255, 255)),
    (48.0, Color::rgb(0, 144, 255)),
    (64.0, Color::rgb(0, 255, 0)),
    (96.0, Color::rgb(0, 144, 0)),
    (128.0, Color::rgb(255, 255, 0)),
    (160.0, Color::rgb(255, 144, 0)),
    (192.0, Color::rgb(255, 0, 0)),
    (224.0, Color::rgb(255, 0, 255)),
    (248.0, Color::rgb(255, 255, 255)),
];

/// Digital vertically integrated liquid data levels (0..255).
pub static VERTICALLY_INTEGRATED_LIQUID: &[(f64, Color)] = &[
    (2.0, Color::rgb(118, 118, 118)),
    (20.0, Color::rgb(0, 236, 236)),
    (40.0, Color::rgb(0, 160, 246)),
    (60.0, Color::rgb(0, 255, 0)),
    (90.0, Color::rgb(0, 144, 0)),
    (120.0, Color::rgb(255, 255, 0)),
    (150.0, Color::rgb(255, 144, 0)),
    (180.0, Color::rgb(255, 0, 0)),
    (210.0, Color::rgb(255, 0, 255)),
    (240.0, Color::rgb(255, 255, 255)),
];
