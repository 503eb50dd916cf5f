//! Display units per product and color-table unit conversion.

/// Knots per metre-per-second, as used by the velocity color tables.
pub const KNOTS_PER_MS: f64 = 1.944;

/// Display unit for a product abbreviation, if known.
pub fn product_units(code: &str) -> Option<&'static str> {
    let unit = match code.trim_end() {
        "N0B" | "NXQ" | "TZX" | "TZL" | "REF" => "dBZ",
        "N0G" | "N0U" | "TVX" | "VEL" | "SW" => "m/s",
        "N0C" | "RHO" => "%",
        "N0X" | "ZDR" => "dB",
        "NSW" => "mph",
        "DVL" => "kg/m²",
        "N0S" => "knots",
        "PHI" => "deg",
        _ => return None,
    };
    Some(unit)
}

/// Converts color-table thresholds to the unit of the product's gate values.
///
/// - Velocity tables are in knots; gates are in m/s.
/// - Storm relative velocity classes are centered by +0.5.
/// - Hydrometeor classes are centered by -0.5.
///
/// Other products are left untouched.
pub fn scale_color_table(values: &mut [f64], code: &str) {
    match code.trim_end() {
        "N0G" | "N0U" | "TVX" | "VEL" => {
            for v in values.iter_mut() {
                *v /= KNOTS_PER_MS;
            }
        }
        "N0S" => {
            for v in values.iter_mut() {
                *v += 0.5;
            }
        }
        "N0H" | "HHC" => {
            for v in values.iter_mut() {
                *v -= 0.5;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_units() {
        assert_eq!(product_units("N0B"), Some("dBZ"));
        assert_eq!(product_units("SW "), Some("m/s"));
        assert_eq!(product_units("DVL"), Some("kg/m²"));
        assert_eq!(product_units("XYZ"), None);
    }

    #[test]
    fn test_velocity_table_to_ms() {
        let mut values = vec![19.44, -38.88];
        scale_color_table(&mut values, "N0G");
        assert!((values[0] - 10.0).abs() < 1e-9);
        assert!((values[1] + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_class_offsets() {
        let mut srv = vec![1.0];
        scale_color_table(&mut srv, "N0S");
        assert_eq!(srv, vec![1.5]);

        let mut hydro = vec![10.0];
        scale_color_table(&mut hydro, "HHC");
        assert_eq!(hydro, vec![9.5]);

        let mut untouched = vec![3.0];
        scale_color_table(&mut untouched, "REF");
        assert_eq!(untouched, vec![3.0]);
    }
}
