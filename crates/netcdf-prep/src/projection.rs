//! UTM grid-mapping metadata from EPSG codes.
//!
//! The attribute set follows the THREDDS standard coordinate-transform
//! conventions for `universal_transverse_mercator`. Only the UTM code ranges
//! the modeling group actually uses are supported; anything else is an error
//! rather than a guess.

use crate::error::{PrepError, PrepResult};

/// GRS80 ellipsoid (NAD83).
const GRS80_SEMI_MAJOR: f64 = 6_378_137.0;
const GRS80_INVERSE_FLATTENING: f64 = 298.257_222_101;

/// WGS84 ellipsoid.
const WGS84_SEMI_MAJOR: f64 = 6_378_137.0;
const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Projection attributes written onto the `projection` variable.
#[derive(Debug, Clone, PartialEq)]
pub struct UtmMapping {
    pub zone: u32,
    pub northern: bool,
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
    pub spatial_ref: String,
}

/// Derive UTM mapping attributes from an EPSG code.
///
/// Supported ranges: 269xx (NAD83 / UTM north), 326xx (WGS84 / UTM north),
/// 327xx (WGS84 / UTM south).
pub fn utm_mapping_from_epsg(epsg: u32) -> PrepResult<UtmMapping> {
    let (datum, zone, northern, semi_major, inverse_flattening) = match epsg {
        26901..=26923 => (
            "NAD83",
            epsg - 26900,
            true,
            GRS80_SEMI_MAJOR,
            GRS80_INVERSE_FLATTENING,
        ),
        32601..=32660 => (
            "WGS 84",
            epsg - 32600,
            true,
            WGS84_SEMI_MAJOR,
            WGS84_INVERSE_FLATTENING,
        ),
        32701..=32760 => (
            "WGS 84",
            epsg - 32700,
            false,
            WGS84_SEMI_MAJOR,
            WGS84_INVERSE_FLATTENING,
        ),
        _ => return Err(PrepError::UnsupportedEpsg(epsg)),
    };

    let hemisphere = if northern { "N" } else { "S" };

    Ok(UtmMapping {
        zone,
        northern,
        semi_major_axis: semi_major,
        inverse_flattening,
        spatial_ref: format!("{} / UTM zone {}{} (EPSG:{})", datum, zone, hemisphere, epsg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nad83_utm_zone_11() {
        let mapping = utm_mapping_from_epsg(26911).unwrap();
        assert_eq!(mapping.zone, 11);
        assert!(mapping.northern);
        assert_eq!(mapping.semi_major_axis, 6_378_137.0);
        assert!((mapping.inverse_flattening - 298.257_222_101).abs() < 1e-9);
        assert!(mapping.spatial_ref.contains("NAD83"));
        assert!(mapping.spatial_ref.contains("EPSG:26911"));
    }

    #[test]
    fn test_wgs84_utm_zone_13_north() {
        let mapping = utm_mapping_from_epsg(32613).unwrap();
        assert_eq!(mapping.zone, 13);
        assert!(mapping.northern);
        assert!((mapping.inverse_flattening - 298.257_223_563).abs() < 1e-9);
    }

    #[test]
    fn test_wgs84_utm_south() {
        let mapping = utm_mapping_from_epsg(32719).unwrap();
        assert_eq!(mapping.zone, 19);
        assert!(!mapping.northern);
        assert!(mapping.spatial_ref.ends_with("(EPSG:32719)"));
    }

    #[test]
    fn test_geographic_code_rejected() {
        assert!(matches!(
            utm_mapping_from_epsg(4326),
            Err(PrepError::UnsupportedEpsg(4326))
        ));
    }
}
