//! Filtered artifact copy and projection tagging.
//!
//! `prepare_copy` reproduces the group's publication prep: global attributes,
//! dimensions and kept variables are copied exactly, basin masking turns
//! out-of-basin cells into NaN, and every publishable variable gets a
//! (min, max) range computed over its finite, non-fill values. The
//! acquisition date falls out of the time coordinate when one is kept.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use crate::error::{PrepError, PrepResult};
use crate::projection::utm_mapping_from_epsg;

/// Variables that locate data rather than carry it; never published as
/// layers and never masked.
pub const COORDINATE_VARS: [&str; 4] = ["time", "x", "y", "projection"];

/// Which variables survive the copy.
#[derive(Debug, Clone)]
pub enum VarFilter {
    /// Copy only the named variables.
    KeepOnly(Vec<String>),
    /// Copy everything except the named variables.
    Exclude(Vec<String>),
}

impl VarFilter {
    fn keeps(&self, name: &str) -> bool {
        match self {
            VarFilter::KeepOnly(names) => names.iter().any(|n| n == name),
            VarFilter::Exclude(names) => !names.iter().any(|n| n == name),
        }
    }
}

/// Result of a prepared copy.
#[derive(Debug)]
pub struct PrepOutput {
    /// Path of the reduced artifact.
    pub path: PathBuf,
    /// Names of the variables that were copied.
    pub variables: Vec<String>,
    /// (min, max) over finite, non-fill values, per publishable variable.
    pub ranges: HashMap<String, (f64, f64)>,
    /// Whether the copy carries a `projection` variable.
    pub has_projection: bool,
    /// Date decoded from the time coordinate, when one was kept.
    pub date: Option<NaiveDate>,
}

/// Copy `source` to `dest`, keeping only the variables the filter allows.
///
/// When `mask` names a basin mask file (a netCDF with a `mask` variable of
/// ones and zeros on the model grid), cells outside the basin become NaN in
/// every copied data variable. The source file is never modified.
pub fn prepare_copy(
    source: &Path,
    dest: &Path,
    filter: &VarFilter,
    mask: Option<&Path>,
) -> PrepResult<PrepOutput> {
    let src = netcdf::open(source)?;
    let mut dst = netcdf::create(dest)?;

    let mask_values = match mask {
        Some(mask_path) => Some(load_mask(mask_path)?),
        None => None,
    };

    for attribute in src.attributes() {
        dst.add_attribute(&attribute.name(), attribute.value()?)?;
    }

    for dimension in src.dimensions() {
        dst.add_dimension(&dimension.name(), dimension.len())?;
    }

    let mut output = PrepOutput {
        path: dest.to_path_buf(),
        variables: Vec::new(),
        ranges: HashMap::new(),
        has_projection: false,
        date: None,
    };

    for variable in src.variables() {
        let name: String = variable.name().to_string();

        if !filter.keeps(&name) {
            debug!(variable = %name, "Dropping variable");
            continue;
        }

        // The projection variable carries its information in attributes; its
        // value is a placeholder and its type varies between producers.
        if name == "projection" {
            let mut out = dst.add_variable::<i32>(&name, &[])?;
            for attribute in variable.attributes() {
                out.put_attribute(&attribute.name(), attribute.value()?)?;
            }
            out.put_values(&[0i32], ..)?;
            output.has_projection = true;
            output.variables.push(name);
            continue;
        }

        let dim_names: Vec<String> = variable
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        let dim_refs: Vec<&str> = dim_names.iter().map(|s| s.as_str()).collect();

        let mut values: Vec<f64> = variable.get_values(..)?;
        let is_coordinate = COORDINATE_VARS.contains(&name.as_str());

        if let Some(mask) = mask_values.as_deref() {
            if !is_coordinate {
                apply_mask(&mut values, mask);
            }
        }

        let mut out = dst.add_variable::<f64>(&name, &dim_refs)?;
        for attribute in variable.attributes() {
            let value = attribute.value()?;
            // The copy is typed f64; the fill sentinel must follow or the
            // library rejects the attribute.
            if attribute.name() == "_FillValue" {
                if let Some(fill) = numeric_value(&value) {
                    out.put_attribute("_FillValue", fill)?;
                    continue;
                }
            }
            out.put_attribute(&attribute.name(), value)?;
        }
        out.put_values(&values, ..)?;

        if name == "time" {
            output.date = decode_time_coordinate(&variable, &values)?;
        }

        if !is_coordinate {
            let fill = attr_f64(&variable, "_FillValue");
            if let Some(range) = value_range(&values, fill) {
                output.ranges.insert(name.clone(), range);
            }
        }

        output.variables.push(name);
    }

    info!(
        source = %source.display(),
        dest = %dest.display(),
        variables = output.variables.len(),
        masked = mask.is_some(),
        "Prepared artifact copy"
    );

    Ok(output)
}

/// Append a UTM `projection` variable (and `grid_mapping` references on the
/// data variables) to an artifact that lacks one.
pub fn tag_utm_projection(path: &Path, epsg: u32) -> PrepResult<()> {
    let mapping = utm_mapping_from_epsg(epsg)?;
    let mut file = netcdf::append(path)?;

    let names: Vec<String> = file.variables().map(|v| v.name().to_string()).collect();

    {
        let mut projection = file.add_variable::<i32>("projection", &[])?;
        projection.put_attribute("grid_mapping_name", "universal_transverse_mercator")?;
        projection.put_attribute("utm_zone_number", mapping.zone as f64)?;
        projection.put_attribute("semi_major_axis", mapping.semi_major_axis)?;
        projection.put_attribute("inverse_flattening", mapping.inverse_flattening)?;
        projection.put_attribute("spatial_ref", mapping.spatial_ref.as_str())?;
        projection.put_attribute("_CoordinateTransformType", "projection")?;
        projection.put_attribute("_CoordinateAxisTypes", "GeoX GeoY")?;
        projection.put_values(&[0i32], ..)?;
    }

    for name in names {
        if COORDINATE_VARS.contains(&name.as_str()) {
            continue;
        }
        if let Some(mut variable) = file.variable_mut(&name) {
            variable.put_attribute("grid_mapping", "projection")?;
        }
    }

    info!(path = %path.display(), epsg = epsg, zone = mapping.zone, "Tagged UTM projection");
    Ok(())
}

/// Read the basin mask grid from a mask file.
fn load_mask(path: &Path) -> PrepResult<Vec<f64>> {
    let file = netcdf::open(path)?;
    let variable = file
        .variable("mask")
        .ok_or_else(|| PrepError::MissingVariable {
            variable: "mask".to_string(),
            path: path.to_path_buf(),
        })?;

    let values: Vec<f64> = variable.get_values(..)?;
    Ok(values)
}

/// NaN-out every cell whose mask value is zero.
///
/// The mask covers one 2D grid; data variables may stack extra leading
/// dimensions (time) on top of it, so the mask is applied per trailing
/// block.
pub(crate) fn apply_mask(values: &mut [f64], mask: &[f64]) {
    if mask.is_empty() || values.len() % mask.len() != 0 {
        warn!(
            values = values.len(),
            mask = mask.len(),
            "Mask grid does not tile the variable, skipping mask"
        );
        return;
    }

    for (i, value) in values.iter_mut().enumerate() {
        if mask[i % mask.len()] == 0.0 {
            *value = f64::NAN;
        }
    }
}

/// (min, max) over finite values, excluding the fill sentinel.
pub(crate) fn value_range(values: &[f64], fill: Option<f64>) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;

    for &value in values {
        if !value.is_finite() {
            continue;
        }
        if let Some(fill) = fill {
            if value == fill {
                continue;
            }
        }
        range = Some(match range {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    range
}

fn decode_time_coordinate(
    variable: &netcdf::Variable,
    values: &[f64],
) -> PrepResult<Option<NaiveDate>> {
    let units = match attr_string(variable, "units") {
        Some(units) => units,
        None => return Ok(None),
    };
    let offset = match values.first() {
        Some(&offset) => offset,
        None => return Ok(None),
    };

    let datetime = decode_time_units(&units, offset)?;
    Ok(Some(datetime.date()))
}

/// Decode a CF-style `"<unit> since <datetime>"` time value.
pub(crate) fn decode_time_units(units: &str, offset: f64) -> PrepResult<NaiveDateTime> {
    let (unit, base) = units
        .split_once(" since ")
        .ok_or_else(|| PrepError::TimeUnits(units.to_string()))?;

    let base = base.trim().trim_end_matches(" UTC").trim_end_matches('Z');
    let base_datetime =
        parse_base_datetime(base).ok_or_else(|| PrepError::TimeUnits(units.to_string()))?;

    let seconds_per_unit = match unit.trim().to_lowercase().as_str() {
        "seconds" | "second" | "secs" | "sec" | "s" => 1.0,
        "minutes" | "minute" | "mins" | "min" => 60.0,
        "hours" | "hour" | "hrs" | "hr" | "h" => 3600.0,
        "days" | "day" | "d" => 86400.0,
        _ => return Err(PrepError::TimeUnits(units.to_string())),
    };

    Ok(base_datetime + Duration::seconds((offset * seconds_per_unit) as i64))
}

fn parse_base_datetime(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    for format in FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn attr_string(variable: &netcdf::Variable, name: &str) -> Option<String> {
    match variable.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn attr_f64(variable: &netcdf::Variable, name: &str) -> Option<f64> {
    numeric_value(&variable.attribute_value(name)?.ok()?)
}

fn numeric_value(value: &netcdf::AttributeValue) -> Option<f64> {
    match value {
        netcdf::AttributeValue::Double(d) => Some(*d),
        netcdf::AttributeValue::Float(f) => Some(*f as f64),
        netcdf::AttributeValue::Int(i) => Some(*i as f64),
        netcdf::AttributeValue::Short(s) => Some(*s as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hours_since() {
        let datetime = decode_time_units("hours since 2019-10-01 00:00:00", 24.0).unwrap();
        assert_eq!(
            datetime.date(),
            NaiveDate::from_ymd_opt(2019, 10, 2).unwrap()
        );
    }

    #[test]
    fn test_decode_days_since_date_only() {
        let datetime = decode_time_units("days since 2020-01-01", 18.5).unwrap();
        assert_eq!(
            datetime.date(),
            NaiveDate::from_ymd_opt(2020, 1, 19).unwrap()
        );
        assert_eq!(datetime.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_rejects_unknown_unit() {
        assert!(matches!(
            decode_time_units("fortnights since 2020-01-01", 1.0),
            Err(PrepError::TimeUnits(_))
        ));
        assert!(matches!(
            decode_time_units("not a cf string", 1.0),
            Err(PrepError::TimeUnits(_))
        ));
    }

    #[test]
    fn test_filter_keep_only() {
        let filter = VarFilter::KeepOnly(vec!["time".to_string(), "thickness".to_string()]);
        assert!(filter.keeps("time"));
        assert!(filter.keeps("thickness"));
        assert!(!filter.keeps("mask"));
    }

    #[test]
    fn test_filter_exclude() {
        let filter = VarFilter::Exclude(vec!["mask".to_string()]);
        assert!(filter.keeps("dem"));
        assert!(!filter.keeps("mask"));
    }

    #[test]
    fn test_value_range_skips_fill_and_nan() {
        let values = [f64::NAN, -9999.0, 0.5, 2.0, 1.0];
        assert_eq!(value_range(&values, Some(-9999.0)), Some((0.5, 2.0)));
    }

    #[test]
    fn test_value_range_empty_when_all_invalid() {
        let values = [f64::NAN, -9999.0];
        assert_eq!(value_range(&values, Some(-9999.0)), None);
    }

    #[test]
    fn test_apply_mask_tiles_over_leading_dimension() {
        // Two timesteps over a 2x2 grid, mask knocks out one cell.
        let mut values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mask = vec![1.0, 0.0, 1.0, 1.0];

        apply_mask(&mut values, &mask);

        assert!(values[1].is_nan());
        assert!(values[5].is_nan());
        assert_eq!(values[0], 1.0);
        assert_eq!(values[4], 5.0);
    }

    #[test]
    fn test_apply_mask_skipped_on_shape_mismatch() {
        let mut values = vec![1.0, 2.0, 3.0];
        let mask = vec![1.0, 0.0];

        apply_mask(&mut values, &mask);

        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
