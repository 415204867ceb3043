//! Static naming and variable tables for basin publication.

use chrono::NaiveDate;

/// Variables that locate data rather than carry it; never published.
pub use netcdf_prep::COORDINATE_VARS;

/// Modeled-output variables worth publishing, plus the coordinates they
/// depend on. Everything else in a model file is dropped before upload.
pub const MODELED_KEEP_VARS: [&str; 7] = [
    "time",
    "x",
    "y",
    "projection",
    "thickness",
    "snow_density",
    "specific_mass",
];

/// Model variable name → short display name.
pub fn remap_variable(variable: &str) -> &str {
    match variable {
        "snow_density" => "density",
        "specific_mass" => "SWE",
        "thickness" => "depth",
        other => other,
    }
}

/// Digits-only form of the acquisition date, appended to layer names so
/// repeated uploads of the same basin stay distinguishable.
pub fn date_digits(date: &NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Internal (catalog) layer name for a variable on a given date.
pub fn internal_layer_name(variable: &str, date: &NaiveDate) -> String {
    format!("{}{}", remap_variable(variable), date_digits(date))
}

/// Display title: basin, ISO date and short name, title-cased.
pub fn layer_title(basin: &str, date: &NaiveDate, variable: &str) -> String {
    title_case(&format!(
        "{} {} {}",
        basin,
        date.format("%Y-%m-%d"),
        remap_variable(variable)
    ))
}

/// Capitalize the first letter of each word, lower-casing the rest.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 19).unwrap()
    }

    #[test]
    fn test_remap_known_variables() {
        assert_eq!(remap_variable("specific_mass"), "SWE");
        assert_eq!(remap_variable("snow_density"), "density");
        assert_eq!(remap_variable("thickness"), "depth");
        assert_eq!(remap_variable("dem"), "dem");
    }

    #[test]
    fn test_internal_name_appends_date_digits() {
        assert_eq!(internal_layer_name("specific_mass", &date()), "SWE20200119");
        assert_eq!(
            internal_layer_name("snow_density", &date()),
            "density20200119"
        );
    }

    #[test]
    fn test_layer_title_is_title_cased() {
        assert_eq!(
            layer_title("brb", &date(), "specific_mass"),
            "Brb 2020-01-19 Swe"
        );
        assert_eq!(
            layer_title("kings", &date(), "thickness"),
            "Kings 2020-01-19 Depth"
        );
    }

    #[test]
    fn test_title_case_leaves_digits_alone() {
        assert_eq!(title_case("brb 2020-01-19 SWE"), "Brb 2020-01-19 Swe");
    }

    #[test]
    fn test_modeled_keep_list_covers_coordinates() {
        for coordinate in COORDINATE_VARS {
            assert!(MODELED_KEEP_VARS.contains(&coordinate));
        }
    }
}
