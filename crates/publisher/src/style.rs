//! Layer style assignment.
//!
//! Maps a layer name onto one of a fixed set of catalog styles by substring
//! group. First matching group wins; an unmatched name falls back to the
//! default raster style with a warning rather than failing the upload.

use tracing::warn;

/// Substring groups, checked in order.
const STYLE_GROUPS: [(&str, &[&str]); 2] = [
    ("dynamic_default", &["depth", "density", "swe", "dem", "veg"]),
    ("mask", &["mask"]),
];

/// Style used when no group matches.
pub const DEFAULT_STYLE: &str = "raster";

/// Pick the style for a layer name.
pub fn assign_style(layer_name: &str) -> &'static str {
    let lower = layer_name.to_lowercase();

    for (style, needles) in STYLE_GROUPS {
        if needles.iter().any(|needle| lower.contains(needle)) {
            return style;
        }
    }

    warn!(
        layer = %layer_name,
        style = DEFAULT_STYLE,
        "No style group matches layer, falling back to default"
    );
    DEFAULT_STYLE
}
