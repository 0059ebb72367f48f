//! Text rendering of rotation components.
//!
//! Pose files store vectors as comma-separated strings. Components are written
//! with the shortest digits that round-trip, always with a fractional part
//! (`1.0`, `-0.0`), switching to exponent notation with a signed two-digit
//! exponent (`1e-05`, `2.5e+16`) for magnitudes outside `[1e-4, 1e16)`.

use cmpose_cmp::Quaternion;

/// Separator between vector components.
pub const COMPONENT_SEPARATOR: &str = ", ";

const FIXED_MIN: f64 = 1e-4;
const FIXED_MAX: f64 = 1e16;

/// Render a single component.
///
/// # Example
///
/// ```
/// use cmpose_pose::format::format_component;
///
/// assert_eq!(format_component(-0.5715487), "-0.5715487");
/// assert_eq!(format_component(1.0), "1.0");
/// assert_eq!(format_component(-0.0), "-0.0");
/// assert_eq!(format_component(0.00001), "1e-05");
/// ```
pub fn format_component(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    if (FIXED_MIN..FIXED_MAX).contains(&value.abs()) {
        let text = value.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    } else {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => text,
        }
    }
}

/// Render a quaternion as `"x, y, z, w"`.
pub fn format_rotation(rotation: &Quaternion) -> String {
    rotation
        .components()
        .iter()
        .map(|&c| format_component(c))
        .collect::<Vec<_>>()
        .join(COMPONENT_SEPARATOR)
}
