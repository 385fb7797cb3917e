//! Screen metrics calculator.
//!
//! The free functions in this module turn raw display signals into the
//! strings shown on the profile screen.  None of them touch the OS: every
//! value arrives as a parameter, including the density scale used by the
//! dp/px conversions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of fraction digits kept when formatting the diagonal.
pub const DIAGONAL_FRACTION_DIGITS: usize = 2;

/// Axis of a physical DPI reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Errors produced by the metrics arithmetic.
#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    /// One side of an aspect reduction is zero, so the GCD cannot divide it.
    #[error("invalid dimension {width}x{height}: both sides must be non-zero")]
    InvalidDimension { width: u32, height: u32 },

    /// A physical DPI reading is zero, negative, NaN, or infinite.
    #[error("invalid {axis} dpi: {value}")]
    InvalidDpi { axis: Axis, value: f32 },
}

/// A width:height ratio reduced to lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Uppercases the first character of `s` (ASCII only).
///
/// Returns an empty string for empty input and `s` unchanged when it already
/// starts with an uppercase letter.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if first.is_uppercase() => s.to_string(),
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Builds the human-readable device name.
///
/// When `model` already starts with `manufacturer` (case-sensitive) the model
/// alone is used, otherwise the capitalised manufacturer is prepended:
///
/// ```
/// use screen_core::domain::metrics::derive_device_label;
///
/// assert_eq!(derive_device_label("Samsung", "SamsungGalaxyS9"), "SamsungGalaxyS9");
/// assert_eq!(derive_device_label("google", "Pixel 6"), "Google Pixel 6");
/// ```
pub fn derive_device_label(manufacturer: &str, model: &str) -> String {
    if model.starts_with(manufacturer) {
        capitalize(model)
    } else {
        format!("{} {}", capitalize(manufacturer), model)
    }
}

/// Greatest common divisor by Euclid's recursion: `gcd(w, 0) = w`.
pub fn gcd(width: u32, height: u32) -> u32 {
    if height == 0 {
        return width;
    }
    gcd(height, width % height)
}

/// Reduces `width x height` to its lowest-terms ratio.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidDimension`] when either side is zero.
pub fn compute_aspect_reduction(width: u32, height: u32) -> Result<AspectRatio, MetricsError> {
    if width == 0 || height == 0 {
        return Err(MetricsError::InvalidDimension { width, height });
    }
    let divisor = gcd(width, height);
    Ok(AspectRatio {
        width: width / divisor,
        height: height / divisor,
    })
}

/// Physical diagonal in inches from pixel counts and per-axis DPI.
///
/// Computed in `f32` throughout, so the value handed to the formatter is the
/// same single-precision number a Float-based display stack reports.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidDpi`] if either DPI is not a positive,
/// finite number.
pub fn diagonal_inches(
    width_px: u32,
    height_px: u32,
    xdpi: f32,
    ydpi: f32,
) -> Result<f32, MetricsError> {
    let xdpi = checked_dpi(Axis::X, xdpi)?;
    let ydpi = checked_dpi(Axis::Y, ydpi)?;

    let width_inches = width_px as f32 / xdpi;
    let height_inches = height_px as f32 / ydpi;
    Ok((width_inches * width_inches + height_inches * height_inches).sqrt())
}

/// Physical diagonal formatted with at most two fraction digits, half-up.
///
/// # Errors
///
/// See [`diagonal_inches`].
pub fn compute_diagonal_inches(
    width_px: u32,
    height_px: u32,
    xdpi: f32,
    ydpi: f32,
) -> Result<String, MetricsError> {
    let diagonal = diagonal_inches(width_px, height_px, xdpi, ydpi)?;
    Ok(format_half_up(f64::from(diagonal), DIAGONAL_FRACTION_DIGITS))
}

fn checked_dpi(axis: Axis, value: f32) -> Result<f32, MetricsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MetricsError::InvalidDpi { axis, value })
    }
}

/// Fraction digits that hold the exact decimal expansion of any `f64`.
const EXACT_F64_FRACTION_DIGITS: usize = 1074;

/// Formats `value` with at most `max_fraction_digits` digits after the point.
///
/// Rounding is half-up (away from zero) on the exact binary value, not on
/// its shortest decimal form: the `f64` nearest to `2.345` is slightly above
/// it and formats as `"2.35"`, the one nearest to `9.995` is slightly below
/// and formats as `"9.99"`.  Trailing zeros and a dangling decimal point are
/// dropped: `5.0` formats as `"5"`, `5.80` as `"5.8"`.
pub fn format_half_up(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Fixed precision prints the exact expansion, padded with zeros.
    let repr = format!("{:.*}", EXACT_F64_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut int_len = int_part.len();
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_fraction_digits))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(max_fraction_digits)
        .is_some_and(|&b| b >= b'5');

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                int_len += 1;
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let to_text = |ds: &[u8]| -> String { ds.iter().map(|d| char::from(b'0' + d)).collect() };
    let int_text = to_text(&digits[..int_len]);
    let frac_text = to_text(&digits[int_len..]);
    let frac_text = frac_text.trim_end_matches('0');

    let mut out = String::with_capacity(int_text.len() + frac_text.len() + 2);
    let is_zero = int_text.bytes().all(|b| b == b'0') && frac_text.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&int_text);
    if !frac_text.is_empty() {
        out.push('.');
        out.push_str(frac_text);
    }
    out
}

/// Converts density-independent units to whole pixels (truncated).
pub fn dp_to_px(dp: u32, density: f32) -> u32 {
    (dp as f32 * density) as u32
}

/// Converts pixels to density-independent units.
///
/// A non-positive density yields `0.0` instead of an infinity.
pub fn px_to_dp(px: u32, density: f32) -> f32 {
    if density <= 0.0 {
        return 0.0;
    }
    px as f32 / density
}

// ── Tests ─────────────────────────────────────────────────────────────────────
