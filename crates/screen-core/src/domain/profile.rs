//! Display profile: raw platform signals in, presentation-ready record out.
//!
//! [`assemble_profile`] is recomputed on every render pass.  It holds no
//! state between calls, so two calls with equal signals produce equal
//! profiles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metrics::{
    compute_aspect_reduction, compute_diagonal_inches, derive_device_label, dp_to_px, AspectRatio,
    MetricsError,
};

/// Raw display and device signals supplied by a display source.
///
/// Immutable for the duration of one computation.  Sources re-read them on
/// every render because orientation or density may change between launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDisplaySignals {
    /// Device manufacturer, e.g. `"google"`.
    pub manufacturer: String,
    /// Device model, e.g. `"Pixel 6"`.
    pub model: String,
    /// Consumer-visible brand.  Reported, never used in the label.
    #[serde(default)]
    pub brand: String,
    /// Board / mainboard name.  Reported, never used in the label.
    #[serde(default)]
    pub board: String,
    /// OS release string, e.g. `"13"`.
    pub os_release: String,
    /// OS API level, e.g. `33`.
    pub os_api_level: u32,
    /// Declared screen width in density-independent units.
    pub width_dp: u32,
    /// Declared screen height in density-independent units.
    pub height_dp: u32,
    /// Density bucket in dots per inch (160 is the 1.0 baseline).
    pub density_dpi: u32,
    /// Density scale factor applied by the dp → px conversion.
    pub density: f32,
    /// Physical pixel width.
    pub width_px: u32,
    /// Physical pixel height.
    pub height_px: u32,
    /// Physical horizontal DPI.
    pub xdpi: f32,
    /// Physical vertical DPI.
    pub ydpi: f32,
    /// Smallest-width resource bucket resolved from the resource table.
    pub smallest_width_bucket: u32,
}

/// The record rendered on the profile screen.
///
/// The first seven fields are the copyable rows; the two aspect ratios are
/// carried for reports only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDisplayProfile {
    pub device_label: String,
    /// `"<release> (<api>)"`.
    pub os_label: String,
    /// Diagonal in inches, at most two decimals, half-up.
    pub diagonal_inches: String,
    /// `"<widthPx>x<heightPx>"` derived from the dp size and density.
    pub pixel_size: String,
    /// `"<widthDp>x<heightDp>"`.
    pub dp_size: String,
    pub density_dpi: u32,
    pub density_bucket_label: String,
    /// Reduced dp dimensions.
    pub aspect_dp: AspectRatio,
    /// Reduced physical pixel dimensions.  Not guaranteed to equal
    /// `aspect_dp`: DPI rounding skews the px/dp ratio.
    pub aspect_px: AspectRatio,
}

/// Builds a [`DeviceDisplayProfile`] from `signals`.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidDimension`] if a width or height is zero
/// and [`MetricsError::InvalidDpi`] if a physical DPI is unusable.
pub fn assemble_profile(signals: &RawDisplaySignals) -> Result<DeviceDisplayProfile, MetricsError> {
    let diagonal_inches =
        compute_diagonal_inches(signals.width_px, signals.height_px, signals.xdpi, signals.ydpi)?;
    let aspect_dp = compute_aspect_reduction(signals.width_dp, signals.height_dp)?;
    let aspect_px = compute_aspect_reduction(signals.width_px, signals.height_px)?;

    let width_px = dp_to_px(signals.width_dp, signals.density);
    let height_px = dp_to_px(signals.height_dp, signals.density);

    let profile = DeviceDisplayProfile {
        device_label: derive_device_label(&signals.manufacturer, &signals.model),
        os_label: format!("{} ({})", signals.os_release, signals.os_api_level),
        diagonal_inches,
        pixel_size: format!("{width_px}x{height_px}"),
        dp_size: format!("{}x{}", signals.width_dp, signals.height_dp),
        density_dpi: signals.density_dpi,
        density_bucket_label: signals.smallest_width_bucket.to_string(),
        aspect_dp,
        aspect_px,
    };

    debug!(
        device = %profile.device_label,
        diagonal = %profile.diagonal_inches,
        dp = %profile.dp_size,
        "assembled display profile"
    );
    Ok(profile)
}
