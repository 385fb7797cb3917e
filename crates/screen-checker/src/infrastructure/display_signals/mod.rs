//! Platform-specific display signal sources.
//!
//! Reads the main display's pixel size and physical size, plus whatever
//! device identification the OS exposes, and turns them into
//! [`RawDisplaySignals`].
//!
//! # Platform implementations
//!
//! Each platform gathers a [`PhysicalDisplay`] and a [`PlatformIdentity`];
//! the shared [`signals_from_physical`] does the unit conversions.  The
//! correct source is selected at compile time and re-exported as
//! `NativeDisplaySource`:
//!
//! | Module    | OS      | API used                                              |
//! |-----------|---------|-------------------------------------------------------|
//! | `windows` | Windows | `GetDeviceCaps` (`HORZRES`, `HORZSIZE`, `LOGPIXELSX`) |
//! | `linux`   | Linux   | `XDisplayWidth` / `XDisplayWidthMM` (Xlib) + sysfs    |
//! | `macos`   | macOS   | `CGDisplay::pixels_wide` / `CGDisplayScreenSize`      |
//!
//! [`MockDisplaySource`] is always compiled so tests on any platform can use
//! it without a physical display.
//!
//! # Desktop density
//!
//! Desktops have no density bucket of their own.  The scale factor comes
//! from the config (`[display] scale`) when set, otherwise from the platform
//! (logical DPI on Windows, backing scale on macOS, 1.0 under X11).  The
//! bucket is then `160 * scale` and dp sizes are `px / scale`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use screen_core::domain::density::density_dpi_for_scale;
use screen_core::{px_to_dp, RawDisplaySignals};

use crate::application::collect_profile::{DisplaySignalSource, SignalError};

/// Millimetres per inch.
const MM_PER_INCH: f32 = 25.4;

/// DPI assumed when the platform reports a zero physical size.
pub const FALLBACK_DPI: f32 = 96.0;

/// Pixel and physical dimensions of one display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalDisplay {
    pub width_px: u32,
    pub height_px: u32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Identification strings as reported by the platform, before overrides.
///
/// Carries the OS fields too; the report keeps only the device strings in
/// [`screen_core::DeviceIdentity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformIdentity {
    pub manufacturer: String,
    pub model: String,
    pub brand: String,
    pub board: String,
    pub os_release: String,
    pub os_api_level: u32,
}

/// User-supplied replacements for identification strings.
///
/// Lives in the `[device]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_release: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_api_level: Option<u32>,
}

impl DeviceOverrides {
    /// Replaces every field of `identity` that has an override.
    pub fn apply(&self, identity: &mut PlatformIdentity) {
        if let Some(v) = &self.manufacturer {
            identity.manufacturer = v.clone();
        }
        if let Some(v) = &self.model {
            identity.model = v.clone();
        }
        if let Some(v) = &self.brand {
            identity.brand = v.clone();
        }
        if let Some(v) = &self.board {
            identity.board = v.clone();
        }
        if let Some(v) = &self.os_release {
            identity.os_release = v.clone();
        }
        if let Some(v) = self.os_api_level {
            identity.os_api_level = v;
        }
    }
}

/// Options shared by every native source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceOptions {
    /// Density scale override; `None` uses the platform's own scale.
    pub scale: Option<f32>,
    pub overrides: DeviceOverrides,
}

/// Physical DPI along one axis, falling back to [`FALLBACK_DPI`] when the
/// platform reports no physical size.
pub fn physical_dpi(pixels: u32, millimetres: f32) -> f32 {
    if millimetres.is_finite() && millimetres > 0.0 {
        pixels as f32 / (millimetres / MM_PER_INCH)
    } else {
        FALLBACK_DPI
    }
}

/// Converts a physical reading into the signals the calculator consumes.
///
/// `scale` values that are not positive and finite are replaced by 1.0.
pub fn signals_from_physical(
    display: PhysicalDisplay,
    scale: f32,
    identity: PlatformIdentity,
) -> RawDisplaySignals {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        warn!(scale, "ignoring unusable density scale");
        1.0
    };

    let width_dp = px_to_dp(display.width_px, scale) as u32;
    let height_dp = px_to_dp(display.height_px, scale) as u32;

    RawDisplaySignals {
        manufacturer: identity.manufacturer,
        model: identity.model,
        brand: identity.brand,
        board: identity.board,
        os_release: identity.os_release,
        os_api_level: identity.os_api_level,
        width_dp,
        height_dp,
        density_dpi: density_dpi_for_scale(scale),
        density: scale,
        width_px: display.width_px,
        height_px: display.height_px,
        xdpi: physical_dpi(display.width_px, display.width_mm),
        ydpi: physical_dpi(display.height_px, display.height_mm),
        smallest_width_bucket: width_dp.min(height_dp),
    }
}

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsDisplaySource as NativeDisplaySource;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxDisplaySource as NativeDisplaySource;

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosDisplaySource as NativeDisplaySource;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A display source that returns fixed signals.
///
/// Used in tests, and by `--mock` runs on machines without a display.
#[derive(Debug, Clone)]
pub struct MockDisplaySource {
    pub signals: RawDisplaySignals,
}

impl MockDisplaySource {
    /// A 6.4" phone: 1080x2400 px, 411x914 dp at 2.625x.
    pub fn phone() -> Self {
        Self {
            signals: RawDisplaySignals {
                manufacturer: "google".to_string(),
                model: "Pixel 6".to_string(),
                brand: "google".to_string(),
                board: "oriole".to_string(),
                os_release: "13".to_string(),
                os_api_level: 33,
                width_dp: 411,
                height_dp: 914,
                density_dpi: 420,
                density: 2.625,
                width_px: 1080,
                height_px: 2400,
                xdpi: 411.0,
                ydpi: 411.0,
                smallest_width_bucket: 411,
            },
        }
    }

    /// A 24" 1920x1080 desktop monitor at scale 1.0.
    pub fn desktop_1080p() -> Self {
        Self::desktop_1080p_at(1.0)
    }

    /// The same monitor at another density scale.
    pub fn desktop_1080p_at(scale: f32) -> Self {
        let display = PhysicalDisplay {
            width_px: 1920,
            height_px: 1080,
            width_mm: 531.0,
            height_mm: 299.0,
        };
        let identity = PlatformIdentity {
            manufacturer: "Dell Inc.".to_string(),
            model: "OptiPlex 7090".to_string(),
            brand: "Dell Inc.".to_string(),
            board: "0K8WXY".to_string(),
            os_release: "22.04".to_string(),
            os_api_level: 6,
        };
        Self {
            signals: signals_from_physical(display, scale, identity),
        }
    }
}

impl DisplaySignalSource for MockDisplaySource {
    /// Returns the signals provided at construction time (never fails).
    fn read_signals(&self) -> Result<RawDisplaySignals, SignalError> {
        Ok(self.signals.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
