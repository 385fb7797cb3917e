//! Windows display signals via GDI `GetDeviceCaps`.
//!
//! Queries the screen device context for resolution (`HORZRES`/`VERTRES`),
//! physical size in millimetres (`HORZSIZE`/`VERTSIZE`), and logical DPI
//! (`LOGPIXELSX`), which gives the default scale as `LOGPIXELSX / 96`.

use screen_core::RawDisplaySignals;
use tracing::debug;

use super::{signals_from_physical, PlatformIdentity, PhysicalDisplay, SourceOptions};
use crate::application::collect_profile::{DisplaySignalSource, SignalError};

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetDC, GetDeviceCaps, ReleaseDC, HORZRES, HORZSIZE, LOGPIXELSX, VERTRES, VERTSIZE,
};

/// Logical DPI that Windows treats as 100 % scaling.
const WINDOWS_BASE_DPI: f32 = 96.0;

/// Windows implementation of [`DisplaySignalSource`] using GDI.
pub struct WindowsDisplaySource {
    options: SourceOptions,
}

impl WindowsDisplaySource {
    /// Creates a new `WindowsDisplaySource`.
    pub fn new(options: SourceOptions) -> Self {
        Self { options }
    }
}

impl DisplaySignalSource for WindowsDisplaySource {
    fn read_signals(&self) -> Result<RawDisplaySignals, SignalError> {
        let (display, logical_dpi) = query_screen_caps()?;

        // No vendor string without WMI; an empty manufacturer makes the
        // label the model alone.
        let mut identity = PlatformIdentity {
            manufacturer: String::new(),
            model: std::env::var("COMPUTERNAME").unwrap_or_default(),
            brand: "Windows".to_string(),
            board: std::env::var("PROCESSOR_ARCHITECTURE").unwrap_or_default(),
            os_release: std::env::var("OS").unwrap_or_default(),
            os_api_level: 0,
        };
        self.options.overrides.apply(&mut identity);

        let scale = self
            .options
            .scale
            .unwrap_or(logical_dpi as f32 / WINDOWS_BASE_DPI);
        debug!(?display, logical_dpi, scale, "queried GDI screen caps");
        Ok(signals_from_physical(display, scale, identity))
    }
}

/// Reads resolution, physical size, and logical DPI of the screen DC.
///
/// # Errors
///
/// Returns [`SignalError::Platform`] if no screen DC is available or GDI
/// reports a zero resolution.
fn query_screen_caps() -> Result<(PhysicalDisplay, i32), SignalError> {
    // SAFETY: a null HWND requests the DC of the entire screen; it is
    // released below before returning.
    let hdc = unsafe { GetDC(HWND::default()) };
    if hdc.is_invalid() {
        return Err(SignalError::Platform("GetDC(NULL) returned no DC".to_string()));
    }

    // SAFETY: `hdc` is a valid screen DC for the duration of these calls.
    let (display, logical_dpi) = unsafe {
        let display = PhysicalDisplay {
            width_px: GetDeviceCaps(hdc, HORZRES).max(0) as u32,
            height_px: GetDeviceCaps(hdc, VERTRES).max(0) as u32,
            width_mm: GetDeviceCaps(hdc, HORZSIZE) as f32,
            height_mm: GetDeviceCaps(hdc, VERTSIZE) as f32,
        };
        (display, GetDeviceCaps(hdc, LOGPIXELSX))
    };

    // SAFETY: `hdc` came from GetDC with the same (null) window.
    unsafe { ReleaseDC(HWND::default(), hdc) };

    if display.width_px == 0 || display.height_px == 0 {
        return Err(SignalError::Platform(
            "GetDeviceCaps reported a zero resolution".to_string(),
        ));
    }

    Ok((display, logical_dpi))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
