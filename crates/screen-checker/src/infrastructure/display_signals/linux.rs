//! Linux display signals via Xlib and sysfs.
//!
//! Pixel and millimetre sizes come from the default X screen.  Device
//! identification comes from the DMI entries under `/sys/class/dmi/id`, the
//! OS release from `/etc/os-release`, and the API level from the kernel's
//! major version.
//!
//! # Implementation notes
//!
//! Plain Xlib reports one size for the whole X screen.  With several
//! monitors attached to one screen the physical size covers all of them;
//! per-output sizes need Xrandr.

use std::path::Path;

use screen_core::RawDisplaySignals;
use tracing::debug;

use super::{signals_from_physical, PlatformIdentity, PhysicalDisplay, SourceOptions};
use crate::application::collect_profile::{DisplaySignalSource, SignalError};

const DMI_DIR: &str = "/sys/class/dmi/id";
const OS_RELEASE_PATH: &str = "/etc/os-release";
const KERNEL_RELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// Linux X11 implementation of [`DisplaySignalSource`].
pub struct LinuxDisplaySource {
    options: SourceOptions,
}

impl LinuxDisplaySource {
    /// Creates a new `LinuxDisplaySource`.
    pub fn new(options: SourceOptions) -> Self {
        Self { options }
    }
}

impl DisplaySignalSource for LinuxDisplaySource {
    fn read_signals(&self) -> Result<RawDisplaySignals, SignalError> {
        let screen = query_default_screen()?;
        let mut identity = read_identity();
        self.options.overrides.apply(&mut identity);

        // X11 has no standard scale; 1.0 unless configured.
        let scale = self.options.scale.unwrap_or(1.0);
        debug!(display = ?screen, scale, "queried X11 default screen");
        Ok(signals_from_physical(screen, scale, identity))
    }
}

/// Reads the default X screen's size in pixels and millimetres.
///
/// # Errors
///
/// Returns [`SignalError::Platform`] if the X11 display cannot be opened or
/// if `DISPLAY` is not set.
fn query_default_screen() -> Result<PhysicalDisplay, SignalError> {
    use x11::xlib;

    // SAFETY: a null display name makes Xlib read $DISPLAY.  The returned
    // pointer must be freed by XCloseDisplay.
    let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };

    if display.is_null() {
        let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
        return Err(SignalError::Platform(format!(
            "XOpenDisplay failed; DISPLAY={display_env}"
        )));
    }

    // SAFETY: `display` is a valid non-null pointer returned by XOpenDisplay
    // and `screen` is its default screen number.
    let physical = unsafe {
        let screen = xlib::XDefaultScreen(display);
        PhysicalDisplay {
            width_px: xlib::XDisplayWidth(display, screen).max(0) as u32,
            height_px: xlib::XDisplayHeight(display, screen).max(0) as u32,
            width_mm: xlib::XDisplayWidthMM(display, screen) as f32,
            height_mm: xlib::XDisplayHeightMM(display, screen) as f32,
        }
    };

    // SAFETY: `display` was successfully opened above and is not used after this.
    unsafe { xlib::XCloseDisplay(display) };

    if physical.width_px == 0 || physical.height_px == 0 {
        return Err(SignalError::Platform(
            "X11 reported a zero-sized screen".to_string(),
        ));
    }

    Ok(physical)
}

/// Collects identification strings; unreadable entries become empty.
fn read_identity() -> PlatformIdentity {
    let dmi = Path::new(DMI_DIR);
    let os_release = std::fs::read_to_string(OS_RELEASE_PATH).unwrap_or_default();
    let kernel = std::fs::read_to_string(KERNEL_RELEASE_PATH).unwrap_or_default();

    PlatformIdentity {
        manufacturer: read_trimmed(&dmi.join("sys_vendor")),
        model: read_trimmed(&dmi.join("product_name")),
        brand: read_trimmed(&dmi.join("board_vendor")),
        board: read_trimmed(&dmi.join("board_name")),
        os_release: parse_os_release_version(&os_release).unwrap_or_default(),
        os_api_level: parse_kernel_major(&kernel).unwrap_or(0),
    }
}

fn read_trimmed(path: &Path) -> String {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Extracts `VERSION_ID` (falling back to `BUILD_ID`) from os-release text.
fn parse_os_release_version(content: &str) -> Option<String> {
    let lookup = |key: &str| {
        content.lines().find_map(|line| {
            let (k, v) = line.split_once('=')?;
            (k.trim() == key).then(|| v.trim().trim_matches('"').to_string())
        })
    };
    lookup("VERSION_ID").or_else(|| lookup("BUILD_ID"))
}

/// Major number of a kernel release such as `"6.8.0-45-generic"`.
fn parse_kernel_major(release: &str) -> Option<u32> {
    release.trim().split('.').next()?.parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
