//! macOS display signals via Core Graphics (`CGDisplay`).
//!
//! The main display's backing pixels come from `pixels_wide`/`pixels_high`,
//! its size in points from `bounds`, and its physical size from
//! `CGDisplayScreenSize`.  The default scale is pixels per point (2.0 on
//! Retina panels).

use screen_core::RawDisplaySignals;
use tracing::debug;

use super::{signals_from_physical, PlatformIdentity, PhysicalDisplay, SourceOptions};
use crate::application::collect_profile::{DisplaySignalSource, SignalError};

/// macOS implementation of [`DisplaySignalSource`] via Core Graphics.
pub struct MacosDisplaySource {
    options: SourceOptions,
}

impl MacosDisplaySource {
    /// Creates a new `MacosDisplaySource`.
    pub fn new(options: SourceOptions) -> Self {
        Self { options }
    }
}

impl DisplaySignalSource for MacosDisplaySource {
    fn read_signals(&self) -> Result<RawDisplaySignals, SignalError> {
        use core_graphics::display::CGDisplay;

        let main = CGDisplay::main();
        let display = PhysicalDisplay {
            width_px: main.pixels_wide() as u32,
            height_px: main.pixels_high() as u32,
            width_mm: main.screen_size().width as f32,
            height_mm: main.screen_size().height as f32,
        };
        if display.width_px == 0 || display.height_px == 0 {
            return Err(SignalError::Platform(
                "CGDisplay::main reported a zero-sized display".to_string(),
            ));
        }

        let points_wide = main.bounds().size.width;
        let backing_scale = if points_wide > 0.0 {
            (display.width_px as f64 / points_wide) as f32
        } else {
            1.0
        };

        let mut identity = PlatformIdentity {
            manufacturer: "Apple".to_string(),
            model: std::env::var("HOSTNAME").unwrap_or_default(),
            brand: "Apple".to_string(),
            board: std::env::consts::ARCH.to_string(),
            os_release: String::new(),
            os_api_level: 0,
        };
        self.options.overrides.apply(&mut identity);

        let scale = self.options.scale.unwrap_or(backing_scale);
        debug!(?display, backing_scale, scale, "queried main CGDisplay");
        Ok(signals_from_physical(display, scale, identity))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
