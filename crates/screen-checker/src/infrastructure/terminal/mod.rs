//! Terminal rendition of the display surface.
//!
//! [`TerminalSurface`] prints the profile rows numbered from 1 (the number is
//! what a user types to "tap" a row) followed by a static chart of the
//! density buckets.  [`TerminalImmersiveMode`] switches to the alternate
//! screen and hides the cursor so the profile fills the terminal.
//!
//! Both are generic over [`Write`] so tests can render into a `Vec<u8>`.

use std::io::Write;

use screen_core::DensityQualifier;

use crate::application::present_profile::{DisplaySurface, ImmersiveModeController, ProfileView};

/// Enter the alternate screen, hide the cursor.
const ENTER_IMMERSIVE: &str = "\x1b[?1049h\x1b[?25l";
/// Show the cursor, leave the alternate screen.
const LEAVE_IMMERSIVE: &str = "\x1b[?25h\x1b[?1049l";
/// Clear the screen and home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws a [`ProfileView`] as plain text lines.
pub struct TerminalSurface<W: Write> {
    out: W,
    /// Clear the screen before each render (interactive sessions).
    clear: bool,
    /// Highlighted bucket in the density chart, if known.
    current_dpi: Option<u32>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear: false,
            current_dpi: None,
        }
    }

    /// Clears the screen before every render.
    pub fn clearing(mut self) -> Self {
        self.clear = true;
        self
    }

    /// Marks the bucket nearest to `density_dpi` in the chart.
    pub fn set_current_dpi(&mut self, density_dpi: u32) {
        self.current_dpi = Some(density_dpi);
    }

    /// Writes a one-line status message under the profile.
    pub fn status(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_density_chart(&mut self) -> std::io::Result<()> {
        let current = self.current_dpi.map(DensityQualifier::from_dpi);
        writeln!(self.out)?;
        writeln!(self.out, "  bucket     dpi   scale")?;
        for qualifier in DensityQualifier::ALL {
            let marker = if Some(qualifier) == current { '>' } else { ' ' };
            writeln!(
                self.out,
                "{marker} {:<9} {:>4}   {:.2}x",
                qualifier.name(),
                qualifier.dpi(),
                qualifier.scale()
            )?;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn render(&mut self, view: &ProfileView) -> std::io::Result<()> {
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        for (index, row) in view.rows().iter().enumerate() {
            writeln!(self.out, "{:>2}. {}", index + 1, row.label)?;
        }
        self.render_density_chart()?;
        self.out.flush()
    }
}

/// Alternate-screen controller for ANSI terminals.
///
/// Restores the terminal on drop if [`hide_system_chrome`] was called
/// without a matching restore.
///
/// [`hide_system_chrome`]: ImmersiveModeController::hide_system_chrome
pub struct TerminalImmersiveMode<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalImmersiveMode<W> {
    pub fn new(out: W) -> Self {
        Self { out, active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<W: Write> ImmersiveModeController for TerminalImmersiveMode<W> {
    fn hide_system_chrome(&mut self) -> std::io::Result<()> {
        if !self.active {
            write!(self.out, "{ENTER_IMMERSIVE}")?;
            self.out.flush()?;
            self.active = true;
        }
        Ok(())
    }

    fn restore_system_chrome(&mut self) -> std::io::Result<()> {
        if self.active {
            write!(self.out, "{LEAVE_IMMERSIVE}")?;
            self.out.flush()?;
            self.active = false;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalImmersiveMode<W> {
    fn drop(&mut self) {
        let _ = self.restore_system_chrome();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
