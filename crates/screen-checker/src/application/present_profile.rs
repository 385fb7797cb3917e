//! Presenting the profile: the render model, the capabilities the screen
//! needs, and the single row-tap handler.
//!
//! The OS-facing pieces (terminal, clipboard tool, alternate screen) are
//! injected as trait objects implemented in the infrastructure layer, so this
//! use case never touches global state.
//!
//! # Flow
//!
//! ```text
//! DeviceDisplayProfile ─> ProfileView ─> DisplaySurface::render
//!                                    └─> handle_row_tapped(i) ─> ClipboardSink::set_text
//! ```

use screen_core::{profile_rows, DeviceDisplayProfile, ProfileRow};
use thiserror::Error;
use tracing::{info, warn};

/// Error returned by a [`ClipboardSink`].
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The copy tool could not be started or written to.
    #[error("clipboard tool `{command}` unavailable: {source}")]
    Unavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The copy tool ran but reported failure.
    #[error("clipboard tool `{command}` exited with {status}")]
    Failed { command: String, status: String },
}

/// Errors produced while presenting the profile.
#[derive(Debug, Error)]
pub enum PresentError {
    /// A tap referenced a row that does not exist.
    #[error("row {index} out of range (screen has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// The clipboard rejected the copy request.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// Writing to the display surface failed.
    #[error("display surface error: {0}")]
    Surface(#[from] std::io::Error),
}

/// Receives "copy plain text" requests.
///
/// Requests are independent: no ordering or acknowledgement is implied
/// between two calls.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink {
    /// Places `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the platform clipboard cannot be reached.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Hides and restores the surrounding system chrome.
pub trait ImmersiveModeController {
    /// Hides status/navigation chrome so the profile fills the surface.
    fn hide_system_chrome(&mut self) -> std::io::Result<()>;

    /// Restores whatever [`hide_system_chrome`](Self::hide_system_chrome) hid.
    fn restore_system_chrome(&mut self) -> std::io::Result<()>;
}

/// Controller for surfaces without chrome to hide.
#[derive(Debug, Default)]
pub struct NoImmersiveMode;

impl ImmersiveModeController for NoImmersiveMode {
    fn hide_system_chrome(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn restore_system_chrome(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Something that can draw a [`ProfileView`].
pub trait DisplaySurface {
    /// Draws every row of `view`, in order.
    fn render(&mut self, view: &ProfileView) -> std::io::Result<()>;
}

/// Immutable render model for one pass: the ordered rows of one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    rows: Vec<ProfileRow>,
}

impl ProfileView {
    /// Builds the view for `profile`.
    pub fn new(profile: &DeviceDisplayProfile) -> Self {
        Self {
            rows: profile_rows(profile),
        }
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    /// Handles activation of the row at `index` (zero-based).
    ///
    /// Issues exactly one copy request carrying the row's raw value, never
    /// its display prefix.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::RowOutOfRange`] for an unknown index and
    /// [`PresentError::Clipboard`] if the sink fails.
    pub fn handle_row_tapped(
        &self,
        index: usize,
        sink: &dyn ClipboardSink,
    ) -> Result<&ProfileRow, PresentError> {
        let row = self.rows.get(index).ok_or(PresentError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })?;
        sink.set_text(&row.copy_value)?;
        info!(row = index, value = %row.copy_value, "copied row value");
        Ok(row)
    }
}

/// What one line of interactive input asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// `q`, `quit`: end the session.
    Quit,
    /// Empty line or `r`: redraw with a fresh profile.
    Refresh,
    /// A row was copied; carries the copied value.
    Copied(String),
    /// The tap was valid input but the copy did not happen.
    CopyFailed(String),
    /// Neither a command nor a row number (row numbers start at 1).
    Invalid(String),
}

impl InputOutcome {
    /// Status line to show under the next render, if any.
    pub fn status(&self) -> Option<String> {
        match self {
            InputOutcome::Quit | InputOutcome::Refresh => None,
            InputOutcome::Copied(value) => Some(format!("Copied: {value}")),
            InputOutcome::CopyFailed(reason) => Some(format!("Copy failed: {reason}")),
            InputOutcome::Invalid(input) => Some(format!("Not a row number: {input}")),
        }
    }
}

/// Interprets one line typed by the user against `view`.
///
/// A 1-based row number taps that row.  Copy failures are logged and
/// reported as [`InputOutcome::CopyFailed`]; they never end the session.
pub fn handle_input(view: &ProfileView, input: &str, sink: &dyn ClipboardSink) -> InputOutcome {
    let input = input.trim();
    match input {
        "q" | "quit" => InputOutcome::Quit,
        "" | "r" => InputOutcome::Refresh,
        _ => match input.parse::<usize>() {
            Ok(row) if row >= 1 => match view.handle_row_tapped(row - 1, sink) {
                Ok(tapped) => InputOutcome::Copied(tapped.copy_value.clone()),
                Err(e) => {
                    warn!(row, error = %e, "copy request failed");
                    InputOutcome::CopyFailed(e.to_string())
                }
            },
            _ => InputOutcome::Invalid(input.to_string()),
        },
    }
}

/// Renders `view` on `surface` with the system chrome hidden.
///
/// The chrome is restored before returning only when `keep_immersive` is
/// `false`; interactive sessions keep it hidden until they finish.
///
/// # Errors
///
/// Returns [`PresentError::Surface`] if hiding the chrome or drawing fails.
pub fn present(
    view: &ProfileView,
    surface: &mut dyn DisplaySurface,
    immersive: &mut dyn ImmersiveModeController,
    keep_immersive: bool,
) -> Result<(), PresentError> {
    immersive.hide_system_chrome()?;
    let rendered = surface.render(view);
    if !keep_immersive || rendered.is_err() {
        immersive.restore_system_chrome()?;
    }
    rendered?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use screen_core::{assemble_profile, RawDisplaySignals};

    fn make_view() -> ProfileView {
        let signals = RawDisplaySignals {
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
            smallest_width_bucket: 410,
        };
        ProfileView::new(&assemble_profile(&signals).expect("assemble"))
    }

    #[derive(Default)]
    struct RecordingSurface {
        rendered: Vec<Vec<ProfileRow>>,
        fail: bool,
    }

    impl DisplaySurface for RecordingSurface {
        fn render(&mut self, view: &ProfileView) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.rendered.push(view.rows().to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingImmersive {
        hidden: u32,
        restored: u32,
    }

    impl ImmersiveModeController for CountingImmersive {
        fn hide_system_chrome(&mut self) -> std::io::Result<()> {
            self.hidden += 1;
            Ok(())
        }

        fn restore_system_chrome(&mut self) -> std::io::Result<()> {
            self.restored += 1;
            Ok(())
        }
    }

    #[test]
    fn test_tap_copies_raw_value_without_prefix() {
        // Arrange
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text()
            .with(eq("13 (33)"))
            .times(1)
            .returning(|_| Ok(()));

        // Act
        let row = view.handle_row_tapped(1, &sink).expect("tap");

        // Assert
        assert_eq!(row.label, "Version - 13 (33)");
    }

    #[test]
    fn test_each_row_is_independently_copyable() {
        // Arrange
        let view = make_view();
        let expected: Vec<String> = view.rows().iter().map(|r| r.copy_value.clone()).collect();

        // Act / Assert: tap rows in reverse; each issues exactly one request.
        for index in (0..view.rows().len()).rev() {
            let mut sink = MockClipboardSink::new();
            sink.expect_set_text()
                .with(eq(expected[index].clone()))
                .times(1)
                .returning(|_| Ok(()));
            view.handle_row_tapped(index, &sink).expect("tap");
        }
    }

    #[test]
    fn test_tap_out_of_range_does_not_touch_clipboard() {
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text().never();

        let result = view.handle_row_tapped(7, &sink);

        assert!(matches!(
            result,
            Err(PresentError::RowOutOfRange { index: 7, len: 7 })
        ));
    }

    #[test]
    fn test_tap_propagates_clipboard_failure() {
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text().returning(|_| {
            Err(ClipboardError::Failed {
                command: "xclip".to_string(),
                status: "exit status: 1".to_string(),
            })
        });

        let result = view.handle_row_tapped(0, &sink);

        assert!(matches!(result, Err(PresentError::Clipboard(_))));
    }

    #[test]
    fn test_input_row_one_copies_device_label() {
        // Arrange
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text()
            .with(eq("Google Pixel 6"))
            .times(1)
            .returning(|_| Ok(()));

        // Act
        let outcome = handle_input(&view, " 1 \n", &sink);

        // Assert
        assert_eq!(outcome, InputOutcome::Copied("Google Pixel 6".to_string()));
        assert_eq!(outcome.status().as_deref(), Some("Copied: Google Pixel 6"));
    }

    #[test]
    fn test_input_zero_and_words_never_touch_clipboard() {
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text().never();

        assert_eq!(handle_input(&view, "0", &sink), InputOutcome::Invalid("0".to_string()));
        assert_eq!(handle_input(&view, "two", &sink), InputOutcome::Invalid("two".to_string()));
        assert_eq!(handle_input(&view, "-1", &sink), InputOutcome::Invalid("-1".to_string()));
    }

    #[test]
    fn test_input_commands_quit_and_refresh() {
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text().never();

        assert_eq!(handle_input(&view, "q", &sink), InputOutcome::Quit);
        assert_eq!(handle_input(&view, "quit", &sink), InputOutcome::Quit);
        assert_eq!(handle_input(&view, "r", &sink), InputOutcome::Refresh);
        assert_eq!(handle_input(&view, "", &sink), InputOutcome::Refresh);
        assert_eq!(InputOutcome::Refresh.status(), None);
    }

    #[test]
    fn test_input_failing_clipboard_keeps_session_running() {
        // Arrange
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text().times(1).returning(|_| {
            Err(ClipboardError::Failed {
                command: "xclip".to_string(),
                status: "exit status: 1".to_string(),
            })
        });

        // Act
        let outcome = handle_input(&view, "3", &sink);

        // Assert
        assert!(matches!(outcome, InputOutcome::CopyFailed(ref reason) if reason.contains("xclip")));
        assert_ne!(outcome, InputOutcome::Quit);
    }

    #[test]
    fn test_input_row_past_end_reports_failure() {
        let view = make_view();
        let mut sink = MockClipboardSink::new();
        sink.expect_set_text().never();

        let outcome = handle_input(&view, "8", &sink);

        assert!(matches!(outcome, InputOutcome::CopyFailed(ref reason) if reason.contains("out of range")));
    }

    #[test]
    fn test_present_hides_and_restores_chrome_for_one_shot_render() {
        let view = make_view();
        let mut surface = RecordingSurface::default();
        let mut immersive = CountingImmersive::default();

        present(&view, &mut surface, &mut immersive, false).expect("present");

        assert_eq!(surface.rendered.len(), 1);
        assert_eq!(immersive.hidden, 1);
        assert_eq!(immersive.restored, 1);
    }

    #[test]
    fn test_present_keeps_chrome_hidden_for_interactive_session() {
        let view = make_view();
        let mut surface = RecordingSurface::default();
        let mut immersive = CountingImmersive::default();

        present(&view, &mut surface, &mut immersive, true).expect("present");

        assert_eq!(immersive.hidden, 1);
        assert_eq!(immersive.restored, 0);
    }

    #[test]
    fn test_present_restores_chrome_when_render_fails() {
        let view = make_view();
        let mut surface = RecordingSurface { fail: true, ..Default::default() };
        let mut immersive = CountingImmersive::default();

        let result = present(&view, &mut surface, &mut immersive, true);

        assert!(matches!(result, Err(PresentError::Surface(_))));
        assert_eq!(immersive.restored, 1);
    }
}
