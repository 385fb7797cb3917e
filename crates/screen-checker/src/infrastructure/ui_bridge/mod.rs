//! Command bridge between the front end and the application layer.
//!
//! Each command recomputes the profile from the injected source, runs one
//! use case, and wraps the outcome in a [`CommandResult`] envelope:
//!
//! ```json
//! { "success": true,  "data": {...}, "error": null  }
//! { "success": false, "data": null,  "error": "..."  }
//! ```
//!
//! `--json` prints these envelopes verbatim, so scripts use one
//! error-handling pattern for every command.

use serde::{Deserialize, Serialize};
use tracing::warn;

use screen_core::DisplayReport;

use crate::application::collect_profile::{collect_profile, DisplaySignalSource, ResourceLookup};
use crate::application::present_profile::{ClipboardSink, ProfileView};

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// Row that was copied by [`copy_row`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedRowDto {
    /// 1-based row number, as shown on screen.
    pub row: usize,
    pub label: String,
    /// Text placed on the clipboard.
    pub value: String,
}

/// Unified response wrapper for commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    /// `true` if the command completed successfully; `false` on error.
    pub success: bool,
    /// The command's return value, present only when `success` is `true`.
    pub data: Option<T>,
    /// A human-readable error message, present only when `success` is `false`.
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    /// Constructs a successful result containing `data`.
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// Constructs an error result containing the given message.
    pub fn err(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the full display report for the current signals.
pub fn get_report(
    source: &dyn DisplaySignalSource,
    resources: &dyn ResourceLookup,
) -> CommandResult<DisplayReport> {
    match collect_profile(source, resources) {
        Ok(collected) => CommandResult::ok(collected.into_report()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Copies the value of row `row` (1-based) to `sink`.
///
/// The profile is recomputed first so the copied value matches what a fresh
/// render would show.
pub fn copy_row(
    source: &dyn DisplaySignalSource,
    resources: &dyn ResourceLookup,
    row: usize,
    sink: &dyn ClipboardSink,
) -> CommandResult<CopiedRowDto> {
    let Some(index) = row.checked_sub(1) else {
        return CommandResult::err("row numbers start at 1");
    };

    let collected = match collect_profile(source, resources) {
        Ok(collected) => collected,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    let view = ProfileView::new(&collected.profile);
    match view.handle_row_tapped(index, sink) {
        Ok(tapped) => CommandResult::ok(CopiedRowDto {
            row,
            label: tapped.label.clone(),
            value: tapped.copy_value.clone(),
        }),
        Err(e) => {
            warn!(row, error = %e, "copy request failed");
            CommandResult::err(e.to_string())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::application::collect_profile::SignalError;
    use crate::application::present_profile::ClipboardError;
    use crate::infrastructure::clipboard::MemoryClipboard;
    use crate::infrastructure::display_signals::MockDisplaySource;
    use crate::infrastructure::storage::config::ResourcesConfig;

    struct FailingSource;

    impl DisplaySignalSource for FailingSource {
        fn read_signals(&self) -> Result<screen_core::RawDisplaySignals, SignalError> {
            Err(SignalError::Platform("no display".to_string()))
        }
    }

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Failed {
                command: "xclip".to_string(),
                status: "exit status: 1".to_string(),
            })
        }
    }

    fn resources(bucket: Option<u32>) -> ResourcesConfig {
        let mut map = BTreeMap::new();
        if let Some(bucket) = bucket {
            map.insert("values_dimens".to_string(), bucket);
        }
        ResourcesConfig(map)
    }

    #[test]
    fn test_get_report_succeeds_for_mock_phone() {
        // Arrange
        let source = MockDisplaySource::phone();

        // Act
        let result = get_report(&source, &resources(None));

        // Assert
        assert!(result.success);
        let report = result.data.unwrap();
        assert_eq!(report.profile.device_label, "Google Pixel 6");
        assert_eq!(report.rows.len(), screen_core::ROW_COUNT);
    }

    #[test]
    fn test_get_report_applies_bucket_resource() {
        let source = MockDisplaySource::phone();

        let result = get_report(&source, &resources(Some(360)));

        assert_eq!(result.data.unwrap().profile.density_bucket_label, "360");
    }

    #[test]
    fn test_get_report_wraps_source_failure() {
        let result = get_report(&FailingSource, &resources(None));

        assert!(!result.success);
        assert!(result.error.unwrap().contains("no display"));
    }

    #[test]
    fn test_copy_row_copies_raw_value_of_numbered_row() {
        // Arrange
        let source = MockDisplaySource::phone();
        let clipboard = MemoryClipboard::new();

        // Act
        let result = copy_row(&source, &resources(None), 4, &clipboard);

        // Assert
        assert!(result.success, "error: {:?}", result.error);
        let copied = result.data.unwrap();
        assert_eq!(copied.label, format!("Size px - {}", copied.value));
        assert_eq!(clipboard.last(), Some(copied.value));
    }

    #[test]
    fn test_copy_row_zero_is_rejected_without_copying() {
        let clipboard = MemoryClipboard::new();

        let result = copy_row(&MockDisplaySource::phone(), &resources(None), 0, &clipboard);

        assert!(!result.success);
        assert_eq!(clipboard.last(), None);
    }

    #[test]
    fn test_copy_row_past_end_is_rejected() {
        let clipboard = MemoryClipboard::new();

        let result = copy_row(&MockDisplaySource::phone(), &resources(None), 8, &clipboard);

        assert!(!result.success);
        assert!(result.error.unwrap().contains("out of range"));
    }

    #[test]
    fn test_copy_row_reports_clipboard_failure() {
        let result = copy_row(&MockDisplaySource::phone(), &resources(None), 1, &BrokenClipboard);

        assert!(!result.success);
        assert!(result.error.unwrap().contains("xclip"));
    }

    #[test]
    fn test_command_result_ok_sets_success_true() {
        let r: CommandResult<u32> = CommandResult::ok(99);
        assert!(r.success);
        assert_eq!(r.data.unwrap(), 99);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_command_result_err_serializes_null_data() {
        let r: CommandResult<u32> = CommandResult::err("oops");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"], "oops");
    }
}
