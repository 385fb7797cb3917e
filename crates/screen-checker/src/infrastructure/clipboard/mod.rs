//! Clipboard sinks.
//!
//! [`CommandClipboard`] pipes text into the platform's copy tool; the tool
//! is picked at compile time, and on Linux also by session type:
//!
//! | OS      | Tool                                         |
//! |---------|----------------------------------------------|
//! | Windows | `clip`                                       |
//! | macOS   | `pbcopy`                                     |
//! | Linux   | `wl-copy` under Wayland, otherwise `xclip`   |
//!
//! [`MemoryClipboard`] records requests in memory; tests and `--mock` runs
//! use it.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use tracing::debug;

use crate::application::present_profile::{ClipboardError, ClipboardSink};

/// Program and arguments used to place text on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CopyCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The copy tool for this platform.
    pub fn native() -> Self {
        #[cfg(target_os = "windows")]
        {
            Self::new("clip", &[])
        }

        #[cfg(target_os = "macos")]
        {
            Self::new("pbcopy", &[])
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            Self::for_unix_session(std::env::var_os("WAYLAND_DISPLAY").is_some())
        }
    }

    /// `wl-copy` for Wayland sessions, `xclip` for everything else.
    pub fn for_unix_session(wayland: bool) -> Self {
        if wayland {
            Self::new("wl-copy", &[])
        } else {
            Self::new("xclip", &["-selection", "clipboard"])
        }
    }
}

/// Clipboard sink that spawns an external copy tool per request.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    command: CopyCommand,
}

impl CommandClipboard {
    /// Uses [`CopyCommand::native`].
    pub fn new() -> Self {
        Self::with_command(CopyCommand::native())
    }

    /// Uses an explicit program and arguments instead of the native tool.
    pub fn with_command(command: CopyCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &CopyCommand {
        &self.command
    }
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for CommandClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let program = &self.command.program;
        let unavailable = |source| ClipboardError::Unavailable {
            command: program.clone(),
            source,
        };

        let mut child = Command::new(program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(unavailable)?;

        // Dropping stdin closes the pipe so the tool sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when the write failed.
        let status = child.wait().map_err(unavailable)?;
        if !status.success() {
            return Err(ClipboardError::Failed {
                command: program.clone(),
                status: status.to_string(),
            });
        }
        if let Err(e) = written {
            return Err(ClipboardError::Failed {
                command: program.clone(),
                status: format!("{status} before reading all input ({e})"),
            });
        }

        debug!(command = %program, bytes = text.len(), "clipboard updated");
        Ok(())
    }
}

/// Clipboard sink that keeps every copied string in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    /// Every text passed to `set_text`, oldest first.
    pub copied: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent copy, if any.
    pub fn last(&self) -> Option<String> {
        self.copied.lock().ok()?.last().cloned()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Ok(mut copied) = self.copied.lock() {
            copied.push(text.to_string());
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_in_order() {
        // Arrange
        let clipboard = MemoryClipboard::new();

        // Act
        clipboard.set_text("420").unwrap();
        clipboard.set_text("1080x2400").unwrap();

        // Assert
        assert_eq!(*clipboard.copied.lock().unwrap(), vec!["420", "1080x2400"]);
        assert_eq!(clipboard.last().as_deref(), Some("1080x2400"));
    }

    #[test]
    fn test_unix_session_picks_wl_copy_under_wayland() {
        assert_eq!(CopyCommand::for_unix_session(true).program, "wl-copy");
    }

    #[test]
    fn test_unix_session_picks_xclip_clipboard_selection_under_x11() {
        let command = CopyCommand::for_unix_session(false);
        assert_eq!(command.program, "xclip");
        assert_eq!(command.args, vec!["-selection", "clipboard"]);
    }

    #[test]
    fn test_command_clipboard_missing_tool_is_unavailable() {
        let clipboard = CommandClipboard::with_command(CopyCommand::new(
            "screen-checker-no-such-copy-tool",
            &[],
        ));

        let result = clipboard.set_text("x");

        assert!(matches!(result, Err(ClipboardError::Unavailable { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_clipboard_reports_tool_failure() {
        let clipboard = CommandClipboard::with_command(CopyCommand::new("false", &[]));

        let result = clipboard.set_text("x");

        // Reported from the exit status whether or not the write hit a closed pipe.
        assert!(
            matches!(result, Err(ClipboardError::Failed { ref command, .. }) if command == "false"),
            "got {result:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_command_clipboard_tool_exiting_before_reading_is_failed() {
        // Larger than any pipe buffer, so the write cannot finish unread.
        let text = "x".repeat(1 << 20);
        let clipboard = CommandClipboard::with_command(CopyCommand::new("true", &[]));

        let result = clipboard.set_text(&text);

        assert!(matches!(result, Err(ClipboardError::Failed { .. })), "got {result:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_clipboard_succeeds_when_tool_consumes_input() {
        let clipboard = CommandClipboard::with_command(CopyCommand::new("cat", &[]));
        assert!(clipboard.set_text("5.82").is_ok());
    }
}
