//! Infrastructure layer for the screen checker.
//!
//! Contains the OS-facing adapters behind the application-layer traits.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `screen_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`display_signals`** – OS-specific readers of the main display's pixel
//!   size, physical size and scale, plus device identification.  The correct
//!   implementation is selected at compile time using `#[cfg(target_os)]`.
//!   A `MockDisplaySource` is also provided for tests.
//!
//! - **`clipboard`** – `ClipboardSink` implementations: the platform copy
//!   tool and an in-memory recorder.
//!
//! - **`terminal`** – the terminal display surface and the alternate-screen
//!   immersive mode.
//!
//! - **`storage`** – TOML configuration file.
//!
//! - **`ui_bridge`** – command handlers returning the `CommandResult`
//!   envelope used by `--json` output.

pub mod clipboard;
pub mod display_signals;
pub mod storage;
pub mod terminal;
pub mod ui_bridge;
