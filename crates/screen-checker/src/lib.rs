//! screen-checker library entry point.
//!
//! Re-exports all public modules so that tests and the binary entry point in
//! `main.rs` share the same module tree.
//!
//! # What does screen-checker do?
//!
//! It shows the characteristics of the screen it runs on and lets the user
//! copy any single value:
//!
//! 1. A display source reads the raw signals: pixel size, physical size,
//!    density scale and the device identification strings.
//! 2. `screen_core` turns them into a `DeviceDisplayProfile`.
//! 3. The terminal surface renders the seven profile rows, numbered.
//! 4. Choosing a row number copies that row's value, without its label
//!    prefix, through the clipboard sink.
//!
//! The profile is recomputed on every render pass; nothing is cached.

/// Application layer: use cases.
pub mod application;

/// Infrastructure layer: OS adapters, configuration, and command bridge.
pub mod infrastructure;
