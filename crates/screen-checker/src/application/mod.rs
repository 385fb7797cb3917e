//! Application layer use cases for Screen Checker.
//!
//! - **`collect_profile`** – Reads raw display signals from an injected
//!   [`collect_profile::DisplaySignalSource`], resolves the smallest-width
//!   resource, and assembles a fresh profile.  Runs on every render pass.
//!
//! - **`present_profile`** – Turns the profile into ordered rows, draws them
//!   on an injected surface with the system chrome hidden, and routes a row
//!   tap to the injected clipboard sink.

pub mod collect_profile;
pub mod present_profile;
