//! # screen-core
//!
//! Platform-free core of Screen Checker: the display metrics calculator, the
//! profile record it produces, and the row model the display surface renders.
//!
//! This crate performs no I/O.  Display sources, the clipboard, and the
//! terminal live in the `screen-checker` application crate and are injected
//! from there.
//!
//! # Data flow
//!
//! ```text
//! RawDisplaySignals ──assemble_profile──> DeviceDisplayProfile ──profile_rows──> [ProfileRow; 7]
//! ```
//!
//! The profile is recomputed from scratch on every render; nothing is cached.

pub mod domain;
pub mod report;

pub use domain::density::DensityQualifier;
pub use domain::metrics::{
    capitalize, compute_aspect_reduction, compute_diagonal_inches, derive_device_label,
    dp_to_px, format_half_up, gcd, px_to_dp, AspectRatio, Axis, MetricsError,
};
pub use domain::profile::{assemble_profile, DeviceDisplayProfile, RawDisplaySignals};
pub use domain::rows::{profile_rows, ProfileRow, ROW_COUNT};
pub use report::{DeviceIdentity, DisplayReport};
