//! Domain entities for Screen Checker.
//!
//! Pure logic with no OS, terminal, or clipboard dependencies.  Everything
//! here compiles and tests on any platform without a display attached.
//!
//! - **`metrics`** – the calculator: device label, GCD aspect reduction,
//!   diagonal inches with half-up formatting, dp/px conversions.
//! - **`profile`** – [`profile::RawDisplaySignals`] in,
//!   [`profile::DeviceDisplayProfile`] out.
//! - **`rows`** – the ordered `{label, copy_value}` rows rendered on screen.
//! - **`density`** – named density buckets (`mdpi`, `xxhdpi`, ...).

pub mod density;
pub mod metrics;
pub mod profile;
pub mod rows;
