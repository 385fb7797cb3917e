//! Collecting a fresh profile from an injected display source.
//!
//! Called once per render pass.  Nothing is cached between calls: if the
//! source reports different signals (new scale, rotated display) the next
//! profile reflects them.

use screen_core::{
    assemble_profile, DeviceDisplayProfile, DisplayReport, MetricsError, RawDisplaySignals,
};
use thiserror::Error;
use tracing::debug;

/// Name of the integer resource holding the smallest-width bucket.
pub const SMALLEST_WIDTH_RESOURCE: &str = "values_dimens";

/// Error type for display signal sources.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The platform API used to read the display failed.
    #[error("platform API error while reading display signals: {0}")]
    Platform(String),
}

/// Errors from [`collect_profile`].
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Signals(#[from] SignalError),

    #[error("display metrics rejected: {0}")]
    Metrics(#[from] MetricsError),
}

/// Supplies the raw display signals for one render pass.
pub trait DisplaySignalSource {
    /// Reads the current signals.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Platform`] if the OS cannot be queried.
    fn read_signals(&self) -> Result<RawDisplaySignals, SignalError>;
}

/// Named integer resources, resolved by the host.
pub trait ResourceLookup {
    /// Returns the integer stored under `name`, if any.
    fn integer(&self, name: &str) -> Option<u32>;
}

/// Signals and the profile assembled from them.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedProfile {
    pub signals: RawDisplaySignals,
    pub profile: DeviceDisplayProfile,
}

impl CollectedProfile {
    /// Converts into the serializable report.
    pub fn into_report(self) -> DisplayReport {
        DisplayReport::new(&self.signals, self.profile)
    }
}

/// Reads signals from `source`, resolves the smallest-width bucket from
/// `resources`, and assembles the profile.
///
/// When the resource is absent the bucket reported by the source is kept.
///
/// # Errors
///
/// Returns [`CollectError::Signals`] if the source fails and
/// [`CollectError::Metrics`] if the signals cannot be turned into a profile.
pub fn collect_profile(
    source: &dyn DisplaySignalSource,
    resources: &dyn ResourceLookup,
) -> Result<CollectedProfile, CollectError> {
    let mut signals = source.read_signals()?;
    if let Some(bucket) = resources.integer(SMALLEST_WIDTH_RESOURCE) {
        signals.smallest_width_bucket = bucket;
    }
    debug!(?signals, "read display signals");

    let profile = assemble_profile(&signals)?;
    Ok(CollectedProfile { signals, profile })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;

    struct FixedSource {
        signals: RawDisplaySignals,
        reads: Cell<u32>,
    }

    impl DisplaySignalSource for FixedSource {
        fn read_signals(&self) -> Result<RawDisplaySignals, SignalError> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.signals.clone())
        }
    }

    struct FailingSource;

    impl DisplaySignalSource for FailingSource {
        fn read_signals(&self) -> Result<RawDisplaySignals, SignalError> {
            Err(SignalError::Platform("no display".to_string()))
        }
    }

    impl ResourceLookup for HashMap<&'static str, u32> {
        fn integer(&self, name: &str) -> Option<u32> {
            self.get(name).copied()
        }
    }

    fn laptop() -> RawDisplaySignals {
        RawDisplaySignals {
            manufacturer: "LENOVO".to_string(),
            model: "21CB".to_string(),
            brand: "LENOVO".to_string(),
            board: "21CBCTO1WW".to_string(),
            os_release: "24.04".to_string(),
            os_api_level: 6,
            width_dp: 1536,
            height_dp: 960,
            density_dpi: 200,
            density: 1.25,
            width_px: 1920,
            height_px: 1200,
            xdpi: 161.0,
            ydpi: 161.0,
            smallest_width_bucket: 960,
        }
    }

    fn source() -> FixedSource {
        FixedSource { signals: laptop(), reads: Cell::new(0) }
    }

    #[test]
    fn test_collect_profile_overrides_bucket_from_resource() {
        // Arrange
        let resources: HashMap<&'static str, u32> = HashMap::from([(SMALLEST_WIDTH_RESOURCE, 720)]);

        // Act
        let collected = collect_profile(&source(), &resources).expect("collect");

        // Assert
        assert_eq!(collected.signals.smallest_width_bucket, 720);
        assert_eq!(collected.profile.density_bucket_label, "720");
    }

    #[test]
    fn test_collect_profile_keeps_source_bucket_without_resource() {
        let resources: HashMap<&'static str, u32> = HashMap::new();

        let collected = collect_profile(&source(), &resources).expect("collect");

        assert_eq!(collected.profile.density_bucket_label, "960");
        assert_eq!(collected.profile.device_label, "LENOVO 21CB");
    }

    #[test]
    fn test_collect_profile_reads_source_on_every_call() {
        let source = source();
        let resources: HashMap<&'static str, u32> = HashMap::new();

        let first = collect_profile(&source, &resources).expect("first");
        let second = collect_profile(&source, &resources).expect("second");

        assert_eq!(source.reads.get(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_collect_profile_propagates_source_failure() {
        let resources: HashMap<&'static str, u32> = HashMap::new();

        let result = collect_profile(&FailingSource, &resources);

        assert!(matches!(result, Err(CollectError::Signals(SignalError::Platform(_)))));
    }

    #[test]
    fn test_collect_profile_rejects_zero_dpi() {
        let mut signals = laptop();
        signals.xdpi = 0.0;
        let source = FixedSource { signals, reads: Cell::new(0) };
        let resources: HashMap<&'static str, u32> = HashMap::new();

        let result = collect_profile(&source, &resources);

        assert!(matches!(result, Err(CollectError::Metrics(MetricsError::InvalidDpi { .. }))));
    }

    #[test]
    fn test_into_report_carries_rows() {
        let resources: HashMap<&'static str, u32> = HashMap::new();
        let report = collect_profile(&source(), &resources).expect("collect").into_report();
        assert_eq!(report.rows[5].copy_value, "200");
    }
}
