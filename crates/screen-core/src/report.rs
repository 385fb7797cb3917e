//! Serializable report combining the profile with the raw identity strings
//! and the derived density bucket.

use serde::{Deserialize, Serialize};

use crate::domain::density::DensityQualifier;
use crate::domain::profile::{DeviceDisplayProfile, RawDisplaySignals};
use crate::domain::rows::{profile_rows, ProfileRow};

/// Device identification strings exactly as the display source reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub manufacturer: String,
    pub model: String,
    pub brand: String,
    pub board: String,
}

/// Everything the screen knows about the display, in one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayReport {
    pub identity: DeviceIdentity,
    pub profile: DeviceDisplayProfile,
    pub density_qualifier: DensityQualifier,
    pub density_scale: f32,
    pub rows: Vec<ProfileRow>,
}

impl DisplayReport {
    /// Builds a report for a profile assembled from `signals`.
    pub fn new(signals: &RawDisplaySignals, profile: DeviceDisplayProfile) -> Self {
        Self {
            identity: DeviceIdentity {
                manufacturer: signals.manufacturer.clone(),
                model: signals.model.clone(),
                brand: signals.brand.clone(),
                board: signals.board.clone(),
            },
            density_qualifier: DensityQualifier::from_dpi(profile.density_dpi),
            density_scale: signals.density,
            rows: profile_rows(&profile),
            profile,
        }
    }
}
