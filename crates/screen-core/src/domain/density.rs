//! Density qualifiers: the coarse buckets used to pick density-specific
//! resources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Density in DPI that maps to a scale of exactly 1.0.
pub const BASELINE_DPI: u32 = 160;

/// A named density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityQualifier {
    Ldpi,
    Mdpi,
    Tvdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl DensityQualifier {
    /// Every bucket, ascending by DPI.
    pub const ALL: [DensityQualifier; 7] = [
        DensityQualifier::Ldpi,
        DensityQualifier::Mdpi,
        DensityQualifier::Tvdpi,
        DensityQualifier::Hdpi,
        DensityQualifier::Xhdpi,
        DensityQualifier::Xxhdpi,
        DensityQualifier::Xxxhdpi,
    ];

    /// Nominal DPI of the bucket.
    pub const fn dpi(self) -> u32 {
        match self {
            DensityQualifier::Ldpi => 120,
            DensityQualifier::Mdpi => 160,
            DensityQualifier::Tvdpi => 213,
            DensityQualifier::Hdpi => 240,
            DensityQualifier::Xhdpi => 320,
            DensityQualifier::Xxhdpi => 480,
            DensityQualifier::Xxxhdpi => 640,
        }
    }

    /// Resource qualifier name, e.g. `"xxhdpi"`.
    pub const fn name(self) -> &'static str {
        match self {
            DensityQualifier::Ldpi => "ldpi",
            DensityQualifier::Mdpi => "mdpi",
            DensityQualifier::Tvdpi => "tvdpi",
            DensityQualifier::Hdpi => "hdpi",
            DensityQualifier::Xhdpi => "xhdpi",
            DensityQualifier::Xxhdpi => "xxhdpi",
            DensityQualifier::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Scale factor relative to [`BASELINE_DPI`].
    pub fn scale(self) -> f32 {
        self.dpi() as f32 / BASELINE_DPI as f32
    }

    /// Closest bucket to `density_dpi`.  Ties go to the denser bucket.
    pub fn from_dpi(density_dpi: u32) -> Self {
        let mut best = DensityQualifier::Ldpi;
        let mut best_distance = u32::MAX;
        for bucket in Self::ALL {
            let distance = bucket.dpi().abs_diff(density_dpi);
            if distance <= best_distance {
                best = bucket;
                best_distance = distance;
            }
        }
        best
    }
}

impl fmt::Display for DensityQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Density bucket for a scale factor (`density_dpi = 160 * scale`).
pub fn density_dpi_for_scale(scale: f32) -> u32 {
    (BASELINE_DPI as f32 * scale).round().max(0.0) as u32
}
