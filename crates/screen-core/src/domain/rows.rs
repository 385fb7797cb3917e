//! Row descriptors for the profile screen.
//!
//! Each row pairs the text shown to the user with the raw value that a tap
//! copies.  The display prefix (`"Dpi - "` etc.) never reaches the clipboard.

use serde::{Deserialize, Serialize};

use super::profile::DeviceDisplayProfile;

/// Number of copyable rows on the profile screen.
pub const ROW_COUNT: usize = 7;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Text shown on screen.
    pub label: String,
    /// Text copied when the row is activated.
    pub copy_value: String,
}

impl ProfileRow {
    fn new(label: String, copy_value: String) -> Self {
        Self { label, copy_value }
    }
}

/// Builds the ordered rows for `profile`.
pub fn profile_rows(profile: &DeviceDisplayProfile) -> Vec<ProfileRow> {
    let dpi = profile.density_dpi.to_string();
    vec![
        ProfileRow::new(profile.device_label.clone(), profile.device_label.clone()),
        ProfileRow::new(format!("Version - {}", profile.os_label), profile.os_label.clone()),
        ProfileRow::new(
            format!("Diagonal - {}", profile.diagonal_inches),
            profile.diagonal_inches.clone(),
        ),
        ProfileRow::new(format!("Size px - {}", profile.pixel_size), profile.pixel_size.clone()),
        ProfileRow::new(format!("Size dp - {}", profile.dp_size), profile.dp_size.clone()),
        ProfileRow::new(format!("Dpi - {dpi}"), dpi),
        ProfileRow::new(
            format!("Dimens - sw{}", profile.density_bucket_label),
            profile.density_bucket_label.clone(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{assemble_profile, fixtures::pixel_6};

    fn rows() -> Vec<ProfileRow> {
        profile_rows(&assemble_profile(&pixel_6()).expect("assemble"))
    }

    #[test]
    fn test_profile_rows_has_one_row_per_field() {
        assert_eq!(rows().len(), ROW_COUNT);
    }

    #[test]
    fn test_profile_rows_labels_carry_display_prefixes() {
        let labels: Vec<String> = rows().into_iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "Google Pixel 6",
                "Version - 13 (33)",
                "Diagonal - 6.4",
                "Size px - 1078x2399",
                "Size dp - 411x914",
                "Dpi - 420",
                "Dimens - sw410",
            ]
        );
    }

    #[test]
    fn test_profile_rows_copy_values_are_raw() {
        let values: Vec<String> = rows().into_iter().map(|r| r.copy_value).collect();
        assert_eq!(
            values,
            vec!["Google Pixel 6", "13 (33)", "6.4", "1078x2399", "411x914", "420", "410"]
        );
    }
}
