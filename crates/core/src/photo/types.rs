//! Photo categories and upload validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PhotoError;

/// Extensions accepted on upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Entity kinds that carry a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoCategory {
    /// Patient records.
    Patients,
    /// Doctor records.
    Doctors,
}

impl PhotoCategory {
    /// First segment of the object key.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Patients => "patients",
            Self::Doctors => "doctors",
        }
    }

    /// Message returned when the entity does not exist.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Patients => "Patient not found",
            Self::Doctors => "Doctor not found",
        }
    }
}

impl fmt::Display for PhotoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Lowercased extension of `filename`: the text after the last `.`.
#[must_use]
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Reject filenames whose extension is not an accepted image type.
///
/// # Errors
///
/// Returns [`PhotoError::InvalidExtension`].
pub fn validate_extension(filename: &str) -> Result<(), PhotoError> {
    match file_extension(filename) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(PhotoError::InvalidExtension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("face.png", true)]
    #[case("face.JPG", true)]
    #[case("scan.final.jpeg", true)]
    #[case("x.WebP", true)]
    #[case("face.gif", false)]
    #[case("face.png.exe", false)]
    #[case("png", false)]
    #[case("face.", false)]
    #[case("", false)]
    fn test_validate_extension(#[case] filename: &str, #[case] ok: bool) {
        assert_eq!(validate_extension(filename).is_ok(), ok);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(PhotoCategory::Patients.prefix(), "patients");
        assert_eq!(PhotoCategory::Doctors.to_string(), "doctors");
        assert_eq!(PhotoCategory::Doctors.not_found_message(), "Doctor not found");
    }
}
