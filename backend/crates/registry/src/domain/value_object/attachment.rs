//! Attachment References
//!
//! Photos and ID proofs are stored elsewhere; a registration only records
//! where its files live. Paths are derived from the registration number so
//! they are stable and collision-free:
//!
//! | File | Path |
//! |------|------|
//! | elder photo | `elders/photos/elder_<N>.<ext>` |
//! | elder ID proof | `elders/id_proofs/elder_id_<N>.<ext>` |
//! | volunteer photo | `volunteers/profile_photos/volunteer_<N>.<ext>` |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::registration_number::RegistrationNumber;

/// Extension used when the uploaded filename has none.
pub const FALLBACK_EXTENSION: &str = "bin";

const MAX_EXTENSION_LEN: usize = 10;

/// Which slot an attachment fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    ElderPhoto,
    ElderIdProof,
    VolunteerPhoto,
}

impl AttachmentSlot {
    const fn directory(&self) -> &'static str {
        match self {
            Self::ElderPhoto => "elders/photos",
            Self::ElderIdProof => "elders/id_proofs",
            Self::VolunteerPhoto => "volunteers/profile_photos",
        }
    }

    const fn stem(&self) -> &'static str {
        match self {
            Self::ElderPhoto => "elder_",
            Self::ElderIdProof => "elder_id_",
            Self::VolunteerPhoto => "volunteer_",
        }
    }
}

/// Storage path of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    /// Path for `original_filename` uploaded into `slot` by registration `number`.
    pub fn for_upload(
        slot: AttachmentSlot,
        number: &RegistrationNumber,
        original_filename: &str,
    ) -> Self {
        Self(format!(
            "{}/{}{}.{}",
            slot.directory(),
            slot.stem(),
            number,
            extension_of(original_filename)
        ))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercased text after the last dot of the final path component.
fn extension_of(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => FALLBACK_EXTENSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::registration_number::{RegistrationKind, allocate};

    #[test]
    fn test_elder_paths() {
        let number = allocate(RegistrationKind::Elder, 2025, 6);
        assert_eq!(
            AttachmentRef::for_upload(AttachmentSlot::ElderPhoto, &number, "Grandpa.JPG").as_str(),
            "elders/photos/elder_VK2025-0007.jpg"
        );
        assert_eq!(
            AttachmentRef::for_upload(AttachmentSlot::ElderIdProof, &number, "aadhar.pdf").as_str(),
            "elders/id_proofs/elder_id_VK2025-0007.pdf"
        );
    }

    #[test]
    fn test_volunteer_path() {
        let number = allocate(RegistrationKind::Volunteer, 2025, 0);
        assert_eq!(
            AttachmentRef::for_upload(AttachmentSlot::VolunteerPhoto, &number, "me.png").as_str(),
            "volunteers/profile_photos/volunteer_VL2025-0001.png"
        );
    }

    #[test]
    fn test_extension_fallbacks() {
        assert_eq!(extension_of("scan"), "bin");
        assert_eq!(extension_of(".bashrc"), "bin");
        assert_eq!(extension_of("photo."), "bin");
        assert_eq!(extension_of("../../etc/passwd"), "bin");
        assert_eq!(extension_of("C:\\Users\\x\\card.JpEg"), "jpeg");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("weird.p h p"), "bin");
    }
}
