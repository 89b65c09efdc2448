//! Field rules for submissions and status changes
//!
//! Client and store apply the same checks. Text lengths are measured in
//! characters after trimming surrounding whitespace.

use thiserror::Error;

/// Minimum address length
pub const MIN_ADDRESS_LEN: usize = 5;

/// Minimum comment length
pub const MIN_COMMENT_LEN: usize = 10;

/// Minimum rejection reason length
pub const MIN_REJECTION_REASON_LEN: usize = 10;

/// Maximum photo upload size (5 MiB)
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted photo file extensions
pub const ALLOWED_PHOTO_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// A broken field rule, with its user-facing message
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleViolation {
    #[error("The address must be at least 5 characters")]
    AddressTooShort,

    #[error("The comment must be at least 10 characters")]
    CommentTooShort,

    #[error("A photo is required")]
    MissingPhoto,

    #[error("The photo must not exceed 5MB ({size} bytes given)")]
    PhotoTooLarge { size: u64 },

    #[error("Unsupported photo type. Use JPG, PNG or WEBP")]
    UnsupportedPhotoType,

    #[error("The rejection reason must be at least 10 characters")]
    RejectionReasonTooShort,

    #[error("Invalid coordinates: {lat}, {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn check_address(address: &str) -> Result<(), RuleViolation> {
    if trimmed_len(address) < MIN_ADDRESS_LEN {
        return Err(RuleViolation::AddressTooShort);
    }
    Ok(())
}

pub fn check_comment(comment: &str) -> Result<(), RuleViolation> {
    if trimmed_len(comment) < MIN_COMMENT_LEN {
        return Err(RuleViolation::CommentTooShort);
    }
    Ok(())
}

pub fn check_photo_size(size: u64) -> Result<(), RuleViolation> {
    if size > MAX_PHOTO_BYTES {
        return Err(RuleViolation::PhotoTooLarge { size });
    }
    Ok(())
}

pub fn check_photo_extension(file_name: &str) -> Result<(), RuleViolation> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .ok_or(RuleViolation::UnsupportedPhotoType)?;

    if ALLOWED_PHOTO_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(RuleViolation::UnsupportedPhotoType)
    }
}

/// Absent reasons fail the same way as short ones.
pub fn check_rejection_reason(reason: Option<&str>) -> Result<(), RuleViolation> {
    match reason {
        Some(reason) if trimmed_len(reason) >= MIN_REJECTION_REASON_LEN => Ok(()),
        _ => Err(RuleViolation::RejectionReasonTooShort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_boundary() {
        assert!(check_address("Av").is_err());
        assert!(check_address("   Av 1    ").is_err());
        assert!(check_address("Av 12").is_ok());
    }

    #[test]
    fn test_comment_boundary() {
        assert!(check_comment("123456789").is_err());
        assert!(check_comment("1234567890").is_ok());
    }

    #[test]
    fn test_lengths_count_characters() {
        // five characters, more than five bytes
        assert!(check_address("ñandú").is_ok());
    }

    #[test]
    fn test_photo_size_boundary() {
        assert!(check_photo_size(MAX_PHOTO_BYTES).is_ok());
        assert_eq!(
            check_photo_size(MAX_PHOTO_BYTES + 1),
            Err(RuleViolation::PhotoTooLarge {
                size: 5_242_881
            })
        );
    }

    #[test]
    fn test_photo_extensions() {
        assert!(check_photo_extension("bache.JPG").is_ok());
        assert!(check_photo_extension("bache.webp").is_ok());
        assert!(check_photo_extension("bache.gif").is_err());
        assert!(check_photo_extension("bache").is_err());
    }

    #[test]
    fn test_rejection_reason() {
        assert!(check_rejection_reason(None).is_err());
        assert!(check_rejection_reason(Some("ok")).is_err());
        assert!(check_rejection_reason(Some("          x")).is_err());
        assert!(check_rejection_reason(Some("No cumple norma")).is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RuleViolation::AddressTooShort.to_string(),
            "The address must be at least 5 characters"
        );
        assert_eq!(
            RuleViolation::RejectionReasonTooShort.to_string(),
            "The rejection reason must be at least 10 characters"
        );
    }
}
