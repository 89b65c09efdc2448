//! Client-side submission checks
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! sees one message at a time.

use crate::error::ValidationError;
use crate::store::{NewReport, PhotoUpload};
use civic_types::{rules, Coordinates, RuleViolation};

/// Raw form fields, as entered by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionFields {
    pub address: String,
    pub comment: String,
    pub photo: Option<PhotoUpload>,
    pub contact_email: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Validator for new report submissions
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// Check the fields: address, then comment, then photo presence, then
    /// photo size.
    pub fn validate(fields: &SubmissionFields) -> Result<(), ValidationError> {
        rules::check_address(&fields.address)?;
        rules::check_comment(&fields.comment)?;
        let photo = fields.photo.as_ref().ok_or(RuleViolation::MissingPhoto)?;
        rules::check_photo_size(photo.size())?;
        Ok(())
    }

    /// Validate and build the creation request.
    ///
    /// `marker` is used when the fields carry no coordinates of their own.
    pub fn prepare(
        fields: &SubmissionFields,
        marker: Option<Coordinates>,
    ) -> Result<NewReport, ValidationError> {
        Self::validate(fields)?;

        let photo = fields.photo.clone().ok_or(RuleViolation::MissingPhoto)?;
        let contact_email = fields
            .contact_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        Ok(NewReport {
            address: fields.address.trim().to_string(),
            comment: fields.comment.trim().to_string(),
            photo,
            contact_email,
            coordinates: fields.coordinates.or(marker),
        })
    }
}
