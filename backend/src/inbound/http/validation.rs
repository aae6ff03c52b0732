//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs keep every field optional so a missing value is reported as
//! a field-level `invalid_request` instead of an opaque JSON decoding error.

use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{EmissionCategory, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    UnknownCategory,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::UnknownCategory => "unknown_category",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap an optional request field or report it missing.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a calendar date (YYYY-MM-DD)"))
        .with_value(ErrorCode::InvalidDate, value)
}

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_date_error(field, value))
}

/// Parse one of the activity categories. `energy` is not an activity.
pub(crate) fn parse_category(value: &str, field: FieldName) -> Result<EmissionCategory, Error> {
    let parsed = EmissionCategory::from_str(value.trim())
        .ok()
        .filter(|category| EmissionCategory::ACTIVITIES.contains(category));
    parsed.ok_or_else(|| {
        let known = EmissionCategory::ACTIVITIES
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        ValidationError::new(
            field,
            format!("unknown category '{value}'; expected one of: {known}"),
        )
        .with_value(ErrorCode::UnknownCategory, value)
    })
}

/// Convert a JSON integer into a count between 0 and `i32::MAX`.
pub(crate) fn parse_count(value: i64, field: FieldName) -> Result<u32, Error> {
    // Counts are stored in `INTEGER` columns, so the ceiling is `i32::MAX`.
    i32::try_from(value)
        .ok()
        .and_then(|count| u32::try_from(count).ok())
        .ok_or_else(|| {
            let name = field.as_str();
            ValidationError::new(
                field,
                format!("{name} must be a whole number between 0 and {}", i32::MAX),
            )
            .with_value(ErrorCode::OutOfRange, value.to_string())
        })
}

/// Convert a JSON number that must hold a whole count, such as an
/// equipment quantity, into `u32`.
pub(crate) fn parse_whole_count(value: f64, field: FieldName) -> Result<u32, Error> {
    if !value.is_finite() || value.fract() != 0.0 {
        let name = field.as_str();
        return Err(
            ValidationError::new(field, format!("{name} must be a whole number"))
                .with_value(ErrorCode::OutOfRange, value.to_string()),
        );
    }
    // Saturating cast; anything beyond i64 is rejected by `parse_count`.
    parse_count(value as i64, field)
}
