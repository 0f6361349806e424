//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose details name the
//! offending field: `{field, code, value?}`.

use serde_json::{Value, json};

use crate::domain::{MediaId, MediaRef, MediaType};
use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidChoice,
    InvalidMediaType,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidChoice => "invalid_choice",
            ErrorCode::InvalidMediaType => "invalid_media_type",
            ErrorCode::InvalidValue => "invalid_value",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
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
    let field = field.as_str();
    ValidationError::new(field, format!("{field} required")).with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_media_type_error(field: FieldName, value: &str) -> Error {
    ValidationError::new(field.as_str(), "invalid media_type")
        .with_value(ErrorCode::InvalidMediaType, value)
}

/// Reject a value outside an enumerated set, e.g. `invalid frequency`.
pub(crate) fn invalid_choice_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("invalid {field}"))
        .with_value(ErrorCode::InvalidChoice, value)
}

/// Reject a value whose content breaks a length or shape rule.
pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::InvalidValue)
}

/// Require a non-blank value and return it trimmed.
pub(crate) fn require_trimmed(value: Option<&str>, field: FieldName) -> Result<String, Error> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(missing_field_error(field)),
    }
}

/// Return the trimmed value or `default` when absent or blank.
pub(crate) fn trimmed_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .unwrap_or(default)
        .to_owned()
}

/// Return the trimmed value, dropping blank input.
pub(crate) fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Render a JSON string or number as text; other JSON values count as absent.
///
/// Catalogue identifiers arrive either as `"27205"` or `27205`.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parse a required media type (case-insensitive).
pub(crate) fn parse_media_type(value: Option<&str>, field: FieldName) -> Result<MediaType, Error> {
    let raw = require_trimmed(value, field)?;
    raw.parse()
        .map_err(|_| invalid_media_type_error(field, &raw))
}

/// Parse an optional media type, falling back to movies when absent.
pub(crate) fn parse_media_type_or_movie(
    value: Option<&str>,
    field: FieldName,
) -> Result<MediaType, Error> {
    match optional_trimmed(value) {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid_media_type_error(field, &raw)),
        None => Ok(MediaType::Movie),
    }
}

/// Parse a required external media identifier.
pub(crate) fn parse_media_id(value: Option<&str>, field: FieldName) -> Result<MediaId, Error> {
    let raw = require_trimmed(value, field)?;
    MediaId::new(raw).map_err(|_| missing_field_error(field))
}

/// Parse a required numeric catalogue identifier used as an upstream path
/// segment.
pub(crate) fn parse_catalogue_id(value: Option<&str>, field: FieldName) -> Result<MediaId, Error> {
    let raw = require_trimmed(value, field)?;
    if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::new(field.as_str(), format!("invalid {}", field.as_str()))
            .with_value(ErrorCode::InvalidValue, raw));
    }
    MediaId::new(raw).map_err(|_| missing_field_error(field))
}

/// Parse the `(media_type, tmdb_id)` pair shared by favorites and comments.
pub(crate) fn parse_media_ref(
    media_type: Option<&str>,
    media_id: Option<&str>,
) -> Result<MediaRef, Error> {
    let media_type = parse_media_type(media_type, FieldName::new("media_type"))?;
    let media_id = parse_media_id(media_id, FieldName::new("tmdb_id"))?;
    Ok(MediaRef::new(media_type, media_id))
}
