//! Identifiers for items in the external media catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of catalogue entry a favorite or comment refers to.
///
/// # Examples
///
/// ```
/// # use marquee::domain::MediaType;
/// assert_eq!("movie".parse::<MediaType>(), Ok(MediaType::Movie));
/// assert_eq!(" TV ".parse::<MediaType>(), Ok(MediaType::Tv));
/// assert!("anime".parse::<MediaType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// A feature film.
    Movie,
    /// A television series.
    Tv,
}

impl MediaType {
    /// Returns the database and upstream path representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown media type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMediaTypeError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseMediaTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown media type: {}", self.input)
    }
}

impl std::error::Error for ParseMediaTypeError {}

impl std::str::FromStr for MediaType {
    type Err = ParseMediaTypeError;

    /// Parsing trims and ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim();
        if normalised.eq_ignore_ascii_case("movie") {
            Ok(Self::Movie)
        } else if normalised.eq_ignore_ascii_case("tv") {
            Ok(Self::Tv)
        } else {
            Err(ParseMediaTypeError {
                input: s.to_owned(),
            })
        }
    }
}

/// Validation errors for [`MediaId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaIdValidationError {
    Empty,
}

impl fmt::Display for MediaIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tmdb_id required"),
        }
    }
}

impl std::error::Error for MediaIdValidationError {}

/// Identifier of an item in the external catalogue, kept as an opaque string.
///
/// ## Invariants
/// - Trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaId(String);

impl MediaId {
    /// Validate and construct a [`MediaId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, MediaIdValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MediaIdValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MediaId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MediaId> for String {
    fn from(value: MediaId) -> Self {
        value.0
    }
}

impl TryFrom<String> for MediaId {
    type Error = MediaIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Catalogue item reference: media type plus external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub media_type: MediaType,
    pub media_id: MediaId,
}

impl MediaRef {
    pub fn new(media_type: MediaType, media_id: MediaId) -> Self {
        Self {
            media_type,
            media_id,
        }
    }
}
