//! Alert preferences: at most one notification settings record per user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::text::truncate_chars;

/// Maximum stored keywords length.
pub const ALERT_KEYWORDS_MAX: usize = 1000;
/// Maximum stored channels length.
pub const ALERT_CHANNELS_MAX: usize = 200;

/// How often alerts are delivered.
///
/// # Examples
///
/// ```
/// # use marquee::domain::AlertFrequency;
/// assert_eq!(AlertFrequency::default(), AlertFrequency::Weekly);
/// assert_eq!(" Daily ".parse::<AlertFrequency>(), Ok(AlertFrequency::Daily));
/// assert!("yearly".parse::<AlertFrequency>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl AlertFrequency {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for AlertFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown frequency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlertFrequencyError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseAlertFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown alert frequency: {}", self.input)
    }
}

impl std::error::Error for ParseAlertFrequencyError {}

impl std::str::FromStr for AlertFrequency {
    type Err = ParseAlertFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ParseAlertFrequencyError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Alert settings as seen by callers.
///
/// `updated_at` is `None` only for the unsaved default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPreference {
    pub frequency: AlertFrequency,
    pub keywords: String,
    pub channels: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for AlertPreference {
    fn default() -> Self {
        Self {
            frequency: AlertFrequency::default(),
            keywords: String::new(),
            channels: String::new(),
            updated_at: None,
        }
    }
}

/// Validated replacement values for a user's alert preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPreferenceUpdate {
    frequency: AlertFrequency,
    keywords: String,
    channels: String,
}

impl AlertPreferenceUpdate {
    /// Build an update; keywords and channels are trimmed then truncated.
    pub fn new(frequency: AlertFrequency, keywords: &str, channels: &str) -> Self {
        Self {
            frequency,
            keywords: truncate_chars(keywords.trim(), ALERT_KEYWORDS_MAX),
            channels: truncate_chars(channels.trim(), ALERT_CHANNELS_MAX),
        }
    }

    pub fn frequency(&self) -> AlertFrequency {
        self.frequency
    }

    pub fn keywords(&self) -> &str {
        self.keywords.as_str()
    }

    pub fn channels(&self) -> &str {
        self.channels.as_str()
    }
}
