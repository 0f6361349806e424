//! Locally cached projection of a verified external identity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdentityClaim;
use super::text::truncate_optional;

/// Maximum stored length of a subject identifier.
pub const SUBJECT_ID_MAX: usize = 128;
/// Maximum display name length accepted by the profile update path.
pub const PROFILE_DISPLAY_NAME_MAX: usize = 200;
/// Maximum avatar URL length accepted by the profile update path.
pub const PROFILE_AVATAR_URL_MAX: usize = 500;

/// Validation errors returned by [`SubjectId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptySubjectId,
    SubjectIdTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubjectId => write!(f, "subject id must not be empty"),
            Self::SubjectIdTooLong { max } => {
                write!(f, "subject id must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable opaque identifier issued by the identity provider.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
/// - At most [`SUBJECT_ID_MAX`] characters.
///
/// # Examples
/// ```
/// use marquee::domain::SubjectId;
///
/// let id = SubjectId::new("firebase-uid-1").expect("valid subject");
/// assert_eq!(id.as_ref(), "firebase-uid-1");
/// assert!(SubjectId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Validate and construct a [`SubjectId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = id.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptySubjectId);
        }
        if trimmed.chars().count() > SUBJECT_ID_MAX {
            return Err(UserValidationError::SubjectIdTooLong {
                max: SUBJECT_ID_MAX,
            });
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SubjectId> for String {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl TryFrom<String> for SubjectId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Local user record mirroring the latest verified claim.
///
/// `created_at` is assigned by storage on first insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUser {
    pub subject_id: SubjectId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LocalUser {
    /// Overwrite every cached field that differs from `claim`.
    ///
    /// Returns `true` when at least one field changed, i.e. when the record
    /// needs to be written back.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use marquee::domain::{IdentityClaim, LocalUser, SubjectId};
    ///
    /// let subject_id = SubjectId::new("uid-1").expect("subject");
    /// let mut user = LocalUser {
    ///     subject_id: subject_id.clone(),
    ///     email: Some("old@example.com".into()),
    ///     display_name: None,
    ///     avatar_url: None,
    ///     created_at: Utc::now(),
    /// };
    /// let claim = IdentityClaim {
    ///     subject_id,
    ///     email: Some("new@example.com".into()),
    ///     display_name: None,
    ///     avatar_url: None,
    /// };
    /// assert!(user.apply_claim(&claim));
    /// assert!(!user.apply_claim(&claim));
    /// ```
    pub fn apply_claim(&mut self, claim: &IdentityClaim) -> bool {
        let mut dirty = false;
        dirty |= overwrite_if_changed(&mut self.email, claim.email.as_ref());
        dirty |= overwrite_if_changed(&mut self.display_name, claim.display_name.as_ref());
        dirty |= overwrite_if_changed(&mut self.avatar_url, claim.avatar_url.as_ref());
        dirty
    }

    /// Name recorded alongside content the user authors.
    ///
    /// Prefers the email address, then the display name, and falls back to
    /// `"Anonymous"`.
    pub fn author_label(&self) -> &str {
        self.email
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| self.display_name.as_deref().filter(|value| !value.is_empty()))
            .unwrap_or("Anonymous")
    }
}

fn overwrite_if_changed(stored: &mut Option<String>, claimed: Option<&String>) -> bool {
    if stored.as_ref() == claimed {
        return false;
    }
    *stored = claimed.cloned();
    true
}

/// Caller-supplied profile edits.
///
/// `None` leaves the stored value untouched. Values are truncated to
/// [`PROFILE_DISPLAY_NAME_MAX`] and [`PROFILE_AVATAR_URL_MAX`] characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    display_name: Option<String>,
    avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Build an update, truncating over-long values.
    pub fn new(display_name: Option<&str>, avatar_url: Option<&str>) -> Self {
        Self {
            display_name: truncate_optional(display_name, PROFILE_DISPLAY_NAME_MAX),
            avatar_url: truncate_optional(avatar_url, PROFILE_AVATAR_URL_MAX),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.avatar_url.is_none()
    }
}
