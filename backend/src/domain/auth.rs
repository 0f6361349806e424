//! Authentication primitives: bearer credentials and verified claims.
//!
//! Keep header parsing outside the verifier by exposing constructors that
//! validate the raw `Authorization` value before any network call happens.

use std::fmt;

use zeroize::Zeroizing;

use super::SubjectId;

const BEARER_PREFIX: &str = "Bearer ";

/// Domain error returned when the `Authorization` header is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerTokenError {
    /// Header was absent or did not use the `Bearer` scheme.
    MissingBearer,
    /// Header used the `Bearer` scheme but carried no token.
    EmptyToken,
}

impl fmt::Display for BearerTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBearer => write!(f, "Missing Authorization Bearer token"),
            Self::EmptyToken => write!(f, "Authorization Bearer token must not be empty"),
        }
    }
}

impl std::error::Error for BearerTokenError {}

/// Opaque bearer credential presented by the caller.
///
/// The raw token is zeroed on drop and never rendered by `Debug`.
///
/// # Examples
/// ```
/// use marquee::domain::BearerToken;
///
/// let token = BearerToken::from_authorization_header(Some("Bearer abc.def")).unwrap();
/// assert_eq!(token.expose(), "abc.def");
/// assert!(BearerToken::from_authorization_header(Some("Basic abc")).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Parse an `Authorization` header value.
    pub fn from_authorization_header(header: Option<&str>) -> Result<Self, BearerTokenError> {
        let raw = header.ok_or(BearerTokenError::MissingBearer)?;
        let token = raw
            .strip_prefix(BEARER_PREFIX)
            .ok_or(BearerTokenError::MissingBearer)?
            .trim();
        if token.is_empty() {
            return Err(BearerTokenError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(token.to_owned())))
    }

    /// Borrow the raw token for verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Identity attributes returned by a successful token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub subject_id: SubjectId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, BearerTokenError::MissingBearer)]
    #[case(Some(""), BearerTokenError::MissingBearer)]
    #[case(Some("Basic dXNlcjpwdw=="), BearerTokenError::MissingBearer)]
    #[case(Some("bearer lowercase"), BearerTokenError::MissingBearer)]
    #[case(Some("Bearer    "), BearerTokenError::EmptyToken)]
    fn rejects_unusable_headers(#[case] header: Option<&str>, #[case] expected: BearerTokenError) {
        let err = BearerToken::from_authorization_header(header).expect_err("header is unusable");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn trims_token_whitespace() {
        let token =
            BearerToken::from_authorization_header(Some("Bearer  abc ")).expect("valid header");
        assert_eq!(token.expose(), "abc");
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let token = BearerToken::from_authorization_header(Some("Bearer secret")).expect("valid");
        assert!(!format!("{token:?}").contains("secret"));
    }
}
