//! Conversation (session) id validation

use std::fmt;

use super::{reject_nul, ValidationError};

/// Maximum session id length, matching the `conversation_id` column.
const MAX_SESSION_ID_LEN: usize = 64;

/// Placeholder older clients relied on when they omitted `session_id`.
///
/// Every caller that omits the id lands in this one conversation, so it is
/// only applied when the server runs with `--legacy-default-session`.
pub const LEGACY_DEFAULT_SESSION_ID: &str = "86d8734a-0029-4d95-a80c-f50ad6f8a61b";

/// Validated conversation id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session id.
    ///
    /// # Rules
    /// - Must not be empty
    /// - Max 64 characters
    /// - No NUL characters
    ///
    /// # Example
    /// ```
    /// use chatlog_server::models::SessionId;
    ///
    /// assert!(SessionId::new("86d8734a-0029-4d95-a80c-f50ad6f8a61b").is_ok());
    /// assert!(SessionId::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "session_id" });
        }

        if s.chars().count() > MAX_SESSION_ID_LEN {
            return Err(ValidationError::TooLong {
                field: "session_id",
                max: MAX_SESSION_ID_LEN,
            });
        }

        reject_nul("session_id", s)?;

        Ok(Self(s.to_owned()))
    }

    /// The shared placeholder conversation.
    pub fn legacy_default() -> Self {
        Self(LEGACY_DEFAULT_SESSION_ID.to_owned())
    }

    /// Resolve an optional request field.
    ///
    /// `None` is an error unless `allow_legacy_default` is set.
    pub fn resolve(raw: Option<&str>, allow_legacy_default: bool) -> Result<Self, ValidationError> {
        match raw {
            Some(s) => Self::new(s),
            None if allow_legacy_default => Ok(Self::legacy_default()),
            None => Err(ValidationError::Missing { field: "session_id" }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_legacy_default(&self) -> bool {
        self.0 == LEGACY_DEFAULT_SESSION_ID
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
