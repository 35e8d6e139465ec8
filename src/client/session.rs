//! Explicit session context for the API client

use crate::services::AuthResponse;

/// Credentials attached to outgoing requests.
///
/// Passed to the client at construction instead of being read from shared
/// state, so every request is built from values the caller can see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header, if any
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl From<&AuthResponse> for Session {
    fn from(auth: &AuthResponse) -> Self {
        Session::with_token(auth.token.clone())
    }
}
