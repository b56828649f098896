//! Session Context
//!
//! The resolved, signed-in user. Passed explicitly into every user-scoped
//! store operation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Refresh this long before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: String,
    pub display_name: String,
    /// Contact shared with item owners (usually the sign-in email)
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// When `access_token` stops being accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserContext {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            contact: contact.into(),
            access_token: None,
            refresh_token: None,
            expires_at: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_refresh(mut self, refresh_token: Option<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        self.refresh_token = refresh_token;
        self.expires_at = expires_at;
        self
    }

    /// True once the access token is expired or about to expire at `now`
    ///
    /// A token of unknown lifetime counts as expired; a session without a
    /// token (demo mode) never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, self.expires_at) {
            (_, Some(expires_at)) => now + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            (Some(_), None) => true,
            (None, None) => false,
        }
    }
}
