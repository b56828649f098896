//! Password sign-in against the hosted auth endpoint
//!
//! Produces the [`UserContext`] every user-scoped store operation takes, and
//! renews it with the refresh token once the access token runs out.

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{RemoteError, RemoteResult, UserContext};

use super::postgrest::{read_json, PostgrestConfig};

#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    config: PostgrestConfig,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    expires_in: Option<i64>,
    /// Unix timestamp; preferred over `expires_in` when present
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_context(self, now: DateTime<Utc>) -> UserContext {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));
        self.user
            .into_context(self.access_token)
            .with_refresh(self.refresh_token, expires_at)
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl AuthUser {
    fn into_context(self, access_token: String) -> UserContext {
        let contact = self.email.unwrap_or_default();
        let display_name = self
            .user_metadata
            .full_name
            .or(self.user_metadata.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| display_name_from_email(&contact));
        UserContext::new(self.id, display_name, contact).with_access_token(access_token)
    }
}

/// `ana.lopez@campus.edu` -> `ana.lopez`
fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

impl AuthClient {
    pub fn new(config: &PostgrestConfig) -> RemoteResult<Self> {
        Ok(Self {
            client: Client::new(),
            config: config.validate()?,
        })
    }

    async fn grant<B: Serialize>(&self, grant_type: &str, body: &B) -> RemoteResult<UserContext> {
        let url = format!("{}/auth/v1/token", self.config.url);
        let response = self
            .client
            .post(url)
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.config.anon_key)
            .json(body)
            .send()
            .await?;
        let token: TokenResponse = read_json(response).await?;
        Ok(token.into_context(Utc::now()))
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> RemoteResult<UserContext> {
        let user = self.grant("password", &PasswordGrant { email, password }).await?;
        info!("signed in as {}", user.user_id);
        Ok(user)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> RemoteResult<UserContext> {
        let user = self.grant("refresh_token", &RefreshGrant { refresh_token }).await?;
        info!("refreshed session for {}", user.user_id);
        Ok(user)
    }

    /// Make a saved session usable again
    ///
    /// Returns `user` unchanged while its token is valid, a refreshed session
    /// once it has expired, and `SessionExpired` when there is nothing to
    /// refresh with.
    pub async fn resume(&self, user: UserContext) -> RemoteResult<UserContext> {
        if !user.is_expired_at(Utc::now()) {
            return Ok(user);
        }
        let Some(refresh_token) = user.refresh_token.as_deref() else {
            warn!("session for {} expired without a refresh token", user.user_id);
            return Err(RemoteError::SessionExpired);
        };
        self.refresh_session(refresh_token).await
    }
}
