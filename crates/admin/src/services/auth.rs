//! Identity provider client.
//!
//! The shop has no local user table; admin credentials live in an external
//! hosted identity provider and this client only verifies email/password
//! pairs at login time.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::config::AuthConfig;

/// Errors from the identity provider boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// API returned an unexpected error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the provider's response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A verified admin identity.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminIdentity {
    pub id: String,
    pub email: String,
}

/// Client for the hosted identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity provider client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::with_key(&config.base_url, &config.api_key)
    }

    /// Client against an explicit endpoint (tests point this at nothing).
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn with_key(base_url: &str, api_key: &SecretString) -> Result<Self, AuthError> {
        let mut headers = HeaderMap::new();
        let mut key_header = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| AuthError::Parse(format!("Invalid API key format: {e}")))?;
        key_header.set_sensitive(true);
        headers.insert("X-Api-Key", key_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Verify an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the provider rejects
    /// the pair, other variants for transport or protocol failures.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AdminIdentity, AuthError> {
        let url = format!("{}/v1/accounts/sign-in", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }
}
