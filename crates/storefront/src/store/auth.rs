//! Password authentication against the hosted store's auth surface.
//!
//! Sign-up and sign-in are delegated entirely to the store
//! (`/auth/v1/signup`, `/auth/v1/token?grant_type=password`); the
//! storefront only keeps the resulting identity in its session.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use solstice_core::{Email, UserId};

use crate::config::StoreConfig;
use crate::store::StoreError;

/// An authenticated store session for one user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The store-assigned user id.
    pub user_id: UserId,
    /// The email the user signed in with.
    pub email: Email,
    /// Bearer token issued by the store. Unused for row operations (those
    /// run under the service key with explicit user scoping) but kept so
    /// the identity provably came from the auth surface.
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: uuid::Uuid,
    email: String,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
}

/// Client for the store's auth endpoints.
///
/// Uses the public (anonymous) key; user credentials never meet the
/// service key.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    auth_endpoint: String,
    anon_key: String,
}

impl AuthClient {
    /// Create a new auth client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let auth_endpoint = format!("{}/auth/v1", config.project_url.trim_end_matches('/'));

        Self {
            inner: Arc::new(AuthClientInner {
                client: reqwest::Client::new(),
                auth_endpoint,
                anon_key: config.anon_key.clone(),
            }),
        }
    }

    /// Register a new user with the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] if the store rejects the registration
    /// (e.g., the email is already taken).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &Email, password: &str) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .post(format!("{}/signup", self.inner.auth_endpoint))
            .header("apikey", &self.inner.anon_key)
            .json(&json!({ "email": email.as_str(), "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::decode_error(status, response).await?)
    }

    /// Exchange email + password for an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Credentials`] when the store rejects the
    /// password, or [`StoreError::Api`] for other failures.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &Email, password: &str) -> Result<AuthSession, StoreError> {
        let response = self
            .inner
            .client
            .post(format!("{}/token", self.inner.auth_endpoint))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.inner.anon_key)
            .json(&json!({ "email": email.as_str(), "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::decode_error(status, response).await?;
            // Bad passwords come back as 400s from the token grant
            if status == reqwest::StatusCode::BAD_REQUEST {
                return Err(StoreError::Credentials(err.to_string()));
            }
            return Err(err);
        }

        let token: TokenResponse = response.json().await?;

        let email = Email::parse(&token.user.email).map_err(|e| {
            StoreError::DataCorruption(format!("auth surface returned invalid email: {e}"))
        })?;

        Ok(AuthSession {
            user_id: UserId::new(token.user.id),
            email,
            access_token: token.access_token,
        })
    }

    async fn decode_error(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> Result<StoreError, StoreError> {
        let body = response.text().await?;
        let message = serde_json::from_str::<AuthErrorBody>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| body.chars().take(200).collect());

        Ok(StoreError::Api {
            status: status.as_u16(),
            code: None,
            message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_shape() {
        let json = r#"{
            "access_token": "token-value",
            "token_type": "bearer",
            "user": { "id": "4b4bcb6c-7c3e-4f0e-9c59-6a9f7a1d2e3f", "email": "shopper@example.com" }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "token-value");
        assert_eq!(token.user.email, "shopper@example.com");
    }

    #[test]
    fn test_auth_error_body_shapes() {
        let e: AuthErrorBody =
            serde_json::from_str(r#"{"error_description":"Invalid login credentials"}"#).unwrap();
        assert_eq!(e.message.as_deref(), Some("Invalid login credentials"));

        let e: AuthErrorBody =
            serde_json::from_str(r#"{"msg":"User already registered"}"#).unwrap();
        assert_eq!(e.message.as_deref(), Some("User already registered"));
    }
}
