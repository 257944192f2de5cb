//! Auth route handlers.
//!
//! Credentials are validated locally for shape, then handed to the hosted
//! store's auth API; the storefront never stores passwords. The resulting
//! identity lives in the session.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use solstice_core::Email;

use crate::error::{AppError, Result};
use crate::middleware::OptionalUser;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, Notice};
use crate::state::AppState;

/// Minimum password length enforced before the store is consulted.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Credentials request body (register and login).
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Auth response: the notice plus the signed-in identity.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub notice: Notice,
    pub user: CurrentUser,
}

/// Session identity response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<CurrentUser>,
}

fn parse_credentials(request: &CredentialsRequest) -> Result<Email> {
    let email = Email::parse(&request.email).map_err(|e| AppError::Validation(e.to_string()))?;
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(email)
}

/// Register a new account, then sign straight in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let email = parse_credentials(&request)?;

    state.auth().sign_up(&email, &request.password).await?;
    let auth = state.auth().sign_in(&email, &request.password).await?;

    let user = CurrentUser {
        id: auth.user_id,
        email: auth.email,
    };
    set_current_user(&session, &user).await?;

    Ok(Json(AuthResponse {
        notice: Notice::success("Account created, welcome!"),
        user,
    }))
}

/// Password sign-in.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let email = parse_credentials(&request)?;

    let auth = state.auth().sign_in(&email, &request.password).await?;

    let user = CurrentUser {
        id: auth.user_id,
        email: auth.email,
    };
    set_current_user(&session, &user).await?;

    Ok(Json(AuthResponse {
        notice: Notice::success("Signed in"),
        user,
    }))
}

/// Clear the session identity.
pub async fn logout(session: Session) -> Result<Json<Notice>> {
    clear_current_user(&session).await?;
    Ok(Json(Notice::success("Signed out")))
}

/// The current session identity, if any.
pub async fn me(OptionalUser(user): OptionalUser) -> Json<MeResponse> {
    Json(MeResponse { user })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials_rejects_bad_email() {
        let request = CredentialsRequest {
            email: "not-an-email".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(matches!(
            parse_credentials(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_credentials_rejects_short_password() {
        let request = CredentialsRequest {
            email: "shopper@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(matches!(
            parse_credentials(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_credentials_accepts_valid_input() {
        let request = CredentialsRequest {
            email: "shopper@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(parse_credentials(&request).is_ok());
    }
}
