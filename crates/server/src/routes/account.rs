//! Account route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::User;
use crate::routes::MessageResponse;
use crate::services::AccountService;
use crate::state::AppState;

/// Request for registering an account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login.
///
/// Carries the stored user record verbatim, password field included.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

/// Request for changing a password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

/// Register a new account.
///
/// # Errors
///
/// Returns 400 on an invalid email or empty password, 409 if the email is
/// already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let user = AccountService::new(state.pool())
        .register(&body.email, &body.password)
        .await?;

    tracing::info!(account_id = %user.id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("registration successful")),
    ))
}

/// Login with email and password.
///
/// # Errors
///
/// Returns 401 if the email is unknown or the password doesn't match.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = AccountService::new(state.pool())
        .login(&body.email, &body.password)
        .await?;

    Ok(Json(LoginResponse { user }))
}

/// Change an account's password.
///
/// # Errors
///
/// Returns 404 if the email is unknown, 400 if the old password doesn't
/// match.
pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    AccountService::new(state.pool())
        .change_password(&body.email, &body.old_password, &body.new_password)
        .await?;

    Ok(Json(MessageResponse::new("password changed")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_change_password_request_field_names() {
        let body = r#"{"email":"a@b.c","oldPassword":"old","newPassword":"new"}"#;
        let parsed: ChangePasswordRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.old_password, "old");
        assert_eq!(parsed.new_password, "new");
    }

    #[test]
    fn test_register_request_requires_both_fields() {
        let body = r#"{"email":"a@b.c"}"#;
        let parsed: std::result::Result<RegisterRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }
}
