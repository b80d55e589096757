use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::AppState;
use crate::auth::CredentialVerifier;
use crate::extractors::ApiInput;
use crate::models::{LoginRequest, NewUser, RegisterRequest, UserResponse};
use crate::validation::{check_login, validate_registration};

type HandlerResult = Result<Response, (StatusCode, Json<serde_json::Value>)>;

/// `POST /api/register`
///
/// 201 with the stored user, or 422 when validation fails. A store-level
/// uniqueness conflict (a concurrent registration won the race) renders as
/// the same 422 the validator would have produced.
pub async fn register(
    State((backend, passwords)): State<AppState>,
    ApiInput(payload): ApiInput<RegisterRequest>,
) -> HandlerResult {
    let registration = validate_registration(backend.as_ref(), &payload)
        .await
        .map_err(|e| e.to_response())?;

    let password_hash = passwords
        .hash_password(&registration.password)
        .map_err(|e| e.to_response())?;

    let new_user = NewUser {
        name: registration.name,
        email: registration.email,
        password_hash,
    };

    let user = backend
        .create_user(&new_user)
        .await
        .map_err(|e| e.to_response())?;

    info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

/// `POST /api/login`
///
/// 200 with the user, 422 for malformed input, 401 for any credential
/// mismatch.
pub async fn login(
    State((backend, passwords)): State<AppState>,
    ApiInput(payload): ApiInput<LoginRequest>,
) -> HandlerResult {
    let credentials = check_login(&payload).map_err(|errors| {
        crate::error::validation_error_response(&errors)
    })?;

    let user = CredentialVerifier::new(backend.as_ref(), passwords.as_ref())
        .verify(&credentials.email, &credentials.password)
        .await
        .map_err(|e| e.to_response())?;

    info!(user_id = %user.id, "user logged in");

    Ok((StatusCode::OK, Json(UserResponse::from(user))).into_response())
}
