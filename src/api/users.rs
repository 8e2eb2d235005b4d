use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use super::error::ApiError;
use super::AppState;
use crate::auth::{hash_password, is_valid_email, is_valid_password};
use crate::models::{NewUser, User, UserId};
use crate::storage::StorageError;

type ApiResult = Result<(StatusCode, Json<Value>), ApiError>;

const EMAIL_IN_USE: &str = "Email already in use. Please use another email";

/// `GET /api/user/:id`
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = UserId::parse(&id).ok_or_else(|| ApiError::bad_request("Provided invalid ID"))?;

    let user = state
        .store
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::internal("Server Error trying to get USER INFO BY ID", e))?
        .ok_or_else(|| ApiError::not_found(format!("User not found by ID: {}", id)))?;

    Ok((StatusCode::OK, Json(json!({ "user": user }))))
}

/// `POST /api/user`
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult {
    let Json(new_user) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let (name, email, password) = match (
        non_empty(new_user.name),
        non_empty(new_user.email),
        non_empty(new_user.password),
    ) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => return Err(ApiError::bad_request("Username, email, and password required")),
    };

    if !is_valid_email(&email) {
        return Err(ApiError::bad_request("Email is not valid. Try again"));
    }

    if !is_valid_password(&password) {
        return Err(ApiError::bad_request("Password not valid. Try again"));
    }

    let existing = state
        .store
        .find_by_email(&email)
        .await
        .map_err(|e| ApiError::internal("POST request failed. Try again", e))?;
    if existing.is_some() {
        return Err(ApiError::bad_request(EMAIL_IN_USE));
    }

    // bcrypt is deliberately slow; keep it off the async workers
    let cost = state.bcrypt_cost;
    let password = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::internal("POST request failed. Try again", e))?
        .map_err(|e| ApiError::internal("POST request failed. Try again", format!("{:#}", e)))?;

    let now = Utc::now();
    let user = User {
        id: UserId::generate(now),
        name,
        email,
        password,
        created_at: now,
    };

    match state.store.insert(&user).await {
        Ok(()) => {}
        Err(StorageError::DuplicateEmail) => return Err(ApiError::bad_request(EMAIL_IN_USE)),
        Err(e) => return Err(ApiError::internal("POST request failed. Try again", e)),
    }

    info!("Created user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User successfully created!", "id": user.id })),
    ))
}

/// `DELETE /api/user/:id`
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = UserId::parse(&id).ok_or_else(|| ApiError::bad_request("Provided invalid ID"))?;

    let user = state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::internal("DELETE request user failed. Try again", e))?
        .ok_or_else(|| ApiError::not_found("User with that ID is not found"))?;

    info!("Deleted user {}", id);
    Ok((
        StatusCode::OK,
        Json(json!({ "message": format!("User deleted with name: {}", user.name) })),
    ))
}

/// `DELETE /api/user` without an id.
pub async fn delete_user_missing_id() -> ApiError {
    ApiError::bad_request("User ID is required to delete")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
