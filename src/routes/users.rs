use crate::error::ApiError;
use crate::model::{NewUser, User};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::info;

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.store().all_users())
}

/// Registers an account. Username and email must be unused; the created
/// account is never an admin regardless of the payload.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let store = state.store();
    if store.get_user_by_username(&payload.username).is_some() {
        return Err(ApiError::conflict(format!(
            "username {} is already taken",
            payload.username
        )));
    }
    if store.get_user_by_email(&payload.email).is_some() {
        return Err(ApiError::conflict(format!(
            "email {} is already registered",
            payload.email
        )));
    }

    let user = store.create_user(payload);
    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}
