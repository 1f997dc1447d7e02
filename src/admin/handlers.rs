use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::UserEnvelope,
        jwt::AuthUser,
        repo::{Actor, Role, User},
    },
    responses::MessageResponse,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route(
            "/admin/users/:id",
            patch(update_user_role).delete(delete_user),
        )
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct UsersEnvelope {
    pub users: Vec<User>,
}

async fn require_admin(state: &AppState, user_id: Uuid) -> Result<Actor, (StatusCode, String)> {
    let actor = Actor::resolve(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;
    if !actor.is_admin() {
        warn!(actor_id = %actor.id, "admin endpoint denied");
        return Err((StatusCode::FORBIDDEN, "Not authorized".into()));
    }
    Ok(actor)
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UsersEnvelope>, (StatusCode, String)> {
    require_admin(&state, user_id).await?;
    let users = User::list_all(&state.db).await.map_err(internal)?;
    Ok(Json(UsersEnvelope { users }))
}

#[instrument(skip(state, payload))]
pub async fn update_user_role(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UserEnvelope>, (StatusCode, String)> {
    require_admin(&state, user_id).await?;

    let user = User::set_role(&state.db, id, payload.role)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    info!(user_id = %user.id, role = ?user.role, "role updated");
    Ok(Json(UserEnvelope { user }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    require_admin(&state, user_id).await?;

    let deleted = User::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "User not found".into()));
    }

    info!(deleted_user_id = %id, "user deleted");
    Ok(Json(MessageResponse {
        message: "User deleted".into(),
    }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
