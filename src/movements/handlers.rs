use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{jwt::AuthUser, repo::Actor},
    movements::{
        dto::{CreateMovementRequest, MovementsEnvelope, UserFilter},
        engine::{self, AppliedMovement, MovementRequest},
        error::MovementError,
        repo::StockMovement,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/movements", get(list_movements).post(create_movement))
}

#[instrument(skip(state, payload))]
pub async fn create_movement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMovementRequest>,
) -> Result<(StatusCode, Json<AppliedMovement>), MovementError> {
    let actor = Actor::resolve(&state.db, user_id)
        .await?
        .ok_or(MovementError::Unauthorized)?;

    let applied = engine::apply_movement(
        &state.db,
        &actor,
        MovementRequest {
            product_id: payload.product_id,
            kind: payload.kind,
            quantity: payload.quantity,
            note: payload.note,
            on_behalf_of: payload.user_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(applied)))
}

#[instrument(skip(state))]
pub async fn list_movements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filter): Query<UserFilter>,
) -> Result<Json<MovementsEnvelope>, (StatusCode, String)> {
    let actor = Actor::resolve(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    // Admins may target another user; without a filter they fall back to
    // their own (possibly empty) ledger, same as the product listing.
    let target = if actor.is_admin() {
        filter.user_id.unwrap_or(actor.id)
    } else {
        actor.id
    };

    let movements = StockMovement::list_by_user(&state.db, target)
        .await
        .map_err(internal)?;
    Ok(Json(MovementsEnvelope { movements }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
