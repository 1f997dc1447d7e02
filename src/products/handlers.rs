use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::Actor},
    products::{
        dto::{
            CreateProductRequest, OwnerQuery, ProductEnvelope, ProductsEnvelope,
            UpdateProductRequest,
        },
        repo::{NewProduct, Product},
    },
    responses::MessageResponse,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
}

async fn resolve_actor(state: &AppState, user_id: Uuid) -> Result<Actor, (StatusCode, String)> {
    Actor::resolve(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".into()))
}

fn validate_fields(
    name: &str,
    quantity: i32,
    buy_price: f64,
    sell_price: f64,
    min_threshold: i32,
) -> Result<(), (StatusCode, String)> {
    if name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name must not be empty".into()));
    }
    if quantity < 0 || min_threshold < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Quantity and threshold must not be negative".into(),
        ));
    }
    if buy_price < 0.0 || sell_price < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Prices must not be negative".into()));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<ProductsEnvelope>, (StatusCode, String)> {
    let actor = resolve_actor(&state, user_id).await?;

    // Admins may target another user's catalog; everyone else sees their own.
    let owner_id = if actor.is_admin() {
        q.user_id.unwrap_or(actor.id)
    } else {
        actor.id
    };

    let products = Product::list_by_owner(&state.db, owner_id)
        .await
        .map_err(internal)?;
    Ok(Json(ProductsEnvelope { products }))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductEnvelope>), (StatusCode, String)> {
    let actor = resolve_actor(&state, user_id).await?;

    validate_fields(
        &payload.name,
        payload.quantity,
        payload.buy_price,
        payload.sell_price,
        payload.min_threshold,
    )?;

    let owner_id = if actor.is_admin() {
        payload.owner_id.unwrap_or(actor.id)
    } else {
        actor.id
    };

    let product = Product::create(
        &state.db,
        NewProduct {
            name: payload.name.trim(),
            category: payload.category.as_deref(),
            quantity: payload.quantity,
            buy_price: payload.buy_price,
            sell_price: payload.sell_price,
            min_threshold: payload.min_threshold,
            owner_id,
        },
    )
    .await
    .map_err(internal)?;

    info!(product_id = %product.id, owner_id = %owner_id, "product created");
    Ok((StatusCode::CREATED, Json(ProductEnvelope { product })))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductEnvelope>, (StatusCode, String)> {
    let actor = resolve_actor(&state, user_id).await?;

    let mut product = Product::find(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Product not found".into()))?;

    if product.owner_id != actor.id && !actor.is_admin() {
        warn!(product_id = %id, actor_id = %actor.id, "update denied");
        return Err((StatusCode::FORBIDDEN, "Not authorized".into()));
    }

    if let Some(name) = payload.name {
        product.name = name;
    }
    if let Some(category) = payload.category {
        product.category = Some(category);
    }
    if let Some(quantity) = payload.quantity {
        product.quantity = quantity;
    }
    if let Some(buy_price) = payload.buy_price {
        product.buy_price = buy_price;
    }
    if let Some(sell_price) = payload.sell_price {
        product.sell_price = sell_price;
    }
    if let Some(min_threshold) = payload.min_threshold {
        product.min_threshold = min_threshold;
    }

    validate_fields(
        &product.name,
        product.quantity,
        product.buy_price,
        product.sell_price,
        product.min_threshold,
    )?;

    let product = product.update(&state.db).await.map_err(internal)?;
    Ok(Json(ProductEnvelope { product }))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let actor = resolve_actor(&state, user_id).await?;

    let product = Product::find(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Product not found".into()))?;

    if product.owner_id != actor.id && !actor.is_admin() {
        warn!(product_id = %id, actor_id = %actor.id, "delete denied");
        return Err((StatusCode::FORBIDDEN, "Not authorized".into()));
    }

    // Referencing movements go with the product (ON DELETE CASCADE).
    Product::delete(&state.db, id).await.map_err(internal)?;
    info!(product_id = %id, "product deleted");
    Ok(Json(MessageResponse {
        message: "Deleted".into(),
    }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
