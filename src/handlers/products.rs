use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::api::ListResponse;
use crate::authz::Capability;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

use super::utils::authorize;

// Products carry no region; access is capability-gated only.

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<Product>>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::ProductsRead)?;

    let records = state.products.scan().await?;
    Ok(Json(ListResponse::new(records, &grant.scope)))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    authorize(&state.authorizer, &user, Capability::ProductsWrite)?;

    let product = Product::create(new);
    state.products.put(&product.id.to_string(), &product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    authorize(&state.authorizer, &user, Capability::ProductsRead)?;

    let product = state.products.get_404(&id.to_string()).await?;
    Ok(Json(product))
}

/// PATCH /api/products/:id - merge-patch update
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    authorize(&state.authorizer, &user, Capability::ProductsWrite)?;

    let mut product = state.products.get_404(&id.to_string()).await?;
    patch.apply(&mut product);
    state.products.put(&id.to_string(), &product).await?;

    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    authorize(&state.authorizer, &user, Capability::ProductsWrite)?;

    state.products.get_404(&id.to_string()).await?;
    state.products.delete(&id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}
