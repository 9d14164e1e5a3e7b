use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::api::ListResponse;
use crate::authz::Capability;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::Parameter;
use crate::state::AppState;

use super::utils::authorize;

// Configuration parameters are keyed by name and upserted whole.

#[derive(Debug, Deserialize)]
pub struct ParameterBody {
    pub value: serde_json::Value,
}

/// GET /api/params
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<Parameter>>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::ParamsRead)?;

    let records = state.params.scan().await?;
    Ok(Json(ListResponse::new(records, &grant.scope)))
}

/// GET /api/params/:key
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(key): Path<String>,
) -> Result<Json<Parameter>, ApiError> {
    authorize(&state.authorizer, &user, Capability::ParamsRead)?;

    let parameter = state.params.get_404(&key).await?;
    Ok(Json(parameter))
}

/// PUT /api/params/:key - upsert; last writer wins
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(key): Path<String>,
    Json(body): Json<ParameterBody>,
) -> Result<Json<Parameter>, ApiError> {
    authorize(&state.authorizer, &user, Capability::ParamsWrite)?;

    let parameter = Parameter::new(key.clone(), body.value);
    state.params.put(&key, &parameter).await?;

    Ok(Json(parameter))
}

/// DELETE /api/params/:key
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(&state.authorizer, &user, Capability::ParamsWrite)?;

    state.params.get_404(&key).await?;
    state.params.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
