use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::api::ListResponse;
use crate::authz::{filter_by_scope, Capability};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Event, EventPatch, NewEvent};
use crate::state::AppState;

use super::utils::{authorize, record_not_found, require_region_in_scope};

/// GET /api/events - list events within the caller's regional scope
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::EventsRead)?;

    let records = state.events.scan().await?;
    let visible = filter_by_scope(records, &grant.scope);

    Ok(Json(ListResponse::new(visible, &grant.scope)))
}

/// POST /api/events - the event's region must fall within the caller's scope
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(new): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::EventsWrite)?;
    require_region_in_scope(&grant, new.region)?;

    let event = Event::create(new);
    state.events.put(&event.id.to_string(), &event).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/:id - out-of-scope answers 404
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::EventsRead)?;

    let event = state.events.get_404(&id.to_string()).await?;
    if !grant.scope.allows(event.region) {
        return Err(record_not_found(state.events.name(), id));
    }

    Ok(Json(event))
}

/// PATCH /api/events/:id - merge-patch update
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::EventsWrite)?;

    let mut event = state.events.get_404(&id.to_string()).await?;
    if !grant.scope.allows(event.region) {
        return Err(record_not_found(state.events.name(), id));
    }

    patch.apply(&mut event);
    // A patch may not move the event out of the caller's scope either.
    require_region_in_scope(&grant, event.region)?;
    state.events.put(&id.to_string(), &event).await?;

    Ok(Json(event))
}

/// DELETE /api/events/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::EventsWrite)?;

    let event = state.events.get_404(&id.to_string()).await?;
    if !grant.scope.allows(event.region) {
        return Err(record_not_found(state.events.name(), id));
    }

    state.events.delete(&id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}
