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
use crate::models::{Member, MemberPatch, NewMember};
use crate::state::AppState;

use super::utils::{authorize, record_not_found, require_region_in_scope};

/// GET /api/members - list members within the caller's regional scope
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<Member>>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersRead)?;

    let records = state.members.scan().await?;
    let visible = filter_by_scope(records, &grant.scope);

    Ok(Json(ListResponse::new(visible, &grant.scope)))
}

/// POST /api/members - create a member; the server assigns id and timestamps.
/// The member's region must fall within the caller's scope.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(new): Json<NewMember>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersWrite)?;
    require_region_in_scope(&grant, new.region)?;

    let member = Member::create(new);
    state.members.put(&member.id.to_string(), &member).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/members/:id - single member; out-of-scope answers 404
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Member>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersRead)?;

    let member = state.members.get_404(&id.to_string()).await?;
    if !grant.scope.allows(member.region) {
        return Err(record_not_found(state.members.name(), id));
    }

    Ok(Json(member))
}

/// PATCH /api/members/:id - merge-patch update; unspecified fields untouched
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<MemberPatch>,
) -> Result<Json<Member>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersWrite)?;

    let mut member = state.members.get_404(&id.to_string()).await?;
    if !grant.scope.allows(member.region) {
        return Err(record_not_found(state.members.name(), id));
    }

    patch.apply(&mut member);
    // A patch may not move the member out of the caller's scope either.
    require_region_in_scope(&grant, member.region)?;
    state.members.put(&id.to_string(), &member).await?;

    Ok(Json(member))
}

/// DELETE /api/members/:id - hard delete by identifier
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersWrite)?;

    let member = state.members.get_404(&id.to_string()).await?;
    if !grant.scope.allows(member.region) {
        return Err(record_not_found(state.members.name(), id));
    }

    state.members.delete(&id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}
