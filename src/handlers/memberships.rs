use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::ListResponse;
use crate::authz::{Capability, RegionScope};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Member, Membership, MembershipPatch, NewMembership};
use crate::state::AppState;

use super::utils::{authorize, record_not_found};

// Membership records belong to the member ledger and are gated by the
// members capabilities. Visibility follows the owning member's region, so a
// scoped caller never sees memberships of members outside their scope.

#[derive(Debug, Deserialize)]
pub struct MembershipQuery {
    pub member_id: Option<Uuid>,
}

async fn visible_member_ids(
    state: &AppState,
    scope: &RegionScope,
) -> Result<Option<HashSet<Uuid>>, ApiError> {
    if scope.is_unrestricted() {
        return Ok(None);
    }
    let members: Vec<Member> = state.members.scan().await?;
    Ok(Some(
        members
            .into_iter()
            .filter(|m| scope.allows(m.region))
            .map(|m| m.id)
            .collect(),
    ))
}

async fn member_visible(state: &AppState, scope: &RegionScope, member_id: Uuid) -> Result<bool, ApiError> {
    if scope.is_unrestricted() {
        return Ok(true);
    }
    match state.members.get(&member_id.to_string()).await? {
        Some(member) => Ok(scope.allows(member.region)),
        None => Ok(false),
    }
}

/// GET /api/memberships[?member_id=] - list, restricted to visible members
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<MembershipQuery>,
) -> Result<Json<ListResponse<Membership>>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersRead)?;

    let mut records = state.memberships.scan().await?;
    if let Some(member_id) = query.member_id {
        records.retain(|m| m.member_id == member_id);
    }
    if let Some(visible) = visible_member_ids(&state, &grant.scope).await? {
        records.retain(|m| visible.contains(&m.member_id));
    }

    Ok(Json(ListResponse::new(records, &grant.scope)))
}

/// POST /api/memberships - create for a member visible to the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(new): Json<NewMembership>,
) -> Result<(StatusCode, Json<Membership>), ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersWrite)?;

    if !member_visible(&state, &grant.scope, new.member_id).await? {
        return Err(record_not_found(state.members.name(), new.member_id));
    }

    let membership = Membership::create(new);
    state
        .memberships
        .put(&membership.id.to_string(), &membership)
        .await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// GET /api/memberships/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Membership>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersRead)?;

    let membership = state.memberships.get_404(&id.to_string()).await?;
    if !member_visible(&state, &grant.scope, membership.member_id).await? {
        return Err(record_not_found(state.memberships.name(), id));
    }

    Ok(Json(membership))
}

/// PATCH /api/memberships/:id - merge-patch update
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<MembershipPatch>,
) -> Result<Json<Membership>, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersWrite)?;

    let mut membership = state.memberships.get_404(&id.to_string()).await?;
    if !member_visible(&state, &grant.scope, membership.member_id).await? {
        return Err(record_not_found(state.memberships.name(), id));
    }

    patch.apply(&mut membership);
    state.memberships.put(&id.to_string(), &membership).await?;

    Ok(Json(membership))
}

/// DELETE /api/memberships/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let grant = authorize(&state.authorizer, &user, Capability::MembersWrite)?;

    let membership = state.memberships.get_404(&id.to_string()).await?;
    if !member_visible(&state, &grant.scope, membership.member_id).await? {
        return Err(record_not_found(state.memberships.name(), id));
    }

    state.memberships.delete(&id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}
