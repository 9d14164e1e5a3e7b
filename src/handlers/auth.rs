use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::authz::{AuthDecision, Capability};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/auth/whoami - current caller identity and resolved member scope
pub async fn whoami(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<Value> {
    let member_scope = match state
        .authorizer
        .resolve_scope(&user.groups, Capability::MembersRead)
    {
        AuthDecision::Granted(grant) => Some(grant.scope.describe()),
        AuthDecision::Denied(_) => None,
    };

    Json(json!({
        "sub": user.sub,
        "email": user.email,
        "groups": user.groups,
        "member_scope": member_scope,
    }))
}
