use crate::authz::{AuthDecision, Authorizer, Capability, Grant, Region};
use crate::config;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Resolve the caller's scope for a capability, emitting an audit event on
/// both grant and deny when audit logging is enabled. Denials surface as a
/// 403 without record data.
pub fn authorize(
    authorizer: &Authorizer,
    user: &AuthUser,
    capability: Capability,
) -> Result<Grant, ApiError> {
    match authorizer.resolve_scope(&user.groups, capability) {
        AuthDecision::Granted(grant) => {
            if config::config().security.enable_audit_logging {
                tracing::info!(
                    subject = %user.sub,
                    capability = %capability,
                    scope = %grant.scope.describe(),
                    "authorization granted"
                );
            }
            Ok(grant)
        }
        AuthDecision::Denied(reason) => {
            if config::config().security.enable_audit_logging {
                tracing::warn!(
                    subject = %user.sub,
                    capability = %capability,
                    reason = reason.code(),
                    "authorization denied"
                );
            }
            Err(ApiError::forbidden(format!(
                "capability '{}' required",
                capability
            )))
        }
    }
}

/// Reject writes that would place a record outside the caller's scope.
/// Without this a scoped writer could create (or move) a record it can no
/// longer see. Scoped callers may only write records carrying one of their
/// own regions; region-less records are reserved for unrestricted callers.
pub fn require_region_in_scope(grant: &Grant, region: Option<Region>) -> Result<(), ApiError> {
    if grant.scope.allows(region) {
        return Ok(());
    }
    Err(ApiError::forbidden(match region {
        Some(region) => format!("region '{}' is outside your regional scope", region),
        None => "a region within your regional scope is required".to_string(),
    }))
}

/// 404 body for a record that is absent or out of the caller's scope.
/// Both cases answer identically so filtered-out records are never revealed.
pub fn record_not_found(collection: &str, id: impl std::fmt::Display) -> ApiError {
    ApiError::not_found(format!("record not found: {}/{}", collection, id))
}
