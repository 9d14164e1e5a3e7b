use thiserror::Error;

use super::types::Capability;

/// Reason codes carried by a denied authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenyReason {
    /// None of the caller's roles grants the required capability.
    #[error("capability '{0}' not granted")]
    CapabilityNotGranted(Capability),

    /// Capability held, but the caller carries no interpretable regional
    /// role and the deployment policy is to deny rather than resolve an
    /// empty scope.
    #[error("capability '{0}' granted but no regional role present")]
    NoRegionalRole(Capability),
}

impl DenyReason {
    /// Stable machine-readable code for audit logs and error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DenyReason::CapabilityNotGranted(_) => "CAPABILITY_NOT_GRANTED",
            DenyReason::NoRegionalRole(_) => "NO_REGIONAL_ROLE",
        }
    }
}
