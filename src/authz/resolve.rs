use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DenyReason;
use super::types::{Capability, CapabilityMap, RegionScope, ScopeRole, UnscopedPolicy};

/// Successful authorization outcome: the resolved scope plus audit metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Grant {
    pub capability: Capability,
    pub scope: RegionScope,
    pub granted_at: DateTime<Utc>,
}

/// Outcome of `Authorizer::resolve_scope`.
#[derive(Debug, Clone)]
pub enum AuthDecision {
    Granted(Grant),
    Denied(DenyReason),
}

/// Translates a caller's role set into an authorization decision and a
/// region scope. Pure and synchronous; holds only injected configuration.
#[derive(Debug, Clone)]
pub struct Authorizer {
    capabilities: CapabilityMap,
    unscoped_policy: UnscopedPolicy,
}

impl Authorizer {
    pub fn new(capabilities: CapabilityMap, unscoped_policy: UnscopedPolicy) -> Self {
        Self { capabilities, unscoped_policy }
    }

    /// Resolve the caller's roles against a required capability.
    ///
    /// Denied when no role grants the capability. Otherwise the regional
    /// roles determine the scope: `Regio_All` resolves unrestricted,
    /// `Regio_<Name>` roles contribute their region, and a caller with no
    /// regional role at all falls through to the configured
    /// [`UnscopedPolicy`]. Malformed role names are skipped.
    pub fn resolve_scope(&self, roles: &[String], capability: Capability) -> AuthDecision {
        if !self.capabilities.allows(capability, roles) {
            return AuthDecision::Denied(DenyReason::CapabilityNotGranted(capability));
        }

        let mut regions: BTreeSet<_> = BTreeSet::new();
        for role in roles {
            match ScopeRole::parse(role) {
                Some(ScopeRole::AllRegions) => {
                    return self.granted(capability, RegionScope::Unrestricted);
                }
                Some(ScopeRole::Region(region)) => {
                    regions.insert(region);
                }
                None => {}
            }
        }

        if regions.is_empty() {
            return match self.unscoped_policy {
                UnscopedPolicy::Deny => {
                    AuthDecision::Denied(DenyReason::NoRegionalRole(capability))
                }
                UnscopedPolicy::EmptyScope => self.granted(capability, RegionScope::empty()),
            };
        }

        self.granted(capability, RegionScope::Regions(regions))
    }

    fn granted(&self, capability: Capability, scope: RegionScope) -> AuthDecision {
        AuthDecision::Granted(Grant {
            capability,
            scope,
            granted_at: Utc::now(),
        })
    }
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new(CapabilityMap::standard(), UnscopedPolicy::default())
    }
}
