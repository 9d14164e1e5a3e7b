// Regional access control: capability checks plus region-scoped visibility.
//
// Every protected handler resolves a scope first (`Authorizer::resolve_scope`),
// then either filters a scanned batch (`filter_by_scope`) or checks a single
// record (`RegionScope::allows`) before touching the response.

pub mod error;
pub mod filter;
pub mod resolve;
pub mod types;

pub use error::DenyReason;
pub use filter::{filter_by_scope, RegionScoped};
pub use resolve::{AuthDecision, Authorizer, Grant};
pub use types::{Capability, CapabilityMap, Region, RegionScope, ScopeRole, UnscopedPolicy};
