use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Administrative region used to scope member visibility.
///
/// The set is fixed by the club's bylaws; anything else in a role name is
/// malformed and ignored during scope resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Noord")]
    Noord,
    #[serde(rename = "Noord-Holland")]
    NoordHolland,
    #[serde(rename = "Oost")]
    Oost,
    #[serde(rename = "Utrecht")]
    Utrecht,
    #[serde(rename = "Zuid-Holland")]
    ZuidHolland,
    #[serde(rename = "Zuid")]
    Zuid,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Noord,
        Region::NoordHolland,
        Region::Oost,
        Region::Utrecht,
        Region::ZuidHolland,
        Region::Zuid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Noord => "Noord",
            Region::NoordHolland => "Noord-Holland",
            Region::Oost => "Oost",
            Region::Utrecht => "Utrecht",
            Region::ZuidHolland => "Zuid-Holland",
            Region::Zuid => "Zuid",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or(())
    }
}

/// Regional interpretation of a single identity-provider group name.
///
/// Groups of the form `Regio_<RegionName>` scope the caller to one region;
/// `Regio_All` is the distinguished all-regions marker. Any other group name
/// carries no regional meaning here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRole {
    AllRegions,
    Region(Region),
}

impl ScopeRole {
    /// Parse a role name into its regional meaning, if any.
    ///
    /// Malformed region names (`Regio_Bogus`) yield `None`: they neither
    /// grant anything nor abort the check.
    pub fn parse(role: &str) -> Option<ScopeRole> {
        let rest = role.strip_prefix("Regio_")?;
        if rest == "All" {
            return Some(ScopeRole::AllRegions);
        }
        rest.parse::<Region>().ok().map(ScopeRole::Region)
    }
}

/// Named permission required to perform an operation on an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    MembersRead,
    MembersWrite,
    EventsRead,
    EventsWrite,
    ProductsRead,
    ProductsWrite,
    ParamsRead,
    ParamsWrite,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::MembersRead,
        Capability::MembersWrite,
        Capability::EventsRead,
        Capability::EventsWrite,
        Capability::ProductsRead,
        Capability::ProductsWrite,
        Capability::ParamsRead,
        Capability::ParamsWrite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::MembersRead => "members_read",
            Capability::MembersWrite => "members_write",
            Capability::EventsRead => "events_read",
            Capability::EventsWrite => "events_write",
            Capability::ProductsRead => "products_read",
            Capability::ProductsWrite => "products_write",
            Capability::ParamsRead => "params_read",
            Capability::ParamsWrite => "params_write",
        }
    }

    /// The read capability implied by a write capability, if any.
    fn implied_by_write(&self) -> Option<Capability> {
        match self {
            Capability::MembersRead => Some(Capability::MembersWrite),
            Capability::EventsRead => Some(Capability::EventsWrite),
            Capability::ProductsRead => Some(Capability::ProductsWrite),
            Capability::ParamsRead => Some(Capability::ParamsWrite),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ();

    /// Unknown capability names fail to parse and are therefore never granted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

/// Injected mapping from capability to the group names that satisfy it.
///
/// Keeping this a value (rather than string literals scattered through the
/// handlers) lets the mapping be unit-tested and swapped per deployment.
#[derive(Debug, Clone, Default)]
pub struct CapabilityMap {
    grants: HashMap<Capability, HashSet<String>>,
}

impl CapabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The club's standard mapping: every capability is granted by a group
    /// of the same name, each write group also grants the matching read,
    /// and `admin` grants everything.
    pub fn standard() -> Self {
        let mut map = Self::new();
        for capability in Capability::ALL {
            map.grant(capability, capability.as_str());
            map.grant(capability, "admin");
            if let Some(write) = capability.implied_by_write() {
                map.grant(capability, write.as_str());
            }
        }
        map
    }

    pub fn grant(&mut self, capability: Capability, role: impl Into<String>) -> &mut Self {
        self.grants.entry(capability).or_default().insert(role.into());
        self
    }

    /// True when any of the caller's roles satisfies the capability.
    pub fn allows(&self, capability: Capability, roles: &[String]) -> bool {
        match self.grants.get(&capability) {
            Some(satisfying) => roles.iter().any(|r| satisfying.contains(r)),
            None => false,
        }
    }
}

/// Resolved set of regions an authorization decision grants for visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "regions", rename_all = "snake_case")]
pub enum RegionScope {
    /// Every region, including records with a missing region attribute.
    Unrestricted,
    /// A finite (possibly empty) set of visible regions.
    Regions(BTreeSet<Region>),
}

impl RegionScope {
    pub fn empty() -> Self {
        RegionScope::Regions(BTreeSet::new())
    }

    pub fn of(regions: impl IntoIterator<Item = Region>) -> Self {
        RegionScope::Regions(regions.into_iter().collect())
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, RegionScope::Unrestricted)
    }

    /// Single-record visibility check. Records without a region attribute
    /// are only visible under the unrestricted scope.
    pub fn allows(&self, region: Option<Region>) -> bool {
        match self {
            RegionScope::Unrestricted => true,
            RegionScope::Regions(set) => match region {
                Some(r) => set.contains(&r),
                None => false,
            },
        }
    }

    /// Human-readable scope description used in list metadata and audit logs.
    pub fn describe(&self) -> String {
        match self {
            RegionScope::Unrestricted => "all".to_string(),
            RegionScope::Regions(set) if set.is_empty() => "none".to_string(),
            RegionScope::Regions(set) => set
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Policy for a caller who holds the capability but carries no regional role.
///
/// The club runs `EmptyScope` (authorized, sees no regional records); `Deny`
/// is available for deployments that prefer a hard 403. One policy applies
/// uniformly, never per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnscopedPolicy {
    Deny,
    EmptyScope,
}

impl Default for UnscopedPolicy {
    fn default() -> Self {
        UnscopedPolicy::EmptyScope
    }
}

impl FromStr for UnscopedPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deny" => Ok(UnscopedPolicy::Deny),
            "empty" | "empty_scope" => Ok(UnscopedPolicy::EmptyScope),
            _ => Err(()),
        }
    }
}
