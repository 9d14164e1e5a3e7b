use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::{Region, RegionScoped};

/// A club ride-out, meeting or other activity. Regional events carry a
/// `region` and are filtered like members; national events leave it unset
/// and are only visible to unrestricted callers in scoped lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub region: Option<Region>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub region: Option<Region>,
}

impl Event {
    pub fn create(new: NewEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            location: new.location,
            starts_at: new.starts_at,
            region: new.region,
            created_at: now,
            updated_at: now,
        }
    }
}

impl RegionScoped for Event {
    fn region(&self) -> Option<Region> {
        self.region
    }
}

/// Optional attributes use the double-`Option` shape so an explicit `null`
/// clears the stored value (e.g. turning a regional event national).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub location: Option<Option<String>>,
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub region: Option<Option<Region>>,
}

impl EventPatch {
    pub fn apply(self, event: &mut Event) {
        if let Some(v) = self.title {
            event.title = v;
        }
        if let Some(v) = self.description {
            event.description = v;
        }
        if let Some(v) = self.location {
            event.location = v;
        }
        if let Some(v) = self.starts_at {
            event.starts_at = v;
        }
        if let Some(v) = self.region {
            event.region = v;
        }
        event.updated_at = Utc::now();
    }
}
