use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::{Region, RegionScoped};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Suspended,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipType {
    Full,
    Family,
    Honorary,
    Supporter,
}

/// A club member. The `region` attribute drives regional visibility; a
/// member without a region is only visible to unrestricted callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    #[serde(default)]
    pub infix: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    pub status: MembershipStatus,
    pub membership_type: MembershipType,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload; the server assigns the identifier and timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub first_name: String,
    #[serde(default)]
    pub infix: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default = "default_status")]
    pub status: MembershipStatus,
    pub membership_type: MembershipType,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> MembershipStatus {
    MembershipStatus::Active
}

impl Member {
    pub fn create(new: NewMember) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            infix: new.infix,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            street: new.street,
            postal_code: new.postal_code,
            city: new.city,
            region: new.region,
            status: new.status,
            membership_type: new.membership_type,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl RegionScoped for Member {
    fn region(&self) -> Option<Region> {
        self.region
    }
}

/// Merge-patch payload: each provided field overwrites the stored value,
/// absent fields are untouched. Last writer wins; there is no versioning.
/// Optional attributes use the double-`Option` shape so an explicit `null`
/// clears the stored value instead of being mistaken for an absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberPatch {
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub infix: Option<Option<String>>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub street: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub region: Option<Option<Region>>,
    pub status: Option<MembershipStatus>,
    pub membership_type: Option<MembershipType>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub notes: Option<Option<String>>,
}

impl MemberPatch {
    pub fn apply(self, member: &mut Member) {
        if let Some(v) = self.first_name {
            member.first_name = v;
        }
        if let Some(v) = self.infix {
            member.infix = v;
        }
        if let Some(v) = self.last_name {
            member.last_name = v;
        }
        if let Some(v) = self.email {
            member.email = v;
        }
        if let Some(v) = self.phone {
            member.phone = v;
        }
        if let Some(v) = self.street {
            member.street = v;
        }
        if let Some(v) = self.postal_code {
            member.postal_code = v;
        }
        if let Some(v) = self.city {
            member.city = v;
        }
        if let Some(v) = self.region {
            member.region = v;
        }
        if let Some(v) = self.status {
            member.status = v;
        }
        if let Some(v) = self.membership_type {
            member.membership_type = v;
        }
        if let Some(v) = self.notes {
            member.notes = v;
        }
        member.updated_at = Utc::now();
    }
}
