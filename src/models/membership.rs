use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::MembershipType;

/// A membership period for a member: what kind, from when, at what fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub member_id: Uuid,
    pub kind: MembershipType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub annual_fee: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMembership {
    pub member_id: Uuid,
    pub kind: MembershipType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub annual_fee: Decimal,
}

impl Membership {
    pub fn create(new: NewMembership) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            member_id: new.member_id,
            kind: new.kind,
            start_date: new.start_date,
            end_date: new.end_date,
            annual_fee: new.annual_fee,
            created_at: now,
            updated_at: now,
        }
    }
}

/// `end_date` uses the double-`Option` shape so an explicit `null` reopens
/// an ended membership.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipPatch {
    pub kind: Option<MembershipType>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub end_date: Option<Option<NaiveDate>>,
    pub annual_fee: Option<Decimal>,
}

impl MembershipPatch {
    pub fn apply(self, membership: &mut Membership) {
        if let Some(v) = self.kind {
            membership.kind = v;
        }
        if let Some(v) = self.start_date {
            membership.start_date = v;
        }
        if let Some(v) = self.end_date {
            membership.end_date = v;
        }
        if let Some(v) = self.annual_fee {
            membership.annual_fee = v;
        }
        membership.updated_at = Utc::now();
    }
}
