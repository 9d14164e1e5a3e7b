use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Club-shop article (clothing, patches, merchandise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn create(new: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            price: new.price,
            active: new.active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// `description` uses the double-`Option` shape so an explicit `null`
/// clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::patch::clearable")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.active {
            product.active = v;
        }
        product.updated_at = Utc::now();
    }
}
