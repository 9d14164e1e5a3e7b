use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form configuration parameter, keyed by name and upserted whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
            updated_at: Utc::now(),
        }
    }
}
