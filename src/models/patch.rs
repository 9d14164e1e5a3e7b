use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit JSON `null` from an absent field in merge-patch
/// payloads. Combined with `#[serde(default)]`: an absent field deserializes
/// to `None` (leave the stored value untouched), an explicit `null` to
/// `Some(None)` (clear the stored value), and a value to `Some(Some(v))`.
pub fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
