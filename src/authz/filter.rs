use super::types::{Region, RegionScope};

/// Record types that carry an optional region attribute.
pub trait RegionScoped {
    fn region(&self) -> Option<Region>;
}

/// Filter a batch of records against a resolved scope.
///
/// Pure and stable: surviving records keep their input order. Unrestricted
/// scopes return the input unchanged; otherwise a record survives only when
/// its region is in the scope's set, so records with a missing region are
/// dropped. Linear in the number of records.
pub fn filter_by_scope<T: RegionScoped>(records: Vec<T>, scope: &RegionScope) -> Vec<T> {
    match scope {
        RegionScope::Unrestricted => records,
        RegionScope::Regions(set) => records
            .into_iter()
            .filter(|record| match record.region() {
                Some(region) => set.contains(&region),
                None => false,
            })
            .collect(),
    }
}
