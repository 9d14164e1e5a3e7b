use serde::Serialize;

use crate::authz::RegionScope;

/// Envelope for list endpoints. Single-record endpoints return the record
/// directly; lists carry the count and the resolved scope so the client can
/// show which regions it is looking at.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub metadata: ListMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMetadata {
    pub total_count: usize,
    pub region: String,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, scope: &RegionScope) -> Self {
        let metadata = ListMetadata {
            total_count: data.len(),
            region: scope.describe(),
        };
        Self { data, metadata }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::Region;

    #[test]
    fn metadata_reflects_count_and_scope() {
        let response = ListResponse::new(vec![1, 2, 3], &RegionScope::of([Region::Zuid]));
        assert_eq!(response.metadata.total_count, 3);
        assert_eq!(response.metadata.region, "Zuid");

        let response = ListResponse::new(Vec::<i32>::new(), &RegionScope::Unrestricted);
        assert_eq!(response.metadata.total_count, 0);
        assert_eq!(response.metadata.region, "all");
    }
}
