pub mod format;

pub use format::{ListMetadata, ListResponse};
