use std::sync::Arc;

use crate::authz::{Authorizer, CapabilityMap};
use crate::config::AppConfig;
use crate::models::{Event, Member, Membership, Parameter, Product};
use crate::store::{Collection, DocumentStore, MemoryStore};

/// Shared per-process state handed to every handler: one typed collection
/// per entity kind plus the injected authorizer.
#[derive(Clone)]
pub struct AppState {
    pub members: Collection<Member>,
    pub memberships: Collection<Membership>,
    pub products: Collection<Product>,
    pub events: Collection<Event>,
    pub params: Collection<Parameter>,
    pub authorizer: Arc<Authorizer>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: &AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let authorizer = Authorizer::new(CapabilityMap::standard(), config.authz.unscoped_policy);

        Self {
            members: Collection::new("members", Arc::clone(&store)),
            memberships: Collection::new("memberships", Arc::clone(&store)),
            products: Collection::new("products", Arc::clone(&store)),
            events: Collection::new("events", Arc::clone(&store)),
            params: Collection::new("params", store),
            authorizer: Arc::new(authorizer),
        }
    }
}
