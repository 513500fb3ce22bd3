pub mod api;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use estate_core::Module;

use service::PropertyService;
use store::RecordStore;

/// Property module: real-estate listings CRUD over an in-memory store.
pub struct PropertyModule {
    service: Arc<PropertyService>,
}

impl PropertyModule {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            service: Arc::new(PropertyService::new(store)),
        }
    }
}

impl Module for PropertyModule {
    fn name(&self) -> &str {
        "property"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
