//! In-memory backend for handler tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use estate_client::ApiError;
use estate_core::{FieldError, ServiceError};
use property::model::{NewProperty, Property, PropertyPatch};
use property::validate::{validate_create, validate_update};

use crate::api::PropertyApi;

#[derive(Default)]
pub struct FakeApi {
    pub records: Mutex<Vec<Property>>,
    next_id: AtomicU64,
    pub fail_list: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_save: AtomicBool,
    /// Returned as a 400 by the next create/update when set.
    pub reject_with: Mutex<Option<Vec<FieldError>>>,
}

fn unavailable() -> ApiError {
    ApiError::Server {
        status: 500,
        message: "Internal server error".into(),
    }
}

fn to_api_error(e: ServiceError) -> ApiError {
    match e {
        ServiceError::Validation(details) => ApiError::Validation { details },
        other => ApiError::Decode(other.to_string()),
    }
}

impl FakeApi {
    pub fn with_cities(cities: &[&str]) -> Self {
        let api = FakeApi::default();
        for city in cities {
            api.insert(city);
        }
        api
    }

    pub fn insert(&self, city: &str) -> Property {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let record = NewProperty {
            title: format!("Bien {id}"),
            city: city.into(),
            price: 100_000.0 * id as f64,
            surface: 20.0 * id as f64,
            description: None,
        }
        .into_property(id.to_string(), estate_core::now());
        self.records.lock().unwrap().push(record.clone());
        record
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn rejection(&self) -> Option<ApiError> {
        if self.fail_save.load(Ordering::Relaxed) {
            return Some(unavailable());
        }
        self.reject_with
            .lock()
            .unwrap()
            .take()
            .map(|details| ApiError::Validation { details })
    }
}

#[async_trait]
impl PropertyApi for FakeApi {
    async fn list(&self) -> Result<Vec<Property>, ApiError> {
        if self.fail_list.load(Ordering::Relaxed) {
            return Err(unavailable());
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Property, ApiError> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Property not found".into()))
    }

    async fn create(&self, payload: &NewProperty) -> Result<Property, ApiError> {
        if let Some(e) = self.rejection() {
            return Err(e);
        }
        let payload = validate_create(&serde_json::to_value(payload).unwrap()).map_err(to_api_error)?;
        let record = self.insert(&payload.city);
        let mut records = self.records.lock().unwrap();
        let stored = records.iter_mut().find(|p| p.id == record.id).unwrap();
        *stored = payload.into_property(record.id.clone(), record.created_at);
        Ok(stored.clone())
    }

    async fn update(&self, id: &str, patch: &PropertyPatch) -> Result<Property, ApiError> {
        if let Some(e) = self.rejection() {
            return Err(e);
        }
        let patch = validate_update(&serde_json::to_value(patch).unwrap()).map_err(to_api_error)?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound("Property not found".into()))?;
        patch.apply_to(record);
        record.updated_at = estate_core::next_timestamp(record.updated_at);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if self.fail_delete.load(Ordering::Relaxed) {
            return Err(unavailable());
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|p| p.id != id);
        if records.len() == before {
            return Err(ApiError::NotFound("Property not found".into()));
        }
        Ok(())
    }
}
