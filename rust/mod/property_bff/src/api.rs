use async_trait::async_trait;
use estate_client::{ApiError, PropertyClient};
use property::model::{NewProperty, Property, PropertyPatch};

/// The backend operations the pages need.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Property>, ApiError>;
    async fn get(&self, id: &str) -> Result<Property, ApiError>;
    async fn create(&self, payload: &NewProperty) -> Result<Property, ApiError>;
    async fn update(&self, id: &str, patch: &PropertyPatch) -> Result<Property, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl PropertyApi for PropertyClient {
    async fn list(&self) -> Result<Vec<Property>, ApiError> {
        PropertyClient::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Property, ApiError> {
        PropertyClient::get(self, id).await
    }

    async fn create(&self, payload: &NewProperty) -> Result<Property, ApiError> {
        PropertyClient::create(self, payload).await
    }

    async fn update(&self, id: &str, patch: &PropertyPatch) -> Result<Property, ApiError> {
        PropertyClient::update(self, id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        PropertyClient::delete(self, id).await
    }
}
