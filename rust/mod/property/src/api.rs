use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::Value;

use estate_core::{FieldError, ServiceError};

use crate::model::Property;
use crate::service::PropertyService;
use crate::validate::{validate_create, validate_update};

/// Shared application state.
pub type AppState = Arc<PropertyService>;

/// Build the property router.
///
/// Routes:
/// - `GET    /`: list all properties
/// - `GET    /get/{id}`: get one property
/// - `POST   /create`: create a property
/// - `PUT    /update/{id}`: partially update a property
/// - `DELETE /delete/{id}`: delete a property
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_properties))
        .route("/get/{id}", get(get_property))
        .route("/create", post(create_property))
        .route("/update/{id}", put(update_property))
        .route("/delete/{id}", delete(delete_property))
        .with_state(state)
}

fn not_found() -> ServiceError {
    ServiceError::NotFound("Property not found".into())
}

/// Unwrap a JSON body, reporting unreadable bodies as validation errors.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ServiceError::Validation(vec![FieldError::body(rejection.body_text())]))
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

async fn list_properties(State(svc): State<AppState>) -> Result<Json<Vec<Property>>, ServiceError> {
    Ok(Json(svc.find_all()?))
}

// ---------------------------------------------------------------------------
// GET /get/{id}
// ---------------------------------------------------------------------------

async fn get_property(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ServiceError> {
    svc.find_by_id(&id)?.map(Json).ok_or_else(not_found)
}

// ---------------------------------------------------------------------------
// POST /create
// ---------------------------------------------------------------------------

async fn create_property(
    State(svc): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ServiceError> {
    let payload = validate_create(&json_body(body)?)?;
    let record = svc.create(payload)?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ---------------------------------------------------------------------------
// PUT /update/{id}
// ---------------------------------------------------------------------------

async fn update_property(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Property>, ServiceError> {
    let patch = validate_update(&json_body(body)?)?;
    svc.update(&id, &patch)?.map(Json).ok_or_else(not_found)
}

// ---------------------------------------------------------------------------
// DELETE /delete/{id}
// ---------------------------------------------------------------------------

async fn delete_property(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    if svc.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RecordStore};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(PropertyService::new(Arc::new(MemoryStore::new()))))
    }

    async fn api_call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let body = match body {
            Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
            None => Body::empty(),
        };
        let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    fn loft() -> Value {
        serde_json::json!({"title": "Loft", "city": "Paris", "price": 300000, "surface": 45})
    }

    #[tokio::test]
    async fn list_starts_empty() {
        let router = test_router();
        let (s, body) = api_call(&router, "GET", "/", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn create_returns_201_with_record() {
        let router = test_router();
        let (s, body) = api_call(&router, "POST", "/create", Some(loft())).await;
        assert_eq!(s, StatusCode::CREATED);
        assert!(body["id"].is_string());
        assert_eq!(body["createdAt"], body["updatedAt"]);
        assert_eq!(body["price"].as_f64(), Some(300000.0));
        assert!(body.get("description").is_none());

        let (_, list) = api_call(&router, "GET", "/", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_validation_failure_is_400() {
        let router = test_router();
        for (field, value) in [
            ("title", serde_json::json!("")),
            ("price", serde_json::json!(0)),
            ("price", serde_json::json!(-5)),
            ("surface", serde_json::json!(0)),
            ("title", serde_json::json!("a".repeat(101))),
        ] {
            let mut body = loft();
            body[field] = value;
            let (s, resp) = api_call(&router, "POST", "/create", Some(body)).await;
            assert_eq!(s, StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(resp["error"], "Validation error");
            assert_eq!(resp["details"][0]["path"][0], field);
            let message = resp["details"][0]["message"].as_str().unwrap().to_lowercase();
            assert!(message.contains(field), "{message}");
        }
        let (_, list) = api_call(&router, "GET", "/", None).await;
        assert_eq!(list, serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let router = test_router();
        let req = Request::builder()
            .method("POST")
            .uri("/create")
            .header("content-type", "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["details"][0]["path"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn get_unknown_is_404() {
        let router = test_router();
        let (s, body) = api_call(&router, "GET", "/get/does-not-exist", None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Property not found");
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let router = test_router();
        let (s, _) = api_call(
            &router,
            "PUT",
            "/update/unknown",
            Some(serde_json::json!({"price": -1})),
        )
        .await;
        assert_eq!(s, StatusCode::BAD_REQUEST);

        let (s, _) = api_call(
            &router,
            "PUT",
            "/update/unknown",
            Some(serde_json::json!({"price": 1})),
        )
        .await;
        assert_eq!(s, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_with_empty_body_touches_updated_at() {
        let router = test_router();
        let (_, created) = api_call(&router, "POST", "/create", Some(loft())).await;
        let id = created["id"].as_str().unwrap();

        let (s, updated) = api_call(
            &router,
            "PUT",
            &format!("/update/{id}"),
            Some(serde_json::json!({})),
        )
        .await;
        assert_eq!(s, StatusCode::OK);
        assert_ne!(updated["updatedAt"], created["updatedAt"]);
        for key in ["id", "title", "city", "price", "surface", "createdAt"] {
            assert_eq!(updated[key], created[key], "{key}");
        }
    }

    #[tokio::test]
    async fn delete_unknown_is_404() {
        let router = test_router();
        let (s, _) = api_call(&router, "DELETE", "/delete/ghost", None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
    }

    /// A store whose every operation fails.
    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn list(&self) -> Result<Vec<Property>, ServiceError> {
            Err(ServiceError::Storage("disk on fire".into()))
        }
        fn get(&self, _id: &str) -> Result<Option<Property>, ServiceError> {
            Err(ServiceError::Storage("disk on fire".into()))
        }
        fn insert(&self, _record: Property) -> Result<Property, ServiceError> {
            Err(ServiceError::Internal("lock poisoned".into()))
        }
        fn update(
            &self,
            _id: &str,
            _apply: &mut dyn FnMut(&mut Property),
        ) -> Result<Option<Property>, ServiceError> {
            Err(ServiceError::Internal("lock poisoned".into()))
        }
        fn remove(&self, _id: &str) -> Result<bool, ServiceError> {
            Err(ServiceError::Internal("lock poisoned".into()))
        }
        fn len(&self) -> Result<usize, ServiceError> {
            Err(ServiceError::Internal("lock poisoned".into()))
        }
        fn replace_all(&self, _records: Vec<Property>) -> Result<(), ServiceError> {
            Err(ServiceError::Internal("lock poisoned".into()))
        }
    }

    #[tokio::test]
    async fn store_failures_become_generic_500() {
        let router = router(Arc::new(PropertyService::new(Arc::new(BrokenStore))));
        let calls = [
            ("GET", "/", None),
            ("GET", "/get/1", None),
            ("POST", "/create", Some(loft())),
            ("PUT", "/update/1", Some(serde_json::json!({"city": "Lyon"}))),
            ("DELETE", "/delete/1", None),
        ];
        for (method, uri, body) in calls {
            let (s, resp) = api_call(&router, method, uri, body).await;
            assert_eq!(s, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
            assert_eq!(resp["error"], "Internal server error");
            let text = resp.to_string();
            assert!(!text.contains("fire") && !text.contains("poisoned"));
        }
    }
}
