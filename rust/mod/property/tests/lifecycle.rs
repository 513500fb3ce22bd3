//! Full create / read / update / delete cycle through the HTTP router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use estate_core::Module;
use property::PropertyModule;
use property::seed::SeedLoader;
use property::store::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

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

fn empty_router() -> Router {
    PropertyModule::new(Arc::new(MemoryStore::new())).routes()
}

#[tokio::test]
async fn property_lifecycle() {
    let router = empty_router();

    // Create.
    let (s, created) = api_call(
        &router,
        "POST",
        "/create",
        Some(json!({"title": "Loft", "city": "Paris", "price": 300000, "surface": 45})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["createdAt"], created["updatedAt"]);

    // List.
    let (s, list) = api_call(&router, "GET", "/", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id.as_str());

    // Read.
    let (s, got) = api_call(&router, "GET", &format!("/get/{id}"), None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(got, created);

    // Partial update.
    let (s, updated) = api_call(
        &router,
        "PUT",
        &format!("/update/{id}"),
        Some(json!({"price": 310000})),
    )
    .await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(updated["price"].as_f64(), Some(310000.0));
    assert_eq!(updated["title"], "Loft");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    // Delete.
    let (s, body) = api_call(&router, "DELETE", &format!("/delete/{id}"), None).await;
    assert_eq!(s, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (s, _) = api_call(&router, "GET", &format!("/get/{id}"), None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
    let (s, _) = api_call(&router, "DELETE", &format!("/delete/{id}"), None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let (_, list) = api_call(&router, "GET", "/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn invalid_create_leaves_store_unchanged() {
    let router = empty_router();
    let (s, body) = api_call(
        &router,
        "POST",
        "/create",
        Some(json!({"title": "", "city": "Paris", "price": 1, "surface": 1})),
    )
    .await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["path"], json!(["title"]));

    let (_, list) = api_call(&router, "GET", "/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn seeded_records_are_served() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("properties.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "1", "title": "Appartement Haussmannien", "city": "Paris", "price": 850000, "surface": 95,
             "createdAt": "2024-01-15T10:00:00Z", "updatedAt": "2024-01-15T10:00:00Z"},
            {"id": "2", "title": "Maison avec jardin", "city": "Lyon", "price": 420000, "surface": 130,
             "createdAt": "2024-02-03T09:30:00Z", "updatedAt": "2024-02-10T14:00:00Z"}
        ]"#,
    )
    .unwrap();

    let store = Arc::new(MemoryStore::new());
    assert_eq!(SeedLoader::load_into(&path, store.as_ref()).unwrap(), 2);
    let router = PropertyModule::new(store).routes();

    let (_, list) = api_call(&router, "GET", "/", None).await;
    let ids: Vec<&str> = list.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let (s, lyon) = api_call(&router, "GET", "/get/2", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(lyon["city"], "Lyon");

    // A fresh create never collides with a seeded id.
    let (s, created) = api_call(
        &router,
        "POST",
        "/create",
        Some(json!({"title": "Studio", "city": "Nice", "price": 150000, "surface": 20})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);
    assert!(!["1", "2"].contains(&created["id"].as_str().unwrap()));
}
