//! Route-level tests exercising the JSON API in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use laced_core::ProductId;
use laced_storefront::config::StorefrontConfig;
use laced_storefront::models::{ColorVariant, Product, SizeStock};
use laced_storefront::routes;
use laced_storefront::state::AppState;
use laced_storefront::stores::{CartStore, CatalogStore, OrderStore};

fn app() -> axum::Router {
    let catalog = CatalogStore::new();
    catalog
        .upsert(Product {
            id: ProductId::new(1),
            name: "Court Classic".to_string(),
            description: "Everyday sneaker".to_string(),
            category: "casual".to_string(),
            brand: "Laced".to_string(),
            price: Decimal::new(1299, 0),
            discount_price: Some(Decimal::new(899, 0)),
            sizes: vec![SizeStock { size: 9, quantity: 3 }],
            colors: vec![ColorVariant {
                name: "Black".to_string(),
                code: "#000000".to_string(),
                images: vec!["court-black-1.jpg".to_string()],
            }],
            featured: true,
            created_at: Utc::now(),
        })
        .unwrap();
    let state = AppState::with_stores(
        StorefrontConfig::default(),
        catalog,
        CartStore::new(),
        OrderStore::new(),
    );
    routes::routes().with_state(state)
}

fn json_request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
    builder.body(body).expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_cart_requires_user_header() {
    let response = app()
        .oneshot(json_request("GET", "/cart", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_view_and_count() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/cart/items",
            Some("1"),
            Some(json!({ "product_id": 1, "size": 9, "color": "Black", "quantity": 2 })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let cart = body_json(response).await;
    assert_eq!(cart["count"], 2);
    assert_eq!(cart["items"][0]["name"], "Court Classic");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/cart/count", Some("1"), None))
        .await
        .expect("response");
    let count = body_json(response).await;
    assert_eq!(count["count"], 2);

    // Another user still has an empty cart.
    let response = app
        .oneshot(json_request("GET", "/cart/count", Some("2"), None))
        .await
        .expect("response");
    let count = body_json(response).await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/cart/items",
            Some("1"),
            Some(json!({ "product_id": 404, "size": 9, "color": "Black" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_conflict_on_shortfall() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/cart/items",
            Some("1"),
            Some(json!({ "product_id": 1, "size": 9, "color": "Black", "quantity": 4 })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/checkout", Some("1"), None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = body_json(response).await;
    assert!(error["error"].as_str().expect("message").contains("requested 4"));

    // Stock untouched: the whole quantity is still available to others.
    let response = app
        .oneshot(json_request("GET", "/products/1/stock/9", None, None))
        .await
        .expect("response");
    let stock = body_json(response).await;
    assert_eq!(stock["available"], 3);
}

#[tokio::test]
async fn test_checkout_success_and_dashboard() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/cart/items",
            Some("1"),
            Some(json!({ "product_id": 1, "size": 9, "color": "Black", "quantity": 3 })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/checkout", Some("1"), None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let order = body_json(response).await;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["lines"][0]["quantity"], 3);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/admin/dashboard", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["total_orders"], 1);
    assert_eq!(stats["open_orders"], 1);
    assert_eq!(stats["total_products"], 1);

    // The checkout emptied the cart.
    let response = app
        .oneshot(json_request("GET", "/cart/count", Some("1"), None))
        .await
        .expect("response");
    let count = body_json(response).await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_browsing_projections() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("GET", "/products/featured", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let featured = body_json(response).await;
    assert_eq!(featured.as_array().expect("array").len(), 1);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/categories", None, None))
        .await
        .expect("response");
    assert_eq!(body_json(response).await, json!(["casual"]));

    let response = app
        .oneshot(json_request("GET", "/products/99", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
