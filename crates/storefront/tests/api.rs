//! Router-level tests for the storefront API.
//!
//! These drive the real router with `tower::ServiceExt::oneshot` against a
//! state whose store client points nowhere: only routes that never reach
//! the store (catalog, viewer scene assembly, auth gating) are exercised.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use tower::ServiceExt;

use solstice_storefront::config::{StoreConfig, StorefrontConfig};
use solstice_storefront::middleware;
use solstice_storefront::routes;
use solstice_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        store: StoreConfig {
            // Nothing listens here; store-touching routes are not driven
            project_url: "http://127.0.0.1:9".to_string(),
            anon_key: "anon".to_string(),
            service_key: SecretString::from("service"),
        },
        upload_dir: PathBuf::from("target/test-uploads"),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

fn app() -> Router {
    let state = AppState::new(test_config()).unwrap();
    let session_layer = middleware::create_session_layer(state.config());

    routes::routes().layer(session_layer).with_state(state)
}

async fn get(path: &str) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn post_json(path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn listing_returns_full_catalog() {
    let (status, body) = get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn listing_filters_by_category_and_query() {
    let (status, body) = get("/api/products?category=Footwear&q=x1").await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "HyperSonic X1");
}

#[tokio::test]
async fn listing_with_unmatched_query_is_empty() {
    let (status, body) = get("/api/products?category=Accessories&q=x1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn product_detail_by_id() {
    let (status, body) = get("/api/products/hypersonic-x1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "HyperSonic X1");
    assert_eq!(body["category"], "Footwear");
}

#[tokio::test]
async fn unknown_product_is_404() {
    let (status, body) = get("/api/products/no-such-product").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["level"], "error");
}

#[tokio::test]
async fn viewer_scene_defaults_to_product_color() {
    let (status, body) = get("/api/products/velocity-pro/viewer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scene"]["tint"], "#00d9ff");
    // Pan stays disabled on the orbit rig
    assert_eq!(body["scene"]["orbit"]["pan_enabled"], false);
}

#[tokio::test]
async fn viewer_scene_applies_selected_color() {
    let (status, body) = get("/api/products/velocity-pro/viewer?color=%2322c55e").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scene"]["tint"], "#22c55e");

    // Every tintable material follows the selection
    fn check(node: &serde_json::Value, tint: &str) {
        let material = &node["material"];
        if material["tintable"] == true {
            assert_eq!(material["color"], tint);
        }
        if let Some(children) = node["children"].as_array() {
            for child in children {
                check(child, tint);
            }
        }
    }
    check(&body["scene"]["root"], "#22c55e");
}

#[tokio::test]
async fn viewer_scene_rejects_unavailable_color() {
    // #ff006e is not in Velocity Pro's color list
    let (status, body) = get("/api/products/velocity-pro/viewer?color=%23ff006e").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["level"], "error");
}

#[tokio::test]
async fn viewer_scene_uses_bundled_model_when_present() {
    let (status, body) = get("/api/products/hypersonic-x1/viewer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scene"]["root"]["geometry"]["kind"], "external");
    assert_eq!(
        body["scene"]["root"]["geometry"]["url"],
        "/models/black_sneakers.glb"
    );
}

#[tokio::test]
async fn cart_requires_authentication() {
    let (status, body) = get("/api/cart").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["level"], "error");

    let (status, _) = post_json(
        "/api/cart/add",
        serde_json::json!({ "product_id": "hypersonic-x1", "color": "#a855f7" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wishlist_orders_and_checkout_require_authentication() {
    for path in ["/api/wishlist", "/api/orders"] {
        let (status, _) = get(path).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
    }

    let (status, _) = post_json(
        "/api/checkout",
        serde_json::json!({
            "shipping_address": {
                "full_name": "Ada Shopper",
                "address": "1 Main St",
                "city": "Springfield",
                "postal_code": "12345"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_malformed_email_before_any_store_call() {
    // The store client points at a closed port; a 422 proves validation
    // fired before any network attempt.
    let (status, body) = post_json(
        "/auth/register",
        serde_json::json!({ "email": "not-an-email", "password": "long-enough-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["level"], "error");
}

#[tokio::test]
async fn me_is_anonymous_without_session() {
    let (status, body) = get("/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].is_null());
}
