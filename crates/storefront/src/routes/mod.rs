//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (store reachability)
//!
//! # Products
//! GET  /api/products                - Product listing (?category=&q= filtering)
//! GET  /api/products/{id}           - Product detail
//! GET  /api/products/{id}/viewer    - Assembled 3D scene (?color=&model=)
//! POST /api/products/{id}/model     - Custom model upload (multipart)
//!
//! # Cart
//! GET  /api/cart                    - Current user's cart
//! POST /api/cart/add                - Add/upsert a line
//! POST /api/cart/update             - Overwrite a line's quantity
//! POST /api/cart/remove             - Remove a line
//! POST /api/cart/clear              - Clear the cart
//!
//! # Wishlist
//! GET  /api/wishlist                - Current user's wishlist
//! POST /api/wishlist/add            - Save a product (duplicate -> info notice)
//! POST /api/wishlist/remove         - Remove a product
//!
//! # Checkout & Orders
//! POST /api/checkout                - Place an order from the cart
//! GET  /api/orders                  - Order history, newest first
//!
//! # Auth
//! POST /auth/register               - Sign up via the store auth API
//! POST /auth/login                  - Password sign-in
//! POST /auth/logout                 - Clear the session
//! GET  /auth/me                     - Current session identity
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod viewer;
pub mod wishlist;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;
use crate::viewer::upload::MAX_UPLOAD_BYTES;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    // Room for multipart framing on top of the model itself
    #[allow(clippy::cast_possible_truncation)]
    let upload_limit = MAX_UPLOAD_BYTES as usize + 64 * 1024;

    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/viewer", get(viewer::scene))
        .route(
            "/{id}/model",
            post(viewer::upload_model).layer(DefaultBodyLimit::max(upload_limit)),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/checkout", post(checkout::place))
        .route("/api/orders", get(orders::index))
        .nest("/auth", auth_routes())
}
