//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Storefront (catalog grid, cart panel)
//! GET  /health                   - Health check
//!
//! # Products
//! GET  /products/{id}/quick-view - Quick view fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                     - Cart items and total
//! POST /cart/add                 - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update              - Update quantity (returns cart items fragment)
//! POST /cart/remove              - Remove item (returns cart items fragment)
//! GET  /cart/count               - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout                 - Show total and clear the cart
//!
//! # Notifications
//! GET  /toast                    - Current toast (fragment, empty when none)
//! ```

pub mod cart;
pub mod home;
pub mod products;
pub mod toast;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::middleware::{request_id_middleware, trace_layer};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/toast", get(toast::current))
}

/// Build the storefront application with its middleware stack.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(trace_layer())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
