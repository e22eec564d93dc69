//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Session wishlist
//! GET  /wishlist               - Wishlist items (JSON)
//! GET  /wishlist/count         - Wishlist count badge (fragment)
//! GET  /wishlist/contains/{product_id} - Membership check (JSON)
//! POST /wishlist/toggle        - Toggle product (returns button fragment, triggers wishlist-updated)
//! POST /wishlist/remove        - Remove product (returns count fragment, triggers wishlist-updated)
//!
//! # User data API
//! GET    /api/user/profile     - Profile (?userId=)
//! PUT    /api/user/profile     - Partial profile update
//! GET    /api/user/orders      - Order history (?userId=)
//! GET    /api/user/wishlist    - Account wishlist (?userId=)
//! DELETE /api/user/wishlist    - Remove account wishlist item
//! ```

pub mod api;
pub mod health;
pub mod wishlist;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the session wishlist router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/count", get(wishlist::count))
        .route("/contains/{product_id}", get(wishlist::contains))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/wishlist", wishlist_routes())
        .nest("/api/user", api::user_routes())
}

/// Assemble the application router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn build_router<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    routes()
        .layer(session_layer)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
