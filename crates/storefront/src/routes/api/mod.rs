//! JSON API routes.

pub mod user;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the user data API router (mounted at `/api/user`).
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/orders", get(user::get_orders))
        .route(
            "/wishlist",
            get(user::get_wishlist).delete(user::remove_wishlist_item),
        )
}
