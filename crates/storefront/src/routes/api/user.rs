//! User data API routes.
//!
//! JSON endpoints over the customer's profile, order history, and account
//! wishlist. Each handler validates its required identifier, delegates to the
//! [`UserDataSource`](crate::services::UserDataSource), and returns the result
//! unchanged.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use pantry_core::{Email, UserId, WishlistItemId};

use crate::error::{GatewayError, Operation, Result, set_sentry_user};
use crate::models::{Order, Profile, ProfileUpdate, WishlistItem};
use crate::state::AppState;

/// An identifier as sent by clients: JSON number or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn parse<T: std::str::FromStr>(&self) -> Option<T> {
        match self {
            Self::Number(n) => n.to_string().parse().ok(),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

/// `?userId=` query parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

/// Profile fields of a `PUT /api/user/profile` body.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn require_user_id(raw: Option<&str>) -> Result<UserId> {
    raw.and_then(|s| s.parse().ok())
        .ok_or(GatewayError::MissingUserId)
}

/// Decode a JSON body into its top-level fields.
///
/// An empty, malformed or non-object body yields no fields, so a missing
/// identifier is reported as a 400 by the handler instead of axum's generic
/// JSON rejection.
fn parse_body(body: &Bytes) -> Map<String, Value> {
    if body.is_empty() {
        return Map::new();
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed request body");
            Map::new()
        }
    }
}

/// Remove an identifier from the body fields.
///
/// Accepts a JSON number or a numeric string; anything else counts as absent.
fn take_id<T: std::str::FromStr>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let raw: RawId = serde_json::from_value(fields.remove(key)?).ok()?;
    raw.parse()
}

impl ProfileFields {
    /// Read the update fields left in the body once `userId` is taken.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfileFields` when a field is not a string or null.
    fn from_body(fields: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(fields)).map_err(GatewayError::InvalidProfileFields)
    }

    fn into_update(self) -> Result<ProfileUpdate> {
        let email = self
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(GatewayError::InvalidEmail)?;

        Ok(ProfileUpdate {
            name: self.name,
            email,
            phone: self.phone,
            image: self.image,
        })
    }
}

/// Get a user's profile.
///
/// GET /api/user/profile?userId=
///
/// Responds with `null` when no such user exists.
///
/// # Errors
///
/// Returns 400 if `userId` is missing and 500 if the lookup fails.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Option<Profile>>> {
    let user_id = require_user_id(query.user_id.as_deref())?;
    set_sentry_user(&user_id);

    let profile = state
        .user_data()
        .get_profile(user_id)
        .await
        .map_err(|e| GatewayError::delegate(Operation::FetchProfile, e))?;

    Ok(Json(profile))
}

/// Update a user's profile.
///
/// PUT /api/user/profile
///
/// Fields left out of the body are not changed.
///
/// # Errors
///
/// Returns 400 if `userId` is missing, a field has the wrong type, or
/// `email` is malformed, and 500 if the update fails.
#[instrument(skip(state, body))]
pub async fn update_profile(State(state): State<AppState>, body: Bytes) -> Result<Json<Profile>> {
    let mut fields = parse_body(&body);
    let user_id: UserId = take_id(&mut fields, "userId").ok_or(GatewayError::MissingUserId)?;
    set_sentry_user(&user_id);
    let update = ProfileFields::from_body(fields)?.into_update()?;

    let profile = state
        .user_data()
        .update_profile(user_id, &update)
        .await
        .map_err(|e| GatewayError::delegate(Operation::UpdateProfile, e))?;

    tracing::info!(%user_id, "Profile updated");
    Ok(Json(profile))
}

/// List a user's orders, newest first.
///
/// GET /api/user/orders?userId=
///
/// # Errors
///
/// Returns 400 if `userId` is missing and 500 if the lookup fails.
#[instrument(skip(state))]
pub async fn get_orders(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<Order>>> {
    let user_id = require_user_id(query.user_id.as_deref())?;
    set_sentry_user(&user_id);

    let orders = state
        .user_data()
        .list_orders(user_id)
        .await
        .map_err(|e| GatewayError::delegate(Operation::FetchOrders, e))?;

    Ok(Json(orders))
}

/// List a user's account wishlist.
///
/// GET /api/user/wishlist?userId=
///
/// # Errors
///
/// Returns 400 if `userId` is missing and 500 if the lookup fails.
#[instrument(skip(state))]
pub async fn get_wishlist(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<WishlistItem>>> {
    let user_id = require_user_id(query.user_id.as_deref())?;
    set_sentry_user(&user_id);

    let items = state
        .user_data()
        .list_wishlist(user_id)
        .await
        .map_err(|e| GatewayError::delegate(Operation::FetchWishlist, e))?;

    Ok(Json(items))
}

/// Delete one account wishlist item.
///
/// DELETE /api/user/wishlist
///
/// # Errors
///
/// Returns 400 if `wishlistItemId` is missing and 500 if the delete fails,
/// including when the item does not exist.
#[instrument(skip(state, body))]
pub async fn remove_wishlist_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>> {
    let mut fields = parse_body(&body);
    let item_id: WishlistItemId =
        take_id(&mut fields, "wishlistItemId").ok_or(GatewayError::MissingWishlistItemId)?;

    state
        .user_data()
        .delete_wishlist_item(item_id)
        .await
        .map_err(|e| GatewayError::delegate(Operation::RemoveWishlistItem, e))?;

    tracing::info!(%item_id, "Wishlist item removed");
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::routes::api::user_routes;
    use crate::test_support::{FakeUserData, sample_profile, test_state};

    fn app(data: &Arc<FakeUserData>) -> Router {
        Router::new()
            .nest("/api/user", user_routes())
            .with_state(test_state(Arc::clone(data)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_profile_returns_record() {
        let data = Arc::new(FakeUserData::default());
        data.insert_profile(sample_profile(7)).await;

        let (status, body) = send(app(&data), get("/api/user/profile?userId=7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 7);
        assert_eq!(body["email"], "user7@example.com");
        assert!(body.get("createdAt").is_some());
    }

    #[tokio::test]
    async fn test_get_profile_unknown_user_is_null() {
        let data = Arc::new(FakeUserData::default());
        let (status, body) = send(app(&data), get("/api/user/profile?userId=404")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_missing_user_id_is_bad_request() {
        let data = Arc::new(FakeUserData::default());
        for uri in [
            "/api/user/profile",
            "/api/user/orders",
            "/api/user/wishlist",
            "/api/user/orders?userId=",
            "/api/user/orders?userId=abc",
        ] {
            let (status, body) = send(app(&data), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({"error": "User ID is required"}), "{uri}");
        }
        assert_eq!(data.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_orders_delegate_failure() {
        let data = Arc::new(FakeUserData::default());
        data.fail.store(true, Ordering::SeqCst);

        let (status, body) = send(app(&data), get("/api/user/orders?userId=1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch user orders"}));
    }

    #[tokio::test]
    async fn test_failure_messages_per_route() {
        let data = Arc::new(FakeUserData::default());
        data.fail.store(true, Ordering::SeqCst);

        let cases = [
            (get("/api/user/profile?userId=1"), "Failed to fetch user profile"),
            (get("/api/user/wishlist?userId=1"), "Failed to fetch user wishlist"),
            (
                json_request("PUT", "/api/user/profile", &json!({"userId": 1, "name": "A"})),
                "Failed to update user profile",
            ),
            (
                json_request("DELETE", "/api/user/wishlist", &json!({"wishlistItemId": 1})),
                "Failed to remove wishlist item",
            ),
        ];
        for (request, message) in cases {
            let (status, body) = send(app(&data), request).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn test_get_orders_and_wishlist_pass_through() {
        let data = Arc::new(FakeUserData::default());
        data.seed_order(3, 100).await;
        data.seed_wishlist_item(3, 11, "p-11").await;
        data.seed_wishlist_item(4, 12, "p-12").await;

        let (status, body) = send(app(&data), get("/api/user/orders?userId=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 100);
        assert_eq!(body[0]["status"], "paid");

        let (status, body) = send(app(&data), get("/api/user/wishlist?userId=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["productId"], "p-11");
    }

    #[tokio::test]
    async fn test_update_profile_merges_fields() {
        let data = Arc::new(FakeUserData::default());
        data.insert_profile(sample_profile(5)).await;

        let request = json_request(
            "PUT",
            "/api/user/profile",
            &json!({"userId": "5", "name": "Ada", "email": "Ada@Example.COM"}),
        );
        let (status, body) = send(app(&data), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["email"], "Ada@example.com");
        assert_eq!(body["phone"], "555-0100");
    }

    #[tokio::test]
    async fn test_update_profile_validation() {
        let data = Arc::new(FakeUserData::default());

        let (status, body) = send(
            app(&data),
            json_request("PUT", "/api/user/profile", &json!({"name": "Ada"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "User ID is required"}));

        let (status, body) = send(
            app(&data),
            json_request(
                "PUT",
                "/api/user/profile",
                &json!({"userId": 1, "email": "not-an-email"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid email address"}));
        assert_eq!(data.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_mistyped_field() {
        let data = Arc::new(FakeUserData::default());
        data.insert_profile(sample_profile(5)).await;

        let request = json_request(
            "PUT",
            "/api/user/profile",
            &json!({"userId": 5, "phone": 5_550_100}),
        );
        let (status, body) = send(app(&data), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid profile fields"}));
        assert_eq!(data.calls.load(Ordering::SeqCst), 0);

        // Explicit nulls leave fields unchanged
        let request = json_request(
            "PUT",
            "/api/user/profile",
            &json!({"userId": 5, "phone": null, "name": "Ada"}),
        );
        let (status, body) = send(app(&data), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["phone"], "555-0100");
    }

    #[tokio::test]
    async fn test_remove_wishlist_item() {
        let data = Arc::new(FakeUserData::default());
        data.seed_wishlist_item(3, 11, "p-11").await;

        let (status, body) = send(
            app(&data),
            json_request("DELETE", "/api/user/wishlist", &json!({"wishlistItemId": 11})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
        assert!(data.wishlist.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_wishlist_item_requires_id() {
        let data = Arc::new(FakeUserData::default());

        for payload in ["{}", "", "not json", r#"{"wishlistItemId": ""}"#] {
            let request = Request::delete("/api/user/wishlist")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .unwrap();
            let (status, body) = send(app(&data), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert_eq!(body, json!({"error": "Wishlist item ID is required"}));
        }
        assert_eq!(data.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_wishlist_item_fails() {
        let data = Arc::new(FakeUserData::default());
        let (status, body) = send(
            app(&data),
            json_request("DELETE", "/api/user/wishlist", &json!({"wishlistItemId": 99})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to remove wishlist item"}));
    }
}
