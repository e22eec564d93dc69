//! Error handling for the user data API, with Sentry integration.
//!
//! Every `/api/user` handler returns `Result<T, GatewayError>`. Client errors
//! carry a fixed message; delegate failures are captured to Sentry and
//! answered with a generic message so no internal detail reaches the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use pantry_core::EmailError;

use crate::db::RepositoryError;

/// The data-access call a handler was making when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchProfile,
    UpdateProfile,
    FetchOrders,
    FetchWishlist,
    RemoveWishlistItem,
}

impl Operation {
    /// Client-facing message for a failure of this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::FetchProfile => "Failed to fetch user profile",
            Self::UpdateProfile => "Failed to update user profile",
            Self::FetchOrders => "Failed to fetch user orders",
            Self::FetchWishlist => "Failed to fetch user wishlist",
            Self::RemoveWishlistItem => "Failed to remove wishlist item",
        }
    }
}

/// Error type for user data API handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// `userId` is missing, empty, or not a valid user ID.
    #[error("User ID is required")]
    MissingUserId,

    /// `wishlistItemId` is missing, empty, or not a valid ID.
    #[error("Wishlist item ID is required")]
    MissingWishlistItemId,

    /// A profile update carried a malformed email.
    #[error("Invalid email address")]
    InvalidEmail(#[source] EmailError),

    /// A profile update field had the wrong JSON type.
    #[error("Invalid profile fields: {0}")]
    InvalidProfileFields(#[source] serde_json::Error),

    /// The data-access layer failed.
    #[error("{}: {source}", .operation.failure_message())]
    Delegate {
        operation: Operation,
        #[source]
        source: RepositoryError,
    },
}

impl GatewayError {
    /// Wrap a repository error raised during `operation`.
    #[must_use]
    pub fn delegate(operation: Operation, source: RepositoryError) -> Self {
        Self::Delegate { operation, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingUserId
            | Self::MissingWishlistItemId
            | Self::InvalidEmail(_)
            | Self::InvalidProfileFields(_) => StatusCode::BAD_REQUEST,
            Self::Delegate { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client.
    #[must_use]
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingUserId => "User ID is required",
            Self::MissingWishlistItemId => "Wishlist item ID is required",
            Self::InvalidEmail(_) => "Invalid email address",
            Self::InvalidProfileFields(_) => "Invalid profile fields",
            Self::Delegate { operation, .. } => operation.failure_message(),
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Delegate { .. }) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "User data request failed"
            );
        }

        let body = ErrorBody {
            error: self.client_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `GatewayError`.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Set the Sentry user context for the current request.
pub fn set_sentry_user(user_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
