//! Session wishlist access.
//!
//! [`SessionWishlist`] is the only way handlers reach the shopper's wishlist.
//! It loads the [`Wishlist`] stored under [`session_keys::WISHLIST`], exposes
//! read-only views of it, and writes every change back to the session store
//! before returning.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn toggle(mut wishlist: SessionWishlist, Form(form): Form<ToggleForm>) -> Response {
//!     let outcome = wishlist.add_to_wishlist(form.into_product()?).await?;
//!     ...
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tower_sessions::Session;

use pantry_core::{ProductId, Wishlist, WishlistProduct, WishlistToggle};

use crate::error::ErrorBody;
use crate::models::session_keys;

/// Extractor giving a handler the current session's wishlist.
///
/// Requests that did not pass through the session layer are rejected with
/// [`WishlistRejection::MissingSessionScope`]; that is a router
/// misconfiguration, not a shopper error.
pub struct SessionWishlist {
    session: Session,
    wishlist: Wishlist,
}

/// Why a [`SessionWishlist`] could not be extracted.
#[derive(Debug, Error)]
pub enum WishlistRejection {
    /// No session layer is installed for this route.
    #[error("wishlist accessed outside a session scope")]
    MissingSessionScope,

    /// The session store failed or held unreadable wishlist data.
    #[error("failed to load wishlist from session: {0}")]
    Load(#[source] tower_sessions::session::Error),
}

impl IntoResponse for WishlistRejection {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::MissingSessionScope => {
                tracing::error!(error = %self, "SessionManagerLayer is not installed for this route");
                "Wishlist accessed outside a session scope"
            }
            Self::Load(_) => {
                tracing::error!(error = %self, "Failed to load wishlist");
                "Failed to load wishlist"
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { error: message }),
        )
            .into_response()
    }
}

/// A wishlist change could not be saved.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("failed to save wishlist to session: {0}")]
    Persist(#[from] tower_sessions::session::Error),
}

impl IntoResponse for WishlistError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(error = %self, sentry_event_id = %event_id, "Wishlist update failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Failed to update wishlist",
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for SessionWishlist
where
    S: Send + Sync,
{
    type Rejection = WishlistRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(WishlistRejection::MissingSessionScope)?;

        let wishlist = session
            .get::<Wishlist>(session_keys::WISHLIST)
            .await
            .map_err(WishlistRejection::Load)?
            .unwrap_or_default();

        Ok(Self { session, wishlist })
    }
}

impl SessionWishlist {
    /// Current entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistProduct] {
        self.wishlist.items()
    }

    /// Owned copy of the current entries.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WishlistProduct> {
        self.wishlist.items().to_vec()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wishlist.len()
    }

    /// Whether the wishlist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wishlist.is_empty()
    }

    /// Whether a product is in the wishlist.
    #[must_use]
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.wishlist.is_in_wishlist(id)
    }

    /// Toggle a product and save the result to the session.
    ///
    /// A [`WishlistToggle::Full`] outcome leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Persist` if the session cannot be written.
    pub async fn add_to_wishlist(
        &mut self,
        product: WishlistProduct,
    ) -> Result<WishlistToggle, WishlistError> {
        let outcome = self.wishlist.add_to_wishlist(product);
        if outcome != WishlistToggle::Full {
            self.save().await?;
        }
        Ok(outcome)
    }

    /// Remove a product and save the result to the session.
    ///
    /// Removing an absent product does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Persist` if the session cannot be written.
    pub async fn remove_from_wishlist(&mut self, id: &ProductId) -> Result<bool, WishlistError> {
        let removed = self.wishlist.remove_from_wishlist(id);
        if removed {
            self.save().await?;
        }
        Ok(removed)
    }

    /// Write the wishlist into the session and flush it to the store.
    async fn save(&self) -> Result<(), WishlistError> {
        self.session
            .insert(session_keys::WISHLIST, &self.wishlist)
            .await?;
        self.session.save().await?;
        Ok(())
    }
}
