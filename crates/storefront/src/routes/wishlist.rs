//! Session wishlist route handlers.
//!
//! The heart button and header badge are HTMX fragments; the listing and
//! membership checks are JSON for client-side rendering. Requests that change
//! the wishlist respond with `HX-Trigger: wishlist-updated` so other fragments
//! can refresh.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::Path,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pantry_core::{CurrencyCode, Price, ProductId, WishlistProduct, WishlistToggle};

use crate::error::{ErrorBody, add_breadcrumb};
use crate::middleware::SessionWishlist;

/// HTMX event fired after the wishlist changes.
const WISHLIST_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "wishlist-updated");

/// Wishlist count badge fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_count.html")]
pub struct WishlistCountTemplate {
    pub count: usize,
}

/// Heart toggle button fragment (for HTMX), with an out-of-band count badge.
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_button.html")]
pub struct WishlistButtonTemplate {
    pub product_id: String,
    pub in_wishlist: bool,
    pub count: usize,
}

/// JSON view of the session wishlist.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<WishlistProduct>,
    pub count: usize,
}

/// JSON answer to a membership check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipView {
    pub product_id: ProductId,
    pub in_wishlist: bool,
}

/// Toggle form data, posted by the product card's heart button.
#[derive(Debug, Default, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub handle: Option<String>,
}

/// Remove form data.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveForm {
    #[serde(default)]
    pub product_id: String,
}

/// A form field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingProductId,
    InvalidPrice,
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let error = match self {
            Self::MissingProductId => "Product ID is required",
            Self::InvalidPrice => "Invalid price",
        };
        (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
    }
}

/// Treat an empty optional form field as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ToggleForm {
    /// Convert the posted fields into a product reference.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if the product ID is blank or the price or
    /// currency cannot be parsed.
    pub fn into_product(self) -> Result<WishlistProduct, FormError> {
        let id = ProductId::parse(&self.product_id).map_err(|_| FormError::MissingProductId)?;

        let price = match non_empty(self.price) {
            Some(raw) => {
                let amount = raw
                    .trim()
                    .parse::<Decimal>()
                    .map_err(|_| FormError::InvalidPrice)?;
                let currency = match non_empty(self.currency) {
                    Some(code) => code
                        .parse::<CurrencyCode>()
                        .map_err(|_| FormError::InvalidPrice)?,
                    None => CurrencyCode::default(),
                };
                Some(Price::new(amount, currency))
            }
            None => None,
        };

        let name = if self.name.trim().is_empty() {
            id.to_string()
        } else {
            self.name.trim().to_string()
        };

        Ok(WishlistProduct {
            id,
            name,
            price,
            image: non_empty(self.image),
            handle: non_empty(self.handle),
        })
    }
}

/// List the session wishlist.
#[instrument(skip(wishlist))]
pub async fn show(wishlist: SessionWishlist) -> Json<WishlistView> {
    Json(WishlistView {
        items: wishlist.snapshot(),
        count: wishlist.len(),
    })
}

/// Get wishlist count badge (HTMX).
#[instrument(skip(wishlist))]
pub async fn count(wishlist: SessionWishlist) -> WishlistCountTemplate {
    WishlistCountTemplate {
        count: wishlist.len(),
    }
}

/// Check whether a product is in the wishlist.
#[instrument(skip(wishlist))]
pub async fn contains(
    wishlist: SessionWishlist,
    Path(product_id): Path<String>,
) -> Result<Json<MembershipView>, FormError> {
    let product_id = ProductId::parse(&product_id).map_err(|_| FormError::MissingProductId)?;
    let in_wishlist = wishlist.is_in_wishlist(&product_id);

    Ok(Json(MembershipView {
        product_id,
        in_wishlist,
    }))
}

/// Toggle a product in the wishlist (HTMX).
///
/// Adds the product when absent and removes it when present. Returns the
/// updated heart button, or 422 when the wishlist is already full.
#[instrument(skip(wishlist))]
pub async fn toggle(mut wishlist: SessionWishlist, Form(form): Form<ToggleForm>) -> Response {
    let product = match form.into_product() {
        Ok(product) => product,
        Err(e) => return e.into_response(),
    };
    let product_id = product.id.to_string();

    match wishlist.add_to_wishlist(product).await {
        Ok(WishlistToggle::Full) => {
            tracing::warn!(%product_id, count = wishlist.len(), "Wishlist is full");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: "Wishlist is full",
                }),
            )
                .into_response()
        }
        Ok(outcome) => {
            let action = if outcome.is_present() {
                "Added to wishlist"
            } else {
                "Removed from wishlist"
            };
            add_breadcrumb("wishlist", action, &[("product_id", &product_id)]);
            tracing::debug!(%product_id, ?outcome, "Wishlist toggled");

            (
                AppendHeaders([WISHLIST_UPDATED_TRIGGER]),
                WishlistButtonTemplate {
                    product_id,
                    in_wishlist: outcome.is_present(),
                    count: wishlist.len(),
                },
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Remove a product from the wishlist (HTMX).
///
/// Removing a product that is not saved succeeds without changes and without
/// `HX-Trigger`. Returns the updated count badge.
#[instrument(skip(wishlist))]
pub async fn remove(mut wishlist: SessionWishlist, Form(form): Form<RemoveForm>) -> Response {
    let Ok(product_id) = ProductId::parse(&form.product_id) else {
        return FormError::MissingProductId.into_response();
    };

    match wishlist.remove_from_wishlist(&product_id).await {
        Ok(removed) => {
            let badge = WishlistCountTemplate {
                count: wishlist.len(),
            };
            if !removed {
                return badge.into_response();
            }

            add_breadcrumb(
                "wishlist",
                "Removed from wishlist",
                &[("product_id", product_id.as_str())],
            );
            (AppendHeaders([WISHLIST_UPDATED_TRIGGER]), badge).into_response()
        }
        Err(e) => e.into_response(),
    }
}
