//! Session wishlist container.
//!
//! A [`Wishlist`] is the ordered set of products a shopper has favorited
//! during the current browser session. It is pure state: the storefront
//! loads it from the session, applies one operation, and writes it back.
//!
//! Each product ID is either absent or present:
//!
//! ```text
//!            add_to_wishlist              add_to_wishlist
//!  absent ─────────────────────▶ present ─────────────────▶ absent
//!                                   │
//!                                   │ remove_from_wishlist
//!                                   ▼
//!                                 absent
//! ```
//!
//! `remove_from_wishlist` on an absent ID and `is_in_wishlist` never change
//! anything. A wishlist holds at most [`Wishlist::MAX_ITEMS`] entries; adding
//! a new product to a full wishlist leaves it unchanged.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product reference held by the wishlist.
///
/// Only `id` takes part in wishlist logic. The remaining fields are display
/// payload carried along for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistProduct {
    /// Catalog product ID.
    pub id: ProductId,
    /// Product title.
    pub name: String,
    /// Price at the time the product was favorited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// URL handle of the product page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl WishlistProduct {
    /// Create a product reference with no optional display fields.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: None,
            image: None,
            handle: None,
        }
    }
}

/// Outcome of [`Wishlist::add_to_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistToggle {
    /// The product was absent and has been appended.
    Added,
    /// The product was present and has been removed.
    Removed,
    /// The product was absent and the wishlist is already at capacity.
    Full,
}

impl WishlistToggle {
    /// Whether the product is in the wishlist after the toggle.
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Ordered, duplicate-free list of favorited products.
///
/// Entries keep insertion order. No two entries share a product ID; this
/// holds for every sequence of operations and is re-established when a
/// wishlist is deserialized from the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<WishlistProduct>", into = "Vec<WishlistProduct>")]
pub struct Wishlist {
    items: Vec<WishlistProduct>,
}

impl Wishlist {
    /// Most entries a single session may hold.
    pub const MAX_ITEMS: usize = 250;

    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Toggle a product.
    ///
    /// Removes the entry with the same ID when one exists, otherwise appends
    /// `product` at the end. Calling this twice with the same product leaves
    /// the wishlist as it was. A new product is not added once the wishlist
    /// holds [`Self::MAX_ITEMS`] entries.
    pub fn add_to_wishlist(&mut self, product: WishlistProduct) -> WishlistToggle {
        if let Some(pos) = self.position(&product.id) {
            self.items.remove(pos);
            WishlistToggle::Removed
        } else if self.is_full() {
            WishlistToggle::Full
        } else {
            self.items.push(product);
            WishlistToggle::Added
        }
    }

    /// Remove the product with the given ID.
    ///
    /// Returns `true` if an entry was removed; absent IDs are a no-op.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether a product with this ID is in the wishlist.
    #[must_use]
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistProduct] {
        &self.items
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the wishlist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the wishlist is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= Self::MAX_ITEMS
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl From<Vec<WishlistProduct>> for Wishlist {
    /// Build a wishlist from raw entries, keeping the first occurrence of
    /// each product ID and at most [`Wishlist::MAX_ITEMS`] entries.
    fn from(entries: Vec<WishlistProduct>) -> Self {
        let mut wishlist = Self::new();
        for entry in entries {
            if wishlist.is_full() {
                break;
            }
            if !wishlist.is_in_wishlist(&entry.id) {
                wishlist.items.push(entry);
            }
        }
        wishlist
    }
}

impl From<Wishlist> for Vec<WishlistProduct> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn product(id: &str) -> WishlistProduct {
        WishlistProduct::new(ProductId::parse(id).unwrap(), format!("Product {id}"))
    }

    fn pid(id: &str) -> ProductId {
        ProductId::parse(id).unwrap()
    }

    fn ids(wishlist: &Wishlist) -> Vec<&str> {
        wishlist.items().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_starts_empty() {
        let wishlist = Wishlist::new();
        assert!(wishlist.is_empty());
        assert_eq!(wishlist.len(), 0);
        assert!(!wishlist.is_in_wishlist(&pid("p1")));
    }

    #[test]
    fn test_add_absent_product_makes_it_present() {
        let mut wishlist = Wishlist::new();
        assert_eq!(wishlist.add_to_wishlist(product("p1")), WishlistToggle::Added);
        assert!(wishlist.is_in_wishlist(&pid("p1")));
    }

    #[test]
    fn test_add_present_product_toggles_it_off() {
        let mut wishlist = Wishlist::new();
        wishlist.add_to_wishlist(product("p1"));
        assert_eq!(
            wishlist.add_to_wishlist(product("p1")),
            WishlistToggle::Removed
        );
        assert!(!wishlist.is_in_wishlist(&pid("p1")));
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut wishlist = Wishlist::new();
        wishlist.add_to_wishlist(product("a"));
        wishlist.add_to_wishlist(product("b"));
        let before = wishlist.clone();

        wishlist.add_to_wishlist(product("c"));
        wishlist.add_to_wishlist(product("c"));
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_toggle_matches_on_id_only() {
        let mut wishlist = Wishlist::new();
        wishlist.add_to_wishlist(product("p1"));

        let mut renamed = product("p1");
        renamed.name = "Different title".to_string();
        renamed.image = Some("https://cdn.example/p1.jpg".to_string());
        assert_eq!(wishlist.add_to_wishlist(renamed), WishlistToggle::Removed);
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_scenario_toggle_sequence() {
        let mut wishlist = Wishlist::new();

        wishlist.add_to_wishlist(product("p1"));
        assert_eq!(ids(&wishlist), ["p1"]);

        wishlist.add_to_wishlist(product("p2"));
        assert_eq!(ids(&wishlist), ["p1", "p2"]);

        wishlist.add_to_wishlist(product("p1"));
        assert_eq!(ids(&wishlist), ["p2"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut once = Wishlist::new();
        once.add_to_wishlist(product("a"));
        once.add_to_wishlist(product("b"));
        let mut twice = once.clone();

        assert!(once.remove_from_wishlist(&pid("a")));
        assert!(twice.remove_from_wishlist(&pid("a")));
        assert!(!twice.remove_from_wishlist(&pid("a")));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut wishlist = Wishlist::new();
        wishlist.add_to_wishlist(product("a"));
        assert!(!wishlist.remove_from_wishlist(&pid("zzz")));
        assert_eq!(ids(&wishlist), ["a"]);
    }

    #[test]
    fn test_insertion_order_preserved_for_survivors() {
        let mut wishlist = Wishlist::new();
        for id in ["a", "b", "c", "d"] {
            wishlist.add_to_wishlist(product(id));
        }
        wishlist.remove_from_wishlist(&pid("b"));
        wishlist.add_to_wishlist(product("d"));
        wishlist.add_to_wishlist(product("b"));
        assert_eq!(ids(&wishlist), ["a", "c", "b"]);
    }

    #[test]
    fn test_no_duplicates_under_arbitrary_sequences() {
        // Small LCG so the sequence is deterministic across runs
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            seed >> 33
        };

        let mut wishlist = Wishlist::new();
        let mut model: Vec<String> = Vec::new();

        for _ in 0..2_000 {
            let id = format!("p{}", next() % 12);
            if next() % 3 == 0 {
                wishlist.remove_from_wishlist(&pid(&id));
                model.retain(|m| m != &id);
            } else {
                wishlist.add_to_wishlist(product(&id));
                if let Some(pos) = model.iter().position(|m| m == &id) {
                    model.remove(pos);
                } else {
                    model.push(id);
                }
            }

            let seen: HashSet<&str> = ids(&wishlist).into_iter().collect();
            assert_eq!(seen.len(), wishlist.len());
            assert_eq!(ids(&wishlist), model);
        }
    }

    #[test]
    fn test_deserialize_drops_duplicate_ids() {
        let json = r#"[
            {"id": "p1", "name": "First"},
            {"id": "p2", "name": "Second"},
            {"id": "p1", "name": "Again"}
        ]"#;
        let wishlist: Wishlist = serde_json::from_str(json).unwrap();
        assert_eq!(ids(&wishlist), ["p1", "p2"]);
        assert_eq!(wishlist.items()[0].name, "First");
    }

    #[test]
    fn test_serializes_as_array() {
        let mut wishlist = Wishlist::new();
        wishlist.add_to_wishlist(product("p1"));
        let value = serde_json::to_value(&wishlist).unwrap();
        assert_eq!(value, serde_json::json!([{"id": "p1", "name": "Product p1"}]));
    }

    #[test]
    fn test_full_wishlist_rejects_new_products() {
        let mut wishlist = Wishlist::new();
        for i in 0..Wishlist::MAX_ITEMS {
            assert_eq!(
                wishlist.add_to_wishlist(product(&format!("p{i}"))),
                WishlistToggle::Added
            );
        }
        assert!(wishlist.is_full());

        let outcome = wishlist.add_to_wishlist(product("extra"));
        assert_eq!(outcome, WishlistToggle::Full);
        assert!(!outcome.is_present());
        assert_eq!(wishlist.len(), Wishlist::MAX_ITEMS);
        assert!(!wishlist.is_in_wishlist(&pid("extra")));

        // Toggling an existing entry off still works at capacity
        assert_eq!(
            wishlist.add_to_wishlist(product("p0")),
            WishlistToggle::Removed
        );
        assert_eq!(
            wishlist.add_to_wishlist(product("extra")),
            WishlistToggle::Added
        );
    }

    #[test]
    fn test_deserialize_caps_entries() {
        let entries: Vec<WishlistProduct> = (0..Wishlist::MAX_ITEMS + 10)
            .map(|i| product(&format!("p{i}")))
            .collect();
        let json = serde_json::to_string(&entries).unwrap();
        let wishlist: Wishlist = serde_json::from_str(&json).unwrap();
        assert_eq!(wishlist.len(), Wishlist::MAX_ITEMS);
        assert_eq!(wishlist.items()[0].id.as_str(), "p0");
    }

    #[test]
    fn test_deserialize_rejects_blank_product_id() {
        let json = r#"[{"id": "  ", "name": "Nameless"}]"#;
        assert!(serde_json::from_str::<Wishlist>(json).is_err());
    }
}
