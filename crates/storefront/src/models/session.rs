//! Session-related types.

/// Session keys for data held in the tower-sessions store.
pub mod keys {
    /// Key for the session wishlist ([`pantry_core::Wishlist`]).
    pub const WISHLIST: &str = "wishlist";
}
