//! Customer profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{Email, UserId};

/// A customer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique user ID.
    pub id: UserId,
    /// Contact email address.
    pub email: Email,
    /// Display name.
    pub name: Option<String>,
    /// Phone number as entered by the customer.
    pub phone: Option<String>,
    /// Avatar image URL.
    pub image: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update.
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.image.is_none()
    }

    /// Apply this update to a profile in memory.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(image) = &self.image {
            profile.image = Some(image.clone());
        }
    }
}
