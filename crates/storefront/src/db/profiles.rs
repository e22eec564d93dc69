//! Profile repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pantry_core::{Email, UserId};

use super::RepositoryError;
use crate::models::{Profile, ProfileUpdate};

const PROFILE_COLUMNS: &str = "id, email, name, phone, image, created_at, updated_at";

/// Raw `storefront."user"` row.
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: UserId,
    email: String,
    name: Option<String>,
    phone: Option<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            name: row.name,
            phone: row.phone,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for customer profiles.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let sql = format!(r#"SELECT {PROFILE_COLUMNS} FROM storefront."user" WHERE id = $1"#);
        let row: Option<ProfileRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    /// Apply a partial update and return the updated profile.
    ///
    /// Fields left as `None` in `update` keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email belongs to another user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE storefront."user"
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                image = COALESCE($5, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        let row: Option<ProfileRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.email.as_ref().map(Email::as_str))
            .bind(update.phone.as_deref())
            .bind(update.image.as_deref())
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("email already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }
}
