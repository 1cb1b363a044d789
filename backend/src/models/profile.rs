use crate::error::AppError;
use chrono::{DateTime, Utc};
use residency_platform_shared::UserRole;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A provisioned user profile. The identity provider owns authentication;
/// the profile row carries the role used for authorization.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, role, created_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
