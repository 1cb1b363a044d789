use crate::error::AppError;
use chrono::{DateTime, Utc};
use residency_platform_shared::GenderRestriction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A bookable room. Read-only from the booking core's perspective;
/// availability toggles happen in the back office.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub room_number: String,
    pub price_per_month: Decimal,
    pub gender_restriction: GenderRestriction,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let room = sqlx::query_as::<_, Room>(
            "SELECT id, room_number, price_per_month, gender_restriction, is_available, created_at
             FROM rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(room)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
