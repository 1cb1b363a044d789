use crate::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A duration/discount bundle applied to pricing. Referenced by id only;
/// clients never supply duration or discount values directly.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingPackage {
    pub id: Uuid,
    pub duration_months: i32,
    pub discount_percentage: Decimal,
    pub description: Option<String>,
}

impl BookingPackage {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let package = sqlx::query_as::<_, BookingPackage>(
            "SELECT id, duration_months, discount_percentage, description
             FROM booking_packages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(package)
    }
}
