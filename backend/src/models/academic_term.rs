use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// An institution-defined date range anchoring booking start dates.
/// Immutable once referenced by a booking.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AcademicTerm {
    pub id: Uuid,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AcademicTerm {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let term = sqlx::query_as::<_, AcademicTerm>(
            "SELECT id, label, start_date, end_date FROM academic_terms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(term)
    }
}
