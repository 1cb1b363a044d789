use crate::error::AppError;
use crate::models::Room;
use chrono::{Duration, Utc};
use residency_platform_shared::{AdminAnalyticsResponse, ANALYTICS_LOOKAHEAD_DAYS};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Aggregates for the staff dashboard. Read-only; all figures come from
/// confirmed and occupied bookings.
#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn admin_analytics(&self) -> Result<AdminAnalyticsResponse, AppError> {
        let today = Utc::now().date_naive();
        let horizon = today + Duration::days(ANALYTICS_LOOKAHEAD_DAYS);

        let total_rooms = Room::count(&self.pool).await?;

        let total_revenue = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_price), 0) FROM bookings \
             WHERE status IN ('confirmed', 'occupied')",
        )
        .fetch_one(&self.pool)
        .await?;

        let currently_occupied_rooms = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings \
             WHERE status IN ('confirmed', 'occupied') \
               AND start_date <= $1 AND end_date >= $1",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let upcoming_check_ins = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings \
             WHERE status IN ('confirmed', 'occupied') \
               AND start_date > $1 AND start_date <= $2",
        )
        .bind(today)
        .bind(horizon)
        .fetch_one(&self.pool)
        .await?;

        let upcoming_check_outs = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings \
             WHERE status IN ('confirmed', 'occupied') \
               AND end_date >= $1 AND end_date <= $2",
        )
        .bind(today)
        .bind(horizon)
        .fetch_one(&self.pool)
        .await?;

        let occupancy_rate = if total_rooms > 0 {
            currently_occupied_rooms as f64 / total_rooms as f64 * 100.0
        } else {
            0.0
        };

        Ok(AdminAnalyticsResponse {
            total_revenue,
            occupancy_rate,
            currently_occupied_rooms,
            total_rooms,
            upcoming_check_ins,
            upcoming_check_outs,
        })
    }
}
