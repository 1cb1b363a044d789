use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use residency_platform_shared::{BookingStatus, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub room_id: Uuid,
    pub academic_term_id: Uuid,
    pub booking_package_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
}

/// Server-computed booking attributes; nothing here comes from the client
/// except the id references.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub student_id: Uuid,
    pub room_id: Uuid,
    pub academic_term_id: Uuid,
    pub booking_package_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
}

const BOOKING_COLUMNS: &str = "id, student_id, room_id, academic_term_id, booking_package_id, \
     start_date, end_date, status, total_price, payment_method, created_at, \
     checked_in_at, checked_out_at";

impl Booking {
    /// Insert a booking row inside an open unit of work. The
    /// `no_double_booking` exclusion constraint rejects the insert if it
    /// would overlap an active booking for the same room.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewBooking,
    ) -> Result<Self, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings \
                 (student_id, room_id, academic_term_id, booking_package_id, \
                  start_date, end_date, status, total_price, payment_method) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(new.student_id)
        .bind(new.room_id)
        .bind(new.academic_term_id)
        .bind(new.booking_package_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.status)
        .bind(new.total_price)
        .bind(new.payment_method)
        .fetch_one(&mut **tx)
        .await?;

        Ok(booking)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(booking)
    }

    /// Cascade a payment success: move the booking to Confirmed if it is
    /// still awaiting payment or verification. Returns the number of rows
    /// affected; zero means the booking was not in a pending state.
    pub async fn confirm(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'confirmed', updated_at = NOW() \
             WHERE id = $1 AND status IN ('pending_payment', 'pending_verification')",
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Confirmed -> Occupied, stamping the check-in time.
    pub async fn check_in(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'occupied', checked_in_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'confirmed'",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Occupied -> Completed, stamping the check-out time.
    pub async fn check_out(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'completed', checked_out_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'occupied'",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Cancellation is only defined out of the pre-occupancy states.
    pub async fn cancel(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 \
               AND status IN ('pending_payment', 'pending_verification', 'confirmed')",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Any active state -> Maintenance (room pulled for upkeep).
    pub async fn set_maintenance(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'maintenance', updated_at = NOW() \
             WHERE id = $1 \
               AND status IN ('pending_payment', 'pending_verification', 'reserved', \
                              'confirmed', 'occupied')",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
