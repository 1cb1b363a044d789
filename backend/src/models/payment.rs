use crate::error::AppError;
use chrono::{DateTime, Utc};
use residency_platform_shared::{PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub provider_transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

const PAYMENT_COLUMNS: &str =
    "id, booking_id, amount, method, status, provider_transaction_id, created_at, updated_at";

impl Payment {
    /// Insert the booking's companion payment inside the same unit of work
    /// as the booking row. The `one_open_payment_per_booking` partial unique
    /// index guarantees at most one non-terminal payment per booking.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewPayment,
    ) -> Result<Self, AppError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (booking_id, amount, method, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(new.booking_id)
        .bind(new.amount)
        .bind(new.method)
        .bind(new.status)
        .fetch_one(&mut **tx)
        .await?;

        Ok(payment)
    }

    /// Conditional transition used by the webhook path: succeed the pending
    /// online payment for a booking. Returns `None` when no payment is in
    /// `Pending` (already processed or wrong state). Re-delivered events
    /// match zero rows and change nothing.
    pub async fn succeed_pending_online(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: Uuid,
        provider_transaction_id: &str,
    ) -> Result<Option<Self>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments \
             SET status = 'succeeded', provider_transaction_id = $2, updated_at = NOW() \
             WHERE booking_id = $1 AND status = 'pending' \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(booking_id)
        .bind(provider_transaction_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(payment)
    }

    /// Conditional transition used by manual verification: succeed a payment
    /// that is awaiting bank-transfer verification. `None` when the payment
    /// does not exist or is no longer in `PendingVerification`.
    pub async fn succeed_pending_verification(
        tx: &mut Transaction<'_, Postgres>,
        payment_id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments SET status = 'succeeded', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending_verification' \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(payment_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(payment)
    }
}
