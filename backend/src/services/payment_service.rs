use crate::error::AppError;
use crate::models::{AuditLog, Booking, Payment};
use residency_platform_shared::AuditAction;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

/// Payment reconciliation: the two paths that move a payment to `Succeeded`
/// and cascade its booking to `Confirmed`.
///
/// Both share the same backbone: a conditional update keyed on the expected
/// pending status, an affected-row check, and a cascade only on success.
/// That is what makes webhook re-delivery and concurrent verification safe.
#[derive(Clone)]
pub struct PaymentService {
    pool: PgPool,
}

/// Outcome of a webhook delivery. Duplicates are acknowledged, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Confirmed,
    AlreadyProcessed,
    Ignored,
}

impl PaymentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Handle a verified `charge.succeeded` gateway event.
    ///
    /// The event must already be signature-verified by the caller. The
    /// payment is updated only while still `Pending`; zero rows affected
    /// means the event was already processed (gateways retry deliveries) and
    /// is treated as a no-op success.
    pub async fn confirm_online_payment(&self, event: &Value) -> Result<WebhookOutcome, AppError> {
        let event_type = event["type"].as_str().unwrap_or_default();
        if event_type != "charge.succeeded" {
            info!(event_type, "ignoring unhandled gateway event");
            return Ok(WebhookOutcome::Ignored);
        }

        let charge = &event["data"]["object"];
        let charge_id = charge["id"].as_str().ok_or_else(|| {
            AppError::MalformedWebhookPayload("missing charge id".to_string())
        })?;
        let booking_id = charge["metadata"]["booking_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| {
                AppError::MalformedWebhookPayload(
                    "booking id missing in webhook metadata".to_string(),
                )
            })?;

        let mut tx = self.pool.begin().await?;

        let payment = Payment::succeed_pending_online(&mut tx, booking_id, charge_id).await?;

        let payment = match payment {
            Some(payment) => payment,
            None => {
                // Already processed or never pending: acknowledge without
                // touching anything.
                tx.rollback().await?;
                info!(%booking_id, charge_id, "duplicate or stale webhook delivery, no-op");
                return Ok(WebhookOutcome::AlreadyProcessed);
            }
        };

        Booking::confirm(&mut tx, booking_id).await?;
        tx.commit().await?;

        info!(%booking_id, payment_id = %payment.id, charge_id, "payment succeeded via webhook");

        AuditLog::record(
            &self.pool,
            None,
            AuditAction::PaymentSucceededViaWebhook,
            Some(payment.id),
            serde_json::json!({
                "booking_id": booking_id,
                "charge_id": charge_id,
            }),
        )
        .await;

        Ok(WebhookOutcome::Confirmed)
    }

    /// Manually verify a bank transfer on behalf of staff.
    ///
    /// Unlike the webhook path, a zero-row match here is an error the caller
    /// must see: the payment was already processed or does not exist, and
    /// blind retries are wrong. Returns the confirmed booking id.
    pub async fn verify_bank_transfer(
        &self,
        payment_id: Uuid,
        acting_staff_id: Uuid,
    ) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;

        let payment = Payment::succeed_pending_verification(&mut tx, payment_id).await?;

        let payment = match payment {
            Some(payment) => payment,
            None => {
                tx.rollback().await?;
                warn!(%payment_id, %acting_staff_id, "verification matched no pending payment");
                return Err(AppError::AlreadyProcessed(format!(
                    "payment {} was already processed or does not exist",
                    payment_id
                )));
            }
        };

        Booking::confirm(&mut tx, payment.booking_id).await?;
        tx.commit().await?;

        info!(
            %payment_id,
            booking_id = %payment.booking_id,
            %acting_staff_id,
            "bank transfer verified"
        );

        AuditLog::record(
            &self.pool,
            Some(acting_staff_id),
            AuditAction::BankTransferVerified,
            Some(payment_id),
            serde_json::json!({ "booking_id": payment.booking_id }),
        )
        .await;

        Ok(payment.booking_id)
    }
}
