use actix_web::{web, HttpResponse, Result};
use residency_platform_shared::BankTransferVerifiedResponse;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::{AccessGuard, PaymentService};

/// Manually verify a bank transfer and confirm the linked booking.
/// Staff/proprietor only.
pub async fn verify_bank_transfer(
    user: AuthenticatedUser,
    payment_id: web::Path<Uuid>,
    payment_service: web::Data<PaymentService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    access_guard.require_back_office(user.user_id).await?;

    let payment_id = payment_id.into_inner();
    debug!(%payment_id, staff_id = %user.user_id, "bank transfer verification requested");

    let booking_id = payment_service
        .verify_bank_transfer(payment_id, user.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(BankTransferVerifiedResponse {
        booking_id,
        confirmed: true,
    }))
}
