use actix_web::{post, web, HttpRequest, HttpResponse, Result};
use residency_platform_shared::WebhookReceivedResponse;
use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::PaymentService;
use crate::utils::webhook_verification;

/// Payment gateway webhook.
///
/// The signature is verified before anything in the body is trusted; an
/// unverifiable event is rejected outright. Duplicate deliveries of an
/// already-processed event are acknowledged with 200 and change nothing.
#[post("/payment")]
pub async fn payment_webhook(
    req: HttpRequest,
    body: web::Bytes,
    payment_service: web::Data<PaymentService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get("Gateway-Signature")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing gateway signature".to_string()))?;

    webhook_verification::verify_gateway_signature(
        &body,
        signature,
        &config.payment_webhook_secret,
    )?;

    let event: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::MalformedWebhookPayload(format!("invalid JSON: {}", e)))?;

    let event_type = event["type"].as_str().unwrap_or("unknown").to_string();
    info!(event_type, "received gateway webhook");

    payment_service.confirm_online_payment(&event).await?;

    Ok(HttpResponse::Ok().json(WebhookReceivedResponse { received: true }))
}
