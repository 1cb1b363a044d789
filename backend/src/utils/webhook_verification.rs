use crate::error::AppError;
use hmac::{Hmac, Mac};
use residency_platform_shared::WEBHOOK_TIMESTAMP_TOLERANCE_SECS;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a payment gateway webhook signature.
///
/// The signature header carries `t=<unix ts>,v1=<hex hmac>`; the HMAC is
/// computed over `"{timestamp}.{payload}"` with the shared webhook secret.
/// An unverified event is untrusted input and must never be acted on.
pub fn verify_gateway_signature(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
) -> Result<(), AppError> {
    let mut timestamp = None;
    let mut v1_signature = None;

    for part in signature_header.split(',') {
        if let Some(ts) = part.trim().strip_prefix("t=") {
            timestamp = Some(ts);
        } else if let Some(v1) = part.trim().strip_prefix("v1=") {
            v1_signature = Some(v1);
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| AppError::Validation("Missing timestamp in signature".to_string()))?;
    let v1_signature = v1_signature
        .ok_or_else(|| AppError::Validation("Missing v1 signature".to_string()))?;

    let payload = std::str::from_utf8(payload)
        .map_err(|_| AppError::Validation("Invalid UTF-8 in payload".to_string()))?;
    let signed_payload = format!("{}.{}", timestamp, payload);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Internal("Invalid webhook secret".to_string()))?;
    mac.update(signed_payload.as_bytes());
    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if expected_signature != v1_signature {
        return Err(AppError::Authentication(
            "Invalid webhook signature".to_string(),
        ));
    }

    // Reject stale deliveries to prevent replay.
    let current_time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|_| AppError::Internal("System time error".to_string()))?
        .as_secs();

    let webhook_time: u64 = timestamp
        .parse()
        .map_err(|_| AppError::Validation("Invalid timestamp format".to_string()))?;

    if current_time.saturating_sub(webhook_time) > WEBHOOK_TIMESTAMP_TOLERANCE_SECS {
        return Err(AppError::Authentication(
            "Webhook timestamp too old".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    fn sign(payload: &[u8], timestamp: u64) -> String {
        let signed_payload = format!("{}.{}", timestamp, std::str::from_utf8(payload).unwrap());
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
    }

    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn accepts_valid_signature() {
        let payload = br#"{"type":"charge.succeeded"}"#;
        let header = sign(payload, now());
        assert!(verify_gateway_signature(payload, &header, SECRET).is_ok());
    }

    #[test]
    fn rejects_tampered_payload() {
        let header = sign(br#"{"amount":100}"#, now());
        let result = verify_gateway_signature(br#"{"amount":999}"#, &header, SECRET);
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = br#"{"type":"charge.succeeded"}"#;
        let header = sign(payload, now());
        let result = verify_gateway_signature(payload, &header, "whsec_other");
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[test]
    fn rejects_stale_timestamp() {
        let payload = br#"{"type":"charge.succeeded"}"#;
        let header = sign(payload, now() - WEBHOOK_TIMESTAMP_TOLERANCE_SECS - 60);
        let result = verify_gateway_signature(payload, &header, SECRET);
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[test]
    fn rejects_missing_signature_parts() {
        let payload = b"{}";
        assert!(verify_gateway_signature(payload, "t=123", SECRET).is_err());
        assert!(verify_gateway_signature(payload, "v1=abc", SECRET).is_err());
    }
}
