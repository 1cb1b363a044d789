use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid pricing input: {0}")]
    InvalidPricingInput(String),

    #[error("Malformed webhook payload: {0}")]
    MalformedWebhookPayload(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("This room is already booked for the selected dates")]
    RoomAlreadyBooked,

    #[error("Already processed or not found: {0}")]
    AlreadyProcessed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "validation_error".to_string(),
                message: msg.clone(),
            }),
            AppError::InvalidReference(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_reference".to_string(),
                message: msg.clone(),
            }),
            AppError::InvalidPricingInput(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_pricing_input".to_string(),
                message: msg.clone(),
            }),
            AppError::MalformedWebhookPayload(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "malformed_webhook_payload".to_string(),
                    message: msg.clone(),
                })
            }
            AppError::Authentication(msg) => HttpResponse::Unauthorized().json(ErrorResponse {
                error: "authentication_error".to_string(),
                message: msg.clone(),
            }),
            AppError::Jwt(_) => HttpResponse::Unauthorized().json(ErrorResponse {
                error: "authentication_error".to_string(),
                message: "Invalid or expired token".to_string(),
            }),
            AppError::Authorization(msg) => HttpResponse::Forbidden().json(ErrorResponse {
                error: "authorization_error".to_string(),
                message: msg.clone(),
            }),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: msg.clone(),
            }),
            AppError::RoomAlreadyBooked => HttpResponse::Conflict().json(ErrorResponse {
                error: "room_already_booked".to_string(),
                message: self.to_string(),
            }),
            AppError::AlreadyProcessed(msg) => HttpResponse::Conflict().json(ErrorResponse {
                error: "already_processed".to_string(),
                message: msg.clone(),
            }),
            _ => HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal_server_error".to_string(),
                message: "An internal server error occurred".to_string(),
            }),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn conflict_errors_map_to_409() {
        assert_eq!(
            AppError::RoomAlreadyBooked.error_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::AlreadyProcessed("payment".into())
                .error_response()
                .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn input_errors_map_to_400() {
        assert_eq!(
            AppError::InvalidReference("room".into())
                .error_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidPricingInput("duration".into())
                .error_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MalformedWebhookPayload("missing booking id".into())
                .error_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            AppError::Authentication("missing token".into())
                .error_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Authorization("insufficient permissions".into())
                .error_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn infrastructure_errors_do_not_leak_details() {
        let resp = AppError::Internal("pool exhausted".into()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
