use actix_web::{get, web, HttpResponse, Result};

use crate::database::Database;
use crate::error::AppError;

#[get("/health")]
pub async fn health_check(database: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let health = database.health_check().await?;

    let status = if health.is_healthy { "ok" } else { "degraded" };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "database": {
            "healthy": health.is_healthy,
            "response_time_ms": health.response_time.as_millis() as u64,
        }
    })))
}
