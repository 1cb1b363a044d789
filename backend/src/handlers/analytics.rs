use actix_web::{web, HttpResponse, Result};

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::{AccessGuard, AnalyticsService};

/// Staff dashboard aggregates: revenue, occupancy, upcoming movements.
pub async fn admin_analytics(
    user: AuthenticatedUser,
    analytics_service: web::Data<AnalyticsService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    access_guard.require_back_office(user.user_id).await?;

    let analytics = analytics_service.admin_analytics().await?;

    Ok(HttpResponse::Ok().json(analytics))
}
