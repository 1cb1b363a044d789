use actix_web::{web, HttpResponse, Result};
use residency_platform_shared::{BookingCreatedResponse, BookingResponse, CreateBookingRequest};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::{AccessGuard, BookingService};

/// Create a booking plus its payment record in one transactional unit.
/// Price and dates are derived server-side; any client-supplied values are
/// ignored by construction since the request only carries id references.
pub async fn create_booking(
    user: AuthenticatedUser,
    request: web::Json<CreateBookingRequest>,
    booking_service: web::Data<BookingService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    debug!(
        user_id = %user.user_id,
        room_id = %request.room_id,
        "booking creation requested"
    );

    let created = booking_service
        .create_booking(user.user_id, &request)
        .await?;

    Ok(HttpResponse::Ok().json(BookingCreatedResponse {
        booking_id: created.booking.id,
        payment_id: created.payment.id,
        status: created.booking.status,
        total_price: created.booking.total_price,
        start_date: created.booking.start_date,
        end_date: created.booking.end_date,
    }))
}

/// Fetch a single booking. Students may see their own; staff see any.
pub async fn get_booking(
    user: AuthenticatedUser,
    booking_id: web::Path<Uuid>,
    booking_service: web::Data<BookingService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    let profile = access_guard.resolve_profile(user.user_id).await?;

    let booking = booking_service
        .get_booking(
            booking_id.into_inner(),
            user.user_id,
            profile.role.is_back_office(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(BookingResponse {
        id: booking.id,
        student_id: booking.student_id,
        room_id: booking.room_id,
        academic_term_id: booking.academic_term_id,
        booking_package_id: booking.booking_package_id,
        start_date: booking.start_date,
        end_date: booking.end_date,
        status: booking.status,
        total_price: booking.total_price,
        payment_method: booking.payment_method,
        created_at: booking.created_at,
        checked_in_at: booking.checked_in_at,
        checked_out_at: booking.checked_out_at,
    }))
}

/// Staff check-in: Confirmed -> Occupied.
pub async fn check_in(
    user: AuthenticatedUser,
    booking_id: web::Path<Uuid>,
    booking_service: web::Data<BookingService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    access_guard.require_back_office(user.user_id).await?;

    booking_service
        .check_in(booking_id.into_inner(), user.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "checked_in": true })))
}

/// Staff check-out: Occupied -> Completed.
pub async fn check_out(
    user: AuthenticatedUser,
    booking_id: web::Path<Uuid>,
    booking_service: web::Data<BookingService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    access_guard.require_back_office(user.user_id).await?;

    booking_service
        .check_out(booking_id.into_inner(), user.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "checked_out": true })))
}

/// Cancel a pre-occupancy booking. Students may cancel their own; staff any.
pub async fn cancel(
    user: AuthenticatedUser,
    booking_id: web::Path<Uuid>,
    booking_service: web::Data<BookingService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    let profile = access_guard.resolve_profile(user.user_id).await?;

    booking_service
        .cancel(
            booking_id.into_inner(),
            user.user_id,
            profile.role.is_back_office(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "cancelled": true })))
}

/// Staff: pull the room for upkeep, from any active state.
pub async fn set_maintenance(
    user: AuthenticatedUser,
    booking_id: web::Path<Uuid>,
    booking_service: web::Data<BookingService>,
    access_guard: web::Data<AccessGuard>,
) -> Result<HttpResponse, AppError> {
    access_guard.require_back_office(user.user_id).await?;

    booking_service
        .set_maintenance(booking_id.into_inner(), user.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "maintenance": true })))
}
