use crate::error::AppError;
use crate::models::booking::NewBooking;
use crate::models::payment::NewPayment;
use crate::models::{AcademicTerm, AuditLog, Booking, BookingPackage, Payment, Room};
use crate::services::pricing;
use residency_platform_shared::{
    AuditAction, BookingStatus, CreateBookingRequest, PaymentMethod, PaymentStatus,
};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// The transactional unit that creates a booking together with its payment
/// record and drives the remaining booking state transitions.
#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
}

/// Result of a successful booking creation; both rows committed together.
#[derive(Debug, Clone)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub payment: Payment,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a booking and its companion payment as one unit of work.
    ///
    /// Pricing and dates are always computed server-side from catalog rows;
    /// the request only carries id references and a payment method. Overlap
    /// rejection comes from the `no_double_booking` exclusion constraint, so
    /// two concurrent requests for the same room and dates cannot both
    /// commit.
    pub async fn create_booking(
        &self,
        student_id: Uuid,
        request: &CreateBookingRequest,
    ) -> Result<CreatedBooking, AppError> {
        // Load all three catalog references in one batch.
        let (room, term, package) = tokio::try_join!(
            Room::find_by_id(&self.pool, request.room_id),
            AcademicTerm::find_by_id(&self.pool, request.academic_term_id),
            BookingPackage::find_by_id(&self.pool, request.booking_package_id),
        )?;

        let room = room.ok_or_else(|| {
            AppError::InvalidReference(format!("room {} does not exist", request.room_id))
        })?;
        let term = term.ok_or_else(|| {
            AppError::InvalidReference(format!(
                "academic term {} does not exist",
                request.academic_term_id
            ))
        })?;
        let package = package.ok_or_else(|| {
            AppError::InvalidReference(format!(
                "booking package {} does not exist",
                request.booking_package_id
            ))
        })?;

        let total_price = pricing::compute_price(
            room.price_per_month,
            package.duration_months,
            package.discount_percentage,
        )?;
        let end_date = pricing::compute_end_date(term.start_date, package.duration_months)?;

        let (booking_status, payment_status) = match request.payment_method {
            PaymentMethod::Online => (BookingStatus::PendingPayment, PaymentStatus::Pending),
            PaymentMethod::BankTransfer => (
                BookingStatus::PendingVerification,
                PaymentStatus::PendingVerification,
            ),
        };

        let mut tx = self.pool.begin().await?;

        let booking = Booking::insert(
            &mut tx,
            &NewBooking {
                student_id,
                room_id: room.id,
                academic_term_id: term.id,
                booking_package_id: package.id,
                start_date: term.start_date,
                end_date,
                status: booking_status,
                total_price,
                payment_method: request.payment_method,
            },
        )
        .await
        .map_err(map_overlap_violation)?;

        let payment = Payment::insert(
            &mut tx,
            &NewPayment {
                booking_id: booking.id,
                amount: total_price,
                method: request.payment_method,
                status: payment_status,
            },
        )
        .await?;

        tx.commit().await?;

        info!(
            booking_id = %booking.id,
            payment_id = %payment.id,
            %student_id,
            room_id = %room.id,
            %total_price,
            "created booking"
        );

        AuditLog::record(
            &self.pool,
            Some(student_id),
            AuditAction::BookingCreate,
            Some(booking.id),
            serde_json::json!({
                "room_id": room.id,
                "academic_term_id": term.id,
                "booking_package_id": package.id,
                "payment_method": request.payment_method,
                "total_price": total_price,
            }),
        )
        .await;

        Ok(CreatedBooking { booking, payment })
    }

    /// Fetch a booking, enforcing ownership for non-staff callers. A booking
    /// the caller may not see reads as NotFound rather than Forbidden so ids
    /// are not probeable.
    pub async fn get_booking(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        actor_is_back_office: bool,
    ) -> Result<Booking, AppError> {
        let booking = Booking::find_by_id(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("booking {}", booking_id)))?;

        if !actor_is_back_office && booking.student_id != actor_id {
            return Err(AppError::NotFound(format!("booking {}", booking_id)));
        }

        Ok(booking)
    }

    /// Confirmed -> Occupied.
    pub async fn check_in(&self, booking_id: Uuid, staff_id: Uuid) -> Result<(), AppError> {
        let affected = Booking::check_in(&self.pool, booking_id).await?;
        if affected == 0 {
            return Err(AppError::AlreadyProcessed(format!(
                "booking {} is not awaiting check-in",
                booking_id
            )));
        }

        info!(%booking_id, %staff_id, "booking checked in");
        AuditLog::record(
            &self.pool,
            Some(staff_id),
            AuditAction::BookingCheckIn,
            Some(booking_id),
            serde_json::json!({}),
        )
        .await;

        Ok(())
    }

    /// Occupied -> Completed.
    pub async fn check_out(&self, booking_id: Uuid, staff_id: Uuid) -> Result<(), AppError> {
        let affected = Booking::check_out(&self.pool, booking_id).await?;
        if affected == 0 {
            return Err(AppError::AlreadyProcessed(format!(
                "booking {} is not occupied",
                booking_id
            )));
        }

        info!(%booking_id, %staff_id, "booking checked out");
        AuditLog::record(
            &self.pool,
            Some(staff_id),
            AuditAction::BookingCheckOut,
            Some(booking_id),
            serde_json::json!({}),
        )
        .await;

        Ok(())
    }

    /// {PendingPayment, PendingVerification, Confirmed} -> Cancelled.
    /// Students may cancel their own bookings; staff may cancel any.
    pub async fn cancel(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        actor_is_back_office: bool,
    ) -> Result<(), AppError> {
        if !actor_is_back_office {
            let booking = Booking::find_by_id(&self.pool, booking_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("booking {}", booking_id)))?;
            if booking.student_id != actor_id {
                return Err(AppError::Authorization(
                    "Insufficient permissions for this operation".to_string(),
                ));
            }
        }

        let affected = Booking::cancel(&self.pool, booking_id).await?;
        if affected == 0 {
            return Err(AppError::AlreadyProcessed(format!(
                "booking {} cannot be cancelled from its current state",
                booking_id
            )));
        }

        info!(%booking_id, %actor_id, "booking cancelled");
        AuditLog::record(
            &self.pool,
            Some(actor_id),
            AuditAction::BookingCancel,
            Some(booking_id),
            serde_json::json!({}),
        )
        .await;

        Ok(())
    }

    /// Any active state -> Maintenance.
    pub async fn set_maintenance(&self, booking_id: Uuid, staff_id: Uuid) -> Result<(), AppError> {
        let affected = Booking::set_maintenance(&self.pool, booking_id).await?;
        if affected == 0 {
            return Err(AppError::AlreadyProcessed(format!(
                "booking {} is not in an active state",
                booking_id
            )));
        }

        info!(%booking_id, %staff_id, "booking moved to maintenance");
        AuditLog::record(
            &self.pool,
            Some(staff_id),
            AuditAction::RoomMaintenance,
            Some(booking_id),
            serde_json::json!({}),
        )
        .await;

        Ok(())
    }
}

/// Translate the `no_double_booking` exclusion-constraint violation into the
/// caller-visible conflict; every other database error stays generic.
fn map_overlap_violation(err: AppError) -> AppError {
    if let AppError::Database(sqlx::Error::Database(ref db_err)) = err {
        if db_err.constraint() == Some("no_double_booking") {
            return AppError::RoomAlreadyBooked;
        }
        error!(error = %db_err, "booking insert failed");
    }
    err
}
