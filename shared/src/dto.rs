use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Booking DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub room_id: Uuid,
    pub academic_term_id: Uuid,
    pub booking_package_id: Uuid,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    pub booking_id: Uuid,
    pub payment_id: Uuid,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub room_id: Uuid,
    pub academic_term_id: Uuid,
    pub booking_package_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
}

// Payment DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct BankTransferVerifiedResponse {
    pub booking_id: Uuid,
    pub confirmed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookReceivedResponse {
    pub received: bool,
}

// Admin dashboard DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminAnalyticsResponse {
    pub total_revenue: Decimal,
    pub occupancy_rate: f64,
    pub currently_occupied_rooms: i64,
    pub total_rooms: i64,
    pub upcoming_check_ins: i64,
    pub upcoming_check_outs: i64,
}
