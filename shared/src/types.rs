use serde::{Deserialize, Serialize};
use std::fmt;

// User-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Staff,
    Proprietor,
}

impl UserRole {
    /// Staff and proprietor are equivalent for all back-office operations.
    pub fn is_back_office(&self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Proprietor)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Staff => write!(f, "staff"),
            UserRole::Proprietor => write!(f, "proprietor"),
        }
    }
}

// Booking-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    PendingVerification,
    Reserved,
    Confirmed,
    Occupied,
    Completed,
    Cancelled,
    Maintenance,
}

impl BookingStatus {
    /// Statuses that hold a room and therefore participate in the
    /// no-overlap exclusion constraint.
    pub const ACTIVE: [BookingStatus; 5] = [
        BookingStatus::PendingPayment,
        BookingStatus::PendingVerification,
        BookingStatus::Reserved,
        BookingStatus::Confirmed,
        BookingStatus::Occupied,
    ];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Terminal states have no outbound transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::PendingPayment => write!(f, "pending_payment"),
            BookingStatus::PendingVerification => write!(f, "pending_verification"),
            BookingStatus::Reserved => write!(f, "reserved"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Occupied => write!(f, "occupied"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

// Payment-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    PendingVerification,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    /// Succeeded and Failed are one-way; nothing transitions out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Failed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::PendingVerification => write!(f, "pending_verification"),
            PaymentStatus::Succeeded => write!(f, "succeeded"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Online,
    BankTransfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Online => write!(f, "online"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender_restriction", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GenderRestriction {
    Male,
    Female,
    Mixed,
}

// Audit-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    BookingCreate,
    PaymentSucceededViaWebhook,
    BankTransferVerified,
    BookingCheckIn,
    BookingCheckOut,
    BookingCancel,
    RoomMaintenance,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::BookingCreate => "booking_create",
            AuditAction::PaymentSucceededViaWebhook => "payment_succeeded_via_webhook",
            AuditAction::BankTransferVerified => "bank_transfer_verified",
            AuditAction::BookingCheckIn => "booking_check_in",
            AuditAction::BookingCheckOut => "booking_check_out",
            AuditAction::BookingCancel => "booking_cancel",
            AuditAction::RoomMaintenance => "room_maintenance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_office_roles() {
        assert!(!UserRole::Student.is_back_office());
        assert!(UserRole::Staff.is_back_office());
        assert!(UserRole::Proprietor.is_back_office());
    }

    #[test]
    fn active_statuses_hold_a_room() {
        assert!(BookingStatus::PendingPayment.is_active());
        assert!(BookingStatus::Reserved.is_active());
        assert!(BookingStatus::Occupied.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(!BookingStatus::Maintenance.is_active());
    }

    #[test]
    fn terminal_statuses() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(PaymentStatus::Succeeded.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
    }
}
