pub mod access_guard;
pub mod analytics_service;
pub mod booking_service;
pub mod payment_service;
pub mod pricing;

pub use access_guard::AccessGuard;
pub use analytics_service::AnalyticsService;
pub use booking_service::BookingService;
pub use payment_service::PaymentService;
