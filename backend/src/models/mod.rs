pub mod academic_term;
pub mod audit;
pub mod booking;
pub mod booking_package;
pub mod payment;
pub mod profile;
pub mod room;

pub use academic_term::AcademicTerm;
pub use audit::AuditLog;
pub use booking::Booking;
pub use booking_package::BookingPackage;
pub use payment::Payment;
pub use profile::Profile;
pub use room::Room;
