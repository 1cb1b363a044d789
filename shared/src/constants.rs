use rust_decimal::Decimal;
use std::time::Duration;

// JWT Configuration
pub const JWT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(60 * 60); // 1 hour

// Pricing constraints
pub const MIN_DISCOUNT_PERCENT: Decimal = Decimal::ZERO;
pub const MAX_DISCOUNT_PERCENT: Decimal = Decimal::ONE_HUNDRED;
pub const CURRENCY_SCALE: u32 = 2;

// Webhook verification
pub const WEBHOOK_TIMESTAMP_TOLERANCE_SECS: u64 = 300; // 5 minutes

// Admin dashboard
pub const ANALYTICS_LOOKAHEAD_DAYS: i64 = 7;
