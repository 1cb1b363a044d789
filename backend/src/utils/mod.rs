pub mod jwt;
pub mod webhook_verification;
