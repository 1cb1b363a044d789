use crate::error::AppError;
use chrono::{Months, NaiveDate};
use residency_platform_shared::{CURRENCY_SCALE, MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT};
use rust_decimal::Decimal;

/// Compute the total price for a stay:
/// `rate * duration_months * (1 - discount_percent / 100)`, rounded to the
/// currency's minor unit (2 decimal places) with round-half-even.
///
/// Pure and deterministic; all inputs come from server-loaded catalog rows,
/// never from the client.
pub fn compute_price(
    room_rate: Decimal,
    duration_months: i32,
    discount_percent: Decimal,
) -> Result<Decimal, AppError> {
    if room_rate < Decimal::ZERO {
        return Err(AppError::InvalidPricingInput(format!(
            "room rate must not be negative, got {}",
            room_rate
        )));
    }
    if duration_months <= 0 {
        return Err(AppError::InvalidPricingInput(format!(
            "duration must be positive, got {} months",
            duration_months
        )));
    }
    if discount_percent < MIN_DISCOUNT_PERCENT || discount_percent > MAX_DISCOUNT_PERCENT {
        return Err(AppError::InvalidPricingInput(format!(
            "discount must be within [0, 100], got {}",
            discount_percent
        )));
    }

    let base = room_rate * Decimal::from(duration_months);
    let total = base - base * discount_percent / Decimal::ONE_HUNDRED;

    Ok(total.round_dp(CURRENCY_SCALE))
}

/// Add `duration_months` calendar months to the term start date (UTC).
///
/// End-of-month overflow clamps to the last day of the target month:
/// Jan 31 + 1 month = Feb 29/28, never March 2/3. This is chrono's
/// `Months` semantics, pinned here by test.
pub fn compute_end_date(start_date: NaiveDate, duration_months: i32) -> Result<NaiveDate, AppError> {
    if duration_months <= 0 {
        return Err(AppError::InvalidPricingInput(format!(
            "duration must be positive, got {} months",
            duration_months
        )));
    }

    start_date
        .checked_add_months(Months::new(duration_months as u32))
        .ok_or_else(|| {
            AppError::InvalidPricingInput(format!(
                "end date out of range for start {} + {} months",
                start_date, duration_months
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn worked_example_from_catalog() {
        // rate=350.00, duration=6, discount=5% -> base 2100.00, total 1995.00
        let total = compute_price(dec("350.00"), 6, dec("5")).unwrap();
        assert_eq!(total, dec("1995.00"));
    }

    #[test]
    fn zero_discount_is_identity() {
        let total = compute_price(dec("420.50"), 3, dec("0")).unwrap();
        assert_eq!(total, dec("1261.50"));
    }

    #[test]
    fn full_discount_is_free() {
        let total = compute_price(dec("350.00"), 12, dec("100")).unwrap();
        assert_eq!(total, dec("0.00"));
    }

    #[test]
    fn rounds_half_even_at_third_decimal() {
        // 2.50 * 1 with 95% discount -> 0.125, banker's rounding -> 0.12
        let total = compute_price(dec("2.50"), 1, dec("95")).unwrap();
        assert_eq!(total, dec("0.12"));

        // 7.50 * 1 with 95% discount -> 0.375 -> 0.38 (rounds to even)
        let total = compute_price(dec("7.50"), 1, dec("95")).unwrap();
        assert_eq!(total, dec("0.38"));
    }

    #[test]
    fn deterministic_across_calls() {
        for _ in 0..10 {
            assert_eq!(
                compute_price(dec("350.00"), 6, dec("5")).unwrap(),
                dec("1995.00")
            );
        }
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            compute_price(dec("-1"), 6, dec("5")),
            Err(AppError::InvalidPricingInput(_))
        ));
        assert!(matches!(
            compute_price(dec("350"), 0, dec("5")),
            Err(AppError::InvalidPricingInput(_))
        ));
        assert!(matches!(
            compute_price(dec("350"), -3, dec("5")),
            Err(AppError::InvalidPricingInput(_))
        ));
        assert!(matches!(
            compute_price(dec("350"), 6, dec("101")),
            Err(AppError::InvalidPricingInput(_))
        ));
        assert!(matches!(
            compute_price(dec("350"), 6, dec("-1")),
            Err(AppError::InvalidPricingInput(_))
        ));
    }

    #[test]
    fn end_date_plain_addition() {
        assert_eq!(
            compute_end_date(date(2024, 9, 1), 3).unwrap(),
            date(2024, 12, 1)
        );
        assert_eq!(
            compute_end_date(date(2025, 1, 15), 12).unwrap(),
            date(2026, 1, 15)
        );
    }

    #[test]
    fn end_date_clamps_instead_of_rolling_over() {
        // Jan 31 + 1 month clamps to the end of February.
        assert_eq!(
            compute_end_date(date(2024, 1, 31), 1).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            compute_end_date(date(2025, 1, 31), 1).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn end_date_rejects_non_positive_duration() {
        assert!(compute_end_date(date(2024, 9, 1), 0).is_err());
        assert!(compute_end_date(date(2024, 9, 1), -2).is_err());
    }
}
