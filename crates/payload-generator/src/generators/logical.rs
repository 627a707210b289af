//! Logical type encoders.
//!
//! Dates are drawn from the seeded context. Timestamps are NOT deterministic:
//! they read the wall clock, so payloads containing them are excluded from
//! reproducibility guarantees.

use crate::context::GenerationContext;
use chrono::{NaiveDate, Utc};
use contract_core::LogicalType;

/// First year of the generated date window.
pub const DATE_FIRST_YEAR: i32 = 2000;

/// Number of years in the generated date window.
pub const DATE_WINDOW_YEARS: i32 = 30;

/// Encode a logical type to its numeric wire value.
///
/// Returns `None` for tags without an encoder; the caller then generates the
/// base primitive instead.
pub fn encode_logical(logical: &LogicalType, ctx: &mut GenerationContext) -> Option<i64> {
    match logical {
        LogicalType::Date => encode_date(ctx),
        LogicalType::TimestampMillis => Some(timestamp_millis_now()),
        LogicalType::TimestampMicros => Some(timestamp_micros_now()),
        LogicalType::Other(_) => None,
    }
}

/// Random date in the window, as days since 1970-01-01.
///
/// Days stop at 28 so every month is valid.
pub fn encode_date(ctx: &mut GenerationContext) -> Option<i64> {
    let year = ctx.int_in(
        i64::from(DATE_FIRST_YEAR),
        i64::from(DATE_FIRST_YEAR + DATE_WINDOW_YEARS - 1),
    ) as i32;
    let month = ctx.int_in(1, 12) as u32;
    let day = ctx.int_in(1, 28) as u32;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    Some(date.signed_duration_since(epoch).num_days())
}

/// Current wall-clock time in milliseconds since the epoch.
pub fn timestamp_millis_now() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current wall-clock time in microseconds since the epoch.
pub fn timestamp_micros_now() -> i64 {
    timestamp_millis_now().saturating_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn days_to_date(days: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days)
    }

    #[test]
    fn test_encode_date_window() {
        let mut ctx = GenerationContext::new(42);

        for _ in 0..500 {
            let days = encode_date(&mut ctx).unwrap();
            let date = days_to_date(days);
            assert!((2000..=2029).contains(&date.year()));
            assert!(date.day() <= 28);
        }
    }

    #[test]
    fn test_known_date_encoding() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let y2k = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(y2k.signed_duration_since(epoch).num_days(), 10_957);
    }

    #[test]
    fn test_date_deterministic() {
        let mut ctx1 = GenerationContext::new(9);
        let mut ctx2 = GenerationContext::new(9);
        assert_eq!(encode_date(&mut ctx1), encode_date(&mut ctx2));
    }

    #[test]
    fn test_timestamps() {
        let mut ctx = GenerationContext::new(42);
        let before = Utc::now().timestamp_millis();
        let millis = encode_logical(&LogicalType::TimestampMillis, &mut ctx).unwrap();
        let micros = encode_logical(&LogicalType::TimestampMicros, &mut ctx).unwrap();
        let after = Utc::now().timestamp_millis();

        assert!(millis >= before && millis <= after);
        assert!(micros >= before * 1000 && micros <= after * 1000);
        assert_eq!(micros % 1000, 0);
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let mut ctx = GenerationContext::new(42);
        assert_eq!(
            encode_logical(&LogicalType::Other("decimal".to_string()), &mut ctx),
            None
        );
    }
}
