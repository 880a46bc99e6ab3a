//! Counter derivation from wall-clock time, and conversion of loosely typed
//! counter input into `u64`.

use unix_time::Instant;

use crate::error::{OtpError, Result};

/// Whole seconds since the unix epoch.
pub fn unix_seconds(instant: Instant) -> u64 {
    (instant - Instant::at(0, 0)).as_secs()
}

/// Current unix time in whole seconds.
pub fn now() -> u64 {
    unix_seconds(Instant::now())
}

/// Number of whole `period`s elapsed between `epoch` and `time`.
pub fn counter_from_time(time: u64, period: u64, epoch: u64) -> Result<u64> {
    if period == 0 {
        return Err(OtpError::InvalidPeriod(period));
    }
    let elapsed = time
        .checked_sub(epoch)
        .ok_or(OtpError::TimeBeforeEpoch { time, epoch })?;
    Ok(elapsed / period)
}

/// Unix time, in seconds, at which the step after the one containing `time`
/// begins.
pub fn next_tick(time: u64, period: u64, epoch: u64) -> Result<u64> {
    let counter = counter_from_time(time, period, epoch)?;
    counter
        .checked_add(1)
        .and_then(|next| next.checked_mul(period))
        .and_then(|offset| offset.checked_add(epoch))
        .ok_or(OtpError::CounterOverflow)
}

/// Convert a floating point counter, as produced by environments without a
/// 64-bit integer type, into a `u64`.
///
/// Anything that is not an exactly representable non-negative integer below
/// 2^64 is rejected rather than truncated or saturated.
pub fn counter_from_f64(value: f64) -> Result<u64> {
    // 2^64, exactly representable as an f64
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;

    if !value.is_finite() {
        return Err(OtpError::InvalidCounter(format!("{value} is not finite")));
    }
    if value < 0.0 {
        return Err(OtpError::InvalidCounter(format!("{value} is negative")));
    }
    if value.fract() != 0.0 {
        return Err(OtpError::InvalidCounter(format!("{value} is not an integer")));
    }
    if value >= LIMIT {
        return Err(OtpError::InvalidCounter(format!("{value} does not fit in 64 bits")));
    }
    Ok(value as u64)
}

/// Parse a decimal counter, ignoring surrounding whitespace.
pub fn parse_counter(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OtpError::InvalidCounter(format!("`{text}` is not a decimal integer")));
    }
    trimmed
        .parse()
        .map_err(|_| OtpError::InvalidCounter(format!("`{text}` does not fit in 64 bits")))
}

#[cfg(test)]
mod test {
    use test_case::test_case;

    use super::*;

    #[test_case(0, 30, 0, 0)]
    #[test_case(29, 30, 0, 0)]
    #[test_case(30, 30, 0, 1)]
    #[test_case(59, 30, 0, 1)]
    #[test_case(1_111_111_109, 30, 0, 0x23523EC)]
    #[test_case(20_000_000_000, 30, 0, 0x27BC86AA)]
    #[test_case(100, 15, 10, 6)]
    #[test_case(119, 60, 60, 0)]
    fn it_derives_counters(time: u64, period: u64, epoch: u64, expected: u64) {
        assert_eq!(counter_from_time(time, period, epoch).unwrap(), expected);
    }

    #[test]
    fn time_before_epoch_is_rejected() {
        assert!(matches!(
            counter_from_time(10, 30, 11),
            Err(OtpError::TimeBeforeEpoch { time: 10, epoch: 11 })
        ));
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(matches!(counter_from_time(10, 0, 0), Err(OtpError::InvalidPeriod(0))));
    }

    #[test_case(0, 30, 0, 30)]
    #[test_case(29, 30, 0, 30)]
    #[test_case(30, 30, 0, 60)]
    #[test_case(100, 15, 10, 115)]
    fn it_finds_the_next_tick(time: u64, period: u64, epoch: u64, expected: u64) {
        assert_eq!(next_tick(time, period, epoch).unwrap(), expected);
    }

    #[test]
    fn next_tick_overflow_is_reported() {
        assert!(matches!(next_tick(u64::MAX, 1, 0), Err(OtpError::CounterOverflow)));
    }

    #[test]
    fn it_converts_instants() {
        assert_eq!(unix_seconds(Instant::at(1_234_567_890, 999_999_999)), 1_234_567_890);
    }

    #[test_case(0.0, 0)]
    #[test_case(10.0, 10)]
    #[test_case(9_007_199_254_740_992.0, 9_007_199_254_740_992)]
    fn it_accepts_integral_floats(value: f64, expected: u64) {
        assert_eq!(counter_from_f64(value).unwrap(), expected);
    }

    #[test_case(-1.0 ; "negative")]
    #[test_case(1.5 ; "fractional")]
    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinite")]
    #[test_case(18_446_744_073_709_551_616.0 ; "two to the sixty four")]
    fn it_rejects_unrepresentable_floats(value: f64) {
        assert!(matches!(counter_from_f64(value), Err(OtpError::InvalidCounter(_))));
    }

    #[test_case("0", 0)]
    #[test_case(" 42 ", 42)]
    #[test_case("18446744073709551615", u64::MAX)]
    fn it_parses_counters(text: &str, expected: u64) {
        assert_eq!(parse_counter(text).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("-1" ; "negative")]
    #[test_case("+1" ; "explicit sign")]
    #[test_case("1e3" ; "exponent")]
    #[test_case("18446744073709551616" ; "overflow")]
    fn it_rejects_bad_counter_text(text: &str) {
        assert!(matches!(parse_counter(text), Err(OtpError::InvalidCounter(_))));
    }
}
