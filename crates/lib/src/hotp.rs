use crate::config::{Digits, HotpOptions};
use crate::error::{OtpError, Result};
use crate::secret::Secret;
use crate::verify;
use crate::{CounterSource, Otp};

/// Token for `options.secret` at `options.counter`.
pub fn token(options: &HotpOptions) -> Result<String> {
    verify::get_token(&options.secret, options.digits, options.counter)
}

/// Steps past `options.counter` at which `token` was generated, looking at
/// most `options.window` counters ahead.
pub fn delta(options: &HotpOptions, token: &str) -> Result<Option<i64>> {
    verify::get_delta(
        &options.secret,
        options.digits,
        token,
        options.counter,
        options.window,
        false,
    )
}

/// Like [`delta`], but the window also extends `options.window` counters
/// behind `options.counter`. Used by TOTP once it has derived a counter.
pub(crate) fn delta_around(options: &HotpOptions, token: &str) -> Result<Option<i64>> {
    verify::get_delta(
        &options.secret,
        options.digits,
        token,
        options.counter,
        options.window,
        true,
    )
}

pub fn verify(options: &HotpOptions, token: &str) -> Result<bool> {
    Ok(delta(options, token)?.is_some())
}

/// HMAC-based one-time passcode
///
/// Uses a counter to generate the passcode. The counter is
/// incremented after a passcode is generated, and moved past
/// the matching counter after a successful verification. Once
/// `u64::MAX` has been used the handle is exhausted and fails
/// with [`OtpError::CounterOverflow`](crate::OtpError::CounterOverflow).
pub type Hotp = Otp<Counter>;

impl Hotp {
    /// Get a HOTP generator with the given `secret`, initial count, and which
    /// generates passcodes of `digits` length.
    pub fn new(secret: Secret, initial_count: u64, digits: Digits) -> Self {
        Otp {
            secret,
            generator: Counter {
                count: Some(initial_count),
            },
            digits,
            window: 0,
        }
    }

    /// The counter the next passcode will be generated at, or `None` once
    /// every counter has been used.
    pub fn count(&self) -> Option<u64> {
        self.generator.count
    }
}

/// The backing type which implements the [`CounterSource`] interface,
/// using an explicit counter.
#[derive(Clone, Copy, Debug)]
pub struct Counter {
    count: Option<u64>,
}

impl CounterSource for Counter {
    const TWO_SIDED: bool = false;

    fn counter(&self) -> Result<u64> {
        self.count.ok_or(OtpError::CounterOverflow)
    }

    fn advance(&mut self, used: u64) {
        self.count = used.checked_add(1);
    }
}
