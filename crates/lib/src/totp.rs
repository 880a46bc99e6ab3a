use unix_time::Instant;

use crate::clock::{self, unix_seconds};
use crate::config::{Digits, HotpOptions, Period, TotpOptions};
use crate::error::Result;
use crate::hotp;
use crate::secret::Secret;
use crate::{CounterSource, Otp};

fn current_time(options: &TotpOptions) -> u64 {
    options.time.unwrap_or_else(clock::now)
}

/// The time step `options.time` (or now) falls in.
pub fn counter(options: &TotpOptions) -> Result<u64> {
    clock::counter_from_time(
        current_time(options),
        options.period.as_secs(),
        options.epoch,
    )
}

/// The HOTP parameters equivalent to `options` at the current time step.
fn at_current_step(options: &TotpOptions) -> Result<HotpOptions> {
    Ok(HotpOptions::new(options.secret.clone())
        .digits(options.digits)
        .counter(counter(options)?)
        .window(options.window))
}

pub fn token(options: &TotpOptions) -> Result<String> {
    hotp::token(&at_current_step(options)?)
}

/// Steps between the current time step and the one `token` was generated
/// in, searching `options.window` steps either side.
///
/// Negative deltas mean the token is older than the current step.
pub fn delta(options: &TotpOptions, token: &str) -> Result<Option<i64>> {
    hotp::delta_around(&at_current_step(options)?, token)
}

pub fn verify(options: &TotpOptions, token: &str) -> Result<bool> {
    Ok(delta(options, token)?.is_some())
}

/// When the current token stops being the current one.
pub fn next_tick(options: &TotpOptions) -> Result<Instant> {
    let at = clock::next_tick(
        current_time(options),
        options.period.as_secs(),
        options.epoch,
    )?;
    Ok(Instant::at(at, 0))
}

/// Time-based one-time passcode.
///
/// Provides one-time passcodes that are valid within a window
/// of time after the passcode is generated.
pub type Totp = Otp<Time>;

impl Totp {
    /// Get a TOTP generator.
    ///
    /// Repeated calls to [`Self::get`] will return the same
    /// passcode when in the same `step`.
    pub fn new(secret: Secret, t0: Instant, step: Period, digits: Digits) -> Self {
        Totp::new_with_now(secret, t0, step, digits, Box::new(Instant::now))
    }

    /// Get a TOTP generator with a custom function to provide the
    /// "now" value.
    ///
    /// See [`Self::new`].
    pub fn new_with_now(
        secret: Secret,
        t0: Instant,
        step: Period,
        digits: Digits,
        now: Box<dyn Fn() -> Instant + Send + Sync>,
    ) -> Self {
        Otp {
            secret,
            generator: Time { t0, step, now },
            digits,
            window: 0,
        }
    }

    /// When the passcode returned by [`Self::get`] will change.
    pub fn next_tick(&self) -> Result<Instant> {
        let at = clock::next_tick(
            unix_seconds((self.generator.now)()),
            self.generator.step.as_secs(),
            unix_seconds(self.generator.t0),
        )?;
        Ok(Instant::at(at, 0))
    }
}

/// The backing type which implements the [`CounterSource`] interface,
/// using the current time to derive the counter.
pub struct Time {
    t0: Instant,
    step: Period,
    now: Box<dyn Fn() -> Instant + Send + Sync>,
}

impl CounterSource for Time {
    const TWO_SIDED: bool = true;

    fn counter(&self) -> Result<u64> {
        clock::counter_from_time(
            unix_seconds((self.now)()),
            self.step.as_secs(),
            unix_seconds(self.t0),
        )
    }
}
