//! HMAC-based (RFC 4226) and time-based (RFC 6238) one-time passcodes.
//!
//! The stateless entry points live in [`hotp`] and [`totp`], each taking an
//! options struct with the usual defaults (SHA-1, 6 digits, 30 second steps).
//! [`Hotp`] and [`Totp`] are reusable handles built on the same functions.
//!
//! ```
//! use onetime::{hotp, HotpOptions, Secret};
//!
//! let opts = HotpOptions::new(Secret::ascii("12345678901234567890")).counter(1);
//! assert_eq!(hotp::token(&opts).unwrap(), "287082");
//! assert!(hotp::verify(&opts, "287082").unwrap());
//! ```

pub mod clock;
pub mod config;
pub mod digest;
pub mod error;
pub mod hotp;
pub mod random;
pub mod secret;
pub mod totp;
pub mod uri;
pub mod verify;

pub use config::{
    Algorithm, AuthUrlOptions, Digits, GenerateSecretOptions, HotpOptions, OtpKind, Period,
    TotpOptions,
};
pub use digest::format_counter;
pub use error::{OtpError, Result};
pub use hotp::Hotp;
pub use random::{generate_secret, generate_secret_ascii, seed, GeneratedSecret};
pub use secret::{Encoding, Secret, Secrets};
pub use totp::Totp;
pub use uri::auth_url;

/// Where an [`Otp`] gets the counter for its next passcode.
pub trait CounterSource {
    /// Whether verification also accepts counters behind the current one.
    const TWO_SIDED: bool;

    fn counter(&self) -> Result<u64>;

    /// Called with the counter a passcode was just generated or accepted at.
    fn advance(&mut self, _used: u64) {}
}

/// A one-time passcode generator over some [`CounterSource`].
pub struct Otp<G> {
    pub(crate) secret: Secret,
    pub(crate) generator: G,
    pub(crate) digits: Digits,
    pub(crate) window: u64,
}

impl<G: CounterSource> Otp<G> {
    /// Accept passcodes up to `window` steps from the current counter when
    /// verifying.
    pub fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// Get the current passcode.
    pub fn get(&mut self) -> Result<String> {
        let counter = self.generator.counter()?;
        let token = verify::get_token(&self.secret, self.digits, counter)?;
        self.generator.advance(counter);
        Ok(token)
    }

    /// Steps between the current counter and the one `token` matches.
    ///
    /// See [`verify::get_delta`].
    pub fn delta(&mut self, token: &str) -> Result<Option<i64>> {
        let counter = self.generator.counter()?;
        let delta = verify::get_delta(
            &self.secret,
            self.digits,
            token,
            counter,
            self.window,
            G::TWO_SIDED,
        )?;
        if let Some(delta) = delta {
            self.generator.advance(counter.saturating_add_signed(delta));
        }
        Ok(delta)
    }

    pub fn verify(&mut self, token: &str) -> Result<bool> {
        Ok(self.delta(token)?.is_some())
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn digits(&self) -> Digits {
        self.digits
    }
}
