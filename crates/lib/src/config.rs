//! Per-call configuration.
//!
//! There are no process-wide defaults to mutate: every operation takes its
//! options explicitly, and the documented defaults (SHA-1, 6 digits, 30 second
//! period, epoch 0, window 0) are applied when an options value is built.

use std::fmt;
use std::str::FromStr;

use crate::error::{OtpError, Result};
use crate::secret::Secret;

/// Hash function underlying the HMAC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// HMAC-SHA1, the RFC 4226 algorithm and what most authenticators expect.
    #[default]
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Name as it appears in the `algorithm` parameter of an `otpauth://` URI.
    pub fn uri_name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }

    /// Size in bytes of the digest this algorithm produces.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

/// Accepts names case-insensitively, with or without a hyphen
/// (`sha1`, `SHA-1`, `Sha256`, ...).
impl FromStr for Algorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(OtpError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Number of decimal digits in a token. Only 6, 7 and 8 are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Digits(u32);

impl Digits {
    pub const SIX: Digits = Digits(6);
    pub const SEVEN: Digits = Digits(7);
    pub const EIGHT: Digits = Digits(8);

    pub fn value(self) -> u32 {
        self.0
    }

    /// `10^digits`, the modulus applied to the truncated value.
    pub fn modulus(self) -> u32 {
        10_u32.pow(self.0)
    }

    pub(crate) fn width(self) -> usize {
        self.0 as usize
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self::SIX
    }
}

impl TryFrom<u32> for Digits {
    type Error = OtpError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            6..=8 => Ok(Digits(value)),
            _ => Err(OtpError::InvalidDigits(value)),
        }
    }
}

impl From<Digits> for u32 {
    fn from(digits: Digits) -> Self {
        digits.0
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TOTP time step in seconds. Only 15, 30 and 60 are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct Period(u64);

impl Period {
    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl Default for Period {
    fn default() -> Self {
        Period(30)
    }
}

impl TryFrom<u64> for Period {
    type Error = OtpError;

    fn try_from(value: u64) -> Result<Self> {
        match value {
            15 | 30 | 60 => Ok(Period(value)),
            _ => Err(OtpError::InvalidPeriod(value)),
        }
    }
}

impl From<Period> for u64 {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which flavour of one-time password a credential is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OtpKind {
    Hotp,
    #[default]
    Totp,
}

impl fmt::Display for OtpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hotp => "hotp",
            Self::Totp => "totp",
        })
    }
}

/// Options for counter-based (HOTP) generation and verification.
#[derive(Clone, Debug)]
pub struct HotpOptions {
    pub secret: Secret,
    pub digits: Digits,
    /// Counter to generate at, or the lowest counter to accept when verifying.
    pub counter: u64,
    /// How many counters past `counter` verification will look at.
    pub window: u64,
}

impl HotpOptions {
    pub fn new(secret: Secret) -> Self {
        Self {
            secret,
            digits: Digits::default(),
            counter: 0,
            window: 0,
        }
    }

    pub fn digits(mut self, digits: Digits) -> Self {
        self.digits = digits;
        self
    }

    pub fn counter(mut self, counter: u64) -> Self {
        self.counter = counter;
        self
    }

    pub fn window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }
}

/// Options for time-based (TOTP) generation and verification.
#[derive(Clone, Debug)]
pub struct TotpOptions {
    pub secret: Secret,
    pub digits: Digits,
    pub period: Period,
    /// Unix time, in seconds, at which counting starts.
    pub epoch: u64,
    /// Unix time in seconds to use instead of the system clock.
    pub time: Option<u64>,
    /// Steps either side of the current one that verification accepts.
    pub window: u64,
}

impl TotpOptions {
    pub fn new(secret: Secret) -> Self {
        Self {
            secret,
            digits: Digits::default(),
            period: Period::default(),
            epoch: 0,
            time: None,
            window: 0,
        }
    }

    pub fn digits(mut self, digits: Digits) -> Self {
        self.digits = digits;
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn time(mut self, time: u64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }
}

/// Options for building an `otpauth://` provisioning URI.
#[derive(Clone, Debug)]
pub struct AuthUrlOptions {
    pub kind: OtpKind,
    pub secret: Secret,
    /// Account label, usually `Issuer:account` or just the account name.
    pub label: String,
    pub issuer: Option<String>,
    pub digits: Digits,
    /// Initial counter; required for HOTP, ignored for TOTP.
    pub counter: Option<u64>,
    /// Emitted for TOTP whenever set.
    pub period: Option<Period>,
}

impl AuthUrlOptions {
    pub fn new(kind: OtpKind, secret: Secret, label: impl Into<String>) -> Self {
        Self {
            kind,
            secret,
            label: label.into(),
            issuer: None,
            digits: Digits::default(),
            counter: None,
            period: None,
        }
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn digits(mut self, digits: Digits) -> Self {
        self.digits = digits;
        self
    }

    pub fn counter(mut self, counter: u64) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }
}

/// Options for [`crate::random::generate_secret`].
#[derive(Clone, Debug)]
pub struct GenerateSecretOptions {
    pub length: usize,
    pub symbols: bool,
    /// Account label for the accompanying TOTP URI; no URI without it.
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub algorithm: Algorithm,
}

impl Default for GenerateSecretOptions {
    fn default() -> Self {
        Self {
            length: crate::random::DEFAULT_SECRET_LENGTH,
            symbols: false,
            name: None,
            issuer: None,
            algorithm: Algorithm::default(),
        }
    }
}

impl GenerateSecretOptions {
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn symbols(mut self, symbols: bool) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}
