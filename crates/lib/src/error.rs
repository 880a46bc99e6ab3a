use hmac::digest::InvalidLength;

use crate::secret::Encoding;

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("secret is not valid {encoding}: {reason}")]
    InvalidEncoding {
        encoding: Encoding,
        reason: String,
    },

    /// Verification was asked for without a token to check.
    #[error("no token supplied for verification")]
    MissingToken,

    #[error("unsupported hash algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    #[error("digits must be 6, 7 or 8, got {0}")]
    InvalidDigits(u32),

    #[error("period must be 15, 30 or 60 seconds, got {0}")]
    InvalidPeriod(u64),

    #[error("invalid counter value: {0}")]
    InvalidCounter(String),

    #[error("time {time} is before the epoch {epoch}")]
    TimeBeforeEpoch { time: u64, epoch: u64 },

    #[error("counter arithmetic overflowed")]
    CounterOverflow,

    /// HOTP provisioning URIs must carry the initial counter.
    #[error("hotp uri requires a counter")]
    MissingCounter,

    #[error("error when computing HMAC")]
    HmacError(#[from] InvalidLength),
}

pub type Result<T> = std::result::Result<T, OtpError>;
