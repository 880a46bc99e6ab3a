//! Token generation and window-based verification.
//!
//! Both HOTP and TOTP end up here once a counter is known. The only
//! difference between them at this level is whether the search window
//! extends below the expected counter.

use subtle::ConstantTimeEq;
use tracing::{debug, trace};

use crate::config::Digits;
use crate::digest::{digest, truncate};
use crate::error::{OtpError, Result};
use crate::secret::Secret;

/// Generate the token for `secret` at `counter`.
pub fn get_token(secret: &Secret, digits: Digits, counter: u64) -> Result<String> {
    let key = secret.decode()?;
    token_for_key(secret, &key, digits, counter)
}

fn token_for_key(secret: &Secret, key: &[u8], digits: Digits, counter: u64) -> Result<String> {
    let hs = digest(secret.algorithm(), key, counter)?;
    Ok(truncate(&hs, digits))
}

/// Find how many steps away from `counter` the supplied `token` was generated.
///
/// With `two_sided` unset the search covers `counter..=counter + window`,
/// otherwise `counter - window..=counter + window`. Counters are scanned in
/// ascending order and the first match wins. The returned delta is the
/// matching counter minus `counter`: zero for an exact match, negative when
/// the token is older than expected.
///
/// `window` is capped at `i64::MAX` so that every delta fits in an `i64`.
///
/// `Ok(None)` means no counter in the window produced the token, including
/// when the token simply has the wrong length. An empty token is a caller
/// error and fails with [`OtpError::MissingToken`].
pub fn get_delta(
    secret: &Secret,
    digits: Digits,
    token: &str,
    counter: u64,
    window: u64,
    two_sided: bool,
) -> Result<Option<i64>> {
    if token.is_empty() {
        return Err(OtpError::MissingToken);
    }
    if token.len() != digits.width() {
        debug!(
            expected = digits.value(),
            got = token.len(),
            "token length mismatch"
        );
        return Ok(None);
    }

    let key = secret.decode()?;
    let window = window.min(i64::MAX as u64);
    let start = if two_sided {
        counter.saturating_sub(window)
    } else {
        counter
    };
    let end = counter.saturating_add(window);
    trace!(start, end, two_sided, "scanning verification window");

    for candidate in start..=end {
        let expected = token_for_key(secret, &key, digits, candidate)?;
        if bool::from(expected.as_bytes().ct_eq(token.as_bytes())) {
            let delta = i64::try_from(i128::from(candidate) - i128::from(counter))
                .map_err(|_| OtpError::CounterOverflow)?;
            debug!(delta, "token matched");
            return Ok(Some(delta));
        }
    }

    debug!(start, end, "no token match in window");
    Ok(None)
}

/// Whether `token` matches any counter in the window. See [`get_delta`].
pub fn verify(
    secret: &Secret,
    digits: Digits,
    token: &str,
    counter: u64,
    window: u64,
    two_sided: bool,
) -> Result<bool> {
    Ok(get_delta(secret, digits, token, counter, window, two_sided)?.is_some())
}
