//! HMAC computation and RFC 4226 dynamic truncation.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::config::{Algorithm, Digits};
use crate::error::{OtpError, Result};

/// Render a counter as the 16 hex digit, zero padded string that is fed to
/// the HMAC.
pub fn format_counter(counter: u64) -> String {
    format!("{counter:016x}")
}

/// The 8 byte big-endian message for `counter`, obtained by decoding
/// [`format_counter`]'s output.
pub fn counter_bytes(counter: u64) -> Result<[u8; 8]> {
    let mut bytes = [0u8; 8];
    hex::decode_to_slice(format_counter(counter), &mut bytes)
        .map_err(|e| OtpError::InvalidCounter(e.to_string()))?;
    Ok(bytes)
}

/// HMAC of the counter message under `key`.
pub fn digest(algorithm: Algorithm, key: &[u8], counter: u64) -> Result<Vec<u8>> {
    let message = counter_bytes(counter)?;
    match algorithm {
        Algorithm::Sha1 => mac::<Hmac<Sha1>>(key, &message),
        Algorithm::Sha256 => mac::<Hmac<Sha256>>(key, &message),
        Algorithm::Sha384 => mac::<Hmac<Sha384>>(key, &message),
        Algorithm::Sha512 => mac::<Hmac<Sha512>>(key, &message),
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Dynamic truncation (RFC 4226 §5.3) of `hs` into a `digits` long token.
///
/// Bytes past the end of a short digest read as zero rather than panicking.
/// Real HMAC outputs are always long enough.
pub fn truncate(hs: &[u8], digits: Digits) -> String {
    let snum = u32::from_be_bytes(dt(hs));
    let code = snum % digits.modulus();
    format!("{code:0width$}", width = digits.width())
}

fn dt(hs: &[u8]) -> [u8; 4] {
    let offset = dt_offset(hs);
    let mut substr = dt_substr(hs, offset);
    substr[0] &= 0b0111_1111;
    substr
}

fn dt_substr(hs: &[u8], offset: usize) -> [u8; 4] {
    let at = |i: usize| hs.get(offset + i).copied().unwrap_or(0);
    [at(0), at(1), at(2), at(3)]
}

fn dt_offset(hs: &[u8]) -> usize {
    hs.last().map_or(0, |last| usize::from(last & 0b1111))
}
