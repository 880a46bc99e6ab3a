//! Fresh secrets from the operating system's CSPRNG.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

use crate::config::{AuthUrlOptions, GenerateSecretOptions, OtpKind};
use crate::error::Result;
use crate::secret::{Secret, Secrets};
use crate::uri::auth_url;

/// Length of a generated ASCII secret when none is requested.
pub const DEFAULT_SECRET_LENGTH: usize = 32;

/// Bytes of entropy in a [`seed`]; the size of an HMAC-SHA1 key.
pub const SEED_LENGTH: usize = 20;

const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const SYMBOLS: &[u8] = b"!@#$%^&*()<>?/[]{},.:;";

/// A random hex-encoded seed.
///
/// When a device `serial` is given its big-endian bytes take the place of
/// the last eight random bytes, so seeds issued to distinct serials never
/// collide.
pub fn seed(serial: Option<u64>) -> String {
    let mut bytes = [0u8; SEED_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    if let Some(serial) = serial {
        bytes[SEED_LENGTH - 8..].copy_from_slice(&serial.to_be_bytes());
    }
    hex::encode(bytes)
}

/// A random printable secret of `length` characters (default 32), drawn from
/// `[0-9A-Za-z]` and, with `symbols`, a set of punctuation.
pub fn generate_secret_ascii(length: Option<usize>, symbols: bool) -> String {
    let length = length.unwrap_or(DEFAULT_SECRET_LENGTH);
    let charset: Vec<u8> = if symbols {
        ALPHANUMERIC.iter().chain(SYMBOLS).copied().collect()
    } else {
        ALPHANUMERIC.to_vec()
    };
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(charset[rng.gen_range(0..charset.len())]))
        .collect()
}

/// A newly generated secret.
#[derive(Clone, Debug)]
pub struct GeneratedSecret {
    pub secret: Secret,
    pub encodings: Secrets,
    /// TOTP provisioning URI, present when a name was supplied.
    pub otpauth_url: Option<String>,
}

/// Generate an ASCII secret along with its other encodings and, if
/// `options.name` is set, a TOTP `otpauth://` URI for it.
pub fn generate_secret(options: &GenerateSecretOptions) -> Result<GeneratedSecret> {
    let ascii = generate_secret_ascii(Some(options.length), options.symbols);
    let secret = Secret::ascii(ascii).with_algorithm(options.algorithm);
    let encodings = secret.to_all_encodings()?;

    let otpauth_url = match &options.name {
        Some(name) => {
            let mut url_opts = AuthUrlOptions::new(OtpKind::Totp, secret.clone(), name.clone());
            url_opts.issuer = options.issuer.clone();
            Some(auth_url(&url_opts)?)
        }
        None => None,
    };

    Ok(GeneratedSecret {
        secret,
        encodings,
        otpauth_url,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seed_is_twenty_bytes_of_hex() {
        let s = seed(None);
        assert_eq!(s.len(), SEED_LENGTH * 2);
        assert!(s.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(s, seed(None));
    }

    #[test]
    fn seed_embeds_the_serial() {
        let s = seed(Some(0x0102_0304_0506_0708));
        assert!(s.ends_with("0102030405060708"), "{s}");
    }

    #[test]
    fn ascii_secret_defaults_to_32_alphanumerics() {
        let s = generate_secret_ascii(None, false);
        assert_eq!(s.len(), DEFAULT_SECRET_LENGTH);
        assert!(s.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn ascii_secret_with_symbols_stays_in_charset() {
        let s = generate_secret_ascii(Some(512), true);
        assert_eq!(s.len(), 512);
        assert!(s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || SYMBOLS.contains(&b)));
    }

    #[test]
    fn generated_secret_is_consistent() {
        let opts = GenerateSecretOptions::default()
            .name("alice")
            .issuer("ACME");
        let generated = generate_secret(&opts).unwrap();
        assert_eq!(
            generated.encodings.ascii.as_deref(),
            Some(generated.secret.key())
        );
        let url = generated.otpauth_url.unwrap();
        assert!(url.starts_with("otpauth://totp/alice?secret="), "{url}");
        assert!(url.contains(&generated.encodings.base32), "{url}");
        assert!(url.ends_with("&issuer=ACME"), "{url}");
    }

    #[test]
    fn no_name_means_no_url() {
        let generated = generate_secret(&GenerateSecretOptions::default()).unwrap();
        assert!(generated.otpauth_url.is_none());
    }
}
