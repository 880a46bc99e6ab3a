//! `otpauth://` provisioning URIs, as consumed by authenticator apps.

use crate::config::{AuthUrlOptions, OtpKind};
use crate::error::{OtpError, Result};
use crate::secret::Encoding;

/// Build an `otpauth://` URI.
///
/// The secret is re-encoded as unpadded base32 whatever its original
/// encoding. The whole label, colon included, is percent-encoded.
pub fn auth_url(options: &AuthUrlOptions) -> Result<String> {
    let key = options.secret.decode()?;
    let secret = Encoding::Base32.encode(&key)?;

    let mut query = vec![
        format!("secret={secret}"),
        format!("algorithm={}", options.secret.algorithm().uri_name()),
        format!("digits={}", options.digits),
    ];
    if let Some(issuer) = &options.issuer {
        query.push(format!("issuer={}", urlencoding::encode(issuer)));
    }
    match options.kind {
        OtpKind::Hotp => {
            let counter = options.counter.ok_or(OtpError::MissingCounter)?;
            query.push(format!("counter={counter}"));
        }
        OtpKind::Totp => {
            if let Some(period) = options.period {
                query.push(format!("period={period}"));
            }
        }
    }

    Ok(format!(
        "otpauth://{kind}/{label}?{query}",
        kind = options.kind,
        label = urlencoding::encode(&options.label),
        query = query.join("&"),
    ))
}
