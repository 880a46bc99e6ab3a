//! Shared-secret handling.
//!
//! A secret travels as text in one of four encodings. Whatever the encoding,
//! the bytes it decodes to are what gets keyed into the HMAC, and those bytes
//! can be re-rendered in any of the other encodings without loss.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use data_encoding::BASE32_NOPAD;

use crate::config::Algorithm;
use crate::error::{OtpError, Result};

/// Textual encoding of a secret key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// 7-bit ASCII text, each character one key byte.
    #[default]
    Ascii,
    /// Hexadecimal, either case on input, lowercase on output.
    Hex,
    /// URL-safe base64 without padding.
    Base64Url,
    /// RFC 4648 base32 without padding.
    Base32,
}

impl Encoding {
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        let invalid = |reason: String| OtpError::InvalidEncoding {
            encoding: self,
            reason,
        };
        match self {
            Self::Ascii if text.is_ascii() => Ok(text.as_bytes().to_vec()),
            Self::Ascii => Err(invalid("non-ASCII character".to_string())),
            Self::Hex => hex::decode(text).map_err(|e| invalid(e.to_string())),
            Self::Base64Url => URL_SAFE_NO_PAD
                .decode(text)
                .map_err(|e| invalid(e.to_string())),
            Self::Base32 => BASE32_NOPAD
                .decode(text.as_bytes())
                .map_err(|e| invalid(e.to_string())),
        }
    }

    pub fn encode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Ascii => ascii_text(bytes).ok_or_else(|| OtpError::InvalidEncoding {
                encoding: self,
                reason: "byte outside the ASCII range".to_string(),
            }),
            Self::Hex => Ok(hex::encode(bytes)),
            Self::Base64Url => Ok(URL_SAFE_NO_PAD.encode(bytes)),
            Self::Base32 => Ok(BASE32_NOPAD.encode(bytes)),
        }
    }
}

fn ascii_text(bytes: &[u8]) -> Option<String> {
    bytes
        .is_ascii()
        .then(|| bytes.iter().copied().map(char::from).collect())
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascii => "ascii",
            Self::Hex => "hex",
            Self::Base64Url => "base64url",
            Self::Base32 => "base32",
        })
    }
}

impl FromStr for Encoding {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "hex" => Ok(Self::Hex),
            "base64url" => Ok(Self::Base64Url),
            "base32" => Ok(Self::Base32),
            _ => Err(OtpError::InvalidEncoding {
                encoding: Self::Ascii,
                reason: format!("unknown encoding `{s}`"),
            }),
        }
    }
}

/// A shared secret as supplied by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    key: String,
    encoding: Encoding,
    algorithm: Algorithm,
}

impl Secret {
    pub fn new(key: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            key: key.into(),
            encoding,
            algorithm: Algorithm::default(),
        }
    }

    pub fn ascii(key: impl Into<String>) -> Self {
        Self::new(key, Encoding::Ascii)
    }

    pub fn hex(key: impl Into<String>) -> Self {
        Self::new(key, Encoding::Hex)
    }

    pub fn base32(key: impl Into<String>) -> Self {
        Self::new(key, Encoding::Base32)
    }

    pub fn base64url(key: impl Into<String>) -> Self {
        Self::new(key, Encoding::Base64Url)
    }

    /// Wrap raw key bytes, rendering them as lowercase hex.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(hex::encode(bytes), Encoding::Hex)
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The key bytes the HMAC is computed with.
    pub fn decode(&self) -> Result<Vec<u8>> {
        self.encoding.decode(&self.key)
    }

    /// Render the secret in every supported encoding.
    pub fn to_all_encodings(&self) -> Result<Secrets> {
        let bytes = self.decode()?;
        Ok(Secrets::from_bytes(&bytes))
    }
}

// Keep key material out of debug output and therefore out of logs.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("key", &"<redacted>")
            .field("encoding", &self.encoding)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// One secret in all four encodings.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Secrets {
    /// `None` when some byte is outside the ASCII range.
    pub ascii: Option<String>,
    pub hex: String,
    pub base64url: String,
    pub base32: String,
}

impl Secrets {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            ascii: ascii_text(bytes),
            hex: hex::encode(bytes),
            base64url: URL_SAFE_NO_PAD.encode(bytes),
            base32: BASE32_NOPAD.encode(bytes),
        }
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets").finish_non_exhaustive()
    }
}
