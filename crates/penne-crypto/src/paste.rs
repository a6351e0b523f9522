//! Paste-level encryption: one key, two independently sealed fields
//!
//! The encryptor hands back a key plus two cipher hex strings for the
//! uploader. The decryptor never fails outward: any malformed input, wrong
//! key or tampering collapses into [`DecryptedPaste::Unavailable`] so callers
//! cannot tell which part was bad.

use serde::{Deserialize, Serialize};

use crate::aead::{open, seal};
use crate::error::CryptoResult;
use crate::key::{decode_hex, decode_key, encode_key, generate_key};

/// A plaintext paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub title: String,
    pub body: String,
}

impl Paste {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// File name used when saving the paste locally.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.title)
    }

    /// Text file rendering: title, blank line, body.
    pub fn file_contents(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}

/// Output of [`encrypt_paste`]. All fields are lowercase hex.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPaste {
    pub key_hex: String,
    pub title_cipher_hex: String,
    pub text_cipher_hex: String,
}

impl std::fmt::Debug for EncryptedPaste {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedPaste")
            .field("key_hex", &"[REDACTED]")
            .field("title_cipher_hex", &self.title_cipher_hex)
            .field("text_cipher_hex", &self.text_cipher_hex)
            .finish()
    }
}

/// Result of [`decrypt_paste`]. Title and body are present together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptedPaste {
    Plaintext(Paste),
    Unavailable,
}

impl DecryptedPaste {
    pub fn title(&self) -> Option<&str> {
        match self {
            DecryptedPaste::Plaintext(p) => Some(&p.title),
            DecryptedPaste::Unavailable => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            DecryptedPaste::Plaintext(p) => Some(&p.body),
            DecryptedPaste::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DecryptedPaste::Plaintext(_))
    }

    pub fn into_paste(self) -> Option<Paste> {
        match self {
            DecryptedPaste::Plaintext(p) => Some(p),
            DecryptedPaste::Unavailable => None,
        }
    }
}

/// Encrypt a title/body pair under a freshly generated key.
///
/// Each field is sealed separately with its own nonce. The only error is
/// [`crate::PasteCryptoError::EntropyExhausted`].
pub fn encrypt_paste(title: &str, body: &str) -> CryptoResult<EncryptedPaste> {
    let key = generate_key()?;

    let title_cipher = seal(&key, title.as_bytes())?;
    let text_cipher = seal(&key, body.as_bytes())?;

    Ok(EncryptedPaste {
        key_hex: encode_key(&key),
        title_cipher_hex: hex::encode(title_cipher),
        text_cipher_hex: hex::encode(text_cipher),
    })
}

/// Decrypt both paste fields with the key taken from the share link.
pub fn decrypt_paste(
    title_cipher_hex: &str,
    text_cipher_hex: &str,
    key_hex: &str,
) -> DecryptedPaste {
    match try_decrypt(title_cipher_hex, text_cipher_hex, key_hex) {
        Ok(paste) => DecryptedPaste::Plaintext(paste),
        Err(e) => {
            tracing::debug!(error = %e, "paste decryption failed");
            DecryptedPaste::Unavailable
        }
    }
}

fn try_decrypt(
    title_cipher_hex: &str,
    text_cipher_hex: &str,
    key_hex: &str,
) -> CryptoResult<Paste> {
    let key = decode_key(key_hex)?;
    let title_cipher = decode_hex(title_cipher_hex)?;
    let text_cipher = decode_hex(text_cipher_hex)?;

    let title = open(&key, &title_cipher)?;
    let body = open(&key, &text_cipher)?;

    Ok(Paste {
        title: String::from_utf8(title)?,
        body: String::from_utf8(body)?,
    })
}
