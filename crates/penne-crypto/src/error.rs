use std::string::FromUtf8Error;

use thiserror::Error;

pub type CryptoResult<T> = Result<T, PasteCryptoError>;

/// Failure causes inside the paste encryption layer.
///
/// Only [`PasteCryptoError::EntropyExhausted`] ever reaches callers of
/// [`crate::encrypt_paste`]. The decrypt path folds every other variant into
/// [`crate::DecryptedPaste::Unavailable`] and keeps the cause for logs only.
#[derive(Debug, Error)]
pub enum PasteCryptoError {
    #[error("OS random number generator unavailable: {0}")]
    EntropyExhausted(String),

    #[error("hex decode failed: {0}")]
    Decode(String),

    #[error("authentication failed: wrong key, corrupted data, or truncated ciphertext")]
    Auth,

    #[error("decrypted payload is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl From<hex::FromHexError> for PasteCryptoError {
    fn from(e: hex::FromHexError) -> Self {
        PasteCryptoError::Decode(e.to_string())
    }
}
