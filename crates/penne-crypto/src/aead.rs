//! XChaCha20-Poly1305 sealing of paste fields
//!
//! Sealed blob format (binary):
//! ```text
//! [24 bytes: random nonce][N bytes: ciphertext][16 bytes: Poly1305 tag]
//! ```
//!
//! No associated data is bound. Every call to [`seal`] draws a fresh nonce
//! from the OS CSPRNG, so sealing the same plaintext twice under one key
//! yields different blobs.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};

use crate::error::{CryptoResult, PasteCryptoError};
use crate::key::{fill_random, PasteKey};
use crate::{NONCE_SIZE, TAG_SIZE};

/// Encrypt `plaintext` under `key`.
///
/// Returns: `[24-byte nonce][ciphertext][16-byte tag]`
pub fn seal(key: &PasteKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    fill_random(&mut nonce_bytes)?;
    let nonce = XNonce::from_slice(&nonce_bytes);

    // Only reachable for payloads past the cipher's 256 GiB limit.
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| PasteCryptoError::Auth)?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);
    Ok(result)
}

/// Verify and decrypt a blob produced by [`seal`].
///
/// Fails with [`PasteCryptoError::Auth`] when the blob is shorter than
/// nonce + tag or the tag does not verify. No plaintext is returned on failure.
pub fn open(key: &PasteKey, blob: &[u8]) -> CryptoResult<Vec<u8>> {
    if blob.len() < NONCE_SIZE + TAG_SIZE {
        tracing::debug!(
            len = blob.len(),
            min = NONCE_SIZE + TAG_SIZE,
            "sealed blob too short"
        );
        return Err(PasteCryptoError::Auth);
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_SIZE);
    let nonce = XNonce::from_slice(nonce_bytes);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PasteCryptoError::Auth)
}
