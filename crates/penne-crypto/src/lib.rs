//! penne-crypto: client-side E2E encryption for penne pastes
//!
//! The server only ever sees ciphertext. Each paste gets a fresh random key
//! that travels to the viewer in the share URL's `k` query parameter.
//!
//! ```text
//! Paste Key (256-bit, OS CSPRNG, one per paste)
//!   ├── title: XChaCha20-Poly1305 (nonce=random_192bit, no AAD)
//!   └── body:  XChaCha20-Poly1305 (nonce=random_192bit, no AAD)
//!
//! Cipher blob: [24 bytes: nonce][N bytes: ciphertext][16 bytes: tag] → lowercase hex
//! Share link:  {paste_url}?k={64 hex chars}
//! ```

pub mod aead;
pub mod error;
pub mod key;
pub mod paste;
pub mod share;
pub mod submission;

pub use aead::{open, seal};
pub use error::{CryptoResult, PasteCryptoError};
pub use key::{decode_hex, decode_key, encode_key, generate_key, PasteKey};
pub use paste::{decrypt_paste, encrypt_paste, DecryptedPaste, EncryptedPaste, Paste};
pub use share::{decrypt_from_url, key_from_url, share_url, KEY_PARAM};
pub use submission::{Submission, DEFAULT_TITLE};

/// Size of a paste key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an XChaCha20-Poly1305 nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;
