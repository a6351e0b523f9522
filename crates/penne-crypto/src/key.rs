//! Paste key generation and hex transport encoding

use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{CryptoResult, PasteCryptoError};
use crate::KEY_SIZE;

/// A per-paste 256-bit encryption key. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PasteKey {
    bytes: [u8; KEY_SIZE],
}

impl PasteKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for PasteKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for PasteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasteKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Fill `buf` from the OS CSPRNG. There is no fallback source.
pub(crate) fn fill_random(buf: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| PasteCryptoError::EntropyExhausted(e.to_string()))
}

/// Generate a random 256-bit paste key.
pub fn generate_key() -> CryptoResult<PasteKey> {
    let mut bytes = [0u8; KEY_SIZE];
    fill_random(&mut bytes)?;
    Ok(PasteKey::from_bytes(bytes))
}

/// Encode a key as 64 lowercase hex characters.
pub fn encode_key(key: &PasteKey) -> String {
    hex::encode(key.as_bytes())
}

/// Reject anything but lowercase hex digits, so one byte string has one encoding.
fn check_lowercase_hex(encoded: &str) -> CryptoResult<()> {
    match encoded
        .bytes()
        .position(|b| !matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        Some(index) => Err(PasteCryptoError::Decode(format!(
            "non-lowercase-hex character at index {index}"
        ))),
        None => Ok(()),
    }
}

/// Decode lowercase hex into bytes.
pub fn decode_hex(encoded: &str) -> CryptoResult<Vec<u8>> {
    check_lowercase_hex(encoded)?;
    Ok(hex::decode(encoded)?)
}

/// Decode a 64-character lowercase hex string into a key.
pub fn decode_key(encoded: &str) -> CryptoResult<PasteKey> {
    check_lowercase_hex(encoded)?;
    let mut bytes = [0u8; KEY_SIZE];
    if let Err(e) = hex::decode_to_slice(encoded, &mut bytes) {
        bytes.zeroize();
        return Err(e.into());
    }
    Ok(PasteKey::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_generation() {
        let k1 = generate_key().unwrap();
        let k2 = generate_key().unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes(), "random keys must differ");
    }

    #[test]
    fn test_encode_is_lowercase_64_chars() {
        let key = PasteKey::from_bytes([0xABu8; KEY_SIZE]);
        let encoded = encode_key(&key);

        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded, "ab".repeat(32));
    }

    #[test]
    fn test_decode_roundtrip() {
        let key = generate_key().unwrap();
        let decoded = decode_key(&encode_key(&key)).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        let result = decode_key(&"zz".repeat(32));
        assert!(matches!(result, Err(PasteCryptoError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_short_key() {
        let result = decode_key(&"ab".repeat(31));
        assert!(matches!(result, Err(PasteCryptoError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_long_key() {
        assert!(decode_key(&"ab".repeat(33)).is_err());
    }

    #[test]
    fn test_decode_rejects_uppercase_key() {
        let key = generate_key().unwrap();
        let upper = encode_key(&key).to_uppercase();
        assert!(matches!(decode_key(&upper), Err(PasteCryptoError::Decode(_))));
        assert!(decode_key(&"AB".repeat(32)).is_err());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("00ff10").unwrap(), vec![0x00, 0xFF, 0x10]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert!(matches!(decode_hex("00FF"), Err(PasteCryptoError::Decode(_))));
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(decode_key("").is_err());
    }

    #[test]
    fn test_debug_redacts_bytes() {
        let key = PasteKey::from_bytes([0x42u8; KEY_SIZE]);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("42"));
    }

    proptest! {
        #[test]
        fn decode_rejects_wrong_length(s in "[0-9a-f]{0,130}") {
            prop_assume!(s.len() != 64);
            prop_assert!(decode_key(&s).is_err());
        }

        #[test]
        fn hex_roundtrip(bytes in proptest::array::uniform32(any::<u8>())) {
            let key = PasteKey::from_bytes(bytes);
            let back = decode_key(&encode_key(&key)).unwrap();
            prop_assert_eq!(back.as_bytes(), &bytes);
        }
    }
}
