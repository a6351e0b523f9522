//! Key transport through the share link's `k` query parameter

use url::Url;

use crate::paste::{decrypt_paste, DecryptedPaste};

/// Query parameter that carries the hex paste key.
pub const KEY_PARAM: &str = "k";

/// Build the share link for an uploaded paste.
///
/// Any existing `k` parameter is replaced; other parameters are kept in order.
pub fn share_url(paste_url: &Url, key_hex: &str) -> Url {
    let kept: Vec<(String, String)> = paste_url
        .query_pairs()
        .filter(|(name, _)| name != KEY_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut url = paste_url.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
        pairs.append_pair(KEY_PARAM, key_hex);
    }
    url
}

/// Extract the key from a share link. Returns an empty string when absent.
pub fn key_from_url(url: &Url) -> String {
    url.query_pairs()
        .find(|(name, _)| name == KEY_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Decrypt a paste rendered at `url` using the key carried by that URL.
pub fn decrypt_from_url(
    url: &Url,
    title_cipher_hex: &str,
    text_cipher_hex: &str,
) -> DecryptedPaste {
    let key_hex = key_from_url(url);
    if key_hex.is_empty() {
        tracing::debug!("share link has no key parameter");
    }
    decrypt_paste(title_cipher_hex, text_cipher_hex, &key_hex)
}
