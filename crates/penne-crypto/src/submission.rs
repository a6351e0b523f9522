//! Upload-side glue: turns form input into the fields sent to the server
//! and the URL the uploader lands on afterwards.

use url::Url;

use crate::error::CryptoResult;
use crate::paste::encrypt_paste;
use crate::share::share_url;

/// Title used when the uploader leaves the name field empty.
pub const DEFAULT_TITLE: &str = "Unnamed";

/// Form fields ready to post, plus the key when they are encrypted.
#[derive(Clone)]
pub struct Submission {
    paste_name: String,
    paste_text: String,
    key_hex: Option<String>,
}

impl Submission {
    /// Prepare a paste for upload. With `e2ee` set both fields are replaced
    /// by their cipher hex and the key is held back for the share link.
    pub fn prepare(title: &str, body: &str, e2ee: bool) -> CryptoResult<Self> {
        let title = if title.is_empty() { DEFAULT_TITLE } else { title };

        if !e2ee {
            return Ok(Self {
                paste_name: title.to_string(),
                paste_text: body.to_string(),
                key_hex: None,
            });
        }

        let enc = encrypt_paste(title, body)?;
        tracing::debug!(
            title_len = enc.title_cipher_hex.len(),
            text_len = enc.text_cipher_hex.len(),
            "paste encrypted for upload"
        );
        Ok(Self {
            paste_name: enc.title_cipher_hex,
            paste_text: enc.text_cipher_hex,
            key_hex: Some(enc.key_hex),
        })
    }

    /// `(pasteName, pasteText)` form field values.
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [
            ("pasteName", self.paste_name.as_str()),
            ("pasteText", self.paste_text.as_str()),
        ]
    }

    pub fn is_encrypted(&self) -> bool {
        self.key_hex.is_some()
    }

    pub fn key_hex(&self) -> Option<&str> {
        self.key_hex.as_deref()
    }

    /// Where to send the uploader once the server has stored the paste.
    pub fn redirect_url(&self, response_url: &Url) -> Url {
        match &self.key_hex {
            Some(key) => share_url(response_url, key),
            None => response_url.clone(),
        }
    }
}

impl std::fmt::Debug for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submission")
            .field("paste_name", &self.paste_name)
            .field("paste_text_len", &self.paste_text.len())
            .field("encrypted", &self.is_encrypted())
            .finish()
    }
}
