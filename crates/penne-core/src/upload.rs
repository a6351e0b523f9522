//! Uploader flow on top of penne-crypto, driven by [`ShareConfig`].

use url::Url;

use penne_crypto::Submission;

use crate::config::ShareConfig;
use crate::error::PenneResult;

/// Form fields to post plus the URL the uploader lands on afterwards.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub submission: Submission,
    pub redirect_url: Url,
}

/// Prepare a paste for upload.
///
/// An empty title takes `share.default_title`. Encryption follows
/// `share.e2ee` unless `force_plain` is set. Without a `response_url` the
/// redirect is computed against `share.base_url`.
pub fn prepare_upload(
    share: &ShareConfig,
    title: &str,
    body: &str,
    force_plain: bool,
    response_url: Option<&Url>,
) -> PenneResult<PreparedUpload> {
    let title = if title.is_empty() {
        share.default_title.as_str()
    } else {
        title
    };
    let e2ee = share.e2ee && !force_plain;

    let submission = Submission::prepare(title, body, e2ee)?;
    let response_url = match response_url {
        Some(u) => u.clone(),
        None => share.base_url()?,
    };
    let redirect_url = submission.redirect_url(&response_url);

    tracing::info!(encrypted = submission.is_encrypted(), "submission prepared");
    Ok(PreparedUpload {
        submission,
        redirect_url,
    })
}

/// A fresh paste key in its transport encoding.
pub fn new_key_hex() -> PenneResult<String> {
    let key = penne_crypto::generate_key()?;
    Ok(penne_crypto::encode_key(&key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PenneError;

    #[test]
    fn test_prepare_encrypted_against_base_url() {
        let share = ShareConfig::default();
        let upload = prepare_upload(&share, "", "body", false, None).unwrap();

        assert!(upload.submission.is_encrypted());
        assert_eq!(upload.redirect_url.host_str(), Some("localhost"));

        let key = penne_crypto::key_from_url(&upload.redirect_url);
        let [(_, name), (_, text)] = upload.submission.fields();
        let dec = penne_crypto::decrypt_paste(name, text, &key);
        assert_eq!(dec.title(), Some(penne_crypto::DEFAULT_TITLE));
        assert_eq!(dec.body(), Some("body"));
    }

    #[test]
    fn test_prepare_plain_uses_config_title() {
        let share = ShareConfig {
            default_title: "Untitled".into(),
            ..ShareConfig::default()
        };
        let response = Url::parse("https://paste.example.com/p/7").unwrap();

        let upload = prepare_upload(&share, "", "body", true, Some(&response)).unwrap();

        assert!(!upload.submission.is_encrypted());
        assert_eq!(upload.submission.fields()[0], ("pasteName", "Untitled"));
        assert_eq!(upload.redirect_url, response);
    }

    #[test]
    fn test_prepare_respects_disabled_e2ee() {
        let share = ShareConfig {
            e2ee: false,
            ..ShareConfig::default()
        };
        let upload = prepare_upload(&share, "t", "b", false, None).unwrap();
        assert!(!upload.submission.is_encrypted());
    }

    #[test]
    fn test_prepare_bad_base_url() {
        let share = ShareConfig {
            base_url: "not a url".into(),
            ..ShareConfig::default()
        };
        let result = prepare_upload(&share, "t", "b", false, None);
        assert!(matches!(result, Err(PenneError::Url(_))));
    }

    #[test]
    fn test_new_key_hex() {
        let key = new_key_hex().unwrap();
        assert_eq!(key.len(), 64);
        assert!(penne_crypto::decode_key(&key).is_ok());
    }

    #[test]
    fn test_crypto_error_converts() {
        let err: PenneError = penne_crypto::decode_key("zz").unwrap_err().into();
        assert!(matches!(err, PenneError::Crypto(_)));
        assert!(err.to_string().starts_with("crypto error:"));
    }
}
