use thiserror::Error;

pub type PenneResult<T> = Result<T, PenneError>;

#[derive(Debug, Error)]
pub enum PenneError {
    #[error("config error: {0}")]
    Config(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] penne_crypto::PasteCryptoError),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
