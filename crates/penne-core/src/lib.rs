pub mod config;
pub mod error;
pub mod upload;

pub use config::PenneConfig;
pub use error::{PenneError, PenneResult};
pub use upload::{new_key_hex, prepare_upload, PreparedUpload};
