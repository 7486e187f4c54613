//! [`Remote`] source of [`User`]s.
//!
//! [`User`]: crate::domain::User

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote source operation.
pub use common::Handler as Remote;

/// [`Remote`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request couldn't be performed or its response couldn't be read.
    #[cfg(feature = "http")]
    #[display("{_0}")]
    Transport(reqwest::Error),

    /// Remote source responded with an unsuccessful HTTP status.
    #[display("HTTP {_0}")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// Response body is not a list of users.
    #[display("Malformed response: {_0}")]
    Decode(serde_json::Error),
}
