//! [`Storage`] of local preferences.

pub mod json_file;

use derive_more::{Display, Error as StdError, From};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::Settings;

pub use self::json_file::JsonFile;

/// Local storage operation.
pub use common::Handler as Storage;

/// Value persisted in a [`Storage`] under its own key.
pub trait Record: Serialize + DeserializeOwned {
    /// Key this [`Record`] is stored under.
    const KEY: &'static str;
}

impl Record for Settings {
    const KEY: &'static str = Settings::STORAGE_KEY;
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Underlying I/O operation failed.
    #[display("I/O operation failed: {_0}")]
    Io(std::io::Error),

    /// Stored value is not a valid JSON of the expected shape.
    #[display("Malformed stored value: {_0}")]
    Json(serde_json::Error),
}
