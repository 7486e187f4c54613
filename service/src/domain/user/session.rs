//! [`Session`] definitions.

use std::time::Duration;

use common::{unit, DateTime, DateTimeOf};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Session of the directory administrator.
///
/// Session is a presence marker only: it carries no credential, and whoever
/// presents it is considered logged in.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// ID of the [`User`] this [`Session`] belongs to.
    #[serde(rename = "id")]
    pub user_id: user::Id,

    /// Display name of the [`User`] this [`Session`] belongs to.
    pub name: String,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Name of the marker this [`Session`] is stored under.
    pub const MARKER: &'static str = "auth_user";

    /// [`Duration`] of [`Session`] expiration.
    pub const EXPIRATION_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

    /// Creates a new [`Session`] of the default administrator, expiring in
    /// [`Session::EXPIRATION_DURATION`].
    ///
    /// Expiration is kept in whole seconds, as the marker stores it so.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_id: user::Id::from(1),
            name: "Test User".to_owned(),
            expires_at: (DateTime::now() + Self::EXPIRATION_DURATION)
                .trunc_to_seconds()
                .coerce(),
        }
    }

    /// Encodes this [`Session`] into its marker value.
    ///
    /// # Errors
    ///
    /// Errors if this [`Session`] cannot be serialized as JSON.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a [`Session`] from the provided marker value.
    ///
    /// # Errors
    ///
    /// Errors if the `marker` is not a JSON-encoded [`Session`].
    pub fn decode(marker: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(marker)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;
