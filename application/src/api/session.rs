//! [`Session`]-related definitions.

use common::DateTime;
use derive_more::{From, Into};
use juniper::graphql_object;
use service::domain;

use crate::{api::user, Context};

/// Session of the administrator.
#[derive(Clone, Debug, From, Into)]
pub struct Session(domain::user::Session);

/// Session of the administrator.
#[graphql_object(name = "UserSession", context = Context)]
impl Session {
    /// ID of the `User` this `UserSession` is started by.
    #[must_use]
    pub fn user_id(&self) -> user::Id {
        self.0.user_id.into()
    }

    /// Display name of the `UserSession` principal.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// `DateTime` when this `UserSession` expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime {
        self.0.expires_at.coerce()
    }
}
