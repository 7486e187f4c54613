//! [`Command`] for authorizing a [`Session`].

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] by its marker.
///
/// Marker presence is what matters: a malformed marker is still let in as
/// the default administrator's [`Session`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// Marker of the [`Session`] to authorize.
    pub marker: String,
}

impl<Db, Rm, St> Command<AuthorizeUserSession> for Service<Db, Rm, St> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let session = Session::decode(&cmd.marker).unwrap_or_else(|e| {
            log::warn!("malformed `Session` marker, using default one: {e}");
            Session::new()
        });
        if session.expires_at.is_past() {
            return Err(tracerr::new!(E::Expired(session.expires_at)));
        }

        Ok(session)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Session`] has expired.
    #[display("`Session` expired at {}", _0.to_rfc3339())]
    Expired(#[error(not(source))] session::ExpirationDateTime),
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::{
        command::fixture::{test_service, FakeRemote},
        domain::user::Session,
        Command as _,
    };

    use super::{AuthorizeUserSession, ExecutionError};

    #[tokio::test]
    async fn accepts_valid_marker() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        let marker = Session::new().encode().unwrap();

        let session = service
            .execute(AuthorizeUserSession { marker })
            .await
            .unwrap();

        assert_eq!(session.name, "Test User");
    }

    #[tokio::test]
    async fn falls_back_to_default_on_malformed_marker() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());

        let session = service
            .execute(AuthorizeUserSession::from("garbage".to_owned()))
            .await
            .unwrap();

        assert_eq!(i32::from(session.user_id), 1);
    }

    #[tokio::test]
    async fn rejects_expired_marker() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        let marker = Session {
            expires_at: DateTime::UNIX_EPOCH.coerce(),
            ..Session::new()
        }
        .encode()
        .unwrap();

        let err = service
            .execute(AuthorizeUserSession { marker })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Expired(_)));
    }
}
