//! [`Command`] for creating a [`Session`].

use std::convert::Infallible;

use crate::{domain::user::Session, Service};

use super::Command;

/// [`Command`] for creating a [`Session`] of the default administrator.
///
/// No credentials are checked: anyone asking is let in.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateUserSession;

impl<Db, Rm, St> Command<CreateUserSession> for Service<Db, Rm, St> {
    type Ok = Session;
    type Err = Infallible;

    async fn execute(
        &self,
        _: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(Session::new())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::fixture::{test_service, FakeRemote},
        Command as _,
    };

    use super::CreateUserSession;

    #[tokio::test]
    async fn creates_default_principal_session() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());

        let session = service.execute(CreateUserSession).await.unwrap();

        assert_eq!(i32::from(session.user_id), 1);
        assert_eq!(session.name, "Test User");
        assert!(!session.expires_at.is_past());
    }
}
